//! Reorder planning
//!
//! A desired tree is checked against the scope's current descendant set,
//! then turned into one placement per element. Checks run in a fixed order
//! so the reported error is deterministic: duplicates, then membership,
//! then completeness.

use std::collections::HashSet;

use uuid::Uuid;

use crate::errors::{AppCanvasError, Result};
use crate::model::{TreeItem, TreeScope};

/// Target position of one element after a reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub element_id: Uuid,
    pub parent_id: Option<Uuid>,
    /// 1-based position among the new siblings
    pub order_index: i64,
}

/// Check that `desired` names exactly the ids in `current`
///
/// `current` is every descendant of the scope, at any depth.
///
/// # Errors
/// * `DuplicateTreeItem` if an id appears twice in `desired`
/// * `ElementNotInTree` for the first id that is not a current descendant
/// * `TreeNotCompleted` listing every current descendant left out
pub fn validate_desired_tree(current: &[Uuid], desired: &[TreeItem]) -> Result<()> {
    let wanted = TreeItem::flatten_ids(desired);

    let mut seen = HashSet::with_capacity(wanted.len());
    if let Some(dup) = wanted.iter().find(|id| !seen.insert(**id)) {
        return Err(AppCanvasError::DuplicateTreeItem { element_id: *dup });
    }

    let existing: HashSet<Uuid> = current.iter().copied().collect();
    if let Some(foreign) = wanted.iter().find(|id| !existing.contains(*id)) {
        return Err(AppCanvasError::ElementNotInTree {
            element_id: *foreign,
        });
    }

    let missing: Vec<Uuid> = current
        .iter()
        .filter(|id| !seen.contains(*id))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(AppCanvasError::TreeNotCompleted { missing });
    }

    Ok(())
}

/// Placements for a validated desired tree, depth-first
pub fn plan_placements(scope: TreeScope, desired: &[TreeItem]) -> Vec<Placement> {
    let mut out = Vec::new();
    plan_level(scope.parent_id(), desired, &mut out);
    out
}

fn plan_level(parent_id: Option<Uuid>, items: &[TreeItem], out: &mut Vec<Placement>) {
    for (position, item) in (1_i64..).zip(items) {
        out.push(Placement {
            element_id: item.id,
            parent_id,
            order_index: position,
        });
        plan_level(Some(item.id), &item.children, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::now_v7()).collect()
    }

    #[test]
    fn test_identity_tree_is_valid() {
        let ids = ids(3);
        let desired = vec![
            TreeItem::new(ids[0], vec![TreeItem::leaf(ids[1])]),
            TreeItem::leaf(ids[2]),
        ];
        assert!(validate_desired_tree(&ids, &desired).is_ok());
    }

    #[test]
    fn test_empty_scope_accepts_empty_tree() {
        assert!(validate_desired_tree(&[], &[]).is_ok());
    }

    #[test]
    fn test_missing_descendant() {
        let ids = ids(3);
        let desired = vec![TreeItem::leaf(ids[0]), TreeItem::leaf(ids[2])];

        assert_eq!(
            validate_desired_tree(&ids, &desired),
            Err(AppCanvasError::TreeNotCompleted {
                missing: vec![ids[1]]
            })
        );
    }

    #[test]
    fn test_foreign_id() {
        let ids = ids(2);
        let stranger = Uuid::now_v7();
        let desired = vec![
            TreeItem::leaf(ids[0]),
            TreeItem::leaf(ids[1]),
            TreeItem::leaf(stranger),
        ];

        assert_eq!(
            validate_desired_tree(&ids, &desired),
            Err(AppCanvasError::ElementNotInTree {
                element_id: stranger
            })
        );
    }

    #[test]
    fn test_membership_reported_before_completeness() {
        let ids = ids(2);
        let stranger = Uuid::now_v7();
        let desired = vec![TreeItem::leaf(stranger)];

        assert!(matches!(
            validate_desired_tree(&ids, &desired),
            Err(AppCanvasError::ElementNotInTree { .. })
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let ids = ids(2);
        let desired = vec![
            TreeItem::new(ids[0], vec![TreeItem::leaf(ids[1])]),
            TreeItem::leaf(ids[1]),
        ];

        assert_eq!(
            validate_desired_tree(&ids, &desired),
            Err(AppCanvasError::DuplicateTreeItem { element_id: ids[1] })
        );
    }

    #[test]
    fn test_placements_depth_first_one_based() {
        let scope_id = Uuid::now_v7();
        let ids = ids(3);
        let desired = vec![
            TreeItem::new(ids[1], vec![TreeItem::leaf(ids[2])]),
            TreeItem::leaf(ids[0]),
        ];

        let plan = plan_placements(TreeScope::Element(scope_id), &desired);

        assert_eq!(
            plan,
            vec![
                Placement {
                    element_id: ids[1],
                    parent_id: Some(scope_id),
                    order_index: 1
                },
                Placement {
                    element_id: ids[2],
                    parent_id: Some(ids[1]),
                    order_index: 1
                },
                Placement {
                    element_id: ids[0],
                    parent_id: Some(scope_id),
                    order_index: 2
                },
            ]
        );
    }

    #[test]
    fn test_project_scope_places_at_top_level() {
        let id = Uuid::now_v7();
        let plan = plan_placements(TreeScope::Project(Uuid::now_v7()), &[TreeItem::leaf(id)]);
        assert_eq!(plan[0].parent_id, None);
    }
}
