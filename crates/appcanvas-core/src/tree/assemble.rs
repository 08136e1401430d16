use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::model::Element;

/// Reassemble a depth-ordered flat read into nested trees
///
/// Elements are grouped by `parent_id` in the order they appear in `flat`,
/// so the sibling order established by the read is preserved. `root` is the
/// `parent_id` of the scope's direct children (`None` for a project scope).
///
/// The input is not modified and any `children` already present on it are
/// ignored, so assembling the same sequence twice yields identical trees.
/// Elements whose parent is not reachable from `root` are dropped.
pub fn assemble(flat: &[Element], root: Option<Uuid>) -> Vec<Element> {
    let mut by_parent: HashMap<Option<Uuid>, Vec<&Element>> = HashMap::new();
    for element in flat {
        by_parent.entry(element.parent_id).or_default().push(element);
    }

    let mut visited = HashSet::new();
    build_level(&by_parent, root, &mut visited)
}

fn build_level(
    by_parent: &HashMap<Option<Uuid>, Vec<&Element>>,
    parent: Option<Uuid>,
    visited: &mut HashSet<Uuid>,
) -> Vec<Element> {
    let Some(siblings) = by_parent.get(&parent) else {
        return Vec::new();
    };

    let mut level = Vec::with_capacity(siblings.len());
    for element in siblings {
        // A repeated id would otherwise recurse forever
        if !visited.insert(element.id) {
            continue;
        }
        let mut node = (*element).clone();
        node.children = build_level(by_parent, Some(element.id), visited);
        level.push(node);
    }
    level
}

/// Flatten nested trees back into depth-first pre-order
pub fn flatten(tree: &[Element]) -> Vec<&Element> {
    let mut out = Vec::new();
    collect(tree, &mut out);
    out
}

fn collect<'a>(tree: &'a [Element], out: &mut Vec<&'a Element>) {
    for element in tree {
        out.push(element);
        collect(&element.children, out);
    }
}
