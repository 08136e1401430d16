//! Tree read and reorder commands
//!
//! Usage: appcanvas tree (--project <ID> | --element <ID>) [--depth N] [--flat] [--events]
//!        appcanvas reorder (--project <ID> | --element <ID>) --file tree.json

use std::path::PathBuf;

use appcanvas_core::model::{TreeItem, TreeScope};
use appcanvas_core::TreeOptions;
use appcanvas_engine::{get_tree, reorder};
use clap::{ArgGroup, Args};
use uuid::Uuid;

use super::{open_store, print_json, CliResult};

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("scope").required(true).args(["project", "element"])))]
pub struct ScopeArgs {
    /// Top-level elements of a project
    #[arg(long)]
    pub project: Option<Uuid>,

    /// Children of an element
    #[arg(long)]
    pub element: Option<Uuid>,
}

impl ScopeArgs {
    fn scope(&self) -> Result<TreeScope, Box<dyn std::error::Error>> {
        match (self.project, self.element) {
            (Some(id), None) => Ok(TreeScope::Project(id)),
            (None, Some(id)) => Ok(TreeScope::Element(id)),
            _ => Err("Must specify exactly one of --project or --element".into()),
        }
    }
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Maximum depth below the scope (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub depth: u32,

    /// Print the depth-ordered list instead of nested trees
    #[arg(long)]
    pub flat: bool,

    /// Attach each element's events
    #[arg(long)]
    pub events: bool,

    /// Restrict content columns (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// JSON array of tree items
    #[arg(long)]
    pub file: PathBuf,
}

/// Execute tree command
pub fn execute_tree(args: TreeArgs, db: &str) -> CliResult {
    let conn = open_store(db)?;
    let options = TreeOptions {
        depth: args.depth,
        flat: args.flat,
        columns: args.columns,
        with_events: args.events,
    };

    print_json(&get_tree(&conn, args.scope.scope()?, &options)?)
}

/// Execute reorder command
pub fn execute_reorder(args: ReorderArgs, db: &str) -> CliResult {
    let desired: Vec<TreeItem> = serde_json::from_str(&std::fs::read_to_string(&args.file)?)?;
    let scope = args.scope.scope()?;

    let mut conn = open_store(db)?;
    reorder(&mut conn, scope, &desired)?;

    print_json(&get_tree(&conn, scope, &TreeOptions::default())?)
}
