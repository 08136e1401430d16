//! Project commands
//!
//! Usage: appcanvas project create --title <TITLE> [--description <TEXT>]
//!        appcanvas project list [--limit <N>] [--offset <N>]
//!        appcanvas project show <ID>
//!        appcanvas project set-main-screen <ID> [<ELEMENT_ID>]
//!        appcanvas project delete <ID>

use appcanvas_core::model::{ProjectPatch, ProjectPayload};
use appcanvas_engine::{
    create_project, delete_project, get_project, list_projects, update_project,
};
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{open_store, print_json, CliResult};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a project
    Create(CreateArgs),
    /// List projects, newest first
    List {
        /// Page size; 0 or more than 100 means 30
        #[arg(long, default_value_t = 0)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Print a project
    Show { id: Uuid },
    /// Point the project at a screen, or clear it when no element is given
    SetMainScreen {
        id: Uuid,
        element_id: Option<Uuid>,
    },
    /// Delete a project with all of its elements, actions and events
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,
}

/// Execute project command
pub fn execute(args: ProjectArgs, db: &str) -> CliResult {
    let mut conn = open_store(db)?;

    match args.command {
        ProjectCommand::Create(create) => {
            let project = create_project(
                &mut conn,
                &ProjectPayload {
                    title: Some(create.title),
                    description: create.description,
                },
            )?;
            print_json(&project)
        }
        ProjectCommand::List { limit, offset } => print_json(&list_projects(&conn, limit, offset)?),
        ProjectCommand::Show { id } => print_json(&get_project(&conn, id)?),
        ProjectCommand::SetMainScreen { id, element_id } => {
            let patch = ProjectPatch {
                main_screen: Some(element_id),
                ..ProjectPatch::default()
            };
            print_json(&update_project(&mut conn, id, &patch)?)
        }
        ProjectCommand::Delete { id } => {
            delete_project(&mut conn, id)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}
