//! Action and event commands
//!
//! Usage: appcanvas action create --project <ID> --action <KIND> [--name ..] [--data JSON]
//!        appcanvas action update <ID> [--action <KIND>] [--name ..] [--data JSON]
//!        appcanvas action list --project <ID>
//!        appcanvas event create --element <ID> --action-id <ID> --event <NAME>
//!        appcanvas event show <ID>
//!        appcanvas event update <ID> [--action-id <ID>] [--event <NAME>]
//!        appcanvas event list --element <ID>

use appcanvas_core::model::{ActionPayload, EventPayload};
use appcanvas_engine::{
    create_action, create_event, delete_action, delete_event, get_event, list_actions,
    list_events, update_action, update_event,
};
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{open_store, parse_object, print_json, CliResult};

#[derive(Debug, Args)]
pub struct ActionArgs {
    #[command(subcommand)]
    pub command: ActionCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActionCommand {
    /// Create an action in a project
    Create {
        #[arg(long)]
        project: Uuid,
        /// Action kind, e.g. navigate
        #[arg(long)]
        action: String,
        #[arg(long)]
        name: Option<String>,
        /// JSON object
        #[arg(long)]
        data: Option<String>,
    },
    /// Change the given fields of an action
    Update {
        id: Uuid,
        #[arg(long)]
        action: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// JSON object, replaces the stored data
        #[arg(long)]
        data: Option<String>,
    },
    /// List a project's actions
    List {
        #[arg(long)]
        project: Uuid,
    },
    /// Delete an action and its events
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Bind an action to an element event
    Create {
        #[arg(long)]
        element: Uuid,
        #[arg(long)]
        action_id: Uuid,
        /// Event name, e.g. click
        #[arg(long)]
        event: String,
    },
    Show { id: Uuid },
    /// Rebind an event or rename its trigger
    Update {
        id: Uuid,
        #[arg(long)]
        action_id: Option<Uuid>,
        #[arg(long)]
        event: Option<String>,
    },
    /// List an element's events
    List {
        #[arg(long)]
        element: Uuid,
    },
    Delete { id: Uuid },
}

/// Execute action command
pub fn execute_action(args: ActionArgs, db: &str) -> CliResult {
    let mut conn = open_store(db)?;

    match args.command {
        ActionCommand::Create {
            project,
            action,
            name,
            data,
        } => {
            let payload = ActionPayload {
                name,
                action: Some(action),
                data: parse_object(data.as_deref())?,
            };
            print_json(&create_action(&mut conn, project, &payload)?)
        }
        ActionCommand::Update {
            id,
            action,
            name,
            data,
        } => {
            let payload = ActionPayload {
                name,
                action,
                data: parse_object(data.as_deref())?,
            };
            print_json(&update_action(&mut conn, id, &payload)?)
        }
        ActionCommand::List { project } => print_json(&list_actions(&conn, project)?),
        ActionCommand::Delete { id } => {
            delete_action(&mut conn, id)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

/// Execute event command
pub fn execute_event(args: EventArgs, db: &str) -> CliResult {
    let mut conn = open_store(db)?;

    match args.command {
        EventCommand::Create {
            element,
            action_id,
            event,
        } => {
            let payload = EventPayload {
                action_id: Some(action_id),
                event: Some(event),
            };
            print_json(&create_event(&mut conn, element, &payload)?)
        }
        EventCommand::Show { id } => print_json(&get_event(&conn, id)?),
        EventCommand::Update {
            id,
            action_id,
            event,
        } => {
            let payload = EventPayload { action_id, event };
            print_json(&update_event(&mut conn, id, &payload)?)
        }
        EventCommand::List { element } => print_json(&list_events(&conn, element)?),
        EventCommand::Delete { id } => {
            delete_event(&mut conn, id)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}
