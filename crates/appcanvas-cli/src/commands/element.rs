//! Element commands
//!
//! Usage: appcanvas element create --project <ID> [--parent <ID>] --type <TYPE> ...
//!        appcanvas element show <ID>
//!        appcanvas element update <ID> [--name ..] [--file payload.json]
//!        appcanvas element delete <ID>

use std::path::PathBuf;

use appcanvas_core::model::ElementPayload;
use appcanvas_engine::{create_element, delete_element, get_element, save_element};
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{open_store, parse_object, print_json, CliResult};

#[derive(Debug, Args)]
pub struct ElementArgs {
    #[command(subcommand)]
    pub command: ElementCommand,
}

#[derive(Debug, Subcommand)]
pub enum ElementCommand {
    /// Append a new element to a sibling group
    Create(CreateArgs),
    /// Print an element
    Show { id: Uuid },
    /// Update content fields, optionally reshaping the subtree
    Update(UpdateArgs),
    /// Delete an element and its subtree
    Delete { id: Uuid },
}

/// Content fields shared by create and update
#[derive(Debug, Args)]
pub struct FieldArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Element type (screen, text, layout, button, input, link, image, list)
    #[arg(long = "type")]
    pub element_type: Option<String>,

    /// JSON object
    #[arg(long)]
    pub attributes: Option<String>,

    /// JSON object
    #[arg(long)]
    pub styles: Option<String>,

    #[arg(long)]
    pub visible: Option<bool>,
}

impl FieldArgs {
    fn into_payload(self) -> Result<ElementPayload, Box<dyn std::error::Error>> {
        Ok(ElementPayload {
            name: self.name,
            element_type: self.element_type,
            attributes: parse_object(self.attributes.as_deref())?,
            styles: parse_object(self.styles.as_deref())?,
            is_visible: self.visible,
            elements: None,
        })
    }
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub project: Uuid,

    /// Parent element; top-level when omitted
    #[arg(long)]
    pub parent: Option<Uuid>,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: Uuid,

    /// Full JSON payload, including an optional `elements` tree
    #[arg(long, conflicts_with_all = ["name", "element_type", "attributes", "styles", "visible"])]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Execute element command
pub fn execute(args: ElementArgs, db: &str) -> CliResult {
    let mut conn = open_store(db)?;

    match args.command {
        ElementCommand::Create(create) => {
            let payload = create.fields.into_payload()?;
            let element = create_element(&mut conn, create.project, create.parent, &payload)?;
            print_json(&element)
        }
        ElementCommand::Show { id } => print_json(&get_element(&conn, id)?),
        ElementCommand::Update(update) => {
            let payload = match &update.file {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
                None => update.fields.into_payload()?,
            };
            print_json(&save_element(&mut conn, update.id, &payload)?)
        }
        ElementCommand::Delete { id } => {
            delete_element(&mut conn, id)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}
