//! AppCanvas CLI
//!
//! Command-line interface over an AppCanvas SQLite store

use appcanvas_core::core_types::RequestId;
use appcanvas_core::logging_facility::{self, request_span, Profile};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "appcanvas")]
#[command(about = "AppCanvas - element tree store for the app builder", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "APPCANVAS_DB", default_value = ".appcanvas/store.db")]
    db: String,

    /// Log output on stderr
    #[arg(long, global = true, default_value = "pretty", value_parser = ["pretty", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and apply migrations
    Init,
    /// Project operations
    Project(commands::project::ProjectArgs),
    /// Element operations
    Element(commands::element::ElementArgs),
    /// Print the element tree under a project or element
    Tree(commands::tree::TreeArgs),
    /// Redefine the element tree under a project or element
    Reorder(commands::tree::ReorderArgs),
    /// Action operations
    Action(commands::action::ActionArgs),
    /// Event operations
    Event(commands::action::EventArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(Profile::from_format(&cli.log_format).unwrap_or(Profile::Development));

    let request_id = RequestId::new();
    let span = request_span(&request_id);
    let _guard = span.enter();

    let result = match cli.command {
        Commands::Init => commands::init(&cli.db),
        Commands::Project(args) => commands::project::execute(args, &cli.db),
        Commands::Element(args) => commands::element::execute(args, &cli.db),
        Commands::Tree(args) => commands::tree::execute_tree(args, &cli.db),
        Commands::Reorder(args) => commands::tree::execute_reorder(args, &cli.db),
        Commands::Action(args) => commands::action::execute_action(args, &cli.db),
        Commands::Event(args) => commands::action::execute_event(args, &cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
