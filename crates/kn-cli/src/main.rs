//! CLI frontend for the Kursnetz course exploration engine.

mod commands;
mod tui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kn",
    about = "Kursnetz — explore a course prerequisite graph",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the dataset: courses, edges, departments, levels
    Info {
        /// Dataset file (default: courses.json)
        #[arg(short, long, default_value = "courses.json")]
        data: PathBuf,
    },

    /// Fuzzy-search courses, best matches first
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Restrict to these departments (repeatable)
        #[arg(short = 'D', long = "department")]
        departments: Vec<String>,

        /// Restrict to these levels: lower, upper, graduate (repeatable)
        #[arg(short = 'L', long = "level")]
        levels: Vec<String>,

        /// Dataset file (default: courses.json)
        #[arg(short, long, default_value = "courses.json")]
        data: PathBuf,
    },

    /// Show one course: rating, prerequisites, postrequisites
    Show {
        /// Course id (e.g. CS61A)
        course: String,

        /// Dataset file (default: courses.json)
        #[arg(short, long, default_value = "courses.json")]
        data: PathBuf,
    },

    /// Apply department/level filters and list the surviving subgraph
    Filter {
        /// Keep these departments (repeatable; empty = no restriction)
        #[arg(short = 'D', long = "department")]
        departments: Vec<String>,

        /// Keep these levels: lower, upper, graduate (repeatable; empty = no restriction)
        #[arg(short = 'L', long = "level")]
        levels: Vec<String>,

        /// Dataset file (default: courses.json)
        #[arg(short, long, default_value = "courses.json")]
        data: PathBuf,
    },

    /// List departments with course counts
    Departments {
        /// Dataset file (default: courses.json)
        #[arg(short, long, default_value = "courses.json")]
        data: PathBuf,
    },

    /// Print the synthetic rating record for a course
    Rate {
        /// Course id (e.g. CS61A)
        course: String,

        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,

        /// Dataset file (default: courses.json)
        #[arg(short, long, default_value = "courses.json")]
        data: PathBuf,
    },

    /// Launch the interactive TUI explorer
    Tui {
        /// Dataset file (default: courses.json)
        #[arg(short, long, default_value = "courses.json")]
        data: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { data } => commands::info::run(&data),
        Commands::Search {
            query,
            limit,
            departments,
            levels,
            data,
        } => commands::search::run(&data, &query, limit, &departments, &levels),
        Commands::Show { course, data } => commands::show::run(&data, &course),
        Commands::Filter {
            departments,
            levels,
            data,
        } => commands::filter::run(&data, &departments, &levels),
        Commands::Departments { data } => commands::departments::run(&data),
        Commands::Rate { course, json, data } => commands::rate::run(&data, &course, json),
        Commands::Tui { data } => commands::load_graph(&data).and_then(tui::run),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
