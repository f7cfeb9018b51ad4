use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pma-migrate", version, about = "Seed or import a CMS test database through a phpMyAdmin web console")]
pub struct Cli {
    /// Path to the YAML config file (defaults to the app config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the four CMS tables and insert the fixed sample rows
    Seed,
    /// Upload a SQL dump file through the console's import endpoint
    Import {
        /// Path to the SQL dump, e.g. migration.sql
        file: PathBuf,
    },
}
