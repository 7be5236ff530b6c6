use std::path::PathBuf;

use clap::Parser;

/// See which books on a reading shelf are available at your library branch.
#[derive(Parser, Debug)]
#[command(name = "shelf", version, about, long_about = None)]
pub struct Cli {
    /// User's id on the reading-list service
    #[arg(env = "SHELF_USER_ID")]
    pub user_id: Option<String>,

    /// Name of the shelf holding the books you want
    #[arg(long, default_value = "to-read")]
    pub shelf: String,

    /// Library system, by id (e.g. sfpl) or name
    #[arg(long)]
    pub library: Option<String>,

    /// Branch to check, by id (e.g. MAIN) or name
    #[arg(long)]
    pub branch: Option<String>,

    /// Lookup endpoint URL (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Configuration file (default: ./shelf.ron when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write the books found to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Print the known library systems and branches, then exit
    #[arg(long)]
    pub list_libraries: bool,

    /// Enable debug logging to the terminal as well as the log file
    #[arg(short, long)]
    pub verbose: bool,
}
