use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sb", about = concat!("statusboard v", env!("CARGO_PKG_VERSION"), " - ERP records on a board"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different project directory
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new statusboard project in the current directory
    Init(InitArgs),
    /// List dashboards with per-column counts
    Dashboards,
    /// Show a dashboard's columns and cards
    List(ListArgs),
    /// Show one record
    Show(ShowArgs),
    /// Add a record to a dashboard
    Add(AddArgs),
    /// Move a record to another status column
    Mv(MvArgs),
    /// Show or edit board settings
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct InitArgs {
    /// Project name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Overwrite an existing boards/project.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Dashboard id
    pub dashboard: String,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Dashboard id
    pub dashboard: String,
    /// Record id
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Dashboard id
    pub dashboard: String,
    /// Record title
    pub title: String,
    /// Status column (default: first column)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Dashboard id
    pub dashboard: String,
    /// Record id
    pub id: String,
    /// Target status column id
    pub status: String,
    /// Position in the target column (default: top)
    #[arg(long, default_value_t = 0)]
    pub index: usize,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
    /// Show the effective settings of one dashboard
    #[arg(long)]
    pub dashboard: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set a board key (column_width, undo_timeout_ms, show_undo_toast, allow_reorder)
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigSetArgs {
    pub key: String,
    pub value: String,
    /// Override the key for one dashboard instead of the whole project
    #[arg(long)]
    pub dashboard: Option<String>,
}
