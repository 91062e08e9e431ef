use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "catalog")]
#[command(about = "Browse and administer the vehicle and plan catalog")]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "CATALOG_API_URL")]
    pub api_url: Option<String>,

    /// Collection to work on (planes, vehiculos)
    #[arg(long, short, global = true, env = "CATALOG_COLLECTION")]
    pub collection: Option<String>,

    /// Session file holding the admin token
    #[arg(long, global = true, env = "CATALOG_TOKEN_PATH")]
    pub token_path: Option<PathBuf>,

    /// Write logs to daily files in this directory instead of stderr
    #[arg(long, global = true, env = "CATALOG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print raw JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the public catalog
    List {
        /// Free-text search
        #[arg(long)]
        q: Option<String>,

        /// Filter value, e.g. `marca=Toyota` or `precioMin=1000`
        #[arg(long = "filter", value_parser = parse_pair)]
        filters: Vec<(String, String)>,
    },

    /// Show one item with its photos and contact links
    Show {
        id: String,

        /// Zoom steps to apply on the first photo
        #[arg(long, default_value_t = 0)]
        zoom_in: u32,
    },

    /// List the choices of every filter
    Options,

    /// Token-gated administration
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Exchange credentials for a token
    Login {
        #[arg(long, env = "CATALOG_ADMIN_USER")]
        user: String,

        #[arg(long, env = "CATALOG_ADMIN_PASS", hide_env_values = true)]
        pass: String,
    },

    /// Forget the stored token
    Logout,

    /// List every item, inactive ones included
    List,

    /// Delete an item
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short, default_value_t = false)]
        yes: bool,
    },

    /// Create an item
    Create(EditArgs),

    /// Update an item
    Update {
        id: String,

        #[command(flatten)]
        edit: EditArgs,
    },

    /// Upload image files and print their stored paths
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct EditArgs {
    /// Field value, e.g. `nombre=Plan Premium`
    #[arg(long = "field", value_parser = parse_pair)]
    pub fields: Vec<(String, String)>,

    /// Stored photo path to use as primary
    #[arg(long)]
    pub primary: Option<String>,

    /// Stored photo path to add to the gallery
    #[arg(long = "photo")]
    pub photos: Vec<String>,

    /// Stored photo path to drop from the gallery
    #[arg(long = "remove-photo")]
    pub remove_photos: Vec<String>,
}

/// `key=value`; the value may be empty or contain `=`
pub fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
