//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use movebox_model::{LabelKind, RecordKind};

#[derive(Parser)]
#[command(name = "moveboxtracker")]
#[command(about = "Track moving boxes, their contents and where they are", long_about = None)]
pub(crate) struct Cli {
    /// Directory for database files given by relative name
    #[arg(long, global = true)]
    pub data_home: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create a new move database and its project record
    Init {
        /// Database file (relative names land in the data home)
        db: PathBuf,

        /// Primary user name/address printed in label URIs
        #[arg(long)]
        user: Option<String>,

        /// Project title
        #[arg(long)]
        title: Option<String>,

        /// Lost-and-found contact printed on labels
        #[arg(long)]
        found: Option<String>,
    },

    /// Create, read, update or delete one record
    Db {
        db: PathBuf,

        /// Record table (box, item, room, location, user, project, batch, scan, image)
        table: RecordKind,

        /// Operation to perform
        op: RecordOp,

        /// Record id (read/update/delete), then FIELD=VALUE assignments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List every record of a table
    List { db: PathBuf, table: RecordKind },

    /// Move every box scanned in a batch to the batch's location
    Commit { db: PathBuf, batch_id: i64 },

    /// Show label data for boxes (ids or START-END ranges)
    Label {
        db: PathBuf,

        #[arg(required = true)]
        ids: Vec<String>,

        /// Label layout (page, bagtag)
        #[arg(long = "type")]
        label_type: Option<LabelKind>,
    },

    /// Show destination sign data for a room
    Sign { db: PathBuf, room_id: i64 },

    /// Print the database as SQL text
    Dump { db: PathBuf },

    /// Show the fields a table accepts
    Fields { table: RecordKind },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum RecordOp {
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and where each value comes from
    Show,

    /// Print the settings file path
    Path,

    /// Save the default data home in the settings file
    SetDataHome {
        /// New data home directory
        path: PathBuf,
    },
}
