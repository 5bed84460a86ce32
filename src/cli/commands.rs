use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = env!("PLANBOARD_VERSION");

#[derive(Parser)]
#[command(
    name = "planboard",
    version = VERSION,
    about = "Kanban-style planning board",
    after_help = "\
NOTE:
  Data lives in <git-root>/.planboard/planboard.db unless --data-dir or
  PLANBOARD_DIR points elsewhere. Run `planboard init` before any other command.

COLUMNS:
  to-plan → planning → in-progress → review → done
  Any plan can move to any column; nothing is final.

SESSIONS:
  Logged out, the board shows a fixed demo set. Changes to it are not saved.
  Logged in, every change is saved under that email only.
  Login is a local check: any non-empty email and password are accepted.

EXIT CODES:
  0  Success
  1  Error (storage, validation, failed login, etc.)

LOGGING:
  Set PLANBOARD_LOG (e.g. `debug`) to log to stderr."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the board database
    #[arg(long, global = true, env = "PLANBOARD_DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the board database
    Init,

    /// Log in (local mock check, no server)
    Login {
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },

    /// Log out and return to the demo board
    Logout,

    /// Show the current session
    Whoami,

    /// Plan management
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Show the board, one column per status
    #[command(after_help = "\
FILTERS:
  --search matches title or description, case-insensitive.
  --tag keeps plans carrying ANY of the selected tags. Repeating a tag
  toggles it off again.
  Both filters must pass.")]
    Board {
        /// Text to look for in title or description
        #[arg(long)]
        search: Option<String>,

        /// Tag filter (repeatable, toggles)
        #[arg(long)]
        tag: Vec<String>,

        /// Only show this column
        #[arg(long)]
        status: Option<String>,
    },

    /// List every tag in use
    Tags,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Add a plan
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// to-plan | planning | in-progress | review | done
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        tag: Vec<String>,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,
    },
    /// Edit fields of a plan
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Replace the tag list (repeatable)
        #[arg(long, conflicts_with = "clear_tags")]
        tag: Vec<String>,
        #[arg(long)]
        clear_tags: bool,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        #[arg(long)]
        clear_due: bool,
    },
    /// Move a plan to another column
    Move {
        id: String,
        status: String,
    },
    /// Delete a plan
    Delete {
        id: String,
    },
    /// Show plan details
    Show {
        id: String,
    },
}
