//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Tree-navigable guidebook viewer: hierarchical help entries, link navigation and live filtering
#[derive(Parser, Debug)]
#[command(name = "guidebook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Content directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub content_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the navigation tree
    Tree {
        /// Explicit root entries (default: entries without parent)
        #[arg(long = "root")]
        roots: Vec<String>,
        /// Single top-level entry holding all roots
        #[arg(long)]
        force_root: Option<String>,
    },

    /// List root entries in display order
    Roots,

    /// Display an entry as a link to it would
    Show {
        /// Entry id
        id: String,
        /// Filter searchable content
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Pick an entry interactively (fzf)
    Select,

    /// Print effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
