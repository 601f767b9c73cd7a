//! CLI argument parsing using clap.

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "manilist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Location of client config files
    #[arg(long, global = true, value_name = "DIR", env = "MANILIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage local manifest lists
    #[command(subcommand)]
    Manifest(ManifestCommands),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ManifestCommands {
    /// List local manifest lists
    #[command(name = "ls", visible_alias = "list")]
    Ls(ListArgs),
    /// Delete one or more manifest lists from local storage
    #[command(name = "rm", visible_alias = "remove")]
    Rm(RmArgs),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Only show manifest list NAMEs
    #[arg(short, long)]
    pub quiet: bool,

    /// Format output using a custom template:
    /// 'table':            Print output in table format with column headers (default)
    /// 'table TEMPLATE':   Print output in table format using the given template
    /// 'json':             Print in JSON format
    /// 'raw':              Print in key: value format
    /// 'TEMPLATE':         Print output using the given template
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "",
        hide_default_value = true,
        verbatim_doc_comment
    )]
    pub format: String,
}

#[derive(clap::Args)]
pub struct RmArgs {
    /// Manifest lists to remove
    #[arg(value_name = "MANIFEST_LIST", required = true)]
    pub manifest_lists: Vec<String>,
}
