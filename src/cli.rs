// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Global options (token, API URL, timeout, concurrency, verbosity) apply to
// every subcommand and end up in one SessionConfig. Each subcommand takes the
// repository as its first positional argument.
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "repo-exporter",
    version,
    about = "Browse a GitHub repository and export selected files into one text file",
    long_about = "repo-exporter lists a GitHub repository's files, lets you select them by \
                  path, directory or extension, and concatenates the selection into a single \
                  text file. Handy for feeding a codebase to tools that take one document."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// GitHub personal access token (needed for private repositories)
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", global = true, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Directory listings in flight at once (1 = strictly sequential)
    #[arg(long, global = true, default_value_t = 1)]
    pub concurrency: usize,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the repository's file tree
    ///
    /// Example: repo-exporter tree https://github.com/rust-lang/log
    Tree {
        /// Repository (https://github.com/owner/repo or owner/repo)
        repo: String,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count the repository's files by extension
    Extensions {
        /// Repository (https://github.com/owner/repo or owner/repo)
        repo: String,

        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Select files and concatenate them into one text file
    ///
    /// Selection flags are applied in this order: --all, --dir, --file,
    /// --toggle-ext, --drop-dir, --drop-file.
    ///
    /// Example: repo-exporter export owner/repo --dir src --toggle-ext md -o out.txt
    Export(ExportArgs),

    /// Print one file from the repository
    Cat {
        /// Repository (https://github.com/owner/repo or owner/repo)
        repo: String,

        /// Path of the file inside the repository
        path: String,
    },
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Repository (https://github.com/owner/repo or owner/repo)
    pub repo: String,

    /// Select every file
    #[arg(long)]
    pub all: bool,

    /// Select every file under a directory (repeatable)
    #[arg(long = "dir", value_name = "DIR")]
    pub dirs: Vec<String>,

    /// Select one file (repeatable)
    #[arg(long = "file", value_name = "FILE")]
    pub files: Vec<String>,

    /// Flip an extension: enabling selects all its files, disabling drops them (repeatable)
    #[arg(long = "toggle-ext", value_name = "EXT")]
    pub toggle_exts: Vec<String>,

    /// Deselect every file under a directory (repeatable)
    #[arg(long = "drop-dir", value_name = "DIR")]
    pub drop_dirs: Vec<String>,

    /// Deselect one file (repeatable)
    #[arg(long = "drop-file", value_name = "FILE")]
    pub drop_files: Vec<String>,

    /// Start with no extensions enabled instead of .js .jsx .ts .css
    #[arg(long)]
    pub no_default_extensions: bool,

    /// Write the export to this path instead of the suggested file name
    #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the export to stdout
    #[arg(long)]
    pub stdout: bool,

    /// Show the resulting selection as a checkbox tree and stop before fetching any file
    #[arg(long)]
    pub dry_run: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[command(flatten)] do?
//    - It splices the fields of GlobalOpts into Cli as if they were declared there
//    - Keeps the global options in their own struct so they can be passed around
//
// 2. What is global = true?
//    - The option is accepted after any subcommand, not only before it
//    - "repo-exporter tree owner/repo -v" and "repo-exporter -v tree owner/repo"
//      both work
//
// 3. Why Vec<String> for --dir and friends?
//    - clap collects every occurrence of a repeated flag into the Vec
//    - An absent flag gives an empty Vec, so no Option is needed
//
// 4. What is ArgAction::Count?
//    - Counts how often the flag appears: -v = 1, -vv = 2
// -----------------------------------------------------------------------------
