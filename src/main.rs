// src/main.rs
// =============================================================================
// Entry point of the CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and build the SessionConfig
// 3. Dispatch to the subcommand handler
// 4. Exit with a code: 0 = success, 1 = export finished but some files
//    failed to load, 2 = error
//
// Results (trees, JSON, exported text) go to stdout. Status lines, progress
// and errors go to stderr, so stdout can be piped safely.
// =============================================================================

mod cli;
mod config;
mod error;
mod export;
mod github;
mod logging;
mod selection;
mod session;
mod tree;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands, ExportArgs, GlobalOpts};
use config::SessionConfig;
use error::{AcquireError, FileError, ProviderError};
use export::Artifact;
use github::{GithubClient, RepoId};
use selection::ExtensionInfo;
use session::Session;
use tree::Node;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            report_error(&e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);
    let config = build_config(&cli.global);

    match cli.command {
        Commands::Tree { repo, json } => handle_tree(config, &repo, json).await,
        Commands::Extensions { repo, json } => handle_extensions(config, &repo, json).await,
        Commands::Export(args) => handle_export(config, args).await,
        Commands::Cat { repo, path } => handle_cat(config, &repo, &path).await,
    }
}

fn build_config(opts: &GlobalOpts) -> SessionConfig {
    SessionConfig {
        api_url: opts.api_url.clone(),
        timeout: Duration::from_secs(opts.timeout),
        concurrency: opts.concurrency.max(1),
        ..SessionConfig::default()
    }
    .with_token(opts.token.clone())
}

// Parses the repository, builds the client and loads the tree into a new session
async fn open_session(config: SessionConfig, repo: &str) -> Result<(Session, GithubClient)> {
    let repo: RepoId = repo.parse()?;
    let client = GithubClient::new(&config)?;
    let mut session = Session::new(config);

    eprintln!("🔍 Loading repository: {}", repo);
    let summary = session.acquire(&client, &repo).await?;

    if let Some(tree) = session.tree() {
        eprintln!(
            "📂 {} ({}): {} file(s) in {} director(ies), {} extension(s)",
            summary.full_name,
            summary.default_branch,
            tree.file_count(),
            tree.directory_count(),
            selection::extract_extensions(tree).len()
        );
    }
    Ok((session, client))
}

// Handles the 'tree' subcommand
async fn handle_tree(config: SessionConfig, repo: &str, json: bool) -> Result<i32> {
    let (session, _client) = open_session(config, repo).await?;
    let tree = session.tree().context("repository tree was not loaded")?;

    if json {
        println!("{}", serde_json::to_string_pretty(tree)?);
    } else {
        print!("{}", render_tree(tree.root()));
    }
    Ok(0)
}

// Handles the 'extensions' subcommand
async fn handle_extensions(config: SessionConfig, repo: &str, json: bool) -> Result<i32> {
    let (session, _client) = open_session(config, repo).await?;
    let registry = session.extension_registry()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registry)?);
    } else {
        print_extension_table(&registry);
    }
    Ok(0)
}

// Handles the 'export' subcommand
async fn handle_export(mut config: SessionConfig, args: ExportArgs) -> Result<i32> {
    if args.no_default_extensions {
        config.enabled_extensions.clear();
    }
    let (mut session, client) = open_session(config, &args.repo).await?;

    apply_selection(&mut session, &args)?;

    // Preview only: show what would be exported, fetch nothing
    if args.dry_run {
        print!("{}", render_selection(&session)?);
        print_selection_summary(&session);
        return Ok(0);
    }

    eprintln!("📦 Exporting {} file(s)...", session.selection().len());

    let today = chrono::Utc::now().date_naive();
    let artifact = session
        .export(&client, today, |p| {
            eprint!("\r   {}/{}", p.current, p.total);
        })
        .await?;
    eprintln!();

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(artifact.content.as_bytes())?;
        stdout.flush()?;
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&artifact.filename));
        std::fs::write(&path, &artifact.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("💾 Wrote {}", path.display());
    }

    print_export_summary(&artifact);

    if artifact.failed_paths().is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Selection flags are applied in a fixed order, whatever order they were typed in
fn apply_selection(session: &mut Session, args: &ExportArgs) -> Result<()> {
    if args.all {
        session.check_all()?;
    }
    for dir in &args.dirs {
        session.toggle_directory(dir, true)?;
    }
    for file in &args.files {
        session.toggle_file(file, true)?;
    }
    for ext in &args.toggle_exts {
        let enabled = session.toggle_extension(ext)?;
        eprintln!(
            "   {} {}",
            if enabled { "➕ enabled" } else { "➖ disabled" },
            ext
        );
    }
    for dir in &args.drop_dirs {
        session.toggle_directory(dir, false)?;
    }
    for file in &args.drop_files {
        session.toggle_file(file, false)?;
    }
    Ok(())
}

// Handles the 'cat' subcommand
async fn handle_cat(config: SessionConfig, repo: &str, path: &str) -> Result<i32> {
    let repo: RepoId = repo.parse()?;
    let client = GithubClient::new(&config)?;

    let text = export::fetch_text(&client, &repo, path.trim_matches('/')).await?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(0)
}

// Draws the tree with box characters; directories end with '/'
fn render_tree(root: &Node) -> String {
    render_with(".", root, &display_name)
}

// Same drawing, with a [x] / [ ] checkbox in front of every entry
fn render_selection(session: &Session) -> Result<String> {
    let tree = session.tree().context("repository tree was not loaded")?;
    let repo = session.repo().context("repository tree was not loaded")?;

    // Every path comes from the tree itself, so the lookup cannot miss
    let label = |node: &Node| {
        let checked = session.is_checked(&node.path).unwrap_or(false);
        format!("{} {}", checkbox(checked), display_name(node))
    };
    let root_label = format!("{} {}", checkbox(session.is_checked("")?), repo);

    Ok(render_with(&root_label, tree.root(), &label))
}

fn render_with(root_label: &str, root: &Node, label: &dyn Fn(&Node) -> String) -> String {
    let mut out = format!("{}\n", root_label);
    render_children(&root.children, "", label, &mut out);
    out
}

fn render_children(
    children: &[Node],
    prefix: &str,
    label: &dyn Fn(&Node) -> String,
    out: &mut String,
) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let branch = if last { "└── " } else { "├── " };
        out.push_str(&format!("{}{}{}\n", prefix, branch, label(child)));

        if child.is_dir() {
            // Continue the parent's vertical line unless this was its last child
            let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_children(&child.children, &next, label, out);
        }
    }
}

fn display_name(node: &Node) -> String {
    if node.is_dir() {
        format!("{}/", node.name)
    } else {
        node.name.clone()
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn print_selection_summary(session: &Session) {
    let enabled: Vec<&str> = session.extensions().enabled().collect();
    let enabled = if enabled.is_empty() {
        "(none)".to_string()
    } else {
        enabled.join(" ")
    };

    eprintln!();
    eprintln!("📋 {} file(s) selected", session.selection().len());
    eprintln!("🔧 Enabled extensions: {}", enabled);
}

fn print_extension_table(registry: &[ExtensionInfo]) {
    println!("{:<20} {:>8} {:<8}", "EXTENSION", "FILES", "ENABLED");
    println!("{}", "=".repeat(38));

    for info in registry {
        let enabled = if info.enabled { "✅" } else { "" };
        println!("{:<20} {:>8} {:<8}", info.extension, info.count, enabled);
    }

    println!();
    let total: usize = registry.iter().map(|info| info.count).sum();
    println!("📊 {} extension(s), {} file(s)", registry.len(), total);
}

fn print_export_summary(artifact: &Artifact) {
    let failed = artifact.failed_paths();

    eprintln!("📊 Summary:");
    eprintln!("   ✅ Loaded: {}", artifact.loaded_count());
    eprintln!("   ❌ Failed: {}", failed.len());
    for path in failed {
        eprintln!("      - {}", path);
    }
}

fn report_error(err: &anyhow::Error) {
    match provider_error(err) {
        Some(provider) => {
            eprintln!("❌ Error: {}", err);
            eprintln!();
            eprintln!("{}:", provider.category());
            for hint in provider.hints() {
                eprintln!("   • {}", hint);
            }
        }
        None => eprintln!("❌ Error: {:#}", err),
    }
}

// Finds the classified API failure behind an error, if there is one
fn provider_error(err: &anyhow::Error) -> Option<&ProviderError> {
    if let Some(acquire) = err.downcast_ref::<AcquireError>() {
        return Some(acquire.provider_error());
    }
    match err.downcast_ref::<FileError>() {
        Some(FileError::Provider(provider)) => Some(provider),
        _ => err.downcast_ref::<ProviderError>(),
    }
}
