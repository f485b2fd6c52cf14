mod browser;
mod cli;
mod fetch;
mod helpers;
mod install;
mod listing;
mod matcher;
mod settings;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use browser::{ListingView, LoadState, describe};
use cli::{Cli, Commands, Level};
use fetch::{HttpSource, ListingSource};
use install::{BuildInstallFormState, InstallStatus};
use listing::ItemType;
use settings::Settings;

fn construct_settings_file_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources").join("webhost.json")
}

/// Logs go to stderr so `list --json` output stays parseable.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let loaded = match config {
        Some(path) => settings::load_from_file(path),
        None if std::env::var_os(settings::SETTINGS_ENV).is_some() => settings::load_from_env(settings::SETTINGS_ENV),
        None => settings::load_from_file(construct_settings_file_path()),
    };
    loaded.context("failed to load settings")
}

/// A tiny wrapper to render the final status cleanly
fn print_status(status: &InstallStatus) {
    let InstallStatus::Installing { build_link, install_dir } = status;
    println!("\n=== Status ===");
    println!("Build:    {build_link}");
    println!("Target:   {}", install_dir.display());
    println!("State:    installing");
}

async fn run_list(
    source: &dyn ListingSource,
    settings: &Settings,
    url: Option<String>,
    level: Level,
    filter: Option<String>,
    json: bool,
) -> Result<()> {
    let url = url.unwrap_or_else(|| settings.root_url().to_string());
    let item_type = ItemType::from(level);

    let mut view = ListingView::new(url.as_str(), item_type, item_type.as_str());
    view.load(source).await;
    if let LoadState::Failed(msg) = view.state() {
        bail!("Something went wrong loading {url}: {msg}");
    }

    if let Some(text) = filter {
        view.set_search_text(text);
    }

    let items = view.visible_items();
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in items {
            println!("{}", describe(item));
        }
    }
    Ok(())
}

fn run_install(settings: &Settings, build: String, dir: PathBuf, xml: Option<PathBuf>, props: PathBuf) -> Result<()> {
    let mut form = BuildInstallFormState::new(build);
    form.pick_install_dir(dir);
    if let Some(xml) = xml {
        form.pick_cloud_xml(xml);
    }
    form.pick_cloud_props(props);

    let status = form.submit(settings.properties_keys()).context("install failed")?;
    print_status(&status);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut loaded = load_settings(cli.config.as_deref())?;
    if let Some(Commands::Browse { root: Some(root) }) = &cli.command {
        loaded = loaded.with_root_url(root);
    }
    let settings = settings::install(loaded)?;
    info!(root = settings.root_url(), "settings loaded");

    let source = HttpSource::new(settings.user_agent());

    match cli.command.unwrap_or(Commands::Browse { root: None }) {
        Commands::Browse { .. } => {
            if let Some(status) = browser::browse(&source, settings).await? {
                print_status(&status);
            }
        }
        Commands::List {
            url,
            level,
            filter,
            json,
        } => run_list(&source, settings, url, level, filter, json).await?,
        Commands::Install { build, dir, xml, props } => run_install(settings, build, dir, xml, props)?,
    }

    Ok(())
}
