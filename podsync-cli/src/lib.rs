//! Command-line driver for a Pods multisite network kept in SQLite.
//!
//! Network commands open the network database and make `--site` the active
//! site. Every command renders its result as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use podsync_model::{settings, Pod, PodRef};
use podsync_store::NetworkStore;
use podsync_sync::{PodSyncer, SiteScope, SyncConfig};
use podsync_types::SiteId;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "podsync")]
#[command(about = "Push pod schemas across a Pods multisite network")]
pub struct Args {
    /// Path to the network database
    #[arg(short, long, default_value = "network.db")]
    pub db: PathBuf,

    /// Main site of the network, active when no other site is
    #[arg(long, default_value = "1")]
    pub home: SiteId,

    /// Site the command runs on (defaults to the main site)
    #[arg(short, long)]
    pub site: Option<SiteId>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the tab and options the sync adds to the pod editor
    Settings,

    #[command(flatten)]
    Network(NetworkCommand),
}

/// Commands that run against the network database.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Register a site in the network
    AddSite { id: SiteId, domain: String },

    /// List the sites of the network
    Sites,

    /// Save a pod definition from a JSON file on the site
    Import { file: PathBuf },

    /// Print a pod stored on the site
    Show { pod: String },

    /// List the pods stored on the site
    Pods,

    /// Push a pod to the sites listed in its options
    Sync {
        pod: String,

        /// Reconcile every target without saving
        #[arg(long)]
        dry_run: bool,

        /// JSON file with sync settings
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Runs one command and returns its JSON output.
pub fn run(args: &Args) -> Result<Value> {
    match &args.command {
        Command::Settings => Ok(editor_settings()),
        Command::Network(command) => run_on_network(args, command),
    }
}

fn run_on_network(args: &Args, command: &NetworkCommand) -> Result<Value> {
    let store = Arc::new(
        NetworkStore::open(&args.db, args.home)
            .with_context(|| format!("Failed to open network database {}", args.db.display()))?,
    );
    debug!("Opened network {} (home site {})", args.db.display(), args.home);

    // Held until the command finishes so the site stays active throughout.
    let _scope = match args.site {
        Some(site) if site != args.home => Some(SiteScope::enter(&*store, site)?),
        _ => None,
    };
    let site = store.current_site();

    match command {
        NetworkCommand::AddSite { id, domain } => {
            store.add_site(*id, domain)?;
            info!("Registered site {} ({})", id, domain);
            Ok(json!({ "site": id, "domain": domain }))
        }
        NetworkCommand::Sites => Ok(json!(store.sites()?)),
        NetworkCommand::Import { file } => {
            let pod = read_pod(file)?;
            let id = store.save_pod(site, &pod)?;
            info!("Imported {} as #{} on site {}", pod.name, id, site);
            Ok(json!({ "site": site, "pod": pod.name, "id": id }))
        }
        NetworkCommand::Show { pod } => {
            let found = store
                .load_pod(site, &PodRef::from(pod.as_str()))?
                .with_context(|| format!("No pod {} on site {}", pod, site))?;
            Ok(serde_json::to_value(found)?)
        }
        NetworkCommand::Pods => Ok(json!(store.pod_names(site)?)),
        NetworkCommand::Sync {
            pod,
            dry_run,
            config,
        } => {
            let mut config = match config {
                Some(path) => read_config(path)?,
                None => SyncConfig::default(),
            };
            config.dry_run |= *dry_run;

            let syncer = PodSyncer::with_config(store.clone(), store.clone(), config);
            let report = syncer.sync_pod(&PodRef::from(pod.as_str()))?;
            Ok(serde_json::to_value(report)?)
        }
    }
}

/// Reads a pod definition, as printed by `show`, from a JSON file.
pub fn read_pod(path: &Path) -> Result<Pod> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pod file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid pod definition in {}", path.display()))
}

pub fn read_config(path: &Path) -> Result<SyncConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid sync config in {}", path.display()))
}

fn editor_settings() -> Value {
    let mut tabs = Map::new();
    settings::register_tab(&mut tabs);
    let mut options = Map::new();
    settings::register_options(&mut options);
    json!({ "tabs": tabs, "options": options })
}
