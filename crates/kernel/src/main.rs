//! Labnav command-line tool
//!
//! Loads the route definition tree and an actor's permissions, then prints
//! the resolved menu, the rendered navigation outline, or a gate decision.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use labnav_kernel::menu::{RouteRegistry, outline, selected_entry};
use labnav_kernel::permissions::{
    FilePermissions, PermissionSource, StaticPermissions, load_actor_permissions,
};
use labnav_kernel::{Config, NavigationCache};

/// Inspect the navigation an actor would see.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Route definition file (overrides ROUTES_FILE).
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Saved permissions endpoint response (overrides PERMISSIONS_FILE).
    #[arg(long)]
    permissions_file: Option<PathBuf>,

    /// Permission token held by the actor; repeatable. Takes precedence
    /// over any permissions file.
    #[arg(long = "permission", short = 'p')]
    permissions: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved menu tree as JSON.
    Menu,
    /// Print the rendered navigation as an outline.
    Nav {
        /// Mark the entry highlighted for this location.
        #[arg(long)]
        current: Option<String>,
    },
    /// Gate a location and print the decision as JSON.
    Check {
        /// Requested path, e.g. /workbench/task/list.
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let routes_file = args.routes.unwrap_or(config.routes_file);
    let registry = RouteRegistry::load(&routes_file)
        .with_context(|| format!("failed to load routes from {}", routes_file.display()))?;
    info!(
        file = %routes_file.display(),
        nodes = registry.len(),
        "Route tree loaded"
    );

    let source: Box<dyn PermissionSource> = match args.permissions_file.or(config.permissions_file) {
        Some(path) if args.permissions.is_empty() => Box::new(FilePermissions::new(path)),
        _ => Box::new(StaticPermissions::new(args.permissions)),
    };
    let actor = load_actor_permissions(source.as_ref()).await;

    let cache = NavigationCache::new(registry.shared(), config.menu_cache_capacity);

    match args.command {
        Command::Menu => {
            let navigation = cache.navigation_for(&actor);
            let json = serde_json::to_string_pretty(&navigation.menu)
                .context("failed to serialize menu")?;
            println!("{json}");
        }
        Command::Nav { current } => {
            let navigation = cache.navigation_for(&actor);
            if !config.app_title.is_empty() {
                println!("{}", config.app_title);
            }
            print!("{}", outline(&navigation.items));
            if let Some(current) = current {
                match selected_entry(&navigation.menu, &current) {
                    Some(entry) => println!(
                        "selected: {} ({})",
                        entry.name().unwrap_or_default(),
                        entry.absolute_path
                    ),
                    None => println!("selected: none"),
                }
            }
        }
        Command::Check { path } => {
            let access = cache.authorize(&actor, &path);
            let json =
                serde_json::to_string_pretty(&access).context("failed to serialize decision")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
