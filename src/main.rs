//! iconpack - pick the themed icon pack from the terminal

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use iconpack::list::{build_entry_list, IconHandle};
use iconpack::selection::SYSTEM_ICONS_LABEL;
use iconpack::ui::TerminalUI;
use iconpack::{
    Application, Config, InMemoryStore, KeyValueStore, PackCatalog, SavedState, SelectionManager,
    StoreSwitch, TomlFileStore,
};
use std::path::PathBuf;
use std::sync::Arc;

fn cli() -> Command {
    Command::new("iconpack")
        .version(iconpack::VERSION)
        .about("Choose the themed icon pack")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("Configuration file (defaults to ~/.config/iconpack/config.toml)"),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .value_name("FILE")
                .global(true)
                .help("TOML file holding the persisted selection"),
        )
        .arg(
            Arg::new("packs-dir")
                .long("packs-dir")
                .value_name("DIR")
                .global(true)
                .help("Directory scanned for icon packs"),
        )
        .arg(
            Arg::new("state-file")
                .long("state-file")
                .value_name("FILE")
                .global(true)
                .help("Restore the picker state from FILE unless the store is newer; save it there on exit"),
        )
        .subcommand(Command::new("show").about("Print the current selection"))
        .subcommand(Command::new("list").about("List the selectable icon packs"))
        .subcommand(
            Command::new("select")
                .about("Select an icon pack by id")
                .arg(Arg::new("id").required(true).index(1)),
        )
        .subcommand(Command::new("reset").about("Go back to the system icons"))
        .subcommand(Command::new("pick").about("Open the interactive picker (default)"))
}

fn path_arg(matches: &ArgMatches, name: &str) -> Option<PathBuf> {
    matches.get_one::<String>(name).map(PathBuf::from)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let config = match path_arg(&matches, "config") {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    }
    .with_overrides(path_arg(&matches, "store"), path_arg(&matches, "packs-dir"));

    let store: Arc<dyn KeyValueStore> = match config.store_path() {
        Some(path) => Arc::new(TomlFileStore::new(path)),
        None => {
            log::info!("no store file configured, selection will not outlive this process");
            Arc::new(InMemoryStore::new())
        }
    };
    let switch = Arc::new(StoreSwitch::new(
        Arc::clone(&store),
        &config.authority,
        config.themed_icons_available,
    ));
    let manager = SelectionManager::new(store, switch, &config.authority);
    let catalog = Arc::new(PackCatalog::new(config.packs_dir()));

    match matches.subcommand() {
        Some(("show", _)) => {
            load_selection(&manager).await?;
            if let Err(err) = catalog.scan().await {
                log::warn!("Failed to enumerate icon packs: {err}");
            }
            println!("{}", manager.summary(catalog.as_ref()));
        }
        Some(("list", _)) => {
            load_selection(&manager).await?;
            let candidates = catalog.scan_entries().await?;
            let current = manager.current();
            for entry in build_entry_list(SYSTEM_ICONS_LABEL, IconHandle::default(), candidates) {
                let marker = if entry.id == current { "(*)" } else { "( )" };
                match entry.id {
                    Some(ref id) => println!("{marker} {}  {id}", entry.label),
                    None => println!("{marker} {}", entry.label),
                }
            }
        }
        Some(("select", sub)) => {
            let id = sub
                .get_one::<String>("id")
                .context("missing pack id")?
                .clone();
            let known = catalog
                .scan()
                .await?
                .into_iter()
                .any(|pack| pack.id == id);
            if !known {
                anyhow::bail!("No eligible icon pack with id {id}");
            }
            manager.select(Some(id)).await?;
            println!("{}", manager.summary(catalog.as_ref()));
        }
        Some(("reset", _)) => {
            manager.select(None).await?;
            println!("{}", manager.summary(catalog.as_ref()));
        }
        _ => {
            let state_file = path_arg(&matches, "state-file");
            let restored = match state_file {
                Some(ref path) => {
                    SavedState::load_unless_stale(path, config.store_path().as_deref())?
                        .and_then(SavedState::into_restored)
                }
                None => None,
            };
            // The picker draws immediately; a background fetch lands on a later tick
            let _fetch = manager.initialize(restored);

            let ui_renderer = Box::new(TerminalUI::new()?);
            let mut app = Application::new(manager.clone(), catalog, ui_renderer);
            app.run().await?;

            if let Some(ref path) = state_file {
                manager.snapshot_for_save().save(path)?;
            }
        }
    }

    Ok(())
}

/// Load the persisted selection and wait for it
async fn load_selection(manager: &SelectionManager) -> Result<()> {
    if let Some(fetch) = manager.initialize(None) {
        fetch.await?;
    }
    Ok(())
}
