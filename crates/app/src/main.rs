use std::process::ExitCode;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use config_store::{ConfigStore, FileBackend};

mod console;
mod settings;

use console::{log_console_output, run_console};
use settings::{ServerSettings, DEFAULT_DOCUMENT};

fn main() -> ExitCode {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()));

    let settings = ServerSettings::from_env();
    let backend = FileBackend::new(&settings.config_path);
    let store = match ConfigStore::open_or_create(backend, DEFAULT_DOCUMENT) {
        Ok(store) => store,
        Err(e) => {
            error!(
                "Cannot open config store {}: {}",
                settings.config_path.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Using config store {} with {} loaded world(s)",
        store.describe(),
        settings.worlds.len()
    );

    app.insert_resource(store)
        .insert_resource(settings.worlds)
        .add_plugins(multiplayer::MultiplayerPlugin)
        .add_systems(PostUpdate, log_console_output);

    // Initial update so Startup systems load both registries.
    app.update();

    run_console(&mut app);
    ExitCode::SUCCESS
}
