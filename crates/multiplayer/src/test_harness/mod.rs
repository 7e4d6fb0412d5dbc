//! # TestServer: headless harness for the multiplayer plugin
//!
//! Wraps `App` + `MinimalPlugins` + [`MultiplayerPlugin`] over a
//! memory-backed [`ConfigStore`], so tests can drive commands and joins
//! through real events and inspect what was persisted.

mod commands;

use bevy::app::App;
use bevy::math::DVec3;
use bevy::prelude::*;
use config_store::{ConfigStore, MemoryBackend, Value};
use uuid::Uuid;

use crate::access::AccessRegistry;
use crate::commands::CommandReplyEvent;
use crate::host::{LoadedWorlds, Location, Player, PlayerLocation};
use crate::join_gate::KickPlayerEvent;
use crate::zones::ZoneRegistry;
use crate::MultiplayerPlugin;

/// Outbound events captured each frame.
#[derive(Resource, Debug, Default)]
pub struct OutboundLog {
    pub replies: Vec<CommandReplyEvent>,
    pub kicks: Vec<KickPlayerEvent>,
}

fn record_outbound(
    mut replies: EventReader<CommandReplyEvent>,
    mut kicks: EventReader<KickPlayerEvent>,
    mut log: ResMut<OutboundLog>,
) {
    log.replies.extend(replies.read().cloned());
    log.kicks.extend(kicks.read().cloned());
}

pub struct TestServer {
    app: App,
    backend: MemoryBackend,
}

impl TestServer {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Server with an empty store and a single `world` (height 320).
    pub fn new() -> Self {
        Self::with_store(MemoryBackend::default(), LoadedWorlds::default().with("world", 320))
    }

    /// Server whose store already holds `document`.
    pub fn with_document(document: Value, worlds: LoadedWorlds) -> Self {
        Self::with_store(MemoryBackend::with_document(document.to_string()), worlds)
    }

    /// Start over `backend` and run the first update so Startup systems load
    /// both registries.
    pub fn with_store(backend: MemoryBackend, worlds: LoadedWorlds) -> Self {
        let store = ConfigStore::open(backend.clone()).expect("test store should open");

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(store);
        app.insert_resource(worlds);
        app.add_plugins(MultiplayerPlugin);
        app.init_resource::<OutboundLog>();
        app.add_systems(PostUpdate, record_outbound);

        app.update();

        Self { app, backend }
    }

    // -----------------------------------------------------------------------
    // Running
    // -----------------------------------------------------------------------

    pub fn tick(&mut self, frames: u32) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    /// Send `event` and run one frame.
    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
        self.app.update();
    }

    /// Emit `AppExit` and run the frame that handles it.
    pub fn shutdown(&mut self) {
        self.send(AppExit::Success);
    }

    // -----------------------------------------------------------------------
    // Players
    // -----------------------------------------------------------------------

    /// Spawn a connected player, standing at the origin of `world` if given.
    pub fn spawn_player(&mut self, name: &str, id: Uuid, world: Option<&str>) -> Entity {
        let player = Player {
            id,
            name: name.to_string(),
        };
        let mut entity = self.app.world_mut().spawn(player);
        if let Some(world) = world {
            entity.insert(PlayerLocation(Location {
                world: world.to_string(),
                position: DVec3::ZERO,
                yaw: 0.0,
                pitch: 0.0,
            }));
        }
        entity.id()
    }

    pub fn location(&self, player: Entity) -> Option<Location> {
        self.app
            .world()
            .get::<PlayerLocation>(player)
            .map(|l| l.0.clone())
    }

    // -----------------------------------------------------------------------
    // Resources
    // -----------------------------------------------------------------------

    pub fn zones(&self) -> &ZoneRegistry {
        self.app.world().resource::<ZoneRegistry>()
    }

    pub fn access(&self) -> &AccessRegistry {
        self.app.world().resource::<AccessRegistry>()
    }

    pub fn store(&self) -> &ConfigStore {
        self.app.world().resource::<ConfigStore>()
    }

    pub fn store_mut(&mut self) -> Mut<'_, ConfigStore> {
        self.app.world_mut().resource_mut::<ConfigStore>()
    }

    pub fn worlds_mut(&mut self) -> Mut<'_, LoadedWorlds> {
        self.app.world_mut().resource_mut::<LoadedWorlds>()
    }

    /// Handle on the persisted document and its write counter.
    pub fn backend(&self) -> &MemoryBackend {
        &self.backend
    }

    /// Persisted document, parsed.
    pub fn persisted(&self) -> Value {
        let text = self.backend.document().unwrap_or_default();
        serde_json::from_str(&text).expect("persisted document should be JSON")
    }

    pub fn outbound(&self) -> &OutboundLog {
        self.app.world().resource::<OutboundLog>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new()
    }
}
