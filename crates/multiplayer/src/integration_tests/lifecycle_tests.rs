//! Zone reloads and the shutdown write.

use config_store::json;
use uuid::Uuid;

use crate::commands::CommandSender;
use crate::host::LoadedWorlds;
use crate::test_harness::TestServer;

const ALEX: &str = "6f1c1d2e-1b7a-4c8e-9d43-0a5f3b2c1d00";

#[test]
fn test_reload_after_world_loads() {
    let mut server = TestServer::with_document(
        json!({"zones": {
            "hub": {"world": "world", "x": 0.0, "y": 64.0, "z": 0.0},
            "depths": {"world": "nether", "x": 12.0, "y": 200.0, "z": 3.0}
        }}),
        LoadedWorlds::default().with("world", 320),
    );
    assert!(server.zones().zone("depths").is_none());

    server.worlds_mut().load("nether", 128);
    server.reload_zones();

    let depths = server.zones().zone("DEPTHS").unwrap();
    assert_eq!(depths.position().y, 126.0, "y clamped to nether height");
    assert_eq!(server.zones().zone_ids(), vec!["hub", "depths"]);
}

#[test]
fn test_reload_picks_up_store_edits() {
    let mut server = TestServer::new();
    server.store_mut().set(
        "zones.market",
        json!({"world": "world", "x": 30.0, "y": 70.0, "z": 30.0}),
    );
    server.reload_zones();

    let steve = server.spawn_player("Steve", Uuid::new_v4(), Some("world"));
    let replies = server.zone_command(CommandSender::Player(steve), &["join", "market"]);
    assert_eq!(replies, vec!["Teleported to zone: market"]);
}

#[test]
fn test_shutdown_persists_loaded_whitelist() {
    let mut server = TestServer::with_document(
        json!({
            "zones": {"hub": {"world": "world", "x": 0.0, "y": 64.0, "z": 0.0}},
            "whitelist": {"enabled": true, "players": [ALEX, "junk"]}
        }),
        LoadedWorlds::default().with("world", 320),
    );
    assert_eq!(server.backend().writes(), 0);

    server.shutdown();

    assert_eq!(server.backend().writes(), 1);
    assert_eq!(server.persisted()["whitelist"]["players"], json!([ALEX]));
}

#[test]
fn test_shutdown_skips_never_loaded_whitelist() {
    let mut server = TestServer::with_document(
        json!({
            "zones": {"hub": {"world": "world", "x": 0.0, "y": 64.0, "z": 0.0}},
            "whitelist": {"enabled": false, "players": [ALEX]}
        }),
        LoadedWorlds::default().with("world", 320),
    );

    server.shutdown();

    assert_eq!(server.backend().writes(), 0);
    assert_eq!(server.persisted()["whitelist"]["players"], json!([ALEX]));
}
