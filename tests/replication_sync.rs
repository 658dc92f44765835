//! Replication and Session Lifecycle Tests
//!
//! - The whitelist is server-authoritative but locally cached: a remote
//!   session installs the server snapshot, applies deltas, and never
//!   writes server-pushed state to its own store
//! - Disconnecting restores the locally persisted configuration
//! - Only the authoritative side broadcasts, and never for no-ops

use tempfile::TempDir;
use uuid::Uuid;
use wardstone::config::StoredConfig;
use wardstone::protocol::{MutationOp, Snapshot};
use wardstone::session::{MutationError, SessionController, SessionPhase};

fn server_in(dir: &TempDir) -> SessionController {
    SessionController::load(dir.path().join("server.json"), true).unwrap()
}

fn client_in(dir: &TempDir) -> SessionController {
    SessionController::load(dir.path().join("client.json"), false).unwrap()
}

fn stored(dir: &TempDir, file: &str) -> StoredConfig {
    StoredConfig::load(&dir.path().join(file)).unwrap()
}

// =============================================================================
// Snapshot Install
// =============================================================================

/// Installing a snapshot is clear-then-replace, regardless of prior
/// contents.
#[test]
fn test_snapshot_install_replaces_contents() {
    let dir = TempDir::new().unwrap();
    let mut client = client_in(&dir);

    // Local contents differ from what the server will push
    client
        .apply_local(&MutationOp::Add("minecraft:local_only".to_string()))
        .unwrap();

    client.remote_join().unwrap();
    let snapshot = Snapshot::new(vec!["a:b".to_string(), "c:d".to_string()]);
    client.install_snapshot(&snapshot).unwrap();

    assert_eq!(client.phase(), SessionPhase::ConnectedRemote);
    assert_eq!(
        client.whitelist().render(),
        vec!["a:b".to_string(), "c:d".to_string()]
    );
}

/// The snapshot travels encoded: what the server renders, the client
/// installs.
#[test]
fn test_snapshot_wire_transfer_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut server = server_in(&dir);
    let mut client = client_in(&dir);

    server
        .apply_local(&MutationOp::Add("minecraft:log[variant=oak]".to_string()))
        .unwrap();

    let peer = Uuid::new_v4();
    let snapshot = server.peer_joined(peer);
    let bytes = snapshot.encode();

    client.remote_join().unwrap();
    client
        .install_snapshot(&Snapshot::decode(&bytes).unwrap())
        .unwrap();

    assert_eq!(client.whitelist().render(), server.whitelist().render());
}

/// A snapshot outside a remote session is a protocol violation.
#[test]
fn test_snapshot_while_standalone_rejected() {
    let dir = TempDir::new().unwrap();
    let mut client = client_in(&dir);

    let snapshot = Snapshot::new(vec!["a:b".to_string()]);
    assert!(client.install_snapshot(&snapshot).is_err());
    assert_eq!(client.phase(), SessionPhase::Standalone);
}

// =============================================================================
// Save Suppression While Remote
// =============================================================================

/// Nothing the server pushes reaches the client's local store.
#[test]
fn test_remote_session_never_persists_pushed_state() {
    let dir = TempDir::new().unwrap();
    let mut client = client_in(&dir);
    let before = stored(&dir, "client.json");

    client.remote_join().unwrap();
    assert!(client.gate().saving_suppressed());

    client
        .install_snapshot(&Snapshot::new(vec!["server:pushed".to_string()]))
        .unwrap();
    client
        .apply_remote(&MutationOp::Add("server:delta".to_string()))
        .unwrap();
    client.apply_remote(&MutationOp::Disable).unwrap();

    assert_eq!(stored(&dir, "client.json"), before);
}

/// Between join and snapshot the locally-loaded data stays visible:
/// the documented window, suppressed saving included.
#[test]
fn test_join_to_snapshot_window_keeps_local_data() {
    let dir = TempDir::new().unwrap();
    let mut client = client_in(&dir);

    client.remote_join().unwrap();
    assert_eq!(client.phase(), SessionPhase::ConnectingRemote);
    assert_eq!(
        client.whitelist().render(),
        vec!["computercraft:*".to_string()]
    );
    assert!(client.gate().saving_suppressed());
}

// =============================================================================
// Delta Application on a Receiving Peer
// =============================================================================

/// Inbound deltas mutate the replicated whitelist in order.
#[test]
fn test_remote_deltas_apply_in_order() {
    let dir = TempDir::new().unwrap();
    let mut client = client_in(&dir);

    client.remote_join().unwrap();
    client
        .install_snapshot(&Snapshot::new(vec!["a:b".to_string()]))
        .unwrap();

    client
        .apply_remote(&MutationOp::Add("c:d".to_string()))
        .unwrap();
    client
        .apply_remote(&MutationOp::Remove("a:b".to_string()))
        .unwrap();

    assert_eq!(client.whitelist().render(), vec!["c:d".to_string()]);
}

/// No-op deltas are ignored on the receiving side, not errors.
#[test]
fn test_remote_noop_deltas_ignored() {
    let dir = TempDir::new().unwrap();
    let mut client = client_in(&dir);

    client.remote_join().unwrap();
    client
        .install_snapshot(&Snapshot::new(vec!["a:b".to_string()]))
        .unwrap();

    // Duplicate add and absent remove both succeed silently
    client
        .apply_remote(&MutationOp::Add("a:b".to_string()))
        .unwrap();
    client
        .apply_remote(&MutationOp::Remove("x:y".to_string()))
        .unwrap();
    client.apply_remote(&MutationOp::Enable).unwrap();

    assert_eq!(client.whitelist().render(), vec!["a:b".to_string()]);
}

/// Enable/Disable deltas replicate the gate flag.
#[test]
fn test_remote_toggle_deltas_apply() {
    let dir = TempDir::new().unwrap();
    let mut client = client_in(&dir);

    client.remote_join().unwrap();
    client.install_snapshot(&Snapshot::default()).unwrap();

    client.apply_remote(&MutationOp::Disable).unwrap();
    assert!(!client.whitelist().is_enabled());

    client.apply_remote(&MutationOp::Enable).unwrap();
    assert!(client.whitelist().is_enabled());
}

// =============================================================================
// Disconnect Restore
// =============================================================================

/// Disconnecting discards pushed state and reloads the local store.
#[test]
fn test_disconnect_restores_local_configuration() {
    let dir = TempDir::new().unwrap();
    let mut client = client_in(&dir);

    client.remote_join().unwrap();
    client
        .install_snapshot(&Snapshot::new(vec!["server:pushed".to_string()]))
        .unwrap();
    client.apply_remote(&MutationOp::Disable).unwrap();

    client.disconnect().unwrap();

    assert_eq!(client.phase(), SessionPhase::Standalone);
    assert_eq!(
        client.whitelist().render(),
        vec!["computercraft:*".to_string()]
    );
    assert!(client.whitelist().is_enabled());
    assert!(!client.gate().saving_suppressed());
}

/// After restore, local mutations persist again.
#[test]
fn test_saving_resumes_after_disconnect() {
    let dir = TempDir::new().unwrap();
    let mut client = client_in(&dir);

    client.remote_join().unwrap();
    client
        .install_snapshot(&Snapshot::new(vec!["server:pushed".to_string()]))
        .unwrap();
    client.disconnect().unwrap();

    client
        .apply_local(&MutationOp::Add("minecraft:stone".to_string()))
        .unwrap();

    let on_disk = stored(&dir, "client.json");
    assert!(on_disk.whitelist.contains(&"minecraft:stone".to_string()));
    assert!(!on_disk.whitelist.contains(&"server:pushed".to_string()));
}

// =============================================================================
// Authoritative Broadcast
// =============================================================================

/// Server-side mutations persist and produce a broadcast op.
#[test]
fn test_authoritative_mutation_persists_and_broadcasts() {
    let dir = TempDir::new().unwrap();
    let mut server = server_in(&dir);

    let op = MutationOp::Add("minecraft:stone".to_string());
    let broadcast = server.apply_local(&op).unwrap();
    assert_eq!(broadcast, Some(op));

    let on_disk = stored(&dir, "server.json");
    assert!(on_disk.whitelist.contains(&"minecraft:stone".to_string()));
}

/// No-op mutations are rejected and never broadcast.
#[test]
fn test_noop_mutation_never_broadcast() {
    let dir = TempDir::new().unwrap();
    let mut server = server_in(&dir);

    let duplicate = MutationOp::Add("computercraft:*".to_string());
    assert!(matches!(
        server.apply_local(&duplicate),
        Err(MutationError::Duplicate(_))
    ));

    assert!(matches!(
        server.apply_local(&MutationOp::Enable),
        Err(MutationError::AlreadyEnabled)
    ));
}

/// The broadcast op round-trips the wire and applies cleanly on a peer.
#[test]
fn test_delta_broadcast_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut server = server_in(&dir);
    let mut client = client_in(&dir);

    // Client joins and receives the initial snapshot
    let snapshot = server.peer_joined(Uuid::new_v4());
    client.remote_join().unwrap();
    client
        .install_snapshot(&Snapshot::decode(&snapshot.encode()).unwrap())
        .unwrap();

    // Server mutates; the delta travels encoded
    let broadcast = server
        .apply_local(&MutationOp::Add("minecraft:dirt".to_string()))
        .unwrap()
        .expect("authoritative side must broadcast");
    client
        .apply_remote(&MutationOp::decode(&broadcast.encode()).unwrap())
        .unwrap();

    assert_eq!(client.whitelist().render(), server.whitelist().render());
}
