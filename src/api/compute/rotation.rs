//
//  titan-cli
//  api/compute/rotation.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Snapshot Rotation
//!
//! Servers hold a fixed number of snapshots. When a create is refused with
//! [`SNAPSHOT_LIMIT_EXCEEDED`], rotation evicts the oldest snapshot and
//! retries the create once.
//!
//! ## Sequence
//!
//! ```text
//! create ──ok──────────────────────────────────────────────▶ done
//!   │
//!   └─limit exceeded─▶ [eviction allowed?] ─no─▶ original error
//!                              │ yes
//!                              ▼
//!                     list ─▶ oldest ─▶ delete ─▶ create (once) ─▶ done / error
//! ```
//!
//! - Eviction is opt-in: [`Eviction::Forced`], or [`Eviction::Ask`] with the
//!   operator answering yes.
//! - An empty list after a limit-exceeded answer is an inconsistency and
//!   aborts before any deletion.
//! - A failed delete aborts; the retry is only issued once the delete
//!   response has been received.
//! - The retry's result is final, whatever it is.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::client::TitanClient;
use crate::api::common::{
    ActionResult, ApiError, ApiGeneration, ResourceId, SNAPSHOT_LIMIT_EXCEEDED,
};

use super::Snapshot;

/// The three snapshot operations rotation needs.
///
/// Implemented by [`TitanClient`]; tests provide scripted fakes.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn create(&self, server: &ResourceId, name: Option<&str>) -> Result<Snapshot, ApiError>;

    async fn list(&self, server: &ResourceId) -> Result<Vec<Snapshot>, ApiError>;

    async fn delete(&self, server: &ResourceId, snapshot: &str) -> Result<ActionResult, ApiError>;
}

#[async_trait]
impl SnapshotStore for TitanClient {
    async fn create(&self, server: &ResourceId, name: Option<&str>) -> Result<Snapshot, ApiError> {
        self.create_snapshot(server, name).await
    }

    async fn list(&self, server: &ResourceId) -> Result<Vec<Snapshot>, ApiError> {
        self.list_snapshots(server).await
    }

    async fn delete(&self, server: &ResourceId, snapshot: &str) -> Result<ActionResult, ApiError> {
        self.delete_snapshot(server, snapshot).await
    }
}

/// Whether rotation may delete a snapshot to make room.
pub enum Eviction<'a> {
    /// Never evict; a limit-exceeded error is returned unchanged.
    Disabled,
    /// Evict the oldest snapshot without asking.
    Forced,
    /// Ask before evicting. `Ok(false)` cancels the whole operation.
    Ask(&'a (dyn Fn(&Snapshot) -> Result<bool, ApiError> + Send + Sync)),
}

/// What a successful rotation did.
#[derive(Debug, Clone)]
pub struct RotationOutcome {
    pub created: Snapshot,
    /// The snapshot deleted to make room, if any.
    pub evicted: Option<Snapshot>,
}

/// Returns the snapshot with the smallest creation time.
///
/// Linear scan, first-seen wins on equal timestamps. Snapshots without a
/// usable timestamp sort after every dated one.
pub fn oldest(snapshots: &[Snapshot]) -> Option<&Snapshot> {
    let age_key = |s: &Snapshot| s.created_at.seconds().unwrap_or(i64::MAX);

    let mut iter = snapshots.iter();
    let mut best = iter.next()?;
    for candidate in iter {
        if age_key(candidate) < age_key(best) {
            best = candidate;
        }
    }
    Some(best)
}

/// Creates a snapshot, evicting the oldest one if the quota is reached.
///
/// # Errors
///
/// - The create error, unchanged, if it is not a limit-exceeded error or if
///   eviction is [`Eviction::Disabled`]
/// - [`ApiError::Cancelled`] if the operator declines
/// - [`ApiError::Inconsistent`] if the list is empty or the oldest snapshot
///   has no identifier in the server's scheme
/// - Any list, delete or retry error, unchanged
pub async fn create_with_rotation<S: SnapshotStore + ?Sized>(
    store: &S,
    server: &ResourceId,
    name: Option<&str>,
    eviction: Eviction<'_>,
) -> Result<RotationOutcome, ApiError> {
    debug!(server = %server, "creating snapshot");
    let err = match store.create(server, name).await {
        Ok(created) => {
            return Ok(RotationOutcome {
                created,
                evicted: None,
            })
        }
        Err(err) => err,
    };

    if !err.is_api_error(SNAPSHOT_LIMIT_EXCEEDED) {
        return Err(err);
    }
    info!(server = %server, "snapshot limit reached");

    if matches!(eviction, Eviction::Disabled) {
        return Err(err);
    }

    let snapshots = store.list(server).await?;
    let victim = oldest(&snapshots).cloned().ok_or_else(|| {
        ApiError::Inconsistent(format!(
            "snapshot limit reached but server {} has no snapshots",
            server
        ))
    })?;

    let generation = server.generation();
    let victim_id = victim
        .id_for(generation)
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::Inconsistent(format!(
                "snapshot {:?} has no {} identifier",
                victim.name,
                match generation {
                    ApiGeneration::Current => "OID",
                    ApiGeneration::Legacy => "UUID",
                }
            ))
        })?;

    if let Eviction::Ask(confirm) = eviction {
        if !confirm(&victim)? {
            return Err(ApiError::Cancelled);
        }
    }

    info!(server = %server, snapshot = %victim_id, "deleting oldest snapshot");
    store.delete(server, &victim_id).await?;

    debug!(server = %server, "retrying snapshot creation");
    let created = store.create(server, name).await?;

    Ok(RotationOutcome {
        created,
        evicted: Some(victim),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::api::client::ClientConfig;
    use crate::api::common::{ApiReturn, ErrorKind};

    fn snapshot(oid: &str, created_at: i64) -> Snapshot {
        serde_json::from_value(serde_json::json!({
            "oid": oid,
            "uuid": format!("uuid-{oid}"),
            "name": oid,
            "created_at": created_at,
        }))
        .unwrap()
    }

    fn limit_error() -> ApiError {
        ApiError::Api(ApiReturn {
            error: Some(SNAPSHOT_LIMIT_EXCEEDED.to_string()),
            message: Some("Snapshot limit reached".to_string()),
            ..Default::default()
        })
    }

    /// Scripted store recording every call.
    #[derive(Default)]
    struct FakeStore {
        creates: Mutex<VecDeque<Result<Snapshot, ApiError>>>,
        listing: Mutex<Option<Result<Vec<Snapshot>, ApiError>>>,
        delete_result: Mutex<Option<Result<ActionResult, ApiError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SnapshotStore for FakeStore {
        async fn create(&self, _server: &ResourceId, _name: Option<&str>) -> Result<Snapshot, ApiError> {
            self.calls.lock().unwrap().push("create".to_string());
            self.creates
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(limit_error()))
        }

        async fn list(&self, _server: &ResourceId) -> Result<Vec<Snapshot>, ApiError> {
            self.calls.lock().unwrap().push("list".to_string());
            self.listing.lock().unwrap().take().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn delete(&self, _server: &ResourceId, snapshot: &str) -> Result<ActionResult, ApiError> {
            self.calls.lock().unwrap().push(format!("delete:{snapshot}"));
            self.delete_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(ActionResult::default()))
        }
    }

    fn oid(id: &str) -> ResourceId {
        ResourceId::Oid(id.to_string())
    }

    #[test]
    fn test_oldest_picks_minimum() {
        let list = vec![snapshot("s1", 1000), snapshot("s2", 500)];
        assert_eq!(oldest(&list).unwrap().id(), "s2");
    }

    #[test]
    fn test_oldest_tie_keeps_first_seen() {
        let list = vec![snapshot("a", 300), snapshot("b", 100), snapshot("c", 100)];
        assert_eq!(oldest(&list).unwrap().id(), "b");
    }

    #[test]
    fn test_oldest_prefers_dated_snapshots() {
        let list = vec![snapshot("undated", 0), snapshot("dated", 42)];
        assert_eq!(oldest(&list).unwrap().id(), "dated");
        assert!(oldest(&[]).is_none());
    }

    #[tokio::test]
    async fn test_success_without_rotation() {
        let store = FakeStore::default();
        store.creates.lock().unwrap().push_back(Ok(snapshot("new", 2000)));

        let outcome = create_with_rotation(&store, &oid("srv"), Some("n"), Eviction::Forced)
            .await
            .unwrap();
        assert_eq!(outcome.created.id(), "new");
        assert!(outcome.evicted.is_none());
        assert_eq!(store.calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn test_limit_without_force_returns_original_error() {
        let store = FakeStore::default();
        let err = create_with_rotation(&store, &oid("srv"), None, Eviction::Disabled)
            .await
            .unwrap_err();
        assert!(err.is_api_error(SNAPSHOT_LIMIT_EXCEEDED));
        assert_eq!(store.calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_rotated() {
        let store = FakeStore::default();
        store
            .creates
            .lock()
            .unwrap()
            .push_back(Err(ApiError::precondition("bad")));
        let err = create_with_rotation(&store, &oid("srv"), None, Eviction::Forced)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(store.calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn test_rotation_deletes_oldest_then_retries() {
        let store = FakeStore::default();
        store.creates.lock().unwrap().push_back(Err(limit_error()));
        store.creates.lock().unwrap().push_back(Ok(snapshot("new", 3000)));
        *store.listing.lock().unwrap() = Some(Ok(vec![snapshot("s1", 1000), snapshot("s2", 500)]));

        let outcome = create_with_rotation(&store, &oid("srv"), None, Eviction::Forced)
            .await
            .unwrap();
        assert_eq!(outcome.created.id(), "new");
        assert_eq!(outcome.evicted.unwrap().id(), "s2");
        assert_eq!(store.calls(), vec!["create", "list", "delete:s2", "create"]);
    }

    #[tokio::test]
    async fn test_legacy_rotation_deletes_by_uuid() {
        let store = FakeStore::default();
        store.creates.lock().unwrap().push_back(Err(limit_error()));
        store.creates.lock().unwrap().push_back(Ok(snapshot("new", 3000)));
        *store.listing.lock().unwrap() = Some(Ok(vec![snapshot("s1", 10)]));

        create_with_rotation(&store, &ResourceId::Uuid("u".to_string()), None, Eviction::Forced)
            .await
            .unwrap();
        assert_eq!(store.calls(), vec!["create", "list", "delete:uuid-s1", "create"]);
    }

    #[tokio::test]
    async fn test_persistent_limit_stops_after_one_retry() {
        // Every create answers limit exceeded.
        let store = FakeStore::default();
        *store.listing.lock().unwrap() = Some(Ok(vec![snapshot("s1", 1)]));

        let err = create_with_rotation(&store, &oid("srv"), None, Eviction::Forced)
            .await
            .unwrap_err();
        assert!(err.is_api_error(SNAPSHOT_LIMIT_EXCEEDED));
        assert_eq!(store.calls(), vec!["create", "list", "delete:s1", "create"]);
    }

    #[tokio::test]
    async fn test_empty_list_is_inconsistent() {
        let store = FakeStore::default();
        let err = create_with_rotation(&store, &oid("srv"), None, Eviction::Forced)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Inconsistent(_)));
        assert_eq!(store.calls(), vec!["create", "list"]);
    }

    #[tokio::test]
    async fn test_delete_failure_skips_retry() {
        let store = FakeStore::default();
        *store.listing.lock().unwrap() = Some(Ok(vec![snapshot("s1", 1)]));
        *store.delete_result.lock().unwrap() = Some(Err(limit_error_other()));

        let err = create_with_rotation(&store, &oid("srv"), None, Eviction::Forced)
            .await
            .unwrap_err();
        assert!(err.is_api_error("ERROR_SNAPSHOT_BUSY"));
        assert_eq!(store.calls(), vec!["create", "list", "delete:s1"]);
    }

    fn limit_error_other() -> ApiError {
        ApiError::Api(ApiReturn {
            error: Some("ERROR_SNAPSHOT_BUSY".to_string()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_declined_confirmation_mutates_nothing() {
        let store = FakeStore::default();
        *store.listing.lock().unwrap() = Some(Ok(vec![snapshot("s1", 1)]));
        let decline = |_: &Snapshot| -> Result<bool, ApiError> { Ok(false) };

        let err = create_with_rotation(&store, &oid("srv"), None, Eviction::Ask(&decline))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Cancelled));
        assert_eq!(store.calls(), vec!["create", "list"]);
    }

    #[tokio::test]
    async fn test_accepted_confirmation_rotates() {
        let store = FakeStore::default();
        store.creates.lock().unwrap().push_back(Err(limit_error()));
        store.creates.lock().unwrap().push_back(Ok(snapshot("new", 9)));
        *store.listing.lock().unwrap() = Some(Ok(vec![snapshot("s1", 1)]));
        let accept = |s: &Snapshot| -> Result<bool, ApiError> { Ok(s.id() == "s1") };

        let outcome = create_with_rotation(&store, &oid("srv"), None, Eviction::Ask(&accept))
            .await
            .unwrap();
        assert_eq!(outcome.evicted.unwrap().id(), "s1");
    }

    #[tokio::test]
    async fn test_rotation_over_http() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/v2/compute/servers/srv-123/snapshots")
            .with_body(format!(r#"{{"error":"{SNAPSHOT_LIMIT_EXCEEDED}","message":"quota"}}"#))
            .expect(2)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/v2/compute/servers/srv-123/snapshots")
            .with_body(r#"[{"oid":"s1","created_at":1000},{"oid":"s2","created_at":"500"}]"#)
            .expect(1)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/v2/compute/servers/srv-123/snapshots/s2")
            .with_body(r#"{"success":"deleted"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = TitanClient::new(ClientConfig::new(server.url(), "t")).unwrap();
        let err = create_with_rotation(&client, &oid("srv-123"), None, Eviction::Forced)
            .await
            .unwrap_err();

        assert!(err.is_api_error(SNAPSHOT_LIMIT_EXCEEDED));
        create.assert_async().await;
        list.assert_async().await;
        delete.assert_async().await;
    }
}
