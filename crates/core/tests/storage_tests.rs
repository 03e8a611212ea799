// ═══════════════════════════════════════════════════════════════════
// Storage Tests — IVTK snapshot format, LocalStore round-trips,
// RemoteStore port semantics
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

use invest_tracker_core::errors::CoreError;
use invest_tracker_core::models::holding::{Holding, PositionEntry};
use invest_tracker_core::models::portfolio::Portfolio;
use invest_tracker_core::storage::format;
use invest_tracker_core::storage::local::{LocalStore, STORAGE_NAMESPACE};
use invest_tracker_core::storage::remote::RemoteStore;

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_portfolio() -> Portfolio {
    let mut holding = Holding::from_entry(PositionEntry::stock(
        "600519",
        "贵州茅台",
        make_date(2025, 1, 10),
        1600.0,
        10.0,
    ));
    holding.current_price = 1700.0;
    holding.yesterday_price = Some(1688.0);
    holding.price_date = Some("2025-01-15 15:00:03".into());

    Portfolio {
        holdings: vec![holding],
        trash: Vec::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Snapshot format
// ═══════════════════════════════════════════════════════════════════

mod snapshot_format {
    use super::*;

    #[test]
    fn payload_round_trips() {
        let payload = b"arbitrary bytes";
        let bytes = format::write_snapshot(format::CURRENT_VERSION, payload);
        let parsed = format::read_snapshot(&bytes).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn empty_payload_round_trips() {
        let bytes = format::write_snapshot(format::CURRENT_VERSION, &[]);
        assert_eq!(format::read_snapshot(&bytes).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut bytes = format::write_snapshot(format::CURRENT_VERSION, b"data");
        bytes[0] = b'X';
        match format::read_snapshot(&bytes) {
            Err(CoreError::InvalidFileFormat(_)) => {}
            other => panic!("Expected InvalidFileFormat, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn future_version_is_rejected() {
        let bytes = format::write_snapshot(format::CURRENT_VERSION + 1, b"data");
        match format::read_snapshot(&bytes) {
            Err(CoreError::UnsupportedVersion(v)) => {
                assert_eq!(v, format::CURRENT_VERSION + 1)
            }
            other => panic!("Expected UnsupportedVersion, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let bytes = format::write_snapshot(format::CURRENT_VERSION, b"0123456789");
        let truncated = &bytes[..bytes.len() - 4];
        assert!(matches!(
            format::read_snapshot(truncated),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn tiny_file_is_rejected() {
        assert!(matches!(
            format::read_snapshot(&[0xDE, 0xAD]),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// LocalStore
// ═══════════════════════════════════════════════════════════════════

mod local_store {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let portfolio = sample_portfolio();
        store.save(&portfolio).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.holdings.len(), 1);
        let h = &loaded.holdings[0];
        assert_eq!(h.code, "600519");
        assert_eq!(h.name, "贵州茅台");
        assert_eq!(h.buy_price, 1600.0);
        assert_eq!(h.current_price, 1700.0);
        assert_eq!(h.yesterday_price, Some(1688.0));
        assert_eq!(h.price_date.as_deref(), Some("2025-01-15 15:00:03"));
    }

    #[test]
    fn missing_file_loads_as_empty_portfolio() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let loaded = store.load().unwrap();
        assert!(loaded.holdings.is_empty());
        assert!(loaded.trash.is_empty());
    }

    #[test]
    fn file_name_uses_the_fixed_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let file_name = store.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(file_name, format!("{STORAGE_NAMESPACE}.bin"));
    }

    #[test]
    fn save_overwrites_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store.save(&sample_portfolio()).unwrap();
        store.save(&Portfolio::default()).unwrap();

        assert!(store.load().unwrap().holdings.is_empty());
    }

    #[test]
    fn corrupted_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        std::fs::write(store.path(), b"not a snapshot").unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn trash_is_part_of_the_persisted_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let mut portfolio = sample_portfolio();
        let removed = portfolio.holdings.remove(0);
        portfolio.trash.push(removed);
        store.save(&portfolio).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.holdings.is_empty());
        assert_eq!(loaded.trash.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
// RemoteStore port semantics
// ═══════════════════════════════════════════════════════════════════

/// In-memory remote store with a switchable transport failure.
struct MockRemoteStore {
    documents: Mutex<HashMap<String, Portfolio>>,
    failing: bool,
}

impl MockRemoteStore {
    fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            failing: false,
        }
    }

    fn failing() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            failing: true,
        }
    }

    fn insert(&self, user_id: &str, portfolio: Portfolio) {
        self.documents
            .lock()
            .unwrap()
            .insert(user_id.to_string(), portfolio);
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn load_for_user(&self, user_id: &str) -> Result<Option<Portfolio>, CoreError> {
        if self.failing {
            return Err(CoreError::RemoteUnavailable("simulated outage".into()));
        }
        Ok(self.documents.lock().unwrap().get(user_id).cloned())
    }

    async fn save_for_user(&self, user_id: &str, portfolio: &Portfolio) -> Result<(), CoreError> {
        if self.failing {
            return Err(CoreError::RemoteUnavailable("simulated outage".into()));
        }
        self.insert(user_id, portfolio.clone());
        Ok(())
    }
}

mod remote_store {
    use super::*;

    #[tokio::test]
    async fn absent_document_is_none_not_an_error() {
        let store = MockRemoteStore::new();
        let result = store.load_for_user("new-user").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn transport_failure_is_an_error_not_absence() {
        let store = MockRemoteStore::failing();
        let result = store.load_for_user("existing-user").await;
        assert!(matches!(result, Err(CoreError::RemoteUnavailable(_))));
    }

    #[tokio::test]
    async fn saved_document_round_trips() {
        let store = MockRemoteStore::new();
        store
            .save_for_user("user-1", &sample_portfolio())
            .await
            .unwrap();

        let loaded = store.load_for_user("user-1").await.unwrap().unwrap();
        assert_eq!(loaded.holdings.len(), 1);
        assert_eq!(loaded.holdings[0].code, "600519");
    }
}
