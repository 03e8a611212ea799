pub mod advisory;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use log::warn;
use uuid::Uuid;

use advisory::{AdvisoryProvider, AssetAdvice, AssetProfile};
use errors::CoreError;
use models::{
    holding::{Holding, PositionEntry},
    portfolio::Portfolio,
    summary::{PortfolioSummary, ProfitSharingResult},
};
use providers::registry::QuoteProviderRegistry;
use services::{
    analytics_service::AnalyticsService, merge_service::MergeService,
    profit_sharing_service::ProfitSharingService, sync_service::SyncService,
};
use storage::{local::LocalStore, remote::RemoteStore, remote::SessionContext};

/// Main entry point for the Invest Tracker core library.
///
/// Owns the in-memory holding set — the authoritative state — and the
/// services that operate on it. Persistence is pushed through explicit
/// store handles at call time; the engine never reaches into ambient
/// global state to decide where data lives.
#[must_use]
pub struct InvestTracker {
    portfolio: Portfolio,
    merge_service: MergeService,
    sync_service: SyncService,
    analytics_service: AnalyticsService,
    profit_sharing_service: ProfitSharingService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for InvestTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvestTracker")
            .field("holdings", &self.portfolio.holdings.len())
            .field("trash", &self.portfolio.trash.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl InvestTracker {
    /// Create a tracker with an empty holding set.
    pub fn create_new() -> Self {
        Self::build(Portfolio::default())
    }

    /// Create a tracker around an already-materialized holding set.
    pub fn from_portfolio(portfolio: Portfolio) -> Self {
        Self::build(portfolio)
    }

    /// Load the holding set from the local snapshot (empty if none saved).
    pub fn load_local(store: &LocalStore) -> Result<Self, CoreError> {
        let portfolio = store.load()?;
        Ok(Self::build(portfolio))
    }

    /// Create a tracker around `portfolio` with a caller-supplied feed
    /// registry instead of the default endpoints.
    pub fn with_registry(portfolio: Portfolio, registry: QuoteProviderRegistry) -> Self {
        Self {
            portfolio,
            merge_service: MergeService::new(),
            sync_service: SyncService::new(registry),
            analytics_service: AnalyticsService::new(),
            profit_sharing_service: ProfitSharingService::new(),
            dirty: false,
        }
    }

    // ── Position Entry & Merge ──────────────────────────────────────

    /// Record one manually entered purchase.
    ///
    /// Manual entry is validated before the merge engine sees it: empty
    /// code, non-positive price, or non-positive quantity reject the
    /// submission. Returns the id of the holding that was created or
    /// merged into.
    pub fn add_holding(&mut self, entry: PositionEntry) -> Result<Uuid, CoreError> {
        if entry.code.trim().is_empty() {
            return Err(CoreError::ValidationError("Code must not be empty".into()));
        }
        if entry.buy_price <= 0.0 {
            return Err(CoreError::ValidationError(
                "Buy price must be positive".into(),
            ));
        }
        if entry.quantity <= 0.0 {
            return Err(CoreError::ValidationError(
                "Quantity must be positive".into(),
            ));
        }

        let touched = self
            .merge_service
            .merge_entries(&mut self.portfolio.holdings, vec![entry]);
        self.dirty = true;
        Ok(touched[0])
    }

    /// Fold a batch of imported entries into the holding set.
    ///
    /// Only the merge engine's precondition is enforced here — every code
    /// must be non-empty; prices and quantities pass through as given.
    /// Rows for the same `(code, asset_type)` within one batch fold
    /// together sequentially. Returns the ids of all touched holdings.
    pub fn import_entries(&mut self, entries: Vec<PositionEntry>) -> Result<Vec<Uuid>, CoreError> {
        if let Some(bad) = entries.iter().find(|e| e.code.trim().is_empty()) {
            return Err(CoreError::ValidationError(format!(
                "Imported entry '{}' has an empty code",
                bad.name
            )));
        }

        let touched = self
            .merge_service
            .merge_entries(&mut self.portfolio.holdings, entries);
        if !touched.is_empty() {
            self.dirty = true;
        }
        Ok(touched)
    }

    /// The primary intake flow: merge the batch, then refresh quotes for
    /// the affected holdings only.
    pub async fn record_purchases(
        &mut self,
        entries: Vec<PositionEntry>,
    ) -> Result<Vec<Uuid>, CoreError> {
        let touched = self.import_entries(entries)?;
        self.sync_service
            .synchronize_selected(&mut self.portfolio.holdings, &touched)
            .await;
        Ok(touched)
    }

    // ── Price Refresh ───────────────────────────────────────────────

    /// Refresh quotes for the full holding set, sequentially, in order.
    ///
    /// Idempotent: re-running overwrites price fields with the latest
    /// fetched values (last write wins on the in-memory set). Individual
    /// fetch failures leave their holdings untouched.
    pub async fn refresh_prices(&mut self) {
        self.sync_service
            .synchronize(&mut self.portfolio.holdings)
            .await;
        if !self.portfolio.holdings.is_empty() {
            self.dirty = true;
        }
    }

    /// Refresh quotes for the given holding ids only.
    pub async fn refresh_holdings(&mut self, ids: &[Uuid]) {
        self.sync_service
            .synchronize_selected(&mut self.portfolio.holdings, ids)
            .await;
        if !ids.is_empty() {
            self.dirty = true;
        }
    }

    // ── Holdings ────────────────────────────────────────────────────

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.portfolio.holdings
    }

    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.portfolio.holdings.len()
    }

    #[must_use]
    pub fn get_holding(&self, id: Uuid) -> Option<&Holding> {
        self.portfolio.holdings.iter().find(|h| h.id == id)
    }

    /// Remove a holding, keeping it in the trash for potential undo.
    /// Returns the removed holding.
    pub fn remove_holding(&mut self, id: Uuid) -> Result<Holding, CoreError> {
        let idx = self
            .portfolio
            .holdings
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;

        let removed = self.portfolio.holdings.remove(idx);
        self.portfolio.trash.push(removed.clone());
        self.dirty = true;
        Ok(removed)
    }

    /// Restore the most recently trashed holding.
    ///
    /// Fails when a holding with the same `(code, asset_type)` has been
    /// created since removal — restoring would break identity uniqueness.
    /// Returns `Ok(None)` when the trash is empty.
    pub fn undo_last_removal(&mut self) -> Result<Option<Holding>, CoreError> {
        let holding = match self.portfolio.trash.pop() {
            Some(h) => h,
            None => return Ok(None),
        };

        if self
            .portfolio
            .holdings
            .iter()
            .any(|h| h.matches(&holding.code, holding.asset_type))
        {
            // Put it back so a later undo can still see it.
            let err = CoreError::ValidationError(format!(
                "A {} holding for {} already exists",
                holding.asset_type, holding.code
            ));
            self.portfolio.trash.push(holding);
            return Err(err);
        }

        self.portfolio.holdings.push(holding.clone());
        self.dirty = true;
        Ok(Some(holding))
    }

    /// Holdings currently in the trash.
    #[must_use]
    pub fn trash(&self) -> &[Holding] {
        &self.portfolio.trash
    }

    /// Discard all trashed holdings permanently.
    pub fn clear_trash(&mut self) {
        if !self.portfolio.trash.is_empty() {
            self.portfolio.trash.clear();
            self.dirty = true;
        }
    }

    // ── Derived Metrics ─────────────────────────────────────────────

    /// Portfolio-level cost, market value, lifetime and day P/L.
    #[must_use]
    pub fn summary(&self) -> PortfolioSummary {
        self.analytics_service.summarize(&self.portfolio.holdings)
    }

    /// Tiered management-fee share and loss-guarantee amount for the
    /// current state.
    #[must_use]
    pub fn profit_sharing(&self) -> ProfitSharingResult {
        let summary = self.summary();
        self.profit_sharing_service
            .calculate(summary.total_cost, summary.total_profit_loss)
    }

    // ── Advisory ────────────────────────────────────────────────────

    /// Ask the external advisory collaborator for alternative-asset
    /// suggestions, one profile per holding. Has no effect on state.
    pub async fn get_advice(
        &self,
        advisor: &dyn AdvisoryProvider,
    ) -> Result<Vec<AssetAdvice>, CoreError> {
        let profiles: Vec<AssetProfile> = self
            .portfolio
            .holdings
            .iter()
            .map(|h| AssetProfile {
                asset_type: h.asset_type,
                code: h.code.clone(),
                name: h.name.clone(),
                cost: h.buy_price,
                current_price: h.current_price,
            })
            .collect();

        advisor.advise(&profiles).await
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Save the holding set to the local snapshot.
    /// Clears the unsaved-changes flag on success.
    pub fn save_local(&mut self, store: &LocalStore) -> Result<(), CoreError> {
        store.save(&self.portfolio)?;
        self.dirty = false;
        Ok(())
    }

    /// After-mutation write-back: local save unconditional, remote save
    /// only when the session is authenticated. Both are best-effort —
    /// failures are logged and the in-memory state stays authoritative.
    pub async fn checkpoint(
        &mut self,
        local: &LocalStore,
        remote: Option<&dyn RemoteStore>,
        session: &SessionContext,
    ) {
        match local.save(&self.portfolio) {
            Ok(()) => self.dirty = false,
            Err(e) => warn!("local save failed: {e}"),
        }

        if let (Some(remote), Some(user_id)) = (remote, session.user_id()) {
            if let Err(e) = remote.save_for_user(user_id, &self.portfolio).await {
                warn!("remote replication failed for {user_id}: {e}");
            }
        }
    }

    /// Apply the sign-in policy: cloud state wins when it exists;
    /// otherwise the local state is uploaded as the initial remote
    /// document. Returns `true` when cloud data replaced the in-memory
    /// set.
    ///
    /// A transport error propagates — it must never be mistaken for
    /// "new user, no data yet", or local state would overwrite the cloud.
    pub async fn sign_in(
        &mut self,
        remote: &dyn RemoteStore,
        session: &SessionContext,
    ) -> Result<bool, CoreError> {
        let user_id = session
            .user_id()
            .ok_or_else(|| CoreError::ValidationError("Session is not authenticated".into()))?;

        match remote.load_for_user(user_id).await? {
            Some(portfolio) => {
                self.portfolio = portfolio;
                self.dirty = true;
                Ok(true)
            }
            None => {
                remote.save_for_user(user_id, &self.portfolio).await?;
                Ok(false)
            }
        }
    }

    /// Returns `true` if the holding set has been modified since the last
    /// save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export the holding set as a JSON string.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.portfolio.holdings)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize holdings: {e}")))
    }

    /// Import entries from a JSON array of purchase rows. Rows are merged
    /// through the engine, so re-importing an export folds quantities
    /// into existing positions instead of duplicating them.
    /// Returns the ids of all touched holdings.
    pub fn import_from_json(&mut self, json: &str) -> Result<Vec<Uuid>, CoreError> {
        let entries: Vec<PositionEntry> = serde_json::from_str(json)?;
        self.import_entries(entries)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(portfolio: Portfolio) -> Self {
        Self::with_registry(portfolio, QuoteProviderRegistry::new_with_defaults())
    }
}
