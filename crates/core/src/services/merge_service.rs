use uuid::Uuid;

use crate::models::holding::{Holding, PositionEntry};

/// Reconciles incoming purchase entries against the holding set.
///
/// Pure in-memory transformation — no I/O, no validation. Callers
/// guarantee `code` is non-empty before invoking; zero or negative
/// numbers pass through as given.
pub struct MergeService;

impl MergeService {
    pub fn new() -> Self {
        Self
    }

    /// Fold a batch of entries into `holdings`, returning the ids of every
    /// holding that was created or updated (deduplicated).
    ///
    /// Processing is strictly sequential over the batch: each entry is
    /// matched against the running accumulator, so two rows for the same
    /// `(code, asset_type)` within one batch fold together exactly as if
    /// they had arrived in separate calls.
    pub fn merge_entries(
        &self,
        holdings: &mut Vec<Holding>,
        entries: Vec<PositionEntry>,
    ) -> Vec<Uuid> {
        let mut touched = Vec::new();

        for entry in entries {
            match holdings
                .iter()
                .position(|h| h.matches(&entry.code, entry.asset_type))
            {
                Some(idx) => {
                    let existing = &mut holdings[idx];
                    Self::fold_into(existing, &entry);
                    if !touched.contains(&existing.id) {
                        touched.push(existing.id);
                    }
                }
                None => {
                    let holding = Holding::from_entry(entry);
                    touched.push(holding.id);
                    holdings.push(holding);
                }
            }
        }

        touched
    }

    /// Weighted-average accounting: the combined position keeps the
    /// existing record's identity and quote data; only quantity and cost
    /// basis change. A combined quantity of 0 defines the cost basis as 0.
    fn fold_into(existing: &mut Holding, entry: &PositionEntry) {
        let combined = existing.quantity + entry.quantity;
        existing.buy_price = if combined == 0.0 {
            0.0
        } else {
            (existing.buy_price * existing.quantity + entry.buy_price * entry.quantity) / combined
        };
        existing.quantity = combined;
    }
}

impl Default for MergeService {
    fn default() -> Self {
        Self::new()
    }
}
