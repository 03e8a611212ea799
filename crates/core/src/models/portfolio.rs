use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// The full holding set — the unit of persistence. Individual holdings are
/// not addressable in storage; the whole set is saved and loaded together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    /// All currently owned positions, unique by `(code, asset_type)`
    pub holdings: Vec<Holding>,

    /// Holdings that have been removed but can be restored (undo support)
    #[serde(default)]
    pub trash: Vec<Holding>,
}
