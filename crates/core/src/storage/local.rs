use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

use super::format;

/// Fixed namespace key for the on-disk snapshot. All local state lives
/// under this one name; holdings are never individually addressable.
pub const STORAGE_NAMESPACE: &str = "invest-tracker.holdings";

/// Local, synchronous, offline-capable persistence.
///
/// Flow: Portfolio → bincode → IVTK snapshot bytes → file. A missing
/// file is a legitimate state (nothing saved yet) and loads as an empty
/// portfolio.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store rooted at `dir`; the file name comes from the fixed namespace.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_NAMESPACE}.bin")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the full holding set and write it to disk.
    pub fn save(&self, portfolio: &Portfolio) -> Result<(), CoreError> {
        let payload = bincode::serialize(portfolio)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))?;
        let bytes = format::write_snapshot(format::CURRENT_VERSION, &payload);
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }

    /// Load the holding set, or an empty portfolio when nothing has been
    /// saved under the namespace yet.
    pub fn load(&self) -> Result<Portfolio, CoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Portfolio::default())
            }
            Err(e) => return Err(e.into()),
        };

        let payload = format::read_snapshot(&bytes)?;
        let portfolio: Portfolio = bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize portfolio: {e}")))?;
        Ok(portfolio)
    }
}
