use chillcheck_core::models::{FridgeItem, HistoryAction, HistoryEntry};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// History keeps at most this many entries, newest first
pub const HISTORY_CAP: usize = 100;

const RECORDS_SLOT: &str = "records.json";
const HISTORY_SLOT: &str = "history.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not find data directory")]
    NoDataDir,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The whole "database": two JSON files, each rewritten in full on every
/// mutation. No in-memory cache, no locking, no transactions. Two CLI
/// invocations racing each other end in last-save-wins, and a crash between a
/// record save and its history append leaves the two slots out of step. Both
/// are accepted limitations for a local single-user tool.
///
/// Constructed with an explicit directory so callers own the wiring - there is
/// deliberately no shared global instance.
pub struct FridgeStore {
    data_dir: PathBuf,
}

impl FridgeStore {
    /// Store rooted at an explicit directory (tests point this at a temp dir)
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Store rooted at the platform data directory: XDG data dir on Unix-like
    /// systems, AppData on Windows
    pub fn open_default() -> crate::Result<Self> {
        let data_dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?.join("chillcheck");
        Ok(Self::new(data_dir))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the full record list. A missing slot or one that fails to parse
    /// yields an empty list - the parse failure is logged and swallowed, so a
    /// corrupt slot reads as a fresh start. Flagged as a known weakness; kept
    /// because the original behaves this way.
    pub fn load_records(&self) -> Vec<FridgeItem> {
        self.load_slot(RECORDS_SLOT)
    }

    /// Overwrite the record slot with the given list
    pub fn save_records(&self, items: &[FridgeItem]) -> crate::Result<()> {
        self.save_slot(RECORDS_SLOT, items)
    }

    /// Load the full history, newest first. Same failure policy as
    /// `load_records`.
    pub fn load_history(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self.load_slot(HISTORY_SLOT);
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    /// Overwrite the history slot with the given entries
    pub fn save_history(&self, entries: &[HistoryEntry]) -> crate::Result<()> {
        self.save_slot(HISTORY_SLOT, entries)
    }

    /// Record an action against an item: prepend a fresh snapshot entry and
    /// drop anything past the cap. Not atomic with the record mutation it
    /// accompanies.
    pub fn append_history(&self, item: &FridgeItem, action: HistoryAction) -> crate::Result<()> {
        self.append_entry(HistoryEntry::new(item, action))
    }

    /// Prepend an already-built entry. Exposed so tests can pin timestamps.
    pub fn append_entry(&self, entry: HistoryEntry) -> crate::Result<()> {
        let mut entries = self.load_history();
        entries.insert(0, entry);
        entries.truncate(HISTORY_CAP);
        self.save_history(&entries)
    }

    /// Destructive reset of the history slot
    pub fn clear_history(&self) -> crate::Result<()> {
        self.save_history(&[])
    }

    /// Delete every record, leaving a Removed history entry per item so the
    /// history still tells the story afterwards. Returns how many were
    /// deleted.
    pub fn delete_all_records(&self) -> crate::Result<usize> {
        let items = self.load_records();
        self.save_records(&[])?;
        for item in &items {
            self.append_history(item, HistoryAction::Removed)?;
        }
        Ok(items.len())
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.data_dir.join(slot)
    }

    fn load_slot<T: serde::de::DeserializeOwned>(&self, slot: &str) -> Vec<T> {
        let path = self.slot_path(slot);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => {
                debug!("No data at {}, starting empty", path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(items) => items,
            Err(e) => {
                warn!("Failed to parse {}: {} - treating as empty", path.display(), e);
                Vec::new()
            }
        }
    }

    fn save_slot<T: serde::Serialize>(&self, slot: &str, items: &[T]) -> crate::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        let contents = serde_json::to_string_pretty(items)?;
        std::fs::write(self.slot_path(slot), contents)?;
        Ok(())
    }
}
