//! Persisted last-warned timestamps.
//!
//! The marker file is a flat JSON object mapping a warning type to the Unix
//! time (seconds, fractional allowed) it was last emitted. Reads fail open:
//! a missing, unreadable or malformed file is an empty record. Writes
//! replace the whole file and keep keys this process does not know about.

use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Warning types tracked in the marker file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Rewards go to an address other than the master's.
    RewardsRecipient,
    /// Master balance below the top-up threshold.
    LowBalance,
}

impl WarningKind {
    /// Key used in the marker file.
    pub fn key(self) -> &'static str {
        match self {
            WarningKind::RewardsRecipient => "rewards_warning",
            WarningKind::LowBalance => "balance_warning",
        }
    }
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// In-memory copy of the marker file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerRecord {
    entries: Map<String, Value>,
}

impl MarkerRecord {
    /// Load the record at `path`, treating any failure as an empty record.
    pub fn load(path: &Path) -> Self {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Marker file unreadable, treating as empty");
                return Self::default();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(Value::Object(entries)) => Self { entries },
            Ok(_) => {
                tracing::debug!(path = %path.display(), "Marker file is not a JSON object, treating as empty");
                Self::default()
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Marker file corrupt, treating as empty");
                Self::default()
            }
        }
    }

    /// Overwrite the file at `path` with this record.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.entries)?;
        writer.flush()
    }

    /// Last time `kind` was emitted, if recorded as a number.
    pub fn last_warned(&self, kind: WarningKind) -> Option<f64> {
        self.entries.get(kind.key()).and_then(Value::as_f64)
    }

    /// Whether `kind` is due at `now`: never emitted, or emitted more than
    /// `cooldown_secs` ago. Non-numeric entries count as never emitted.
    pub fn is_due(&self, kind: WarningKind, now: f64, cooldown_secs: u64) -> bool {
        match self.last_warned(kind) {
            Some(last) => now - last > cooldown_secs as f64,
            None => true,
        }
    }

    /// Record that `kind` was emitted at `now`.
    pub fn mark(&mut self, kind: WarningKind, now: f64) {
        let value = Number::from_f64(now)
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(now as u64));
        self.entries.insert(kind.key().to_string(), value);
    }

    /// Number of keys in the record, including unknown ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.0;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let record = MarkerRecord::load(&dir.path().join("marker"));
        assert!(record.is_empty());
        assert!(record.is_due(WarningKind::RewardsRecipient, NOW, 600));
        assert!(record.is_due(WarningKind::LowBalance, NOW, 600));
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marker");

        for garbage in ["{not json", "", "[1, 2, 3]", "42"] {
            std::fs::write(&path, garbage).unwrap();
            let record = MarkerRecord::load(&path);
            assert!(record.is_empty(), "content {:?} should load as empty", garbage);
        }
    }

    #[test]
    fn test_cooldown_window() {
        let mut record = MarkerRecord::default();
        record.mark(WarningKind::RewardsRecipient, NOW - 300.0);
        assert!(!record.is_due(WarningKind::RewardsRecipient, NOW, 600));

        record.mark(WarningKind::RewardsRecipient, NOW - 700.0);
        assert!(record.is_due(WarningKind::RewardsRecipient, NOW, 600));

        // Exactly at the boundary the warning is still suppressed.
        record.mark(WarningKind::RewardsRecipient, NOW - 600.0);
        assert!(!record.is_due(WarningKind::RewardsRecipient, NOW, 600));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut record = MarkerRecord::default();
        record.mark(WarningKind::RewardsRecipient, NOW);
        assert!(!record.is_due(WarningKind::RewardsRecipient, NOW, 600));
        assert!(record.is_due(WarningKind::LowBalance, NOW, 600));
    }

    #[test]
    fn test_non_numeric_entry_is_due() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marker");
        std::fs::write(&path, r#"{"balance_warning": "yesterday"}"#).unwrap();

        let record = MarkerRecord::load(&path);
        assert_eq!(record.last_warned(WarningKind::LowBalance), None);
        assert!(record.is_due(WarningKind::LowBalance, NOW, 600));
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marker");
        std::fs::write(&path, r#"{"future_warning": 12.5, "rewards_warning": 1}"#).unwrap();

        let mut record = MarkerRecord::load(&path);
        record.mark(WarningKind::LowBalance, NOW);
        record.save(&path).unwrap();

        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["future_warning"], 12.5);
        assert_eq!(on_disk["rewards_warning"], 1);
        assert_eq!(on_disk["balance_warning"], NOW);
    }

    #[test]
    fn test_save_overwrites_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marker");
        std::fs::write(&path, "garbage that is much longer than the new content").unwrap();

        let mut record = MarkerRecord::load(&path);
        record.mark(WarningKind::RewardsRecipient, NOW);
        record.save(&path).unwrap();

        let reloaded = MarkerRecord::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.last_warned(WarningKind::RewardsRecipient), Some(NOW));
    }
}
