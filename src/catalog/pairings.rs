use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::planner::PairingTable;

/// Load the pairing table, falling back to the built-in one.
///
/// A missing, unreadable, malformed, or rule-less file is not an error.
pub fn load_pairings<P: AsRef<Path>>(path: P) -> PairingTable {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "pairing file unavailable; using defaults");
            return PairingTable::default();
        }
    };

    match PairingTable::from_json_str(&content) {
        Ok(table) if !table.is_empty() => {
            debug!(path = %path.display(), rules = table.len(), "loaded pairing table");
            table
        }
        Ok(_) => {
            warn!(path = %path.display(), "pairing file has no rules; using defaults");
            PairingTable::default()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid pairing file; using defaults");
            PairingTable::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;
    use tracing::Level;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` and return what it logged at WARN or above.
    fn warnings_from<T>(f: impl FnOnce() -> T) -> (T, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(Level::WARN)
            .with_ansi(false)
            .finish();

        let value = tracing::subscriber::with_default(subscriber, f);
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (value, output)
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"Tofu": ["rice", "noodles"]}"#).unwrap();

        let table = load_pairings(file.path());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rules()[0].lead, "tofu");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let table = load_pairings("/nonexistent/pairings.json");
        assert_eq!(table, PairingTable::default());
    }

    #[test]
    fn test_every_fallback_warns() {
        let (table, logs) = warnings_from(|| load_pairings("/nonexistent/pairings.json"));
        assert_eq!(table, PairingTable::default());
        assert!(logs.contains("WARN"), "missing file not logged: {logs:?}");
        assert!(logs.contains("pairing file unavailable"));

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let (_, logs) = warnings_from(|| load_pairings(file.path()));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("invalid pairing file"));
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();
        assert_eq!(load_pairings(file.path()), PairingTable::default());
    }

    #[test]
    fn test_empty_object_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();
        assert_eq!(load_pairings(file.path()), PairingTable::default());
    }
}
