use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::hand_history::ParsedHand;

use super::{HandId, HandStore, InMemoryHandStore, StoreError};

/// One line of the store file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredHand {
    pub id: HandId,
    pub hand: ParsedHand,
}

/// A store backed by a JSON Lines file, one hand per line.
///
/// Existing hands are loaded when the store is opened so duplicates are
/// detected across runs. Every insert appends one newline terminated line.
/// A write cut short leaves an unterminated last line; opening the store
/// drops it and the hand can simply be ingested again.
#[derive(Debug)]
pub struct JsonLinesHandStore {
    path: PathBuf,
    index: InMemoryHandStore,
}

impl JsonLinesHandStore {
    /// Open the store at `path`, creating parent directories as needed. A
    /// missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Any complete line that isn't a stored hand is an error. Only an
    /// unterminated last line is repaired.
    #[instrument(level = "debug", skip_all, fields(path = ?path.as_ref()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut index = InMemoryHandStore::new();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let mut offset = 0;
            for line in contents.split_inclusive('\n') {
                let terminated = line.ends_with('\n');
                if !line.trim().is_empty() {
                    match serde_json::from_str::<StoredHand>(line.trim()) {
                        Ok(stored) => {
                            index.insert_with_id(stored.id, stored.hand)?;
                        }
                        Err(e) if !terminated => {
                            warn!(?path, error = %e, "Dropping a partly written last line");
                            OpenOptions::new()
                                .write(true)
                                .open(&path)?
                                .set_len(offset as u64)?;
                            break;
                        }
                        Err(e) => return Err(e.into()),
                    }
                    if !terminated {
                        OpenOptions::new().append(true).open(&path)?.write_all(b"\n")?;
                    }
                }
                offset += line.len();
            }
        }
        debug!(?path, hands = index.len(), "Opened hand store");

        Ok(Self { path, index })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HandStore for JsonLinesHandStore {
    fn insert(&mut self, hand: &ParsedHand) -> Result<HandId, StoreError> {
        if self.index.contains(&hand.hand.hand_id) {
            return Err(StoreError::Duplicate {
                hand_id: hand.hand.hand_id.clone(),
            });
        }

        let stored = StoredHand {
            id: HandId::new(),
            hand: hand.clone(),
        };
        let mut line = serde_json::to_string(&stored)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;

        self.index.insert_with_id(stored.id, stored.hand)
    }

    fn contains(&self, hand_id: &str) -> bool {
        self.index.contains(hand_id)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn hands(&self) -> Vec<&ParsedHand> {
        self.index.hands()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::hand_history::{HandParser, SAMPLE_CASH_HAND, SAMPLE_TOURNAMENT_HAND};

    #[test]
    fn test_round_trip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("hands.jsonl");
        let parser = HandParser::new("hero");
        let cash = parser.parse(SAMPLE_CASH_HAND).unwrap();
        let tournament = parser.parse(SAMPLE_TOURNAMENT_HAND).unwrap();

        let (first, second) = {
            let mut store = JsonLinesHandStore::open(&path).unwrap();
            assert!(store.is_empty());
            (
                store.insert(&cash).unwrap(),
                store.insert(&tournament).unwrap(),
            )
        };

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(2, contents.lines().count());

        let mut reopened = JsonLinesHandStore::open(&path).unwrap();
        assert_eq!(2, reopened.len());
        let hands = reopened.hands();
        assert_eq!(&cash, hands[0]);
        assert_eq!(&tournament, hands[1]);
        assert_eq!(Some(first), reopened.index.get(&cash.hand.hand_id).map(|(id, _)| id));
        assert_eq!(
            Some(second),
            reopened.index.get(&tournament.hand.hand_id).map(|(id, _)| id)
        );

        assert!(reopened.insert(&cash).unwrap_err().is_duplicate());
        assert_eq!(2, std::fs::read_to_string(&path).unwrap().lines().count());
    }

    #[test]
    fn test_partly_written_last_line_is_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hands.jsonl");
        let parser = HandParser::new("hero");
        let cash = parser.parse(SAMPLE_CASH_HAND).unwrap();
        let tournament = parser.parse(SAMPLE_TOURNAMENT_HAND).unwrap();

        JsonLinesHandStore::open(&path).unwrap().insert(&cash).unwrap();
        let complete = std::fs::read_to_string(&path).unwrap();
        let torn = &complete[..complete.len() / 2];
        std::fs::write(&path, format!("{complete}{torn}")).unwrap();

        let mut store = JsonLinesHandStore::open(&path).unwrap();
        assert_eq!(1, store.len());
        assert_eq!(complete, std::fs::read_to_string(&path).unwrap());

        store.insert(&tournament).unwrap();
        assert_eq!(2, JsonLinesHandStore::open(&path).unwrap().len());
    }

    #[test]
    fn test_unterminated_last_line_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hands.jsonl");
        let parser = HandParser::new("hero");
        let cash = parser.parse(SAMPLE_CASH_HAND).unwrap();
        let tournament = parser.parse(SAMPLE_TOURNAMENT_HAND).unwrap();

        JsonLinesHandStore::open(&path).unwrap().insert(&cash).unwrap();
        let complete = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, complete.trim_end()).unwrap();

        let mut store = JsonLinesHandStore::open(&path).unwrap();
        assert_eq!(1, store.len());
        store.insert(&tournament).unwrap();
        assert_eq!(2, JsonLinesHandStore::open(&path).unwrap().len());
    }

    #[test]
    fn test_corrupt_line_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hands.jsonl");
        std::fs::write(&path, "{not json}\n").unwrap();
        assert!(matches!(
            JsonLinesHandStore::open(&path),
            Err(StoreError::Json(_))
        ));
    }
}
