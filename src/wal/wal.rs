use crate::core::error::StoreError;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Log record for the key/value store
///
/// Values are hex-encoded on disk so they may contain any character,
/// including the `|` separator and newlines.
#[derive(Debug, Clone, PartialEq)]
pub enum WalOperation {
    Set { key: String, value: String },
    Remove { key: String },
    Clear,
}

impl WalOperation {
    fn to_line(&self) -> String {
        match self {
            WalOperation::Set { key, value } => {
                format!("SET|{}|{}", key, hex::encode(value.as_bytes()))
            }
            WalOperation::Remove { key } => format!("REMOVE|{}", key),
            WalOperation::Clear => "CLEAR".to_string(),
        }
    }

    fn from_line(line: &str) -> Result<Self, StoreError> {
        let parts: Vec<&str> = line.split('|').collect();

        match parts.first() {
            Some(&"SET") => {
                if parts.len() != 3 {
                    return Err(StoreError::InvalidRecord("Invalid SET format".to_string()));
                }
                let bytes = hex::decode(parts[2])
                    .map_err(|e| StoreError::InvalidRecord(format!("Invalid value hex: {}", e)))?;
                let value = String::from_utf8(bytes)
                    .map_err(|e| StoreError::InvalidRecord(format!("Value is not UTF-8: {}", e)))?;

                Ok(WalOperation::Set {
                    key: parts[1].to_string(),
                    value,
                })
            }
            Some(&"REMOVE") => {
                if parts.len() != 2 {
                    return Err(StoreError::InvalidRecord("Invalid REMOVE format".to_string()));
                }
                Ok(WalOperation::Remove {
                    key: parts[1].to_string(),
                })
            }
            Some(&"CLEAR") if parts.len() == 1 => Ok(WalOperation::Clear),
            _ => Err(StoreError::InvalidRecord("Unknown operation type".to_string())),
        }
    }
}

/// Append-only log backing the durable store
pub struct Wal {
    file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl Wal {
    pub fn new(path: PathBuf) -> Result<Self, StoreError> {
        let file = open_append(&path)?;

        Ok(Wal {
            file: Arc::new(Mutex::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_operation(&self, op: &WalOperation) -> Result<(), StoreError> {
        let line = op.to_line();
        let mut file = self.file.lock().map_err(|_| StoreError::Poisoned)?;
        writeln!(file, "{}", line).map_err(StoreError::Write)?;
        file.flush().map_err(StoreError::Write)?;
        Ok(())
    }

    /// Read every record back; unreadable lines are skipped with a warning
    pub fn replay(&self) -> Result<Vec<WalOperation>, StoreError> {
        let file = File::open(&self.path).map_err(StoreError::Read)?;
        let reader = BufReader::new(file);
        let mut operations = Vec::new();

        for (line_num, line_result) in reader.split(b'\n').enumerate() {
            let bytes = line_result.map_err(StoreError::Read)?;
            let parsed = std::str::from_utf8(&bytes)
                .map_err(|e| StoreError::InvalidRecord(format!("Line is not UTF-8: {}", e)))
                .and_then(|line| match line.trim() {
                    "" => Ok(None),
                    line => WalOperation::from_line(line).map(Some),
                });

            match parsed {
                Ok(Some(op)) => operations.push(op),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        line_num = line_num + 1,
                        error = %e,
                        "Failed to parse store line, skipping"
                    );
                }
            }
        }

        Ok(operations)
    }

    /// Replace the log with the given operations
    ///
    /// Written to a sibling file first and renamed over the log, so a crash
    /// mid-rewrite leaves the previous log intact.
    pub fn rewrite(&self, operations: &[WalOperation]) -> Result<(), StoreError> {
        let mut file = self.file.lock().map_err(|_| StoreError::Poisoned)?;

        let tmp_path = self.path.with_extension("compact");
        {
            let mut tmp = File::create(&tmp_path).map_err(StoreError::Write)?;
            for op in operations {
                writeln!(tmp, "{}", op.to_line()).map_err(StoreError::Write)?;
            }
            tmp.sync_all().map_err(StoreError::Write)?;
        }

        std::fs::rename(&tmp_path, &self.path).map_err(StoreError::Write)?;
        *file = open_append(&self.path)?;
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File, StoreError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(StoreError::Open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_value_with_separator_survives_line_format() {
        let op = WalOperation::Set {
            key: "guest_name".to_string(),
            value: "GUEST|42\nsecond".to_string(),
        };
        let line = op.to_line();
        assert!(line.starts_with("SET|guest_name|"));
        assert!(!line.contains('\n'));
        assert_eq!(WalOperation::from_line(&line).unwrap(), op);
    }

    #[test]
    fn test_wal_log_and_replay() {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.store");

        let wal = Wal::new(wal_path).unwrap();

        wal.log_operation(&WalOperation::Set {
            key: "session_id".to_string(),
            value: "abc".to_string(),
        })
        .unwrap();
        wal.log_operation(&WalOperation::Remove {
            key: "session_id".to_string(),
        })
        .unwrap();
        wal.log_operation(&WalOperation::Clear).unwrap();

        let operations = wal.replay().unwrap();
        assert_eq!(operations.len(), 3);

        match &operations[0] {
            WalOperation::Set { key, value } => {
                assert_eq!(key, "session_id");
                assert_eq!(value, "abc");
            }
            _ => panic!("Expected Set"),
        }
        assert_eq!(
            operations[1],
            WalOperation::Remove {
                key: "session_id".to_string()
            }
        );
        assert_eq!(operations[2], WalOperation::Clear);
    }

    #[test]
    fn test_wal_rewrite_replaces_history() {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.store");

        let wal = Wal::new(wal_path).unwrap();
        for i in 0..5 {
            wal.log_operation(&WalOperation::Set {
                key: "role".to_string(),
                value: format!("v{}", i),
            })
            .unwrap();
        }

        wal.rewrite(&[WalOperation::Set {
            key: "role".to_string(),
            value: "v4".to_string(),
        }])
        .unwrap();

        let operations = wal.replay().unwrap();
        assert_eq!(operations.len(), 1);

        // Appends after a rewrite land in the new file
        wal.log_operation(&WalOperation::Clear).unwrap();
        assert_eq!(wal.replay().unwrap().len(), 2);
    }

    #[test]
    fn test_wal_invalid_lines() {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.store");

        fs::write(&wal_path, "INVALID_OP|data\nSET|role|zz\nSET|role|706c61796572\n").unwrap();

        let wal = Wal::new(wal_path).unwrap();
        let operations = wal.replay().unwrap();

        // Unknown op and bad hex are skipped
        assert_eq!(operations.len(), 1);
        assert_eq!(
            operations[0],
            WalOperation::Set {
                key: "role".to_string(),
                value: "player".to_string()
            }
        );
    }

    #[test]
    fn test_wal_skips_non_utf8_line() {
        let temp_dir = TempDir::new().unwrap();
        let wal_path = temp_dir.path().join("test.store");

        fs::write(
            &wal_path,
            b"SET|session_id|616263\nSET|role|\xff\xfe\nSET|username|626f62\n",
        )
        .unwrap();

        let wal = Wal::new(wal_path).unwrap();
        let operations = wal.replay().unwrap();

        assert_eq!(
            operations,
            vec![
                WalOperation::Set {
                    key: "session_id".to_string(),
                    value: "abc".to_string()
                },
                WalOperation::Set {
                    key: "username".to_string(),
                    value: "bob".to_string()
                },
            ]
        );
    }
}
