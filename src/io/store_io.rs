use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::model::document::Document;

/// Error type for reading and writing the task document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("malformed task file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DocumentError {
    /// True when the document file does not exist yet
    pub fn is_missing(&self) -> bool {
        matches!(self, DocumentError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// True when the file exists but is not a task document
    pub fn is_malformed(&self) -> bool {
        matches!(self, DocumentError::Parse { .. })
    }
}

/// Where the task document comes from and goes to
pub trait DocumentStore {
    fn load(&self) -> Result<Document, DocumentError>;
    fn save(&self, doc: &Document) -> Result<(), DocumentError>;
    /// Move the current contents out of the way so the next save cannot
    /// clobber them. Returns where they went.
    fn set_aside(&self) -> Result<PathBuf, DocumentError>;
}

/// Task document kept as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Document, DocumentError> {
        let text = fs::read_to_string(&self.path).map_err(|source| DocumentError::Read {
            path: self.path.clone(),
            source,
        })?;
        let doc: Document = serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(doc.normalized())
    }

    fn save(&self, doc: &Document) -> Result<(), DocumentError> {
        let mut content = serde_json::to_string_pretty(doc)?;
        content.push('\n');
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| DocumentError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        atomic_write(&self.path, content.as_bytes()).map_err(|source| DocumentError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), tasks = doc.tasks.len(), "saved task document");
        Ok(())
    }

    fn set_aside(&self) -> Result<PathBuf, DocumentError> {
        let backup = backup_path(&self.path);
        fs::rename(&self.path, &backup).map_err(|source| DocumentError::Write {
            path: backup.clone(),
            source,
        })?;
        Ok(backup)
    }
}

/// `<file>.bak` next to `path`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Load the document, falling back to the seed document on any failure.
/// A missing or malformed file is never fatal. A malformed file is moved to
/// `<file>.bak` first so saving the seed document does not destroy it.
pub fn load_or_default(store: &impl DocumentStore) -> Document {
    match store.load() {
        Ok(doc) => {
            info!(tasks = doc.tasks.len(), next_id = doc.next_id, "loaded task document");
            doc
        }
        Err(e) if e.is_missing() => {
            info!("no task document yet, starting from the seed document");
            Document::seed()
        }
        Err(e) => {
            warn!(error = %e, "task document unusable, starting from the seed document");
            if e.is_malformed() {
                match store.set_aside() {
                    Ok(backup) => {
                        warn!(backup = %backup.display(), "moved unreadable task document aside")
                    }
                    Err(e) => warn!(error = %e, "could not move unreadable task document aside"),
                }
            }
            Document::seed()
        }
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Task, TaskId};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        let doc = Document::seed();
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deeper/tasks.json"));
        store.save(&Document::seed()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn missing_file_falls_back_to_seed() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_err_and(|e| e.is_missing()));
        assert_eq!(load_or_default(&store), Document::seed());
    }

    #[test]
    fn malformed_file_falls_back_to_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "not json {{{").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(DocumentError::Parse { .. })));
        assert_eq!(load_or_default(&store), Document::seed());
    }

    #[test]
    fn malformed_file_is_kept_as_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let legacy = r#"[{"task":"My real task","checked":false,"context":"Home"}]"#;
        fs::write(&path, legacy).unwrap();
        let store = JsonFileStore::new(&path);

        let doc = load_or_default(&store);
        assert_eq!(doc, Document::seed());
        assert!(!path.exists());
        store.save(&doc).unwrap();

        let backup = dir.path().join("config.json.bak");
        assert_eq!(backup_path(&path), backup);
        assert_eq!(fs::read_to_string(&backup).unwrap(), legacy);
        assert!(fs::read_to_string(&path).unwrap().contains("Welcome to your todo app!"));
    }

    #[test]
    fn missing_file_leaves_no_backup() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("config.json"));
        load_or_default(&store);
        assert!(!dir.path().join("config.json.bak").exists());
    }

    #[test]
    fn load_normalizes_next_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"{"tasks":[{"id":12,"task":"a","checked":false,"context":"Work","tags":["", "x"]}],"next_id":0}"#,
        )
        .unwrap();
        let doc = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(doc.next_id, 13);
        assert_eq!(doc.tasks[0].tag_line(), "x");
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn saved_file_omits_empty_optionals() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        let doc = Document {
            tasks: vec![Task::new(TaskId(1), "a", "Work")],
            next_id: 2,
        };
        store.save(&doc).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(!text.contains("priority"));
        assert!(!text.contains("tags"));
        assert!(!text.contains("due_date"));
        assert!(text.contains("\"next_id\": 2"));
    }
}
