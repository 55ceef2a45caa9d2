use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use super::codec::{EncodeError, PipeCodec, RecordCodec};
use super::draft::ValidationError;
use super::reminder::{Reminder, ReminderId};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no reminder selected")]
    NoSelection,
    #[error("failed to read reminders from `{}`: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write reminders to `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Clone)]
struct Entry {
    id: ReminderId,
    reminder: Reminder,
}

/// In-memory reminder list kept in sync with one flat file.
///
/// The list is always in priority order (stable within a priority) and is
/// rewritten in full after every add, update and remove.
pub struct ReminderStore {
    path: PathBuf,
    codec: Box<dyn RecordCodec>,
    entries: Vec<Entry>,
    next_id: u64,
}

impl ReminderStore {
    /// Creates a store over `path` and loads whatever the file holds.
    pub fn open(path: impl Into<PathBuf>, codec: Box<dyn RecordCodec>) -> StoreResult<Self> {
        let mut store = Self {
            path: path.into(),
            codec,
            entries: Vec::new(),
            next_id: 1,
        };
        store.load()?;
        Ok(store)
    }

    pub fn open_pipe(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(path, Box::new(PipeCodec::default()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the in-memory list with the file contents.
    ///
    /// A missing file means an empty list. Lines the codec cannot decode,
    /// including lines that are not UTF-8, are skipped. On a read error the
    /// current list is left as it was. Returns the number of reminders loaded.
    pub fn load(&mut self) -> StoreResult<usize> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=empty path={}",
                    self.path.display()
                );
                self.entries.clear();
                return Ok(0);
            }
            Err(source) => {
                error!(
                    "event=store_load module=store status=error path={} error={}",
                    self.path.display(),
                    source
                );
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut entries = Vec::new();
        for (index, raw) in bytes.split(|b| *b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.is_empty() {
                continue;
            }
            let decoded = std::str::from_utf8(raw)
                .ok()
                .and_then(|line| self.codec.decode(line));
            match decoded {
                Some(reminder) => entries.push(Entry {
                    id: self.allocate_id(),
                    reminder: reminder.at_minute_precision(),
                }),
                None => debug!("event=store_load module=store skipped_line={}", index + 1),
            }
        }
        self.entries = entries;
        self.sort();

        info!(
            "event=store_load module=store status=ok count={} path={}",
            self.entries.len(),
            self.path.display()
        );
        Ok(self.entries.len())
    }

    /// Writes the whole list, replacing the previous file contents.
    pub fn save(&self) -> StoreResult<()> {
        let mut content = String::new();
        for entry in &self.entries {
            let line = self.codec.encode(&entry.reminder).map_err(|err| {
                error!(
                    "event=store_save module=store status=error id={} error={}",
                    entry.id, err
                );
                StoreError::Encode(err)
            })?;
            content.push_str(&line);
            content.push('\n');
        }

        let write = || -> io::Result<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, content)
        };
        write().map_err(|source| {
            error!(
                "event=store_save module=store status=error path={} error={}",
                self.path.display(),
                source
            );
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    pub fn add(&mut self, reminder: Reminder) -> StoreResult<ReminderId> {
        ensure_complete(&reminder)?;
        let reminder = reminder.at_minute_precision();

        let id = self.allocate_id();
        self.commit(|entries| {
            entries.push(Entry { id, reminder });
            true
        })?;

        info!("event=reminder_add module=store id={} count={}", id, self.len());
        Ok(id)
    }

    /// Overwrites the fields of the reminder named by `id`, keeping its id.
    pub fn update(&mut self, id: ReminderId, reminder: Reminder) -> StoreResult<()> {
        ensure_complete(&reminder)?;
        let reminder = reminder.at_minute_precision();

        let index = self.position(id).ok_or(StoreError::NoSelection)?;
        self.commit(|entries| {
            entries[index].reminder = reminder;
            true
        })?;

        info!("event=reminder_update module=store id={}", id);
        Ok(())
    }

    pub fn remove(&mut self, id: ReminderId) -> StoreResult<Reminder> {
        let index = self.position(id).ok_or(StoreError::NoSelection)?;
        let removed = self.entries[index].reminder.clone();
        self.commit(|entries| {
            entries.remove(index);
            false
        })?;

        info!("event=reminder_remove module=store id={} count={}", id, self.len());
        Ok(removed)
    }

    /// Reminders in display order, with their ids.
    pub fn reminders(&self) -> impl ExactSizeIterator<Item = (ReminderId, &Reminder)> {
        self.entries.iter().map(|e| (e.id, &e.reminder))
    }

    pub fn get(&self, id: ReminderId) -> Option<&Reminder> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.reminder)
    }

    pub fn id_at(&self, index: usize) -> Option<ReminderId> {
        self.entries.get(index).map(|e| e.id)
    }

    pub fn position(&self, id: ReminderId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn allocate_id(&mut self) -> ReminderId {
        let id = ReminderId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Stable: equal priorities keep their relative order.
    fn sort(&mut self) {
        self.entries.sort_by_key(|e| e.reminder.priority.rank());
    }

    // Applies `mutate`, re-sorting when it returns true, then saves. A failed
    // save restores the previous list.
    fn commit(&mut self, mutate: impl FnOnce(&mut Vec<Entry>) -> bool) -> StoreResult<()> {
        let snapshot = self.entries.clone();
        if mutate(&mut self.entries) {
            self.sort();
        }
        if let Err(err) = self.save() {
            self.entries = snapshot;
            return Err(err);
        }
        Ok(())
    }
}

fn ensure_complete(reminder: &Reminder) -> Result<(), ValidationError> {
    if reminder.is_complete() {
        Ok(())
    } else {
        Err(ValidationError::MissingField)
    }
}
