use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Key the interest list is stored under.
pub const INTEREST_KEY: &str = "interestedSessions";

/// String key-value storage for user state, in the manner of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore(HashMap<String, String>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk mapping keys to string values.
///
/// A missing file is an empty store. A file that cannot be read or does not
/// hold a JSON object reads as empty too, but [`KeyValueStore::set`] refuses
/// to replace it and returns the error, so its contents are never lost.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> io::Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err),
        };

        match serde_json::from_str(&contents)? {
            Value::Object(map) => Ok(map),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} does not hold a JSON object", self.path.display()),
            )),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self
            .read()
            .map_err(|err| log::warn!("Ignoring store file {}: {err}", self.path.display()))
            .ok()?;
        map.get(key)?.as_str().map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut map = self.read()?;
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?)
    }
}

/// Session ids the user has flagged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestSet {
    ids: HashSet<String>,
}

impl InterestSet {
    /// Flips membership of `id`. Returns whether it is now flagged.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    #[must_use]
    pub fn is_interested(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Replaces the whole set.
    pub fn load<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
    }

    /// Ids for persistence. Sorted for stable output, but callers should treat
    /// it as a set.
    #[must_use]
    pub fn serialize(&self) -> Vec<String> {
        let mut ids = self.ids.iter().cloned().collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Reads the set stored under [`INTEREST_KEY`]. Missing or unparseable
    /// data gives an empty set.
    pub fn restore<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let mut interests = InterestSet::default();
        let Some(raw) = store.get(INTEREST_KEY) else {
            return interests;
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => interests.load(ids),
            Err(err) => log::warn!("Discarding unreadable interest list: {err}"),
        }

        interests
    }

    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> io::Result<()> {
        let value = serde_json::to_string(&self.serialize())?;
        store.set(INTEREST_KEY, &value)
    }
}
