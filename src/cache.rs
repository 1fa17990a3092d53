use crate::error::{CacheError, SourceError};
use crate::tracker::{Issue, IssueSource};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key-value store for tracker responses. Keys are issue keys or query strings.
pub trait CacheStore: Send {
    fn get(&self, key: &str) -> Option<&Value>;

    fn put(&mut self, key: &str, value: Value);

    /// Persist pending entries
    fn flush(&mut self) -> Result<(), CacheError>;
}

impl<C: CacheStore + ?Sized> CacheStore for Box<C> {
    fn get(&self, key: &str) -> Option<&Value> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Value) {
        (**self).put(key, value)
    }

    fn flush(&mut self) -> Result<(), CacheError> {
        (**self).flush()
    }
}

/// Cache that lives only for the current run
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: BTreeMap<String, Value>,
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn put(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), CacheError> {
        Ok(())
    }
}

/// JSON file cache, read once at startup and written back on flush
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
    dirty: bool,
}

impl FileCache {
    /// Load the cache file. A missing file starts an empty cache; an
    /// unreadable or unparsable one is an error.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let entries: BTreeMap<String, Value> = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| CacheError::Read {
                path: path.to_path_buf(),
                source: e,
            })?;
            serde_json::from_str(&content).map_err(|e| CacheError::Corrupt {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            BTreeMap::new()
        };

        debug!("Loaded {} cached responses from {:?}", entries.len(), path);

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            dirty: false,
        })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn put(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn flush(&mut self) -> Result<(), CacheError> {
        if !self.dirty {
            return Ok(());
        }

        let write_err = |e| CacheError::Write {
            path: self.path.clone(),
            source: e,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json).map_err(write_err)?;

        info!("Saved {} cached responses to {:?}", self.entries.len(), self.path);
        self.dirty = false;
        Ok(())
    }
}

/// Memoizes any [`IssueSource`] through an injected [`CacheStore`]
pub struct CachedSource<S, C> {
    inner: S,
    cache: C,
}

impl<S: IssueSource, C: CacheStore> CachedSource<S, C> {
    pub fn new(inner: S, cache: C) -> Self {
        Self { inner, cache }
    }

    pub fn flush(&mut self) -> Result<(), CacheError> {
        self.cache.flush()
    }

    #[cfg(test)]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn cached<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.cache.get(key) {
            Some(value) => {
                debug!("Cache hit for {}", key);
                serde_json::from_value(value.clone())
                    .map(Some)
                    .map_err(|e| CacheError::Entry {
                        key: key.to_string(),
                        source: e,
                    })
            }
            None => Ok(None),
        }
    }

    fn remember<T: serde::Serialize>(&mut self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_value(value)?;
        self.cache.put(key, value);
        Ok(())
    }
}

#[async_trait]
impl<S: IssueSource, C: CacheStore> IssueSource for CachedSource<S, C> {
    async fn search(&mut self, query: &str) -> Result<Vec<Issue>, SourceError> {
        if let Some(issues) = self.cached(query)? {
            return Ok(issues);
        }
        let issues = self.inner.search(query).await?;
        self.remember(query, &issues)?;
        Ok(issues)
    }

    async fn get_issue(&mut self, key: &str) -> Result<Issue, SourceError> {
        if let Some(issue) = self.cached(key)? {
            return Ok(issue);
        }
        let issue = self.inner.get_issue(key).await?;
        self.remember(key, &issue)?;
        Ok(issue)
    }
}
