//! File-backed memoization of `*.list` calls

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{ApiCall, Client};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Params, Record};
use crate::transport::Files;

/// Decorates a [`Client`] with list caching and the `ok` contract.
///
/// Responses of `<resource>.list` methods are kept in memory for the life of
/// the instance and on disk as `{cache_dir}/{resource}-list.json`. Cache
/// files are never invalidated; delete them to refetch. Every response that
/// passes through [`ApiCall::api_call`] with a falsy `ok` becomes
/// [`Error::ApiFailed`].
pub struct CachedClient {
    client: Client,
    cache_dir: PathBuf,
    memo: Mutex<HashMap<PathBuf, Record>>,
}

impl CachedClient {
    /// Wrap `client`. The directory is not created; an existing plain file
    /// at `cache_dir` is rejected.
    pub fn new(client: Client, cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        if cache_dir.is_file() {
            return Err(Error::CacheDirNotADirectory { path: cache_dir });
        }
        Ok(Self {
            client,
            cache_dir,
            memo: Mutex::new(HashMap::new()),
        })
    }

    /// Wrap `client` with the configured cache directory, creating it if
    /// missing.
    pub fn from_config(client: Client, config: &Config) -> Result<Self> {
        let cache_dir = config.cache_dir();
        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir).map_err(|source| Error::CacheWrite {
                path: cache_dir.clone(),
                source,
            })?;
        }
        Self::new(client, cache_dir)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache file for `method`, if it is a list method.
    pub fn cache_path(&self, method: &str) -> Option<PathBuf> {
        let comp: Vec<&str> = method.split('.').collect();
        match comp.as_slice() {
            [resource, .., "list"] => Some(self.cache_dir.join(format!("{}-list.json", resource))),
            _ => None,
        }
    }

    fn memo(&self) -> MutexGuard<'_, HashMap<PathBuf, Record>> {
        self.memo.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn with_cache(
        &self,
        path: PathBuf,
        method: &str,
        files: Option<&Files>,
        params: Params,
    ) -> Result<Record> {
        let memoized = self.memo().get(&path).cloned();
        if let Some(hit) = memoized {
            tracing::debug!(method, "cache hit (memory)");
            return Ok(hit);
        }

        let resp = if path.is_file() {
            tracing::debug!(method, path = %path.display(), "cache hit (disk)");
            read_cache(&path)?
        } else {
            let resp = self.client.api_call(method, files, params).await?;
            if resp.is_ok() {
                write_cache(&path, &resp)?;
                tracing::info!(method, path = %path.display(), "cached response");
            }
            resp
        };

        self.memo().insert(path, resp.clone());
        Ok(resp)
    }
}

fn read_cache(path: &Path) -> Result<Record> {
    let content = fs::read_to_string(path).map_err(|source| Error::CacheRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::CacheParse {
        path: path.to_path_buf(),
        source,
    })
}

// serde_json writes non-ASCII characters literally.
fn write_cache(path: &Path, record: &Record) -> Result<()> {
    let content = serde_json::to_string(record).map_err(|source| Error::CacheWrite {
        path: path.to_path_buf(),
        source: source.into(),
    })?;
    fs::write(path, content).map_err(|source| Error::CacheWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait]
impl ApiCall for CachedClient {
    async fn api_call(
        &self,
        method: &str,
        files: Option<&Files>,
        params: Params,
    ) -> Result<Record> {
        let resp = match self.cache_path(method) {
            Some(path) => self.with_cache(path, method, files, params).await?,
            None => self.client.api_call(method, files, params).await?,
        };

        if !resp.is_ok() {
            return Err(Error::ApiFailed {
                error: resp.error(),
            });
        }
        Ok(resp)
    }

    async fn call_method(&self, method: &str, params: Params) -> Result<Record> {
        self.client.call_method(method, params).await
    }
}
