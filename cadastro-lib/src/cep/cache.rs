//! In-memory answer cache using DashMap

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::{Address, AddressLookup, Cep};
use crate::error::LookupError;

/// Entry count at which an insert first sweeps expired entries.
pub const DEFAULT_GC_THRESHOLD: usize = 1024;

/// A cached lookup answer with its expiry.
#[derive(Debug, Clone)]
struct CachedAnswer {
    /// `None` records a "not found" answer.
    address: Option<Address>,
    expires_at: DateTime<Utc>,
}

impl CachedAnswer {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Memoizes answers of another [`AddressLookup`] for a fixed TTL.
///
/// Both found and not-found answers are cached; failed lookups are not, so
/// the next call goes to the service again. Expired entries are swept on
/// insert once the cache holds `gc_threshold` entries, so codes that are
/// never asked for again do not accumulate.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use cadastro_lib::cep::{CachedLookup, ViaCepClient};
///
/// let lookup = CachedLookup::new(ViaCepClient::builder().build()?, Duration::from_secs(3600));
/// ```
#[derive(Debug)]
pub struct CachedLookup<L> {
    inner: L,
    ttl: Duration,
    gc_threshold: usize,
    store: DashMap<String, CachedAnswer>,
}

impl<L: AddressLookup> CachedLookup<L> {
    /// Wraps a lookup with a cache of the given TTL.
    pub fn new(inner: L, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            gc_threshold: DEFAULT_GC_THRESHOLD,
            store: DashMap::new(),
        }
    }

    /// Sets the entry count at which inserts sweep expired entries.
    pub fn with_gc_threshold(mut self, threshold: usize) -> Self {
        self.gc_threshold = threshold;
        self
    }

    /// Returns the wrapped lookup.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Removes expired entries and returns how many were dropped.
    pub fn gc(&self) -> usize {
        let mut removed = 0;
        self.store.retain(|_, answer| {
            if answer.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    fn cached(&self, key: &str) -> Option<CachedAnswer> {
        let entry = self.store.get(key)?;
        let answer = entry.value();

        if answer.is_expired() {
            drop(entry);
            self.store.remove(key);
            None
        } else {
            Some(answer.clone())
        }
    }
}

#[async_trait]
impl<L: AddressLookup> AddressLookup for CachedLookup<L> {
    async fn lookup(&self, cep: &Cep) -> Result<Option<Address>, LookupError> {
        if let Some(answer) = self.cached(cep.digits()) {
            log::debug!("CEP {} served from cache", cep);
            return Ok(answer.address);
        }

        let address = self.inner.lookup(cep).await?;
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::zero());
        if self.store.len() >= self.gc_threshold {
            let removed = self.gc();
            log::debug!("CEP cache swept {} expired entries", removed);
        }
        self.store.insert(
            cep.digits().to_string(),
            CachedAnswer {
                address: address.clone(),
                expires_at: Utc::now() + ttl,
            },
        );
        Ok(address)
    }
}
