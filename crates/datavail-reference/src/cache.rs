use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use datavail_types::ReferenceData;

use crate::{ReferenceError, ReferenceSource};

/// Memoizes another source per version.
///
/// Failed loads are not cached, so a version that appears later is picked up.
#[derive(Debug)]
pub struct CachedReference<S> {
    inner: S,
    loaded: Mutex<HashMap<String, Arc<ReferenceData>>>,
}

impl<S> CachedReference<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of versions currently memoized.
    pub fn cached_versions(&self) -> usize {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<S: ReferenceSource> ReferenceSource for CachedReference<S> {
    fn load(&self, version: &str) -> Result<Arc<ReferenceData>, ReferenceError> {
        if let Some(hit) = self
            .loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(version)
        {
            return Ok(Arc::clone(hit));
        }

        // Loaded outside the lock; two racing callers may both read the source.
        let data = self.inner.load(version)?;
        debug!(version, "memoized reference metadata");
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = loaded.entry(version.to_string()).or_insert(data);
        Ok(Arc::clone(entry))
    }
}
