//! Asset provider seam.
//!
//! The engine never fetches assets itself; the host injects an
//! [`AssetProvider`] that maps an element's `source_ref` to a loadable URL.
//! A load failure must not remove the element — the engine flags it so the
//! renderer can substitute a placeholder.

use std::collections::HashMap;

/// Asset resolution failure. Non-fatal: the element stays in the store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// The provider has no asset for this reference.
    #[error("unknown asset reference: {0}")]
    NotFound(String),
    /// The asset exists but could not be fetched.
    #[error("asset fetch failed for {source_ref}: {reason}")]
    Fetch { source_ref: String, reason: String },
}

/// Maps a `source_ref` to a URL the renderer can load.
pub trait AssetProvider {
    /// Resolve an asset reference to a loadable URL.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the reference is unknown or the fetch
    /// fails; the caller flags the element for fallback rendering.
    fn resolve(&self, source_ref: &str) -> Result<String, LoadError>;
}

/// A fixed in-memory provider, used in tests and demos.
#[derive(Debug, Default)]
pub struct StaticAssetProvider {
    urls: HashMap<String, String>,
}

impl StaticAssetProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reference → URL mapping.
    pub fn insert(&mut self, source_ref: impl Into<String>, url: impl Into<String>) {
        self.urls.insert(source_ref.into(), url.into());
    }
}

impl AssetProvider for StaticAssetProvider {
    fn resolve(&self, source_ref: &str) -> Result<String, LoadError> {
        self.urls
            .get(source_ref)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(source_ref.to_owned()))
    }
}
