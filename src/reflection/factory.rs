//! Cached access to property indices.
//!
//! Introspection is deterministic, so the index of a type only has to be built once. The
//! [`DefaultReflectorFactory`] keeps one [`PropertyIndex`] per type token. Concurrent first
//! lookups of the same type build the index at most once; failed builds are never cached, so a
//! type with an ambiguous shape fails on every lookup.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use dashmap::{mapref::entry::Entry, DashMap};
use log::debug;
use rayon::prelude::*;

use crate::{
    metadata::{
        token::Token,
        typesystem::{TypeRc, TypeRegistry},
    },
    reflection::{PropertyIndex, Reflector, ReflectorConfig},
    Result,
};

/// Hands out the property index of a type
pub trait ReflectorFactory: Send + Sync {
    /// Returns `true` if built indices are cached
    fn is_class_cache_enabled(&self) -> bool;

    /// Switch caching on or off, indices cached so far are kept
    fn set_class_cache_enabled(&self, enabled: bool);

    /// The property index of `ty`
    ///
    /// # Errors
    /// Returns the error of [`Reflector::build_with_config`] if `ty` cannot be introspected.
    fn find_for_type(&self, ty: &TypeRc) -> Result<Arc<PropertyIndex>>;
}

/// [`ReflectorFactory`] backed by a concurrent map keyed by type token
pub struct DefaultReflectorFactory {
    registry: Arc<TypeRegistry>,
    config: ReflectorConfig,
    cache_enabled: AtomicBool,
    cache: DashMap<Token, Arc<PropertyIndex>>,
}

impl DefaultReflectorFactory {
    /// Create a factory with the default configuration
    ///
    /// ## Arguments
    /// * 'registry' - The registry all looked up types are registered in
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self::with_config(registry, ReflectorConfig::default())
    }

    /// Create a factory
    ///
    /// ## Arguments
    /// * 'registry' - The registry all looked up types are registered in
    /// * 'config'   - Used for every build, `class_cache_enabled` sets the initial cache state
    #[must_use]
    pub fn with_config(registry: Arc<TypeRegistry>, config: ReflectorConfig) -> Self {
        DefaultReflectorFactory {
            registry,
            config,
            cache_enabled: AtomicBool::new(config.class_cache_enabled),
            cache: DashMap::new(),
        }
    }

    /// The registry this factory introspects
    #[must_use]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Build and cache the indices of `types` in parallel
    ///
    /// # Errors
    /// Returns the first introspection error encountered. Indices built before the failure stay
    /// cached.
    pub fn preload(&self, types: &[TypeRc]) -> Result<()> {
        types
            .par_iter()
            .try_for_each(|ty| self.find_for_type(ty).map(|_| ()))
    }

    /// Drop every cached index
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Number of cached indices
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if no index is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns `true` if an index for `token` is cached
    #[must_use]
    pub fn is_cached(&self, token: &Token) -> bool {
        self.cache.contains_key(token)
    }

    fn build(&self, ty: &TypeRc) -> Result<PropertyIndex> {
        Reflector::build_with_config(&self.registry, ty, self.config)
    }
}

impl ReflectorFactory for DefaultReflectorFactory {
    fn is_class_cache_enabled(&self) -> bool {
        self.cache_enabled.load(Ordering::Acquire)
    }

    fn set_class_cache_enabled(&self, enabled: bool) {
        self.cache_enabled.store(enabled, Ordering::Release);
    }

    fn find_for_type(&self, ty: &TypeRc) -> Result<Arc<PropertyIndex>> {
        if !self.is_class_cache_enabled() {
            return Ok(Arc::new(self.build(ty)?));
        }

        if let Some(cached) = self.cache.get(&ty.token) {
            debug!("Reusing cached index of {}", ty.fullname());
            return Ok(cached.clone());
        }

        // the vacant entry keeps its shard locked, racing lookups wait for this build
        match self.cache.entry(ty.token) {
            Entry::Occupied(cached) => Ok(cached.get().clone()),
            Entry::Vacant(vacant) => {
                let index = Arc::new(self.build(ty)?);
                vacant.insert(index.clone());
                Ok(index)
            }
        }
    }
}
