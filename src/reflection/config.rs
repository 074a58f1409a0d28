//! Reflector configuration
//!
//! This module provides the options that control how property indices are built, cached and
//! how their accessors are allowed to invoke members.

use crate::metadata::typesystem::MAX_RESOLUTION_DEPTH;

/// Configuration for building and caching property indices
///
/// The defaults mirror a permissive host: accessors may use non-public members, indices are
/// cached per type, and hierarchy walks are bounded at 64 levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectorConfig {
    /// Allow accessors to invoke non-public methods and fields (default: true)
    /// When disabled, invoking a non-public member fails with `AccessDenied`
    pub suppress_access_checks: bool,

    /// Cache built indices in the factory, one per type (default: true)
    pub class_cache_enabled: bool,

    /// Maximum depth of supertype walks (default: 64)
    /// Deeper (or cyclic) hierarchies fail with `RecursionLimit`
    pub max_hierarchy_depth: usize,
}

impl Default for ReflectorConfig {
    fn default() -> Self {
        Self {
            suppress_access_checks: true,
            class_cache_enabled: true,
            max_hierarchy_depth: MAX_RESOLUTION_DEPTH,
        }
    }
}

impl ReflectorConfig {
    /// Creates a configuration for hosts that forbid suppressing access checks
    ///
    /// Only public members can be invoked through the accessors of the resulting indices.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            suppress_access_checks: false,
            ..Self::default()
        }
    }

    /// Creates a configuration that builds a fresh index on every lookup
    #[must_use]
    pub fn uncached() -> Self {
        Self {
            class_cache_enabled: false,
            ..Self::default()
        }
    }

    /// Overrides the maximum hierarchy depth
    ///
    /// ## Arguments
    /// * 'depth' - The new bound for supertype walks
    #[must_use]
    pub fn with_max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.max_hierarchy_depth = depth;
        self
    }
}
