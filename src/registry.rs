//! The override registry.
//!
//! A process-wide keyed store mapping dependency identifiers to mock
//! values. Identifiers come in two shapes: the fully-qualified name of a
//! payload type, and a structural [`Path`] token into the host's
//! configuration aggregate. The host's resolution code consults the
//! registry on every lookup, so a changed override takes effect on the
//! next resolution without restarting the process.
//!
//! Both maps sit behind one `RwLock`, giving last-writer-wins semantics
//! under concurrent mutation and consistent snapshots for reads.

use std::any::TypeId;
use std::collections::HashMap;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::errors::{DevmockError, Result};
use crate::path::Path;
use crate::value::{downcast, DynOverride, OverridePayload, TypeInfo};

/// Configuration for registry behavior
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Log replacements of an existing override at `warn` instead of `debug`
    pub warn_on_replace: bool,
    /// Soft cap on total entries across both maps; exceeding it only warns
    pub max_entries: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            warn_on_replace: false,
            max_entries: 1024,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(DevmockError::configuration_field(
                "max_entries cannot be zero",
                "max_entries",
            ));
        }
        Ok(())
    }
}

/// Both keyed maps, guarded together so snapshots stay consistent.
#[derive(Default)]
struct Maps {
    by_type: HashMap<TypeInfo, DynOverride>,
    by_path: HashMap<&'static str, DynOverride>,
}

impl Maps {
    fn len(&self) -> usize {
        self.by_type.len() + self.by_path.len()
    }
}

/// In-memory store of active overrides.
///
/// Most callers go through the free functions in the crate root, which
/// operate on the process-wide instance; isolated instances exist for
/// tests and embedded debug tooling.
pub struct OverrideRegistry {
    maps: RwLock<Maps>,
    config: RegistryConfig,
}

impl OverrideRegistry {
    /// Create an empty registry with default configuration
    pub fn new() -> Self {
        Self {
            maps: RwLock::new(Maps::default()),
            config: RegistryConfig::default(),
        }
    }

    /// Create an empty registry with the given configuration
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            maps: RwLock::new(Maps::default()),
            config,
        })
    }

    /// Install `value` as the override for its own type `T`.
    ///
    /// Overwrites any previous override for `T`. Registering the unit
    /// type is a programmer error; it is logged and dropped without
    /// touching registry state.
    pub fn mock_by_type<T: OverridePayload>(&self, value: T) {
        if let Err(err) = self.try_mock_by_type(value) {
            warn!(%err, "override rejected");
        }
    }

    /// Fallible variant of [`mock_by_type`](Self::mock_by_type).
    pub fn try_mock_by_type<T: OverridePayload>(&self, value: T) -> Result<()> {
        let info = TypeInfo::of::<T>();
        if info.id() == TypeId::of::<()>() {
            return Err(DevmockError::forbidden_payload(
                info.name(),
                "the unit type carries no value to resolve against",
            ));
        }
        let replaced = {
            let mut maps = self.maps.write();
            self.note_capacity(&maps);
            maps.by_type.insert(info, Box::new(value)).is_some()
        };
        self.log_install(info.name(), replaced);
        Ok(())
    }

    /// Install `value` as the override for the slot named by `path`.
    ///
    /// Overwrites any previous override for that exact path.
    pub fn mock_by_path<T: OverridePayload>(&self, path: Path<T>, value: T) {
        let replaced = {
            let mut maps = self.maps.write();
            self.note_capacity(&maps);
            maps.by_path.insert(path.key(), Box::new(value)).is_some()
        };
        self.log_install(path.key(), replaced);
    }

    /// Remove the override for type `T`, if present
    pub fn clear_by_type<T: OverridePayload>(&self) {
        let info = TypeInfo::of::<T>();
        let removed = self.maps.write().by_type.remove(&info).is_some();
        if removed {
            debug!(identifier = info.name(), "override cleared");
        }
    }

    /// Remove the override for the slot named by `path`, if present
    pub fn clear_by_path<T>(&self, path: Path<T>) {
        let removed = self.maps.write().by_path.remove(path.key()).is_some();
        if removed {
            debug!(identifier = path.key(), "override cleared");
        }
    }

    /// The active override for type `T`, or `None` when absent
    pub fn get<T: OverridePayload>(&self) -> Option<T> {
        let erased = self.maps.read().by_type.get(&TypeInfo::of::<T>()).cloned();
        erased.and_then(downcast)
    }

    /// The active override for the slot named by `path`.
    ///
    /// Returns `None` when no override is installed, or when the stored
    /// payload was installed through a token of a different type.
    pub fn get_by_path<T: OverridePayload>(&self, path: Path<T>) -> Option<T> {
        let erased = self.maps.read().by_path.get(path.key()).cloned();
        erased.and_then(downcast)
    }

    /// Resolve type `T` through the registry, falling back to `fallback`.
    ///
    /// This is the shape of the host's resolution code path: override
    /// first, production value otherwise.
    pub fn resolve_or_else<T: OverridePayload>(&self, fallback: impl FnOnce() -> T) -> T {
        self.get().unwrap_or_else(fallback)
    }

    /// Path-keyed equivalent of [`resolve_or_else`](Self::resolve_or_else)
    pub fn resolve_path_or_else<T: OverridePayload>(
        &self,
        path: Path<T>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        self.get_by_path(path).unwrap_or_else(fallback)
    }

    /// Empty both maps unconditionally. Intended for test teardown and
    /// global "reset everything" tooling.
    pub fn clear_all(&self) {
        let mut maps = self.maps.write();
        let dropped = maps.len();
        maps.by_type.clear();
        maps.by_path.clear();
        drop(maps);
        if dropped > 0 {
            debug!(dropped, "all overrides cleared");
        }
    }

    /// All currently active identifiers from both maps.
    ///
    /// Type names and path keys, in no contractual order. For debug
    /// pickers and introspection UIs.
    pub fn active_identifiers(&self) -> Vec<String> {
        let maps = self.maps.read();
        maps.by_type
            .keys()
            .map(|info| info.name().to_string())
            .chain(maps.by_path.keys().map(|key| key.to_string()))
            .collect()
    }

    /// Number of active overrides across both maps
    pub fn len(&self) -> usize {
        self.maps.read().len()
    }

    /// Whether no overrides are active
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn note_capacity(&self, maps: &Maps) {
        if maps.len() >= self.config.max_entries {
            warn!(
                entries = maps.len(),
                max_entries = self.config.max_entries,
                "override registry exceeds its soft entry cap"
            );
        }
    }

    fn log_install(&self, identifier: &str, replaced: bool) {
        if replaced && self.config.warn_on_replace {
            warn!(identifier, "override replaced");
        } else {
            debug!(identifier, replaced, "override installed");
        }
    }
}

impl Default for OverrideRegistry {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: OverrideRegistry = OverrideRegistry::new();
}

/// The process-wide registry consulted by the free-function API
pub fn global() -> &'static OverrideRegistry {
    &GLOBAL_REGISTRY
}
