//! Debug-only override registry.
//!
//! A process-wide store that lets development tooling swap a feature's
//! runtime dependencies for mock values, then revert to production
//! behavior, without restarting the process. Overrides are keyed either
//! by a payload type's fully-qualified name or by a structural [`Path`]
//! token into the host's configuration aggregate. The host's resolution
//! code consults the registry before falling back to its production
//! value, so installs and clears take effect on the next resolution.
//!
//! The live registry is gated behind the `overrides` cargo feature (on by
//! default). Release builds depend on this crate with
//! `default-features = false`, which turns every operation below into an
//! inert no-op that always reports absent.
//!
//! ```
//! #[derive(Clone, Debug, PartialEq)]
//! struct Endpoint {
//!     url: String,
//! }
//!
//! # #[cfg(feature = "overrides")]
//! # {
//! devmock::mock_by_type(Endpoint {
//!     url: "http://localhost:9999".into(),
//! });
//! let endpoint = devmock::resolve_or_else(|| Endpoint {
//!     url: "https://api.example.com".into(),
//! });
//! assert_eq!(endpoint.url, "http://localhost:9999");
//!
//! devmock::clear_all();
//! assert!(devmock::get::<Endpoint>().is_none());
//! # }
//! ```

pub mod errors;
pub mod path;
pub mod value;

#[cfg(feature = "overrides")]
pub mod registry;

// Re-exports for convenience
pub use errors::{DevmockError, Result};
pub use path::Path;
pub use value::{OverridePayload, TypeInfo};

#[cfg(feature = "overrides")]
pub use registry::{global, OverrideRegistry, RegistryConfig};

/// Free-function API over the process-wide registry.
#[cfg(feature = "overrides")]
mod facade {
    use crate::path::Path;
    use crate::registry::global;
    use crate::value::OverridePayload;
    use crate::Result;

    /// Install `value` as the override for its own type `T`
    pub fn mock_by_type<T: OverridePayload>(value: T) {
        global().mock_by_type(value);
    }

    /// Fallible variant of [`mock_by_type`]
    pub fn try_mock_by_type<T: OverridePayload>(value: T) -> Result<()> {
        global().try_mock_by_type(value)
    }

    /// Install `value` as the override for the slot named by `path`
    pub fn mock_by_path<T: OverridePayload>(path: Path<T>, value: T) {
        global().mock_by_path(path, value);
    }

    /// Remove the override for type `T`, if present
    pub fn clear_by_type<T: OverridePayload>() {
        global().clear_by_type::<T>();
    }

    /// Remove the override for the slot named by `path`, if present
    pub fn clear_by_path<T>(path: Path<T>) {
        global().clear_by_path(path);
    }

    /// The active override for type `T`, or `None` when absent
    pub fn get<T: OverridePayload>() -> Option<T> {
        global().get::<T>()
    }

    /// The active override for the slot named by `path`
    pub fn get_by_path<T: OverridePayload>(path: Path<T>) -> Option<T> {
        global().get_by_path(path)
    }

    /// Resolve type `T` through the registry, falling back to `fallback`
    pub fn resolve_or_else<T: OverridePayload>(fallback: impl FnOnce() -> T) -> T {
        global().resolve_or_else(fallback)
    }

    /// Path-keyed equivalent of [`resolve_or_else`]
    pub fn resolve_path_or_else<T: OverridePayload>(
        path: Path<T>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        global().resolve_path_or_else(path, fallback)
    }

    /// Empty both maps unconditionally
    pub fn clear_all() {
        global().clear_all();
    }

    /// All currently active identifiers, in no contractual order
    pub fn active_identifiers() -> Vec<String> {
        global().active_identifiers()
    }
}

/// Inert no-op surface for builds without the `overrides` feature.
///
/// Same signatures as the live facade; every operation reports absent and
/// touches no state, so production resolution never observes an override
/// and call sites need no `cfg` of their own.
#[cfg(not(feature = "overrides"))]
mod facade {
    use crate::path::Path;
    use crate::value::OverridePayload;
    use crate::Result;

    #[inline(always)]
    pub fn mock_by_type<T: OverridePayload>(_value: T) {}

    #[inline(always)]
    pub fn try_mock_by_type<T: OverridePayload>(_value: T) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    pub fn mock_by_path<T: OverridePayload>(_path: Path<T>, _value: T) {}

    #[inline(always)]
    pub fn clear_by_type<T: OverridePayload>() {}

    #[inline(always)]
    pub fn clear_by_path<T>(_path: Path<T>) {}

    #[inline(always)]
    pub fn get<T: OverridePayload>() -> Option<T> {
        None
    }

    #[inline(always)]
    pub fn get_by_path<T: OverridePayload>(_path: Path<T>) -> Option<T> {
        None
    }

    #[inline(always)]
    pub fn resolve_or_else<T: OverridePayload>(fallback: impl FnOnce() -> T) -> T {
        fallback()
    }

    #[inline(always)]
    pub fn resolve_path_or_else<T: OverridePayload>(
        _path: Path<T>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        fallback()
    }

    #[inline(always)]
    pub fn clear_all() {}

    #[inline(always)]
    pub fn active_identifiers() -> Vec<String> {
        Vec::new()
    }
}

pub use facade::*;
