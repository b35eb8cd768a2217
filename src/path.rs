//! Structural path tokens.
//!
//! The host's configuration object is an aggregate of dependency slots. A
//! [`Path`] is a statically declared, typed token naming one such slot: a
//! unique key string plus the payload type the slot carries. Tokens stand
//! in for the reflective key-paths a dynamic language would use; they are
//! declared once (usually as constants via [`override_path!`]) and passed
//! by value to the registry's path-keyed operations.

use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed accessor token naming one slot inside a configuration aggregate.
///
/// Identity is the key string alone; the payload type is enforced at the
/// call sites that use the token, and a lookup through a token whose type
/// disagrees with the stored payload reports absent.
pub struct Path<T> {
    key: &'static str,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Path<T> {
    /// Declare a token for the slot named `key`.
    ///
    /// Keys must be unique across the configuration aggregate; the
    /// registry keeps at most one override per key.
    pub const fn new(key: &'static str) -> Self {
        Path {
            key,
            _payload: PhantomData,
        }
    }

    /// The slot's unique key.
    pub fn key(&self) -> &'static str {
        self.key
    }
}

// Manual impls: derives would put unnecessary bounds on `T`.
impl<T> Clone for Path<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Path<T> {}

impl<T> Debug for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({})", self.key)
    }
}

impl<T> PartialEq for Path<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Path<T> {}

impl<T> Hash for Path<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state)
    }
}

/// Declare a named [`Path`] constant.
///
/// ```
/// use devmock::override_path;
///
/// override_path!(API_BASE_URL: String = "environment.api.base_url");
/// override_path!(pub RETRY_LIMIT: u32 = "environment.api.retry_limit");
/// ```
#[macro_export]
macro_rules! override_path {
    ($name:ident: $ty:ty = $key:literal) => {
        const $name: $crate::Path<$ty> = $crate::Path::new($key);
    };
    (pub $name:ident: $ty:ty = $key:literal) => {
        pub const $name: $crate::Path<$ty> = $crate::Path::new($key);
    };
}
