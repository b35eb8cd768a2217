//! Type-erased storage for override payloads.
//!
//! The registry stores values of arbitrary concrete types behind a single
//! map value type. Erasure goes through [`OverrideValue`], which keeps the
//! payload clonable (via [`dyn_clone`]) and downcastable; retrieval is a
//! checked downcast that reports absence on mismatch instead of failing.

use dyn_clone::DynClone;
use std::{
    any::{type_name, Any, TypeId},
    fmt::{self, Debug},
    hash::Hash,
};

/// Bound on everything the registry may store as an override payload.
///
/// Blanket-implemented; callers never implement this by hand.
pub trait OverridePayload: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> OverridePayload for T {}

/// Object-safe erasure of an [`OverridePayload`].
///
/// The `into_any`/`as_any` indirection works around the lack of
/// `dyn Clone + Any` upcasting (rust-lang/rust#65991).
pub(crate) trait OverrideValue: DynClone + Any + Send + Sync {
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
    fn as_any(&self) -> &dyn Any;
    /// Identity of the stored payload type.
    fn payload_type(&self) -> TypeInfo;
}

dyn_clone::clone_trait_object!(OverrideValue);

impl<T: OverridePayload> OverrideValue for T {
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        Box::new(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn payload_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }
}

impl Debug for dyn OverrideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<override: {}>", self.payload_type().name())
    }
}

/// A boxed, erased override payload.
pub(crate) type DynOverride = Box<dyn OverrideValue>;

/// Recover a concrete `T` from an erased payload.
///
/// Returns `None` when the stored payload is not a `T`; absence, not an
/// error, per the registry contract.
pub(crate) fn downcast<T: OverridePayload>(value: DynOverride) -> Option<T> {
    if value.as_any().type_id() != TypeId::of::<T>() {
        return None;
    }
    value.into_any().downcast::<T>().ok().map(|boxed| *boxed)
}

/// A [`TypeId`] paired with the type's fully-qualified name.
///
/// The id gives cheap identity for map keys; the name is the identifier
/// string surfaced to debug tooling.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// The [`TypeInfo`] of the type this function is instantiated with.
    pub fn of<T: 'static>() -> Self {
        TypeInfo {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Gets the [`TypeId`].
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Gets the fully-qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Hash for TypeInfo {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &TypeInfo) -> bool {
        self.id.eq(&other.id)
    }
}

impl Eq for TypeInfo {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_downcast_roundtrip() {
        let erased: DynOverride = Box::new(String::from("mocked"));
        assert_eq!(downcast::<String>(erased), Some(String::from("mocked")));
    }

    #[test]
    fn test_downcast_mismatch_is_absent() {
        let erased: DynOverride = Box::new(42_u64);
        assert_eq!(downcast::<String>(erased), None);
    }

    #[test]
    fn test_erased_clone_preserves_payload() {
        let erased: DynOverride = Box::new(vec![1_i32, 2, 3]);
        let cloned = erased.clone();
        assert_eq!(downcast::<Vec<i32>>(cloned), Some(vec![1, 2, 3]));
        assert_eq!(downcast::<Vec<i32>>(erased), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_type_info_identity() {
        assert_eq!(TypeInfo::of::<String>(), TypeInfo::of::<String>());
        assert_ne!(TypeInfo::of::<String>(), TypeInfo::of::<u64>());
        assert!(TypeInfo::of::<String>().name().contains("String"));
    }
}
