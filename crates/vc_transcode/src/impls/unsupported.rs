//! Types that may be declared as members but cannot be transcoded.
//!
//! They are opaque, and the [`MetadataCache`](crate::cache::MetadataCache)
//! rejects any composite enumerating a member of one of these types.

use core::any::TypeId;
use std::sync::{Mutex, OnceLock, RwLock};
use std::time::Instant;

use crate::Transcode;
use crate::info::{GenericTypeInfoCell, NonGenericTypeInfoCell, OpaqueInfo, Type, TypeInfo, Typed};
use crate::transcode::impl_transcode_cast_fn;

macro_rules! impl_opaque {
    ($($ty:ty),*) => {$(
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl Transcode for $ty {
            impl_transcode_cast_fn!(Opaque);
        }
    )*};
}

impl_opaque!(Instant, TypeId);

/// The definition is pinned, the standard library moves these types
/// between internal modules.
macro_rules! impl_opaque_generic {
    ($($ty:ident => $definition:literal),*) => {$(
        impl<T: Send + Sync + 'static> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let ty = Type::of::<Self>().with_definition($definition);
                    TypeInfo::Opaque(OpaqueInfo::new::<Self>().with_type(ty))
                })
            }
        }

        impl<T: Send + Sync + 'static> Transcode for $ty<T> {
            impl_transcode_cast_fn!(Opaque);
        }
    )*};
}

impl_opaque_generic!(
    Mutex => "std::sync::Mutex",
    RwLock => "std::sync::RwLock",
    OnceLock => "std::sync::OnceLock"
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::{TypeClass, Typed, classify};
    use std::sync::Mutex;

    #[test]
    fn pinned_definitions() {
        let info = <Mutex<u32>>::type_info();
        assert!(info.as_opaque().is_some());
        assert_eq!(info.ty().definition(), "std::sync::Mutex");
        assert_eq!(info.ty().ident(), "Mutex");
        assert_eq!(classify(info), TypeClass::Composite);
    }
}
