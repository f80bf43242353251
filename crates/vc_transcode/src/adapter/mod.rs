//! Adapters giving heterogeneous containers a uniform shape.
//!
//! ## Menu
//!
//! - [`CollectionAdapter`]: add, iterate, reverse and materialize a collection.
//!     - [`CollectionWrapper`] and [`IndexedWrapper`] over [`Growable`] collections.
//!     - [`ArrayBuffer`] for fixed-size arrays, copied from a growable buffer.
//! - [`DictionaryAdapter`]: insert, iterate and materialize a dictionary.
//!     - [`MapWrapper`] over [`MapLike`] dictionaries.
//!     - [`ReadOnlyView`] over a [`ReadOnlyMap`], rejecting mutation.
//!     - [`ReadOnlyStaging`], the mutable staging area frozen into a [`ReadOnlyMap`].
//! - [`adapter_for`] and [`dictionary_adapter_for`]: adapter factories keyed by type information.
//! - [`growable_adapter`], [`indexed_adapter`], [`array_adapter`] and [`map_adapter`]:
//!   the constructors stored in [`CollectionInfo`] and [`DictionaryInfo`].
//!
//! [`ReadOnlyMap`]: crate::collections::ReadOnlyMap
//! [`CollectionInfo`]: crate::info::CollectionInfo
//! [`DictionaryInfo`]: crate::info::DictionaryInfo

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod dictionary;

// -----------------------------------------------------------------------------
// Exports

pub use collection::{
    ArrayBuffer, CollectionAdapter, CollectionWrapper, FromBuffer, Growable, Indexed,
    IndexedWrapper,
};
pub use dictionary::{DictionaryAdapter, MapLike, MapWrapper, ReadOnlyStaging, ReadOnlyView};

pub(crate) use collection::take_item;

use alloc::boxed::Box;

use crate::info::TypeInfo;
use crate::{ShapeError, TranscodeError};

// -----------------------------------------------------------------------------
// Adapter constructors

/// Empty adapter over a [`Growable`] collection, for [`CollectionInfo::new`].
///
/// [`CollectionInfo::new`]: crate::info::CollectionInfo::new
#[inline]
pub fn growable_adapter<C: Growable>() -> Box<dyn CollectionAdapter> {
    Box::new(CollectionWrapper::<C>::default())
}

/// Empty adapter over an [`Indexed`] collection, for [`CollectionInfo::new`].
///
/// [`CollectionInfo::new`]: crate::info::CollectionInfo::new
#[inline]
pub fn indexed_adapter<C: Indexed>() -> Box<dyn CollectionAdapter> {
    Box::new(IndexedWrapper::<C>::default())
}

/// Empty [`ArrayBuffer`] for `A`.
#[inline]
pub fn array_adapter<A: FromBuffer>() -> Box<dyn CollectionAdapter> {
    Box::new(ArrayBuffer::<A>::new())
}

/// Empty adapter over a [`MapLike`] dictionary, for [`DictionaryInfo::new`].
///
/// [`DictionaryInfo::new`]: crate::info::DictionaryInfo::new
#[inline]
pub fn map_adapter<M: MapLike>() -> Box<dyn DictionaryAdapter> {
    Box::new(MapWrapper::<M>::default())
}

// -----------------------------------------------------------------------------
// Factories

/// Resolve one level of `Option<T>`.
#[inline]
fn unwrap_nullable(info: &TypeInfo) -> &TypeInfo {
    match info {
        TypeInfo::Nullable(nullable) => nullable.inner(),
        _ => info,
    }
}

/// Create an empty collection adapter for the container type `info`.
///
/// `Option<C>` resolves to `C`. Fails with [`ShapeError::UnrecognizedShape`]
/// for non-collection types, dictionaries included.
///
/// # Examples
///
/// ```
/// use vc_transcode::Transcode;
/// use vc_transcode::adapter::adapter_for;
/// use vc_transcode::info::Typed;
///
/// let mut adapter = adapter_for(<Vec<u8>>::type_info()).unwrap();
/// adapter.add(7_u8.into_boxed_transcode()).unwrap();
///
/// let list = adapter.materialize().unwrap();
/// assert_eq!(list.take::<Vec<u8>>().unwrap(), [7]);
///
/// assert!(adapter_for(u8::type_info()).is_err());
/// ```
pub fn adapter_for(info: &TypeInfo) -> Result<Box<dyn CollectionAdapter>, TranscodeError> {
    match unwrap_nullable(info) {
        TypeInfo::Collection(collection) => Ok(collection.new_adapter()),
        _ => Err(ShapeError::UnrecognizedShape {
            ty: info.type_path(),
        }
        .into()),
    }
}

/// Create an empty dictionary adapter for the dictionary type `info`.
///
/// The adapter of a read-only dictionary rejects mutation; the reverse
/// transcoder goes through [`DictionaryInfo::new_staging_adapter`] instead.
///
/// [`DictionaryInfo::new_staging_adapter`]: crate::info::DictionaryInfo::new_staging_adapter
pub fn dictionary_adapter_for(info: &TypeInfo) -> Result<Box<dyn DictionaryAdapter>, TranscodeError> {
    match unwrap_nullable(info) {
        TypeInfo::Dictionary(dictionary) => Ok(dictionary.new_adapter()),
        _ => Err(ShapeError::UnrecognizedShape {
            ty: info.type_path(),
        }
        .into()),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{adapter_for, dictionary_adapter_for};
    use crate::collections::{ReadOnlyMap, UntypedList, UntypedMap};
    use crate::info::{CollectionShape, DictionaryShape, Typed};
    use crate::{CapabilityError, ShapeError, Transcode, TranscodeError};
    use alloc::collections::{LinkedList, VecDeque};
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn factories_follow_the_declared_shape() {
        let adapter = adapter_for(<Option<VecDeque<i32>>>::type_info()).unwrap();
        assert_eq!(adapter.shape(), CollectionShape::List);
        assert_eq!(
            adapter_for(<LinkedList<i32>>::type_info()).unwrap().shape(),
            CollectionShape::Linked
        );
        assert_eq!(
            adapter_for(UntypedList::type_info()).unwrap().shape(),
            CollectionShape::Untyped
        );
        assert_eq!(
            dictionary_adapter_for(UntypedMap::type_info()).unwrap().shape(),
            DictionaryShape::Untyped
        );
    }

    #[test]
    fn unrecognized_shapes_fail() {
        let err = adapter_for(String::type_info()).err().unwrap();
        assert!(matches!(err, TranscodeError::Shape(ShapeError::UnrecognizedShape { .. })));

        let err = dictionary_adapter_for(<Vec<i32>>::type_info()).err().unwrap();
        assert!(matches!(err, TranscodeError::Shape(ShapeError::UnrecognizedShape { .. })));
    }

    #[test]
    fn read_only_dictionary_adapter_rejects_insert() {
        let mut adapter = dictionary_adapter_for(<ReadOnlyMap<i32, i32>>::type_info()).unwrap();
        let err = adapter
            .insert(1_i32.into_boxed_transcode(), 1_i32.into_boxed_transcode())
            .unwrap_err();
        assert!(matches!(err, TranscodeError::Capability(CapabilityError::ReadOnly { .. })));
    }
}
