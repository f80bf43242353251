use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::adapter::{FromBuffer, array_adapter};
use crate::impls::collection_debug;
use crate::info::{CollectionInfo, CollectionShape, GenericTypeInfoCell, TypeInfo, Typed};
use crate::ops::Collection;
use crate::transcode::impl_transcode_cast_fn;
use crate::{ShapeError, Transcode, TranscodeError};

// -----------------------------------------------------------------------------
// [T; N]

impl<T: Transcode + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Collection(CollectionInfo::new::<Self, T>(
                CollectionShape::Array,
                array_adapter::<Self>,
            ))
        })
    }
}

impl<T: Transcode + Typed, const N: usize> Transcode for [T; N] {
    impl_transcode_cast_fn!(Collection);

    #[inline]
    fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        collection_debug(self, f)
    }
}

impl<T: Transcode + Typed, const N: usize> Collection for [T; N] {
    #[inline]
    fn count(&self) -> usize {
        N
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_> {
        Box::new(self.iter().map(Transcode::as_transcode))
    }
}

impl<T: Transcode + Typed, const N: usize> FromBuffer for [T; N] {
    type Item = T;

    fn from_buffer(items: Vec<T>) -> Result<Self, TranscodeError> {
        Self::try_from(items).map_err(|items| {
            ShapeError::LengthMismatch {
                ty: Self::type_info().type_path(),
                expected: N,
                found: items.len(),
            }
            .into()
        })
    }
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: Transcode + Typed> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Collection(CollectionInfo::new::<Self, T>(
                CollectionShape::Array,
                array_adapter::<Self>,
            ))
        })
    }
}

impl<T: Transcode + Typed> Transcode for Box<[T]> {
    impl_transcode_cast_fn!(Collection);

    #[inline]
    fn transcode_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        collection_debug(self, f)
    }
}

impl<T: Transcode + Typed> Collection for Box<[T]> {
    #[inline]
    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_> {
        Box::new(self.iter().map(Transcode::as_transcode))
    }
}

impl<T: Transcode + Typed> FromBuffer for Box<[T]> {
    type Item = T;

    #[inline]
    fn from_buffer(items: Vec<T>) -> Result<Self, TranscodeError> {
        Ok(items.into_boxed_slice())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Transcode;
    use crate::adapter::adapter_for;
    use crate::info::{CollectionShape, Typed};
    use alloc::boxed::Box;

    #[test]
    fn boxed_slices_take_any_length() {
        let mut adapter = adapter_for(<Box<[u16]>>::type_info()).unwrap();
        assert_eq!(adapter.shape(), CollectionShape::Array);
        adapter.add(1_u16.into_boxed_transcode()).unwrap();
        adapter.add(2_u16.into_boxed_transcode()).unwrap();
        adapter.insert_at(0, 0_u16.into_boxed_transcode()).unwrap();

        let slice = adapter.materialize().unwrap().take::<Box<[u16]>>().unwrap();
        assert_eq!(&*slice, [0, 1, 2]);
    }

    #[test]
    fn arrays_report_their_length() {
        let array = [1_i8, 2, 3, 4];
        let crate::ops::TranscodeRef::Collection(collection) = array.transcode_ref() else {
            panic!("arrays should be collections");
        };
        assert_eq!(collection.count(), 4);
    }
}
