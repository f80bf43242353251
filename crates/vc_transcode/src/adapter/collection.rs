use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::{CollectionShape, TypeInfo, Typed};
use crate::{CapabilityError, Transcode, TranscodeError};

// -----------------------------------------------------------------------------
// CollectionAdapter

/// Uniform add/iterate/materialize access to a concrete collection shape.
///
/// An adapter is transient: the reverse transcoder creates one per
/// collection, fills it, then [`materialize`](Self::materialize)s it into the
/// declared collection type.
///
/// Index-based operations fail with [`CapabilityError::NotIndexable`] unless
/// the wrapped shape supports them.
pub trait CollectionAdapter: Send {
    /// The shape of the materialized collection.
    fn shape(&self) -> CollectionShape;

    /// The type [`materialize`](Self::materialize) returns.
    fn collection_info(&self) -> &'static TypeInfo;

    /// The element type accepted by [`add`](Self::add).
    fn item_info(&self) -> &'static TypeInfo;

    /// Append an element. Fails if it is not of the element type.
    fn add(&mut self, item: Box<dyn Transcode>) -> Result<(), TranscodeError>;

    fn count(&self) -> usize;

    /// Iterate the elements, in the iteration order of the materialized
    /// collection (pop order for stacks).
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_>;

    /// Reverse the stored elements, once, before materializing a stack.
    fn reverse(&mut self);

    fn clear(&mut self);

    /// Element at `index`.
    fn get(&self, index: usize) -> Result<&dyn Transcode, TranscodeError> {
        let _ = index;
        Err(not_indexable(self.collection_info(), "get"))
    }

    /// Insert an element at `index`, shifting the following ones.
    fn insert_at(&mut self, index: usize, item: Box<dyn Transcode>) -> Result<(), TranscodeError> {
        let _ = (index, item);
        Err(not_indexable(self.collection_info(), "insert_at"))
    }

    /// Remove and return the element at `index`.
    fn remove_at(&mut self, index: usize) -> Result<Box<dyn Transcode>, TranscodeError> {
        let _ = index;
        Err(not_indexable(self.collection_info(), "remove_at"))
    }

    /// Consume the adapter and return the collection in its declared shape.
    fn materialize(self: Box<Self>) -> Result<Box<dyn Transcode>, TranscodeError>;
}

#[inline]
fn not_indexable(info: &TypeInfo, operation: &'static str) -> TranscodeError {
    CapabilityError::NotIndexable {
        ty: info.type_path(),
        operation,
    }
    .into()
}

/// Take a boxed element as `T`, reporting the found type on mismatch.
pub(crate) fn take_item<T: Typed>(item: Box<dyn Transcode>) -> Result<T, TranscodeError> {
    item.take::<T>().map_err(|item| {
        TranscodeError::mismatched(T::type_info().type_path(), item.dyn_type_info().type_path())
    })
}

#[inline]
fn check_bounds(index: usize, len: usize) -> Result<(), TranscodeError> {
    if index < len {
        Ok(())
    } else {
        Err(CapabilityError::OutOfBounds { index, len }.into())
    }
}

// -----------------------------------------------------------------------------
// Growable

/// A collection that can be built element by element.
///
/// Implemented for every built-in collection except fixed-size arrays,
/// which go through [`FromBuffer`].
pub trait Growable: Transcode + Typed + Default {
    const SHAPE: CollectionShape;

    type Item: Transcode + Typed;

    fn push_item(&mut self, item: Self::Item);

    fn item_count(&self) -> usize;

    fn iter_items(&self) -> Box<dyn Iterator<Item = &Self::Item> + '_>;

    fn reverse_items(&mut self);

    fn clear_items(&mut self);
}

/// A [`Growable`] collection with index-based access.
pub trait Indexed: Growable {
    fn get_item(&self, index: usize) -> Option<&Self::Item>;

    /// Insert at `index`. Callers guarantee `index <= item_count()`.
    fn insert_item(&mut self, index: usize, item: Self::Item);

    fn remove_item(&mut self, index: usize) -> Option<Self::Item>;
}

/// Methods shared by [`CollectionWrapper`] and [`IndexedWrapper`].
macro_rules! impl_growable_adapter {
    () => {
        #[inline]
        fn shape(&self) -> CollectionShape {
            C::SHAPE
        }

        #[inline]
        fn collection_info(&self) -> &'static TypeInfo {
            C::type_info()
        }

        #[inline]
        fn item_info(&self) -> &'static TypeInfo {
            <C::Item as Typed>::type_info()
        }

        fn add(&mut self, item: Box<dyn Transcode>) -> Result<(), TranscodeError> {
            self.inner.push_item(take_item::<C::Item>(item)?);
            Ok(())
        }

        #[inline]
        fn count(&self) -> usize {
            self.inner.item_count()
        }

        fn iter(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_> {
            Box::new(self.inner.iter_items().map(|item| item as &dyn Transcode))
        }

        #[inline]
        fn reverse(&mut self) {
            self.inner.reverse_items();
        }

        #[inline]
        fn clear(&mut self) {
            self.inner.clear_items();
        }

        #[inline]
        fn materialize(self: Box<Self>) -> Result<Box<dyn Transcode>, TranscodeError> {
            Ok(Box::new(self.inner))
        }
    };
}

// -----------------------------------------------------------------------------
// CollectionWrapper

/// Adapter over a [`Growable`] collection without index access.
#[derive(Debug, Default)]
pub struct CollectionWrapper<C> {
    inner: C,
}

impl<C: Growable> CollectionWrapper<C> {
    /// Wrap an existing collection.
    #[inline]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Growable> CollectionAdapter for CollectionWrapper<C> {
    impl_growable_adapter!();
}

// -----------------------------------------------------------------------------
// IndexedWrapper

/// Adapter over an [`Indexed`] collection.
#[derive(Debug, Default)]
pub struct IndexedWrapper<C> {
    inner: C,
}

impl<C: Indexed> IndexedWrapper<C> {
    /// Wrap an existing collection.
    #[inline]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Indexed> CollectionAdapter for IndexedWrapper<C> {
    impl_growable_adapter!();

    fn get(&self, index: usize) -> Result<&dyn Transcode, TranscodeError> {
        let len = self.inner.item_count();
        match self.inner.get_item(index) {
            Some(item) => Ok(item as &dyn Transcode),
            None => Err(CapabilityError::OutOfBounds { index, len }.into()),
        }
    }

    fn insert_at(&mut self, index: usize, item: Box<dyn Transcode>) -> Result<(), TranscodeError> {
        check_bounds(index, self.inner.item_count() + 1)?;
        let item = take_item::<C::Item>(item)?;
        self.inner.insert_item(index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<Box<dyn Transcode>, TranscodeError> {
        let len = self.inner.item_count();
        match self.inner.remove_item(index) {
            Some(item) => Ok(Box::new(item)),
            None => Err(CapabilityError::OutOfBounds { index, len }.into()),
        }
    }
}

// -----------------------------------------------------------------------------
// ArrayBuffer

/// A fixed-shape collection built from a complete buffer of elements.
pub trait FromBuffer: Transcode + Typed {
    type Item: Transcode + Typed;

    /// Build the collection, failing with [`ShapeError::LengthMismatch`]
    /// if its length is fixed and differs.
    ///
    /// [`ShapeError::LengthMismatch`]: crate::ShapeError::LengthMismatch
    fn from_buffer(items: Vec<Self::Item>) -> Result<Self, TranscodeError>
    where
        Self: Sized;
}

/// Adapter collecting elements in a growable buffer, copied into the
/// array-shaped `A` on materialization.
pub struct ArrayBuffer<A: FromBuffer> {
    items: Vec<A::Item>,
}

impl<A: FromBuffer> ArrayBuffer<A> {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }
}

impl<A: FromBuffer> Default for ArrayBuffer<A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<A: FromBuffer> CollectionAdapter for ArrayBuffer<A> {
    #[inline]
    fn shape(&self) -> CollectionShape {
        CollectionShape::Array
    }

    #[inline]
    fn collection_info(&self) -> &'static TypeInfo {
        A::type_info()
    }

    #[inline]
    fn item_info(&self) -> &'static TypeInfo {
        <A::Item as Typed>::type_info()
    }

    fn add(&mut self, item: Box<dyn Transcode>) -> Result<(), TranscodeError> {
        self.items.push(take_item::<A::Item>(item)?);
        Ok(())
    }

    #[inline]
    fn count(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_> {
        Box::new(self.items.iter().map(|item| item as &dyn Transcode))
    }

    #[inline]
    fn reverse(&mut self) {
        self.items.reverse();
    }

    #[inline]
    fn clear(&mut self) {
        self.items.clear();
    }

    fn get(&self, index: usize) -> Result<&dyn Transcode, TranscodeError> {
        check_bounds(index, self.items.len())?;
        Ok(&self.items[index] as &dyn Transcode)
    }

    fn insert_at(&mut self, index: usize, item: Box<dyn Transcode>) -> Result<(), TranscodeError> {
        check_bounds(index, self.items.len() + 1)?;
        let item = take_item::<A::Item>(item)?;
        self.items.insert(index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<Box<dyn Transcode>, TranscodeError> {
        check_bounds(index, self.items.len())?;
        Ok(Box::new(self.items.remove(index)))
    }

    fn materialize(self: Box<Self>) -> Result<Box<dyn Transcode>, TranscodeError> {
        let array = A::from_buffer(self.items)?;
        Ok(Box::new(array))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{ArrayBuffer, CollectionAdapter, CollectionWrapper, IndexedWrapper};
    use crate::collections::Stack;
    use crate::info::CollectionShape;
    use crate::{CapabilityError, ShapeError, Transcode, TranscodeError};
    use alloc::boxed::Box;
    use alloc::collections::BTreeSet;
    use alloc::vec;
    use alloc::vec::Vec;

    fn boxed(n: i32) -> Box<dyn Transcode> {
        n.into_boxed_transcode()
    }

    #[test]
    fn list_supports_index_access() {
        let mut adapter = IndexedWrapper::<Vec<i32>>::default();
        assert_eq!(adapter.shape(), CollectionShape::List);
        adapter.add(boxed(1)).unwrap();
        adapter.add(boxed(3)).unwrap();
        adapter.insert_at(1, boxed(2)).unwrap();
        assert_eq!(adapter.get(1).unwrap().downcast_ref::<i32>(), Some(&2));
        assert_eq!(adapter.remove_at(0).unwrap().take::<i32>().unwrap(), 1);

        let err = adapter.get(7).unwrap_err();
        assert_eq!(
            err,
            TranscodeError::Capability(CapabilityError::OutOfBounds { index: 7, len: 2 })
        );

        let list = Box::new(adapter).materialize().unwrap().take::<Vec<i32>>().unwrap();
        assert_eq!(list, vec![2, 3]);
    }

    #[test]
    fn sets_reject_index_access() {
        let mut adapter = CollectionWrapper::<BTreeSet<i32>>::default();
        adapter.add(boxed(4)).unwrap();

        assert!(matches!(
            adapter.get(0),
            Err(TranscodeError::Capability(CapabilityError::NotIndexable { operation: "get", .. }))
        ));
        assert!(matches!(
            adapter.insert_at(0, boxed(1)),
            Err(TranscodeError::Capability(CapabilityError::NotIndexable { .. }))
        ));
        assert!(matches!(
            adapter.remove_at(0),
            Err(TranscodeError::Capability(CapabilityError::NotIndexable { .. }))
        ));
        assert_eq!(adapter.count(), 1);
    }

    #[test]
    fn rejects_foreign_elements() {
        let mut adapter = IndexedWrapper::<Vec<i32>>::default();
        let err = adapter.add(1_u8.into_boxed_transcode()).unwrap_err();
        assert!(matches!(err, TranscodeError::Shape(ShapeError::MismatchedTypes { .. })));
        assert_eq!(adapter.count(), 0);
    }

    #[test]
    fn stack_reversal_restores_pop_order() {
        let mut adapter = CollectionWrapper::<Stack<i32>>::default();
        assert_eq!(adapter.shape(), CollectionShape::Stack);
        // Elements arrive in pop order, as stored by the forward pass.
        for n in [3, 2, 1] {
            adapter.add(boxed(n)).unwrap();
        }
        adapter.reverse();

        let mut stack = Box::new(adapter).materialize().unwrap().take::<Stack<i32>>().unwrap();
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
    }

    #[test]
    fn arrays_copy_from_the_buffer() {
        let mut adapter = ArrayBuffer::<[i32; 3]>::new();
        for n in [1, 2, 3] {
            adapter.add(boxed(n)).unwrap();
        }
        assert_eq!(adapter.get(2).unwrap().downcast_ref::<i32>(), Some(&3));
        let array = Box::new(adapter).materialize().unwrap().take::<[i32; 3]>().unwrap();
        assert_eq!(array, [1, 2, 3]);

        let mut short = ArrayBuffer::<[i32; 3]>::new();
        short.add(boxed(1)).unwrap();
        let err = Box::new(short).materialize().unwrap_err();
        assert!(matches!(
            err,
            TranscodeError::Shape(ShapeError::LengthMismatch { expected: 3, found: 1, .. })
        ));
    }
}
