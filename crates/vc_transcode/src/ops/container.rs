use alloc::boxed::Box;

use crate::Transcode;

// -----------------------------------------------------------------------------
// Nullable

/// A value that may be absent, `Option<T>`.
pub trait Nullable: Transcode {
    fn get(&self) -> Option<&dyn Transcode>;

    fn get_mut(&mut self) -> Option<&mut dyn Transcode>;

    /// Set the value to absent.
    fn clear(&mut self);
}

// -----------------------------------------------------------------------------
// Collection

/// Homogeneous iteration over elements.
pub trait Collection: Transcode {
    fn count(&self) -> usize;

    /// Iterate the elements in the container's natural order.
    ///
    /// For LIFO shapes this is pop order, the most recently pushed element first.
    fn items(&self) -> Box<dyn Iterator<Item = &dyn Transcode> + '_>;
}

// -----------------------------------------------------------------------------
// Dictionary

/// Key/value enumeration.
pub trait Dictionary: Transcode {
    fn count(&self) -> usize;

    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Transcode, &dyn Transcode)> + '_>;
}

// -----------------------------------------------------------------------------
// Pair

/// The two slots of a key/value pair.
pub trait Pair: Transcode {
    fn key(&self) -> &dyn Transcode;

    fn value(&self) -> &dyn Transcode;
}
