use alloc::boxed::Box;

use crate::adapter::{CollectionAdapter, DictionaryAdapter};
use crate::info::{Capabilities, Type, TypeInfo, Typed};
use crate::Transcode;

// -----------------------------------------------------------------------------
// NullableInfo

/// Type information for `Option<T>`.
#[derive(Clone)]
pub struct NullableInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
    none: fn() -> Box<dyn Transcode>,
    some: fn(Box<dyn Transcode>) -> Result<Box<dyn Transcode>, Box<dyn Transcode>>,
}

impl NullableInfo {
    /// Create info for the nullable type `N` wrapping `T`.
    ///
    /// `none` builds the empty value; `some` wraps a boxed `T`, returning the
    /// input unchanged if it is not a `T`.
    pub fn new<N: Typed, T: Typed>(
        none: fn() -> Box<dyn Transcode>,
        some: fn(Box<dyn Transcode>) -> Result<Box<dyn Transcode>, Box<dyn Transcode>>,
    ) -> Self {
        Self {
            ty: Type::of::<N>(),
            inner: T::type_info,
            none,
            some,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The wrapped type.
    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// Build the empty value.
    #[inline]
    pub fn none(&self) -> Box<dyn Transcode> {
        (self.none)()
    }

    /// Wrap a value of the inner type.
    #[inline]
    pub fn some(&self, value: Box<dyn Transcode>) -> Result<Box<dyn Transcode>, Box<dyn Transcode>> {
        (self.some)(value)
    }
}

// -----------------------------------------------------------------------------
// CollectionShape

/// The constructible collection shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionShape {
    /// `[T; N]`, `Box<[T]>`: built through a growable buffer, then copied.
    Array,
    /// `Vec<T>`, `VecDeque<T>`.
    List,
    /// `HashSet<T>`, `BTreeSet<T>`.
    Set,
    /// `LinkedList<T>`.
    Linked,
    /// [`Stack<T>`](crate::collections::Stack), iterated in pop order.
    Stack,
    /// [`UntypedList`](crate::collections::UntypedList).
    Untyped,
}

impl CollectionShape {
    /// Whether the shape supports index-based access.
    #[inline]
    pub const fn is_indexable(self) -> bool {
        matches!(self, Self::Array | Self::List | Self::Untyped)
    }

    /// Whether iteration order is the reverse of insertion order.
    #[inline]
    pub const fn is_lifo(self) -> bool {
        matches!(self, Self::Stack)
    }

    pub(crate) const fn capabilities(self) -> Capabilities {
        let mut caps = Capabilities::ITERABLE;
        if self.is_indexable() {
            caps = caps.union(Capabilities::INDEXABLE);
        }
        if self.is_lifo() {
            caps = caps.union(Capabilities::LIFO);
        }
        if matches!(self, Self::Untyped) {
            caps = caps.union(Capabilities::UNTYPED);
        }
        caps
    }
}

// -----------------------------------------------------------------------------
// CollectionInfo

/// Type information for collections.
#[derive(Clone)]
pub struct CollectionInfo {
    ty: Type,
    shape: CollectionShape,
    item: fn() -> &'static TypeInfo,
    adapter: fn() -> Box<dyn CollectionAdapter>,
}

impl CollectionInfo {
    /// Create info for collection `C` with items of type `T`.
    ///
    /// `adapter` builds an empty adapter whose [`materialize`] returns a `C`.
    ///
    /// [`materialize`]: CollectionAdapter::materialize
    pub fn new<C: Typed, T: Typed>(
        shape: CollectionShape,
        adapter: fn() -> Box<dyn CollectionAdapter>,
    ) -> Self {
        Self {
            ty: Type::of::<C>(),
            shape,
            item: T::type_info,
            adapter,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn shape(&self) -> CollectionShape {
        self.shape
    }

    /// The element type.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item)()
    }

    /// Create an empty adapter for this collection type.
    #[inline]
    pub fn new_adapter(&self) -> Box<dyn CollectionAdapter> {
        (self.adapter)()
    }
}

// -----------------------------------------------------------------------------
// DictionaryShape

/// The constructible dictionary shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictionaryShape {
    /// `HashMap<K, V>`.
    Map,
    /// `BTreeMap<K, V>`.
    OrderedMap,
    /// [`ReadOnlyMap<K, V>`](crate::collections::ReadOnlyMap).
    ReadOnly,
    /// [`UntypedMap`](crate::collections::UntypedMap).
    Untyped,
}

impl DictionaryShape {
    #[inline]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::ReadOnly)
    }

    pub(crate) const fn capabilities(self) -> Capabilities {
        let caps = Capabilities::ITERABLE.union(Capabilities::ASSOCIATIVE);
        match self {
            Self::ReadOnly => caps.union(Capabilities::READ_ONLY),
            Self::Untyped => caps.union(Capabilities::UNTYPED),
            Self::Map | Self::OrderedMap => caps,
        }
    }
}

// -----------------------------------------------------------------------------
// DictionaryInfo

/// Type information for dictionaries.
#[derive(Clone)]
pub struct DictionaryInfo {
    ty: Type,
    shape: DictionaryShape,
    key: fn() -> &'static TypeInfo,
    value: fn() -> &'static TypeInfo,
    pair: fn() -> &'static TypeInfo,
    adapter: fn() -> Box<dyn DictionaryAdapter>,
    staging: Option<fn() -> Box<dyn DictionaryAdapter>>,
}

impl DictionaryInfo {
    /// Create info for map `M` with keys `K`, values `V`, enumerated as pairs `P`.
    pub fn new<M: Typed, K: Typed, V: Typed, P: Typed>(
        shape: DictionaryShape,
        adapter: fn() -> Box<dyn DictionaryAdapter>,
    ) -> Self {
        Self {
            ty: Type::of::<M>(),
            shape,
            key: K::type_info,
            value: V::type_info,
            pair: P::type_info,
            adapter,
            staging: None,
        }
    }

    /// Register a mutable adapter used to rebuild a read-only dictionary.
    ///
    /// Its [`materialize`](DictionaryAdapter::materialize) must return `M`.
    #[inline]
    pub fn with_staging(mut self, staging: fn() -> Box<dyn DictionaryAdapter>) -> Self {
        self.staging = Some(staging);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn shape(&self) -> DictionaryShape {
        self.shape
    }

    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key)()
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value)()
    }

    /// The pair type the dictionary is enumerated as.
    #[inline]
    pub fn pair_info(&self) -> &'static TypeInfo {
        (self.pair)()
    }

    /// Create an empty adapter that materializes this dictionary type.
    #[inline]
    pub fn new_adapter(&self) -> Box<dyn DictionaryAdapter> {
        (self.adapter)()
    }

    /// Create an adapter accepting insertions.
    ///
    /// Same as [`new_adapter`](Self::new_adapter) unless a staging adapter
    /// was registered.
    #[inline]
    pub fn new_staging_adapter(&self) -> Box<dyn DictionaryAdapter> {
        match self.staging {
            Some(staging) => staging(),
            None => (self.adapter)(),
        }
    }
}
