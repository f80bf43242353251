use core::any::TypeId;
use core::fmt;

use crate::convert::Conversion;
use crate::info::{AtomicInfo, Capabilities, CollectionInfo, CompositeInfo, DictionaryInfo};
use crate::info::{NullableInfo, PairInfo, PairKind, Type, Typed};

// -----------------------------------------------------------------------------
// AbstractInfo

/// Type information for [`AnyValue`](crate::collections::AnyValue).
///
/// The declared type says nothing about the shape, the concrete type is
/// read from the runtime value when transcoding forward, and inferred from
/// the representation when transcoding back.
#[derive(Debug, Clone)]
pub struct AbstractInfo {
    ty: Type,
}

impl AbstractInfo {
    #[inline]
    pub fn new<T: Typed>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Type information for types outside the conversion taxonomy.
///
/// Event handlers and the not-supported types are opaque. They can be
/// declared as members, but the metadata cache either filters them out or
/// rejects them.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
    capabilities: Capabilities,
}

impl OpaqueInfo {
    #[inline]
    pub fn new<T: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            capabilities: Capabilities::empty(),
        }
    }

    /// Report extra capabilities, e.g. [`Capabilities::EVENT`].
    #[inline]
    pub const fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Replace the [`Type`], used to pin a stable generic definition.
    #[inline]
    pub const fn with_type(mut self, ty: Type) -> Self {
        self.ty = ty;
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information, one variant per shape known to the transcoders.
///
/// Obtained through [`Typed::type_info`] or
/// [`DynamicTyped::dyn_type_info`](crate::info::DynamicTyped::dyn_type_info).
/// Every value is `'static` and built once per type.
#[derive(Clone)]
pub enum TypeInfo {
    Atomic(AtomicInfo),
    Nullable(NullableInfo),
    Collection(CollectionInfo),
    Dictionary(DictionaryInfo),
    Pair(PairInfo),
    Composite(CompositeInfo),
    Abstract(AbstractInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the inner [`", stringify!($info), "`] if this is the `", stringify!($kind), "` variant.")]
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match self {
                Self::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_atomic: Atomic => AtomicInfo);
    impl_cast_method!(as_nullable: Nullable => NullableInfo);
    impl_cast_method!(as_collection: Collection => CollectionInfo);
    impl_cast_method!(as_dictionary: Dictionary => DictionaryInfo);
    impl_cast_method!(as_pair: Pair => PairInfo);
    impl_cast_method!(as_composite: Composite => CompositeInfo);
    impl_cast_method!(as_abstract: Abstract => AbstractInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Atomic(info) => info.ty(),
            Self::Nullable(info) => info.ty(),
            Self::Collection(info) => info.ty(),
            Self::Dictionary(info) => info.ty(),
            Self::Pair(info) => info.ty(),
            Self::Composite(info) => info.ty(),
            Self::Abstract(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Check if this is the info of `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.ty().is::<T>()
    }

    /// The capability set reported by this type.
    ///
    /// A nullable wrapper reports `NULLABLE` on top of its inner type's
    /// capabilities, so `Option<Vec<T>>` is iterable.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Atomic(_) => Capabilities::SIMPLE,
            Self::Nullable(info) => Capabilities::NULLABLE | info.inner().capabilities(),
            Self::Collection(info) => info.shape().capabilities(),
            Self::Dictionary(info) => info.shape().capabilities(),
            Self::Pair(info) => match info.kind() {
                PairKind::KeyValue => Capabilities::PAIR,
                PairKind::Entry => Capabilities::PAIR | Capabilities::ENTRY,
            },
            Self::Composite(_) => Capabilities::empty(),
            Self::Abstract(_) => Capabilities::ABSTRACT,
            Self::Opaque(info) => info.capabilities(),
        }
    }

    /// The type-level conversion declaration attached to the type itself.
    ///
    /// Declarations registered at runtime are only visible through the
    /// [`MetadataCache`](crate::cache::MetadataCache).
    pub fn conversion(&self) -> Option<&Conversion> {
        match self {
            Self::Atomic(info) => info.conversion(),
            Self::Composite(info) => info.conversion(),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Atomic(_) => "Atomic",
            Self::Nullable(_) => "Nullable",
            Self::Collection(_) => "Collection",
            Self::Dictionary(_) => "Dictionary",
            Self::Pair(_) => "Pair",
            Self::Composite(_) => "Composite",
            Self::Abstract(_) => "Abstract",
            Self::Opaque(_) => "Opaque",
        };
        f.debug_tuple(variant).field(self.ty()).finish()
    }
}
