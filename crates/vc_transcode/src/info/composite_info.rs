use alloc::boxed::Box;

use bitflags::bitflags;

use crate::convert::Conversion;
use crate::info::{Type, TypeInfo, Typed};
use crate::Transcode;

// -----------------------------------------------------------------------------
// MemberFlags

bitflags! {
    /// Markers attached to a member.
    ///
    /// Set by `#[derive(Transcode)]` from `#[transcode(..)]` attributes and
    /// `#[deprecated]`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u8 {
        /// The member can be assigned. Fields are writable unless marked `readonly`,
        /// properties are writable when they have a setter.
        const WRITABLE = 1 << 0;
        /// `#[transcode(ignore)]`.
        const IGNORE = 1 << 1;
        /// `#[transcode(include)]`, overrides every exclusion rule.
        const INCLUDE = 1 << 2;
        /// `#[deprecated]` or `#[transcode(obsolete)]`.
        const OBSOLETE = 1 << 3;
    }
}

/// Whether a member is a stored field or an accessor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A member of a composite (or one of the two slots of a pair).
#[derive(Clone)]
pub struct MemberInfo {
    name: &'static str,
    kind: MemberKind,
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
    flags: MemberFlags,
    conversion: Option<Conversion>,
}

impl MemberInfo {
    /// Create a writable field of type `T`.
    #[inline]
    pub fn field<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            kind: MemberKind::Field,
            ty: Type::of::<T>(),
            type_info: T::type_info,
            flags: MemberFlags::WRITABLE,
            conversion: None,
        }
    }

    /// Create a property of type `T`, writable if it has a setter.
    #[inline]
    pub fn property<T: Typed>(name: &'static str, writable: bool) -> Self {
        let flags = if writable {
            MemberFlags::WRITABLE
        } else {
            MemberFlags::empty()
        };
        Self {
            name,
            kind: MemberKind::Property,
            ty: Type::of::<T>(),
            type_info: T::type_info,
            flags,
            conversion: None,
        }
    }

    /// Add markers.
    #[inline]
    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    /// Remove markers, e.g. `WRITABLE` for read-only fields.
    #[inline]
    pub fn without_flags(mut self, flags: MemberFlags) -> Self {
        self.flags.remove(flags);
        self
    }

    /// Attach a member-level conversion declaration.
    #[inline]
    pub fn with_conversion(mut self, conversion: Conversion) -> Self {
        self.conversion = Some(conversion);
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    /// The declared type of the member.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn flags(&self) -> MemberFlags {
        self.flags
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.flags.contains(MemberFlags::WRITABLE)
    }

    #[inline]
    pub const fn is_ignored(&self) -> bool {
        self.flags.contains(MemberFlags::IGNORE)
    }

    #[inline]
    pub const fn is_included(&self) -> bool {
        self.flags.contains(MemberFlags::INCLUDE)
    }

    #[inline]
    pub const fn is_obsolete(&self) -> bool {
        self.flags.contains(MemberFlags::OBSOLETE)
    }

    #[inline]
    pub fn conversion(&self) -> Option<&Conversion> {
        self.conversion.as_ref()
    }
}

impl core::fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("ty", &self.ty)
            .field("flags", &self.flags)
            .field("conversion", &self.conversion)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// CompositeInfo

/// Type information for composites, types walked member by member.
///
/// Members keep declaration order. Member indices used by
/// [`Composite`](crate::ops::Composite) refer to this order.
#[derive(Clone)]
pub struct CompositeInfo {
    ty: Type,
    members: Box<[MemberInfo]>,
    conversion: Option<Conversion>,
    default: Option<fn() -> Box<dyn Transcode>>,
}

impl CompositeInfo {
    /// Create info for the composite `T`.
    pub fn new<T: Typed>(members: impl Into<Box<[MemberInfo]>>) -> Self {
        Self {
            ty: Type::of::<T>(),
            members: members.into(),
            conversion: None,
            default: None,
        }
    }

    /// Attach a type-level conversion declaration.
    #[inline]
    pub fn with_conversion(mut self, conversion: Conversion) -> Self {
        self.conversion = Some(conversion);
        self
    }

    /// Register the default constructor used when a fresh instance is needed.
    #[inline]
    pub fn with_default(mut self, default: fn() -> Box<dyn Transcode>) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// All declared members, including ignored ones.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    #[inline]
    pub fn member_at(&self, index: usize) -> Option<&MemberInfo> {
        self.members.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|member| member.name == name)
    }

    #[inline]
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.index_of(name).map(|index| &self.members[index])
    }

    #[inline]
    pub fn conversion(&self) -> Option<&Conversion> {
        self.conversion.as_ref()
    }

    #[inline]
    pub fn is_constructible(&self) -> bool {
        self.default.is_some()
    }

    /// Build a default instance, `None` if the type has no default constructor.
    #[inline]
    pub fn new_default(&self) -> Option<Box<dyn Transcode>> {
        self.default.map(|default| default())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Transcode;
    use crate::info::{MemberFlags, MemberKind, Typed};
    use crate::ops::{Composite, TranscodeRef};
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[derive(Transcode, Default)]
    #[transcode(property(name = "area", ty = u32, get = Self::area))]
    #[transcode(property(name = "label", ty = String, get = Self::label, set = Self::set_label))]
    struct Rect {
        #[transcode(rename = "w")]
        width: u32,
        #[transcode(readonly)]
        height: u32,
        #[transcode(obsolete)]
        color: String,
    }

    impl Rect {
        fn area(&self) -> u32 {
            self.width * self.height
        }

        fn label(&self) -> String {
            format!("{}x{}", self.width, self.height)
        }

        fn set_label(&mut self, label: String) {
            self.color = label;
        }
    }

    #[derive(Transcode, Default)]
    struct Pixel(u8, u8);

    #[derive(Transcode, Default)]
    struct Wrapper<T> {
        items: Vec<T>,
    }

    #[test]
    fn derived_members() {
        let info = Rect::type_info().as_composite().unwrap();
        let names: Vec<_> = info.members().iter().map(|member| member.name()).collect();
        assert_eq!(names, ["w", "height", "color", "area", "label"]);

        assert!(!info.member("height").unwrap().is_writable());
        assert!(info.member("color").unwrap().flags().contains(MemberFlags::OBSOLETE));

        let area = info.member("area").unwrap();
        assert_eq!(area.kind(), MemberKind::Property);
        assert!(!area.is_writable());
        assert!(info.member("label").unwrap().is_writable());
        assert!(info.is_constructible());
        assert_eq!(info.index_of("label"), Some(4));
    }

    #[test]
    fn derived_member_access() {
        let mut rect = Rect {
            width: 3,
            height: 4,
            color: String::new(),
        };
        assert_eq!(rect.member_count(), 5);
        assert_eq!(rect.member(3).unwrap().downcast_ref::<u32>(), Some(&12));
        assert!(rect.member(5).is_none());

        // read-only fields and properties have no mutable access
        assert!(rect.member_mut(0).is_some());
        assert!(rect.member_mut(1).is_none());
        assert!(rect.member_mut(3).is_none());

        rect.set_member(0, 5_u32.into_boxed_transcode()).unwrap();
        assert!(rect.set_member(1, 5_u32.into_boxed_transcode()).is_err());
        assert!(rect.set_member(3, 5_u32.into_boxed_transcode()).is_err());
        rect.set_member(4, String::from("wide").into_boxed_transcode()).unwrap();
        assert!(rect.set_member(0, 5_i64.into_boxed_transcode()).is_err());
        assert_eq!((rect.width, rect.height, rect.color.as_str()), (5, 4, "wide"));
    }

    #[test]
    fn tuple_and_generic_structs() {
        let info = Pixel::type_info().as_composite().unwrap();
        assert_eq!(info.member_at(1).unwrap().name(), "1");
        assert_eq!(format!("{:?}", Pixel(1, 2).as_transcode()), "Pixel(1, 2)");

        let a = <Wrapper<u8>>::type_info();
        let b = <Wrapper<i64>>::type_info();
        assert!(a.ty().is::<Wrapper<u8>>());
        assert!(b.ty().is::<Wrapper<i64>>());
        let item = b.as_composite().unwrap().member("items").unwrap();
        assert!(item.type_info().ty().is::<Vec<i64>>());

        let wrapper = Wrapper { items: Vec::from([1_u8]) };
        assert!(matches!(wrapper.transcode_ref(), TranscodeRef::Composite(_)));
    }
}
