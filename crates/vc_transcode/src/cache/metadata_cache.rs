use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use crate::ConfigError;
use crate::cache::MemberDescriptor;
use crate::convert::{Conversion, Converter};
use crate::info::{Capabilities, MemberInfo, TypeInfo};
use crate::type_map::TypeIdMap;

// -----------------------------------------------------------------------------
// Not-supported lists

/// Definitions of generic types that cannot be transcoded, whatever the arguments.
const NOT_SUPPORTED_DEFINITIONS: &[&str] = &[
    "std::sync::Mutex",
    "std::sync::RwLock",
    "std::sync::OnceLock",
];

fn is_not_supported(info: &TypeInfo) -> bool {
    let info = match info {
        TypeInfo::Nullable(nullable) => nullable.inner(),
        _ => info,
    };
    let type_id = info.type_id();
    type_id == TypeId::of::<Instant>()
        || type_id == TypeId::of::<TypeId>()
        || NOT_SUPPORTED_DEFINITIONS.contains(&info.ty().definition())
}

/// Whether the selection rules enumerate `member`.
fn is_selected(member: &MemberInfo) -> bool {
    if member.is_included() {
        return true;
    }
    member.is_writable()
        && !member.is_ignored()
        && !member.is_obsolete()
        && !member.type_info().capabilities().contains(Capabilities::EVENT)
}

fn check_member(owner: &'static TypeInfo, member: &MemberInfo) -> Result<(), ConfigError> {
    let member_info = member.type_info();
    if is_not_supported(member_info) {
        return Err(ConfigError::NotSupported {
            ty: owner.type_path(),
            member: member.name(),
            member_ty: member_info.type_path(),
        });
    }
    if let Some(conversion) = member.conversion() {
        let expected = conversion.original_info().type_id();
        let fits = expected == member_info.type_id()
            || member_info
                .as_nullable()
                .is_some_and(|nullable| nullable.inner().type_id() == expected);
        if !fits {
            return Err(ConfigError::ConverterMismatch {
                ty: owner.type_path(),
                member: member.name(),
                expected: conversion.original_info().type_path(),
                found: member_info.type_path(),
            });
        }
    }
    Ok(())
}

fn build_members(info: &'static TypeInfo) -> Result<&'static [MemberDescriptor], ConfigError> {
    let members: Vec<MemberDescriptor> = match info {
        TypeInfo::Composite(composite) => {
            let mut members = Vec::with_capacity(composite.members().len());
            for (index, member) in composite.members().iter().enumerate() {
                if !is_selected(member) {
                    log::trace!("`{}::{}` is left out", info.type_path(), member.name());
                    continue;
                }
                check_member(info, member)?;
                members.push(MemberDescriptor::new(index, member, info));
            }
            members
        }
        TypeInfo::Pair(pair) => {
            for member in pair.members() {
                check_member(info, member)?;
            }
            pair.members()
                .iter()
                .enumerate()
                .map(|(index, member)| MemberDescriptor::new(index, member, info))
                .collect()
        }
        _ => {
            return Err(ConfigError::NotComposite {
                ty: info.type_path(),
            });
        }
    };

    log::debug!("cached {} members of `{}`", members.len(), info.type_path());
    Ok(Box::leak(members.into_boxed_slice()))
}

// -----------------------------------------------------------------------------
// MetadataCache

/// Lazily computed, never evicted, per-type metadata.
///
/// Every lookup takes the read lock first and the write lock only on a
/// miss. When two threads race on the same type the first insertion wins.
/// Entries are leaked, so the returned references are `'static`.
///
/// # Examples
///
/// ```
/// use vc_transcode::Transcode;
/// use vc_transcode::cache::MetadataCache;
/// use vc_transcode::info::Typed;
///
/// #[derive(Transcode, Default)]
/// struct Account {
///     id: u64,
///     #[transcode(ignore)]
///     session: String,
///     #[transcode(readonly)]
///     created: String,
/// }
///
/// let cache = MetadataCache::new();
/// let members = cache.members_for(Account::type_info()).unwrap();
/// assert_eq!(members.len(), 1);
/// assert_eq!(members[0].name(), "id");
/// assert!(cache.is_ignored(Account::type_info(), "session"));
/// ```
pub struct MetadataCache {
    members: RwLock<TypeIdMap<Result<&'static [MemberDescriptor], ConfigError>>>,
    declared: RwLock<TypeIdMap<&'static Conversion>>,
    resolved: RwLock<TypeIdMap<Option<&'static Conversion>>>,
}

#[inline]
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

#[inline]
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl MetadataCache {
    /// Create an empty cache.
    ///
    /// Unlike [`global`](Self::global), a new cache does not see the
    /// conversions declared with `register_conversion!`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            members: RwLock::new(TypeIdMap::new()),
            declared: RwLock::new(TypeIdMap::new()),
            resolved: RwLock::new(TypeIdMap::new()),
        }
    }

    /// The process-wide cache.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<MetadataCache> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let cache = Self::new();
            #[cfg(feature = "auto_register")]
            for conversion in crate::convert::registered() {
                if let Err(err) = cache.declare(conversion) {
                    log::warn!("ignored registered conversion: {err}");
                }
            }
            cache
        })
    }

    /// The members of a composite or pair selected for transcoding, in
    /// declaration order.
    ///
    /// Fails with [`ConfigError::NotComposite`] for other shapes. The outcome
    /// is cached, including failures.
    pub fn members_for(
        &self,
        info: &'static TypeInfo,
    ) -> Result<&'static [MemberDescriptor], ConfigError> {
        let type_id = info.type_id();
        if let Some(members) = read(&self.members).get(&type_id) {
            return members.clone();
        }
        write(&self.members)
            .get_or_insert_with(type_id, || build_members(info))
            .clone()
    }

    /// Whether the member `name` is declared by `info` but left out by the
    /// selection rules.
    ///
    /// Unknown names and types without members are not ignored.
    pub fn is_ignored(&self, info: &'static TypeInfo, name: &str) -> bool {
        let declared = match info {
            TypeInfo::Composite(composite) => composite.member(name),
            _ => None,
        };
        match declared {
            Some(member) => !is_selected(member),
            None => false,
        }
    }

    /// The conversion substituted for values of `info`.
    ///
    /// A runtime declaration takes precedence over the one attached to the
    /// type. Once resolved, the answer for a type never changes.
    pub fn converter_for_type(&self, info: &'static TypeInfo) -> Option<&'static Conversion> {
        let type_id = info.type_id();
        if let Some(&conversion) = read(&self.resolved).get(&type_id) {
            return conversion;
        }
        // Hold the declaration lock so no declaration slips in between the
        // lookup and the resolution.
        let declared = read(&self.declared);
        *write(&self.resolved).get_or_insert_with(type_id, || {
            declared.get(&type_id).copied().or_else(|| info.conversion())
        })
    }

    /// The conversion declared on a member.
    #[inline]
    pub fn converter_for_member(&self, member: &MemberDescriptor) -> Option<&'static Conversion> {
        member.conversion()
    }

    /// Declare a conversion for `C::Original` at runtime.
    ///
    /// This is how types the current crate does not own get a converter.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DuplicateConversion`] if the type already has a
    ///   conversion, declared at runtime or attached to the type.
    /// - [`ConfigError::AlreadyResolved`] if a lookup for the type already
    ///   happened.
    pub fn declare_conversion<C: Converter + Default>(&self) -> Result<(), ConfigError> {
        self.declare(Conversion::new::<C>())
    }

    /// Type-erased [`declare_conversion`](Self::declare_conversion).
    pub fn declare(&self, conversion: Conversion) -> Result<(), ConfigError> {
        let original = conversion.original_info();
        let type_id = original.type_id();

        let mut declared = write(&self.declared);
        if read(&self.resolved).contains(&type_id) {
            return Err(ConfigError::AlreadyResolved {
                ty: original.type_path(),
            });
        }
        if declared.contains(&type_id) || original.conversion().is_some() {
            return Err(ConfigError::DuplicateConversion {
                ty: original.type_path(),
            });
        }

        log::debug!(
            "declared conversion `{}` for `{}`",
            conversion.converter_name(),
            original.type_path()
        );
        declared.try_insert(type_id, Box::leak(Box::new(conversion)));
        Ok(())
    }
}

impl Default for MetadataCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataCache")
            .field("members", &read(&self.members).len())
            .field("declared", &read(&self.declared).len())
            .field("resolved", &read(&self.resolved).len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::MetadataCache;
    use crate::convert::Converter;
    use crate::info::Typed;
    use crate::value::EventHandler;
    use crate::{ConfigError, Transcode};
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Transcode, Default)]
    struct Selection {
        plain: i32,
        #[transcode(ignore)]
        ignored: i32,
        #[transcode(ignore, include)]
        forced: i32,
        #[transcode(readonly)]
        fixed: i32,
        #[deprecated]
        old: i32,
        changed: EventHandler<i32>,
        #[transcode(include)]
        #[deprecated]
        kept: i32,
    }

    #[derive(Transcode, Default)]
    struct Locked {
        id: i32,
        guard: Mutex<i32>,
    }

    #[derive(Transcode, Default)]
    struct LockedButIgnored {
        id: i32,
        #[transcode(ignore)]
        guard: Mutex<i32>,
    }

    #[derive(Transcode)]
    #[transcode(no_default)]
    struct Timed {
        at: Option<Instant>,
    }

    #[derive(Default)]
    struct Stamp;

    impl Converter for Stamp {
        type Original = u16;
        type Converted = String;

        fn convert(&self, original: &u16) -> String {
            format!("#{original}")
        }

        fn convert_back(&self, converted: String) -> u16 {
            converted.trim_start_matches('#').parse().unwrap_or_default()
        }
    }

    #[test]
    fn selection_rules() {
        let cache = MetadataCache::new();
        let members = cache.members_for(Selection::type_info()).unwrap();
        let names: Vec<_> = members.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["plain", "forced", "kept"]);
        assert_eq!(members[1].index(), 2);

        let info = Selection::type_info();
        assert!(cache.is_ignored(info, "ignored"));
        assert!(cache.is_ignored(info, "fixed"));
        assert!(cache.is_ignored(info, "old"));
        assert!(cache.is_ignored(info, "changed"));
        assert!(!cache.is_ignored(info, "forced"));
        assert!(!cache.is_ignored(info, "missing"));
    }

    #[test]
    fn repeated_lookups_share_the_entry() {
        let cache = MetadataCache::new();
        let first = cache.members_for(Selection::type_info()).unwrap();
        let second = cache.members_for(Selection::type_info()).unwrap();
        assert!(core::ptr::eq(first, second));
    }

    #[test]
    fn not_supported_members() {
        let cache = MetadataCache::new();
        let err = cache.members_for(Locked::type_info()).unwrap_err();
        assert!(matches!(err, ConfigError::NotSupported { member: "guard", .. }));
        // cached failures stay failures
        assert_eq!(cache.members_for(Locked::type_info()).unwrap_err(), err);

        assert!(cache.members_for(LockedButIgnored::type_info()).is_ok());
        assert!(matches!(
            cache.members_for(Timed::type_info()),
            Err(ConfigError::NotSupported { member: "at", .. })
        ));
        assert!(matches!(
            cache.members_for(i32::type_info()),
            Err(ConfigError::NotComposite { .. })
        ));
    }

    #[test]
    fn pairs_enumerate_both_slots() {
        let cache = MetadataCache::new();
        let members = cache.members_for(<(String, i32)>::type_info()).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name(), "Key");
        assert_eq!(members[1].name(), "Value");
    }

    #[test]
    fn runtime_declarations() {
        let cache = MetadataCache::new();
        cache.declare_conversion::<Stamp>().unwrap();
        assert_eq!(
            cache.declare_conversion::<Stamp>(),
            Err(ConfigError::DuplicateConversion { ty: "u16" })
        );

        let conversion = cache.converter_for_type(u16::type_info()).unwrap();
        assert!(conversion.converted_info().is::<String>());

        // lookups are final
        assert!(cache.converter_for_type(u8::type_info()).is_none());
        assert!(matches!(
            cache.declare(crate::convert::Conversion::from_converter(
                crate::convert::FnConverter::<u8, String>::new(|n| format!("{n}"), |s| s.len() as u8)
            )),
            Err(ConfigError::AlreadyResolved { ty: "u8" })
        ));
    }
}
