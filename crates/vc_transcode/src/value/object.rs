use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use crate::convert::Conversion;
use crate::info::TypeInfo;
use crate::transcoder::{Transcoded, Transcoder};
use crate::value::{EventHandler, Value};
use crate::{Transcode, TranscodeError};

// -----------------------------------------------------------------------------
// MemberChanged

/// Argument of the change notification of a [`DynamicObject`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemberChanged {
    pub name: String,
    pub value: Value,
}

// -----------------------------------------------------------------------------
// DynamicObject

/// The dynamic representation of a composite or pair: a name-keyed property bag.
///
/// Produced by the forward transcoder, consumed by the reverse one. In between
/// it can be read and mutated by name. Once a member exists, later
/// [`set_member`](Self::set_member) calls must keep its runtime type.
///
/// # Examples
///
/// ```
/// use vc_transcode::{DynamicObject, Transcode, Value};
///
/// #[derive(Transcode, Default, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut object = vc_transcode::to_dynamic(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(object.get_member("x"), Some(&Value::from(1)));
///
/// assert!(object.set_member("y", Value::from(5)));
/// assert!(!object.set_member("y", Value::from("five")));
///
/// let point: Point = object.map().unwrap();
/// assert_eq!(point, Point { x: 1, y: 5 });
/// ```
pub struct DynamicObject {
    info: &'static TypeInfo,
    conversion: Option<Conversion>,
    values: Vec<Value>,
    names: Vec<Cow<'static, str>>,
    indices: HashMap<Cow<'static, str>, usize, FixedState>,
    changed: EventHandler<MemberChanged>,
}

impl DynamicObject {
    /// Create an empty representation of the type `info`.
    #[inline]
    pub fn new(info: &'static TypeInfo) -> Self {
        Self {
            info,
            conversion: None,
            values: Vec::new(),
            names: Vec::new(),
            indices: HashMap::with_hasher(FixedState::default()),
            changed: EventHandler::new(),
        }
    }

    /// Create an empty representation with room for `capacity` members.
    #[inline]
    pub fn with_capacity(info: &'static TypeInfo, capacity: usize) -> Self {
        Self {
            info,
            conversion: None,
            values: Vec::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity_and_hasher(capacity, FixedState::default()),
            changed: EventHandler::new(),
        }
    }

    /// Record that this representation was produced through `conversion`.
    #[inline]
    pub fn with_conversion(mut self, conversion: Conversion) -> Self {
        self.conversion = Some(conversion);
        self
    }

    #[inline]
    pub(crate) fn set_conversion(&mut self, conversion: Conversion) {
        self.conversion = Some(conversion);
    }

    /// Insert or replace a member without the type check and without notification.
    ///
    /// This is how the forward transcoder populates the object.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: Value) {
        let name = name.into();
        if let Some(&index) = self.indices.get(&name) {
            self.values[index] = value;
        } else {
            self.indices.insert(name.clone(), self.values.len());
            self.values.push(value);
            self.names.push(name);
        }
    }

    /// Returns the value of a member, `None` if the member does not exist.
    #[inline]
    pub fn get_member(&self, name: &str) -> Option<&Value> {
        self.indices.get(name).map(|&index| &self.values[index])
    }

    /// Mutable access to a member, without the type check.
    #[inline]
    pub fn get_member_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.indices.get(name).map(|&index| &mut self.values[index])
    }

    /// Set a member by name.
    ///
    /// A new name is added. An existing member is replaced only if `value` is
    /// [assignable](Value::is_assignable_to) to the stored value, in which case
    /// subscribers are notified. Returns `false` if the set was rejected.
    pub fn set_member(&mut self, name: &str, value: Value) -> bool {
        match self.indices.get(name) {
            Some(&index) => {
                if !value.is_assignable_to(&self.values[index]) {
                    return false;
                }
                self.values[index] = value;
                if !self.changed.is_empty() {
                    self.changed.invoke(&MemberChanged {
                        name: String::from(name),
                        value: self.values[index].clone(),
                    });
                }
                true
            }
            None => {
                self.insert(String::from(name), value);
                true
            }
        }
    }

    /// The runtime type of a member's value, `None` if the value is null.
    pub fn member_type(&self, name: &str) -> Result<Option<&'static TypeInfo>, TranscodeError> {
        match self.get_member(name) {
            Some(value) => Ok(value.type_info()),
            None => Err(TranscodeError::UnknownMember {
                ty: self.info.type_path(),
                member: String::from(name),
            }),
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Remove a member and return its value.
    pub fn remove_member(&mut self, name: &str) -> Option<Value> {
        let index = self.indices.remove(name)?;
        self.names.remove(index);
        let value = self.values.remove(index);
        for slot in self.indices.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Member names, in insertion order.
    pub fn member_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.names.iter().map(AsRef::as_ref)
    }

    /// Iterate `(name, value)` in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.names.iter().map(AsRef::as_ref).zip(self.values.iter())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The type whose shape this object has.
    ///
    /// For a converted object this is the converter's output type.
    #[inline]
    pub const fn represented_type(&self) -> &'static TypeInfo {
        self.info
    }

    /// The declared type the object stands for.
    ///
    /// Same as [`represented_type`](Self::represented_type) unless the
    /// object was produced through a converter, then it is the converter's
    /// input type.
    pub fn original_type(&self) -> &'static TypeInfo {
        match &self.conversion {
            Some(conversion) => conversion.original_info(),
            None => self.info,
        }
    }

    #[inline]
    pub const fn is_converted(&self) -> bool {
        self.conversion.is_some()
    }

    /// The conversion that produced this object, if any.
    #[inline]
    pub fn converter(&self) -> Option<&Conversion> {
        self.conversion.as_ref()
    }

    /// Subscribe to member replacements made through [`set_member`](Self::set_member).
    pub fn subscribe(&mut self, handler: impl Fn(&MemberChanged) + Send + Sync + 'static) {
        self.changed.subscribe(handler);
    }

    /// Populate `destination` from this object, with the global cache.
    ///
    /// Fails if [`original_type`](Self::original_type) is not `T`.
    /// Skipped members are logged.
    pub fn map_into<T: Transcode>(&self, destination: &mut T) -> Result<(), TranscodeError> {
        Transcoder::global()
            .map_into(self, destination)
            .map(Transcoded::into_inner)
    }

    /// Build a `T` from this object, starting from `T::default()`.
    pub fn map<T: Transcode + Default>(&self) -> Result<T, TranscodeError> {
        Transcoder::global().map::<T>(self).map(Transcoded::into_inner)
    }

    /// Build an instance of [`original_type`](Self::original_type).
    ///
    /// The type must have a default constructor.
    pub fn map_dynamic(&self) -> Result<Box<dyn Transcode>, TranscodeError> {
        Transcoder::global()
            .map_dynamic(self)
            .map(Transcoded::into_inner)
    }
}

/// Subscribers are not cloned.
impl Clone for DynamicObject {
    fn clone(&self) -> Self {
        Self {
            info: self.info,
            conversion: self.conversion.clone(),
            values: self.values.clone(),
            names: self.names.clone(),
            indices: self.indices.clone(),
            changed: EventHandler::new(),
        }
    }
}

/// Two objects are equal if they represent the same type, went through the
/// same conversion, and hold equal members regardless of order.
impl PartialEq for DynamicObject {
    fn eq(&self, other: &Self) -> bool {
        let same_conversion = match (&self.conversion, &other.conversion) {
            (Some(a), Some(b)) => a.same_converter(b),
            (None, None) => true,
            _ => false,
        };
        self.info.type_id() == other.info.type_id()
            && same_conversion
            && self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get_member(name) == Some(value))
    }
}

impl fmt::Debug for DynamicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicObject<{}> ", self.info.ty().ident())?;
        f.debug_map().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DynamicObject, MemberChanged};
    use crate::Value;
    use crate::collections::UntypedMap;
    use crate::info::Typed;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use std::sync::Mutex;

    fn object() -> DynamicObject {
        let mut object = DynamicObject::new(UntypedMap::type_info());
        object.insert("a", Value::from(1_i32));
        object.insert("b", Value::Null);
        object.insert("c", Value::from("text"));
        object
    }

    #[test]
    fn get_and_type_introspection() {
        let object = object();
        assert_eq!(object.len(), 3);
        assert_eq!(object.get_member("a"), Some(&Value::from(1_i32)));
        assert_eq!(object.get_member("missing"), None);

        assert!(object.member_type("a").unwrap().unwrap().is::<i32>());
        assert!(object.member_type("b").unwrap().is_none());
        assert!(object.member_type("missing").is_err());
    }

    #[test]
    fn set_keeps_runtime_type() {
        let mut object = object();
        assert!(object.set_member("a", Value::from(2_i32)));
        assert!(!object.set_member("a", Value::from(2_i64)));
        assert_eq!(object.get_member("a"), Some(&Value::from(2_i32)));

        // stored null accepts anything, null is always accepted
        assert!(object.set_member("b", Value::from(1.5_f64)));
        assert!(object.set_member("c", Value::Null));
        assert!(object.set_member("d", Value::from(true)));
        assert_eq!(object.len(), 4);
    }

    #[test]
    fn notifies_on_replacement_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut object = object();
        let sink = seen.clone();
        object.subscribe(move |change: &MemberChanged| {
            sink.lock().unwrap().push(change.name.clone());
        });

        object.set_member("new", Value::from(1_u8));
        object.set_member("a", Value::from("rejected"));
        object.set_member("a", Value::from(9_i32));

        assert_eq!(*seen.lock().unwrap(), ["a"]);
    }

    #[test]
    fn remove_keeps_order() {
        let mut object = object();
        assert_eq!(object.remove_member("a"), Some(Value::from(1_i32)));
        assert_eq!(object.member_names().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(object.get_member("c"), Some(&Value::from("text")));
        assert!(object.remove_member("a").is_none());
    }

    #[test]
    fn equality_ignores_order() {
        let mut other = DynamicObject::new(UntypedMap::type_info());
        other.insert("c", Value::from("text"));
        other.insert("b", Value::Null);
        other.insert("a", Value::from(1_i32));
        assert_eq!(object(), other);
        assert_eq!(object().clone(), object());
    }
}
