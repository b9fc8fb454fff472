//! The dynamically typed value model shared by every container operation.
//!
//! [`Value`] mirrors the values of a dynamically typed host: primitives
//! compare by value, while containers ([`List`], [`Dictionary`], [`Set`])
//! and opaque [`Object`]s are reference-counted handles that compare by
//! identity. Cloning a handle shares the container; the `copy` family of
//! operations allocates a new one.
//!
//! # The absence sentinel
//!
//! [`Value::None`] (also exported as [`NONE`]) marks intentional absence.
//! Merge operations interpret it as "delete this key"; every other
//! operation stores it like any other value.
//!
//! # Examples
//!
//! ```rust
//! use tablekit::{Value, list};
//!
//! let shared = Value::from(list![1, 2]);
//! let alias = shared.clone();
//! let other = Value::from(list![1, 2]);
//!
//! // Containers compare by identity...
//! assert_eq!(shared, alias);
//! assert_ne!(shared, other);
//!
//! // ...unless compared deeply.
//! assert!(shared.equals_deep(&other));
//!
//! // Primitives compare by value, across numeric representations.
//! assert_eq!(Value::from(1), Value::from(1.0));
//! ```

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::container::Container;
use crate::{Dictionary, List, Set};

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted handle type used by every container.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, which makes
/// [`Value`] `Send + Sync`.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

#[cfg(feature = "arc")]
type Opaque = dyn Any + Send + Sync;

#[cfg(not(feature = "arc"))]
type Opaque = dyn Any;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Value: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Value: Send, Sync);

// =============================================================================
// Value Definition
// =============================================================================

/// The absence sentinel.
///
/// Equivalent to [`Value::None`].
pub const NONE: Value = Value::None;

/// A dynamically typed host value.
///
/// # Equality
///
/// `PartialEq` is shallow: numbers compare numerically (`Int(1) ==
/// Float(1.0)`), text by content, and containers and objects by identity.
/// `Hash` agrees with it, so every value can serve as a dictionary key or a
/// set member. Use [`Value::equals_deep`] for structural comparison.
///
/// Every `NaN` float equals every other `NaN`, so a `NaN` key or member
/// can be found again and copies of a container holding one stay equal.
#[derive(Clone)]
pub enum Value {
    /// The absence sentinel.
    None,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Immutable text.
    Text(ReferenceCounter<str>),
    /// Handle to an ordered sequence.
    List(List),
    /// Handle to a key-value mapping.
    Dictionary(Dictionary),
    /// Handle to a membership collection.
    Set(Set),
    /// Handle to an opaque host object.
    Object(Object),
}

impl Value {
    /// Returns `true` if this is the absence sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` if this value is a list, dictionary, or set handle.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Dictionary(_) | Self::Set(_))
    }

    /// Returns the name of this value's kind.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Dictionary(_) => "dictionary",
            Self::Set(_) => "set",
            Self::Object(_) => "object",
        }
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is one or an integral float.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) => integral(*value),
            _ => None,
        }
    }

    /// Returns the number as a float, if this is numeric.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the list handle, if this is a list.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the dictionary handle, if this is a dictionary.
    #[must_use]
    pub const fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Self::Dictionary(dictionary) => Some(dictionary),
            _ => None,
        }
    }

    /// Returns the set handle, if this is a set.
    #[must_use]
    pub const fn as_set(&self) -> Option<&Set> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Returns the object handle, if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns a copy in which every nested container is freshly allocated.
    ///
    /// Primitives and objects are returned as-is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tablekit::{Value, list};
    ///
    /// let original = Value::from(list![list![1]]);
    /// let copied = original.copy_deep();
    ///
    /// assert_ne!(original, copied);
    /// assert!(original.equals_deep(&copied));
    /// ```
    #[must_use]
    pub fn copy_deep(&self) -> Self {
        match self {
            Self::List(list) => Self::List(list.copy_deep()),
            Self::Dictionary(dictionary) => Self::Dictionary(dictionary.copy_deep()),
            Self::Set(set) => Self::Set(set.copy_deep()),
            other => other.clone(),
        }
    }

    /// Compares two values, recursing into containers of the same kind.
    ///
    /// Containers of different kinds are never equal. Non-container values
    /// fall back to shallow equality.
    #[must_use]
    pub fn equals_deep(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(left), Self::List(right)) => left.equals_deep(right),
            (Self::Dictionary(left), Self::Dictionary(right)) => left.equals_deep(right),
            (Self::Set(left), Self::Set(right)) => left.equals_deep(right),
            _ => self == other,
        }
    }

    /// Rank used to order values of different kinds when sorting.
    pub(crate) const fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::List(_) => 4,
            Self::Dictionary(_) => 5,
            Self::Set(_) => 6,
            Self::Object(_) => 7,
        }
    }
}

/// Converts a float to an integer when it holds an exact integral value.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value)).then_some(value as i64)
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => {
                left == right || (left.is_nan() && right.is_nan())
            }
            (Self::Int(integer), Self::Float(float)) | (Self::Float(float), Self::Int(integer)) => {
                integral(*float) == Some(*integer)
            }
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::List(left), Self::List(right)) => left.ptr_eq(right),
            (Self::Dictionary(left), Self::Dictionary(right)) => left.ptr_eq(right),
            (Self::Set(left), Self::Set(right)) => left.ptr_eq(right),
            (Self::Object(left), Self::Object(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::None => state.write_u8(0),
            Self::Bool(value) => {
                state.write_u8(1);
                value.hash(state);
            }
            Self::Int(value) => {
                state.write_u8(2);
                value.hash(state);
            }
            // Integral floats hash like the integer they are equal to.
            Self::Float(value) => match integral(*value) {
                Some(integer) => {
                    state.write_u8(2);
                    integer.hash(state);
                }
                None if value.is_nan() => state.write_u8(3),
                None => {
                    state.write_u8(3);
                    value.to_bits().hash(state);
                }
            },
            Self::Text(text) => {
                state.write_u8(4);
                text.hash(state);
            }
            Self::List(list) => {
                state.write_u8(5);
                list.address().hash(state);
            }
            Self::Dictionary(dictionary) => {
                state.write_u8(6);
                dictionary.address().hash(state);
            }
            Self::Set(set) => {
                state.write_u8(7);
                set.address().hash(state);
            }
            Self::Object(object) => {
                state.write_u8(8);
                object.address().hash(state);
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(formatter, "None"),
            Self::Bool(value) => write!(formatter, "{value:?}"),
            Self::Int(value) => write!(formatter, "{value:?}"),
            Self::Float(value) => write!(formatter, "{value:?}"),
            Self::Text(text) => write!(formatter, "{:?}", &**text),
            Self::List(list) => write!(formatter, "{list:?}"),
            Self::Dictionary(dictionary) => write!(formatter, "{dictionary:?}"),
            Self::Set(set) => write!(formatter, "{set:?}"),
            Self::Object(object) => write!(formatter, "{object:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(formatter, "None"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Text(text) => write!(formatter, "{text}"),
            Self::List(list) => write!(formatter, "{list}"),
            Self::Dictionary(dictionary) => write!(formatter, "{dictionary}"),
            Self::Set(set) => write!(formatter, "{set}"),
            Self::Object(_) => write!(formatter, "<object>"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(ReferenceCounter::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(ReferenceCounter::from(value))
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl From<Dictionary> for Value {
    fn from(value: Dictionary) -> Self {
        Self::Dictionary(value)
    }
}

impl From<Set> for Value {
    fn from(value: Set) -> Self {
        Self::Set(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

/// `None` becomes the absence sentinel.
impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().collect())
    }
}

// =============================================================================
// Object
// =============================================================================

/// Handle to an opaque host object.
///
/// Objects carry no structure the library can inspect; two handles are
/// equal only when they point at the same allocation.
///
/// # Examples
///
/// ```rust
/// use tablekit::Object;
///
/// let object = Object::new(String::from("instance"));
/// let alias = object.clone();
///
/// assert_eq!(object, alias);
/// assert_ne!(object, Object::new(String::from("instance")));
/// assert_eq!(object.downcast_ref::<String>().map(String::as_str), Some("instance"));
/// ```
#[derive(Clone)]
pub struct Object {
    handle: ReferenceCounter<Opaque>,
}

impl Object {
    /// Wraps a host value in a new object handle.
    #[cfg(not(feature = "arc"))]
    #[must_use]
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            handle: ReferenceCounter::new(value),
        }
    }

    /// Wraps a host value in a new object handle.
    #[cfg(feature = "arc")]
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            handle: ReferenceCounter::new(value),
        }
    }

    /// Returns the wrapped value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }

    pub(crate) fn address(&self) -> usize {
        ReferenceCounter::as_ptr(&self.handle).cast::<()>().addr()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(
            ReferenceCounter::as_ptr(&self.handle),
            ReferenceCounter::as_ptr(&other.handle),
        )
    }
}

impl Eq for Object {}

impl fmt::Debug for Object {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Object({:#x})", self.address())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error;
        match self {
            Self::None => Err(S::Error::custom("the absence sentinel cannot be serialized")),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Text(text) => serializer.serialize_str(text),
            Self::List(list) => serde::Serialize::serialize(list, serializer),
            Self::Dictionary(dictionary) => serde::Serialize::serialize(dictionary, serializer),
            Self::Set(set) => serde::Serialize::serialize(set, serializer),
            Self::Object(_) => Err(S::Error::custom("opaque objects cannot be serialized")),
        }
    }
}

#[cfg(feature = "serde")]
struct ValueVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a boolean, number, string, sequence, or map")
    }

    fn visit_bool<E: serde::de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Value::Int(value))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(value).map_or(Value::Float(value as f64), Value::Int))
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Value::from(value))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Value::from(value))
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        serde::de::Visitor::visit_seq(crate::list::ListVisitor, seq).map(Value::List)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        serde::de::Visitor::visit_map(crate::dictionary::DictionaryVisitor, map)
            .map(Value::Dictionary)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rustc_hash::FxHashSet;

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }

    #[rstest]
    #[case(Value::from(1), Value::from(1.0))]
    #[case(Value::from(-0.0), Value::from(0))]
    #[case(Value::from("foo"), Value::from(String::from("foo")))]
    #[case(NONE, Value::None)]
    fn test_equal_primitives_hash_alike(#[case] left: Value, #[case] right: Value) {
        assert_eq!(left, right);
        let members: FxHashSet<Value> = [left, right].into_iter().collect();
        assert_eq!(members.len(), 1);
    }

    #[rstest]
    #[case(Value::from(1), Value::from(1.5))]
    #[case(Value::from(true), Value::from(1))]
    #[case(Value::from("1"), Value::from(1))]
    #[case(NONE, Value::from(false))]
    fn test_distinct_primitives_are_unequal(#[case] left: Value, #[case] right: Value) {
        assert_ne!(left, right);
    }

    #[rstest]
    fn test_nan_equals_every_nan() {
        let nan = Value::from(f64::NAN);
        let negative = Value::from(-f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_eq!(nan, negative);
        assert_ne!(nan, Value::from(0.0));

        let members: FxHashSet<Value> = [nan.clone(), negative].into_iter().collect();
        assert_eq!(members.len(), 1);
        assert!(members.contains(&nan));
    }

    #[rstest]
    fn test_containers_holding_nan_equal_their_copies() {
        let nan = Value::from(f64::NAN);
        let values: List = [nan.clone()].into_iter().collect();
        let entries: Dictionary = [(nan.clone(), nan.clone())].into_iter().collect();
        let members: Set = [nan].into_iter().collect();

        assert!(values.equals(&values.copy()));
        assert!(values.equals_deep(&values.copy_deep()));
        assert!(entries.equals(&entries.copy()));
        assert!(entries.equals_deep(&entries.copy_deep()));
        assert!(members.equals(&members.copy()));
    }

    #[rstest]
    fn test_containers_compare_by_identity() {
        let list = List::new();
        let alias = Value::List(list.clone());
        assert_eq!(Value::List(list), alias);
        assert_ne!(Value::List(List::new()), Value::List(List::new()));
    }

    #[rstest]
    fn test_containers_of_different_kinds_are_not_deep_equal() {
        let list = Value::List(List::new());
        let dictionary = Value::Dictionary(Dictionary::new());
        assert!(!list.equals_deep(&dictionary));
    }

    #[rstest]
    fn test_copy_deep_leaves_primitives_untouched() {
        let text = Value::from("foo");
        assert_eq!(text.copy_deep(), text);
    }

    #[rstest]
    fn test_objects_compare_by_identity() {
        let object = Object::new(7_u8);
        assert_eq!(Value::from(object.clone()), Value::from(object.clone()));
        assert_ne!(Value::from(object), Value::from(Object::new(7_u8)));
    }

    #[rstest]
    fn test_option_converts_to_sentinel() {
        assert!(Value::from(None::<i64>).is_none());
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }

    #[rstest]
    fn test_as_int_accepts_integral_floats() {
        assert_eq!(Value::from(2.0).as_int(), Some(2));
        assert_eq!(Value::from(2.5).as_int(), None);
        assert_eq!(Value::from(f64::INFINITY).as_int(), None);
    }

    #[rstest]
    fn test_display_and_debug() {
        let value = Value::from("foo");
        assert_eq!(format!("{value}"), "foo");
        assert_eq!(format!("{value:?}"), "\"foo\"");
        assert_eq!(format!("{NONE}"), "None");
    }
}
