//! Immutable operations over key-value mappings.
//!
//! A [`Dictionary`] maps any [`Value`] to any value. Every function in this
//! module leaves its inputs untouched and returns a freshly allocated
//! dictionary (or a derived value).
//!
//! # Iteration order
//!
//! Entries iterate in the order of their `FxHash` table. The hasher is
//! unseeded, so the order is deterministic for primitive keys; keys that are
//! containers or objects hash by address and keep a stable order only for
//! the lifetime of the process. Operations whose outcome depends on order
//! ([`keys`], [`values`], [`flip`] with duplicate values, [`map`] with
//! colliding keys, [`flatten`] with colliding keys) resolve it this way.
//!
//! # Examples
//!
//! ```rust
//! use tablekit::{NONE, dictionary};
//!
//! let base = dictionary! { "foo" => "value", "removeMe" => 0 };
//! let changes = dictionary! { "removeMe" => NONE, "addMe" => 1 };
//!
//! let merged = dictionary::merge([&base, &changes]);
//!
//! assert!(dictionary::equals([&merged, &dictionary! { "foo" => "value", "addMe" => 1 }]));
//! assert!(!dictionary::has(&merged, "removeMe"));
//! ```

use std::collections::hash_map;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::container::{self, Container};
use crate::value::ReferenceCounter;
use crate::{List, Value};

type Entries = FxHashMap<Value, Value>;

// =============================================================================
// Dictionary Definition
// =============================================================================

/// Handle to an immutable key-value mapping.
///
/// Cloning the handle shares the mapping; use [`copy`] for a new one.
///
/// # Examples
///
/// ```rust
/// use tablekit::{Dictionary, Value};
///
/// let dictionary: Dictionary = [("foo", 1), ("bar", 2)].into_iter().collect();
/// assert_eq!(dictionary.len(), 2);
/// assert_eq!(dictionary.get(&Value::from("foo")), Some(&Value::from(1)));
/// ```
#[derive(Clone)]
pub struct Dictionary {
    entries: ReferenceCounter<Entries>,
}

impl Dictionary {
    /// Creates a new empty dictionary.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_entries(Entries::default())
    }

    fn from_entries(entries: Entries) -> Self {
        Self {
            entries: ReferenceCounter::new(entries),
        }
    }

    /// Returns a shallow clone of the underlying table, ready to modify.
    fn to_entries(&self) -> Entries {
        (*self.entries).clone()
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the dictionary has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value bound to `key`.
    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is bound.
    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns an iterator over `(key, value)` pairs.
    pub fn iter(&self) -> hash_map::Iter<'_, Value, Value> {
        self.entries.iter()
    }

    /// Returns `true` if both handles point at the same dictionary.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.entries, &other.entries)
    }

    pub(crate) fn address(&self) -> usize {
        ReferenceCounter::as_ptr(&self.entries).cast::<()>().addr()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a Value, &'a Value);
    type IntoIter = hash_map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Container for Dictionary {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn copy(&self) -> Self {
        Self::from_entries(self.to_entries())
    }

    fn copy_deep(&self) -> Self {
        self.iter()
            .map(|(key, value)| (key.clone(), value.copy_deep()))
            .collect()
    }

    fn equals(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|found| found == value))
    }

    fn equals_deep(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| {
                other
                    .get(key)
                    .is_some_and(|found| found.equals_deep(value))
            })
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Dictionary {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Pairs `keys[i]` with `values[i]` over the range both lists cover.
///
/// Entries beyond the shorter list are ignored; a length mismatch is logged
/// as a warning. Later duplicate keys win.
///
/// # Examples
///
/// ```rust
/// use tablekit::{dictionary, list};
///
/// let result = dictionary::from_lists(&list!["foo", "bar", "baz"], &list![1, 2, 3]);
/// assert!(dictionary::equals([
///     &result,
///     &dictionary! { "foo" => 1, "bar" => 2, "baz" => 3 },
/// ]));
/// ```
#[must_use]
pub fn from_lists(keys: &List, values: &List) -> Dictionary {
    if keys.len() != values.len() {
        tracing::warn!(
            keys = keys.len(),
            values = values.len(),
            "key and value lists differ in length, extra entries are ignored"
        );
    }
    keys.iter().cloned().zip(values.iter().cloned()).collect()
}

// =============================================================================
// Copying and Comparing
// =============================================================================

/// Returns a shallow copy of `dictionary`.
#[must_use]
pub fn copy(dictionary: &Dictionary) -> Dictionary {
    dictionary.copy()
}

/// Returns a deep copy of `dictionary`.
///
/// Nested containers are copied as well, so a copy of a dictionary holding
/// containers is [`equals_deep`] to the original but not [`equals`].
#[must_use]
pub fn copy_deep(dictionary: &Dictionary) -> Dictionary {
    dictionary.copy_deep()
}

/// Returns `true` if all `dictionaries` are shallowly equal.
pub fn equals<'a, I>(dictionaries: I) -> bool
where
    I: IntoIterator<Item = &'a Dictionary>,
{
    container::equals_all(dictionaries)
}

/// Returns `true` if all `dictionaries` are deeply equal.
pub fn equals_deep<'a, I>(dictionaries: I) -> bool
where
    I: IntoIterator<Item = &'a Dictionary>,
{
    container::equals_deep_all(dictionaries)
}

// =============================================================================
// Merging
// =============================================================================

/// Merges `dictionaries` from left to right.
///
/// Later entries replace earlier ones. An entry whose value is the
/// sentinel removes the key from the result, whichever dictionary defined
/// it before.
#[must_use]
pub fn merge<'a, I>(dictionaries: I) -> Dictionary
where
    I: IntoIterator<Item = &'a Dictionary>,
{
    let mut entries = Entries::default();
    for dictionary in dictionaries {
        for (key, value) in dictionary {
            if value.is_none() {
                entries.remove(key);
            } else {
                entries.insert(key.clone(), value.clone());
            }
        }
    }
    Dictionary::from_entries(entries)
}

pub use self::merge as join;

/// Merges `dictionaries` from left to right, recursing into nested
/// dictionaries.
///
/// When a key holds a dictionary in the result so far and in a later
/// operand, the two are merged recursively. Any other value replaces the
/// previous one. The sentinel removes keys at every depth, and every
/// container placed in the result is a deep copy, so the result shares
/// nothing with its operands.
///
/// # Examples
///
/// ```rust
/// use tablekit::{NONE, dictionary};
///
/// let a = dictionary! {
///     "key" => "value",
///     "dictionary" => dictionary! { "foo" => "foo", "bar" => "bar" },
///     "removeMe" => 0,
/// };
/// let b = dictionary! {
///     "removeMe" => NONE,
///     "dictionary" => dictionary! { "baz" => "baz" },
/// };
///
/// let merged = dictionary::merge_deep([&a, &b]);
/// let expected = dictionary! {
///     "key" => "value",
///     "dictionary" => dictionary! { "foo" => "foo", "bar" => "bar", "baz" => "baz" },
/// };
/// assert!(dictionary::equals_deep([&merged, &expected]));
/// ```
#[must_use]
pub fn merge_deep<'a, I>(dictionaries: I) -> Dictionary
where
    I: IntoIterator<Item = &'a Dictionary>,
{
    let mut entries = Entries::default();
    for dictionary in dictionaries {
        merge_deep_into(&mut entries, dictionary, 0);
    }
    Dictionary::from_entries(entries)
}

pub use self::merge_deep as join_deep;

fn merge_deep_into(entries: &mut Entries, dictionary: &Dictionary, depth: usize) {
    for (key, value) in dictionary {
        match value {
            Value::None => {
                entries.remove(key);
            }
            Value::Dictionary(nested) => {
                tracing::trace!(depth, %key, "merging nested dictionary");
                let mut merged = match entries.get(key) {
                    Some(Value::Dictionary(existing)) => existing.to_entries(),
                    _ => Entries::default(),
                };
                merge_deep_into(&mut merged, nested, depth + 1);
                entries.insert(
                    key.clone(),
                    Value::Dictionary(Dictionary::from_entries(merged)),
                );
            }
            other => {
                entries.insert(key.clone(), other.copy_deep());
            }
        }
    }
}

// =============================================================================
// Persistent Changes
// =============================================================================

/// Returns a copy of `dictionary` without `key`.
#[must_use]
pub fn remove_key(dictionary: &Dictionary, key: impl Into<Value>) -> Dictionary {
    remove_keys(dictionary, [key])
}

/// Returns a copy of `dictionary` without any of `keys`.
///
/// Keys that are not present are ignored.
#[must_use]
pub fn remove_keys<I>(dictionary: &Dictionary, keys: I) -> Dictionary
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut entries = dictionary.to_entries();
    for key in keys {
        entries.remove(&key.into());
    }
    Dictionary::from_entries(entries)
}

/// Returns a copy of `dictionary` without the entries whose value is `value`.
#[must_use]
pub fn remove_value(dictionary: &Dictionary, value: impl Into<Value>) -> Dictionary {
    remove_values(dictionary, [value])
}

/// Returns a copy of `dictionary` without the entries whose value is any of
/// `values`.
///
/// Values are compared shallowly.
#[must_use]
pub fn remove_values<I>(dictionary: &Dictionary, values: I) -> Dictionary
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let removed: FxHashSet<Value> = values.into_iter().map(Into::into).collect();
    filter(dictionary, |value, _| !removed.contains(value))
}

/// Returns a copy of `dictionary` with `key` bound to `value`.
///
/// The sentinel is stored as given; only the merge operations treat it as a
/// deletion.
#[must_use]
pub fn set(dictionary: &Dictionary, key: impl Into<Value>, value: impl Into<Value>) -> Dictionary {
    let mut entries = dictionary.to_entries();
    entries.insert(key.into(), value.into());
    Dictionary::from_entries(entries)
}

/// Returns a copy of `dictionary` with the value at `key` replaced by
/// `updater(value, key)`.
///
/// If `key` is absent the copy is returned unchanged.
#[must_use]
pub fn update<F, V>(dictionary: &Dictionary, key: impl Into<Value>, updater: F) -> Dictionary
where
    F: FnOnce(&Value, &Value) -> V,
    V: Into<Value>,
{
    let key = key.into();
    let mut entries = dictionary.to_entries();
    if let Some(current) = dictionary.get(&key) {
        let updated = updater(current, &key).into();
        entries.insert(key, updated);
    }
    Dictionary::from_entries(entries)
}

/// Like [`update`], but binds `key` to `callback(key)` when it is absent.
///
/// # Examples
///
/// ```rust
/// use tablekit::{Value, dictionary};
///
/// let base = dictionary! { "foo" => "foo", "bar" => "bar" };
/// let fooify = |value: &Value, _: &Value| format!("foo{value}");
///
/// let updated = dictionary::update_or_else(&base, "baz", fooify, |_| "baz");
/// assert_eq!(updated.get(&Value::from("baz")), Some(&Value::from("baz")));
///
/// let updated = dictionary::update_or_else(&base, "bar", fooify, |_| "baz");
/// assert_eq!(updated.get(&Value::from("bar")), Some(&Value::from("foobar")));
/// ```
#[must_use]
pub fn update_or_else<F, C, U, V>(
    dictionary: &Dictionary,
    key: impl Into<Value>,
    updater: F,
    callback: C,
) -> Dictionary
where
    F: FnOnce(&Value, &Value) -> U,
    C: FnOnce(&Value) -> V,
    U: Into<Value>,
    V: Into<Value>,
{
    let key = key.into();
    let mut entries = dictionary.to_entries();
    let updated = match dictionary.get(&key) {
        Some(current) => updater(current, &key).into(),
        None => callback(&key).into(),
    };
    entries.insert(key, updated);
    Dictionary::from_entries(entries)
}

// =============================================================================
// Sequence Algorithms
// =============================================================================

/// Returns the entries for which `predicate(value, key)` holds.
#[must_use]
pub fn filter<P>(dictionary: &Dictionary, mut predicate: P) -> Dictionary
where
    P: FnMut(&Value, &Value) -> bool,
{
    dictionary
        .iter()
        .filter(|&(key, value)| predicate(value, key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Returns a dictionary mapping each value of `dictionary` to its key.
///
/// When values repeat, the entry that iterates last wins.
#[must_use]
pub fn flip(dictionary: &Dictionary) -> Dictionary {
    dictionary
        .iter()
        .map(|(key, value)| (value.clone(), key.clone()))
        .collect()
}

/// The result of a [`map`] callback.
#[derive(Debug, Clone)]
pub enum Mapping {
    /// A new value, bound to the original key.
    Value(Value),
    /// A new value bound to a new key.
    Entry {
        /// The new value.
        value: Value,
        /// The new key.
        key: Value,
    },
}

impl From<Value> for Mapping {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// `(value, key)`, in the order the callback receives them.
impl From<(Value, Value)> for Mapping {
    fn from((value, key): (Value, Value)) -> Self {
        Self::Entry { value, key }
    }
}

/// Returns a dictionary built from `mapper(value, key)` for every entry.
///
/// The mapper may keep the key by returning a plain [`Value`], or move the
/// entry by returning a `(value, key)` pair. When several entries land on
/// the same key, the one that iterates last wins.
///
/// # Examples
///
/// ```rust
/// use tablekit::{Value, dictionary};
///
/// let base = dictionary! { "foo" => 5 };
/// let remapped = dictionary::map(&base, |value, key| {
///     (
///         Value::from(value.as_int().unwrap_or_default() + 1),
///         Value::from(format!("{key}Incremented")),
///     )
/// });
/// assert_eq!(remapped.get(&Value::from("fooIncremented")), Some(&Value::from(6)));
/// ```
#[must_use]
pub fn map<F, M>(dictionary: &Dictionary, mut mapper: F) -> Dictionary
where
    F: FnMut(&Value, &Value) -> M,
    M: Into<Mapping>,
{
    dictionary
        .iter()
        .map(|(key, value)| {
            let mapping: Mapping = mapper(value, key).into();
            match mapping {
                Mapping::Value(mapped) => (key.clone(), mapped),
                Mapping::Entry { value, key } => (key, value),
            }
        })
        .collect()
}

/// Merges nested dictionaries into their parent, up to `depth` levels.
///
/// `None` flattens as deeply as possible. Keys that collide resolve to the
/// entry that is visited last.
///
/// # Examples
///
/// ```rust
/// use tablekit::dictionary;
///
/// let nested = dictionary! {
///     "foo" => "foo",
///     "foobar" => dictionary! {
///         "bar" => "bar",
///         "barbaz" => dictionary! { "baz" => "baz" },
///     },
/// };
///
/// let flat = dictionary::flatten(&nested, None);
/// assert!(dictionary::equals([
///     &flat,
///     &dictionary! { "foo" => "foo", "bar" => "bar", "baz" => "baz" },
/// ]));
/// assert_eq!(dictionary::flatten(&nested, Some(1)).len(), 3);
/// ```
#[must_use]
pub fn flatten(dictionary: &Dictionary, depth: Option<usize>) -> Dictionary {
    let mut entries = Entries::default();
    flatten_into(&mut entries, dictionary, depth);
    Dictionary::from_entries(entries)
}

fn flatten_into(entries: &mut Entries, dictionary: &Dictionary, depth: Option<usize>) {
    for (key, value) in dictionary {
        match value {
            Value::Dictionary(nested) if depth != Some(0) => {
                tracing::trace!(?depth, %key, "flattening nested dictionary");
                flatten_into(entries, nested, depth.map(|remaining| remaining - 1));
            }
            _ => {
                entries.insert(key.clone(), value.clone());
            }
        }
    }
}

// =============================================================================
// Reading Values
// =============================================================================

/// Returns `true` if `dictionary` binds `key`.
#[must_use]
pub fn has(dictionary: &Dictionary, key: impl Into<Value>) -> bool {
    dictionary.contains_key(&key.into())
}

/// Returns `true` if any entry of `dictionary` holds `value`.
#[must_use]
pub fn includes(dictionary: &Dictionary, value: impl Into<Value>) -> bool {
    let value = value.into();
    dictionary.iter().any(|(_, found)| *found == value)
}

/// Returns the keys of `dictionary` in iteration order.
#[must_use]
pub fn keys(dictionary: &Dictionary) -> List {
    dictionary.iter().map(|(key, _)| key.clone()).collect()
}

/// Returns the values of `dictionary` in iteration order.
#[must_use]
pub fn values(dictionary: &Dictionary) -> List {
    dictionary.iter().map(|(_, value)| value.clone()).collect()
}

// =============================================================================
// Reducing
// =============================================================================

/// Returns the number of entries.
///
/// Unlike a host length operator, every key counts, not only sequential
/// integers.
#[must_use]
pub fn count(dictionary: &Dictionary) -> usize {
    dictionary.len()
}

/// Returns the number of entries for which `predicate(value, key)` holds.
#[must_use]
pub fn count_where<P>(dictionary: &Dictionary, mut predicate: P) -> usize
where
    P: FnMut(&Value, &Value) -> bool,
{
    dictionary
        .iter()
        .filter(|&(key, value)| predicate(value, key))
        .count()
}

/// Returns `true` if `predicate(value, key)` holds for every entry.
#[must_use]
pub fn every<P>(dictionary: &Dictionary, mut predicate: P) -> bool
where
    P: FnMut(&Value, &Value) -> bool,
{
    dictionary.iter().all(|(key, value)| predicate(value, key))
}

/// Returns `true` if `predicate(value, key)` holds for any entry.
#[must_use]
pub fn some<P>(dictionary: &Dictionary, mut predicate: P) -> bool
where
    P: FnMut(&Value, &Value) -> bool,
{
    dictionary.iter().any(|(key, value)| predicate(value, key))
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
/// Only dictionaries keyed by text serialize; any other key is an error, since
/// self-describing formats would hand it back as text.
impl serde::Serialize for Dictionary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{Error, SerializeMap};
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            let Some(text) = key.as_text() else {
                return Err(S::Error::custom(format_args!(
                    "only text keys can be serialized, found a key of kind {}",
                    key.type_name()
                )));
            };
            map.serialize_entry(text, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
pub(crate) struct DictionaryVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for DictionaryVisitor {
    type Value = Dictionary;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = map.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut entries = Entries::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher);
        while let Some((key, value)) = map.next_entry::<Value, Value>()? {
            entries.insert(key, value);
        }
        Ok(Dictionary::from_entries(entries))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Dictionary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(DictionaryVisitor)
    }
}

// =============================================================================
// Tests
// =============================================================================
