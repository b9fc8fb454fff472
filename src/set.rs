//! Immutable operations over unordered collections of unique values.
//!
//! A [`Set`] holds each [`Value`] at most once. Membership follows shallow
//! value equality, so two distinct lists with the same contents are two
//! members, and `1` and `1.0` are one.
//!
//! Members are identity keys: [`copy_deep`](Container::copy_deep) and
//! [`equals_deep`](Container::equals_deep) behave exactly like their
//! shallow counterparts.
//!
//! # Examples
//!
//! ```rust
//! use tablekit::set;
//!
//! let left = set!["foo", "bar"];
//! let right = set!["bar", "baz"];
//!
//! assert!(set::equals([&set::union([&left, &right]), &set!["foo", "bar", "baz"]]));
//! assert!(set::equals([&set::intersection([&left, &right]), &set!["bar"]]));
//! assert!(set::equals([&set::subtract(&left, ["bar", "qux"]), &set!["foo"]]));
//! ```

use std::collections::hash_set;
use std::fmt;

use rustc_hash::FxHashSet;

use crate::container::{self, Container};
use crate::value::ReferenceCounter;
use crate::{List, Value};

type Members = FxHashSet<Value>;

// =============================================================================
// Set Definition
// =============================================================================

/// Handle to an immutable collection of unique values.
///
/// Cloning the handle shares the collection; use [`copy`] for a new one.
#[derive(Clone)]
pub struct Set {
    members: ReferenceCounter<Members>,
}

impl Set {
    /// Creates a new empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_members(Members::default())
    }

    fn from_members(members: Members) -> Self {
        Self {
            members: ReferenceCounter::new(members),
        }
    }

    /// Returns the number of members.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if `value` is a member.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.members.contains(value)
    }

    /// Returns an iterator over the members.
    pub fn iter(&self) -> hash_set::Iter<'_, Value> {
        self.members.iter()
    }

    /// Returns `true` if both handles point at the same set.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.members, &other.members)
    }

    pub(crate) fn address(&self) -> usize {
        ReferenceCounter::as_ptr(&self.members).cast::<()>().addr()
    }
}

impl Default for Set {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Into<Value>> FromIterator<T> for Set {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_members(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Value;
    type IntoIter = hash_set::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Container for Set {
    fn len(&self) -> usize {
        self.members.len()
    }

    fn copy(&self) -> Self {
        Self::from_members((*self.members).clone())
    }

    fn copy_deep(&self) -> Self {
        self.copy()
    }

    fn equals(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|member| other.contains(member))
    }

    fn equals_deep(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Set {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for Set {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (at, member) in self.iter().enumerate() {
            if at > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{member}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Conversion
// =============================================================================

/// Returns a set holding the elements of `list`, without duplicates.
#[must_use]
pub fn from_list(list: &List) -> Set {
    list.iter().cloned().collect()
}

/// Returns the members of `set` as a list, in iteration order.
#[must_use]
pub fn to_list(set: &Set) -> List {
    set.iter().cloned().collect()
}

// =============================================================================
// Copying and Comparing
// =============================================================================

/// Returns a copy of `set`.
#[must_use]
pub fn copy(set: &Set) -> Set {
    set.copy()
}

/// Returns `true` if all `sets` have the same members.
pub fn equals<'a, I>(sets: I) -> bool
where
    I: IntoIterator<Item = &'a Set>,
{
    container::equals_all(sets)
}

/// Returns `true` if every member of `set` is a member of `superset`.
///
/// # Examples
///
/// ```rust
/// use tablekit::set;
///
/// let small = set!["foo"];
/// let large = set!["foo", "bar"];
/// assert!(set::is_subset(&small, &large));
/// assert!(set::is_superset(&large, &small));
/// assert!(!set::is_subset(&large, &small));
/// ```
#[must_use]
pub fn is_subset(set: &Set, superset: &Set) -> bool {
    set.len() <= superset.len() && set.iter().all(|member| superset.contains(member))
}

/// Returns `true` if every member of `subset` is a member of `set`.
#[must_use]
pub fn is_superset(set: &Set, subset: &Set) -> bool {
    is_subset(subset, set)
}

// =============================================================================
// Persistent Changes
// =============================================================================

/// Returns `set` with `values` added.
#[must_use]
pub fn add<I>(set: &Set, values: I) -> Set
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut members = (*set.members).clone();
    members.extend(values.into_iter().map(Into::into));
    Set::from_members(members)
}

/// Returns `set` without `values`.
///
/// Values that are not members are ignored.
#[must_use]
pub fn subtract<I>(set: &Set, values: I) -> Set
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut members = (*set.members).clone();
    for value in values {
        members.remove(&value.into());
    }
    Set::from_members(members)
}

/// Returns the members found in any of `sets`.
#[must_use]
pub fn union<'a, I>(sets: I) -> Set
where
    I: IntoIterator<Item = &'a Set>,
{
    sets.into_iter().flat_map(Set::iter).cloned().collect()
}

/// Returns the members found in every one of `sets`.
///
/// The intersection of no sets is empty.
#[must_use]
pub fn intersection<'a, I>(sets: I) -> Set
where
    I: IntoIterator<Item = &'a Set>,
{
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return Set::new();
    };
    let mut members = (*first.members).clone();
    for other in sets {
        members.retain(|member| other.contains(member));
    }
    Set::from_members(members)
}

// =============================================================================
// Set Algorithms
// =============================================================================

/// Returns the members for which `predicate` holds.
#[must_use]
pub fn filter<P>(set: &Set, mut predicate: P) -> Set
where
    P: FnMut(&Value) -> bool,
{
    set.iter().filter(|&member| predicate(member)).cloned().collect()
}

/// Returns `mapper(member)` for every member.
///
/// Members mapped to equal values collapse into one.
///
/// # Examples
///
/// ```rust
/// use tablekit::{Value, set};
///
/// let numbers = set![1, 2, 3, 4];
/// let parity = set::map(&numbers, |value: &Value| value.as_int().map(|n| n % 2));
/// assert!(set::equals([&parity, &set![0, 1]]));
/// ```
#[must_use]
pub fn map<F, V>(set: &Set, mut mapper: F) -> Set
where
    F: FnMut(&Value) -> V,
    V: Into<Value>,
{
    set.iter().map(&mut mapper).collect()
}

// =============================================================================
// Reading Values
// =============================================================================

/// Returns `true` if `value` is a member of `set`.
#[must_use]
pub fn has(set: &Set, value: impl Into<Value>) -> bool {
    set.contains(&value.into())
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Set {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for member in self {
            seq.serialize_element(member)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Set {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let list = <List as serde::Deserialize>::deserialize(deserializer)?;
        Ok(from_list(&list))
    }
}

// =============================================================================
// Tests
// =============================================================================
