//! Immutable operations over ordered sequences.
//!
//! A [`List`] is a dense sequence of [`Value`]s. Functions in this module
//! address elements with the host's 1-based convention:
//!
//! - a positive index is a 1-based position (`1` is the first element);
//! - `0` and negative indices count back from the end (`0` is the last
//!   element, `-1` the one before it).
//!
//! Indices returned by the `find` family are 1-based as well. Removals
//! re-contiguate the sequence, so a list never has gaps.
//!
//! # Examples
//!
//! ```rust
//! use tablekit::{Value, list};
//!
//! let values = list!["foo", "bar", "baz"];
//!
//! assert_eq!(list::get(&values, 1), Some(&Value::from("foo")));
//! assert_eq!(list::get(&values, 0), Some(&Value::from("baz")));
//! assert_eq!(list::get(&values, -1), Some(&Value::from("bar")));
//!
//! let shifted = list::shift(&values);
//! assert!(list::equals([&shifted, &list!["bar", "baz"]]));
//! assert_eq!(values.len(), 3); // Original unchanged
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::slice;

use rustc_hash::FxHashSet;

use crate::container::{self, Container};
use crate::error::CollectionError;
use crate::value::ReferenceCounter;
use crate::{Set, Value};

// =============================================================================
// List Definition
// =============================================================================

/// Handle to an immutable ordered sequence.
///
/// Cloning the handle shares the sequence; use [`copy`] for a new one.
///
/// # Examples
///
/// ```rust
/// use tablekit::{List, Value};
///
/// let list: List = (1..=3).map(i64::from).collect();
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.as_slice()[0], Value::from(1));
/// ```
#[derive(Clone)]
pub struct List {
    elements: ReferenceCounter<Vec<Value>>,
}

impl List {
    /// Creates a new empty list.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_elements(Vec::new())
    }

    fn from_elements(elements: Vec<Value>) -> Self {
        Self {
            elements: ReferenceCounter::new(elements),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the elements as a slice, indexed from zero.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.elements
    }

    /// Returns an iterator over the elements.
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.elements.iter()
    }

    /// Returns `true` if both handles point at the same list.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.elements, &other.elements)
    }

    pub(crate) fn address(&self) -> usize {
        ReferenceCounter::as_ptr(&self.elements).cast::<()>().addr()
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Into<Value>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Container for List {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn copy(&self) -> Self {
        Self::from_elements(self.as_slice().to_vec())
    }

    fn copy_deep(&self) -> Self {
        self.iter().map(Value::copy_deep).collect()
    }

    fn equals(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }

    fn equals_deep(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(left, right)| left.equals_deep(right))
    }
}

impl fmt::Debug for List {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for List {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Index Normalization
// =============================================================================

fn signed(length: usize) -> i64 {
    i64::try_from(length).unwrap_or(i64::MAX)
}

fn unsigned(position: i64) -> usize {
    usize::try_from(position).unwrap_or(0)
}

/// Converts a relative-to-end index into an absolute 1-based position
/// among `length` positions. The result may lie outside `1..=length`.
fn normalize(index: i64, length: usize) -> i64 {
    if index < 1 {
        signed(length).saturating_add(index)
    } else {
        index
    }
}

/// Zero-based offset of the element at `index`, if there is one.
fn offset(index: i64, length: usize) -> Option<usize> {
    let position = normalize(index, length);
    (1..=signed(length))
        .contains(&position)
        .then(|| unsigned(position - 1))
}

fn out_of_bounds(operation: &'static str, index: i64, length: usize) -> CollectionError {
    let error = CollectionError::IndexOutOfBounds {
        operation,
        index,
        length,
    };
    tracing::debug!(%error, "rejected list write");
    error
}

// =============================================================================
// Constructors
// =============================================================================

/// Returns a list holding `count` handles of `value`.
///
/// A container value is shared by every position, not copied.
#[must_use]
pub fn create(count: usize, value: impl Into<Value>) -> List {
    List::from_elements(vec![value.into(); count])
}

// =============================================================================
// Copying and Comparing
// =============================================================================

/// Returns a shallow copy of `list`.
#[must_use]
pub fn copy(list: &List) -> List {
    list.copy()
}

/// Returns a deep copy of `list`.
#[must_use]
pub fn copy_deep(list: &List) -> List {
    list.copy_deep()
}

/// Returns `true` if all `lists` are shallowly equal.
pub fn equals<'a, I>(lists: I) -> bool
where
    I: IntoIterator<Item = &'a List>,
{
    container::equals_all(lists)
}

/// Returns `true` if all `lists` are deeply equal.
pub fn equals_deep<'a, I>(lists: I) -> bool
where
    I: IntoIterator<Item = &'a List>,
{
    container::equals_deep_all(lists)
}

// =============================================================================
// Persistent Changes
// =============================================================================

/// Concatenates `lists` in order.
#[must_use]
pub fn concat<'a, I>(lists: I) -> List
where
    I: IntoIterator<Item = &'a List>,
{
    lists.into_iter().flat_map(List::iter).cloned().collect()
}

pub use self::concat as join;

/// Concatenates `lists` in order, deep copying every element.
#[must_use]
pub fn concat_deep<'a, I>(lists: I) -> List
where
    I: IntoIterator<Item = &'a List>,
{
    lists
        .into_iter()
        .flat_map(List::iter)
        .map(Value::copy_deep)
        .collect()
}

pub use self::concat_deep as join_deep;

/// Inserts `values` as a block starting at `index`.
///
/// The index addresses the `len + 1` insertion slots, so `len + 1` (or `0`)
/// appends. Indices outside the slots are clamped to the nearest one.
///
/// # Examples
///
/// ```rust
/// use tablekit::list;
///
/// let values = list!["foo", "baz"];
/// let inserted = list::insert(&values, 2, ["bar"]);
/// assert!(list::equals([&inserted, &list!["foo", "bar", "baz"]]));
///
/// let appended = list::insert(&values, 0, ["qux"]);
/// assert!(list::equals([&appended, &list!["foo", "baz", "qux"]]));
/// ```
#[must_use]
pub fn insert<I>(list: &List, index: i64, values: I) -> List
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let slots = list.len() + 1;
    let position = normalize(index, slots).clamp(1, signed(slots));
    let (head, tail) = list.as_slice().split_at(unsigned(position - 1));
    head.iter()
        .cloned()
        .chain(values.into_iter().map(Into::into))
        .chain(tail.iter().cloned())
        .collect()
}

/// Returns `list` with `values` appended.
#[must_use]
pub fn push<I>(list: &List, values: I) -> List
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    list.iter()
        .cloned()
        .chain(values.into_iter().map(Into::into))
        .collect()
}

pub use self::push as append;

/// Returns `list` without its last element.
#[must_use]
pub fn pop(list: &List) -> List {
    pop_many(list, 1)
}

/// Returns `list` without its last `count` elements.
///
/// Popping more elements than the list has yields an empty list.
#[must_use]
pub fn pop_many(list: &List, count: usize) -> List {
    let keep = list.len().saturating_sub(count);
    List::from_elements(list.as_slice()[..keep].to_vec())
}

/// Returns `list` without its first element.
#[must_use]
pub fn shift(list: &List) -> List {
    shift_many(list, 1)
}

/// Returns `list` without its first `count` elements.
///
/// Shifting more elements than the list has yields an empty list.
#[must_use]
pub fn shift_many(list: &List, count: usize) -> List {
    let skip = count.min(list.len());
    List::from_elements(list.as_slice()[skip..].to_vec())
}

/// Returns `list` with `values` prepended.
#[must_use]
pub fn unshift<I>(list: &List, values: I) -> List
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    values
        .into_iter()
        .map(Into::into)
        .chain(list.iter().cloned())
        .collect()
}

/// Returns `list` without the element at `index`.
///
/// An index with no element is ignored.
#[must_use]
pub fn remove_index(list: &List, index: i64) -> List {
    remove_indices(list, [index])
}

/// Returns `list` without the elements at `indices`.
///
/// Indices are normalized against the original list; indices with no
/// element are ignored.
#[must_use]
pub fn remove_indices<I>(list: &List, indices: I) -> List
where
    I: IntoIterator<Item = i64>,
{
    let length = list.len();
    let removed: FxHashSet<usize> = indices
        .into_iter()
        .filter_map(|index| offset(index, length))
        .collect();
    list.iter()
        .enumerate()
        .filter(|(at, _)| !removed.contains(at))
        .map(|(_, value)| value.clone())
        .collect()
}

/// Returns `list` without every element equal to `value`.
#[must_use]
pub fn remove_value(list: &List, value: impl Into<Value>) -> List {
    remove_values(list, [value])
}

/// Returns `list` without every element equal to any of `values`.
///
/// Elements are compared shallowly.
#[must_use]
pub fn remove_values<I>(list: &List, values: I) -> List
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let removed: FxHashSet<Value> = values.into_iter().map(Into::into).collect();
    filter(list, |value, _| !removed.contains(value))
}

/// Returns `list` with the element at `index` replaced by `value`.
///
/// # Errors
///
/// Returns [`CollectionError::IndexOutOfBounds`] if there is no element at
/// `index`. The list is never extended.
pub fn set(list: &List, index: i64, value: impl Into<Value>) -> Result<List, CollectionError> {
    let Some(at) = offset(index, list.len()) else {
        return Err(out_of_bounds("list::set", index, list.len()));
    };
    let mut elements = list.as_slice().to_vec();
    elements[at] = value.into();
    Ok(List::from_elements(elements))
}

/// Returns `list` with the element at `index` replaced by
/// `updater(value, position)`.
///
/// `position` is the normalized 1-based index. If there is no element at
/// `index` the copy is returned unchanged.
#[must_use]
pub fn update<F, V>(list: &List, index: i64, updater: F) -> List
where
    F: FnOnce(&Value, usize) -> V,
    V: Into<Value>,
{
    let mut elements = list.as_slice().to_vec();
    if let Some(at) = offset(index, list.len()) {
        elements[at] = updater(&list.as_slice()[at], at + 1).into();
    }
    List::from_elements(elements)
}

/// Like [`update`], but appends `callback(position)` when `index` is the
/// position just past the end.
///
/// # Errors
///
/// Returns [`CollectionError::IndexOutOfBounds`] if `index` is neither an
/// existing position nor the one just past the end.
///
/// # Examples
///
/// ```rust
/// use tablekit::{Value, list};
///
/// let values = list!["foo", "bar"];
/// let fooify = |value: &Value, _: usize| format!("foo{value}");
///
/// let updated = list::update_or_else(&values, 2, fooify, |_| "baz").unwrap();
/// assert!(list::equals([&updated, &list!["foo", "foobar"]]));
///
/// let created = list::update_or_else(&values, 3, fooify, |_| "baz").unwrap();
/// assert!(list::equals([&created, &list!["foo", "bar", "baz"]]));
/// ```
pub fn update_or_else<F, C, U, V>(
    list: &List,
    index: i64,
    updater: F,
    callback: C,
) -> Result<List, CollectionError>
where
    F: FnOnce(&Value, usize) -> U,
    C: FnOnce(usize) -> V,
    U: Into<Value>,
    V: Into<Value>,
{
    let length = list.len();
    if offset(index, length).is_some() {
        return Ok(update(list, index, updater));
    }
    if normalize(index, length) == signed(length) + 1 {
        return Ok(push(list, [callback(length + 1)]));
    }
    Err(out_of_bounds("list::update_or_else", index, length))
}

// =============================================================================
// Sequence Algorithms
// =============================================================================

/// Returns the elements for which `predicate(value, position)` holds.
#[must_use]
pub fn filter<P>(list: &List, mut predicate: P) -> List
where
    P: FnMut(&Value, usize) -> bool,
{
    list.iter()
        .enumerate()
        .filter(|&(at, value)| predicate(value, at + 1))
        .map(|(_, value)| value.clone())
        .collect()
}

/// Returns `mapper(value, position)` for every element.
#[must_use]
pub fn map<F, V>(list: &List, mut mapper: F) -> List
where
    F: FnMut(&Value, usize) -> V,
    V: Into<Value>,
{
    list.iter()
        .enumerate()
        .map(|(at, value)| mapper(value, at + 1))
        .collect()
}

/// Returns the elements of `list` in reverse order.
#[must_use]
pub fn reverse(list: &List) -> List {
    list.iter().rev().cloned().collect()
}

/// Orders values of the same kind naturally and different kinds by a fixed
/// rank: the sentinel, booleans, numbers, text, lists, dictionaries, sets,
/// then objects.
///
/// Numbers compare exactly across `Int` and `Float`, agreeing with `==`.
/// Every `NaN` sorts after all other numbers.
fn natural_order(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(left), Value::Bool(right)) => left.cmp(right),
        (Value::Int(left), Value::Int(right)) => left.cmp(right),
        (Value::Float(left), Value::Float(right)) => compare_floats(*left, *right),
        (Value::Int(left), Value::Float(right)) => compare_mixed(*left, *right),
        (Value::Float(left), Value::Int(right)) => compare_mixed(*right, *left).reverse(),
        (Value::Text(left), Value::Text(right)) => left.cmp(right),
        _ => left.rank().cmp(&right.rank()),
    }
}

fn compare_floats(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
    }
}

/// Compares an integer against a float without rounding the integer.
#[allow(clippy::cast_possible_truncation)]
fn compare_mixed(integer: i64, float: f64) -> Ordering {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() || float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    let floor = float.floor();
    let whole = floor as i64;
    integer.cmp(&whole).then(if float > floor {
        Ordering::Less
    } else {
        Ordering::Equal
    })
}

/// Returns `list` sorted in natural order.
///
/// Numbers sort numerically, text lexicographically, `false` before
/// `true`; values of different kinds sort by kind. The sort is stable.
#[must_use]
pub fn sort(list: &List) -> List {
    let mut elements = list.as_slice().to_vec();
    elements.sort_by(natural_order);
    List::from_elements(elements)
}

/// Returns `list` sorted so that `a` comes before `b` whenever
/// `precedes(a, b)` holds.
///
/// The sort is stable: elements neither of which precedes the other keep
/// their relative order.
///
/// # Panics
///
/// May panic if `precedes` does not describe a strict weak ordering.
///
/// # Examples
///
/// ```rust
/// use tablekit::list;
///
/// let values = list![1, 3, 2];
/// let descending = list::sort_by(&values, |a, b| a.as_int() > b.as_int());
/// assert!(list::equals([&descending, &list![3, 2, 1]]));
/// ```
#[must_use]
pub fn sort_by<P>(list: &List, mut precedes: P) -> List
where
    P: FnMut(&Value, &Value) -> bool,
{
    let mut elements = list.as_slice().to_vec();
    elements.sort_by(|left, right| {
        if precedes(left, right) {
            Ordering::Less
        } else if precedes(right, left) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });
    List::from_elements(elements)
}

/// Zips `lists` together, stopping at the shortest.
///
/// Each element of the result is a list holding the values found at that
/// position in every input.
///
/// # Examples
///
/// ```rust
/// use tablekit::list;
///
/// let zipped = list::zip([&list!["foo", "bar", "baz"], &list![1, 2, 3, 4]]);
/// assert!(list::equals_deep([
///     &zipped,
///     &list![list!["foo", 1], list!["bar", 2], list!["baz", 3]],
/// ]));
/// ```
#[must_use]
pub fn zip<'a, I>(lists: I) -> List
where
    I: IntoIterator<Item = &'a List>,
{
    let lists: Vec<&List> = lists.into_iter().collect();
    let length = lists.iter().map(|list| list.len()).min().unwrap_or(0);
    (0..length)
        .map(|at| {
            lists
                .iter()
                .map(|list| list.as_slice()[at].clone())
                .collect::<List>()
        })
        .collect()
}

/// Zips `lists` together, continuing to the longest.
///
/// Positions past the end of a shorter list hold the sentinel.
///
/// # Examples
///
/// ```rust
/// use tablekit::{NONE, list};
///
/// let zipped = list::zip_all([&list!["foo", "bar", "baz"], &list![1, 2, 3, 4]]);
/// assert!(list::equals_deep([
///     &zipped,
///     &list![list!["foo", 1], list!["bar", 2], list!["baz", 3], list![NONE, 4]],
/// ]));
/// ```
#[must_use]
pub fn zip_all<'a, I>(lists: I) -> List
where
    I: IntoIterator<Item = &'a List>,
{
    let lists: Vec<&List> = lists.into_iter().collect();
    let length = lists.iter().map(|list| list.len()).max().unwrap_or(0);
    (0..length)
        .map(|at| {
            lists
                .iter()
                .map(|list| list.as_slice().get(at).cloned().unwrap_or(Value::None))
                .collect::<List>()
        })
        .collect()
}

// =============================================================================
// Creating Subsets
// =============================================================================

/// Returns the elements from `from` to `to`, both inclusive.
///
/// `None` bounds default to the start and the end. Bounds beyond the list
/// are clamped; an empty range yields an empty list.
///
/// # Examples
///
/// ```rust
/// use tablekit::list;
///
/// let values = list![1, 2, 3, 4, 5];
/// assert!(list::equals([&list::slice(&values, Some(1), Some(3)), &list![1, 2, 3]]));
/// assert!(list::equals([&list::slice(&values, Some(-1), None), &list![4, 5]]));
/// ```
#[must_use]
pub fn slice(list: &List, from: Option<i64>, to: Option<i64>) -> List {
    let length = list.len();
    let start = from.map_or(1, |index| normalize(index, length)).max(1);
    let end = to
        .map_or(signed(length), |index| normalize(index, length))
        .min(signed(length));
    if start > end {
        return List::new();
    }
    List::from_elements(list.as_slice()[unsigned(start - 1)..unsigned(end)].to_vec())
}

/// Replaces the elements from `from` to `to`, both inclusive, with
/// `values`.
///
/// When `to` precedes `from` nothing is removed and `values` are inserted
/// at `from`.
///
/// # Examples
///
/// ```rust
/// use tablekit::list;
///
/// let spliced = list::splice(&list!["foo", 2, 3], 2, 3, ["bar", "baz"]);
/// assert!(list::equals([&spliced, &list!["foo", "bar", "baz"]]));
/// ```
#[must_use]
pub fn splice<I>(list: &List, from: i64, to: i64, values: I) -> List
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let length = signed(list.len());
    let start = normalize(from, list.len()).clamp(1, length + 1);
    let end = normalize(to, list.len()).clamp(start - 1, length);
    let elements = list.as_slice();
    elements[..unsigned(start - 1)]
        .iter()
        .cloned()
        .chain(values.into_iter().map(Into::into))
        .chain(elements[unsigned(end)..].iter().cloned())
        .collect()
}

// =============================================================================
// Reading Values
// =============================================================================

/// Returns the element at `index`.
#[must_use]
pub fn get(list: &List, index: i64) -> Option<&Value> {
    offset(index, list.len()).map(|at| &list.as_slice()[at])
}

/// Returns the first element.
#[must_use]
pub fn first(list: &List) -> Option<&Value> {
    list.as_slice().first()
}

/// Returns the last element.
#[must_use]
pub fn last(list: &List) -> Option<&Value> {
    list.as_slice().last()
}

/// Returns `true` if any element equals `value`.
#[must_use]
pub fn includes(list: &List, value: impl Into<Value>) -> bool {
    let value = value.into();
    list.iter().any(|element| *element == value)
}

// =============================================================================
// Finding a Value
// =============================================================================

/// Returns the position of the first element equal to `value`, scanning
/// forward from `from` (default: the start).
#[must_use]
pub fn find(list: &List, value: impl Into<Value>, from: Option<i64>) -> Option<usize> {
    let value = value.into();
    find_where(list, |element, _| *element == value, from)
}

/// Returns the position of the last element equal to `value`, scanning
/// backward from `from` (default: the end).
#[must_use]
pub fn find_last(list: &List, value: impl Into<Value>, from: Option<i64>) -> Option<usize> {
    let value = value.into();
    find_where_last(list, |element, _| *element == value, from)
}

/// Returns the position of the first element satisfying
/// `predicate(value, position)`, scanning forward from `from`.
///
/// # Examples
///
/// ```rust
/// use tablekit::list;
///
/// let values = list![1, 2, 3, 4];
/// let even = |value: &tablekit::Value, _: usize| value.as_int().is_some_and(|n| n % 2 == 0);
/// assert_eq!(list::find_where(&values, even, None), Some(2));
/// assert_eq!(list::find_where(&values, even, Some(3)), Some(4));
/// assert_eq!(list::find_where_last(&values, even, Some(-1)), Some(2));
/// ```
#[must_use]
pub fn find_where<P>(list: &List, mut predicate: P, from: Option<i64>) -> Option<usize>
where
    P: FnMut(&Value, usize) -> bool,
{
    let start = from.map_or(1, |index| normalize(index, list.len())).max(1);
    list.iter()
        .enumerate()
        .skip(unsigned(start - 1))
        .find(|&(at, value)| predicate(value, at + 1))
        .map(|(at, _)| at + 1)
}

/// Returns the position of the last element satisfying
/// `predicate(value, position)`, scanning backward from `from`.
#[must_use]
pub fn find_where_last<P>(list: &List, mut predicate: P, from: Option<i64>) -> Option<usize>
where
    P: FnMut(&Value, usize) -> bool,
{
    let length = list.len();
    let end = from
        .map_or(signed(length), |index| normalize(index, length))
        .min(signed(length));
    if end < 1 {
        return None;
    }
    list.as_slice()[..unsigned(end)]
        .iter()
        .enumerate()
        .rev()
        .find(|&(at, value)| predicate(value, at + 1))
        .map(|(at, _)| at + 1)
}

// =============================================================================
// Conversion
// =============================================================================

/// Returns a set holding the elements of `list`.
#[must_use]
pub fn to_set(list: &List) -> Set {
    list.iter().cloned().collect()
}

// =============================================================================
// Reducing
// =============================================================================

/// Returns the number of elements.
#[must_use]
pub fn count(list: &List) -> usize {
    list.len()
}

/// Returns the number of elements for which `predicate(value, position)`
/// holds.
#[must_use]
pub fn count_where<P>(list: &List, mut predicate: P) -> usize
where
    P: FnMut(&Value, usize) -> bool,
{
    list.iter()
        .enumerate()
        .filter(|&(at, value)| predicate(value, at + 1))
        .count()
}

/// Returns `true` if `predicate(value, position)` holds for every element.
#[must_use]
pub fn every<P>(list: &List, mut predicate: P) -> bool
where
    P: FnMut(&Value, usize) -> bool,
{
    list.iter()
        .enumerate()
        .all(|(at, value)| predicate(value, at + 1))
}

/// Returns `true` if `predicate(value, position)` holds for any element.
#[must_use]
pub fn some<P>(list: &List, mut predicate: P) -> bool
where
    P: FnMut(&Value, usize) -> bool,
{
    list.iter()
        .enumerate()
        .any(|(at, value)| predicate(value, at + 1))
}

/// Folds `list` from left to right with `reducer(accumulator, value,
/// position)`.
///
/// Without `initial`, the first element seeds the accumulator and folding
/// starts at the second.
///
/// # Errors
///
/// Returns [`CollectionError::EmptyReduction`] if `list` is empty and no
/// `initial` value is given.
///
/// # Examples
///
/// ```rust
/// use tablekit::{Value, list};
///
/// let add = |total: Value, value: &Value, _: usize| {
///     Value::from(total.as_int().unwrap_or(0) + value.as_int().unwrap_or(0))
/// };
///
/// assert_eq!(list::reduce(&list![1, 2, 3], add, None), Ok(Value::from(6)));
/// assert!(list::reduce(&list![], add, None).is_err());
/// assert_eq!(list::reduce(&list![], add, Some(Value::from(0))), Ok(Value::from(0)));
/// ```
pub fn reduce<F>(list: &List, mut reducer: F, initial: Option<Value>) -> Result<Value, CollectionError>
where
    F: FnMut(Value, &Value, usize) -> Value,
{
    let mut elements = list.iter().enumerate();
    let seed = match initial {
        Some(initial) => initial,
        None => match elements.next() {
            Some((_, first)) => first.clone(),
            None => return Err(empty_reduction("list::reduce")),
        },
    };
    Ok(elements.fold(seed, |accumulator, (at, value)| {
        reducer(accumulator, value, at + 1)
    }))
}

/// Folds `list` from right to left with `reducer(accumulator, value,
/// position)`.
///
/// Without `initial`, the last element seeds the accumulator and folding
/// starts at the second-to-last.
///
/// # Errors
///
/// Returns [`CollectionError::EmptyReduction`] if `list` is empty and no
/// `initial` value is given.
pub fn reduce_right<F>(
    list: &List,
    mut reducer: F,
    initial: Option<Value>,
) -> Result<Value, CollectionError>
where
    F: FnMut(Value, &Value, usize) -> Value,
{
    let mut elements = list.iter().enumerate().rev();
    let seed = match initial {
        Some(initial) => initial,
        None => match elements.next() {
            Some((_, last)) => last.clone(),
            None => return Err(empty_reduction("list::reduce_right")),
        },
    };
    Ok(elements.fold(seed, |accumulator, (at, value)| {
        reducer(accumulator, value, at + 1)
    }))
}

fn empty_reduction(operation: &'static str) -> CollectionError {
    let error = CollectionError::EmptyReduction { operation };
    tracing::debug!(%error, "rejected reduction");
    error
}

// =============================================================================
// Combination
// =============================================================================

/// Splices nested lists into their parent, up to `depth` levels.
///
/// `None` flattens as deeply as possible. Elements that are not lists pass
/// through unchanged.
///
/// # Examples
///
/// ```rust
/// use tablekit::list;
///
/// let nested = list!["foo", list!["bar", list!["baz"]]];
/// assert!(list::equals([&list::flatten(&nested, None), &list!["foo", "bar", "baz"]]));
/// assert_eq!(list::flatten(&nested, Some(1)).len(), 3);
/// ```
#[must_use]
pub fn flatten(list: &List, depth: Option<usize>) -> List {
    let mut elements = Vec::with_capacity(list.len());
    flatten_into(&mut elements, list, depth);
    List::from_elements(elements)
}

fn flatten_into(elements: &mut Vec<Value>, list: &List, depth: Option<usize>) {
    for value in list {
        match value {
            Value::List(nested) if depth != Some(0) => {
                tracing::trace!(?depth, length = nested.len(), "flattening nested list");
                flatten_into(elements, nested, depth.map(|remaining| remaining - 1));
            }
            _ => elements.push(value.clone()),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
pub(crate) struct ListVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for ListVisitor {
    type Value = List;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element::<Value>()? {
            elements.push(element);
        }
        Ok(List::from_elements(elements))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for List {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ListVisitor)
    }
}

// =============================================================================
// Tests
// =============================================================================
