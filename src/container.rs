//! The copy and equality contract shared by lists, dictionaries, and sets.
//!
//! Every container kind answers the same four questions:
//!
//! - [`Container::copy`]: a new top-level container whose nested containers
//!   are shared with the original.
//! - [`Container::copy_deep`]: a new container sharing no nested container
//!   with the original.
//! - [`Container::equals`]: same keys (or positions, or members) with values
//!   equal under shallow [`Value`] equality.
//! - [`Container::equals_deep`]: as `equals`, comparing nested containers
//!   structurally.
//!
//! For every container `x`, `x.copy().equals(&x)` and
//! `x.copy_deep().equals_deep(&x)` hold.
//!
//! Containers are immutable once built, so no container can reach itself
//! and the deep operations always terminate.

use crate::Value;

/// A list, dictionary, or set handle.
///
/// # Examples
///
/// ```rust
/// use tablekit::{Container, list};
///
/// let original = list![list![1, 2], 3];
///
/// let shallow = original.copy();
/// assert!(!shallow.ptr_eq(&original));
/// assert!(shallow.equals(&original));
///
/// let deep = original.copy_deep();
/// assert!(!deep.equals(&original));
/// assert!(deep.equals_deep(&original));
/// ```
pub trait Container {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a new container sharing nested containers with `self`.
    #[must_use]
    fn copy(&self) -> Self
    where
        Self: Sized;

    /// Returns a new container sharing no nested container with `self`.
    #[must_use]
    fn copy_deep(&self) -> Self
    where
        Self: Sized;

    /// Shallow structural equality.
    fn equals(&self, other: &Self) -> bool;

    /// Deep structural equality.
    fn equals_deep(&self, other: &Self) -> bool;
}

/// Returns `true` if every container [`equals`](Container::equals) the first.
///
/// Zero or one container is trivially equal.
pub fn equals_all<'a, C, I>(containers: I) -> bool
where
    C: Container + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut containers = containers.into_iter();
    let Some(first) = containers.next() else {
        return true;
    };
    containers.all(|other| first.equals(other))
}

/// Returns `true` if every container
/// [`equals_deep`](Container::equals_deep) the first.
///
/// Zero or one container is trivially equal.
pub fn equals_deep_all<'a, C, I>(containers: I) -> bool
where
    C: Container + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut containers = containers.into_iter();
    let Some(first) = containers.next() else {
        return true;
    };
    containers.all(|other| first.equals_deep(other))
}

/// Returns `true` if every item is the same as the first.
///
/// Containers and objects must be the very same handle; primitives compare
/// by value. Zero or one item is trivially equal.
///
/// # Examples
///
/// ```rust
/// use tablekit::{Value, equal_objects, list};
///
/// let list = Value::from(list![1]);
/// assert!(equal_objects([&list, &list.clone()]));
/// assert!(!equal_objects([&list, &Value::from(list![1])]));
/// ```
pub fn equal_objects<'a, I>(items: I) -> bool
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut items = items.into_iter();
    let Some(first) = items.next() else {
        return true;
    };
    items.all(|item| item == first)
}

/// Returns `true` if the container has no entries.
pub fn is_empty<C: Container>(container: &C) -> bool {
    container.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dictionary, List, Set, dictionary, list, set};
    use rstest::rstest;

    #[rstest]
    fn test_equals_all_is_trivially_true_for_zero_and_one() {
        assert!(equals_all::<List, _>([]));
        assert!(equals_all([&list![1]]));
        assert!(equals_deep_all::<Dictionary, _>([]));
    }

    #[rstest]
    fn test_equals_all_checks_every_container() {
        let first = list![1, 2];
        let second = first.copy();
        let third = list![1, 3];
        assert!(equals_all([&first, &second]));
        assert!(!equals_all([&first, &second, &third]));
    }

    #[rstest]
    fn test_equal_objects_with_primitives() {
        let one = Value::from(1);
        let also_one = Value::from(1.0);
        let two = Value::from(2);
        assert!(equal_objects([&one, &also_one]));
        assert!(!equal_objects([&one, &two]));
        assert!(equal_objects([]));
    }

    #[rstest]
    fn test_is_empty_covers_every_kind() {
        assert!(is_empty(&List::new()));
        assert!(is_empty(&Dictionary::new()));
        assert!(is_empty(&Set::new()));
        assert!(!is_empty(&list![1]));
        assert!(!is_empty(&dictionary! { "foo" => 1 }));
        assert!(!is_empty(&set![1]));
    }
}
