//! Literal syntax for lists, dictionaries, and sets.
//!
//! Each element, key, and value goes through [`Value::from`](crate::Value),
//! so literals of different kinds mix freely.

/// Creates a [`List`](crate::List) from its elements.
///
/// # Examples
///
/// ```rust
/// use tablekit::{List, NONE, list};
///
/// let empty: List = list![];
/// assert!(empty.is_empty());
///
/// let mixed = list![1, "two", 3.5, NONE, list![true]];
/// assert_eq!(mixed.len(), 5);
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::List::new()
    };
    ($($element:expr),+ $(,)?) => {
        <$crate::List as ::core::iter::FromIterator<$crate::Value>>::from_iter([
            $($crate::Value::from($element)),+
        ])
    };
}

/// Creates a [`Dictionary`](crate::Dictionary) from `key => value` pairs.
///
/// A repeated key keeps the value written last.
///
/// # Examples
///
/// ```rust
/// use tablekit::{Value, dictionary};
///
/// let config = dictionary! {
///     "name" => "tablekit",
///     "retries" => 3,
///     1 => dictionary! { "nested" => true },
/// };
/// assert_eq!(config.len(), 3);
/// assert_eq!(config.get(&Value::from("retries")), Some(&Value::from(3)));
/// ```
#[macro_export]
macro_rules! dictionary {
    () => {
        $crate::Dictionary::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        <$crate::Dictionary as ::core::iter::FromIterator<($crate::Value, $crate::Value)>>::from_iter([
            $(($crate::Value::from($key), $crate::Value::from($value))),+
        ])
    };
}

/// Creates a [`Set`](crate::Set) from its members.
///
/// # Examples
///
/// ```rust
/// use tablekit::set;
///
/// let members = set!["foo", "bar", "foo"];
/// assert_eq!(members.len(), 2);
/// ```
#[macro_export]
macro_rules! set {
    () => {
        $crate::Set::new()
    };
    ($($member:expr),+ $(,)?) => {
        <$crate::Set as ::core::iter::FromIterator<$crate::Value>>::from_iter([
            $($crate::Value::from($member)),+
        ])
    };
}
