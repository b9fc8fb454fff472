//! # tablekit
//!
//! Immutable list, dictionary, and set operations over a dynamically typed
//! value model.
//!
//! ## Overview
//!
//! Every operation takes containers by reference and returns a new
//! container; inputs are never modified. Containers hold [`Value`]s, which
//! are either primitives (compared by value) or handles to other containers
//! and opaque objects (compared by identity).
//!
//! - **[`list`]**: dense sequences addressed with 1-based, end-relative
//!   indices
//! - **[`dictionary`]**: key-value mappings with sentinel-aware merging
//! - **[`set`]**: unordered collections of unique values
//! - **[`container`]**: the copy and equality contract the three share
//!
//! ## Feature Flags
//!
//! - `arc`: Use `Arc` instead of `Rc` for container handles, making every
//!   value `Send + Sync`
//! - `serde`: Serialize and deserialize values and containers
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use tablekit::prelude::*;
//!
//! let defaults = dictionary! { "retries" => 3, "verbose" => false };
//! let overrides = dictionary! { "verbose" => true, "retries" => NONE };
//!
//! let settings = dictionary::merge([&defaults, &overrides]);
//! assert!(dictionary::equals([&settings, &dictionary! { "verbose" => true }]));
//!
//! let names = list!["carol", "alice", "bob"];
//! assert!(list::equals([&list::sort(&names), &list!["alice", "bob", "carol"]]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the container types, the value model, and the operation
/// modules together with their literal macros.
///
/// # Usage
///
/// ```rust
/// use tablekit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::container::{Container, equal_objects, is_empty};
    pub use crate::error::CollectionError;
    pub use crate::value::{NONE, Object, Value};
    pub use crate::{Dictionary, List, Set};
    pub use crate::{dictionary, list, set};
}

mod macros;

pub mod container;
pub mod dictionary;
pub mod error;
pub mod list;
pub mod set;
pub mod value;

pub use container::{Container, equal_objects, is_empty};
pub use dictionary::{Dictionary, Mapping};
pub use error::CollectionError;
pub use list::List;
pub use set::Set;
pub use value::{NONE, Object, Value};
