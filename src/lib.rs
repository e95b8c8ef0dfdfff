//! # treedump
//!
//! Schema-less conversion of in-memory object graphs into XML element
//! trees, element-per-member. No serializer is written per type and no
//! schema is declared up front: the caller describes a value as a tagged
//! union (scalar, sequence, or composite with named members) and the
//! builder turns it into a fresh element tree, deciding for each value
//! whether it is a leaf (written as text) or a composite (recursed into).
//!
//! Absent values produce no elements at all; sequences flatten into a
//! container whose children are named after their own runtime types; member
//! names can be overridden with naming hints, where the last hint wins.
//!
//! ## Quick Start
//!
//! ```
//! use treedump::{build_named, Composite, Member, Value};
//! use treedump::serial::serialize;
//!
//! let point = Composite::new("Point")
//!     .property(Member::new("X", 5))
//!     .property(Member::new("Y", "z"));
//! let tree = build_named(Some(&Value::from(point)), "Root").unwrap().unwrap();
//! assert_eq!(serialize(&tree), "<Root><X>5</X><Y>z</Y></Root>");
//! ```

pub mod builder;
pub mod error;
pub mod name;
pub mod serial;
pub mod tree;
pub mod value;

// Re-export primary types at the crate root for convenience.
pub use builder::{build, build_named, DEFAULT_NAME};
pub use error::BuildError;
pub use tree::{ElementId, Tree};
pub use value::{Composite, Member, MemberValue, NameHint, Scalar, Sequence, Value};
