//! Entity field and relation descriptors
//!
//! Both are table-driven: a closed kind enum supplies the defaults, a single struct
//! carries the per-field overrides.

pub mod field;
pub mod relation;

pub use field::{Field, FieldKind, TypeSpec};
pub use relation::{FetchMode, Relation, RelationKind};
