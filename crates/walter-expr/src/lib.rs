//! Expression and path matching for Walter layered scene composition.
//!
//! Override layers address scene-graph objects either by full name
//! (`/geo/ship/hull`) or by regex pattern (`/geo/ship.*`). This crate
//! classifies and matches such expressions and resolves which assignment
//! applies to a given object.
//!
//! # Key Types
//!
//! - [`Expression`] -- a classified expression: literal path or compiled pattern
//! - [`PathRelation`] -- how a literal expression relates to an object path
//! - [`resolve_assignment`] -- priority-based lookup over a sorted assignment map
//! - [`mangle`] / [`demangle`] / [`convert_regex`] -- storage-safe text forms

pub mod assignment;
pub mod error;
pub mod expression;
pub mod mangle;

pub use assignment::resolve_assignment;
pub use error::{ExprError, ExprResult};
pub use expression::{match_pattern, Expression, PathRelation};
pub use mangle::{convert_regex, demangle, mangle};
