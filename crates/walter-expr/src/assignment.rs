//! Assignment resolution: find the override that applies to an object.
//!
//! Override layers store assignments keyed by [`Expression`] in a sorted
//! map. For a given object the applicable assignment is chosen with this
//! priority:
//!
//! 1. an expression naming exactly this object,
//! 2. a pattern matching this object,
//! 3. the closest literal ancestor.
//!
//! The map is walked in reverse so a deep ancestor (`/geo/ship/hull`) is
//! met before a shallow one (`/geo`).

use std::collections::BTreeMap;

use tracing::trace;

use crate::expression::{Expression, PathRelation};

/// Resolve the assignment that applies to `full_name`.
///
/// An ancestor hit is remembered but does not end the walk: a pattern
/// further along may still match the object itself, and an expression
/// match outranks inheritance from a parent.
pub fn resolve_assignment<'a, T>(
    full_name: &str,
    assignments: &'a BTreeMap<Expression, T>,
) -> Option<&'a T> {
    let mut inherited: Option<&T> = None;

    for (expression, value) in assignments.iter().rev() {
        if inherited.is_none() {
            match expression.relation_to(full_name) {
                PathRelation::Itself => {
                    trace!(expression = %expression, path = full_name, "exact assignment");
                    return Some(value);
                }
                PathRelation::Ancestor => {
                    // Keep looking: an expression match has higher
                    // priority than a parent object.
                    inherited = Some(value);
                }
                PathRelation::Unrelated => {}
            }
        }

        if expression.matches_path(full_name) {
            trace!(expression = %expression, path = full_name, "pattern assignment");
            return Some(value);
        }
    }

    inherited
}
