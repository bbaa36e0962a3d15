//! Wildcard expression synthesis for Walter multi-selections.
//!
//! When several scene-graph objects are selected at once, the outliner
//! offers to copy a single expression covering all of them. This crate
//! computes that expression: the inputs are aligned with a longest common
//! subsequence table and every non-matching span collapses into one `.*`
//! wildcard.
//!
//! # Key Types
//!
//! - [`ExpressionMerger`] -- precomputed alignment of two paths, queried with [`merge`]
//! - [`merge_expressions`] -- one-shot merge of two paths
//! - [`merge_all`] -- left fold of pairwise merges over a whole selection
//!
//! [`merge`]: ExpressionMerger::merge

pub mod merge;

pub use merge::{merge_all, merge_expressions, ExpressionMerger};
