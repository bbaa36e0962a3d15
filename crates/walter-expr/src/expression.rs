//! Scene-graph expressions: literal paths and regex patterns.
//!
//! A Walter expression is either the full name of a single scene-graph
//! object (`/geo/ship/hull`) or a regex pattern selecting several objects
//! at once (`/geo/ship.*`). [`Expression`] classifies the text once at
//! construction and caches everything needed to match it cheaply
//! afterwards.
//!
//! # Invariants
//!
//! - A literal expression never matches as a pattern; a pattern is never
//!   treated as an ancestor of anything.
//! - The minimum-length pre-filter never rejects a path the compiled
//!   pattern would accept.
//! - Ordering, equality, and hashing are those of the expression text, so
//!   `Expression` can key a `BTreeMap` of assignments.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ExprError, ExprResult};

/// Characters that mark an expression as a regex pattern rather than a
/// plain object name.
const PATTERN_CHARS: &[char] = &[
    '.', '*', '+', '|', '<', '>', '&', '-', '[', ']', '(', ')', '{', '}', '?', '$', '^', '\\',
];

/// How a literal expression relates to a given object path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathRelation {
    /// The expression is not an ancestor of the path.
    Unrelated,
    /// The expression names a strict ancestor of the path.
    Ancestor,
    /// The expression names exactly this path.
    Itself,
}

/// A classified expression: a literal object path or a compiled pattern.
#[derive(Clone, Debug)]
pub struct Expression {
    /// The expression text as the user wrote it.
    text: String,
    /// Pattern state; `None` for literal paths.
    pattern: Option<Pattern>,
    /// The minimum length a path must have to possibly match. Used as a
    /// cheap filter before the regex runs.
    min_len: usize,
}

/// The cached pattern half of an [`Expression`].
#[derive(Clone, Debug)]
struct Pattern {
    /// The compiled regex, anchored to match the whole path.
    regex: regex::Regex,
    /// The expression text with every pattern construct removed. Any path
    /// matching the regex must contain at least this many characters.
    skeleton: String,
}

impl Expression {
    /// Classify `text` and, if it is a pattern, compile it.
    ///
    /// The only failure is an uncompilable pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use walter_expr::Expression;
    ///
    /// let literal = Expression::new("/geo/ship/hull").unwrap();
    /// assert!(!literal.is_pattern());
    ///
    /// let pattern = Expression::new("/geo/ship.*").unwrap();
    /// assert!(pattern.is_pattern());
    /// assert!(pattern.matches_path("/geo/shipA"));
    /// ```
    pub fn new(text: impl Into<String>) -> ExprResult<Self> {
        let text = text.into();

        if !text.contains(PATTERN_CHARS) {
            // A plain object name. Matching is string comparison only.
            let min_len = text.len();
            return Ok(Self {
                text,
                pattern: None,
                min_len,
            });
        }

        let regex = compile_anchored(&text)?;
        let skeleton = strip_pattern_constructs(&text);
        let min_len = skeleton.len();

        Ok(Self {
            text,
            pattern: Some(Pattern { regex, skeleton }),
            min_len,
        })
    }

    /// The expression text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if this expression is a regex pattern.
    pub fn is_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    /// Relate this expression to an object path by name.
    ///
    /// Only literal expressions take part in parent/child reasoning;
    /// patterns are always [`PathRelation::Unrelated`]. An ancestor must
    /// end at a `/` boundary in the path, so `/Hello` is never reported as
    /// an ancestor of `/HelloWorld`.
    pub fn relation_to(&self, full_name: &str) -> PathRelation {
        if self.is_pattern() || full_name.len() < self.min_len {
            return PathRelation::Unrelated;
        }

        if !full_name.starts_with(&self.text) {
            return PathRelation::Unrelated;
        }

        if full_name.len() == self.min_len {
            return PathRelation::Itself;
        }

        if full_name.as_bytes()[self.min_len] == b'/' {
            PathRelation::Ancestor
        } else {
            PathRelation::Unrelated
        }
    }

    /// Returns `true` if this expression is a pattern matching the whole
    /// of `full_name`.
    ///
    /// Literal expressions never match here; they are handled by
    /// [`relation_to`](Self::relation_to).
    pub fn matches_path(&self, full_name: &str) -> bool {
        if full_name.len() < self.min_len {
            // Shorter than the literal skeleton: cannot match.
            return false;
        }

        match &self.pattern {
            Some(pattern) => pattern.regex.is_match(full_name),
            None => false,
        }
    }

    /// Returns `true` if this pattern covers `other`.
    ///
    /// A literal `other` is matched as a path. A pattern `other` is matched
    /// through its literal skeleton, which detects expressions selecting
    /// overlapping sets of objects.
    pub fn matches_expression(&self, other: &Expression) -> bool {
        if !self.is_pattern() {
            return false;
        }

        match &other.pattern {
            None => self.matches_path(&other.text),
            Some(pattern) => self.matches_path(&pattern.skeleton),
        }
    }
}

/// Compile pattern text as a whole-string match.
///
/// Walter patterns are written unanchored but always compared against the
/// full object path, never a substring.
fn compile_anchored(text: &str) -> ExprResult<regex::Regex> {
    regex::Regex::new(&format!("^(?:{text})$")).map_err(|source| ExprError::InvalidPattern {
        pattern: text.to_string(),
        source,
    })
}

/// Delete every pattern construct from `text`, leaving the characters any
/// matching path must contain.
fn strip_pattern_constructs(text: &str) -> String {
    let mut skeleton = text.to_string();

    // Bracketed groups can contain arbitrary text; drop their contents
    // before stripping the individual pattern characters.
    erase_bracketed(&mut skeleton, '[', ']');
    erase_bracketed(&mut skeleton, '(', ')');
    erase_bracketed(&mut skeleton, '{', '}');

    skeleton.retain(|c| !PATTERN_CHARS.contains(&c));
    skeleton
}

/// Erase everything from each `open` up to (not including) the next
/// `close`. Unbalanced brackets are left in place.
fn erase_bracketed(text: &mut String, open: char, close: char) {
    loop {
        let Some(start) = text.find(open) else {
            break;
        };
        let Some(len) = text[start..].find(close) else {
            break;
        };
        text.drain(start..start + len);
    }
}

/// One-shot pattern match: compile `pattern` and match it against the
/// whole of `path`.
///
/// For repeated matching against many paths, build an [`Expression`] once
/// instead.
pub fn match_pattern(pattern: &str, path: &str) -> ExprResult<bool> {
    let regex = compile_anchored(pattern)?;
    Ok(regex.is_match(path))
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

// Ordering and equality follow the text so assignment maps stay sorted by
// expression, matching the storage layout of override layers.

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Expression {}

impl PartialOrd for Expression {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Expression {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.text.cmp(&other.text)
    }
}

impl std::hash::Hash for Expression {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

// Expressions travel through layer files as bare strings; classification
// is re-derived on load.

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Expression::new(text).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_is_not_a_pattern() {
        let expr = Expression::new("/geo/ship/hull").unwrap();
        assert!(!expr.is_pattern());
        assert_eq!(expr.text(), "/geo/ship/hull");
    }

    #[test]
    fn pattern_chars_trigger_classification() {
        for text in ["/geo/ship.*", "/geo/ship[AB]", "/geo/(a|b)", "/geo/\\d+"] {
            let expr = Expression::new(text).unwrap();
            assert!(expr.is_pattern(), "{text} should classify as a pattern");
        }
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = Expression::new("/geo/ship[").unwrap_err();
        assert!(matches!(err, ExprError::InvalidPattern { .. }));
    }

    #[test]
    fn relation_exact_and_ancestor() {
        let expr = Expression::new("/geo/ship").unwrap();
        assert_eq!(expr.relation_to("/geo/ship"), PathRelation::Itself);
        assert_eq!(expr.relation_to("/geo/ship/hull"), PathRelation::Ancestor);
        assert_eq!(expr.relation_to("/geo/boat"), PathRelation::Unrelated);
    }

    #[test]
    fn prefix_without_separator_is_not_ancestor() {
        let expr = Expression::new("/Hello").unwrap();
        assert_eq!(expr.relation_to("/HelloWorld"), PathRelation::Unrelated);
        assert_eq!(expr.relation_to("/Hello/World"), PathRelation::Ancestor);
    }

    #[test]
    fn pattern_never_relates() {
        let expr = Expression::new("/geo/ship.*").unwrap();
        assert_eq!(expr.relation_to("/geo/shipA/hull"), PathRelation::Unrelated);
    }

    #[test]
    fn pattern_matches_whole_path_only() {
        let expr = Expression::new("/geo/ship.*").unwrap();
        assert!(expr.matches_path("/geo/ship"));
        assert!(expr.matches_path("/geo/shipA/hull"));
        // Substring matches are not full matches.
        assert!(!expr.matches_path("/root/geo/shipA"));
    }

    #[test]
    fn literal_never_matches_as_pattern() {
        let expr = Expression::new("/geo/ship").unwrap();
        assert!(!expr.matches_path("/geo/ship"));
    }

    #[test]
    fn min_length_filter_rejects_short_paths() {
        let expr = Expression::new("/geo/ship_[0-9]+_hi").unwrap();
        // Skeleton is "/geo/ship__hi": anything shorter cannot match.
        assert!(!expr.matches_path("/geo"));
        assert!(expr.matches_path("/geo/ship_042_hi"));
    }

    #[test]
    fn skeleton_strips_bracket_contents() {
        assert_eq!(strip_pattern_constructs("/geo/ship[AB]_hi"), "/geo/ship_hi");
        assert_eq!(strip_pattern_constructs("/geo/(a|b)/hull"), "/geo//hull");
        assert_eq!(strip_pattern_constructs("ship.*"), "ship");
    }

    #[test]
    fn unbalanced_bracket_is_left_for_stripping() {
        // No closing bracket: contents survive, the bracket itself does not.
        assert_eq!(strip_pattern_constructs("a[bc"), "abc");
    }

    #[test]
    fn pattern_covers_expression() {
        let wide = Expression::new("/geo/ship.*").unwrap();
        let narrow = Expression::new("/geo/ship[AB]/hull").unwrap();
        let literal = Expression::new("/geo/shipA").unwrap();
        assert!(wide.matches_expression(&narrow));
        assert!(wide.matches_expression(&literal));
        assert!(!narrow.matches_expression(&wide));
    }

    #[test]
    fn match_pattern_one_shot() {
        assert!(match_pattern(r"\w+\s\w+", "Boost Libraries").unwrap());
        assert!(!match_pattern(r"\d+", "abc").unwrap());
        assert!(match_pattern("/geo/.*", "/geo/ship").unwrap());
        assert!(match_pattern("/geo", "/geo/ship").is_ok_and(|m| !m));
    }

    #[test]
    fn ordering_follows_text() {
        let a = Expression::new("/a").unwrap();
        let b = Expression::new("/b").unwrap();
        assert!(a < b);
        assert_eq!(a, Expression::new("/a").unwrap());
    }

    #[test]
    fn serde_round_trip_as_string() {
        let expr = Expression::new("/geo/ship.*").unwrap();
        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(json, "\"/geo/ship.*\"");

        let back: Expression = serde_json::from_str(&json).unwrap();
        assert!(back.is_pattern());
        assert_eq!(back, expr);
    }

    #[test]
    fn serde_rejects_invalid_pattern() {
        let result: Result<Expression, _> = serde_json::from_str("\"/geo/ship[\"");
        assert!(result.is_err());
    }
}
