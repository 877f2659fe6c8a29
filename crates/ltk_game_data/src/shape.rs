//! Ordered shape search over schema-free JSON.
//!
//! When an upstream payload has no documented layout, lookups are expressed as
//! a list of [`ShapeCandidate`]s tried in order. The first candidate that
//! recognizes the payload wins, and its name is reported alongside the match so
//! precedence can be logged and tested.

use serde_json::Value;

/// Extracts a node from `root`, or `None` when the payload is not in this shape.
pub type Extractor<C> = for<'v> fn(&'v Value, &C) -> Option<&'v Value>;

/// One candidate layout in a shape search.
pub struct ShapeCandidate<C> {
    pub name: &'static str,
    pub extract: Extractor<C>,
}

impl<C> ShapeCandidate<C> {
    pub const fn new(name: &'static str, extract: Extractor<C>) -> Self {
        Self { name, extract }
    }
}

/// Return the first candidate's match, along with the candidate's name.
pub fn first_match<'v, C>(
    candidates: &[ShapeCandidate<C>],
    root: &'v Value,
    ctx: &C,
) -> Option<(&'static str, &'v Value)> {
    candidates
        .iter()
        .find_map(|c| (c.extract)(root, ctx).map(|v| (c.name, v)))
}

/// Look up the first present, non-null field among `aliases`.
pub fn field<'v>(value: &'v Value, aliases: &[&str]) -> Option<&'v Value> {
    aliases
        .iter()
        .filter_map(|alias| value.get(*alias))
        .find(|v| !v.is_null())
}
