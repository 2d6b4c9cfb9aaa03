//! Cardinality normalization of repeated elements.
//!
//! The remote schema sends a repeated element as a lone mapping when exactly
//! one is present and as a list otherwise; an empty collection is usually
//! omitted altogether. This is the only place that branches on that shape.

use crate::normalize::tree::Node;

/// Canonical ordered sequence for a repeated element.
///
/// A lone `Map` becomes a one-element sequence and a `List` passes through.
/// Anything else, absence included, is an empty sequence.
pub fn repeated(node: Option<&Node>) -> Vec<&Node> {
    match node {
        Some(node @ Node::Map(_)) => vec![node],
        Some(Node::List(items)) => items.iter().collect(),
        _ => Vec::new(),
    }
}
