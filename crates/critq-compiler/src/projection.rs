//! Outer-query projection composition
//!
//! Walks the criterion tree in post-order, mirroring predicate
//! compilation, and collects projection contributions for the outer query.
//! The only projection-producing kind today is `Count`, and its group-by/
//! having projection is attached to the inner correlated subquery during
//! the count rewrite, so the outer list stays empty and this composer
//! yields `None`.

use critq_ast::SearchCriterion;
use critq_target::Projection;

/// Compose the outer-query projection list for a criterion tree
pub(crate) fn compose(root: &SearchCriterion) -> Option<Projection> {
    let mut parts = Vec::new();
    collect(root, &mut parts);
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(Projection::List(parts)),
    }
}

fn collect(node: &SearchCriterion, parts: &mut Vec<Projection>) {
    for child in &node.children {
        collect(child, parts);
    }
    // Count contributes its projection to the correlated subquery, not to
    // the outer query; no kind contributes here today.
}
