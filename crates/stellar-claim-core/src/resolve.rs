use crate::predicate::ClaimPredicate;
use serde::{Deserialize, Serialize};

/// Claimability of a balance at a given reference time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimStatus {
    /// The predicate evaluates true right now.
    Claimable,
    /// Currently false but not provably dead; it may become true later.
    NotYetClaimable,
    /// Past a derived upper bound: provably never true again.
    Expired,
}

/// Result of resolving a predicate at a reference time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredicateInformation {
    pub status: ClaimStatus,
    /// Earliest instant the predicate can be true, when a single window is
    /// derivable. Callers default an absent lower bound to the balance's
    /// creation time; this layer never does.
    pub valid_from: Option<i64>,
    /// Instant after which the predicate is permanently false, when derivable.
    pub valid_to: Option<i64>,
    /// The normalized tree (relative bounds substituted), kept so the same
    /// window can be re-derived at another reference time without going back
    /// to the wire form.
    pub predicate: ClaimPredicate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Window {
    valid_from: Option<i64>,
    valid_to: Option<i64>,
}

type ShapeMatcher = fn(&ClaimPredicate) -> Option<Window>;

/// The canonical shapes a predicate may reduce to, tried in order, first
/// match wins. Anything that falls through gets no window at all: the
/// status is still computed by direct evaluation, but we never guess
/// bounds for arbitrary combinator nests (multiple AND clauses, any OR).
const SHAPE_MATCHERS: &[ShapeMatcher] = &[
    match_unconditional,
    match_upper_bound,
    match_lower_bound,
    match_bounded_window,
];

fn match_unconditional(p: &ClaimPredicate) -> Option<Window> {
    matches!(p, ClaimPredicate::Unconditional).then(Window::default)
}

/// `BeforeAbsoluteTime(b)`: claimable from now until `b`.
fn match_upper_bound(p: &ClaimPredicate) -> Option<Window> {
    match p {
        ClaimPredicate::BeforeAbsoluteTime(b) => Some(Window {
            valid_from: None,
            valid_to: Some(*b),
        }),
        _ => None,
    }
}

/// `Not(BeforeAbsoluteTime(a))`: claimable from `a`, unbounded above.
fn match_lower_bound(p: &ClaimPredicate) -> Option<Window> {
    match p {
        ClaimPredicate::Not(inner) => match **inner {
            ClaimPredicate::BeforeAbsoluteTime(a) => Some(Window {
                valid_from: Some(a),
                valid_to: None,
            }),
            _ => None,
        },
        _ => None,
    }
}

/// `And(Not(BeforeAbsoluteTime(a)), BeforeAbsoluteTime(b))` in either
/// operand order: the common "claimable between a and b" shape.
fn match_bounded_window(p: &ClaimPredicate) -> Option<Window> {
    let ClaimPredicate::And(l, r) = p else {
        return None;
    };
    let bounds = |lower: &ClaimPredicate, upper: &ClaimPredicate| match (lower, upper) {
        (ClaimPredicate::Not(inner), ClaimPredicate::BeforeAbsoluteTime(b)) => match **inner {
            ClaimPredicate::BeforeAbsoluteTime(a) => Some((a, *b)),
            _ => None,
        },
        _ => None,
    };
    let (a, b) = bounds(l, r).or_else(|| bounds(r, l))?;
    Some(Window {
        valid_from: Some(a),
        valid_to: Some(b),
    })
}

fn derive_window(p: &ClaimPredicate) -> Window {
    SHAPE_MATCHERS
        .iter()
        .find_map(|m| m(p))
        .unwrap_or_default()
}

/// Resolve `predicate` at `reference_time`, anchoring relative bounds at
/// `anchor_time` (the close time of the ledger that created the balance).
///
/// Total and pure: every well-formed tree yields a result. `Expired` is
/// only reported when a derived upper bound has passed; a predicate that is
/// merely false right now (an OR branch may still open later) stays
/// `NotYetClaimable`.
pub fn resolve(
    predicate: &ClaimPredicate,
    reference_time: i64,
    anchor_time: i64,
) -> PredicateInformation {
    let normalized = predicate.resolve_relative(anchor_time);
    let window = derive_window(&normalized);
    let status = if normalized.evaluate(reference_time, anchor_time) {
        ClaimStatus::Claimable
    } else if window.valid_to.is_some_and(|to| reference_time >= to) {
        ClaimStatus::Expired
    } else {
        ClaimStatus::NotYetClaimable
    };
    PredicateInformation {
        status,
        valid_from: window.valid_from,
        valid_to: window.valid_to,
        predicate: normalized,
    }
}
