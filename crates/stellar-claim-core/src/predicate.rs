use horizon_rpc::WirePredicate;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedPredicate {
    #[error("predicate node carries no recognized discriminant")]
    MissingDiscriminant,
    #[error("unconditional predicate must be true")]
    UnconditionalFalse,
    #[error("{field} expects exactly 2 operands, got {got}")]
    BadArity { field: &'static str, got: usize },
    #[error("unparsable abs_before timestamp {0:?}")]
    BadTimestamp(String),
    #[error("unparsable rel_before seconds {0:?}")]
    BadSeconds(String),
}

/// A claim predicate in tree form. Times are Unix epoch seconds.
///
/// `BeforeRelativeTime` counts from an anchor the predicate itself does not
/// carry (the close time of the ledger that created the balance); callers
/// supply it wherever relative bounds are interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClaimPredicate {
    Unconditional,
    BeforeAbsoluteTime(i64),
    BeforeRelativeTime(i64),
    Not(Box<ClaimPredicate>),
    And(Box<ClaimPredicate>, Box<ClaimPredicate>),
    Or(Box<ClaimPredicate>, Box<ClaimPredicate>),
}

impl ClaimPredicate {
    /// Boolean value of the predicate at `reference_time`.
    pub fn evaluate(&self, reference_time: i64, anchor_time: i64) -> bool {
        match self {
            ClaimPredicate::Unconditional => true,
            ClaimPredicate::BeforeAbsoluteTime(t) => reference_time < *t,
            ClaimPredicate::BeforeRelativeTime(s) => {
                reference_time < anchor_time.saturating_add(*s)
            }
            ClaimPredicate::Not(p) => !p.evaluate(reference_time, anchor_time),
            ClaimPredicate::And(l, r) => {
                l.evaluate(reference_time, anchor_time) && r.evaluate(reference_time, anchor_time)
            }
            ClaimPredicate::Or(l, r) => {
                l.evaluate(reference_time, anchor_time) || r.evaluate(reference_time, anchor_time)
            }
        }
    }

    /// Rewrite every relative bound to its absolute equivalent against
    /// `anchor_time`. The result carries no `BeforeRelativeTime` nodes.
    pub fn resolve_relative(&self, anchor_time: i64) -> ClaimPredicate {
        match self {
            ClaimPredicate::Unconditional => ClaimPredicate::Unconditional,
            ClaimPredicate::BeforeAbsoluteTime(t) => ClaimPredicate::BeforeAbsoluteTime(*t),
            ClaimPredicate::BeforeRelativeTime(s) => {
                ClaimPredicate::BeforeAbsoluteTime(anchor_time.saturating_add(*s))
            }
            ClaimPredicate::Not(p) => {
                ClaimPredicate::Not(Box::new(p.resolve_relative(anchor_time)))
            }
            ClaimPredicate::And(l, r) => ClaimPredicate::And(
                Box::new(l.resolve_relative(anchor_time)),
                Box::new(r.resolve_relative(anchor_time)),
            ),
            ClaimPredicate::Or(l, r) => ClaimPredicate::Or(
                Box::new(l.resolve_relative(anchor_time)),
                Box::new(r.resolve_relative(anchor_time)),
            ),
        }
    }

    /// Serialize back into the Horizon wire shape. Absolute bounds are
    /// emitted as RFC3339 when representable, epoch-seconds otherwise;
    /// the parser accepts both.
    pub fn to_wire(&self) -> WirePredicate {
        match self {
            ClaimPredicate::Unconditional => WirePredicate {
                unconditional: Some(true),
                ..Default::default()
            },
            ClaimPredicate::BeforeAbsoluteTime(t) => WirePredicate {
                abs_before: Some(format_abs(*t)),
                ..Default::default()
            },
            ClaimPredicate::BeforeRelativeTime(s) => WirePredicate {
                rel_before: Some(s.to_string()),
                ..Default::default()
            },
            ClaimPredicate::Not(p) => WirePredicate {
                not: Some(Box::new(p.to_wire())),
                ..Default::default()
            },
            ClaimPredicate::And(l, r) => WirePredicate {
                and: Some(vec![l.to_wire(), r.to_wire()]),
                ..Default::default()
            },
            ClaimPredicate::Or(l, r) => WirePredicate {
                or: Some(vec![l.to_wire(), r.to_wire()]),
                ..Default::default()
            },
        }
    }
}

/// Build the tree form from a Horizon wire node. Exactly one recognized
/// key must be populated; anything else is malformed. Horizon is a trusted
/// source so this should not trip in practice, but it is still a network
/// response and gets checked like one.
pub fn parse_predicate(wire: &WirePredicate) -> Result<ClaimPredicate, MalformedPredicate> {
    if let Some(flag) = wire.unconditional {
        if !flag {
            return Err(MalformedPredicate::UnconditionalFalse);
        }
        return Ok(ClaimPredicate::Unconditional);
    }
    if let Some(ts) = &wire.abs_before {
        return Ok(ClaimPredicate::BeforeAbsoluteTime(parse_abs(ts)?));
    }
    if let Some(secs) = &wire.rel_before {
        let s = secs
            .parse::<i64>()
            .map_err(|_| MalformedPredicate::BadSeconds(secs.clone()))?;
        return Ok(ClaimPredicate::BeforeRelativeTime(s));
    }
    if let Some(inner) = &wire.not {
        return Ok(ClaimPredicate::Not(Box::new(parse_predicate(inner)?)));
    }
    if let Some(operands) = &wire.and {
        let (l, r) = binary_operands("and", operands)?;
        return Ok(ClaimPredicate::And(Box::new(l), Box::new(r)));
    }
    if let Some(operands) = &wire.or {
        let (l, r) = binary_operands("or", operands)?;
        return Ok(ClaimPredicate::Or(Box::new(l), Box::new(r)));
    }
    Err(MalformedPredicate::MissingDiscriminant)
}

fn binary_operands(
    field: &'static str,
    operands: &[WirePredicate],
) -> Result<(ClaimPredicate, ClaimPredicate), MalformedPredicate> {
    match operands {
        [l, r] => Ok((parse_predicate(l)?, parse_predicate(r)?)),
        _ => Err(MalformedPredicate::BadArity {
            field,
            got: operands.len(),
        }),
    }
}

/// Horizon serializes `abs_before` as RFC3339; some tooling emits plain
/// epoch-seconds strings. Accept both.
fn parse_abs(value: &str) -> Result<i64, MalformedPredicate> {
    if let Ok(secs) = value.parse::<i64>() {
        return Ok(secs);
    }
    OffsetDateTime::parse(value, &Rfc3339)
        .map(|t| t.unix_timestamp())
        .map_err(|_| MalformedPredicate::BadTimestamp(value.to_string()))
}

fn format_abs(t: i64) -> String {
    OffsetDateTime::from_unix_timestamp(t)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| t.to_string())
}
