//! stellar-claim-core — claimable-balance primitives for wallet front-ends.
//!
//! Pieces:
//! - ClaimPredicate: closed tree form of a claim predicate, parsed from the
//!   Horizon wire shape
//! - resolve: evaluates a predicate at a reference time and derives the
//!   single claimable-after/claimable-until window when one exists
//! - listing: per-account resolution of fetched records (creation-time
//!   default for the lower bound, expired rows dropped)
//! - BalanceSource / Lister: fetch boundary (Horizon-backed or stubbed)
//!
//! The resolver is a pure function of (predicate, reference time, anchor
//! time); all network I/O stays behind `BalanceSource`.

pub mod fetch;
pub mod listing;
pub mod predicate;
pub mod resolve;

pub use fetch::{BalanceSource, Lister};
pub use listing::{claimable, resolve_records, ResolvedClaim};
pub use predicate::{parse_predicate, ClaimPredicate, MalformedPredicate};
pub use resolve::{resolve, ClaimStatus, PredicateInformation};

/// Fetch and resolve everything claimable by `account` in one call.
pub fn list_for_account(
    rpc: &horizon_rpc::HorizonClient,
    account: &str,
    reference_time: i64,
) -> anyhow::Result<Vec<ResolvedClaim>> {
    let records = rpc.claimable_balances(account)?;
    Ok(listing::resolve_records(&records, account, reference_time))
}
