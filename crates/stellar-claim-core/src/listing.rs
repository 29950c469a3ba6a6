use crate::predicate::parse_predicate;
use crate::resolve::{resolve, ClaimStatus, PredicateInformation};
use horizon_rpc::ClaimableBalanceRecord;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// One claimable balance resolved for a specific claimant account.
#[derive(Clone, Debug)]
pub struct ResolvedClaim {
    pub id: String,
    pub asset: String,
    pub amount: String,
    pub sponsor: Option<String>,
    pub destination: String,
    pub information: PredicateInformation,
}

/// Close time of the ledger that created the entry, the anchor for
/// relative bounds and the implicit "claimable since creation" floor.
fn creation_time(record: &ClaimableBalanceRecord) -> Option<i64> {
    OffsetDateTime::parse(&record.last_modified_time, &Rfc3339)
        .ok()
        .map(|t| t.unix_timestamp())
}

/// Resolve fetched records against `claimant_account` at `reference_time`.
///
/// Per record: pick the matching claimant entry, resolve its predicate with
/// the creation time as anchor, then default an absent lower bound to the
/// creation time. Records without a matching claimant, with a malformed
/// predicate, or with an unreadable creation time are hidden rather than
/// failing the listing. Expired rows are dropped entirely.
pub fn resolve_records(
    records: &[ClaimableBalanceRecord],
    claimant_account: &str,
    reference_time: i64,
) -> Vec<ResolvedClaim> {
    records
        .iter()
        .filter_map(|record| {
            let claimant = record
                .claimants
                .iter()
                .find(|c| c.destination == claimant_account)?;
            let anchor = creation_time(record)?;
            let predicate = parse_predicate(&claimant.predicate).ok()?;
            let mut information = resolve(&predicate, reference_time, anchor);
            information.valid_from = information.valid_from.or(Some(anchor));
            (information.status != ClaimStatus::Expired).then(|| ResolvedClaim {
                id: record.id.clone(),
                asset: record.asset.clone(),
                amount: record.amount.clone(),
                sponsor: record.sponsor.clone(),
                destination: claimant.destination.clone(),
                information,
            })
        })
        .collect()
}

/// Rows eligible for claiming right now. Pending rows stay visible in a
/// listing but must never be selectable.
pub fn claimable(claims: &[ResolvedClaim]) -> Vec<&ResolvedClaim> {
    claims
        .iter()
        .filter(|c| c.information.status == ClaimStatus::Claimable)
        .collect()
}
