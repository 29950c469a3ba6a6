use horizon_rpc::{BalanceFlags, ClaimableBalanceRecord, ClaimantRecord, WirePredicate};
use stellar_claim_core::{claimable, resolve_records, BalanceSource, ClaimStatus, Lister};

const ACCOUNT: &str = "GDQNY3PBOJOKYZSRMK2S7LHHGWZIUISD4QORETLMXEWXBI7KFZZMKTL3";
const OTHER: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";

// 2021-04-20T15:00:00Z
const CREATED_AT: i64 = 1_618_930_800;

fn record(id: &str, destination: &str, predicate: WirePredicate) -> ClaimableBalanceRecord {
    ClaimableBalanceRecord {
        id: id.to_string(),
        paging_token: id.to_string(),
        asset: "native".to_string(),
        amount: "25.0000000".to_string(),
        sponsor: None,
        last_modified_ledger: 28_411_995,
        last_modified_time: "2021-04-20T15:00:00Z".to_string(),
        claimants: vec![ClaimantRecord {
            destination: destination.to_string(),
            predicate,
        }],
        flags: BalanceFlags::default(),
    }
}

fn unconditional() -> WirePredicate {
    WirePredicate {
        unconditional: Some(true),
        ..Default::default()
    }
}

fn abs_before(ts: &str) -> WirePredicate {
    WirePredicate {
        abs_before: Some(ts.to_string()),
        ..Default::default()
    }
}

fn not(inner: WirePredicate) -> WirePredicate {
    WirePredicate {
        not: Some(Box::new(inner)),
        ..Default::default()
    }
}

#[test]
fn missing_lower_bound_defaults_to_creation_time() {
    let records = vec![record("b1", ACCOUNT, unconditional())];
    let resolved = resolve_records(&records, ACCOUNT, CREATED_AT + 60);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].information.status, ClaimStatus::Claimable);
    assert_eq!(resolved[0].information.valid_from, Some(CREATED_AT));
    assert_eq!(resolved[0].information.valid_to, None);
}

#[test]
fn derived_lower_bound_is_not_overridden() {
    let lower = CREATED_AT + 1_000;
    let records = vec![record("b1", ACCOUNT, not(abs_before(&lower.to_string())))];
    let resolved = resolve_records(&records, ACCOUNT, CREATED_AT);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].information.status, ClaimStatus::NotYetClaimable);
    assert_eq!(resolved[0].information.valid_from, Some(lower));
}

#[test]
fn expired_rows_are_dropped_from_the_listing() {
    let records = vec![
        record("gone", ACCOUNT, abs_before(&(CREATED_AT - 10).to_string())),
        record("live", ACCOUNT, unconditional()),
    ];
    let resolved = resolve_records(&records, ACCOUNT, CREATED_AT);
    let ids: Vec<&str> = resolved.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["live"]);
}

#[test]
fn records_for_other_claimants_are_skipped() {
    let records = vec![
        record("theirs", OTHER, unconditional()),
        record("ours", ACCOUNT, unconditional()),
    ];
    let resolved = resolve_records(&records, ACCOUNT, CREATED_AT);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, "ours");
    assert_eq!(resolved[0].destination, ACCOUNT);
}

#[test]
fn malformed_predicate_hides_the_record_not_the_listing() {
    let records = vec![
        record("bad", ACCOUNT, WirePredicate::default()),
        record("good", ACCOUNT, unconditional()),
    ];
    let resolved = resolve_records(&records, ACCOUNT, CREATED_AT);
    let ids: Vec<&str> = resolved.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["good"]);
}

#[test]
fn only_currently_claimable_rows_are_selectable() {
    let future = CREATED_AT + 1_000;
    let records = vec![
        record("now", ACCOUNT, unconditional()),
        record("later", ACCOUNT, not(abs_before(&future.to_string()))),
    ];
    let resolved = resolve_records(&records, ACCOUNT, CREATED_AT);
    assert_eq!(resolved.len(), 2, "pending rows stay listed");
    let selectable = claimable(&resolved);
    assert_eq!(selectable.len(), 1);
    assert_eq!(selectable[0].id, "now");
}

struct FixtureSource(Vec<ClaimableBalanceRecord>);

impl BalanceSource for FixtureSource {
    fn claimable_balances_for(
        &self,
        _claimant: &str,
    ) -> anyhow::Result<Vec<ClaimableBalanceRecord>> {
        Ok(self.0.clone())
    }
}

#[test]
fn lister_runs_fetch_and_resolution_end_to_end() {
    let lister = Lister::new(FixtureSource(vec![
        record("b1", ACCOUNT, unconditional()),
        record("b2", OTHER, unconditional()),
    ]));
    let resolved = lister.list(ACCOUNT, CREATED_AT).expect("listing");
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, "b1");
    assert_eq!(resolved[0].information.valid_from, Some(CREATED_AT));
}
