use crate::listing::{resolve_records, ResolvedClaim};
use anyhow::Result;
use horizon_rpc::{ClaimableBalanceRecord, HorizonClient};

/// Where claimable-balance records come from. Horizon in production,
/// fixtures in tests.
pub trait BalanceSource: Send + Sync {
    fn claimable_balances_for(&self, claimant: &str) -> Result<Vec<ClaimableBalanceRecord>>;
}

impl BalanceSource for HorizonClient {
    fn claimable_balances_for(&self, claimant: &str) -> Result<Vec<ClaimableBalanceRecord>> {
        Ok(self.claimable_balances(claimant)?)
    }
}

/// Fetch-and-resolve pipeline over any [`BalanceSource`].
pub struct Lister<S: BalanceSource> {
    pub source: S,
}

impl<S: BalanceSource> Lister<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn list(&self, claimant: &str, reference_time: i64) -> Result<Vec<ResolvedClaim>> {
        let records = self.source.claimable_balances_for(claimant)?;
        Ok(resolve_records(&records, claimant, reference_time))
    }
}
