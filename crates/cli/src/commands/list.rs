use anyhow::{Context, Result};
use clap::Args;
use horizon_rpc::HorizonClient;
use stellar_claim_core::{claimable, list_for_account, ResolvedClaim};

use super::common::{format_time, parse_time_arg, status_str};

#[derive(Args)]
pub struct ListArgs {
    /// Claimant account id (G...).
    #[arg(long)]
    pub account: String,
    /// Horizon base URL.
    #[arg(long, default_value = "https://horizon.stellar.org")]
    pub horizon: String,
    /// Reference time: epoch seconds or RFC3339. Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
    /// Only rows claimable right now (the set eligible for a claim op).
    #[arg(long)]
    pub claimable_only: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let reference = parse_time_arg(args.at.as_deref())?;
    let rpc = HorizonClient::new(&args.horizon).context("horizon client")?;
    let claims = list_for_account(&rpc, &args.account, reference)?;
    let rows: Vec<&ResolvedClaim> = if args.claimable_only {
        claimable(&claims)
    } else {
        claims.iter().collect()
    };
    if rows.is_empty() {
        println!("no claimable balances");
        return Ok(());
    }
    for claim in rows {
        println!("{}", render(claim));
    }
    Ok(())
}

fn render(claim: &ResolvedClaim) -> String {
    let info = &claim.information;
    let from = info
        .valid_from
        .map(format_time)
        .unwrap_or_else(|| "created".to_string());
    let to = info
        .valid_to
        .map(format_time)
        .unwrap_or_else(|| "never".to_string());
    format!(
        "{} {} {} status={} from={} to={}",
        claim.id,
        claim.amount,
        claim.asset,
        status_str(info.status),
        from,
        to
    )
}
