use anyhow::{anyhow, Result};
use stellar_claim_core::ClaimStatus;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Accepts epoch seconds or RFC3339; `None` means "now".
pub fn parse_time_arg(value: Option<&str>) -> Result<i64> {
    let Some(v) = value else {
        return Ok(OffsetDateTime::now_utc().unix_timestamp());
    };
    if let Ok(secs) = v.parse::<i64>() {
        return Ok(secs);
    }
    OffsetDateTime::parse(v, &Rfc3339)
        .map(|t| t.unix_timestamp())
        .map_err(|_| anyhow!("unparsable time {v:?}; use epoch seconds or RFC3339"))
}

pub fn format_time(t: i64) -> String {
    OffsetDateTime::from_unix_timestamp(t)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| t.to_string())
}

pub fn status_str(status: ClaimStatus) -> &'static str {
    match status {
        ClaimStatus::Claimable => "claimable",
        ClaimStatus::NotYetClaimable => "not-yet-claimable",
        ClaimStatus::Expired => "expired",
    }
}
