use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use horizon_rpc::WirePredicate;
use stellar_claim_core::{parse_predicate, resolve};

use super::common::parse_time_arg;

#[derive(Args)]
pub struct InspectArgs {
    /// Wire-format predicate JSON, inline.
    #[arg(long, conflicts_with = "file")]
    pub predicate: Option<String>,
    /// Read the predicate JSON from a file instead.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Reference time: epoch seconds or RFC3339. Defaults to now.
    #[arg(long)]
    pub at: Option<String>,
    /// Ledger close time anchoring relative bounds, epoch seconds.
    #[arg(long, default_value_t = 0)]
    pub anchor: i64,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let raw = match (&args.predicate, &args.file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => return Err(anyhow!("provide --predicate or --file")),
    };
    let wire: WirePredicate = serde_json::from_str(&raw).context("decoding predicate JSON")?;
    let predicate = parse_predicate(&wire)?;
    let reference = parse_time_arg(args.at.as_deref())?;
    let info = resolve(&predicate, reference, args.anchor);
    let out = serde_json::json!({
        "status": info.status,
        "valid_from": info.valid_from,
        "valid_to": info.valid_to,
        "predicate": info.predicate.to_wire(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
