//! horizon-rpc
//!
//! Minimal, blocking HTTP client for the Horizon public API.
//! Endpoints used:
//! - GET /claimable_balances?claimant=...&limit=...&cursor=...
//!
//! Responses come wrapped in Horizon's HAL envelope (`_embedded.records`);
//! this crate unwraps the envelope and hands back plain records. Claim
//! predicates are carried verbatim in their wire shape ([`WirePredicate`]);
//! interpreting them is the job of `stellar-claim-core`.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum HorizonError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("url parse: {0}")]
    Url(#[from] url::ParseError),
    #[error("horizon returned error: {0}")]
    Api(String),
}

/// Wire shape of a claim predicate as Horizon serializes it: exactly one
/// of the fields is populated per node. Kept untyped here; parsing into a
/// closed tree (and rejecting malformed nodes) happens downstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePredicate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unconditional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abs_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<WirePredicate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<WirePredicate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<WirePredicate>>,
}

/// One claimant entry on a claimable balance: who may claim, gated by what.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClaimantRecord {
    pub destination: String,
    pub predicate: WirePredicate,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct BalanceFlags {
    #[serde(default)]
    pub clawback_enabled: bool,
}

/// A claimable-balance record as returned by Horizon.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClaimableBalanceRecord {
    pub id: String,
    pub paging_token: String,
    /// "native" or "CODE:ISSUER".
    pub asset: String,
    /// Decimal string, 7 fractional digits; never reinterpreted here.
    pub amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    pub last_modified_ledger: u32,
    /// Close time of the ledger that created/last touched this entry, RFC3339.
    pub last_modified_time: String,
    pub claimants: Vec<ClaimantRecord>,
    #[serde(default)]
    pub flags: BalanceFlags,
}

#[derive(Deserialize)]
struct Embedded<T> {
    records: Vec<T>,
}

#[derive(Deserialize)]
struct PageEnvelope<T> {
    #[serde(rename = "_embedded")]
    embedded: Embedded<T>,
}

#[derive(Deserialize)]
struct Problem {
    title: Option<String>,
    detail: Option<String>,
}

/// Records per request when walking the full listing.
const PAGE_LIMIT: usize = 200;

#[derive(Clone)]
pub struct HorizonClient {
    base: Url,
    client: Client,
}

impl HorizonClient {
    /// Create a new client. `base` like "https://horizon.stellar.org".
    pub fn new(base: &str) -> Result<Self, HorizonError> {
        let base = Url::parse(base)?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .default_headers(headers)
            .build()?;
        Ok(Self { base, client })
    }

    /// GET /claimable_balances — one page, filtered to a claimant.
    pub fn claimable_balances_page(
        &self,
        claimant: &str,
        limit: usize,
        cursor: Option<&str>,
    ) -> Result<Vec<ClaimableBalanceRecord>, HorizonError> {
        let mut url = self.base.join("/claimable_balances")?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("claimant", claimant);
            q.append_pair("limit", &limit.to_string());
            if let Some(c) = cursor {
                q.append_pair("cursor", c);
            }
        }
        let resp = self.client.get(url).send()?;
        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp
                .json::<Problem>()
                .ok()
                .and_then(|p| p.detail.or(p.title))
                .unwrap_or_default();
            return Err(HorizonError::Api(format!(
                "claimable_balances HTTP {status} {detail}"
            )));
        }
        let envelope: PageEnvelope<ClaimableBalanceRecord> = resp.json()?;
        Ok(envelope.embedded.records)
    }

    /// All claimable balances for a claimant, following the paging cursor
    /// until a short page. Accounts holding hundreds of entries come back
    /// in one call here, page-by-page underneath.
    pub fn claimable_balances(
        &self,
        claimant: &str,
    ) -> Result<Vec<ClaimableBalanceRecord>, HorizonError> {
        self.claimable_balances_with_limit(claimant, PAGE_LIMIT)
    }

    pub fn claimable_balances_with_limit(
        &self,
        claimant: &str,
        limit: usize,
    ) -> Result<Vec<ClaimableBalanceRecord>, HorizonError> {
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self.claimable_balances_page(claimant, limit, cursor.as_deref())?;
            let full = page.len() >= limit;
            cursor = page.last().map(|r| r.paging_token.clone());
            all.extend(page);
            if !full || cursor.is_none() {
                return Ok(all);
            }
        }
    }
}
