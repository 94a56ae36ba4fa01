pub mod blob;
pub mod compare;
pub mod listings;
pub mod rank;
pub mod specs;

use rayon::prelude::*;
use serde_json::Value;
use tracing::info;

use crate::error::{PipelineError, Result};
use compare::{score_listing, Baseline, Deal};
use rank::RankOptions;

/// Four-stage pipeline: raw page text → blob → listings → scored → ranked.
///
/// All-or-nothing: a structural failure (no blob, unparseable blob, or
/// unexpected schema) aborts with zero results; per-listing gaps only skip
/// that listing or leave spec fields unknown.
pub fn analyze(html: &str, baseline: &Baseline, opts: &RankOptions) -> Result<Vec<Deal>> {
    let raw = blob::locate_blob(html)?;
    let state: Value =
        serde_json::from_str(raw).map_err(|e| PipelineError::BlobMalformed(e.to_string()))?;

    let found = listings::extract_listings(&state)?;
    info!("found {} listings", found.len());

    // Per-listing scoring is independent and side-effect free; par_iter's
    // collect preserves input order for the stable sort below.
    let deals: Vec<Deal> = found
        .par_iter()
        .map(|l| score_listing(l, baseline))
        .collect();

    Ok(rank::rank_deals(deals, opts))
}

// ── Tests ──
