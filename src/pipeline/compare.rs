use serde::Serialize;

use crate::pipeline::listings::Listing;
use crate::pipeline::specs::{parse_specs, ParsedSpecs};

/// The user's current machine, supplied once per run and shared read-only
/// across all comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Baseline {
    pub cpu_gen: u32,
    pub ram_gb: u32,
    pub storage_gb: u32,
}

/// Per-dimension comparison against the baseline. Unknown spec fields show
/// up as `false` here and contribute nothing to the score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpgradeFlags {
    pub cpu_better: bool,
    pub ram_better: bool,
    pub storage_ok: bool,
    pub discounted: bool,
}

/// A listing enriched with parsed specs, comparison flags, score, and a
/// human-readable notes line. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Deal {
    pub name: String,
    pub price: f64,
    pub saving: Option<f64>,
    pub url: String,
    pub sku: String,
    pub specs: ParsedSpecs,
    pub flags: UpgradeFlags,
    pub score: u32,
    pub notes: String,
}

/// Parse a listing's title and score it against the baseline.
///
/// Score weights: +2 CPU generation strictly newer, +2 more RAM, +1 storage
/// at least as large, +1 discounted. A dimension the title did not reveal
/// never earns points, whatever the baseline is.
pub fn score_listing(listing: &Listing, baseline: &Baseline) -> Deal {
    let specs = parse_specs(&listing.name);

    let flags = UpgradeFlags {
        cpu_better: specs.cpu_gen.is_some_and(|g| g > baseline.cpu_gen),
        ram_better: specs.ram_gb.is_some_and(|r| r > baseline.ram_gb),
        storage_ok: specs.storage_gb.is_some_and(|s| s >= baseline.storage_gb),
        discounted: listing.saving.is_some_and(|s| s > 0.0),
    };

    let mut score = 0;
    let mut notes: Vec<String> = Vec::new();
    if flags.cpu_better {
        score += 2;
        if let Some(gen) = specs.cpu_gen {
            notes.push(format!("CPU+ (Gen {})", gen));
        }
    }
    if flags.ram_better {
        score += 2;
        if let Some(ram) = specs.ram_gb {
            notes.push(format!("RAM+ ({}GB)", ram));
        }
    }
    if flags.storage_ok {
        score += 1;
        if let Some(storage) = specs.storage_gb {
            notes.push(format!("Storage+ ({}GB)", storage));
        }
    }
    if flags.discounted {
        score += 1;
        if let Some(saving) = listing.saving {
            notes.push(format!("Sale (-${:.0})", saving));
        }
    }

    Deal {
        name: listing.name.clone(),
        price: listing.price,
        saving: listing.saving,
        url: listing.url.clone(),
        sku: listing.sku.clone(),
        specs,
        flags,
        score,
        notes: notes.join(", "),
    }
}

// ── Tests ──
