use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};

const BASE_URL: &str = "https://www.bestbuy.ca";

/// One product entry pulled out of the embedded store state. Prices are as
/// listed; `saving` is the advertised discount when the page carries one.
#[derive(Debug, Clone)]
pub struct Listing {
    pub name: String,
    pub price: f64,
    pub saving: Option<f64>,
    pub sku: String,
    pub url: String,
}

/// Walk the decoded store state and pull out product listings.
///
/// The product array lives at different paths depending on which page was
/// saved (category listing vs. search results); each known path is tried in
/// order. Items missing a name or price are skipped with a warning, and
/// duplicate URLs keep their first occurrence.
pub fn extract_listings(state: &Value) -> Result<Vec<Listing>> {
    let products = find_product_array(state).ok_or_else(|| {
        let keys = top_level_keys(state);
        PipelineError::SchemaMismatch(format!(
            "no product array at any known path (top-level keys: {})",
            keys
        ))
    })?;

    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut listings = Vec::with_capacity(products.len());

    for item in products {
        let Some(listing) = listing_from_item(item) else {
            warn!("skipping product entry without name/price");
            continue;
        };
        if !seen_urls.insert(listing.url.clone()) {
            debug!("duplicate listing dropped: {}", listing.url);
            continue;
        }
        listings.push(listing);
    }

    debug!("extracted {} listings", listings.len());
    Ok(listings)
}

/// Candidate container paths, in the order the original page templates
/// are seen in the wild.
fn find_product_array(state: &Value) -> Option<&Vec<Value>> {
    const PATHS: &[&[&str]] = &[
        &["productList", "data", "products"],
        &["productList", "data", "results"],
        &["search", "searchResult", "results"],
        &["search", "searchResult", "products"],
        &["search", "results"],
    ];

    for path in PATHS {
        let mut node = state;
        for key in *path {
            node = node.get(key)?;
        }
        if let Some(arr) = node.as_array() {
            if !arr.is_empty() {
                return Some(arr);
            }
        }
    }
    None
}

fn listing_from_item(item: &Value) -> Option<Listing> {
    let name = item.get("name")?.as_str()?.trim().to_string();
    if name.is_empty() {
        return None;
    }
    let price = item.get("priceWithoutEhf")?.as_f64()?;

    let sku = item
        .get("sku")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // Advertised saving, falling back to the regular-vs-current price gap.
    let saving = item
        .get("saving")
        .and_then(Value::as_f64)
        .filter(|s| *s > 0.0)
        .or_else(|| {
            item.get("regularPrice")
                .and_then(Value::as_f64)
                .map(|r| r - price)
                .filter(|d| *d > 0.0)
        });

    let url = match item.get("seoUrl").and_then(Value::as_str) {
        Some(seo) if seo.starts_with("http") => seo.to_string(),
        Some(seo) if !seo.is_empty() => format!("{}{}", BASE_URL, seo),
        _ => format!("{}/en-ca/product/{}", BASE_URL, sku),
    };

    Some(Listing {
        name,
        price,
        saving,
        sku,
        url,
    })
}

fn top_level_keys(state: &Value) -> String {
    match state.as_object() {
        Some(map) => map.keys().cloned().collect::<Vec<_>>().join(", "),
        None => "<not an object>".to_string(),
    }
}

// ── Tests ──
