use crate::pipeline::compare::Deal;

/// Caller knobs for the final ordering stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankOptions {
    /// Keep zero-score listings instead of filtering to upgrades only.
    pub include_all: bool,
    /// Truncate to the best N after sorting.
    pub top: Option<usize>,
}

/// Order deals by score (desc) then price (asc). The sort is stable, so
/// listings tied on both keep their extraction order.
pub fn rank_deals(mut deals: Vec<Deal>, opts: &RankOptions) -> Vec<Deal> {
    if !opts.include_all {
        deals.retain(|d| d.score > 0);
    }

    deals.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.price.total_cmp(&b.price))
    });

    if let Some(top) = opts.top {
        deals.truncate(top);
    }
    deals
}

// ── Tests ──
