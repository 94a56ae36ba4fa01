use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// CPU model tokens: "i7-13620H", "Core Ultra 7 155H", "Ryzen 7 7840HS".
static INTEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(i\d)-(\d{4,5})").unwrap());
static ULTRA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:core\s+)?ultra\s*(\d+)").unwrap());
static RYZEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ryzen\s*(\d)\s*(\d{4})").unwrap());

// RAM needs a memory-context keyword to the right of the size; bare and
// slash-delimited GB tokens are handled by the fallback below.
static RAM_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+)\s*GB\s*(?:DDR\d?\s*)?RAM",
        r"(?i)(\d+)\s*GB\s*DDR\d",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

// Storage is distinguished from RAM by drive-context keywords and by
// allowing TB units (normalized to GB).
static STORAGE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+(?:\.\d+)?)\s*(TB|GB)\s*(?:SSD|HDD|eMMC|Storage)",
        r"(?i)(\d+(?:\.\d+)?)\s*(TB|GB)\s*(?:NVMe|PCIe)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

// Slash-delimited size with no keyword ("/16GB/", "/1TB/"): ambiguous
// between RAM and storage. TB is always storage; among GB matches the last
// one is taken as storage (titles list RAM before storage).
static SLASH_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/\s*(\d+(?:\.\d+)?)\s*(TB|GB)\s*/").unwrap());

static GPU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(RTX\s*\d{4}(?:\s*Ti)?|GTX\s*\d{4})\b").unwrap());

static BARE_GB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(\d+)\s*GB\b").unwrap());

// Bare-token fallback: a GB figure with no context keyword is only accepted
// as RAM when it is a plausible RAM size.
const MAX_PLAUSIBLE_RAM_GB: u32 = 128;

/// Specs recovered from a free-text product title. Every field is optional:
/// a dimension the title does not spell out stays `None`, never a default
/// number, so downstream scoring can tell "absent" from "small".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSpecs {
    pub cpu_gen: Option<u32>,
    pub cpu_model: Option<String>,
    pub ram_gb: Option<u32>,
    pub storage_gb: Option<u32>,
    pub gpu: Option<String>,
}

/// Best-effort spec extraction from a product title. Deterministic and
/// case-insensitive; titles are comma/space-separated token soups, so each
/// field has its own ordered rule list and the first hit wins.
pub fn parse_specs(name: &str) -> ParsedSpecs {
    let (cpu_gen, cpu_model) = match parse_cpu(name) {
        Some((gen, model)) => (Some(gen), Some(model)),
        None => (None, None),
    };

    // Storage first: its matched span is masked out of the bare-GB RAM
    // fallback so "8GB 256GB SSD" reads RAM=8, storage=256.
    let storage = parse_storage(name);
    let ram_gb = parse_ram(name, storage.as_ref().map(|(_, span)| span));

    ParsedSpecs {
        cpu_gen,
        cpu_model,
        ram_gb,
        storage_gb: storage.map(|(gb, _)| gb),
        gpu: parse_gpu(name),
    }
}

fn parse_cpu(name: &str) -> Option<(u32, String)> {
    // Intel Core iX-NNNNN: leading digits of the model number encode the
    // generation (13620 -> 13, 9750 -> 9).
    if let Some(caps) = INTEL_RE.captures(name) {
        let family = caps[1].to_lowercase();
        let model_num = &caps[2];
        let gen = match model_num.len() {
            5 => model_num[..2].parse().ok(),
            4 => model_num[..1].parse().ok(),
            _ => None,
        };
        if let Some(gen) = gen {
            return Some((gen, format!("{}-{}", family, model_num)));
        }
    }

    // Core Ultra: newer than any iX generation, pinned above 13th gen.
    if let Some(caps) = ULTRA_RE.captures(name) {
        return Some((14, format!("Ultra {}", &caps[1])));
    }

    // Ryzen S NNNN: series digit maps to a rough Intel equivalent
    // (7xxx ~ 13th gen).
    if let Some(caps) = RYZEN_RE.captures(name) {
        let series: u32 = caps[2][..1].parse().ok()?;
        return Some((series + 6, format!("Ryzen {} {}", &caps[1], &caps[2])));
    }

    None
}

fn parse_ram(name: &str, storage_span: Option<&std::ops::Range<usize>>) -> Option<u32> {
    if let Some(caps) = RAM_RES.iter().find_map(|re| re.captures(name)) {
        return caps[1].parse().ok();
    }

    // No context keyword anywhere; take the first plausible bare GB token
    // that is not part of the storage match.
    for caps in BARE_GB_RE.captures_iter(name) {
        let whole = caps.get(0).unwrap();
        if let Some(span) = storage_span {
            if whole.start() < span.end && span.start < whole.end() {
                continue;
            }
        }
        if let Ok(gb) = caps[1].parse::<u32>() {
            if gb > 0 && gb <= MAX_PLAUSIBLE_RAM_GB {
                return Some(gb);
            }
        }
    }
    None
}

fn parse_storage(name: &str) -> Option<(u32, std::ops::Range<usize>)> {
    let caps = STORAGE_RES
        .iter()
        .find_map(|re| re.captures(name))
        .or_else(|| best_slash_match(name))?;
    let value: f64 = caps[1].parse().ok()?;
    let gb = if caps[2].eq_ignore_ascii_case("TB") {
        value * 1024.0
    } else {
        value
    };
    if gb >= 1.0 {
        Some((gb as u32, caps.get(0).unwrap().range()))
    } else {
        None
    }
}

fn best_slash_match(name: &str) -> Option<regex::Captures<'_>> {
    let all: Vec<regex::Captures> = SLASH_SIZE_RE.captures_iter(name).collect();
    if let Some(idx) = all
        .iter()
        .position(|c| c[2].eq_ignore_ascii_case("TB"))
    {
        return all.into_iter().nth(idx);
    }
    all.into_iter().last()
}

fn parse_gpu(name: &str) -> Option<String> {
    GPU_RE
        .captures(name)
        .map(|caps| caps[1].to_uppercase().split_whitespace().collect::<Vec<_>>().join(" "))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_gaming_title() {
        let specs = parse_specs(
            "Acer Nitro V 15.6\" FHD Gaming Laptop, Intel Core i7-13620H, 32GB RAM, 2048GB SSD",
        );
        assert_eq!(specs.cpu_gen, Some(13));
        assert_eq!(specs.cpu_model.as_deref(), Some("i7-13620"));
        assert_eq!(specs.ram_gb, Some(32));
        assert_eq!(specs.storage_gb, Some(2048));
        assert_eq!(specs.gpu, None);
    }

    #[test]
    fn four_digit_intel_model() {
        let specs = parse_specs("Lenovo ThinkPad, Intel Core i5-8250U, 8GB RAM");
        assert_eq!(specs.cpu_gen, Some(8));
        assert_eq!(specs.cpu_model.as_deref(), Some("i5-8250"));
    }

    #[test]
    fn core_ultra_maps_above_13th_gen() {
        let specs = parse_specs("ASUS Zenbook 14, Intel Core Ultra 7 155H, 16GB RAM, 1TB SSD");
        assert_eq!(specs.cpu_gen, Some(14));
        assert_eq!(specs.cpu_model.as_deref(), Some("Ultra 7"));
    }

    #[test]
    fn ryzen_series_equivalence() {
        let specs = parse_specs("HP Victus, AMD Ryzen 7 7840HS, 16GB DDR5, 512GB SSD");
        assert_eq!(specs.cpu_gen, Some(13));
        assert_eq!(specs.cpu_model.as_deref(), Some("Ryzen 7 7840"));
        assert_eq!(specs.ram_gb, Some(16));
    }

    #[test]
    fn no_cpu_token_stays_unknown() {
        let specs = parse_specs("Generic Laptop 8GB 256GB SSD");
        assert_eq!(specs.cpu_gen, None);
        assert_eq!(specs.cpu_model, None);
        assert_eq!(specs.ram_gb, Some(8));
        assert_eq!(specs.storage_gb, Some(256));
    }

    #[test]
    fn bare_gb_fallback_skips_storage_span() {
        // No RAM keyword: first bare GB token outside the storage match wins.
        let specs = parse_specs("Tablet 8GB 256GB SSD");
        assert_eq!(specs.ram_gb, Some(8));
        assert_eq!(specs.storage_gb, Some(256));
    }

    #[test]
    fn implausibly_large_bare_gb_is_not_ram() {
        let specs = parse_specs("External drive 512GB");
        assert_eq!(specs.ram_gb, None);
        assert_eq!(specs.storage_gb, None);
    }

    #[test]
    fn tb_normalized_to_gb() {
        assert_eq!(parse_specs("Laptop 16GB RAM 1TB SSD").storage_gb, Some(1024));
        assert_eq!(parse_specs("Laptop 2TB NVMe").storage_gb, Some(2048));
    }

    #[test]
    fn fractional_tb() {
        assert_eq!(parse_specs("Workstation 1.5TB SSD").storage_gb, Some(1536));
    }

    #[test]
    fn slash_delimited_fallbacks() {
        let specs = parse_specs("Dell Inspiron /16GB/ /1TB/ bundle");
        assert_eq!(specs.ram_gb, Some(16));
        assert_eq!(specs.storage_gb, Some(1024));
    }

    #[test]
    fn gpu_models() {
        assert_eq!(
            parse_specs("MSI Katana, RTX 4060, 16GB RAM").gpu.as_deref(),
            Some("RTX 4060")
        );
        assert_eq!(
            parse_specs("older rig gtx 1650 build").gpu.as_deref(),
            Some("GTX 1650")
        );
        assert_eq!(
            parse_specs("RTX 3070 Ti gaming").gpu.as_deref(),
            Some("RTX 3070 TI")
        );
        assert_eq!(parse_specs("integrated graphics only").gpu, None);
    }

    #[test]
    fn case_insensitive() {
        let specs = parse_specs("laptop intel core I7-13620H 32gb ram 512gb ssd");
        assert_eq!(specs.cpu_gen, Some(13));
        assert_eq!(specs.ram_gb, Some(32));
        assert_eq!(specs.storage_gb, Some(512));
    }

    #[test]
    fn deterministic() {
        let title = "Acer Swift, Intel Core i5-1335U, 16GB LPDDR5 RAM, 512GB SSD";
        assert_eq!(parse_specs(title), parse_specs(title));
    }

    #[test]
    fn empty_title_all_unknown() {
        let specs = parse_specs("");
        assert_eq!(specs.cpu_gen, None);
        assert_eq!(specs.ram_gb, None);
        assert_eq!(specs.storage_gb, None);
        assert_eq!(specs.gpu, None);
    }
}
