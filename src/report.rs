use crate::pipeline::compare::{Baseline, Deal};

/// Print the ranked deals as a fixed-width table with a summary block for
/// the top deal.
pub fn print_table(deals: &[Deal], baseline: &Baseline) {
    if deals.is_empty() {
        println!("\nNo upgrades found matching your criteria.");
        return;
    }

    println!("\n{}", "=".repeat(100));
    println!(
        "LAPTOP DEALS - compared to your specs: CPU Gen {}, RAM {}GB, Storage {}GB",
        baseline.cpu_gen, baseline.ram_gb, baseline.storage_gb
    );
    println!("{}", "=".repeat(100));
    println!("{:<58} | {:>10} | {:>8} | Notes", "Name", "Price", "Savings");
    println!("{}", "-".repeat(100));

    for d in deals {
        let savings = d
            .saving
            .map(|s| format!("${:.0}", s))
            .unwrap_or_else(|| "-".into());
        let notes = if d.notes.is_empty() { "-" } else { d.notes.as_str() };
        println!(
            "{:<58} | {:>10} | {:>8} | {}",
            truncate(&d.name, 55),
            format!("${:.2}", d.price),
            savings,
            notes
        );
    }

    let best = &deals[0];
    println!("\n{}", "*".repeat(60));
    println!("  BEST UPGRADE DEAL");
    println!("{}", "*".repeat(60));
    println!("  Product: {}", truncate(&best.name, 70));
    println!("  Price:   ${:.2}", best.price);
    if let Some(saving) = best.saving {
        println!("  Savings: ${:.0}", saving);
    }
    println!("  Specs:   {}", describe_specs(best));
    println!("  Link:    {}", best.url);
    println!("{}", "*".repeat(60));
}

fn describe_specs(deal: &Deal) -> String {
    let mut parts = Vec::new();
    if let Some(gen) = deal.specs.cpu_gen {
        let model = deal.specs.cpu_model.as_deref().unwrap_or("?");
        parts.push(format!("CPU {} (Gen {})", model, gen));
    }
    if let Some(ram) = deal.specs.ram_gb {
        parts.push(format!("RAM {}GB", ram));
    }
    if let Some(storage) = deal.specs.storage_gb {
        parts.push(format!("Storage {}GB", storage));
    }
    if let Some(gpu) = &deal.specs.gpu {
        parts.push(format!("GPU {}", gpu));
    }
    if parts.is_empty() {
        "unknown".to_string()
    } else {
        parts.join(", ")
    }
}

/// Render the deals as a standalone HTML wishlist page.
pub fn render_wishlist(deals: &[Deal]) -> String {
    let mut items = String::new();
    for (i, deal) in deals.iter().enumerate() {
        let mut specs = String::new();
        if let Some(gen) = deal.specs.cpu_gen {
            let model = deal.specs.cpu_model.as_deref().unwrap_or("?");
            specs.push_str(&format!(
                "<li><strong>CPU:</strong> {} (Gen {})</li>\n",
                escape(model),
                gen
            ));
        }
        if let Some(ram) = deal.specs.ram_gb {
            specs.push_str(&format!("<li><strong>RAM:</strong> {}GB</li>\n", ram));
        }
        if let Some(storage) = deal.specs.storage_gb {
            specs.push_str(&format!(
                "<li><strong>Storage:</strong> {}GB SSD</li>\n",
                storage
            ));
        }
        if let Some(gpu) = &deal.specs.gpu {
            specs.push_str(&format!("<li><strong>GPU:</strong> {}</li>\n", escape(gpu)));
        }

        let savings = deal
            .saving
            .map(|s| format!("<div class=\"savings\">Save ${:.0}!</div>", s))
            .unwrap_or_default();
        let notes = if deal.notes.is_empty() {
            "Good value"
        } else {
            deal.notes.as_str()
        };

        items.push_str(&format!(
            r#"    <div class="item">
        <h2>{rank}. {name}</h2>
        <ul class="specs">
{specs}        </ul>
        <div class="price-tag">${price:.2}</div>
        {savings}
        <p class="upgrade-notes">Upgrades: {notes}</p>
        <a href="{url}" class="btn" target="_blank">View Product</a>
    </div>
"#,
            rank = i + 1,
            name = escape(&truncate(&deal.name, 60)),
            specs = specs,
            price = deal.price,
            savings = savings,
            notes = escape(notes),
            url = escape(&deal.url),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>My Laptop Wishlist</title>
<style>
body {{ font-family: sans-serif; background: #f4f4f8; color: #333; margin: 0; padding: 20px; }}
.container {{ background: #fff; max-width: 800px; margin: 0 auto; padding: 40px; border-radius: 12px; }}
h1 {{ text-align: center; }}
.item {{ border: 1px solid #e0e0e0; border-radius: 10px; margin-bottom: 20px; padding: 25px; }}
.specs {{ list-style-type: none; padding: 0; }}
.specs li {{ margin-bottom: 6px; color: #555; }}
.price-tag {{ font-size: 1.4em; font-weight: bold; color: #2c3e50; }}
.savings {{ color: #28a745; font-weight: bold; }}
.upgrade-notes {{ color: #666; font-size: 0.9em; font-style: italic; }}
.btn {{ display: inline-block; margin-top: 12px; padding: 10px 22px; background: #4a67d8; color: #fff; text-decoration: none; border-radius: 20px; }}
</style>
</head>
<body>
<div class="container">
<h1>My Laptop Wishlist</h1>
{items}</div>
</body>
</html>
"#,
        items = items
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ── Tests ──
