//! Human-readable and JSON rendering.

use serde::Serialize;

use commission_catalog::pipeline::CatalogSource;
use commission_catalog::{Category, ProfitBreakdown, ProfitInput};

use crate::commands::TreeOrigin;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a rate without trailing zeros: `12`, `12.5`.
pub fn rate(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn describe_origin(origin: &TreeOrigin) -> String {
    match origin {
        TreeOrigin::Default { source, failures } => match source {
            CatalogSource::Live { attempt, name } => {
                format!("Live categories from attempt {} ({name})", attempt + 1)
            }
            CatalogSource::StaticFallback => format!(
                "Static catalog: all {} live attempts failed",
                failures.len()
            ),
        },
        TreeOrigin::Source { name } => format!("Categories from source '{name}'"),
        TreeOrigin::SourceFallback { name, error } => {
            format!("Static catalog: source '{name}' failed: {error}")
        }
        TreeOrigin::Offline => "Static catalog (offline)".to_string(),
    }
}

/// Print a category tree, one node per line.
pub fn print_tree(tree: &[Category]) {
    for category in tree {
        print_node(category, 0);
    }
}

fn print_node(category: &Category, depth: usize) {
    println!(
        "{:indent$}{:>6}  {}  ({}%)",
        "",
        category.id,
        category.name,
        rate(category.commission_rate),
        indent = depth * 4
    );
    for child in &category.sub_categories {
        print_node(child, depth + 1);
    }
}

pub fn print_breakdown(input: &ProfitInput, result: &ProfitBreakdown) {
    println!("Revenue:    {}", money(result.revenue));
    println!(
        "Commission: {} ({}%)",
        money(result.commission_amount),
        rate(input.commission_rate)
    );
    println!("VAT:        {} ({}%)", money(result.vat_amount), rate(input.vat_rate));
    println!("Total cost: {}", money(result.total_cost));
    println!("Profit:     {}", money(result.profit));
    match result.profit_margin {
        Some(margin) => println!("Margin:     {}%", rate(margin)),
        None => println!("Margin:     n/a"),
    }
    match result.roi {
        Some(roi) => println!("ROI:        {}%", rate(roi)),
        None => println!("ROI:        n/a"),
    }
    if !result.is_profitable() {
        println!("Not profitable at this price.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_trims_zeros() {
        assert_eq!(rate(12.0), "12");
        assert_eq!(rate(12.5), "12.5");
        assert_eq!(rate(7.25), "7.25");
        assert_eq!(rate(0.0), "0");
    }

    #[test]
    fn test_describe_origin() {
        let origin = TreeOrigin::Default {
            source: CatalogSource::Live {
                attempt: 2,
                name: "POST with action parameter".to_string(),
            },
            failures: Vec::new(),
        };
        assert_eq!(
            describe_origin(&origin),
            "Live categories from attempt 3 (POST with action parameter)"
        );
        assert_eq!(
            describe_origin(&TreeOrigin::Offline),
            "Static catalog (offline)"
        );
    }
}
