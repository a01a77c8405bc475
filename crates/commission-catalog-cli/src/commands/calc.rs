use clap::Args;
use serde_json::json;

use commission_catalog::{calculate_profit, find_category, ProfitInput};

use super::{resolve_tree, Context};
use crate::output;

#[derive(Args)]
pub struct CalcArgs {
    /// Purchase price per unit.
    #[arg(long)]
    pub purchase: f64,

    /// Selling price per unit.
    #[arg(long)]
    pub selling: f64,

    /// Commission rate in percent.
    #[arg(long, conflicts_with = "category")]
    pub commission: Option<f64>,

    /// Take the commission rate from this category id.
    #[arg(long)]
    pub category: Option<i64>,

    #[arg(long, default_value_t = 0.0)]
    pub shipping: f64,

    #[arg(long, default_value_t = 0.0)]
    pub other: f64,

    /// VAT rate in percent.
    #[arg(long, default_value_t = commission_catalog::profit::DEFAULT_VAT_RATE)]
    pub vat: f64,

    /// Saved source used to look up `--category`.
    #[arg(long, requires = "category")]
    pub source: Option<String>,
}

pub async fn run(ctx: &Context, args: &CalcArgs) -> anyhow::Result<()> {
    let mut input = ProfitInput {
        shipping_cost: args.shipping,
        other_costs: args.other,
        ..ProfitInput::new(args.purchase, args.selling)
    }
    .with_vat_rate(args.vat);

    let mut category_path = None;
    if let Some(rate) = args.commission {
        input = input.with_commission_rate(rate);
    } else if let Some(id) = args.category {
        let (tree, _) = resolve_tree(ctx, args.source.as_deref(), false).await?;
        let found = find_category(&tree, id)
            .ok_or_else(|| anyhow::anyhow!("category {id} not found"))?;
        input = input.with_category(found.category);
        category_path = Some(found.display_path());
    }

    let breakdown = calculate_profit(&input);

    if ctx.json {
        return output::print_json(&json!({
            "input": input,
            "category": category_path,
            "result": breakdown,
        }));
    }

    if let Some(path) = &category_path {
        println!("Category:   {path}");
    }
    output::print_breakdown(&input, &breakdown);
    Ok(())
}
