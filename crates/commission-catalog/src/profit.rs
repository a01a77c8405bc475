//! Per-unit profit calculation from a selected category's commission rate.

use serde::{Deserialize, Serialize};

use crate::types::{Category, DEFAULT_COMMISSION_RATE};

/// Default VAT rate in percent.
pub const DEFAULT_VAT_RATE: f64 = 20.0;

/// Prices and rates for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfitInput {
    pub purchase_price: f64,
    pub selling_price: f64,
    pub commission_rate: f64,
    pub shipping_cost: f64,
    pub other_costs: f64,
    pub vat_rate: f64,
}

impl Default for ProfitInput {
    fn default() -> Self {
        Self {
            purchase_price: 0.0,
            selling_price: 0.0,
            commission_rate: DEFAULT_COMMISSION_RATE,
            shipping_cost: 0.0,
            other_costs: 0.0,
            vat_rate: DEFAULT_VAT_RATE,
        }
    }
}

impl ProfitInput {
    pub fn new(purchase_price: f64, selling_price: f64) -> Self {
        Self {
            purchase_price,
            selling_price,
            ..Self::default()
        }
    }

    /// Set the commission rate, clamped to `[0, 100]`.
    pub fn with_commission_rate(mut self, rate: f64) -> Self {
        self.commission_rate = clamp_rate(rate);
        self
    }

    /// Set the VAT rate, clamped to `[0, 100]`.
    pub fn with_vat_rate(mut self, rate: f64) -> Self {
        self.vat_rate = clamp_rate(rate);
        self
    }

    /// Take the commission rate from a selected category.
    pub fn with_category(self, category: &Category) -> Self {
        self.with_commission_rate(category.commission_rate)
    }
}

fn clamp_rate(rate: f64) -> f64 {
    rate.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitBreakdown {
    pub revenue: f64,
    /// Reported only; not part of `total_cost`.
    pub vat_amount: f64,
    pub commission_amount: f64,
    pub total_cost: f64,
    pub profit: f64,
    /// Percent of the selling price. `None` when the selling price is zero.
    pub profit_margin: Option<f64>,
    /// Percent of the purchase price. `None` when the purchase price is zero.
    pub roi: Option<f64>,
}

impl ProfitBreakdown {
    pub fn is_profitable(&self) -> bool {
        self.profit > 0.0
    }
}

pub fn calculate_profit(input: &ProfitInput) -> ProfitBreakdown {
    let selling = input.selling_price;
    let vat_amount = selling * input.vat_rate / 100.0;
    let commission_amount = selling * input.commission_rate / 100.0;
    let total_cost =
        input.purchase_price + input.shipping_cost + input.other_costs + commission_amount;
    let profit = selling - total_cost;

    ProfitBreakdown {
        revenue: selling,
        vat_amount,
        commission_amount,
        total_cost,
        profit,
        profit_margin: (selling != 0.0).then(|| profit / selling * 100.0),
        roi: (input.purchase_price != 0.0).then(|| profit / input.purchase_price * 100.0),
    }
}
