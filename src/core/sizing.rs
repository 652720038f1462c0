//! Sizing & profit model
//!
//! Turns a price gap into a capital-bounded trade:
//!
//! ```text
//! quantity        = max_trade_amount / buy_price
//! spread_abs      = sell_price - buy_price
//! spread_pct      = spread_abs / buy_price * 100
//! potential_profit = quantity * spread_abs
//! profit_margin   = potential_profit / max_trade_amount * 100   (== spread_pct)
//! ```
//!
//! All values are `Decimal`. Quantity keeps full precision; derived money
//! and percentage values are rounded to `DERIVED_DP` places so division
//! residue (0.99999…) does not leak into threshold comparisons.

use rust_decimal::Decimal;

use crate::error::AppError;

/// Fractional digits kept on derived profit and percentage values
pub const DERIVED_DP: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub quantity: Decimal,
    pub spread_abs: Decimal,
    pub spread_pct: Decimal,
    pub potential_profit: Decimal,
    pub profit_margin_pct: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct SizingModel {
    max_trade_amount: Decimal,
}

impl SizingModel {
    pub fn new(max_trade_amount: Decimal) -> Result<Self, AppError> {
        if max_trade_amount <= Decimal::ZERO {
            return Err(AppError::Config(format!(
                "max_trade_amount must be > 0 (got {})",
                max_trade_amount
            )));
        }
        Ok(Self { max_trade_amount })
    }

    pub fn max_trade_amount(&self) -> Decimal {
        self.max_trade_amount
    }

    /// Size a trade buying at `buy_price` and selling at `sell_price`
    ///
    /// Returns `None` unless `0 < buy_price < sell_price`.
    pub fn size(&self, buy_price: Decimal, sell_price: Decimal) -> Option<Sizing> {
        if buy_price <= Decimal::ZERO || sell_price <= buy_price {
            return None;
        }

        let quantity = self.max_trade_amount.checked_div(buy_price)?;
        let spread_abs = sell_price - buy_price;
        let spread_pct = spread_abs.checked_div(buy_price)? * Decimal::ONE_HUNDRED;
        let potential_profit = quantity.checked_mul(spread_abs)?;
        let profit_margin_pct =
            potential_profit.checked_div(self.max_trade_amount)? * Decimal::ONE_HUNDRED;

        Some(Sizing {
            quantity,
            spread_abs,
            spread_pct: spread_pct.round_dp(DERIVED_DP),
            potential_profit: potential_profit.round_dp(DERIVED_DP),
            profit_margin_pct: profit_margin_pct.round_dp(DERIVED_DP),
        })
    }
}

/// Exact threshold test on raw prices: `spread / buy * 100 >= min_pct`
///
/// Multiplication only, so a margin just under the minimum cannot be
/// rounded up onto it.
pub fn clears_margin(buy_price: Decimal, sell_price: Decimal, min_pct: Decimal) -> bool {
    let spread_scaled = (sell_price - buy_price).checked_mul(Decimal::ONE_HUNDRED);
    let required = min_pct.checked_mul(buy_price);
    match (spread_scaled, required) {
        (Some(spread_scaled), Some(required)) => spread_scaled >= required,
        _ => false,
    }
}
