//! Cross-venue arbitrage opportunity detector
//!
//! One scan fetches every symbol from every registered venue (venues in
//! parallel, symbols per venue in order), then compares each unordered
//! venue pair in registration order. A failed fetch removes only that
//! (venue, symbol) quote from the comparison.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::adapters::registry::VenueRegistry;
use crate::core::sizing::{clears_margin, SizingModel};
use crate::core::types::ArbitrageOpportunity;

/// Quote grid for one scan: `prices[venue][symbol]`, `None` where the
/// fetch failed
pub struct QuoteMatrix<'a> {
    pub venues: Vec<&'a str>,
    pub symbols: &'a [String],
    pub prices: Vec<Vec<Option<Decimal>>>,
}

pub struct OpportunityDetector {
    registry: Arc<VenueRegistry>,
    sizing: SizingModel,
    min_profit_margin_pct: Decimal,
}

impl OpportunityDetector {
    pub fn new(
        registry: Arc<VenueRegistry>,
        sizing: SizingModel,
        min_profit_margin_pct: Decimal,
    ) -> Self {
        Self {
            registry,
            sizing,
            min_profit_margin_pct,
        }
    }

    pub fn min_profit_margin_pct(&self) -> Decimal {
        self.min_profit_margin_pct
    }

    /// Scan `symbols` across all venues
    ///
    /// Never fails: venue errors only shrink the comparison set, and fewer
    /// than two venues yields an empty list.
    pub async fn detect(&self, symbols: &[String]) -> Vec<ArbitrageOpportunity> {
        let symbols = normalize_symbols(symbols);
        let venues = self.registry.venues();
        if venues.len() < 2 || symbols.is_empty() {
            debug!(
                venues = venues.len(),
                symbols = symbols.len(),
                "[SCAN] Nothing to compare"
            );
            return Vec::new();
        }

        let fetches = venues.iter().map(|venue| {
            let symbols = &symbols;
            async move {
                let results = venue.adapter.get_prices(symbols).await;
                results
                    .into_iter()
                    .zip(symbols.iter())
                    .map(|(result, symbol)| match result {
                        Ok(quote) => Some(quote.price),
                        Err(e) => {
                            warn!(
                                venue = %venue.name,
                                symbol = %symbol,
                                error = %e,
                                "[SCAN] Quote unavailable - venue excluded for symbol"
                            );
                            None
                        }
                    })
                    .collect::<Vec<_>>()
            }
        });
        let prices = join_all(fetches).await;

        let matrix = QuoteMatrix {
            venues: venues.iter().map(|v| v.name.as_str()).collect(),
            symbols: &symbols,
            prices,
        };
        let opportunities = self.evaluate(&matrix);

        info!(
            venues = venues.len(),
            symbols = symbols.len(),
            found = opportunities.len(),
            "[SCAN] Detection complete"
        );
        opportunities
    }

    /// Compare every venue pair for every symbol and rank the survivors
    pub fn evaluate(&self, matrix: &QuoteMatrix<'_>) -> Vec<ArbitrageOpportunity> {
        let detected_at = Utc::now();
        let mut opportunities = Vec::new();

        for (s, symbol) in matrix.symbols.iter().enumerate() {
            for i in 0..matrix.venues.len() {
                for j in (i + 1)..matrix.venues.len() {
                    let (Some(price_i), Some(price_j)) = (quote_at(matrix, i, s), quote_at(matrix, j, s))
                    else {
                        continue;
                    };
                    if price_i == price_j {
                        continue;
                    }

                    let ((buy_venue, buy_price), (sell_venue, sell_price)) = if price_i < price_j {
                        ((matrix.venues[i], price_i), (matrix.venues[j], price_j))
                    } else {
                        ((matrix.venues[j], price_j), (matrix.venues[i], price_i))
                    };

                    if !clears_margin(buy_price, sell_price, self.min_profit_margin_pct) {
                        continue;
                    }
                    let Some(sizing) = self.sizing.size(buy_price, sell_price) else {
                        continue;
                    };

                    opportunities.push(ArbitrageOpportunity {
                        symbol: symbol.clone(),
                        buy_venue: buy_venue.to_string(),
                        sell_venue: sell_venue.to_string(),
                        buy_price,
                        sell_price,
                        spread_abs: sizing.spread_abs,
                        spread_pct: sizing.spread_pct,
                        sized_quantity: sizing.quantity,
                        potential_profit: sizing.potential_profit,
                        profit_margin_pct: sizing.profit_margin_pct,
                        detected_at,
                    });
                }
            }
        }

        rank(&mut opportunities);
        opportunities
    }
}

fn quote_at(matrix: &QuoteMatrix<'_>, venue: usize, symbol: usize) -> Option<Decimal> {
    matrix
        .prices
        .get(venue)
        .and_then(|row| row.get(symbol))
        .copied()
        .flatten()
}

/// Trim, uppercase and dedupe, keeping first-seen order
fn normalize_symbols(symbols: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    symbols
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

/// Margin desc, then potential profit desc, then symbol asc (stable)
pub fn rank(opportunities: &mut [ArbitrageOpportunity]) {
    opportunities.sort_by(|a, b| {
        b.profit_margin_pct
            .cmp(&a.profit_margin_pct)
            .then_with(|| b.potential_profit.cmp(&a.potential_profit))
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
}
