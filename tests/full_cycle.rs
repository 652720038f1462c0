//! End-to-End Integration Tests
//!
//! Full cycle through the public API with simulated venues:
//! 1. Config loading and venue registration
//! 2. Opportunity detection across venues
//! 3. Two-leg execution (completed, partial, failed)
//! 4. History and statistics
//!
//! # Running the tests
//! ```bash
//! cargo test --test full_cycle
//! ```

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::broadcast;

use arb_engine::adapters::{ExchangeAdapter, FailureKind, SimulatedAdapter, VenueRegistry};
use arb_engine::config::{load_config_from_str, EngineConfig};
use arb_engine::core::{
    scan_task, ArbitrageEngine, ExecuteRequest, ExecutionStatus, InMemoryLedger, Leg, NoDelay,
};

// =============================================================================
// Helpers
// =============================================================================

const CONFIG_YAML: &str = r#"
engine:
  min_profit_margin_pct: 0.5
  max_trade_amount: 1000
  settlement_delay_ms: 10
  venue_timeout_ms: 1000
venues:
  - kind: simulated
    name: alpha
    prices:
      BTC: 30000
      ETH: 2000
      X: 100
  - kind: simulated
    name: beta
    prices:
      BTC: 30300
      ETH: 2002
      X: 100
  - kind: binance
    enabled: false
scanner:
  symbols: [BTC, ETH, X]
  interval_ms: 1000
"#;

struct Venues {
    alpha: Arc<SimulatedAdapter>,
    beta: Arc<SimulatedAdapter>,
    gamma: Arc<SimulatedAdapter>,
}

fn three_venue_engine() -> (ArbitrageEngine, Venues) {
    let venues = Venues {
        alpha: Arc::new(
            SimulatedAdapter::new("alpha").with_prices([("BTC", dec!(30000)), ("ETH", dec!(2000))]),
        ),
        beta: Arc::new(
            SimulatedAdapter::new("beta").with_prices([("BTC", dec!(30300)), ("ETH", dec!(2050))]),
        ),
        gamma: Arc::new(
            SimulatedAdapter::new("gamma").with_prices([("BTC", dec!(30150)), ("ETH", dec!(1990))]),
        ),
    };

    let mut registry = VenueRegistry::new(Duration::from_millis(500));
    registry.register(venues.alpha.clone()).unwrap();
    registry.register(venues.beta.clone()).unwrap();
    registry.register(venues.gamma.clone()).unwrap();

    let engine = ArbitrageEngine::with_parts(
        Arc::new(registry),
        &EngineConfig::default(),
        Arc::new(InMemoryLedger::new()),
        Arc::new(NoDelay),
    )
    .unwrap();
    (engine, venues)
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_config_driven_cycle() {
    let config = load_config_from_str(CONFIG_YAML).unwrap();
    let engine = ArbitrageEngine::from_config(&config).unwrap();

    let exchanges = engine.exchanges();
    assert_eq!(exchanges.exchanges, vec!["alpha", "beta"]);

    let detected = engine.detect(&config.scanner.symbols).await;
    // ETH gap is 0.1% (below threshold), X is flat
    assert_eq!(detected.count, 1);
    let best = &detected.opportunities[0];
    assert_eq!(best.symbol, "BTC");
    assert_eq!((best.buy_venue.as_str(), best.sell_venue.as_str()), ("alpha", "beta"));

    let response = engine.execute(ExecuteRequest::from(best)).await.unwrap();
    assert!(response.success);
    assert_eq!(response.execution.status, ExecutionStatus::Completed);
    assert_eq!(
        response.execution.profit.unwrap().round_dp(2),
        dec!(10.00)
    );

    let history = engine.history().await.unwrap();
    assert_eq!(history.executions.len(), 1);
    assert_eq!(history.statistics.success_rate, dec!(100));
}

#[tokio::test]
async fn test_ranked_detection_across_three_venues() {
    let (engine, _venues) = three_venue_engine();
    let detected = engine.detect(&symbols(&["BTC", "ETH"])).await;

    let margins: Vec<Decimal> = detected
        .opportunities
        .iter()
        .map(|o| o.profit_margin_pct)
        .collect();
    let mut sorted = margins.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(margins, sorted);

    // ETH gamma→beta is the widest gap (~3.02%)
    let best = &detected.opportunities[0];
    assert_eq!(best.symbol, "ETH");
    assert_eq!(best.buy_venue, "gamma");
    assert_eq!(best.sell_venue, "beta");
    assert!(detected.opportunities.iter().all(|o| o.buy_price < o.sell_price));
}

#[tokio::test]
async fn test_outage_excludes_only_the_failing_venue() {
    let (engine, venues) = three_venue_engine();
    venues.beta.set_unavailable(true);

    let detected = engine.detect(&symbols(&["BTC", "ETH"])).await;
    assert!(detected.count > 0);
    assert!(detected
        .opportunities
        .iter()
        .all(|o| o.buy_venue != "beta" && o.sell_venue != "beta"));
}

#[tokio::test]
async fn test_mixed_outcomes_feed_statistics() {
    let (engine, venues) = three_venue_engine();
    let detected = engine.detect(&symbols(&["BTC"])).await;
    let opportunity = detected.opportunities[0].clone();
    assert_eq!(opportunity.sell_venue, "beta");

    // 1. completed
    let completed = engine.execute(ExecuteRequest::from(&opportunity)).await.unwrap();
    assert_eq!(completed.execution.status, ExecutionStatus::Completed);

    // 2. partial: sell venue refuses
    venues.beta.set_reject_sells(true);
    let partial = engine.execute(ExecuteRequest::from(&opportunity)).await.unwrap();
    assert!(partial.success);
    assert_eq!(partial.execution.status, ExecutionStatus::Partial);
    assert_eq!(partial.execution.failure.as_ref().unwrap().leg, Leg::Sell);

    // 3. failed: buy venue refuses, no sell attempted
    venues.alpha.set_reject_buys(true);
    let sells_before = venues.beta.orders_placed().await.len();
    let failed = engine.execute(ExecuteRequest::from(&opportunity)).await.unwrap();
    assert!(!failed.success);
    assert_eq!(failed.execution.status, ExecutionStatus::Failed);
    assert_eq!(venues.beta.orders_placed().await.len(), sells_before);

    // 4. unknown venue
    let mut unknown = ExecuteRequest::from(&opportunity);
    unknown.buy_venue = "delta".to_string();
    let routed = engine.execute(unknown).await.unwrap();
    assert_eq!(
        routed.execution.failure.as_ref().unwrap().kind,
        FailureKind::UnknownVenue
    );

    let stats = engine.statistics().await.unwrap();
    assert_eq!(stats.total_executions, 4);
    assert_eq!(stats.completed_executions, 1);
    assert_eq!(stats.partial_executions, 1);
    assert_eq!(stats.failed_executions, 2);
    assert_eq!(stats.success_rate, dec!(25));

    let partials = engine
        .executions_by_status(ExecutionStatus::Partial)
        .await
        .unwrap();
    assert_eq!(partials[0].id, partial.execution.id);
}

#[tokio::test]
async fn test_invalid_request_leaves_ledger_untouched() {
    let (engine, _venues) = three_venue_engine();
    let result = engine
        .execute(ExecuteRequest {
            symbol: "BTC".to_string(),
            buy_venue: "alpha".to_string(),
            sell_venue: "beta".to_string(),
            buy_price: dec!(30300),
            sell_price: dec!(30000),
            quantity: dec!(0.1),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(engine.statistics().await.unwrap().total_executions, 0);
}

#[tokio::test]
async fn test_shared_venue_reports_orders() {
    let (engine, venues) = three_venue_engine();
    let detected = engine.detect(&symbols(&["ETH"])).await;
    engine
        .execute(ExecuteRequest::from(&detected.opportunities[0]))
        .await
        .unwrap();

    let buys = venues.gamma.orders_placed().await;
    assert_eq!(buys.len(), 1);
    assert_eq!(buys[0].symbol, "ETH");
    assert_eq!(venues.gamma.exchange_name(), "gamma");
}

#[tokio::test(start_paused = true)]
async fn test_scanner_auto_executes_until_shutdown() {
    let (engine, _venues) = three_venue_engine();
    let engine = Arc::new(engine);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let config = arb_engine::config::ScannerConfig {
        symbols: symbols(&["BTC", "ETH"]),
        interval_ms: 1000,
        auto_execute: true,
    };
    let handle = tokio::spawn(scan_task(engine.clone(), config, shutdown_rx));

    tokio::time::sleep(Duration::from_millis(3500)).await;
    shutdown_tx.send(()).unwrap();
    let scans = handle.await.unwrap();

    assert_eq!(scans, 4);
    let stats = engine.statistics().await.unwrap();
    assert_eq!(stats.completed_executions, 4);
}
