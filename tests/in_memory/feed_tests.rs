//! Polling feeds for the kitchen and cashier views.

use super::helpers::{
    Harness, confirmed_order, create_menu_item, harness, pay_at_counter, set_kitchen_status,
};
use orderline::config::{ConfigError, OrderingConfig, PollingConfig};
use orderline::context::InMemoryOrdering;
use orderline::order::domain::OrderStatus;
use rstest::rstest;

#[rstest]
#[tokio::test(start_paused = true)]
async fn kitchen_feed_follows_the_queue(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let order = confirmed_order(&harness, &[(burger.id(), 1)], "counter").await?;
    let mut feed = harness.api.context().kitchen_queue_feed();

    let first = feed.next().await?;
    eyre::ensure!(first.sequence == 1);
    eyre::ensure!(first.error.is_none());
    eyre::ensure!(first.items.iter().map(|queued| queued.id()).eq([order.id]));

    set_kitchen_status(&harness, &order, "preparing").await?;
    let second = feed.next().await?;
    eyre::ensure!(
        second
            .items
            .iter()
            .map(|queued| queued.status())
            .eq([OrderStatus::Preparing])
    );

    set_kitchen_status(&harness, &order, "ready").await?;
    let third = feed.next().await?;
    eyre::ensure!(third.items.is_empty());
    eyre::ensure!(feed.latest() == third);
    Ok(())
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cashier_feed_drops_settled_orders(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let order = confirmed_order(&harness, &[(burger.id(), 2)], "counter").await?;
    let mut feed = harness.api.context().counter_payments_feed();

    let before = feed.next().await?;
    eyre::ensure!(before.items.iter().map(|pending| pending.id()).eq([order.id]));

    pay_at_counter(&harness, &order, "mobile").await?;
    let after = feed.next().await?;
    eyre::ensure!(after.items.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn feeds_use_configured_intervals() -> eyre::Result<()> {
    let config = OrderingConfig::from_json_str(
        r#"{"polling": {"kitchen_interval_ms": 250, "cashier_interval_ms": 750}}"#,
    )?;
    let harness = Harness::with_config(&config);
    let mut feed = harness.api.context().kitchen_queue_feed();
    let started = tokio::time::Instant::now();

    feed.next().await?;
    feed.next().await?;
    feed.next().await?;

    eyre::ensure!(started.elapsed() == std::time::Duration::from_millis(500));
    eyre::ensure!(feed.is_running());
    feed.shutdown();
    Ok(())
}

#[rstest]
#[case(0, 1_000, "kitchen_interval_ms")]
#[case(1_000, 0, "cashier_interval_ms")]
fn zero_intervals_built_in_code_are_refused(
    #[case] kitchen_interval_ms: u64,
    #[case] cashier_interval_ms: u64,
    #[case] field: &str,
) {
    let config = OrderingConfig {
        polling: PollingConfig {
            kitchen_interval_ms,
            cashier_interval_ms,
        },
        ..OrderingConfig::default()
    };

    let result = InMemoryOrdering::in_memory(&config);

    assert!(matches!(result, Err(ConfigError::ZeroInterval(name)) if name == field));
}
