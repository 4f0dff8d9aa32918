//! Wires an `Engine` with real collaborators and runs a handful of orders
//! through it, printing the resulting trades and a depth-2 snapshot.

use auction_core::prelude::*;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt::init();

    let clock = Arc::new(SystemClock::new());
    let ids = Arc::new(UuidIdGenerator::new());
    let engine = Engine::new(ids.clone(), clock.clone());

    let mut submit = |side, kind, price, quantity| {
        let order = Order::new(
            ids.next_id(),
            "BTCUSD",
            side,
            kind,
            price,
            quantity,
            clock.now_ms(),
        );
        engine.submit_order(order)
    };

    let (resting, _) = submit(Side::Buy, OrderKind::Limit, 30_000_00, 10).unwrap();
    println!("resting bid: {resting:?}");

    let (taker, trades) = submit(Side::Sell, OrderKind::Limit, 30_000_00, 4).unwrap();
    println!("taker: {taker:?}");
    for trade in &trades {
        println!("trade: {trade:?}");
    }

    let snapshot = engine.get_snapshot("BTCUSD", 2);
    println!("{}", serde_json::to_string_pretty(&snapshot).unwrap());
}
