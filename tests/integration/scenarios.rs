use auction_core::prelude::*;
use std::sync::Arc;

fn engine() -> Engine {
    Engine::new(Arc::new(UuidIdGenerator::new()), Arc::new(FixedClock::new(0)))
}

fn limit(id: &str, side: Side, price: i64, qty: i64, ts: i64) -> Order {
    Order::new(id.to_string(), "BTCUSD", side, OrderKind::Limit, price, qty, ts)
}

fn market(id: &str, side: Side, qty: i64, ts: i64) -> Order {
    Order::new(id.to_string(), "BTCUSD", side, OrderKind::Market, 0, qty, ts)
}

#[test]
fn limit_rests_then_crosses() {
    let engine = engine();

    let (buyer, trades) = engine
        .submit_order(limit("buyer", Side::Buy, 100, 5, 1))
        .unwrap();
    assert!(trades.is_empty());
    assert_eq!(buyer.status, OrderStatus::Accepted);
    assert_eq!(engine.get_order_book("BTCUSD").resting_count(Side::Buy), 1);

    let (seller, trades) = engine
        .submit_order(limit("seller", Side::Sell, 100, 3, 2))
        .unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, 100);
    assert_eq!(trades[0].quantity, 3);
    assert_eq!(seller.status, OrderStatus::Filled);

    let buyer_after = engine.get_order("buyer").unwrap();
    assert_eq!(buyer_after.status, OrderStatus::PartialFill);
    assert_eq!(buyer_after.filled, 3);

    let snapshot = engine.get_snapshot("BTCUSD", 10);
    assert_eq!(snapshot.bids, vec![PriceLevel { price: 100, quantity: 2, order_count: 1 }]);
}

#[test]
fn price_improvement_for_taker() {
    let engine = engine();
    engine
        .submit_order(limit("ask101", Side::Sell, 101, 2, 1))
        .unwrap();
    engine
        .submit_order(limit("ask102", Side::Sell, 102, 2, 2))
        .unwrap();

    let (buyer, trades) = engine
        .submit_order(limit("buyer", Side::Buy, 102, 3, 3))
        .unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!((trades[0].price, trades[0].quantity), (101, 2));
    assert_eq!((trades[1].price, trades[1].quantity), (102, 1));
    assert_eq!(buyer.status, OrderStatus::Filled);

    let remaining_ask = engine.get_order("ask102").unwrap();
    assert_eq!(remaining_ask.remaining(), 1);
}

#[test]
fn time_priority_at_equal_price() {
    let engine = engine();
    engine.submit_order(limit("a", Side::Sell, 100, 1, 1)).unwrap();
    engine.submit_order(limit("b", Side::Sell, 100, 1, 2)).unwrap();

    let (_, trades) = engine.submit_order(market("taker", Side::Buy, 1, 3)).unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].maker_order_id, "a");
}

#[test]
fn market_order_liquidity_gate() {
    let engine = engine();
    engine.submit_order(limit("s1", Side::Sell, 100, 1, 1)).unwrap();

    let err = engine
        .submit_order(market("taker", Side::Buy, 2, 2))
        .unwrap_err();
    assert_eq!(
        err,
        OrderBookError::InsufficientLiquidity {
            side: Side::Buy,
            requested: 2,
            available: 1,
        }
    );
    assert_eq!(engine.get_order_book("BTCUSD").total_ask_liquidity(), 1);
    assert!(engine.get_order("taker").is_err());
}

#[test]
fn cancel_from_middle_of_book() {
    let engine = engine();
    engine.submit_order(limit("x", Side::Buy, 99, 1, 1)).unwrap();
    engine.submit_order(limit("y", Side::Buy, 100, 1, 2)).unwrap();
    engine.submit_order(limit("z", Side::Buy, 101, 1, 3)).unwrap();

    engine.cancel_order("y").unwrap();
    assert_eq!(
        engine.get_order("y"),
        Err(OrderBookError::OrderNotFound("y".to_string()))
    );

    let (_, trades) = engine.submit_order(market("taker", Side::Sell, 1, 4)).unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].maker_order_id, "z");
    assert_eq!(trades[0].price, 101);
}

#[test]
fn snapshot_aggregation() {
    let engine = engine();
    engine.submit_order(limit("a", Side::Buy, 100, 3, 1)).unwrap();
    engine.submit_order(limit("b", Side::Buy, 100, 2, 2)).unwrap();
    engine.submit_order(limit("c", Side::Buy, 99, 4, 3)).unwrap();

    let snapshot = engine.get_snapshot("BTCUSD", 2);
    assert_eq!(
        snapshot.bids,
        vec![
            PriceLevel { price: 100, quantity: 5, order_count: 2 },
            PriceLevel { price: 99, quantity: 4, order_count: 1 },
        ]
    );
}
