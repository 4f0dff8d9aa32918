//! Point-in-time aggregated views of an [`super::book::OrderBook`].
//!
//! A snapshot never exposes individual resting orders — only depth-limited,
//! per-price-level aggregates — so a caller can publish it without leaking
//! anything about which specific order ids make up a level.

use super::heap::PriorityBook;
use crate::domain::Side;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate resting volume at a single price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: i64,
    /// Sum of `quantity - filled` over every order resting at this price.
    pub quantity: i64,
    pub order_count: usize,
}

/// A depth-limited, read-only view of one symbol's book at the instant it
/// was built. Bids are ordered best (highest) price first, asks best
/// (lowest) price first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub symbol: String,
    pub timestamp: i64,
    pub bids: Vec<PriceLevel>,
    pub asks: Vec<PriceLevel>,
}

impl OrderBookSnapshot {
    pub(super) fn build(
        symbol: &str,
        timestamp: i64,
        bids: &PriorityBook,
        asks: &PriorityBook,
        depth: usize,
    ) -> Self {
        OrderBookSnapshot {
            symbol: symbol.to_string(),
            timestamp,
            bids: aggregate(bids, Side::Buy, depth),
            asks: aggregate(asks, Side::Sell, depth),
        }
    }
}

/// Collapse a side's resting orders into price levels and take the best
/// `depth` of them. The heap's internal array order is not priority order
/// across ties at different prices, so levels are grouped through a
/// `BTreeMap` and re-sorted rather than read off the heap directly.
fn aggregate(book: &PriorityBook, side: Side, depth: usize) -> Vec<PriceLevel> {
    let mut levels: BTreeMap<i64, (i64, usize)> = BTreeMap::new();
    for order in book.iter() {
        let entry = levels.entry(order.price).or_insert((0, 0));
        entry.0 += order.remaining();
        entry.1 += 1;
    }

    let mut levels: Vec<PriceLevel> = levels
        .into_iter()
        .map(|(price, (quantity, order_count))| PriceLevel {
            price,
            quantity,
            order_count,
        })
        .collect();

    match side {
        Side::Buy => levels.sort_by(|a, b| b.price.cmp(&a.price)),
        Side::Sell => levels.sort_by(|a, b| a.price.cmp(&b.price)),
    }
    levels.truncate(depth);
    levels
}
