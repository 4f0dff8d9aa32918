//! Value types shared by the whole crate: sides, order kinds, statuses,
//! the `Order` and `Trade` records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, caller-assigned order identifier. The core never generates these
/// itself — see [`crate::ids::IdGenerator`] for the boundary that does.
pub type OrderId = String;

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order of this side matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Limit orders rest on the book when they do not fully cross; market
/// orders never rest (see [`crate::error::OrderBookError::InsufficientLiquidity`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    Limit,
    Market,
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Limit => write!(f, "LIMIT"),
            OrderKind::Market => write!(f, "MARKET"),
        }
    }
}

/// Lifecycle status of an order. Transitions are monotonic: once `Filled`,
/// an order never transitions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Accepted,
    PartialFill,
    Filled,
    Cancelled,
    Rejected,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::PartialFill => "PARTIAL_FILL",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Rejected => "REJECTED",
        };
        write!(f, "{s}")
    }
}

/// A resting or incoming order.
///
/// `heap_index` is maintained exclusively by the [`crate::orderbook::heap::PriorityBook`]
/// that currently holds the order; it is `-1` whenever the order is not
/// resting in any priority structure. Callers outside `orderbook::heap`
/// should never read or set it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub symbol: String,
    pub side: Side,
    pub kind: OrderKind,
    pub price: i64,
    pub quantity: i64,
    pub timestamp: i64,
    pub filled: i64,
    pub status: OrderStatus,
    #[serde(skip)]
    pub(crate) heap_index: i64,
}

impl Order {
    /// Build a new, not-yet-submitted order. `heap_index` starts at the
    /// "not resting" sentinel.
    pub fn new(
        id: OrderId,
        symbol: impl Into<String>,
        side: Side,
        kind: OrderKind,
        price: i64,
        quantity: i64,
        timestamp: i64,
    ) -> Self {
        Order {
            id,
            symbol: symbol.into(),
            side,
            kind,
            price,
            quantity,
            timestamp,
            filled: 0,
            status: OrderStatus::Accepted,
            heap_index: -1,
        }
    }

    /// Unfilled quantity still available to match or rest.
    #[inline]
    pub fn remaining(&self) -> i64 {
        self.quantity - self.filled
    }

    #[inline]
    pub(crate) fn is_resting(&self) -> bool {
        self.heap_index >= 0
    }
}

/// An immutable record of a single match between a resting (maker) order
/// and an incoming (taker) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    /// The maker's price — trades always print at the resting order's price.
    pub price: i64,
    pub quantity: i64,
    pub timestamp: i64,
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
}
