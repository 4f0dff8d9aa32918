//! `OrderBook`: one symbol's resting orders, liquidity counters, and the
//! entry points (`process_order`, `cancel_order`, `get_order`,
//! `get_snapshot`) that the [`crate::engine::Engine`] routes to by symbol.

use super::heap::PriorityBook;
use crate::domain::{Order, OrderId, OrderKind, Side};
use crate::error::OrderBookError;
use crate::time::Clock;

use parking_lot::RwLock;
use std::collections::HashMap;

/// The four fields spec.md §5 requires to move together under one lock:
/// both priority structures, the resting-side index, and both liquidity
/// counters.
pub(super) struct BookState {
    pub(super) bids: PriorityBook,
    pub(super) asks: PriorityBook,
    /// Which side a resting order is currently on, keyed by id. The
    /// per-side `PriorityBook` already knows an order's *position* once
    /// you know its side; this is the side-agnostic half of that lookup.
    pub(super) resting_side: HashMap<OrderId, Side>,
    pub(super) total_bid_liquidity: i64,
    pub(super) total_ask_liquidity: i64,
}

impl BookState {
    fn new() -> Self {
        BookState {
            bids: PriorityBook::new(Side::Buy),
            asks: PriorityBook::new(Side::Sell),
            resting_side: HashMap::new(),
            total_bid_liquidity: 0,
            total_ask_liquidity: 0,
        }
    }
}

/// A single symbol's order book.
///
/// All matching and cancellation for this symbol serializes through one
/// `RwLock<BookState>`: `process_order` and `cancel_order` take it
/// exclusively, `get_snapshot` and `get_order` take it shared. There is no
/// cross-book ordering guarantee — only operations on the *same* symbol
/// are linearized relative to each other.
pub struct OrderBook {
    symbol: String,
    pub(super) state: RwLock<BookState>,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        OrderBook {
            symbol: symbol.into(),
            state: RwLock::new(BookState::new()),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Current aggregate bid-side liquidity (sum of `quantity - filled`
    /// over every resting bid).
    pub fn total_bid_liquidity(&self) -> i64 {
        self.state.read().total_bid_liquidity
    }

    /// Current aggregate ask-side liquidity (sum of `quantity - filled`
    /// over every resting ask).
    pub fn total_ask_liquidity(&self) -> i64 {
        self.state.read().total_ask_liquidity
    }

    /// Number of resting orders on a given side.
    pub fn resting_count(&self, side: Side) -> usize {
        let state = self.state.read();
        match side {
            Side::Buy => state.bids.len(),
            Side::Sell => state.asks.len(),
        }
    }

    /// A read-only view of an order still resting in this book.
    ///
    /// Returns [`OrderBookError::OrderNotFound`] once the order has filled
    /// or been cancelled — this book keeps no history of orders that have
    /// left it (spec.md §9, "Historical lookup after fill or cancel").
    pub fn get_order(&self, id: &str) -> Result<Order, OrderBookError> {
        let state = self.state.read();
        let side = state
            .resting_side
            .get(id)
            .ok_or_else(|| OrderBookError::OrderNotFound(id.to_string()))?;
        let book = match side {
            Side::Buy => &state.bids,
            Side::Sell => &state.asks,
        };
        book.peek_by_id(id)
            .cloned()
            .ok_or_else(|| OrderBookError::OrderNotFound(id.to_string()))
    }

    /// Cancel a resting order.
    ///
    /// Idempotent-on-absence: cancelling an id that is not currently
    /// resting (never submitted, already filled, or already cancelled)
    /// returns [`OrderBookError::OrderNotFound`] with no side effect.
    pub fn cancel_order(&self, id: &str) -> Result<(), OrderBookError> {
        let mut state = self.state.write();
        let side = state
            .resting_side
            .remove(id)
            .ok_or_else(|| OrderBookError::OrderNotFound(id.to_string()))?;

        let removed = match side {
            Side::Buy => state.bids.remove_by_id(id),
            Side::Sell => state.asks.remove_by_id(id),
        };
        let mut removed = match removed {
            Some(order) => order,
            None => {
                // resting_side and the per-side heap have gone out of sync —
                // a bug, not a caller error. Loud in debug; in production we
                // report it as a failed request rather than abort the process.
                debug_assert!(
                    false,
                    "resting_side said {id} is on {side:?} but it was not in that heap"
                );
                return Err(OrderBookError::InvalidOrder(format!(
                    "order {id} indexed on {side:?} but missing from that side's priority book"
                )));
            }
        };
        let remaining = removed.remaining();
        match side {
            Side::Buy => state.total_bid_liquidity -= remaining,
            Side::Sell => state.total_ask_liquidity -= remaining,
        }
        removed.status = crate::domain::OrderStatus::Cancelled;
        tracing::trace!(order_id = %id, symbol = %self.symbol, "order cancelled");
        Ok(())
    }

    /// Validate an order at the entry point, before any state changes.
    pub(super) fn validate(order: &Order) -> Result<(), OrderBookError> {
        if order.quantity <= 0 {
            return Err(OrderBookError::InvalidQuantity);
        }
        if order.kind == OrderKind::Limit && order.price <= 0 {
            return Err(OrderBookError::InvalidPrice);
        }
        Ok(())
    }

    /// Aggregate resting volume by price level, truncated to `depth`
    /// levels per side, stamped with `clock`'s current reading. See
    /// [`super::snapshot`].
    pub fn get_snapshot(&self, depth: usize, clock: &dyn Clock) -> super::snapshot::OrderBookSnapshot {
        let state = self.state.read();
        super::snapshot::OrderBookSnapshot::build(
            &self.symbol,
            clock.now_ms(),
            &state.bids,
            &state.asks,
            depth,
        )
    }
}
