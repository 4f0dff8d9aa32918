//! `Engine`: routes orders to the right [`OrderBook`] by symbol and keeps
//! the global order-id → symbol index that makes `cancel_order`/`get_order`
//! work from an id alone.

use crate::domain::{Order, OrderId, Trade};
use crate::error::OrderBookError;
use crate::ids::IdGenerator;
use crate::orderbook::{OrderBook, OrderBookSnapshot};
use crate::time::Clock;

use dashmap::DashMap;
use std::sync::Arc;

/// The engine's two registries, plus the collaborators it hands down into
/// every `OrderBook` call: `trade_ids` for minting trade ids, `clock` for
/// trade and snapshot timestamps.
///
/// `order_books` and `order_symbol_index` are both `DashMap`s: their
/// internal sharded locking gives the "exclusive to insert, shared to
/// read" contract without this type needing a lock of its own. Lock order
/// is Engine registries first, then at most one `OrderBook`'s lock —
/// never the reverse, and never two `OrderBook` locks at once.
pub struct Engine {
    order_books: DashMap<String, Arc<OrderBook>>,
    order_symbol_index: DashMap<OrderId, String>,
    trade_ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Engine {
    pub fn new(trade_ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Engine {
            order_books: DashMap::new(),
            order_symbol_index: DashMap::new(),
            trade_ids,
            clock,
        }
    }

    /// Route an order to its symbol's book, creating the book if this is
    /// the first order ever seen for that symbol.
    ///
    /// The id → symbol mapping is recorded *before* matching runs, so a
    /// concurrent `cancel_order` for the same id resolves correctly even
    /// if it races the submission.
    pub fn submit_order(&self, order: Order) -> Result<(Order, Vec<Trade>), OrderBookError> {
        if order.symbol.is_empty() {
            return Err(OrderBookError::InvalidSymbol);
        }
        self.order_symbol_index
            .insert(order.id.clone(), order.symbol.clone());
        let book = self.get_order_book(&order.symbol);
        book.process_order(order, self.trade_ids.as_ref(), self.clock.as_ref())
    }

    /// Cancel a resting order by id alone, resolving its book through the
    /// global index.
    ///
    /// The Engine's shard guard on `order_books` is dropped (via
    /// `.clone()` to an owned `Arc<OrderBook>`) before the book's own
    /// lock is acquired inside `OrderBook::cancel_order` — the Engine
    /// lock is never held across a call into an `OrderBook` lock.
    pub fn cancel_order(&self, id: &str) -> Result<(), OrderBookError> {
        let symbol = self
            .order_symbol_index
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| OrderBookError::OrderNotFound(id.to_string()))?;
        let book = self
            .order_books
            .get(&symbol)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| OrderBookError::OrderNotFound(id.to_string()))?;
        book.cancel_order(id)
    }

    /// Read-only view of an order, resolved by id alone. Returns
    /// `OrderNotFound` once the order is no longer live, even though the
    /// index still remembers which symbol once owned it.
    pub fn get_order(&self, id: &str) -> Result<Order, OrderBookError> {
        let symbol = self
            .order_symbol_index
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| OrderBookError::OrderNotFound(id.to_string()))?;
        let book = self
            .order_books
            .get(&symbol)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| OrderBookError::OrderNotFound(id.to_string()))?;
        book.get_order(id)
    }

    /// The `OrderBook` handle for a symbol, creating an empty one on first
    /// reference. A snapshot of a never-before-seen symbol therefore
    /// always succeeds and reports an empty book.
    pub fn get_order_book(&self, symbol: &str) -> Arc<OrderBook> {
        self.order_books
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::new(OrderBook::new(symbol)))
            .value()
            .clone()
    }

    pub fn get_snapshot(&self, symbol: &str, depth: usize) -> OrderBookSnapshot {
        self.get_order_book(symbol)
            .get_snapshot(depth, self.clock.as_ref())
    }
}
