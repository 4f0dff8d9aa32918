//! Convenience re-exports of the types most callers need.

pub use crate::domain::{Order, OrderId, OrderKind, OrderStatus, Side, Trade};
pub use crate::engine::Engine;
pub use crate::error::OrderBookError;
pub use crate::ids::{IdGenerator, UuidIdGenerator};
pub use crate::orderbook::{OrderBook, OrderBookSnapshot, PriceLevel};
pub use crate::time::{Clock, FixedClock, SystemClock};
