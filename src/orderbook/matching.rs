//! The matching algorithm: `OrderBook::process_order`.
//!
//! Kept in its own module the way the teacher splits `matching.rs` out of
//! `book.rs` — the match loop is the one piece of this crate dense enough
//! to deserve reading on its own.

use super::book::{BookState, OrderBook};
use crate::domain::{Order, OrderKind, OrderStatus, Side, Trade};
use crate::error::OrderBookError;
use crate::ids::IdGenerator;
use crate::time::Clock;

impl OrderBook {
    /// Validate, match against the resting opposite side, and either
    /// return a fully-filled order or rest the (possibly partially-filled)
    /// remainder.
    ///
    /// Market orders are all-or-nothing with respect to liquidity *at
    /// decision time*: if the opposite side cannot cover the requested
    /// quantity, the whole order is rejected before any trades are
    /// generated. Limit orders always take whatever fills they can get
    /// and rest the remainder.
    ///
    /// `trade_ids` mints the id for every trade this call emits; `clock`
    /// is read once per emitted trade for that trade's timestamp (see
    /// `time::Clock`).
    pub fn process_order(
        &self,
        mut order: Order,
        trade_ids: &dyn IdGenerator,
        clock: &dyn Clock,
    ) -> Result<(Order, Vec<Trade>), OrderBookError> {
        Self::validate(&order)?;

        let mut state = self.state.write();

        if order.kind == OrderKind::Market {
            let available = match order.side {
                Side::Buy => state.total_ask_liquidity,
                Side::Sell => state.total_bid_liquidity,
            };
            if available < order.quantity {
                return Err(OrderBookError::InsufficientLiquidity {
                    side: order.side,
                    requested: order.quantity,
                    available,
                });
            }
        }

        let trades = Self::match_loop(&mut state, &mut order, trade_ids, clock, &self.symbol);

        if order.filled >= order.quantity {
            order.status = OrderStatus::Filled;
        } else if order.kind == OrderKind::Limit {
            order.status = if order.filled > 0 {
                OrderStatus::PartialFill
            } else {
                OrderStatus::Accepted
            };
            let remaining = order.remaining();
            match order.side {
                Side::Buy => state.total_bid_liquidity += remaining,
                Side::Sell => state.total_ask_liquidity += remaining,
            }
            state.resting_side.insert(order.id.clone(), order.side);
            let resting = order.clone();
            match order.side {
                Side::Buy => {
                    state.bids.push(resting);
                }
                Side::Sell => {
                    state.asks.push(resting);
                }
            }
        } else {
            // Market order with residual quantity: unreachable, because the
            // liquidity pre-check above guarantees the opposite side can
            // cover `order.quantity` in full. A residual here would mean
            // the pre-check and the match loop disagree about available
            // liquidity.
            debug_assert_eq!(
                order.filled,
                order.quantity,
                "market order left a residual after a passing liquidity check"
            );
        }

        Ok((order, trades))
    }

    /// Walk the opposite side's priority book from best price outward,
    /// filling `taker` until it is either fully filled, the book runs dry,
    /// or (for a limit order) the next resting price no longer crosses.
    fn match_loop(
        state: &mut BookState,
        taker: &mut Order,
        trade_ids: &dyn IdGenerator,
        clock: &dyn Clock,
        symbol: &str,
    ) -> Vec<Trade> {
        let mut trades = Vec::new();

        loop {
            if taker.filled >= taker.quantity {
                break;
            }

            let opposite = match taker.side {
                Side::Buy => &mut state.asks,
                Side::Sell => &mut state.bids,
            };

            let crosses = match opposite.peek() {
                None => false,
                Some(best) => match taker.kind {
                    OrderKind::Market => true,
                    OrderKind::Limit => match taker.side {
                        Side::Buy => taker.price >= best.price,
                        Side::Sell => taker.price <= best.price,
                    },
                },
            };
            if !crosses {
                break;
            }

            let match_qty;
            let maker_filled_completely;
            let maker_id;
            let maker_price;
            {
                let best = opposite.peek_mut().expect("crosses implies a best order exists");
                match_qty = (taker.quantity - taker.filled).min(best.remaining());
                best.filled += match_qty;
                maker_filled_completely = best.filled >= best.quantity;
                maker_id = best.id.clone();
                maker_price = best.price;
                best.status = if maker_filled_completely {
                    OrderStatus::Filled
                } else {
                    OrderStatus::PartialFill
                };
            }

            taker.filled += match_qty;

            match taker.side {
                Side::Buy => state.total_ask_liquidity -= match_qty,
                Side::Sell => state.total_bid_liquidity -= match_qty,
            }

            trades.push(Trade {
                id: trade_ids.next_id(),
                price: maker_price,
                quantity: match_qty,
                timestamp: clock.now_ms(),
                maker_order_id: maker_id.clone(),
                taker_order_id: taker.id.clone(),
            });

            tracing::trace!(
                symbol,
                maker_order_id = %maker_id,
                taker_order_id = %taker.id,
                price = maker_price,
                quantity = match_qty,
                "trade executed"
            );

            if maker_filled_completely {
                let opposite = match taker.side {
                    Side::Buy => &mut state.asks,
                    Side::Sell => &mut state.bids,
                };
                opposite.pop();
                state.resting_side.remove(&maker_id);
            }
        }

        trades
    }
}
