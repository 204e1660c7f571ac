//! Broker trait definition.

use crate::types::{Bar, Order, OrderIntent, Portfolio, Trade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Change to a trade caused by one execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TradeUpdate {
    Opened(Trade),
    Closed(Trade),
}

impl TradeUpdate {
    pub fn trade(&self) -> &Trade {
        match self {
            TradeUpdate::Opened(t) | TradeUpdate::Closed(t) => t,
        }
    }
}

/// Outcome of processing one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// The order in its terminal state
    pub order: Order,
    /// Trades closed and opened by the fill, closing leg first
    pub trades: Vec<TradeUpdate>,
}

/// Trait for simulated brokers.
///
/// Brokers own cash and the position. Insufficient cash is reported on the
/// order (status `Margin`), never as an error.
pub trait Broker {
    /// Turn an intent into a submitted order priced off `bar`.
    fn submit(&mut self, intent: &OrderIntent, bar: &Bar) -> Order;

    /// Execute (or refuse) a submitted order against `bar`.
    fn process(&mut self, order: Order, bar: &Bar) -> ExecutionReport;

    /// Mark the open position to the bar's close.
    fn mark(&mut self, bar: &Bar);

    /// Get the account state.
    fn portfolio(&self) -> &Portfolio;

    /// Signed size of the open position.
    fn position_size(&self) -> Decimal {
        self.portfolio().position.quantity
    }

    /// Cash plus marked position.
    fn value(&self) -> Decimal {
        self.portfolio().value()
    }

    /// Get the broker name.
    fn name(&self) -> &str;
}
