//! Order types and structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::OrderError;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the sign for position calculations (+1 for buy, -1 for sell).
    pub fn sign(&self) -> Decimal {
        match self {
            Side::Buy => Decimal::ONE,
            Side::Sell => -Decimal::ONE,
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

/// Sequential order identifier, unique within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Order status.
///
/// `Submitted -> Accepted -> Completed` is the happy path. `Canceled`,
/// `Margin` and `Rejected` end the order without touching cash or position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order handed to the broker
    Submitted,
    /// Order accepted by the broker, waiting for a price
    Accepted,
    /// Order fully executed
    Completed,
    /// Order canceled before execution
    Canceled,
    /// Not enough cash to execute
    Margin,
    /// Order refused as invalid
    Rejected,
}

impl OrderStatus {
    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Completed
                | OrderStatus::Canceled
                | OrderStatus::Margin
                | OrderStatus::Rejected
        )
    }

    /// Check if the order is active (can still be filled).
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Submitted | OrderStatus::Accepted)
    }

    /// Terminal without an execution.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            OrderStatus::Canceled | OrderStatus::Margin | OrderStatus::Rejected
        )
    }

    fn can_become(&self, next: OrderStatus) -> bool {
        match (*self, next) {
            (OrderStatus::Submitted, OrderStatus::Accepted) => true,
            (OrderStatus::Submitted | OrderStatus::Accepted, n) => n.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Submitted => "Submitted",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Completed => "Completed",
            OrderStatus::Canceled => "Canceled",
            OrderStatus::Margin => "Margin",
            OrderStatus::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

/// A strategy's request to trade, not yet an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Buy or sell
    pub side: Side,
    /// Unsigned quantity
    pub size: Decimal,
    /// Short human-readable cause, e.g. "cross up"
    pub reason: String,
}

impl OrderIntent {
    /// Create a buy intent.
    pub fn buy(size: Decimal) -> Self {
        Self {
            side: Side::Buy,
            size,
            reason: String::new(),
        }
    }

    /// Create a sell intent.
    pub fn sell(size: Decimal) -> Self {
        Self {
            side: Side::Sell,
            size,
            reason: String::new(),
        }
    }

    /// Attach a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

/// Execution details of a completed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    /// Fill price
    pub price: Decimal,
    /// Filled quantity (unsigned)
    pub size: Decimal,
    /// price * size
    pub value: Decimal,
    /// Commission charged
    pub commission: Decimal,
    /// Bar timestamp of the fill (Unix milliseconds)
    pub timestamp: i64,
}

/// Order with status and execution information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID
    pub id: OrderId,
    /// Buy or sell
    pub side: Side,
    /// Requested quantity (unsigned)
    pub size: Decimal,
    /// Current status
    pub status: OrderStatus,
    /// Reference price when the order was created
    pub created_price: Decimal,
    /// Bar timestamp when the order was created (Unix milliseconds)
    pub created_at: i64,
    /// Why the strategy asked for it
    pub reason: String,
    /// Set once the order completes
    pub executed: Option<Execution>,
    /// Set when the broker refuses the order
    pub rejection: Option<OrderError>,
}

impl Order {
    /// Create a submitted order from an intent.
    pub fn from_intent(
        id: OrderId,
        intent: &OrderIntent,
        created_price: Decimal,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            side: intent.side,
            size: intent.size,
            status: OrderStatus::Submitted,
            created_price,
            created_at,
            reason: intent.reason.clone(),
            executed: None,
            rejection: None,
        }
    }

    /// Check if this is a buy order.
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    /// Check if the order completed.
    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// Size with the side's sign applied.
    pub fn signed_size(&self) -> Decimal {
        self.side.sign() * self.size
    }

    /// Move to `Accepted`. Returns false if the order is past that point.
    pub fn accept(&mut self) -> bool {
        self.transition(OrderStatus::Accepted)
    }

    /// Record the execution and move to `Completed`.
    pub fn complete(&mut self, execution: Execution) -> bool {
        if !self.transition(OrderStatus::Completed) {
            return false;
        }
        self.executed = Some(execution);
        true
    }

    /// End the order with a failure status and the reason for it.
    pub fn refuse(&mut self, status: OrderStatus, error: OrderError) -> bool {
        if !status.is_failure() || !self.transition(status) {
            return false;
        }
        self.rejection = Some(error);
        true
    }

    fn transition(&mut self, next: OrderStatus) -> bool {
        if !self.status.can_become(next) {
            return false;
        }
        self.status = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(side: Side) -> Order {
        let intent = match side {
            Side::Buy => OrderIntent::buy(dec!(1)),
            Side::Sell => OrderIntent::sell(dec!(2)),
        };
        Order::from_intent(OrderId(1), &intent.with_reason("test"), dec!(100), 0)
    }

    #[test]
    fn test_order_from_intent() {
        let order = order(Side::Sell);
        assert_eq!(order.status, OrderStatus::Submitted);
        assert_eq!(order.size, dec!(2));
        assert_eq!(order.signed_size(), dec!(-2));
        assert_eq!(order.reason, "test");
        assert!(order.executed.is_none());
    }

    #[test]
    fn test_order_lifecycle() {
        let mut order = order(Side::Buy);
        assert!(order.accept());
        assert!(order.complete(Execution {
            price: dec!(100),
            size: dec!(1),
            value: dec!(100),
            commission: dec!(0.04),
            timestamp: 0,
        }));
        assert!(order.is_completed());
        assert!(order.status.is_terminal());

        // Terminal orders stay put
        assert!(!order.accept());
        assert!(!order.refuse(
            OrderStatus::Margin,
            OrderError::InvalidSize(Decimal::ZERO)
        ));
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn test_order_refuse() {
        let mut order = order(Side::Buy);
        order.accept();

        // Completed is not a failure status
        assert!(!order.refuse(OrderStatus::Completed, OrderError::InvalidSize(dec!(1))));

        let err = OrderError::InsufficientCash {
            required: dec!(100),
            available: dec!(1),
        };
        assert!(order.refuse(OrderStatus::Margin, err.clone()));
        assert_eq!(order.status, OrderStatus::Margin);
        assert_eq!(order.rejection, Some(err));
        assert!(order.status.is_failure());
    }

    #[test]
    fn test_side_sign() {
        assert_eq!(Side::Buy.sign(), dec!(1));
        assert_eq!(Side::Sell.sign(), dec!(-1));
    }
}
