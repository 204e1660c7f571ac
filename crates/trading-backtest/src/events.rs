//! Events produced by one engine step.

use chrono::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use trading_core::types::{Order, Trade};

/// Something that happened while processing a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Position and close at the start of strategy evaluation
    Status {
        timestamp: i64,
        position: Decimal,
        close: f64,
    },
    /// Strategy intent turned into an order
    OrderCreated(Order),
    /// Order filled
    OrderCompleted(Order),
    /// Order ended as Canceled, Margin or Rejected
    OrderRefused(Order),
    TradeOpened(Trade),
    TradeClosed(Trade),
}

impl EngineEvent {
    /// Bar timestamp the event belongs to (Unix milliseconds).
    pub fn timestamp(&self) -> i64 {
        match self {
            EngineEvent::Status { timestamp, .. } => *timestamp,
            EngineEvent::OrderCreated(o) | EngineEvent::OrderRefused(o) => o.created_at,
            EngineEvent::OrderCompleted(o) => o
                .executed
                .as_ref()
                .map(|e| e.timestamp)
                .unwrap_or(o.created_at),
            EngineEvent::TradeOpened(t) => t.open_timestamp,
            EngineEvent::TradeClosed(t) => t.close_timestamp.unwrap_or(t.open_timestamp),
        }
    }

    /// Events that report an order the broker did not execute.
    pub fn is_refusal(&self) -> bool {
        matches!(self, EngineEvent::OrderRefused(_))
    }

    /// Message text without the timestamp prefix.
    pub fn message(&self) -> String {
        match self {
            EngineEvent::Status {
                position, close, ..
            } => format!("Position: {:.0}, Close: {:.2}", position, close),
            EngineEvent::OrderCreated(o) => {
                format!("{} CREATE, {:.2}", o.side, o.created_price)
            }
            EngineEvent::OrderCompleted(o) => match &o.executed {
                Some(e) => format!(
                    "{} EXECUTED, Price: {:.2}, Cost: {:.2}, Comm {:.2}",
                    o.side, e.price, e.value, e.commission
                ),
                None => format!("{} EXECUTED", o.side),
            },
            EngineEvent::OrderRefused(o) => match &o.rejection {
                Some(reason) => format!(
                    "Order Canceled/Margin/Rejected: {} {} ({})",
                    o.id, o.status, reason
                ),
                None => format!("Order Canceled/Margin/Rejected: {} {}", o.id, o.status),
            },
            EngineEvent::TradeOpened(t) => format!(
                "TRADE OPENED, {} {} @ {:.2}",
                t.direction, t.size, t.entry_price
            ),
            EngineEvent::TradeClosed(t) => format!(
                "OPERATION PROFIT, GROSS {:.2}, NET {:.2}",
                t.gross_pnl, t.net_pnl
            ),
        }
    }
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", iso_datetime(self.timestamp()), self.message())
    }
}

fn iso_datetime(timestamp: i64) -> String {
    DateTime::from_timestamp_millis(timestamp)
        .map(|dt| dt.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Consumer of engine events.
pub trait EventSink {
    fn on_event(&mut self, event: &EngineEvent);
}

impl EventSink for Vec<EngineEvent> {
    fn on_event(&mut self, event: &EngineEvent) {
        self.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trading_core::error::OrderError;
    use trading_core::types::{Execution, OrderId, OrderIntent, OrderStatus, TradeDirection, TradeId};

    const TS: i64 = 1_705_312_800_000; // 2024-01-15T10:00:00

    fn order() -> Order {
        let mut order = Order::from_intent(OrderId(3), &OrderIntent::buy(dec!(1)), dec!(100.456), TS);
        order.accept();
        order
    }

    #[test]
    fn test_status_line() {
        let event = EngineEvent::Status {
            timestamp: TS,
            position: dec!(-1),
            close: 101.239,
        };
        assert_eq!(event.to_string(), "2024-01-15T10:00:00, Position: -1, Close: 101.24");
    }

    #[test]
    fn test_order_lines() {
        let created = EngineEvent::OrderCreated(order());
        assert_eq!(created.message(), "BUY CREATE, 100.46");

        let mut filled = order();
        filled.complete(Execution {
            price: dec!(100),
            size: dec!(1),
            value: dec!(100),
            commission: dec!(0.04),
            timestamp: TS,
        });
        assert_eq!(
            EngineEvent::OrderCompleted(filled).message(),
            "BUY EXECUTED, Price: 100.00, Cost: 100.00, Comm 0.04"
        );
    }

    #[test]
    fn test_refusal_line() {
        let mut refused = order();
        refused.refuse(
            OrderStatus::Margin,
            OrderError::InsufficientCash {
                required: dec!(100000),
                available: dec!(1),
            },
        );
        let event = EngineEvent::OrderRefused(refused);
        assert!(event.is_refusal());
        assert!(event.message().starts_with("Order Canceled/Margin/Rejected: #3 Margin"));
    }

    #[test]
    fn test_trade_close_line() {
        let mut trade = Trade::open(TradeId(1), TradeDirection::Long, dec!(1), dec!(100), dec!(0.04), 0);
        trade.close(dec!(110), dec!(10), dec!(0.044), TS);
        let event = EngineEvent::TradeClosed(trade);
        assert_eq!(event.timestamp(), TS);
        assert_eq!(event.message(), "OPERATION PROFIT, GROSS 10.00, NET 9.92");
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<EngineEvent> = Vec::new();
        sink.on_event(&EngineEvent::OrderCreated(order()));
        assert_eq!(sink.len(), 1);
    }
}
