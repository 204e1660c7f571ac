//! Renders engine events as log records.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use trading_backtest::{EngineEvent, EventSink};

/// Event sink that writes one log record per event.
///
/// Refused orders are logged at warn level so none go unnoticed.
#[derive(Debug, Default)]
pub struct LogJournal {
    quiet_status: bool,
    records: usize,
    refusals: usize,
    realized: Decimal,
}

impl LogJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log per-bar status lines at debug instead of info.
    pub fn quiet_status(mut self, quiet: bool) -> Self {
        self.quiet_status = quiet;
        self
    }

    /// Records written so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Refused orders seen so far.
    pub fn refusals(&self) -> usize {
        self.refusals
    }

    /// Net P&L of the trades closed so far.
    pub fn realized(&self) -> Decimal {
        self.realized
    }
}

impl EventSink for LogJournal {
    fn on_event(&mut self, event: &EngineEvent) {
        self.records += 1;

        match event {
            EngineEvent::Status { .. } if self.quiet_status => debug!("{}", event),
            EngineEvent::OrderRefused(_) => {
                self.refusals += 1;
                warn!("{}", event);
            }
            EngineEvent::TradeOpened(_) => debug!("{}", event),
            EngineEvent::TradeClosed(trade) => {
                self.realized += trade.net_pnl;
                info!("{}", event);
            }
            _ => info!("{}", event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trading_core::error::OrderError;
    use trading_core::types::{
        Order, OrderId, OrderIntent, OrderStatus, Trade, TradeDirection, TradeId,
    };

    #[test]
    fn test_counts_records_and_refusals() {
        let mut journal = LogJournal::new().quiet_status(true);

        journal.on_event(&EngineEvent::Status {
            timestamp: 0,
            position: Decimal::ZERO,
            close: 100.0,
        });

        let mut order = Order::from_intent(OrderId(1), &OrderIntent::buy(dec!(1)), dec!(100000), 0);
        order.refuse(
            OrderStatus::Margin,
            OrderError::InsufficientCash {
                required: dec!(100000),
                available: dec!(1),
            },
        );
        journal.on_event(&EngineEvent::OrderRefused(order));

        assert_eq!(journal.records(), 2);
        assert_eq!(journal.refusals(), 1);
    }

    #[test]
    fn test_sums_closed_trades() {
        let mut journal = LogJournal::new();
        let mut trade = Trade::open(TradeId(1), TradeDirection::Short, dec!(1), dec!(100), dec!(1), 0);
        trade.close(dec!(90), dec!(10), dec!(1), 10);

        journal.on_event(&EngineEvent::TradeOpened(trade.clone()));
        journal.on_event(&EngineEvent::TradeClosed(trade));
        assert_eq!(journal.realized(), dec!(8));
    }
}
