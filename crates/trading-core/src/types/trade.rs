//! Round-trip trades: from flat to flat.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential trade identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TradeId(pub u64);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Direction of the position a trade tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Long,
    Short,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Long => write!(f, "LONG"),
            TradeDirection::Short => write!(f, "SHORT"),
        }
    }
}

/// One position lifetime. Opened when the position leaves flat, closed when
/// it returns to flat (or flips through it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub direction: TradeDirection,
    /// Largest absolute size held during the trade
    pub size: Decimal,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    /// Unix milliseconds
    pub open_timestamp: i64,
    /// Unix milliseconds, set on close
    pub close_timestamp: Option<i64>,
    /// Realized P&L before commission
    pub gross_pnl: Decimal,
    /// Opening and closing commission charged to this trade
    pub commission: Decimal,
    /// gross_pnl - commission
    pub net_pnl: Decimal,
    pub closed: bool,
}

impl Trade {
    /// Open a trade with its first fill.
    pub fn open(
        id: TradeId,
        direction: TradeDirection,
        size: Decimal,
        price: Decimal,
        commission: Decimal,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            direction,
            size,
            entry_price: price,
            exit_price: None,
            open_timestamp: timestamp,
            close_timestamp: None,
            gross_pnl: Decimal::ZERO,
            commission,
            net_pnl: -commission,
            closed: false,
        }
    }

    /// Record a fill that added to the open side.
    pub fn extend(&mut self, total_size: Decimal, avg_price: Decimal, commission: Decimal) {
        self.size = self.size.max(total_size);
        self.entry_price = avg_price;
        self.charge(Decimal::ZERO, commission);
    }

    /// Record a fill that reduced the position without closing it.
    pub fn reduce(&mut self, realized: Decimal, commission: Decimal) {
        self.charge(realized, commission);
    }

    /// Record the fill that brought the position back to flat.
    pub fn close(&mut self, price: Decimal, realized: Decimal, commission: Decimal, timestamp: i64) {
        self.charge(realized, commission);
        self.exit_price = Some(price);
        self.close_timestamp = Some(timestamp);
        self.closed = true;
    }

    /// Time the trade was open, in milliseconds. `None` while open.
    pub fn duration_ms(&self) -> Option<i64> {
        self.close_timestamp.map(|close| close - self.open_timestamp)
    }

    pub fn is_winner(&self) -> bool {
        self.net_pnl > Decimal::ZERO
    }

    fn charge(&mut self, realized: Decimal, commission: Decimal) {
        self.gross_pnl += realized;
        self.commission += commission;
        self.net_pnl = self.gross_pnl - self.commission;
    }
}
