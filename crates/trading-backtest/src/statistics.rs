//! Backtest statistics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use trading_core::types::{Order, Portfolio, Trade};

/// Backtest statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestStats {
    /// Starting portfolio value
    pub starting_value: Decimal,
    /// Final portfolio value
    pub final_value: Decimal,
    /// Total return percentage
    pub total_return_pct: Decimal,
    /// Maximum drawdown percentage
    pub max_drawdown_pct: Decimal,
    /// Number of bars read from the feed
    pub bars_processed: usize,
    /// Bars on which the strategy was evaluated (after warm-up)
    pub bars_evaluated: usize,
    /// Orders filled
    pub orders_completed: usize,
    /// Orders ending as Canceled, Margin or Rejected
    pub orders_refused: usize,
    /// Number of closed trades
    pub closed_trades: usize,
    /// Number of winning trades (net)
    pub winning_trades: usize,
    /// Number of losing trades (net)
    pub losing_trades: usize,
    /// Win rate percentage
    pub win_rate_pct: Decimal,
    /// Realized P&L of closed trades before commission
    pub gross_pnl: Decimal,
    /// Realized P&L of closed trades after commission
    pub net_pnl: Decimal,
    /// Commission paid on all fills
    pub total_commission: Decimal,
    /// Average profit per winning trade
    pub avg_win: Decimal,
    /// Average loss per losing trade
    pub avg_loss: Decimal,
    /// Profit factor (gross profit / gross loss)
    pub profit_factor: Decimal,
    /// Portfolio value after every bar
    pub equity_curve: Vec<(i64, Decimal)>,
    /// Peak value (for drawdown)
    peak_value: Decimal,
    total_profit: Decimal,
    total_loss: Decimal,
}

impl BacktestStats {
    /// Create new stats tracker.
    pub fn new(starting_value: Decimal) -> Self {
        Self {
            starting_value,
            final_value: starting_value,
            total_return_pct: Decimal::ZERO,
            max_drawdown_pct: Decimal::ZERO,
            bars_processed: 0,
            bars_evaluated: 0,
            orders_completed: 0,
            orders_refused: 0,
            closed_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate_pct: Decimal::ZERO,
            gross_pnl: Decimal::ZERO,
            net_pnl: Decimal::ZERO,
            total_commission: Decimal::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            equity_curve: Vec::new(),
            peak_value: starting_value,
            total_profit: Decimal::ZERO,
            total_loss: Decimal::ZERO,
        }
    }

    /// Record portfolio value at the end of a bar.
    pub fn record_equity(&mut self, timestamp: i64, value: Decimal) {
        self.equity_curve.push((timestamp, value));

        if value > self.peak_value {
            self.peak_value = value;
        }
        if self.peak_value > Decimal::ZERO {
            let drawdown = (self.peak_value - value) / self.peak_value * dec!(100);
            if drawdown > self.max_drawdown_pct {
                self.max_drawdown_pct = drawdown;
            }
        }

        self.bars_processed += 1;
    }

    /// Count an order that reached a terminal status.
    pub fn record_order(&mut self, order: &Order) {
        if order.is_completed() {
            self.orders_completed += 1;
        } else if order.status.is_failure() {
            self.orders_refused += 1;
        }
    }

    /// Add a closed trade.
    pub fn record_trade(&mut self, trade: &Trade) {
        self.closed_trades += 1;
        self.gross_pnl += trade.gross_pnl;
        self.net_pnl += trade.net_pnl;

        if trade.net_pnl > Decimal::ZERO {
            self.winning_trades += 1;
            self.total_profit += trade.net_pnl;
        } else if trade.net_pnl < Decimal::ZERO {
            self.losing_trades += 1;
            self.total_loss += trade.net_pnl.abs();
        }
    }

    /// Calculate final statistics.
    pub fn finalize(&mut self, portfolio: &Portfolio) {
        self.final_value = portfolio.value();
        self.total_commission = portfolio.total_commission;

        if self.starting_value > Decimal::ZERO {
            self.total_return_pct =
                (self.final_value - self.starting_value) / self.starting_value * dec!(100);
        }

        if self.closed_trades > 0 {
            self.win_rate_pct =
                Decimal::from(self.winning_trades * 100) / Decimal::from(self.closed_trades);
        }
        if self.winning_trades > 0 {
            self.avg_win = self.total_profit / Decimal::from(self.winning_trades);
        }
        if self.losing_trades > 0 {
            self.avg_loss = self.total_loss / Decimal::from(self.losing_trades);
        }
        if self.total_loss > Decimal::ZERO {
            self.profit_factor = self.total_profit / self.total_loss;
        }
    }
}
