//! Backtest report generation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trading_core::traits::StrategyState;
use trading_core::types::{Portfolio, Trade};

use crate::{BacktestConfig, BacktestStats};

/// Complete backtest report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Configuration used
    pub config: BacktestConfig,
    /// Strategy state at the end of the run
    pub strategy: StrategyState,
    /// Statistics
    pub stats: BacktestStats,
    /// Closed trades in closing order
    pub trades: Vec<Trade>,
    pub starting_value: Decimal,
    pub final_value: Decimal,
    /// Final portfolio state (an open position is left open)
    pub final_portfolio: Portfolio,
}

impl BacktestReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("STRATEGY\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Name:                {}\n", self.strategy.name));
        s.push_str(&format!(
            "  EMA Periods:         {} / {}\n",
            self.config.strategy.fast_period, self.config.strategy.slow_period
        ));
        s.push_str(&format!(
            "  Unit / Flip Size:    {} / {}\n",
            self.config.strategy.unit_size, self.config.strategy.flip_size
        ));
        s.push_str(&format!(
            "  Commission Rate:     {}\n",
            self.config.commission_rate
        ));
        s.push('\n');

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Starting Value:      ${:.2}\n",
            self.starting_value
        ));
        s.push_str(&format!("  Final Value:         ${:.2}\n", self.final_value));
        s.push_str(&format!(
            "  Total Return:        {:.2}%\n",
            self.stats.total_return_pct
        ));
        s.push_str(&format!(
            "  Max Drawdown:        {:.2}%\n",
            self.stats.max_drawdown_pct
        ));
        s.push_str(&format!(
            "  Open Position:       {}\n",
            self.final_portfolio.position.quantity
        ));
        s.push('\n');

        s.push_str("TRADE STATISTICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Closed Trades:       {}\n",
            self.stats.closed_trades
        ));
        s.push_str(&format!(
            "  Winning Trades:      {}\n",
            self.stats.winning_trades
        ));
        s.push_str(&format!(
            "  Losing Trades:       {}\n",
            self.stats.losing_trades
        ));
        s.push_str(&format!(
            "  Win Rate:            {:.2}%\n",
            self.stats.win_rate_pct
        ));
        s.push_str(&format!("  Gross P&L:           ${:.2}\n", self.stats.gross_pnl));
        s.push_str(&format!("  Net P&L:             ${:.2}\n", self.stats.net_pnl));
        s.push_str(&format!("  Avg Win:             ${:.2}\n", self.stats.avg_win));
        s.push_str(&format!("  Avg Loss:            ${:.2}\n", self.stats.avg_loss));
        s.push_str(&format!(
            "  Profit Factor:       {:.2}\n",
            self.stats.profit_factor
        ));
        s.push('\n');

        s.push_str("EXECUTION\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Bars Processed:      {}\n",
            self.stats.bars_processed
        ));
        s.push_str(&format!(
            "  Bars Evaluated:      {}\n",
            self.stats.bars_evaluated
        ));
        s.push_str(&format!(
            "  Orders Completed:    {}\n",
            self.stats.orders_completed
        ));
        s.push_str(&format!(
            "  Orders Refused:      {}\n",
            self.stats.orders_refused
        ));
        s.push_str(&format!(
            "  Total Commission:    ${:.2}\n",
            self.stats.total_commission
        ));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV (equity curve only).
    pub fn equity_to_csv(&self) -> String {
        let mut csv = String::from("timestamp,equity\n");
        for (ts, equity) in &self.stats.equity_curve {
            csv.push_str(&format!("{},{}\n", ts, equity));
        }
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn report() -> BacktestReport {
        let mut stats = BacktestStats::new(dec!(100000));
        stats.record_equity(0, dec!(100000));
        stats.record_equity(86_400_000, dec!(110000));
        stats.finalize(&{
            let mut p = Portfolio::new(dec!(100000));
            p.cash = dec!(110000);
            p
        });

        BacktestReport {
            config: BacktestConfig::default(),
            strategy: StrategyState {
                name: "EMA Trend".to_string(),
                ..Default::default()
            },
            starting_value: stats.starting_value,
            final_value: stats.final_value,
            stats,
            trades: Vec::new(),
            final_portfolio: Portfolio::new(dec!(110000)),
        }
    }

    #[test]
    fn test_report_summary() {
        let summary = report().summary();
        assert!(summary.contains("Total Return"));
        assert!(summary.contains("10.00%"));
        assert!(summary.contains("64 / 256"));
    }

    #[test]
    fn test_equity_csv() {
        let csv = report().equity_to_csv();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "timestamp,equity");
        assert_eq!(lines[2], "86400000,110000");
    }

    #[test]
    fn test_json_has_values() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["final_value"], "110000");
        assert_eq!(value["config"]["strategy"]["fast_period"], 64);
    }
}
