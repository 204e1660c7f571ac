//! Backtesting engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trading_broker::{PaperBroker, DEFAULT_COMMISSION_RATE};
use trading_core::error::{ConfigError, StrategyError, TradingError};
use trading_core::traits::{BarFeed, Broker, Strategy, StrategyConfig, StrategyContext, TradeUpdate};
use trading_core::types::{Bar, OrderIntent, Trade};
use trading_indicators::IndicatorEngine;
use trading_strategies::{TrendConfig, TrendStrategy};

use crate::events::{EngineEvent, EventSink};
use crate::report::BacktestReport;
use crate::statistics::BacktestStats;

/// Backtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Starting cash
    pub starting_cash: Decimal,
    /// Commission as a fraction of traded value
    pub commission_rate: Decimal,
    /// Indicator periods and order sizes
    pub strategy: TrendConfig,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            starting_cash: dec!(100000),
            commission_rate: DEFAULT_COMMISSION_RATE,
            strategy: TrendConfig::default(),
        }
    }
}

impl BacktestConfig {
    /// Check cash, commission and strategy parameters before a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("backtest.starting_cash", self.starting_cash),
            ("backtest.commission_rate", self.commission_rate),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigError::Negative {
                    name,
                    value: value.to_string(),
                });
            }
        }
        self.strategy
            .validate()
            .map_err(|StrategyError::InvalidConfig(e)| e)
    }
}

/// Bar-by-bar engine: feed, indicators, strategy, broker.
///
/// Each component owns its state; the engine only moves values between
/// them. One call to [`step`](Self::step) runs the whole pipeline for one bar.
pub struct BacktestEngine<F, S, B> {
    config: BacktestConfig,
    feed: F,
    indicators: IndicatorEngine,
    strategy: S,
    broker: B,
    stats: BacktestStats,
    trades: Vec<Trade>,
}

impl<F: BarFeed> BacktestEngine<F, TrendStrategy, PaperBroker> {
    /// Engine wired with the trend strategy and a paper broker.
    pub fn trend(config: BacktestConfig, feed: F) -> Result<Self, TradingError> {
        let strategy = TrendStrategy::new(config.strategy.clone());
        let broker =
            PaperBroker::new(config.starting_cash).with_commission(config.commission_rate);
        Self::new(config, feed, strategy, broker)
    }
}

impl<F, S, B> BacktestEngine<F, S, B>
where
    F: BarFeed,
    S: Strategy,
    B: Broker,
{
    /// Create a new backtest engine. Fails on an invalid configuration.
    pub fn new(config: BacktestConfig, feed: F, strategy: S, broker: B) -> Result<Self, TradingError> {
        config.validate()?;
        let indicators = config.strategy.indicators()?;
        let stats = BacktestStats::new(broker.value());
        Ok(Self {
            config,
            feed,
            indicators,
            strategy,
            broker,
            stats,
            trades: Vec::new(),
        })
    }

    /// Process the next bar.
    ///
    /// Returns `Ok(None)` once the feed is exhausted, otherwise the events
    /// the bar produced in order.
    pub fn step(&mut self) -> Result<Option<Vec<EngineEvent>>, TradingError> {
        let Some(bar) = self.feed.next_bar()? else {
            return Ok(None);
        };

        self.indicators.update(bar.close);
        self.broker.mark(&bar);

        let mut events = Vec::new();
        if let Some(readings) = self.indicators.readings() {
            let position = self.broker.position_size();
            events.push(EngineEvent::Status {
                timestamp: bar.timestamp,
                position,
                close: bar.close,
            });

            let ctx = StrategyContext {
                bar: &bar,
                readings,
                position,
            };
            let intents = self.strategy.on_bar(&ctx);
            self.stats.bars_evaluated += 1;

            for intent in &intents {
                self.execute(intent, &bar, &mut events);
            }
        }

        self.stats.record_equity(bar.timestamp, self.broker.value());
        Ok(Some(events))
    }

    fn execute(
        &mut self,
        intent: &OrderIntent,
        bar: &Bar,
        events: &mut Vec<EngineEvent>,
    ) {
        let order = self.broker.submit(intent, bar);
        events.push(EngineEvent::OrderCreated(order.clone()));

        let report = self.broker.process(order, bar);
        let order = report.order;

        if order.is_completed() {
            events.push(EngineEvent::OrderCompleted(order.clone()));
        } else {
            events.push(EngineEvent::OrderRefused(order.clone()));
        }
        self.stats.record_order(&order);
        self.strategy.on_order(&order);

        for update in report.trades {
            match update {
                TradeUpdate::Closed(trade) => {
                    self.stats.record_trade(&trade);
                    self.trades.push(trade.clone());
                    events.push(EngineEvent::TradeClosed(trade));
                }
                TradeUpdate::Opened(trade) => events.push(EngineEvent::TradeOpened(trade)),
            }
        }
    }

    /// Run until the feed is exhausted, handing every event to `sink`.
    pub fn run(mut self, sink: &mut dyn EventSink) -> Result<BacktestReport, TradingError> {
        info!(
            "Running {} on {} (fast={}, slow={})",
            self.strategy.name(),
            self.feed.name(),
            self.config.strategy.fast_period,
            self.config.strategy.slow_period
        );

        while let Some(events) = self.step()? {
            for event in &events {
                sink.on_event(event);
            }
        }
        debug!("Feed {} exhausted", self.feed.name());

        Ok(self.finish())
    }

    fn finish(mut self) -> BacktestReport {
        let portfolio = self.broker.portfolio().clone();
        self.stats.finalize(&portfolio);

        info!(
            "Backtest complete: {} bars, {} trades, final value {:.2}",
            self.stats.bars_processed, self.stats.closed_trades, self.stats.final_value
        );

        BacktestReport {
            starting_value: self.stats.starting_value,
            final_value: self.stats.final_value,
            config: self.config,
            strategy: self.strategy.state(),
            stats: self.stats,
            trades: self.trades,
            final_portfolio: portfolio,
        }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    pub fn broker(&self) -> &B {
        &self.broker
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn indicators(&self) -> &IndicatorEngine {
        &self.indicators
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> &BacktestStats {
        &self.stats
    }
}
