//! Paper broker for backtesting.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;
use trading_core::error::OrderError;
use trading_core::traits::{Broker, ExecutionReport, TradeUpdate};
use trading_core::types::{
    Bar, Execution, FillLegs, Order, OrderId, OrderIntent, OrderStatus, Portfolio, Side, Trade,
    TradeDirection, TradeId,
};

/// 0.04% of traded value.
pub const DEFAULT_COMMISSION_RATE: Decimal = dec!(0.0004);

/// Paper broker that fills market orders at the bar close.
///
/// Owns the cash account, the single position and the currently open trade.
#[derive(Debug, Clone)]
pub struct PaperBroker {
    portfolio: Portfolio,
    commission_rate: Decimal,
    next_order_id: u64,
    next_trade_id: u64,
    open_trade: Option<Trade>,
}

impl PaperBroker {
    /// Create a new paper broker with starting cash.
    pub fn new(starting_cash: Decimal) -> Self {
        Self {
            portfolio: Portfolio::new(starting_cash),
            commission_rate: DEFAULT_COMMISSION_RATE,
            next_order_id: 1,
            next_trade_id: 1,
            open_trade: None,
        }
    }

    /// Set the commission as a fraction of traded value.
    pub fn with_commission(mut self, rate: Decimal) -> Self {
        self.commission_rate = rate;
        self
    }

    pub fn commission_rate(&self) -> Decimal {
        self.commission_rate
    }

    /// The trade tracking the current position, if any.
    pub fn open_trade(&self) -> Option<&Trade> {
        self.open_trade.as_ref()
    }

    fn price_of(bar: &Bar) -> Result<Decimal, OrderError> {
        match Decimal::try_from(bar.close) {
            Ok(price) if price > Decimal::ZERO => Ok(price),
            _ => Err(OrderError::InvalidPrice(bar.close)),
        }
    }

    /// Commission of one fill, split between its closing and opening legs.
    fn split_commission(commission: Decimal, size: Decimal, legs: &FillLegs) -> (Decimal, Decimal) {
        if size.is_zero() {
            return (Decimal::ZERO, Decimal::ZERO);
        }
        let closing = commission * (legs.closed / size);
        (closing, commission - closing)
    }

    fn update_trades(
        &mut self,
        legs: &FillLegs,
        price: Decimal,
        commission: Decimal,
        size: Decimal,
        timestamp: i64,
    ) -> Vec<TradeUpdate> {
        let mut updates = Vec::new();
        let (closing_commission, opening_commission) =
            Self::split_commission(commission, size, legs);
        let position = &self.portfolio.position;

        if legs.closed > Decimal::ZERO {
            if let Some(mut trade) = self.open_trade.take() {
                if position.is_flat() || legs.opened > Decimal::ZERO {
                    trade.close(price, legs.realized, closing_commission, timestamp);
                    updates.push(TradeUpdate::Closed(trade));
                } else {
                    trade.reduce(legs.realized, closing_commission);
                    self.open_trade = Some(trade);
                }
            }
        }

        if legs.opened > Decimal::ZERO {
            match self.open_trade.as_mut() {
                Some(trade) => trade.extend(
                    position.quantity.abs(),
                    position.avg_entry_price,
                    opening_commission,
                ),
                None => {
                    let direction = if position.is_long() {
                        TradeDirection::Long
                    } else {
                        TradeDirection::Short
                    };
                    let trade = Trade::open(
                        TradeId(self.next_trade_id),
                        direction,
                        legs.opened,
                        price,
                        opening_commission,
                        timestamp,
                    );
                    self.next_trade_id += 1;
                    self.open_trade = Some(trade.clone());
                    updates.push(TradeUpdate::Opened(trade));
                }
            }
        }

        updates
    }
}

impl Broker for PaperBroker {
    fn submit(&mut self, intent: &OrderIntent, bar: &Bar) -> Order {
        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;

        let created_price = Self::price_of(bar).unwrap_or_default();
        let mut order = Order::from_intent(id, intent, created_price, bar.timestamp);

        if intent.size <= Decimal::ZERO {
            order.refuse(OrderStatus::Rejected, OrderError::InvalidSize(intent.size));
        } else {
            order.accept();
        }
        debug!("Order {} {} {} -> {}", id, intent.side, intent.size, order.status);
        order
    }

    fn process(&mut self, mut order: Order, bar: &Bar) -> ExecutionReport {
        if !order.status.is_active() {
            return ExecutionReport {
                order,
                trades: Vec::new(),
            };
        }

        let price = match Self::price_of(bar) {
            Ok(price) => price,
            Err(e) => {
                order.refuse(OrderStatus::Rejected, e);
                return ExecutionReport {
                    order,
                    trades: Vec::new(),
                };
            }
        };

        let overflow = OrderError::Overflow {
            price,
            size: order.size,
        };
        let amounts = price.checked_mul(order.size).and_then(|value| {
            let commission = value.checked_mul(self.commission_rate)?;
            let cash_after = self.portfolio.cash_after(order.side, value, commission)?;
            Some((value, commission, cash_after))
        });
        let Some((value, commission, cash_after)) = amounts else {
            debug!("Order {} rejected: {} at {} overflows", order.id, order.size, price);
            order.refuse(OrderStatus::Rejected, overflow);
            return ExecutionReport {
                order,
                trades: Vec::new(),
            };
        };

        if cash_after < Decimal::ZERO {
            let available = self.portfolio.cash;
            order.refuse(
                OrderStatus::Margin,
                OrderError::InsufficientCash {
                    required: available - cash_after,
                    available,
                },
            );
            debug!("Order {} refused: cash {} short of {}", order.id, available, value);
            return ExecutionReport {
                order,
                trades: Vec::new(),
            };
        }

        let Some(legs) = self
            .portfolio
            .apply_fill(order.side, order.size, price, commission)
        else {
            order.refuse(OrderStatus::Rejected, overflow);
            return ExecutionReport {
                order,
                trades: Vec::new(),
            };
        };
        let trades = self.update_trades(&legs, price, commission, order.size, bar.timestamp);

        order.complete(Execution {
            price,
            size: order.size,
            value,
            commission,
            timestamp: bar.timestamp,
        });
        debug!(
            "Order {} filled at {}, position {}, cash {}",
            order.id, price, self.portfolio.position.quantity, self.portfolio.cash
        );

        ExecutionReport { order, trades }
    }

    fn mark(&mut self, bar: &Bar) {
        if let Ok(price) = Self::price_of(bar) {
            self.portfolio.update_price(price);
        }
    }

    fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    fn name(&self) -> &str {
        "Paper Broker"
    }
}
