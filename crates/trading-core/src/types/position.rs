//! Position and portfolio types.

use num_traits::Signed;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Side;

/// How a fill split against the existing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FillLegs {
    /// Quantity that reduced the existing position (unsigned)
    pub closed: Decimal,
    /// Quantity that opened or extended a position (unsigned)
    pub opened: Decimal,
    /// Gross P&L realized by the closing leg
    pub realized: Decimal,
}

impl FillLegs {
    /// True when the fill went through zero.
    pub fn is_flip(&self) -> bool {
        self.closed > Decimal::ZERO && self.opened > Decimal::ZERO
    }
}

/// The single open position of the simulated account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Number of units (positive for long, negative for short)
    pub quantity: Decimal,
    /// Average entry price of the currently open side
    pub avg_entry_price: Decimal,
    /// Last mark price
    pub current_price: Decimal,
    /// Unrealized profit/loss at the mark price
    pub unrealized_pnl: Decimal,
    /// Realized profit/loss from closed portions
    pub realized_pnl: Decimal,
}

impl Position {
    /// Create a new position.
    pub fn new(quantity: Decimal, avg_entry_price: Decimal) -> Self {
        Self {
            quantity,
            avg_entry_price,
            current_price: avg_entry_price,
            ..Default::default()
        }
    }

    /// Check if this is a long position.
    pub fn is_long(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// Check if this is a short position.
    pub fn is_short(&self) -> bool {
        self.quantity < Decimal::ZERO
    }

    /// Check if the position is flat (no units).
    pub fn is_flat(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Market value at the mark price (negative when short).
    pub fn market_value(&self) -> Decimal {
        self.quantity.saturating_mul(self.current_price)
    }

    /// Update the mark price and recalculate unrealized P&L.
    pub fn update_price(&mut self, price: Decimal) {
        self.current_price = price;
        self.unrealized_pnl = self
            .quantity
            .saturating_mul(price.saturating_sub(self.avg_entry_price));
    }

    /// Apply a fill to the position.
    ///
    /// A fill crossing zero is split into a closing leg, which realizes P&L
    /// against the old average price, and an opening leg, which seeds the
    /// average price of the new side.
    pub fn apply_fill(&mut self, side: Side, quantity: Decimal, price: Decimal) -> FillLegs {
        let fill_qty = side.sign() * quantity;

        let same_direction = (self.is_long() && fill_qty > Decimal::ZERO)
            || (self.is_short() && fill_qty < Decimal::ZERO);

        let legs = if same_direction || self.is_flat() {
            let total_cost = self.quantity * self.avg_entry_price + fill_qty * price;
            let new_quantity = self.quantity + fill_qty;

            if !new_quantity.is_zero() {
                self.avg_entry_price = total_cost / new_quantity;
            }
            self.quantity = new_quantity;

            FillLegs {
                closed: Decimal::ZERO,
                opened: quantity,
                realized: Decimal::ZERO,
            }
        } else {
            let close_qty = fill_qty.abs().min(self.quantity.abs());
            let realized = if self.is_long() {
                close_qty * (price - self.avg_entry_price)
            } else {
                close_qty * (self.avg_entry_price - price)
            };
            self.realized_pnl += realized;

            let remaining = fill_qty.abs() - close_qty;
            if remaining > Decimal::ZERO {
                self.quantity = fill_qty.signum() * remaining;
                self.avg_entry_price = price;
            } else {
                self.quantity += fill_qty;
                if self.is_flat() {
                    self.avg_entry_price = Decimal::ZERO;
                }
            }

            FillLegs {
                closed: close_qty,
                opened: remaining,
                realized,
            }
        };

        self.update_price(price);
        legs
    }
}

/// Cash account plus the open position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Available cash
    pub cash: Decimal,
    /// The open position (flat when quantity is zero)
    pub position: Position,
    /// Realized P&L accumulated over the run (gross of commission)
    pub total_realized_pnl: Decimal,
    /// Commission paid over the run
    pub total_commission: Decimal,
    /// Initial capital (for calculating returns)
    pub initial_capital: Decimal,
    /// Highest value reached (for drawdown calculation)
    pub peak_value: Decimal,
}

impl Portfolio {
    /// Create a new portfolio with initial cash.
    pub fn new(initial_capital: Decimal) -> Self {
        Self {
            cash: initial_capital,
            initial_capital,
            peak_value: initial_capital,
            ..Default::default()
        }
    }

    /// Cash after a hypothetical fill, without applying it.
    ///
    /// `None` when the amounts overflow.
    pub fn cash_after(&self, side: Side, value: Decimal, commission: Decimal) -> Option<Decimal> {
        let gross = match side {
            Side::Buy => self.cash.checked_sub(value)?,
            Side::Sell => self.cash.checked_add(value)?,
        };
        gross.checked_sub(commission)
    }

    /// Apply an executed fill to cash and position.
    ///
    /// Returns `None`, leaving the portfolio untouched, when the fill
    /// amounts overflow.
    pub fn apply_fill(
        &mut self,
        side: Side,
        quantity: Decimal,
        price: Decimal,
        commission: Decimal,
    ) -> Option<FillLegs> {
        let value = price.checked_mul(quantity)?;
        let cash = self.cash_after(side, value, commission)?;
        let total_commission = self.total_commission.checked_add(commission)?;
        self.cash = cash;
        self.total_commission = total_commission;

        let legs = self.position.apply_fill(side, quantity, price);
        self.total_realized_pnl += legs.realized;
        self.update_peak();
        Some(legs)
    }

    /// Mark the position to a new price.
    pub fn update_price(&mut self, price: Decimal) {
        self.position.update_price(price);
        self.update_peak();
    }

    /// Total value: cash plus the marked position.
    pub fn value(&self) -> Decimal {
        self.cash.saturating_add(self.position.market_value())
    }

    /// Calculate current drawdown from peak, in percent.
    pub fn drawdown(&self) -> Decimal {
        if self.peak_value.is_zero() {
            return Decimal::ZERO;
        }
        (self.peak_value - self.value()) / self.peak_value * Decimal::ONE_HUNDRED
    }

    /// Calculate total return percentage.
    pub fn total_return(&self) -> Decimal {
        if self.initial_capital.is_zero() {
            return Decimal::ZERO;
        }
        (self.value() - self.initial_capital) / self.initial_capital * Decimal::ONE_HUNDRED
    }

    fn update_peak(&mut self) {
        let value = self.value();
        if value > self.peak_value {
            self.peak_value = value;
        }
    }
}
