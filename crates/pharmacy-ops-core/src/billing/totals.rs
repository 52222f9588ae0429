//! Cart totals in decimal arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CartItem, Totals};

use super::cart::Cart;

/// GST applied to every sale (18%).
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Subtotal, tax and total of a cart.
pub fn compute_totals(cart: &Cart) -> Totals {
    totals_for(cart.items())
}

/// Totals for a set of lines. Tax is rounded to cents, half away from zero.
pub fn totals_for(items: &[CartItem]) -> Totals {
    let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
    let tax = (subtotal * TAX_RATE).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}
