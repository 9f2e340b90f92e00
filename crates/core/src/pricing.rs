//! Exact monetary arithmetic for order lines.
//!
//! All amounts are [`rust_decimal::Decimal`], matching the `NUMERIC(12,2)`
//! columns in the database. Order totals must equal the sum of their line
//! totals exactly; float arithmetic is never used for money.

use rust_decimal::Decimal;

/// Total for a single order line: `unit_price * quantity`.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of line totals for an order.
pub fn order_total<I>(line_totals: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    line_totals.into_iter().sum()
}
