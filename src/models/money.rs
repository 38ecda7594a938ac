use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Largest amount a single transaction may carry, in minor units. Keeps
/// every SQL `SUM` over stored amounts inside `i64`.
pub const MAX_CENTS: i64 = 10_000_000_000_000;

/// Convert an amount to integer minor units. Returns `None` when the amount
/// carries more than two fractional digits or does not fit in an `i64`.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    let normalized = amount.normalize();
    if normalized.scale() > 2 {
        return None;
    }
    normalized.checked_mul(Decimal::ONE_HUNDRED)?.to_i64()
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
