use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits carried by a monetary value.
pub const CENT_PLACES: u32 = 2;

/// The whole of a partnership, in percent.
pub const FULL_SHARE: Decimal = Decimal::ONE_HUNDRED;

/// Rounds `value` to whole cents, half-to-even.  The result always carries exactly two
/// fractional digits, so `1000` becomes `1000.00`.
pub fn round_cents(value: Decimal) -> Decimal {
    let mut cents = value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointNearestEven);
    cents.rescale(CENT_PLACES);
    cents
}

/// `percentage` percent of `value`, rounded to whole cents.  `None` on overflow.
pub fn percent_of(percentage: Decimal, value: Decimal) -> Option<Decimal> {
    percentage
        .checked_div(FULL_SHARE)?
        .checked_mul(value)
        .map(round_cents)
}
