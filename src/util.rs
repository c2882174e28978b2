/// Round a monetary amount to 2 decimal places, half away from zero.
///
/// Every fee component is rounded once with this before totals are summed;
/// totals are re-rounded after arithmetic.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
