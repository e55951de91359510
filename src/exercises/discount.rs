use num_traits::ToPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DiscountError {
    #[error("Discount must be between 0 and 100 (got {0})")]
    OutOfRange(f64),
    #[error("{0} has no floating-point value")]
    NotANumber(&'static str),
}

/// Price after taking `discount` percent off.
///
/// Accepts any primitive numeric type (including `i64`, `u64`, `usize`); discounts outside
/// `0..=100` (or NaN) are rejected before any arithmetic happens.
pub fn calculate_discount(
    price: impl ToPrimitive,
    discount: impl ToPrimitive,
) -> Result<f64, DiscountError> {
    let price = price.to_f64().ok_or(DiscountError::NotANumber("price"))?;
    let discount = discount
        .to_f64()
        .ok_or(DiscountError::NotANumber("discount"))?;
    if !(0.0..=100.0).contains(&discount) {
        return Err(DiscountError::OutOfRange(discount));
    }
    Ok(price - price * discount / 100.0)
}
