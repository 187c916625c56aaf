//! Money helpers
//!
//! All monetary arithmetic goes through rust_decimal; f64 only at the
//! model/storage edge. Amounts are rounded to 2 decimal places.

use crate::workflow::error::{WorkflowError, WorkflowResult};
use rust_decimal::prelude::*;

/// Decimal places for monetary values
const DECIMAL_PLACES: u32 = 2;

/// Fixed revenue split: the company keeps 70% of every recorded payment
const COMPANY_SHARE_PERCENT: i64 = 70;

/// Maximum accepted payment amount (₹1,000,000)
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Validate a payment amount before any Decimal arithmetic touches it.
///
/// Rejects NaN/infinity, non-positive values, and amounts above the cap,
/// so every amount that reaches `split_amount` survives the f64-to-Decimal
/// conversion intact.
pub fn validate_amount(amount: f64) -> WorkflowResult<()> {
    if !amount.is_finite() {
        return Err(WorkflowError::InvalidAmount(format!(
            "amount must be a finite number, got {}",
            amount
        )));
    }
    if amount <= 0.0 {
        return Err(WorkflowError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(WorkflowError::InvalidAmount(format!(
            "amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        )));
    }
    if Decimal::from_f64(amount).is_none() {
        return Err(WorkflowError::InvalidAmount(format!(
            "amount is not representable, got {}",
            amount
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for precise arithmetic
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Split a payment amount into (company_share, engineer_share).
///
/// company = round(amount * 0.70); engineer is the exact remainder, so
/// the two shares always sum back to the amount. Callers run
/// `validate_amount` first; amounts past that check convert losslessly.
pub fn split_amount(amount: f64) -> (f64, f64) {
    let amount = to_decimal(amount);
    let company = (amount * Decimal::new(COMPANY_SHARE_PERCENT, 2))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let engineer = amount - company;
    (to_f64(company), to_f64(engineer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_is_seventy_thirty() {
        let (company, engineer) = split_amount(1000.0);
        assert_eq!(company, 700.0);
        assert_eq!(engineer, 300.0);
    }

    #[test]
    fn split_sums_to_amount() {
        for amount in [0.01, 1.0, 99.99, 123.45, 1000.0, 38_500.0] {
            let (company, engineer) = split_amount(amount);
            assert_eq!(
                to_decimal(company) + to_decimal(engineer),
                to_decimal(amount),
                "split of {} must sum back",
                amount
            );
        }
    }

    #[test]
    fn split_rounds_midpoint_away_from_zero() {
        // 0.70 * 12.55 = 8.785 -> 8.79
        let (company, engineer) = split_amount(12.55);
        assert_eq!(company, 8.79);
        assert_eq!(engineer, 3.76);
    }

    #[test]
    fn validate_accepts_amounts_up_to_the_cap() {
        assert!(validate_amount(0.01).is_ok());
        assert!(validate_amount(999_999.99).is_ok());
        assert!(validate_amount(1_000_000.0).is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_and_non_positive() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -5.0] {
            assert!(
                matches!(validate_amount(bad), Err(WorkflowError::InvalidAmount(_))),
                "{} must be rejected",
                bad
            );
        }
    }

    #[test]
    fn validate_rejects_amounts_decimal_cannot_hold() {
        // 1e30 is beyond Decimal's range; without the cap it would
        // silently collapse to zero inside split_amount
        assert!(matches!(
            validate_amount(1e30),
            Err(WorkflowError::InvalidAmount(_))
        ));
    }
}
