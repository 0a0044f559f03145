//! Probability codec: conversions between American odds, exchange cents,
//! and probability, plus two-outcome vig removal.
//!
//! American odds are never averaged directly (the scale is nonlinear);
//! consensus math always goes through probability space and back.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::CodecError;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const HALF: Decimal = dec!(0.5);

/// Implied probability of signed American odds.
///
/// `+odds`: 100 / (odds + 100). `-odds`: |odds| / (|odds| + 100).
///
/// # Errors
///
/// Zero odds are undefined and return [`CodecError::InvalidOdds`].
pub fn american_to_probability(odds: i32) -> Result<Decimal, CodecError> {
    if odds == 0 {
        return Err(CodecError::InvalidOdds);
    }
    let magnitude = Decimal::from(odds.unsigned_abs());
    if odds > 0 {
        Ok(HUNDRED / (magnitude + HUNDRED))
    } else {
        Ok(magnitude / (magnitude + HUNDRED))
    }
}

/// Implied probability of an exchange contract price in cents.
///
/// # Errors
///
/// Cents outside `1..=99` return [`CodecError::InvalidPrice`].
pub fn cents_to_probability(cents: i64) -> Result<Decimal, CodecError> {
    if !(1..=99).contains(&cents) {
        return Err(CodecError::InvalidPrice { cents });
    }
    Ok(Decimal::from(cents) / HUNDRED)
}

/// Probability converted back to American odds.
///
/// Sign convention: probability ≥ 0.5 becomes negative (favorite) odds,
/// below 0.5 becomes positive (underdog) odds.
///
/// # Errors
///
/// Probabilities outside the open interval (0, 1) are rejected.
pub fn probability_to_american(prob: Decimal) -> Result<i32, CodecError> {
    validate_probability(prob)?;
    let odds = if prob >= HALF {
        -(prob / (Decimal::ONE - prob) * HUNDRED)
    } else {
        (Decimal::ONE - prob) / prob * HUNDRED
    };
    odds.round()
        .to_i32()
        .ok_or_else(|| CodecError::ProbabilityOutOfRange {
            value: prob.to_string(),
        })
}

/// Result of two-outcome vig removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VigFree {
    pub fair_a: Decimal,
    pub fair_b: Decimal,
    /// Overround: how far the raw probabilities summed past 1.
    pub vig: Decimal,
    /// True when the raw probabilities summed to 1 or less. A true
    /// arbitrage is theoretically possible, so the inputs are passed
    /// through unchanged rather than force-normalized.
    pub degenerate: bool,
}

/// Strip bookmaker overround from a two-outcome market.
///
/// For `prob_a + prob_b > 1`, each side is scaled by the total so the fair
/// probabilities sum to 1 and keep their ratio. A total of 1 or less is a
/// defined edge case, not an error: the raw values come back with zero vig
/// and the `degenerate` flag set.
///
/// # Errors
///
/// Either probability outside (0, 1) is rejected.
pub fn remove_vig(prob_a: Decimal, prob_b: Decimal) -> Result<VigFree, CodecError> {
    validate_probability(prob_a)?;
    validate_probability(prob_b)?;

    let total = prob_a + prob_b;
    if total > Decimal::ONE {
        Ok(VigFree {
            fair_a: prob_a / total,
            fair_b: prob_b / total,
            vig: total - Decimal::ONE,
            degenerate: false,
        })
    } else {
        Ok(VigFree {
            fair_a: prob_a,
            fair_b: prob_b,
            vig: Decimal::ZERO,
            degenerate: true,
        })
    }
}

/// Consensus American odds for one side quoted by several books.
///
/// Converts each quote to probability, takes the arithmetic mean, and
/// converts back with the usual sign convention.
///
/// # Errors
///
/// An empty list or any invalid odds in it is rejected.
pub fn average_american(odds_list: &[i32]) -> Result<i32, CodecError> {
    if odds_list.is_empty() {
        return Err(CodecError::EmptyOddsList);
    }
    let mut sum = Decimal::ZERO;
    for &odds in odds_list {
        sum += american_to_probability(odds)?;
    }
    let mean = sum / Decimal::from(odds_list.len() as u64);
    probability_to_american(mean)
}

fn validate_probability(prob: Decimal) -> Result<(), CodecError> {
    if prob <= Decimal::ZERO || prob >= Decimal::ONE {
        return Err(CodecError::ProbabilityOutOfRange {
            value: prob.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn positive_odds_probability() {
        assert_eq!(american_to_probability(150).unwrap(), dec!(0.4));
        assert_eq!(american_to_probability(100).unwrap(), dec!(0.5));
    }

    #[test]
    fn negative_odds_probability() {
        // -110 -> 110 / 210
        let prob = american_to_probability(-110).unwrap();
        assert!((prob - dec!(0.5238)).abs() < dec!(0.0001));
        assert_eq!(american_to_probability(-100).unwrap(), dec!(0.5));
    }

    #[test]
    fn zero_odds_rejected() {
        assert_eq!(american_to_probability(0), Err(CodecError::InvalidOdds));
    }

    #[test]
    fn cents_conversion_and_bounds() {
        assert_eq!(cents_to_probability(48).unwrap(), dec!(0.48));
        assert_eq!(cents_to_probability(1).unwrap(), dec!(0.01));
        assert_eq!(cents_to_probability(99).unwrap(), dec!(0.99));
        assert!(cents_to_probability(0).is_err());
        assert!(cents_to_probability(100).is_err());
        assert!(cents_to_probability(-5).is_err());
    }

    #[test]
    fn odds_round_trip_within_one() {
        for odds in [-250, -150, -110, -105, 105, 110, 150, 250, 400] {
            let prob = american_to_probability(odds).unwrap();
            let back = probability_to_american(prob).unwrap();
            assert!(
                (back - odds).abs() <= 1,
                "round trip {odds} -> {prob} -> {back}"
            );
        }
    }

    #[test]
    fn vig_removal_sums_to_one_and_preserves_ratio() {
        let a = american_to_probability(-110).unwrap();
        let b = american_to_probability(-110).unwrap();
        let fair = remove_vig(a, b).unwrap();

        assert!((fair.fair_a + fair.fair_b - Decimal::ONE).abs() < dec!(0.0000001));
        assert_eq!(fair.fair_a, fair.fair_b);
        assert_eq!(fair.fair_a, dec!(0.5));
        assert!(fair.vig > dec!(0.045) && fair.vig < dec!(0.048));
        assert!(!fair.degenerate);
    }

    #[test]
    fn vig_removal_uneven_market_keeps_ratio() {
        let a = dec!(0.60);
        let b = dec!(0.45);
        let fair = remove_vig(a, b).unwrap();

        assert!((fair.fair_a + fair.fair_b - Decimal::ONE).abs() < dec!(0.0000001));
        // fair_a / fair_b == a / b
        assert_eq!(fair.fair_a / fair.fair_b, a / b);
        assert_eq!(fair.vig, dec!(0.05));
    }

    #[test]
    fn degenerate_market_passes_through() {
        let fair = remove_vig(dec!(0.45), dec!(0.50)).unwrap();
        assert_eq!(fair.fair_a, dec!(0.45));
        assert_eq!(fair.fair_b, dec!(0.50));
        assert_eq!(fair.vig, Decimal::ZERO);
        assert!(fair.degenerate);
    }

    #[test]
    fn probability_bounds_rejected() {
        assert!(remove_vig(dec!(0), dec!(0.5)).is_err());
        assert!(remove_vig(dec!(0.5), dec!(1)).is_err());
        assert!(probability_to_american(dec!(0)).is_err());
    }

    #[test]
    fn average_of_identical_odds_is_identity() {
        assert_eq!(average_american(&[-110, -110, -110]).unwrap(), -110);
    }

    #[test]
    fn average_goes_through_probability_space() {
        // Mean of probabilities for -200 (0.6667) and +200 (0.3333) is 0.5,
        // which maps to -100. A naive mean of the odds would be 0.
        assert_eq!(average_american(&[-200, 200]).unwrap(), -100);
    }

    #[test]
    fn average_rejects_empty_list() {
        assert_eq!(average_american(&[]), Err(CodecError::EmptyOddsList));
    }
}
