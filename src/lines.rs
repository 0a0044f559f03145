//! Line conversion between exchange threshold markets and sportsbook
//! handicap lines.
//!
//! The exchange quotes spreads and totals as thresholds the event must
//! strictly exceed ("wins by over 7", "total over 44"). Sportsbooks quote
//! half-point handicap lines with no push. A whole-number exchange
//! threshold excludes the exact value, so it aligns with the sportsbook
//! line half a point below; a threshold already on the half point is used
//! unchanged.
//!
//! The half-point offset is the convention observed for NFL lines. It is
//! configurable rather than hard-coded because push-permitting sports may
//! quote differently.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::Purchase;

/// Which threshold market a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMarket {
    Spread,
    Total,
}

/// Conversion offsets between exchange thresholds and sportsbook lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRules {
    pub spread_offset: Decimal,
    pub total_offset: Decimal,
}

impl Default for LineRules {
    fn default() -> Self {
        Self {
            spread_offset: dec!(0.5),
            total_offset: dec!(0.5),
        }
    }
}

impl LineRules {
    /// Sportsbook-convention line for an exchange threshold.
    ///
    /// Whole numbers shift down by the offset ("wins by over 7" ⇔ "-6.5",
    /// "total over 44" ⇔ "43.5"); half-point thresholds pass through.
    #[must_use]
    pub fn exchange_to_sportsbook(&self, value: Decimal, market: LineMarket) -> Decimal {
        if is_whole(value) {
            value - self.offset(market)
        } else {
            value
        }
    }

    /// Inverse mapping, for validating collected sportsbook lines against
    /// exchange thresholds.
    ///
    /// A half-point sportsbook line maps to the whole threshold above it
    /// (the canonical exchange quote); whole lines come back unchanged.
    #[must_use]
    pub fn sportsbook_to_exchange(&self, value: Decimal, market: LineMarket) -> Decimal {
        let shifted = value + self.offset(market);
        if is_whole(shifted) {
            shifted
        } else {
            value
        }
    }

    /// Signed sportsbook spread for one exchange spread contract.
    ///
    /// A "yes" purchase on the favored team's over-line is that team laying
    /// the points: a negative spread of converted magnitude. A "no"
    /// purchase is the other team taking the points: the positive spread.
    #[must_use]
    pub fn sportsbook_spread(&self, exchange_line: Decimal, purchase: Purchase) -> Decimal {
        let magnitude = self.exchange_to_sportsbook(exchange_line, LineMarket::Spread);
        match purchase {
            Purchase::Yes => -magnitude,
            Purchase::No => magnitude,
        }
    }

    fn offset(&self, market: LineMarket) -> Decimal {
        match market {
            LineMarket::Spread => self.spread_offset,
            LineMarket::Total => self.total_offset,
        }
    }
}

fn is_whole(value: Decimal) -> bool {
    value.fract().is_zero()
}
