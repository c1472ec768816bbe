//! Smallest-unit amounts and their human-readable rendering.

use alloy_primitives::U256;

/// Decimal scale applied when rendering smallest-unit integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Market-denominated amounts (collateral, outcome shares): 6 decimals.
    Market,
    /// Contract-internal aggregate totals used by leaderboards: 18 decimals.
    Internal,
}

impl Scale {
    #[must_use]
    pub const fn decimals(self) -> u32 {
        match self {
            Self::Market => 6,
            Self::Internal => 18,
        }
    }

    /// Render `amount / 10^decimals` with two fractional digits, rounding half up.
    ///
    /// Exact for the full 256-bit range.
    ///
    /// ```
    /// use alloy_primitives::U256;
    /// use marketlens::domain::Scale;
    ///
    /// assert_eq!(Scale::Market.format(U256::from(1_234_567u64)), "1.23");
    /// assert_eq!(Scale::Market.format(U256::from(1_235_000u64)), "1.24");
    /// ```
    #[must_use]
    pub fn format(self, amount: U256) -> String {
        let divisor = U256::from(10u64).pow(U256::from(self.decimals() - 2));
        let (mut cents, remainder) = amount.div_rem(divisor);
        if remainder.saturating_mul(U256::from(2u64)) >= divisor {
            cents = cents.saturating_add(U256::from(1u64));
        }
        let hundred = U256::from(100u64);
        let (whole, frac) = cents.div_rem(hundred);
        format!("{whole}.{:0>2}", frac.to_string())
    }
}

/// Parse a rendered amount back to a float for ordering.
///
/// Leaderboards order by the rounded, rendered value rather than the raw
/// integer, so entries within one rounding bucket keep their original order.
#[must_use]
pub fn rendered_value(rendered: &str) -> f64 {
    rendered.parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_scale_renders_whole_tokens() {
        let five = U256::from(5_000_000_000_000_000_000u128);
        assert_eq!(Scale::Internal.format(five), "5.00");
    }

    #[test]
    fn market_scale_rounds_half_up() {
        assert_eq!(Scale::Market.format(U256::from(4_999u64)), "0.00");
        assert_eq!(Scale::Market.format(U256::from(5_000u64)), "0.01");
        assert_eq!(Scale::Market.format(U256::from(1_995_000u64)), "2.00");
    }

    #[test]
    fn zero_renders_as_zero() {
        assert_eq!(Scale::Market.format(U256::ZERO), "0.00");
        assert_eq!(Scale::Internal.format(U256::ZERO), "0.00");
    }

    #[test]
    fn values_beyond_f64_precision_stay_exact() {
        // 2^60 + 1 smallest units at 6 decimals.
        let amount = U256::from((1u64 << 60) + 1);
        assert_eq!(Scale::Market.format(amount), "1152921504606.85");
    }

    #[test]
    fn max_value_does_not_overflow() {
        let rendered = Scale::Internal.format(U256::MAX);
        let (whole, frac) = rendered.split_once('.').unwrap();
        assert_eq!(frac.len(), 2);
        assert_eq!(whole.len(), 60);
    }

    #[test]
    fn rendered_value_parses_back() {
        assert_eq!(rendered_value("12.50"), 12.5);
        assert_eq!(rendered_value("garbage"), 0.0);
    }
}
