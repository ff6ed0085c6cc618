//! Constant-product AMM math with exact integer calculations
//!
//! All formulas use u128 intermediates over u64 quantities so that products
//! of two reserves can never overflow, and floor division throughout. The
//! rounding bias always favors the pool: swap output rounds down, required
//! input rounds up, matching deposits round down.

use crate::error::PoolError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Pure constant-product formulas, stateless
pub struct CpMath;

impl CpMath {
    /// Calculate exact swap output using the x*y=k formula
    ///
    /// # Arguments
    /// * `amount_in` - Input asset amount (in asset units)
    /// * `reserve_in` - Input-side reserve before the swap
    /// * `reserve_out` - Output-side reserve before the swap
    ///
    /// # Returns
    /// Floor of `reserve_out - k / (reserve_in + amount_in)`; always strictly
    /// less than `reserve_out`, so a swap can never fully drain one side.
    pub fn amount_out(amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<u64, PoolError> {
        if amount_in == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(PoolError::NotInitialized);
        }

        let new_reserve_in = reserve_in
            .checked_add(amount_in)
            .ok_or(PoolError::ReserveOverflow)?;

        // k / new_reserve_in floors downward, so the pool keeps the rounding
        // remainder and the reserve product never rises above k.
        let k = reserve_in as u128 * reserve_out as u128;
        let new_reserve_out = k / new_reserve_in as u128;

        if new_reserve_out == 0 {
            return Err(PoolError::InvariantViolation);
        }

        Ok(reserve_out - new_reserve_out as u64)
    }

    /// Calculate required input amount for a desired output (reverse quote)
    ///
    /// Rounded up by one unit so the quoted input is always sufficient.
    pub fn amount_in_for_exact_out(
        amount_out: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> Result<u64, PoolError> {
        if amount_out == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(PoolError::NotInitialized);
        }
        if amount_out >= reserve_out {
            return Err(PoolError::InvariantViolation);
        }

        let numerator = reserve_in as u128 * amount_out as u128;
        let denominator = (reserve_out - amount_out) as u128;

        let amount_in = numerator / denominator + 1;
        u64::try_from(amount_in).map_err(|_| PoolError::ReserveOverflow)
    }

    /// Matching deposit of asset B required to preserve the reserve ratio
    pub fn matching_deposit(
        amount_a: u64,
        reserve_a: u64,
        reserve_b: u64,
    ) -> Result<u64, PoolError> {
        if reserve_a == 0 {
            return Err(PoolError::NotInitialized);
        }
        let amount_b = amount_a as u128 * reserve_b as u128 / reserve_a as u128;
        u64::try_from(amount_b).map_err(|_| PoolError::ReserveOverflow)
    }

    /// Shares minted for a deposit, proportional to existing supply
    pub fn shares_for_deposit(
        amount_a: u64,
        reserve_a: u64,
        total_shares: u64,
    ) -> Result<u64, PoolError> {
        if reserve_a == 0 {
            return Err(PoolError::NotInitialized);
        }
        let minted = amount_a as u128 * total_shares as u128 / reserve_a as u128;
        u64::try_from(minted).map_err(|_| PoolError::ReserveOverflow)
    }

    /// Bootstrap share supply: the sum of the two reserves
    ///
    /// The sum dominates both reserves, so at the seeded granularity a
    /// deposit-then-redeem round trip strands at most one unit per asset for
    /// any seed ratio. Swaps move reserves without minting, so the supply can
    /// later fall below a grown reserve and the per-asset round-trip dust
    /// loosens to `reserve / (total_shares - 1) + 1`.
    pub fn bootstrap_shares(reserve_a: u64, reserve_b: u64) -> Result<u64, PoolError> {
        reserve_a
            .checked_add(reserve_b)
            .ok_or(PoolError::ReserveOverflow)
    }

    /// Proportional redemption of one reserve for a share burn
    ///
    /// With `share_units <= total_shares` the floored result never exceeds
    /// the reserve, so the narrowing cast is lossless.
    pub fn redemption(reserve: u64, share_units: u64, total_shares: u64) -> Result<u64, PoolError> {
        if total_shares == 0 {
            return Err(PoolError::NotInitialized);
        }
        if share_units > total_shares {
            return Err(PoolError::InsufficientShares {
                requested: share_units,
                available: total_shares,
            });
        }
        Ok((reserve as u128 * share_units as u128 / total_shares as u128) as u64)
    }

    /// Spot price of asset A denominated in asset B
    pub fn spot_price(reserve_in: u64, reserve_out: u64) -> Result<Decimal, PoolError> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(PoolError::NotInitialized);
        }
        Ok(Decimal::from(reserve_out) / Decimal::from(reserve_in))
    }

    /// Price impact of a trade as a percentage of the pre-trade spot price
    pub fn price_impact(
        amount_in: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> Result<Decimal, PoolError> {
        let price_before = Self::spot_price(reserve_in, reserve_out)?;

        let amount_out = Self::amount_out(amount_in, reserve_in, reserve_out)?;
        let new_reserve_in = reserve_in + amount_in;
        let new_reserve_out = reserve_out - amount_out;
        let price_after = Decimal::from(new_reserve_out) / Decimal::from(new_reserve_in);

        Ok((price_before - price_after).abs() / price_before * dec!(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_out_floors_toward_pool() {
        // 1000:1000 reserves, 100 in: k=1_000_000, new_b = floor(1e6/1100) = 909
        let out = CpMath::amount_out(100, 1000, 1000).unwrap();
        assert_eq!(out, 91);
    }

    #[test]
    fn test_amount_out_never_drains_reserve() {
        // Largest input that still leaves one unit on the output side
        let out = CpMath::amount_out(999_000, 1000, 1000).unwrap();
        assert_eq!(out, 999);
        // Past that point the swap is rejected rather than draining the pool
        assert_eq!(
            CpMath::amount_out(999_001, 1000, 1000),
            Err(PoolError::InvariantViolation)
        );
    }

    #[test]
    fn test_amount_out_rejects_zero_input() {
        assert_eq!(CpMath::amount_out(0, 1000, 1000), Err(PoolError::ZeroAmount));
    }

    #[test]
    fn test_amount_out_rejects_empty_pool() {
        assert_eq!(
            CpMath::amount_out(100, 0, 0),
            Err(PoolError::NotInitialized)
        );
    }

    #[test]
    fn test_reverse_quote_is_sufficient() {
        // The quoted input must buy at least the requested output
        let amount_in = CpMath::amount_in_for_exact_out(91, 1000, 1000).unwrap();
        let actual_out = CpMath::amount_out(amount_in, 1000, 1000).unwrap();
        assert!(actual_out >= 91);
    }

    #[test]
    fn test_reverse_quote_rejects_full_drain() {
        assert_eq!(
            CpMath::amount_in_for_exact_out(1000, 1000, 1000),
            Err(PoolError::InvariantViolation)
        );
    }

    #[test]
    fn test_matching_deposit_preserves_ratio() {
        // floor(100 * 2000 / 500) = 400
        assert_eq!(CpMath::matching_deposit(100, 500, 2000).unwrap(), 400);
    }

    #[test]
    fn test_bootstrap_shares_sum_of_reserves() {
        assert_eq!(CpMath::bootstrap_shares(1000, 1000).unwrap(), 2000);
        assert_eq!(CpMath::bootstrap_shares(500, 2000).unwrap(), 2500);
        assert_eq!(
            CpMath::bootstrap_shares(u64::MAX, 1),
            Err(PoolError::ReserveOverflow)
        );
    }

    #[test]
    fn test_redemption_is_proportional() {
        assert_eq!(CpMath::redemption(1000, 250, 1000).unwrap(), 250);
        // floor(7 * 1 / 3) = 2
        assert_eq!(CpMath::redemption(7, 1, 3).unwrap(), 2);
    }

    #[test]
    fn test_redemption_validates_supply() {
        assert_eq!(
            CpMath::redemption(1000, 1001, 1000),
            Err(PoolError::InsufficientShares {
                requested: 1001,
                available: 1000
            })
        );
        assert_eq!(CpMath::redemption(1000, 0, 0), Err(PoolError::NotInitialized));
    }

    #[test]
    fn test_price_impact_grows_with_size() {
        let small = CpMath::price_impact(10, 100_000, 100_000).unwrap();
        let large = CpMath::price_impact(10_000, 100_000, 100_000).unwrap();
        assert!(small < large);
        assert!(large < dec!(100));
    }
}
