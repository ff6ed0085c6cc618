//! Venue trait for callers that quote against any liquidity source

use crate::cp_math::CpMath;
use crate::error::PoolError;
use crate::pool::Pool;

/// Unified read-only quoting interface over a liquidity venue
///
/// Quotes never mutate state; the external transaction processor applies the
/// corresponding mutating operation once the caller commits.
pub trait LiquidityVenue {
    /// Quote the output of asset B for a given asset A input
    fn quote_amount_out(&self, amount_in: u64) -> Result<u64, PoolError>;

    /// Quote the asset A input required for a desired asset B output
    fn quote_amount_in(&self, amount_out: u64) -> Result<u64, PoolError>;

    /// Current reserve balances
    fn reserves(&self) -> (u64, u64);

    /// Outstanding share supply
    fn total_shares(&self) -> u64;
}

impl LiquidityVenue for Pool {
    fn quote_amount_out(&self, amount_in: u64) -> Result<u64, PoolError> {
        let (reserve_a, reserve_b) = Pool::reserves(self);
        CpMath::amount_out(amount_in, reserve_a, reserve_b)
    }

    fn quote_amount_in(&self, amount_out: u64) -> Result<u64, PoolError> {
        let (reserve_a, reserve_b) = Pool::reserves(self);
        CpMath::amount_in_for_exact_out(amount_out, reserve_a, reserve_b)
    }

    fn reserves(&self) -> (u64, u64) {
        Pool::reserves(self)
    }

    fn total_shares(&self) -> u64 {
        Pool::total_shares(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_matches_applied_swap() {
        let mut pool = Pool::new();
        pool.initialize(1000, 1000).unwrap();

        let venue: &dyn LiquidityVenue = &pool;
        let quoted = venue.quote_amount_out(100).unwrap();

        let applied = pool.swap_a_for_b(100).unwrap();
        assert_eq!(quoted, applied);
    }

    #[test]
    fn test_quote_amount_in_covers_output() {
        let mut pool = Pool::new();
        pool.initialize(5000, 5000).unwrap();

        let needed = pool.quote_amount_in(250).unwrap();
        let got = pool.swap_a_for_b(needed).unwrap();
        assert!(got >= 250);
    }
}
