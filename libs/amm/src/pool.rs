//! Stateful constant-product pool record
//!
//! A `Pool` holds the two reserve balances and the aggregate share supply for
//! one trading pair. Every mutating operation is validate-then-apply: all new
//! values are computed and checked before any field is written, so a failed
//! call leaves the record untouched. Callers are expected to serialize access
//! (e.g. a ledger's sequential transaction processor); the record itself has
//! no interior locking.
//!
//! Per-account share bookkeeping is deliberately external. The pool validates
//! redemptions against the aggregate supply only; an external ledger keyed by
//! account maps owners to share units.

use crate::cp_math::CpMath;
use crate::error::PoolError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reserve balances and share supply for a two-asset trading pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
}

impl Pool {
    /// Create an uninitialized pool (all balances zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed both reserves and mint the bootstrap share supply
    ///
    /// The bootstrap supply is `seed_a + seed_b`. The sum dominates both
    /// reserves, so deposit/redeem round trips at the seeded granularity lose
    /// at most one unit per asset to floor rounding regardless of the seed
    /// ratio. Swaps move reserves without minting; once a reserve has grown
    /// past the share supply the per-asset round-trip dust loosens to
    /// `reserve / (total_shares - 1) + 1`. Returns the minted shares.
    pub fn initialize(&mut self, seed_a: u64, seed_b: u64) -> Result<u64, PoolError> {
        if self.reserve_a != 0 || self.reserve_b != 0 {
            return Err(PoolError::AlreadyInitialized);
        }
        if seed_a == 0 || seed_b == 0 {
            return Err(PoolError::InsufficientSeed { seed_a, seed_b });
        }

        let minted = CpMath::bootstrap_shares(seed_a, seed_b)?;

        self.reserve_a = seed_a;
        self.reserve_b = seed_b;
        self.total_shares = minted;

        debug!(seed_a, seed_b, minted, "pool initialized");
        Ok(minted)
    }

    /// Swap an amount of asset A for asset B, returning the B output
    ///
    /// The output floors downward, so the post-swap reserve product never
    /// rises above the pre-swap product. The output is always strictly less
    /// than `reserve_b`; a swap that would drain the B side entirely fails
    /// with `InvariantViolation` and leaves the pool unchanged.
    pub fn swap_a_for_b(&mut self, amount_in: u64) -> Result<u64, PoolError> {
        let amount_out = CpMath::amount_out(amount_in, self.reserve_a, self.reserve_b)?;

        self.reserve_a += amount_in;
        self.reserve_b -= amount_out;

        debug!(
            amount_in,
            amount_out,
            reserve_a = self.reserve_a,
            reserve_b = self.reserve_b,
            "swap a->b applied"
        );
        Ok(amount_out)
    }

    /// Swap an amount of asset B for asset A, returning the A output
    pub fn swap_b_for_a(&mut self, amount_in: u64) -> Result<u64, PoolError> {
        let amount_out = CpMath::amount_out(amount_in, self.reserve_b, self.reserve_a)?;

        self.reserve_b += amount_in;
        self.reserve_a -= amount_out;

        debug!(
            amount_in,
            amount_out,
            reserve_a = self.reserve_a,
            reserve_b = self.reserve_b,
            "swap b->a applied"
        );
        Ok(amount_out)
    }

    /// Deposit asset A plus the ratio-preserving amount of asset B
    ///
    /// Returns `(amount_b, minted_shares)`: the matching B deposit computed
    /// as `amount_a * reserve_b / reserve_a` (floor), and the shares minted
    /// in proportion to the existing supply. A deposit must mint at least one
    /// whole share; below the current granularity (`amount_a * total_shares <
    /// reserve_a`) it fails with `DepositTooSmall` so a contribution can
    /// never be silently donated to the pool. The share supply is positive
    /// whenever the reserves are (initialization mints, and only a full burn
    /// zeroes the supply, draining both reserves with it).
    pub fn add_liquidity(&mut self, amount_a: u64) -> Result<(u64, u64), PoolError> {
        if amount_a == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if self.reserve_a == 0 || self.reserve_b == 0 {
            return Err(PoolError::NotInitialized);
        }

        let amount_b = CpMath::matching_deposit(amount_a, self.reserve_a, self.reserve_b)?;

        let new_reserve_a = self
            .reserve_a
            .checked_add(amount_a)
            .ok_or(PoolError::ReserveOverflow)?;
        let new_reserve_b = self
            .reserve_b
            .checked_add(amount_b)
            .ok_or(PoolError::ReserveOverflow)?;

        let minted = CpMath::shares_for_deposit(amount_a, self.reserve_a, self.total_shares)?;
        if minted == 0 {
            return Err(PoolError::DepositTooSmall);
        }
        let new_total = self
            .total_shares
            .checked_add(minted)
            .ok_or(PoolError::ReserveOverflow)?;

        self.reserve_a = new_reserve_a;
        self.reserve_b = new_reserve_b;
        self.total_shares = new_total;

        debug!(
            amount_a,
            amount_b,
            minted,
            total_shares = self.total_shares,
            "liquidity added"
        );
        Ok((amount_b, minted))
    }

    /// Burn share units and pay out the proportional slice of both reserves
    ///
    /// Entitlement is `share_units / total_shares` of the *current* reserves,
    /// floored per asset. Burning the entire supply drains the pool exactly
    /// and returns it to the uninitialized state.
    pub fn remove_liquidity(&mut self, share_units: u64) -> Result<(u64, u64), PoolError> {
        if share_units == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if self.reserve_a == 0 || self.reserve_b == 0 {
            return Err(PoolError::NotInitialized);
        }
        if share_units > self.total_shares {
            return Err(PoolError::InsufficientShares {
                requested: share_units,
                available: self.total_shares,
            });
        }

        let out_a = CpMath::redemption(self.reserve_a, share_units, self.total_shares)?;
        let out_b = CpMath::redemption(self.reserve_b, share_units, self.total_shares)?;

        self.reserve_a -= out_a;
        self.reserve_b -= out_b;
        self.total_shares -= share_units;

        debug!(
            share_units,
            out_a,
            out_b,
            total_shares = self.total_shares,
            "liquidity removed"
        );
        Ok((out_a, out_b))
    }

    /// The constant product `reserve_a * reserve_b`, always derived fresh
    pub fn invariant(&self) -> u128 {
        self.reserve_a as u128 * self.reserve_b as u128
    }

    /// Current reserve balances as `(reserve_a, reserve_b)`
    pub fn reserves(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    /// Outstanding share supply
    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    /// Whether the pool has been seeded
    pub fn is_initialized(&self) -> bool {
        self.reserve_a != 0 && self.reserve_b != 0
    }

    /// Spot price of asset A denominated in asset B
    pub fn spot_price(&self) -> Result<Decimal, PoolError> {
        CpMath::spot_price(self.reserve_a, self.reserve_b)
    }

    /// Price impact of an A-for-B trade as a percentage
    pub fn price_impact(&self, amount_in: u64) -> Result<Decimal, PoolError> {
        CpMath::price_impact(amount_in, self.reserve_a, self.reserve_b)
    }
}
