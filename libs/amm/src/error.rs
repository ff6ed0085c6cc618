//! Error types for constant-product pool calculations
//!
//! All variants are local, synchronous validation failures: the caller must
//! correct the input and resubmit. None are transient, and no operation
//! mutates pool state on a failure path (validate-then-apply).

use thiserror::Error;

/// Errors that can occur during pool calculations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Operation requires a seeded pool but both reserves are zero
    #[error("Pool is not initialized")]
    NotInitialized,

    /// Initialization attempted while reserves are already non-zero
    #[error("Pool is already initialized")]
    AlreadyInitialized,

    /// Initialization seed must be strictly positive on both sides
    #[error("Insufficient seed: both sides must be positive (got {seed_a}, {seed_b})")]
    InsufficientSeed { seed_a: u64, seed_b: u64 },

    /// Applying the operation would drain a reserve to zero or below
    #[error("Operation would violate the constant-product invariant")]
    InvariantViolation,

    /// Share redemption exceeds the outstanding share supply
    #[error("Insufficient shares: requested {requested} exceeds total supply {available}")]
    InsufficientShares { requested: u64, available: u64 },

    /// Swap or deposit amounts must be strictly positive
    #[error("Amount must be strictly positive")]
    ZeroAmount,

    /// Deposit is below the current share granularity and would mint nothing
    #[error("Deposit too small to mint a whole share")]
    DepositTooSmall,

    /// A reserve or quote computation would exceed the 64-bit range
    #[error("Reserve arithmetic exceeds 64-bit range")]
    ReserveOverflow,
}
