//! # Tidepool AMM Library - Constant-Product Pool Mathematics
//!
//! ## Purpose
//!
//! Pure calculation library for constant-product market-maker (CPMM) pools:
//! given the reserves of a two-asset trading pair, computes swap outputs and
//! liquidity mint/burn amounts while preserving the `reserve_a * reserve_b`
//! invariant. All arithmetic is exact integer math (u64 quantities, u128
//! intermediates, floor division) with a rounding bias that always favors the
//! pool.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool state from the hosting ledger, trade and
//!   liquidity parameters from callers
//! - **Output Destinations**: A transaction-processing collaborator that
//!   authenticates callers, moves real asset balances, and persists state
//! - **Precision**: Integer floor division throughout; `rust_decimal` only
//!   for read-only price quotes
//! - **Validation**: Every mutating operation is validate-then-apply, so a
//!   failed call never leaves a partially updated pool
//!
//! ## Architecture Role
//!
//! This crate is the mathematical core only. It performs no I/O, holds no
//! locks, and defines no wire format; the hosting runtime serializes calls
//! against each pool and owns per-account share bookkeeping.

pub mod cp_math;
pub mod error;
pub mod pool;
pub mod pool_traits;

pub use cp_math::CpMath;
pub use error::PoolError;
pub use pool::Pool;
pub use pool_traits::LiquidityVenue;

/// Common types for price quotes
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
