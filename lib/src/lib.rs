#![no_std]
pub mod admin;
pub mod errors;
pub mod storage_keys;
pub mod transfer;
pub mod validation;

pub use errors::ContractError;
pub use storage_keys::*;

/// Ledger close time is ~5s, so one day is 17280 ledgers.
pub const DAY_IN_LEDGERS: u32 = 17280;

// Instance storage (config, singletons)
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

// Persistent storage (per-address records)
pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Upper bound for a configured voting period (~1 year).
pub const MAX_VOTING_PERIOD_SECONDS: u64 = 365 * 24 * 60 * 60;
