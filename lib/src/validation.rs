use soroban_sdk::Address;

use crate::{errors::ContractError, MAX_VOTING_PERIOD_SECONDS};

pub fn validate_positive_amount(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidConfig);
    }
    Ok(())
}

/// `min..=max` must be a non-empty range of positive amounts.
pub fn validate_bounds(min: i128, max: i128) -> Result<(), ContractError> {
    validate_positive_amount(min)?;
    if max < min {
        return Err(ContractError::InvalidConfig);
    }
    Ok(())
}

/// Half-open window `[start, end)`; must not be empty.
pub fn validate_window(start: u64, end: u64) -> Result<(), ContractError> {
    if end <= start {
        return Err(ContractError::InvalidConfig);
    }
    Ok(())
}

pub fn validate_voting_period(period: u64) -> Result<(), ContractError> {
    if period == 0 || period > MAX_VOTING_PERIOD_SECONDS {
        return Err(ContractError::InvalidConfig);
    }
    Ok(())
}

pub fn validate_distinct_assets(a: &Address, b: &Address) -> Result<(), ContractError> {
    if a == b {
        return Err(ContractError::InvalidConfig);
    }
    Ok(())
}
