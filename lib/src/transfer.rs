//! Value movement between identities, backed by SEP-41 token contracts.
//!
//! A failed movement never panics the caller: it surfaces as
//! [`ContractError::TransferFailed`], and the enclosing contract call returns
//! that error so the host discards every write made during the call.
use soroban_sdk::{log, token, Address, Env};

use crate::errors::ContractError;

pub fn balance(env: &Env, asset: &Address, holder: &Address) -> i128 {
    token::Client::new(env, asset).balance(holder)
}

pub fn allowance(env: &Env, asset: &Address, from: &Address, spender: &Address) -> i128 {
    token::Client::new(env, asset).allowance(from, spender)
}

/// Moves `amount` of `asset` from `from` to `to`. `from` must have authorized
/// the movement (or be the current contract).
pub fn transfer(
    env: &Env,
    asset: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }

    match token::Client::new(env, asset).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "transfer failed", asset.clone(), from.clone(), amount);
            Err(ContractError::TransferFailed)
        }
    }
}

/// Moves `amount` of `asset` out of `from` using an allowance granted to `spender`.
pub fn transfer_from(
    env: &Env,
    asset: &Address,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }

    match token::Client::new(env, asset).try_transfer_from(spender, from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "transfer_from failed", asset.clone(), from.clone(), amount);
            Err(ContractError::TransferFailed)
        }
    }
}
