use soroban_sdk::{contracttype, Address};

use engine_lib::{validation, ContractError};

/// Which of the two pooled assets an operation refers to
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Asset {
    A = 0,
    B = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub token_a: Address,
    pub token_b: Address,
    /// Units of B per unit of A
    pub rate_a_to_b: i128,
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        validation::validate_distinct_assets(&self.token_a, &self.token_b)?;
        validation::validate_positive_amount(self.rate_a_to_b)
    }

    pub fn token(&self, asset: Asset) -> &Address {
        match asset {
            Asset::A => &self.token_a,
            Asset::B => &self.token_b,
        }
    }

    pub fn quote_a_for_b(&self, amount_a: i128) -> Result<i128, ContractError> {
        if amount_a <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        amount_a
            .checked_mul(self.rate_a_to_b)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Truncates toward zero. A quote that truncates to nothing is rejected
    /// rather than taking B for no A.
    pub fn quote_b_for_a(&self, amount_b: i128) -> Result<i128, ContractError> {
        if amount_b <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let amount_a = amount_b / self.rate_a_to_b;
        if amount_a == 0 {
            return Err(ContractError::InvalidAmount);
        }
        Ok(amount_a)
    }
}

/// Pool holdings, distinct from any participant's balance
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reserves {
    pub reserve_a: i128,
    pub reserve_b: i128,
}
