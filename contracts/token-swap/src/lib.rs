#![no_std]

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol};

use engine_lib::{admin, transfer, ContractError};

mod storage;
mod types;


use storage::*;
pub use types::{Asset, PoolConfig, Reserves};

#[contract]
pub struct TokenSwap;

#[contractimpl]
impl TokenSwap {
    /// Initialize the pool with its two assets and the fixed A→B rate
    pub fn init_contract(
        env: Env,
        admin: Address,
        token_a: Address,
        token_b: Address,
        rate_a_to_b: i128,
    ) -> Result<(), ContractError> {
        admin.require_auth();

        let config = PoolConfig {
            token_a,
            token_b,
            rate_a_to_b,
        };
        config.validate()?;
        admin::initialize(&env, &admin)?;

        set_config(&env, &config);
        bump_instance(&env);
        Ok(())
    }

    /// Give `amount_a` of A, receive `amount_a * rate` of B. Returns the B received.
    pub fn swap_a_for_b(env: Env, caller: Address, amount_a: i128) -> Result<i128, ContractError> {
        caller.require_auth();
        let config = get_config(&env)?;
        Self::execute_swap(&env, &config, &caller, Asset::A, amount_a)
    }

    /// Give `amount_b` of B, receive `amount_b / rate` of A (truncated). Returns the A received.
    pub fn swap_b_for_a(env: Env, caller: Address, amount_b: i128) -> Result<i128, ContractError> {
        caller.require_auth();
        let config = get_config(&env)?;
        Self::execute_swap(&env, &config, &caller, Asset::B, amount_b)
    }

    fn execute_swap(
        env: &Env,
        config: &PoolConfig,
        caller: &Address,
        give: Asset,
        amount_in: i128,
    ) -> Result<i128, ContractError> {
        if amount_in <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let (token_in, token_out) = match give {
            Asset::A => (&config.token_a, &config.token_b),
            Asset::B => (&config.token_b, &config.token_a),
        };
        let pool = env.current_contract_address();

        if transfer::balance(env, token_in, caller) < amount_in {
            log!(env, "caller short of asset", token_in.clone(), amount_in);
            return Err(ContractError::InsufficientCallerBalance);
        }

        let amount_out = match give {
            Asset::A => config.quote_a_for_b(amount_in)?,
            Asset::B => config.quote_b_for_a(amount_in)?,
        };
        if transfer::balance(env, token_out, &pool) < amount_out {
            log!(env, "pool short of asset", token_out.clone(), amount_out);
            return Err(ContractError::InsufficientPoolLiquidity);
        }

        if transfer::allowance(env, token_in, caller, &pool) < amount_in {
            return Err(ContractError::NotAuthorized);
        }

        transfer::transfer_from(env, token_in, &pool, caller, &pool, amount_in)?;
        transfer::transfer(env, token_out, &pool, caller, amount_out)?;
        bump_instance(env);

        env.events().publish(
            (Symbol::new(env, "swap_executed"), caller.clone()),
            (token_in.clone(), amount_in, token_out.clone(), amount_out),
        );
        Ok(amount_out)
    }

    /// Move `amount` of one pooled asset from `provider` into the reserve
    pub fn add_liquidity(
        env: Env,
        provider: Address,
        asset: Asset,
        amount: i128,
    ) -> Result<(), ContractError> {
        provider.require_auth();
        let config = get_config(&env)?;

        transfer::transfer(
            &env,
            config.token(asset),
            &provider,
            &env.current_contract_address(),
            amount,
        )?;
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "liquidity_added"), provider),
            (asset, amount),
        );
        Ok(())
    }

    /// Withdraw `amount` of one pooled asset to the authority
    pub fn remove_liquidity(
        env: Env,
        caller: Address,
        asset: Asset,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        admin::verify_admin(&env, &caller)?;
        let config = get_config(&env)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let pool = env.current_contract_address();
        if transfer::balance(&env, config.token(asset), &pool) < amount {
            return Err(ContractError::InsufficientPoolLiquidity);
        }

        transfer::transfer(&env, config.token(asset), &pool, &caller, amount)?;
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "liquidity_removed"), caller),
            (asset, amount),
        );
        Ok(())
    }

    pub fn transfer_authority(
        env: Env,
        caller: Address,
        new_authority: Address,
    ) -> Result<(), ContractError> {
        admin::transfer_admin(&env, &caller, &new_authority)
    }

    /* ---------------- QUERY FUNCTIONS ---------------- */

    pub fn authority(env: Env) -> Result<Address, ContractError> {
        admin::get_admin(&env)
    }

    pub fn config(env: Env) -> Result<PoolConfig, ContractError> {
        get_config(&env)
    }

    pub fn rate(env: Env) -> Result<i128, ContractError> {
        Ok(get_config(&env)?.rate_a_to_b)
    }

    pub fn reserves(env: Env) -> Result<Reserves, ContractError> {
        let config = get_config(&env)?;
        let pool = env.current_contract_address();
        Ok(Reserves {
            reserve_a: transfer::balance(&env, &config.token_a, &pool),
            reserve_b: transfer::balance(&env, &config.token_b, &pool),
        })
    }

    pub fn quote_a_for_b(env: Env, amount_a: i128) -> Result<i128, ContractError> {
        get_config(&env)?.quote_a_for_b(amount_a)
    }

    pub fn quote_b_for_a(env: Env, amount_b: i128) -> Result<i128, ContractError> {
        get_config(&env)?.quote_b_for_a(amount_b)
    }
}
