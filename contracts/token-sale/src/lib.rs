#![no_std]

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol};

use engine_lib::{admin, transfer, ContractError};

mod storage;
mod types;


use storage::*;
pub use types::{SaleConfig, SalePhase, SaleState, Window};

#[contract]
pub struct TokenSale;

#[contractimpl]
impl TokenSale {
    /// Initialize the sale. The contract must be funded with enough
    /// `sale_token` inventory to cover what it sells.
    pub fn init_contract(
        env: Env,
        admin: Address,
        config: SaleConfig,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        config.validate()?;
        admin::initialize(&env, &admin)?;

        set_config(&env, &config);
        set_state(&env, &SaleState::new());
        bump_instance(&env);
        Ok(())
    }

    /// Contribute `amount` of the payment asset in the current window and
    /// receive `amount * distribution_rate` of the sale asset in the same call.
    /// Returns the distributed amount.
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<i128, ContractError> {
        contributor.require_auth();

        let config = get_config(&env)?;
        let state = get_state(&env)?;
        let now = env.ledger().timestamp();
        let phase = config.phase_at(now);

        let next = match state.accept(&config, phase, amount) {
            Ok(next) => next,
            Err(err) => {
                log!(&env, "contribution rejected", contributor, amount, now);
                return Err(err);
            }
        };
        let tokens = config.tokens_for(amount)?;
        let contributed = get_contribution(&env, &contributor)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let sale = env.current_contract_address();
        transfer::transfer(&env, &config.payment_token, &contributor, &sale, amount)?;
        transfer::transfer(&env, &config.sale_token, &sale, &contributor, tokens)?;

        set_state(&env, &next);
        set_contribution(&env, &contributor, contributed);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "tokens_purchased"),),
            (contributor, amount, tokens),
        );
        Ok(tokens)
    }

    /// Close the sale once the public window is over (authority only)
    pub fn end_public_sale(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        admin::verify_admin(&env, &caller)?;

        let config = get_config(&env)?;
        let mut state = get_state(&env)?;
        if config.phase_at(env.ledger().timestamp()) != SalePhase::AfterPublicSale {
            return Err(ContractError::TooEarly);
        }
        if state.public_sale_ended {
            return Err(ContractError::AlreadyFinalized);
        }

        state.public_sale_ended = true;
        set_state(&env, &state);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "public_sale_ended"),),
            (state.total_raised(), state.goal_reached(&config)),
        );
        Ok(())
    }

    /// Return the caller's whole contribution when the sale ended below its goal.
    pub fn claim_refund(env: Env, contributor: Address) -> Result<i128, ContractError> {
        contributor.require_auth();

        let config = get_config(&env)?;
        let state = get_state(&env)?;
        if !state.public_sale_ended {
            return Err(ContractError::RefundsNotOpen);
        }
        if state.goal_reached(&config) {
            return Err(ContractError::GoalReached);
        }

        let amount = get_contribution(&env, &contributor);
        if amount == 0 {
            return Err(ContractError::NothingToRefund);
        }

        transfer::transfer(
            &env,
            &config.payment_token,
            &env.current_contract_address(),
            &contributor,
            amount,
        )?;
        remove_contribution(&env, &contributor);
        bump_instance(&env);

        env.events()
            .publish((Symbol::new(&env, "refund_claimed"),), (contributor, amount));
        Ok(amount)
    }

    /// Move the raised payment asset to the authority after a successful sale
    pub fn withdraw_proceeds(env: Env, caller: Address) -> Result<i128, ContractError> {
        caller.require_auth();
        admin::verify_admin(&env, &caller)?;

        let config = get_config(&env)?;
        let state = get_state(&env)?;
        if !state.public_sale_ended {
            return Err(ContractError::SaleNotEnded);
        }
        if !state.goal_reached(&config) {
            return Err(ContractError::GoalNotReached);
        }

        let sale = env.current_contract_address();
        let amount = transfer::balance(&env, &config.payment_token, &sale);
        transfer::transfer(&env, &config.payment_token, &sale, &caller, amount)?;

        env.events()
            .publish((Symbol::new(&env, "proceeds_withdrawn"),), (caller, amount));
        Ok(amount)
    }

    /// Move the remaining sale-asset inventory to the authority once the sale ended
    pub fn withdraw_unsold(env: Env, caller: Address) -> Result<i128, ContractError> {
        caller.require_auth();
        admin::verify_admin(&env, &caller)?;

        let config = get_config(&env)?;
        if !get_state(&env)?.public_sale_ended {
            return Err(ContractError::SaleNotEnded);
        }

        let sale = env.current_contract_address();
        let amount = transfer::balance(&env, &config.sale_token, &sale);
        transfer::transfer(&env, &config.sale_token, &sale, &caller, amount)?;

        env.events()
            .publish((Symbol::new(&env, "unsold_withdrawn"),), (caller, amount));
        Ok(amount)
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

    pub fn config(env: Env) -> Result<SaleConfig, ContractError> {
        get_config(&env)
    }

    pub fn state(env: Env) -> Result<SaleState, ContractError> {
        get_state(&env)
    }

    pub fn phase(env: Env) -> Result<SalePhase, ContractError> {
        Ok(get_config(&env)?.phase_at(env.ledger().timestamp()))
    }

    pub fn contribution_of(env: Env, contributor: Address) -> i128 {
        get_contribution(&env, &contributor)
    }

    pub fn total_raised(env: Env) -> Result<i128, ContractError> {
        Ok(get_state(&env)?.total_raised())
    }
}
