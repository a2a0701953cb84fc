use soroban_sdk::{Address, Env, Symbol};

use crate::{errors::ContractError, ADMIN_KEY, INITIALIZED_KEY};

/// Marks the contract as constructed. Fails if it already was.
pub fn initialize(env: &Env, admin: &Address) -> Result<(), ContractError> {
    if is_initialized(env) {
        return Err(ContractError::AlreadyInitialized);
    }
    env.storage().instance().set(&INITIALIZED_KEY, &true);
    set_admin(env, admin);
    Ok(())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED_KEY)
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN_KEY)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN_KEY, admin);
}

pub fn verify_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let admin = get_admin(env)?;
    if &admin != caller {
        return Err(ContractError::AccessDenied);
    }
    Ok(())
}

pub fn transfer_admin(
    env: &Env,
    current_admin: &Address,
    new_admin: &Address,
) -> Result<(), ContractError> {
    current_admin.require_auth();
    verify_admin(env, current_admin)?;
    set_admin(env, new_admin);

    env.events().publish(
        (Symbol::new(env, "authority_transferred"),),
        (current_admin.clone(), new_admin.clone()),
    );
    Ok(())
}
