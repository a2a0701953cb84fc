use soroban_sdk::{contracttype, Address, Env};

use engine_lib::{
    ContractError, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};

use crate::types::{SaleConfig, SaleState};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Immutable sale parameters
    Config,
    /// Running totals and end flag
    State,
    /// Accumulated contribution of an address
    Contribution(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn get_config(env: &Env) -> Result<SaleConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_state(env: &Env) -> Result<SaleState, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_state(env: &Env, state: &SaleState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn get_contribution(env: &Env, contributor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(contributor.clone()))
        .unwrap_or(0)
}

pub fn set_contribution(env: &Env, contributor: &Address, amount: i128) {
    let key = DataKey::Contribution(contributor.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn remove_contribution(env: &Env, contributor: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Contribution(contributor.clone()));
}
