use soroban_sdk::{contracttype, Env};

use engine_lib::{ContractError, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD};

use crate::types::PoolConfig;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Asset identities and rate
    Config,
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn get_config(env: &Env) -> Result<PoolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}
