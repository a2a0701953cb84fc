use soroban_sdk::{contracttype, Address, Env, Vec};

use engine_lib::{
    ContractError, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT,
    PERSISTENT_LIFETIME_THRESHOLD,
};

use crate::types::{Election, VoterStatus};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Election singleton
    Election,
    /// Candidate identities in addition order
    Candidates,
    /// Registry status of a participant
    Voter(Address),
    /// Tally of a candidate
    Tally(Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/* ---------------- ELECTION ---------------- */

pub fn get_election(env: &Env) -> Result<Election, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Election)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_election(env: &Env, election: &Election) {
    env.storage().instance().set(&DataKey::Election, election);
}

/* ---------------- CANDIDATES ---------------- */

pub fn get_candidates(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Candidates)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_candidates(env: &Env, candidates: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Candidates, candidates);
}

pub fn get_tally(env: &Env, candidate: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::Tally(candidate.clone()))
}

pub fn set_tally(env: &Env, candidate: &Address, tally: u32) {
    let key = DataKey::Tally(candidate.clone());
    env.storage().persistent().set(&key, &tally);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/* ---------------- VOTERS ---------------- */

pub fn get_voter_status(env: &Env, voter: &Address) -> VoterStatus {
    env.storage()
        .persistent()
        .get(&DataKey::Voter(voter.clone()))
        .unwrap_or(VoterStatus::Unregistered)
}

pub fn set_voter_status(env: &Env, voter: &Address, status: VoterStatus) {
    let key = DataKey::Voter(voter.clone());
    env.storage().persistent().set(&key, &status);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
