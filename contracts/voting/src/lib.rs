#![no_std]

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol, Vec};

use engine_lib::{admin, validation::validate_voting_period, ContractError};

mod storage;
mod types;

#[cfg(test)]
mod test;

use storage::*;
pub use types::{Election, VoterStatus};

#[contract]
pub struct DecentralizedVoting;

#[contractimpl]
impl DecentralizedVoting {
    /// Initialize the election. Finalization opens `voting_period` seconds
    /// after the current ledger time.
    pub fn init_contract(
        env: Env,
        admin: Address,
        voting_period: u64,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        validate_voting_period(voting_period)?;
        admin::initialize(&env, &admin)?;

        let end_time = env
            .ledger()
            .timestamp()
            .checked_add(voting_period)
            .ok_or(ContractError::ArithmeticOverflow)?;

        set_election(&env, &Election::new(&env, end_time));
        set_candidates(&env, &Vec::new(&env));
        bump_instance(&env);
        Ok(())
    }

    /// Register the caller as a voter
    pub fn register(env: Env, voter: Address) -> Result<(), ContractError> {
        voter.require_auth();
        get_election(&env)?;

        if get_voter_status(&env, &voter) != VoterStatus::Unregistered {
            return Err(ContractError::AlreadyRegistered);
        }

        set_voter_status(&env, &voter, VoterStatus::Registered);
        bump_instance(&env);

        env.events()
            .publish((Symbol::new(&env, "voter_registered"),), voter);
        Ok(())
    }

    /// Add a candidate (authority only).
    ///
    /// A new candidate starts with a tally of 1: the addition itself counts as
    /// a baseline vote. Tie evaluation and callers rely on this.
    pub fn add_candidate(
        env: Env,
        caller: Address,
        candidate: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        admin::verify_admin(&env, &caller)?;

        let election = get_election(&env)?;
        if election.finalized {
            return Err(ContractError::AlreadyFinalized);
        }
        if get_tally(&env, &candidate).is_some() {
            return Err(ContractError::AlreadyExists);
        }

        let mut candidates = get_candidates(&env);
        candidates.push_back(candidate.clone());
        set_candidates(&env, &candidates);
        set_tally(&env, &candidate, 1);
        bump_instance(&env);

        env.events()
            .publish((Symbol::new(&env, "candidate_added"),), candidate);
        Ok(())
    }

    /// Cast the caller's single ballot
    pub fn cast_vote(env: Env, voter: Address, candidate: Address) -> Result<(), ContractError> {
        voter.require_auth();

        let election = get_election(&env)?;
        if election.finalized {
            return Err(ContractError::AlreadyFinalized);
        }

        match get_voter_status(&env, &voter) {
            VoterStatus::Unregistered => return Err(ContractError::NotRegistered),
            VoterStatus::Voted => return Err(ContractError::AlreadyVoted),
            VoterStatus::Registered => {}
        }

        let tally = get_tally(&env, &candidate).ok_or(ContractError::UnknownCandidate)?;
        let tally = tally
            .checked_add(1)
            .ok_or(ContractError::ArithmeticOverflow)?;

        set_tally(&env, &candidate, tally);
        set_voter_status(&env, &voter, VoterStatus::Voted);
        bump_instance(&env);

        env.events()
            .publish((Symbol::new(&env, "vote_cast"),), (voter, candidate));
        Ok(())
    }

    /// Close the election and record every candidate sharing the highest tally.
    pub fn finalize(env: Env, caller: Address) -> Result<Vec<Address>, ContractError> {
        caller.require_auth();
        admin::verify_admin(&env, &caller)?;

        let mut election = get_election(&env)?;
        let now = env.ledger().timestamp();
        if let Err(err) = election.ensure_finalizable(now) {
            log!(&env, "finalize rejected", now, election.end_time);
            return Err(err);
        }

        let candidates = get_candidates(&env);
        let (highest, winners) =
            types::collect_winners(&env, &candidates, |c| get_tally(&env, c).unwrap_or(0));

        election.finalized = true;
        election.highest_tally = highest;
        election.winners = winners.clone();
        set_election(&env, &election);
        bump_instance(&env);

        env.events().publish(
            (Symbol::new(&env, "election_finalized"),),
            (highest, winners.clone()),
        );
        Ok(winners)
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

    pub fn voter_status(env: Env, voter: Address) -> VoterStatus {
        get_voter_status(&env, &voter)
    }

    /// Tally of a candidate, 0 if it was never added
    pub fn vote_count(env: Env, candidate: Address) -> u32 {
        get_tally(&env, &candidate).unwrap_or(0)
    }

    pub fn candidates(env: Env) -> Vec<Address> {
        get_candidates(&env)
    }

    pub fn end_time(env: Env) -> Result<u64, ContractError> {
        Ok(get_election(&env)?.end_time)
    }

    pub fn is_finalized(env: Env) -> Result<bool, ContractError> {
        Ok(get_election(&env)?.finalized)
    }

    pub fn highest_tally(env: Env) -> Result<u32, ContractError> {
        Ok(get_election(&env)?.highest_tally)
    }

    pub fn winners(env: Env) -> Result<Vec<Address>, ContractError> {
        Ok(get_election(&env)?.winners)
    }

    /// The sole winner. `None` before finalization or when the result is a tie.
    pub fn winner(env: Env) -> Result<Option<Address>, ContractError> {
        let election = get_election(&env)?;
        if election.winners.len() == 1 {
            Ok(election.winners.get(0))
        } else {
            Ok(None)
        }
    }
}
