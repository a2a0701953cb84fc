use soroban_sdk::{contracttype, Address, Env, Vec};

use engine_lib::ContractError;

/// Where a participant stands in the registry. Status only moves forward.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VoterStatus {
    Unregistered = 0,
    Registered = 1,
    Voted = 2,
}

/// Election singleton
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Election {
    /// Finalization is allowed from this timestamp on
    pub end_time: u64,
    pub finalized: bool,
    /// Highest tally seen at finalization (0 before)
    pub highest_tally: u32,
    /// Candidates holding `highest_tally`, in the order they were added
    pub winners: Vec<Address>,
}

impl Election {
    pub fn new(env: &Env, end_time: u64) -> Self {
        Election {
            end_time,
            finalized: false,
            highest_tally: 0,
            winners: Vec::new(env),
        }
    }

    pub fn ensure_finalizable(&self, now: u64) -> Result<(), ContractError> {
        if now < self.end_time {
            return Err(ContractError::TooEarly);
        }
        if self.finalized {
            return Err(ContractError::AlreadyFinalized);
        }
        Ok(())
    }
}

/// One pass over `candidates` in addition order. Returns the maximum tally and
/// every candidate that holds it, order preserved.
pub fn collect_winners<F>(env: &Env, candidates: &Vec<Address>, tally_of: F) -> (u32, Vec<Address>)
where
    F: Fn(&Address) -> u32,
{
    let mut highest = 0u32;
    let mut winners = Vec::new(env);

    for candidate in candidates.iter() {
        let tally = tally_of(&candidate);
        if tally > highest {
            highest = tally;
            winners = Vec::new(env);
            winners.push_back(candidate);
        } else if tally == highest && tally > 0 {
            winners.push_back(candidate);
        }
    }

    (highest, winners)
}
