#![cfg(test)]
extern crate std;

use super::*;
use engine_lib::ContractError;
use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Events, Ledger};
use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, Vec};

const VOTING_PERIOD: u64 = 1000;

fn setup(env: &Env) -> (DecentralizedVotingClient<'_>, Address) {
    env.mock_all_auths();
    let admin = Address::generate(env);
    let contract_id = env.register(DecentralizedVoting, ());
    let client = DecentralizedVotingClient::new(env, &contract_id);
    client.init_contract(&admin, &VOTING_PERIOD);
    (client, admin)
}

fn pass_voting_period(env: &Env) {
    env.ledger().set_timestamp(VOTING_PERIOD + 1);
}

/// Topics and payload of the last event of the latest invocation
fn last_event(env: &Env, contract: &Address) -> (Vec<Val>, Val) {
    let (emitter, topics, data) = env.events().all().last().unwrap();
    assert_eq!(&emitter, contract);
    (topics, data)
}

#[test]
fn test_double_initialization() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    assert_eq!(
        client.try_init_contract(&admin, &VOTING_PERIOD),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_zero_voting_period_rejected() {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let client = DecentralizedVotingClient::new(&env, &env.register(DecentralizedVoting, ()));

    assert_eq!(
        client.try_init_contract(&admin, &0),
        Err(Ok(ContractError::InvalidConfig))
    );
}

#[test]
fn test_register_voter() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let voter = Address::generate(&env);

    assert_eq!(client.voter_status(&voter), VoterStatus::Unregistered);
    client.register(&voter);
    assert_eq!(client.voter_status(&voter), VoterStatus::Registered);
    assert_eq!(client.voter_status(&voter) as u32, 1);
}

#[test]
fn test_register_twice_fails() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let voter = Address::generate(&env);

    client.register(&voter);
    assert_eq!(
        client.try_register(&voter),
        Err(Ok(ContractError::AlreadyRegistered))
    );
}

#[test]
fn test_register_after_voting_fails() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let voter = Address::generate(&env);
    let candidate = Address::generate(&env);

    client.add_candidate(&admin, &candidate);
    client.register(&voter);
    client.cast_vote(&voter, &candidate);

    assert_eq!(
        client.try_register(&voter),
        Err(Ok(ContractError::AlreadyRegistered))
    );
    assert_eq!(client.voter_status(&voter), VoterStatus::Voted);
}

#[test]
fn test_add_candidate_seeds_tally() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let candidate = Address::generate(&env);

    client.add_candidate(&admin, &candidate);

    assert_eq!(client.vote_count(&candidate), 1);
    assert_eq!(client.candidates().len(), 1);
}

#[test]
fn test_add_candidate_seeds_tally_regardless_of_other_votes() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let first = Address::generate(&env);
    let late = Address::generate(&env);

    client.add_candidate(&admin, &first);
    for _ in 0..3 {
        let voter = Address::generate(&env);
        client.register(&voter);
        client.cast_vote(&voter, &first);
    }
    client.add_candidate(&admin, &late);

    assert_eq!(client.vote_count(&first), 4);
    assert_eq!(client.vote_count(&late), 1);
}

#[test]
fn test_non_admin_cannot_add_candidate() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let stranger = Address::generate(&env);
    let candidate = Address::generate(&env);

    assert_eq!(
        client.try_add_candidate(&stranger, &candidate),
        Err(Ok(ContractError::AccessDenied))
    );
    assert_eq!(client.vote_count(&candidate), 0);
}

#[test]
fn test_add_candidate_twice_fails() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let candidate = Address::generate(&env);

    client.add_candidate(&admin, &candidate);
    assert_eq!(
        client.try_add_candidate(&admin, &candidate),
        Err(Ok(ContractError::AlreadyExists))
    );
    assert_eq!(client.candidates().len(), 1);
}

#[test]
fn test_cast_vote() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let voter = Address::generate(&env);
    let candidate = Address::generate(&env);

    client.add_candidate(&admin, &candidate);
    client.register(&voter);
    client.cast_vote(&voter, &candidate);

    let (topics, data) = last_event(&env, &client.address);
    assert_eq!(topics, (Symbol::new(&env, "vote_cast"),).into_val(&env));
    let data: (Address, Address) = data.into_val(&env);
    assert_eq!(data, (voter.clone(), candidate.clone()));

    // 1 for candidate addition, 1 for the vote
    assert_eq!(client.vote_count(&candidate), 2);
    assert_eq!(client.voter_status(&voter), VoterStatus::Voted);
}

#[test]
fn test_registration_and_candidate_events() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let voter = Address::generate(&env);
    let candidate = Address::generate(&env);

    client.register(&voter);
    let (topics, data) = last_event(&env, &client.address);
    assert_eq!(topics, (Symbol::new(&env, "voter_registered"),).into_val(&env));
    let data: Address = data.into_val(&env);
    assert_eq!(data, voter);

    client.add_candidate(&admin, &candidate);
    let (topics, data) = last_event(&env, &client.address);
    assert_eq!(topics, (Symbol::new(&env, "candidate_added"),).into_val(&env));
    let data: Address = data.into_val(&env);
    assert_eq!(data, candidate);
}

#[test]
fn test_unregistered_cannot_vote() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let voter = Address::generate(&env);
    let candidate = Address::generate(&env);

    client.add_candidate(&admin, &candidate);
    assert_eq!(
        client.try_cast_vote(&voter, &candidate),
        Err(Ok(ContractError::NotRegistered))
    );
    assert_eq!(client.vote_count(&candidate), 1);
}

#[test]
fn test_cannot_vote_twice() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let voter = Address::generate(&env);
    let candidate = Address::generate(&env);

    client.add_candidate(&admin, &candidate);
    client.register(&voter);
    client.cast_vote(&voter, &candidate);

    assert_eq!(
        client.try_cast_vote(&voter, &candidate),
        Err(Ok(ContractError::AlreadyVoted))
    );
    assert_eq!(client.vote_count(&candidate), 2);
}

#[test]
fn test_vote_for_unknown_candidate_fails() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let voter = Address::generate(&env);
    let nobody = Address::generate(&env);

    client.register(&voter);
    assert_eq!(
        client.try_cast_vote(&voter, &nobody),
        Err(Ok(ContractError::UnknownCandidate))
    );
    // Failed ballot leaves the voter free to vote again
    assert_eq!(client.voter_status(&voter), VoterStatus::Registered);
}

#[test]
fn test_finalize_after_end_time() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    pass_voting_period(&env);
    client.finalize(&admin);

    assert!(client.is_finalized());
    assert_eq!(client.winners().len(), 0);
    assert_eq!(client.highest_tally(), 0);
}

#[test]
fn test_finalize_before_end_time_fails() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    assert_eq!(client.try_finalize(&admin), Err(Ok(ContractError::TooEarly)));

    env.ledger().set_timestamp(VOTING_PERIOD - 1);
    assert_eq!(client.try_finalize(&admin), Err(Ok(ContractError::TooEarly)));
    assert!(!client.is_finalized());
}

#[test]
fn test_finalize_at_end_time_succeeds() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    env.ledger().set_timestamp(VOTING_PERIOD);
    client.finalize(&admin);
    assert!(client.is_finalized());
}

#[test]
fn test_finalize_twice_fails() {
    let env = Env::default();
    let (client, admin) = setup(&env);

    pass_voting_period(&env);
    client.finalize(&admin);
    assert_eq!(
        client.try_finalize(&admin),
        Err(Ok(ContractError::AlreadyFinalized))
    );
}

#[test]
fn test_non_admin_cannot_finalize() {
    let env = Env::default();
    let (client, _) = setup(&env);
    let stranger = Address::generate(&env);

    pass_voting_period(&env);
    assert_eq!(
        client.try_finalize(&stranger),
        Err(Ok(ContractError::AccessDenied))
    );
}

#[test]
fn test_multiple_winners_with_tie() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let candidate1 = Address::generate(&env);
    let candidate2 = Address::generate(&env);
    let voter1 = Address::generate(&env);
    let voter2 = Address::generate(&env);

    client.add_candidate(&admin, &candidate1);
    client.add_candidate(&admin, &candidate2);
    client.register(&voter1);
    client.register(&voter2);
    client.cast_vote(&voter1, &candidate1);
    client.cast_vote(&voter2, &candidate2);

    pass_voting_period(&env);
    let winners = client.finalize(&admin);

    let (topics, data) = last_event(&env, &client.address);
    assert_eq!(topics, (Symbol::new(&env, "election_finalized"),).into_val(&env));
    let data: (u32, Vec<Address>) = data.into_val(&env);
    assert_eq!(data, (2, winners.clone()));

    assert_eq!(client.highest_tally(), 2);
    assert_eq!(winners.len(), 2);
    assert_eq!(winners.get(0).unwrap(), candidate1);
    assert_eq!(winners.get(1).unwrap(), candidate2);
    assert_eq!(client.winner(), None);
}

#[test]
fn test_later_candidate_can_lead() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let first = Address::generate(&env);
    let second = Address::generate(&env);
    let voter = Address::generate(&env);

    client.add_candidate(&admin, &first);
    client.add_candidate(&admin, &second);
    client.register(&voter);
    client.cast_vote(&voter, &second);

    pass_voting_period(&env);
    let winners = client.finalize(&admin);
    assert_eq!(winners.len(), 1);
    assert_eq!(winners.get(0).unwrap(), second);
}

#[test]
fn test_candidate_with_most_votes_wins() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let candidate1 = Address::generate(&env);
    let candidate2 = Address::generate(&env);
    let voter1 = Address::generate(&env);
    let voter2 = Address::generate(&env);

    client.add_candidate(&admin, &candidate1);
    client.add_candidate(&admin, &candidate2);
    client.register(&voter1);
    client.register(&voter2);
    client.cast_vote(&voter1, &candidate1);
    client.cast_vote(&voter2, &candidate1);

    pass_voting_period(&env);
    client.finalize(&admin);

    assert_eq!(client.highest_tally(), 3);
    assert_eq!(client.winner(), Some(candidate1));
    assert_eq!(client.vote_count(&candidate2), 1);
}

#[test]
fn test_tallies_frozen_after_finalize() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let candidate = Address::generate(&env);
    let voter = Address::generate(&env);

    client.add_candidate(&admin, &candidate);
    client.register(&voter);

    pass_voting_period(&env);
    client.finalize(&admin);

    assert_eq!(
        client.try_cast_vote(&voter, &candidate),
        Err(Ok(ContractError::AlreadyFinalized))
    );
    assert_eq!(
        client.try_add_candidate(&admin, &Address::generate(&env)),
        Err(Ok(ContractError::AlreadyFinalized))
    );
    assert_eq!(client.vote_count(&candidate), 1);
}

#[test]
fn test_transfer_authority() {
    let env = Env::default();
    let (client, admin) = setup(&env);
    let next = Address::generate(&env);
    let candidate = Address::generate(&env);

    assert_eq!(
        client.try_transfer_authority(&next, &next),
        Err(Ok(ContractError::AccessDenied))
    );

    client.transfer_authority(&admin, &next);
    let (topics, data) = last_event(&env, &client.address);
    assert_eq!(topics, (Symbol::new(&env, "authority_transferred"),).into_val(&env));
    let data: (Address, Address) = data.into_val(&env);
    assert_eq!(data, (admin.clone(), next.clone()));

    assert_eq!(client.authority(), next);
    assert_eq!(
        client.try_add_candidate(&admin, &candidate),
        Err(Ok(ContractError::AccessDenied))
    );
    client.add_candidate(&next, &candidate);
}

#[test]
fn test_calls_before_init_fail() {
    let env = Env::default();
    env.mock_all_auths();
    let client = DecentralizedVotingClient::new(&env, &env.register(DecentralizedVoting, ()));
    let voter = Address::generate(&env);

    assert_eq!(
        client.try_register(&voter),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(client.try_winners(), Err(Ok(ContractError::NotInitialized)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_winners_are_exactly_the_top_tallies(
        ballots in prop::collection::vec(0usize..4, 0..10),
    ) {
        let env = Env::default();
        let (client, admin) = setup(&env);

        let candidates: std::vec::Vec<Address> =
            (0..4).map(|_| Address::generate(&env)).collect();
        for candidate in candidates.iter() {
            client.add_candidate(&admin, candidate);
        }

        let mut expected = [1u32; 4];
        for choice in ballots {
            let voter = Address::generate(&env);
            client.register(&voter);
            client.cast_vote(&voter, &candidates[choice]);
            expected[choice] += 1;
        }

        pass_voting_period(&env);
        let winners = client.finalize(&admin);

        let highest = *expected.iter().max().unwrap();
        prop_assert_eq!(client.highest_tally(), highest);

        // INVARIANT: every top candidate and nobody else, in addition order
        let expected_winners: std::vec::Vec<Address> = candidates
            .iter()
            .zip(expected.iter())
            .filter(|(_, tally)| **tally == highest)
            .map(|(c, _)| c.clone())
            .collect();
        prop_assert!(winners.len() > 0);
        prop_assert_eq!(winners.len() as usize, expected_winners.len());
        for (i, expected_winner) in expected_winners.iter().enumerate() {
            prop_assert_eq!(&winners.get(i as u32).unwrap(), expected_winner);
        }
    }

    #[test]
    fn prop_status_only_moves_forward(actions in prop::collection::vec(any::<bool>(), 1..8)) {
        let env = Env::default();
        let (client, admin) = setup(&env);
        let voter = Address::generate(&env);
        let candidate = Address::generate(&env);
        client.add_candidate(&admin, &candidate);

        let mut registered = false;
        let mut voted = false;
        for register in actions {
            if register {
                let result = client.try_register(&voter);
                if registered {
                    prop_assert_eq!(result, Err(Ok(ContractError::AlreadyRegistered)));
                } else {
                    prop_assert!(result.is_ok());
                    registered = true;
                }
            } else {
                let result = client.try_cast_vote(&voter, &candidate);
                if !registered {
                    prop_assert_eq!(result, Err(Ok(ContractError::NotRegistered)));
                } else if voted {
                    prop_assert_eq!(result, Err(Ok(ContractError::AlreadyVoted)));
                } else {
                    prop_assert!(result.is_ok());
                    voted = true;
                }
            }

            let expected_status = match (registered, voted) {
                (_, true) => VoterStatus::Voted,
                (true, false) => VoterStatus::Registered,
                (false, false) => VoterStatus::Unregistered,
            };
            prop_assert_eq!(client.voter_status(&voter), expected_status);
        }

        // Exactly one successful ballot at most
        let expected_tally = if voted { 2 } else { 1 };
        prop_assert_eq!(client.vote_count(&candidate), expected_tally);
    }
}
