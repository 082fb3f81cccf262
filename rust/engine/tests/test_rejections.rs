use inkflow_engine::cards::{full_deck, CardId, Rank};
use inkflow_engine::engine::{apply_action, Engine};
use inkflow_engine::errors::GameError;
use inkflow_engine::game::GameState;
use inkflow_engine::player::{PlayerAction, Seat};
use inkflow_engine::rules::{is_valid_move, RuleSet};

fn engine(seed: u64) -> Engine {
    Engine::new(Some(seed), RuleSet::default()).unwrap()
}

#[test]
fn out_of_turn_actions_change_nothing() {
    let mut e = engine(7);
    let before = e.state().clone();
    let cpu_card = before.cpu_hand()[0].id;

    let err = e.play_card(Seat::Cpu, cpu_card).unwrap_err();
    assert_eq!(
        err,
        GameError::NotYourTurn {
            expected: Seat::Player,
            actual: Seat::Cpu
        }
    );
    assert!(e.draw_card(Seat::Cpu).is_err());
    assert_eq!(e.state(), &before);
}

#[test]
fn unknown_card_id_is_rejected() {
    let mut e = engine(8);
    let before = e.state().clone();
    let err = e.play_card(Seat::Player, CardId::new(200)).unwrap_err();
    assert_eq!(err, GameError::CardNotInHand(CardId::new(200)));
    assert_eq!(e.state(), &before);
}

#[test]
fn illegal_card_is_rejected_without_side_effects() {
    // find a deal where the player holds something unplayable
    let rules = RuleSet::default();
    let (state, card) = (0..200u64)
        .find_map(|seed| {
            let s = GameState::new_with_seed(seed, &rules).unwrap();
            let top = *s.top_card();
            let bad = s
                .player_hand()
                .iter()
                .copied()
                .find(|c| !is_valid_move(c, &top));
            bad.map(|c| (s, c))
        })
        .expect("some deal has an illegal card");

    let err = apply_action(&state, &rules, Seat::Player, PlayerAction::Play(card.id)).unwrap_err();
    assert!(matches!(err, GameError::IllegalMove { .. }));
    assert!(err.is_invalid_move());
    assert!(state.find_in_hand(Seat::Player, card.id).is_some());
}

#[test]
fn finished_game_rejects_everything() {
    let mut rest = full_deck();
    let top = rest.remove(0);
    let last = rest
        .iter()
        .position(|c| c.rank == Rank::Seven)
        .map(|i| rest.remove(i))
        .unwrap();
    let spare = rest.remove(0);
    let state =
        GameState::from_parts(rest, vec![top], vec![last], vec![spare], Seat::Player).unwrap();
    let rules = RuleSet::default();

    let won = apply_action(&state, &rules, Seat::Player, PlayerAction::Play(last.id))
        .unwrap()
        .state;
    assert_eq!(won.winner(), Some(Seat::Player));

    for seat in [Seat::Player, Seat::Cpu] {
        let err = apply_action(&won, &rules, seat, PlayerAction::Draw).unwrap_err();
        assert_eq!(
            err,
            GameError::GameAlreadyOver {
                winner: Seat::Player
            }
        );
    }
    let err = apply_action(&won, &rules, Seat::Cpu, PlayerAction::Play(spare.id)).unwrap_err();
    assert!(err.is_invalid_move());
}

#[test]
fn rejection_is_repeatable() {
    let mut e = engine(9);
    let before = e.state().clone();
    let first = e.draw_card(Seat::Cpu).unwrap_err();
    let second = e.draw_card(Seat::Cpu).unwrap_err();
    assert_eq!(first, second);
    assert_eq!(e.state(), &before);
}

#[test]
fn invalid_move_classification() {
    assert!(!GameError::InvalidRules("x".into()).is_invalid_move());
    assert!(!GameError::NotEnoughCards {
        needed: 15,
        available: 3
    }
    .is_invalid_move());
}
