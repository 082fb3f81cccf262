use inkflow_engine::cards::{full_deck, Card, Rank, Suit, DECK_SIZE};
use inkflow_engine::effects::EffectKind;
use inkflow_engine::engine::{draw_card, play_card, NoticeKind, Outcome};
use inkflow_engine::errors::GameError;
use inkflow_engine::game::{GamePhase, GameState};
use inkflow_engine::player::Seat;
use inkflow_engine::rules::{ExhaustionPolicy, RuleSet};

/// Builds a full-deck position: the named cards go to their zones, every
/// other card stays in the deck unless `deck_len` trims the deck into the
/// discard pile underneath the top.
struct Table {
    rest: Vec<Card>,
}

impl Table {
    fn new() -> Self {
        Self { rest: full_deck() }
    }

    fn take(&mut self, suit: Suit, rank: Rank) -> Card {
        let pos = self
            .rest
            .iter()
            .position(|c| c.suit == suit && c.rank == rank)
            .expect("card already taken");
        self.rest.remove(pos)
    }

    fn build(
        self,
        top: Card,
        player: Vec<Card>,
        cpu: Vec<Card>,
        turn: Seat,
        deck_len: usize,
    ) -> GameState {
        let mut rest = self.rest;
        let buried: Vec<Card> = rest.drain(deck_len.min(rest.len())..).collect();
        let mut discard = buried;
        discard.push(top);
        GameState::from_parts(rest, discard, player, cpu, turn).expect("valid fixture")
    }
}

fn rules() -> RuleSet {
    RuleSet::default()
}

#[test]
fn jack_keeps_the_turn() {
    let mut t = Table::new();
    let top = t.take(Suit::Dragon, Rank::Four);
    let jack = t.take(Suit::Dragon, Rank::Jack);
    let other = t.take(Suit::Tiger, Rank::Two);
    let cpu = vec![t.take(Suit::Turtle, Rank::Nine)];
    let state = t.build(top, vec![jack, other], cpu, Seat::Player, 30);

    let tr = play_card(&state, &rules(), Seat::Player, jack.id).unwrap();
    assert_eq!(tr.state.turn(), Seat::Player);
    assert_eq!(tr.state.top_card(), &jack);
    assert!(tr.state.find_in_hand(Seat::Player, jack.id).is_none());
    assert_eq!(tr.state.player_hand().len(), 1);
    assert_eq!(tr.notice().text, "JUMP! Play Again");
    assert_eq!(tr.notice().kind, NoticeKind::Impact);
}

#[test]
fn queen_keeps_the_turn_for_cpu() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Queen);
    let queen = t.take(Suit::Tiger, Rank::Queen);
    let spare = t.take(Suit::Tiger, Rank::Two);
    let player = vec![t.take(Suit::Turtle, Rank::Nine)];
    let state = t.build(top, player, vec![queen, spare], Seat::Cpu, 30);

    let tr = play_card(&state, &rules(), Seat::Cpu, queen.id).unwrap();
    assert_eq!(tr.state.turn(), Seat::Cpu);
    assert_eq!(tr.state.phase(), GamePhase::CpuTurn);
    assert_eq!(tr.notice().text, "REVERSE! Play Again");
}

#[test]
fn king_forces_two_cards_on_the_cpu() {
    let mut t = Table::new();
    let top = t.take(Suit::Tiger, Rank::Five);
    let king = t.take(Suit::Tiger, Rank::King);
    let spare = t.take(Suit::Dragon, Rank::Two);
    let cpu = vec![
        t.take(Suit::Turtle, Rank::Ace),
        t.take(Suit::Turtle, Rank::Two),
        t.take(Suit::Turtle, Rank::Three),
    ];
    let state = t.build(top, vec![king, spare], cpu, Seat::Player, 20);
    let deck_before = state.deck().len();

    let tr = play_card(&state, &rules(), Seat::Player, king.id).unwrap();
    assert_eq!(tr.state.cpu_hand().len(), 5);
    assert_eq!(tr.state.deck().len(), deck_before - 2);
    assert_eq!(tr.state.turn(), Seat::Cpu);
    match tr.outcome {
        Outcome::Played {
            effect,
            forced_drawn,
            ..
        } => {
            assert_eq!(effect.kind, EffectKind::Attack);
            assert_eq!(forced_drawn, 2);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(tr.notice().text, "ATTACK! Opponent draws 2");
}

#[test]
fn attack_notice_names_the_configured_count() {
    let mut t = Table::new();
    let top = t.take(Suit::Tiger, Rank::Five);
    let king = t.take(Suit::Tiger, Rank::King);
    let spare = t.take(Suit::Dragon, Rank::Two);
    let cpu = vec![t.take(Suit::Turtle, Rank::Ace)];
    let state = t.build(top, vec![king, spare], cpu, Seat::Player, 20);
    let heavy = RuleSet {
        attack_draw: 4,
        ..RuleSet::default()
    };

    let tr = play_card(&state, &heavy, Seat::Player, king.id).unwrap();
    assert_eq!(tr.state.cpu_hand().len(), 5);
    assert_eq!(tr.notice().text, "ATTACK! Opponent draws 4");
}

#[test]
fn forced_draw_is_partial_when_the_deck_is_short() {
    let mut t = Table::new();
    let top = t.take(Suit::Tiger, Rank::Five);
    let king = t.take(Suit::Tiger, Rank::King);
    let spare = t.take(Suit::Dragon, Rank::Two);
    let cpu = vec![t.take(Suit::Turtle, Rank::Ace)];
    let state = t.build(top, vec![king, spare], cpu, Seat::Player, 1);

    let tr = play_card(&state, &rules(), Seat::Player, king.id).unwrap();
    assert_eq!(tr.state.cpu_hand().len(), 2);
    assert!(tr.state.deck().is_empty());
    assert_eq!(tr.state.turn(), Seat::Cpu);
    assert_eq!(tr.state.winner(), None);
    assert_eq!(tr.state.card_count(), DECK_SIZE);
}

#[test]
fn forced_draw_on_empty_deck_draws_nothing() {
    let mut t = Table::new();
    let top = t.take(Suit::Tiger, Rank::Five);
    let king = t.take(Suit::Tiger, Rank::King);
    let spare = t.take(Suit::Dragon, Rank::Two);
    let cpu = vec![t.take(Suit::Turtle, Rank::Ace)];
    let state = t.build(top, vec![king, spare], cpu, Seat::Player, 0);

    let tr = play_card(&state, &rules(), Seat::Player, king.id).unwrap();
    assert_eq!(tr.state.cpu_hand().len(), 1);
    assert_eq!(tr.state.turn(), Seat::Cpu);
    assert!(!tr.state.is_over());
}

#[test]
fn emptying_the_hand_wins_even_with_a_jack() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Four);
    let jack = t.take(Suit::Phoenix, Rank::Jack);
    let cpu = vec![t.take(Suit::Turtle, Rank::Nine)];
    let state = t.build(top, vec![jack], cpu, Seat::Player, 30);

    let tr = play_card(&state, &rules(), Seat::Player, jack.id).unwrap();
    assert!(tr.state.player_hand().is_empty());
    assert_eq!(tr.state.winner(), Some(Seat::Player));
    assert_eq!(
        tr.state.phase(),
        GamePhase::GameOver {
            winner: Seat::Player
        }
    );
    assert_eq!(tr.notice().text, "VICTORY!");
}

#[test]
fn cpu_emptying_its_hand_is_a_defeat() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Four);
    let seven = t.take(Suit::Phoenix, Rank::Seven);
    let player = vec![t.take(Suit::Turtle, Rank::Nine)];
    let state = t.build(top, player, vec![seven], Seat::Cpu, 30);

    let tr = play_card(&state, &rules(), Seat::Cpu, seven.id).unwrap();
    assert_eq!(tr.state.winner(), Some(Seat::Cpu));
    assert_eq!(tr.notice().text, "DEFEAT");
}

#[test]
fn winning_with_a_king_still_applies_the_attack() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Four);
    let king = t.take(Suit::Phoenix, Rank::King);
    let cpu = vec![t.take(Suit::Turtle, Rank::Nine)];
    let state = t.build(top, vec![king], cpu, Seat::Player, 10);

    let tr = play_card(&state, &rules(), Seat::Player, king.id).unwrap();
    assert_eq!(tr.state.winner(), Some(Seat::Player));
    assert_eq!(tr.state.cpu_hand().len(), 3);
    assert_eq!(tr.state.card_count(), DECK_SIZE);
}

#[test]
fn drawing_passes_the_turn() {
    let state = GameState::new_with_seed(3, &rules()).unwrap();
    let expected = *state.deck().peek().unwrap();
    let tr = draw_card(&state, &rules(), Seat::Player).unwrap();
    assert_eq!(tr.state.turn(), Seat::Cpu);
    assert_eq!(tr.state.player_hand().len(), 8);
    assert_eq!(tr.state.player_hand().last(), Some(&expected));
    assert_eq!(tr.outcome, Outcome::Drew {
        seat: Seat::Player,
        card: expected
    });
    assert_eq!(tr.notice().text, "Opponent's Turn");
}

#[test]
fn drawing_on_an_empty_deck_forfeits() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Four);
    let player = vec![t.take(Suit::Turtle, Rank::Nine)];
    let cpu = vec![t.take(Suit::Turtle, Rank::Ten)];
    let state = t.build(top, player, cpu, Seat::Player, 0);

    let tr = draw_card(&state, &rules(), Seat::Player).unwrap();
    assert_eq!(tr.state.winner(), Some(Seat::Cpu));
    assert_eq!(tr.state.player_hand(), state.player_hand());
    assert_eq!(tr.state.discard_pile(), state.discard_pile());
    assert_eq!(tr.outcome, Outcome::Forfeited { seat: Seat::Player });
    assert_eq!(tr.notice().text, "Deck Empty! Draw");
}

#[test]
fn cpu_forfeit_on_empty_deck_awards_the_player() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Four);
    let player = vec![t.take(Suit::Turtle, Rank::Nine)];
    let cpu = vec![t.take(Suit::Turtle, Rank::Ten)];
    let state = t.build(top, player, cpu, Seat::Cpu, 0);

    let tr = draw_card(&state, &rules(), Seat::Cpu).unwrap();
    assert_eq!(tr.state.winner(), Some(Seat::Player));
}

#[test]
fn reshuffle_policy_recycles_the_discard_pile() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Four);
    let player = vec![t.take(Suit::Turtle, Rank::Nine)];
    let cpu = vec![t.take(Suit::Turtle, Rank::Ten)];
    let state = t.build(top, player, cpu, Seat::Player, 0);
    let buried = state.discard_pile().len() - 1;
    let rules = RuleSet {
        exhaustion: ExhaustionPolicy::ReshuffleDiscard,
        ..RuleSet::default()
    };

    let tr = draw_card(&state, &rules, Seat::Player).unwrap();
    assert!(tr.reshuffled);
    assert_eq!(tr.state.winner(), None);
    assert_eq!(tr.state.player_hand().len(), 2);
    assert_eq!(tr.state.deck().len(), buried - 1);
    assert_eq!(tr.state.discard_pile().len(), 1);
    assert_eq!(tr.state.top_card(), &top);
    assert_eq!(tr.state.reshuffles(), 1);
}

#[test]
fn reshuffle_policy_still_forfeits_with_nothing_to_recycle() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Four);
    let player: Vec<Card> = t.rest.drain(..26).collect();
    let cpu: Vec<Card> = t.rest.drain(..).collect();
    let state = GameState::from_parts(vec![], vec![top], player, cpu, Seat::Player).unwrap();
    let rules = RuleSet {
        exhaustion: ExhaustionPolicy::ReshuffleDiscard,
        ..RuleSet::default()
    };

    let tr = draw_card(&state, &rules, Seat::Player).unwrap();
    assert!(!tr.reshuffled);
    assert_eq!(tr.state.winner(), Some(Seat::Cpu));
}

#[test]
fn reshuffle_policy_tops_up_a_short_forced_draw() {
    let mut t = Table::new();
    let top = t.take(Suit::Tiger, Rank::Five);
    let king = t.take(Suit::Tiger, Rank::King);
    let spare = t.take(Suit::Dragon, Rank::Two);
    let cpu = vec![t.take(Suit::Turtle, Rank::Ace)];
    let state = t.build(top, vec![king, spare], cpu, Seat::Player, 1);
    let rules = RuleSet {
        exhaustion: ExhaustionPolicy::ReshuffleDiscard,
        ..RuleSet::default()
    };

    let tr = play_card(&state, &rules, Seat::Player, king.id).unwrap();
    assert!(tr.reshuffled);
    assert_eq!(tr.state.cpu_hand().len(), 3);
    // the King just played stays on top, the old top went back in the deck
    assert_eq!(tr.state.top_card(), &king);
    assert_eq!(tr.state.card_count(), DECK_SIZE);
}

#[test]
fn illegal_card_is_rejected() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Four);
    let wrong = t.take(Suit::Turtle, Rank::Nine);
    let cpu = vec![t.take(Suit::Turtle, Rank::Ten)];
    let state = t.build(top, vec![wrong], cpu, Seat::Player, 30);

    let err = play_card(&state, &rules(), Seat::Player, wrong.id).unwrap_err();
    assert_eq!(err, GameError::IllegalMove { card: wrong, top });
    assert!(err.is_invalid_move());
}

#[test]
fn card_from_the_other_hand_is_rejected() {
    let mut t = Table::new();
    let top = t.take(Suit::Phoenix, Rank::Four);
    let mine = t.take(Suit::Phoenix, Rank::Nine);
    let theirs = t.take(Suit::Phoenix, Rank::Ten);
    let state = t.build(top, vec![mine], vec![theirs], Seat::Player, 30);

    let err = play_card(&state, &rules(), Seat::Player, theirs.id).unwrap_err();
    assert_eq!(err, GameError::CardNotInHand(theirs.id));
}
