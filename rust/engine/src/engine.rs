use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, DECK_SIZE};
use crate::effects::{resolve_effect_with, Intensity, Resolution};
use crate::errors::GameError;
use crate::game::GameState;
use crate::player::{PlayerAction, Seat};
use crate::rules::{is_valid_move, ExhaustionPolicy, RuleSet};

/// What an accepted action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// `card` left `seat`'s hand for the discard top
    Played {
        seat: Seat,
        card: Card,
        effect: Resolution,
        /// Cards actually moved by the forced draw; may fall short of the
        /// effect's count when the deck runs out
        forced_drawn: usize,
    },
    /// `seat` took `card` from the deck and passed the turn
    Drew { seat: Seat, card: Card },
    /// `seat` tried to draw from an empty deck and lost the game
    Forfeited { seat: Seat },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Normal,
    Impact,
    Error,
}

/// Advisory status line for presentation. Not part of the rules.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    fn new(text: &str, kind: NoticeKind) -> Self {
        Self {
            text: text.to_string(),
            kind,
        }
    }

    pub fn invalid_move() -> Self {
        Self::new("Invalid Move", NoticeKind::Error)
    }

    /// Status line for whoever holds the turn, seen from the player's side.
    pub fn for_turn(turn: Seat) -> Self {
        match turn {
            Seat::Player => Self::new("Your Turn", NoticeKind::Normal),
            Seat::Cpu => Self::new("Opponent's Turn", NoticeKind::Normal),
        }
    }
}

/// Result of one accepted action: the next snapshot and what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub state: GameState,
    pub outcome: Outcome,
    /// The discard pile was recycled into the deck during this action
    pub reshuffled: bool,
}

impl Transition {
    pub fn notice(&self) -> Notice {
        match (&self.outcome, self.state.winner()) {
            (Outcome::Forfeited { .. }, _) => Notice::new("Deck Empty! Draw", NoticeKind::Impact),
            (_, Some(Seat::Player)) => Notice::new("VICTORY!", NoticeKind::Impact),
            (_, Some(Seat::Cpu)) => Notice::new("DEFEAT", NoticeKind::Impact),
            (Outcome::Played { effect, .. }, None) => match effect.banner() {
                Some(banner) => Notice::new(&banner, NoticeKind::Impact),
                None => Notice::for_turn(self.state.turn()),
            },
            (Outcome::Drew { .. }, None) => Notice::for_turn(self.state.turn()),
        }
    }

    pub fn intensity(&self) -> Intensity {
        match &self.outcome {
            Outcome::Played { effect, .. } => effect.intensity,
            Outcome::Drew { .. } => Intensity::Low,
            Outcome::Forfeited { .. } => Intensity::High,
        }
    }
}

fn check_can_act(state: &GameState, seat: Seat) -> Result<(), GameError> {
    if let Some(winner) = state.winner() {
        return Err(GameError::GameAlreadyOver { winner });
    }
    if state.turn() != seat {
        return Err(GameError::NotYourTurn {
            expected: state.turn(),
            actual: seat,
        });
    }
    Ok(())
}

fn reshuffle_seed(seed: u64, round: u32) -> u64 {
    seed ^ (round as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Shuffles everything under the discard top back into the deck.
/// Returns false when there was nothing to recycle.
fn recycle_discard(state: &mut GameState) -> bool {
    let mut cards = state.discard_mut().take_below();
    if cards.is_empty() {
        return false;
    }
    let round = state.bump_reshuffles();
    let mut rng = ChaCha20Rng::seed_from_u64(reshuffle_seed(state.seed(), round));
    cards.shuffle(&mut rng);
    tracing::debug!(cards = cards.len(), round, "discard pile recycled into deck");
    state.deck_mut().refill(cards);
    true
}

fn debug_check_conservation(state: &GameState) {
    debug_assert_eq!(
        state.card_count(),
        DECK_SIZE,
        "card conservation violated: {:?}",
        state
    );
}

/// Plays `card_id` from `seat`'s hand onto the discard pile.
///
/// Rejected with an error (and no new state) when the game is over, when
/// `seat` does not hold the turn, when the card is not in `seat`'s hand or
/// when it does not match the discard top. Otherwise the card's effect is
/// resolved, any forced draw is applied (partially if the deck runs short)
/// and the turn moves on. Emptying the hand wins the game regardless of the
/// card's effect.
///
/// # Examples
///
/// ```
/// use inkflow_engine::engine::play_card;
/// use inkflow_engine::game::GameState;
/// use inkflow_engine::player::Seat;
/// use inkflow_engine::rules::{is_valid_move, RuleSet};
///
/// let rules = RuleSet::default();
/// let state = GameState::new_with_seed(42, &rules).unwrap();
/// let top = *state.top_card();
/// if let Some(card) = state.player_hand().iter().find(|c| is_valid_move(c, &top)) {
///     let t = play_card(&state, &rules, Seat::Player, card.id).unwrap();
///     assert_eq!(t.state.top_card(), card);
///     assert_eq!(t.state.player_hand().len(), 6);
/// }
/// // the input snapshot is never modified
/// assert_eq!(state.player_hand().len(), 7);
/// ```
pub fn play_card(
    state: &GameState,
    rules: &RuleSet,
    seat: Seat,
    card_id: CardId,
) -> Result<Transition, GameError> {
    check_can_act(state, seat)?;
    let card = *state
        .find_in_hand(seat, card_id)
        .ok_or(GameError::CardNotInHand(card_id))?;
    let top = *state.top_card();
    if !is_valid_move(&card, &top) {
        return Err(GameError::IllegalMove { card, top });
    }

    let mut next = state.clone();
    next.hand_mut(seat).retain(|c| c.id != card_id);
    next.discard_mut().push(card);

    let effect = resolve_effect_with(&card, seat, rules);
    let mut reshuffled = false;
    let mut forced_drawn = 0;
    if let Some(draw) = effect.forced_draw {
        if next.deck().len() < draw.count && rules.exhaustion == ExhaustionPolicy::ReshuffleDiscard
        {
            reshuffled = recycle_discard(&mut next);
        }
        let drawn = next.deck_mut().draw_up_to(draw.count);
        forced_drawn = drawn.len();
        if forced_drawn < draw.count {
            tracing::debug!(
                target_seat = %draw.target,
                wanted = draw.count,
                drawn = forced_drawn,
                "forced draw cut short by empty deck"
            );
        }
        next.hand_mut(draw.target).extend(drawn);
    }
    next.set_turn(effect.next_turn);
    if next.hand(seat).is_empty() {
        next.set_winner(seat);
    }
    debug_check_conservation(&next);

    tracing::debug!(
        seat = %seat,
        card = %card,
        effect = ?effect.kind,
        next_turn = %next.turn(),
        winner = ?next.winner(),
        "card played"
    );

    Ok(Transition {
        state: next,
        outcome: Outcome::Played {
            seat,
            card,
            effect,
            forced_drawn,
        },
        reshuffled,
    })
}

/// Draws one card for `seat` and passes the turn to the opponent.
///
/// Guarded like [`play_card`]. When the deck is empty (and the exhaustion
/// policy cannot refill it) the drawer forfeits: the opponent wins and no
/// card moves.
pub fn draw_card(state: &GameState, rules: &RuleSet, seat: Seat) -> Result<Transition, GameError> {
    check_can_act(state, seat)?;

    let mut next = state.clone();
    let mut reshuffled = false;
    if next.deck().is_empty() && rules.exhaustion == ExhaustionPolicy::ReshuffleDiscard {
        reshuffled = recycle_discard(&mut next);
    }

    let outcome = match next.deck_mut().draw() {
        Some(card) => {
            next.hand_mut(seat).push(card);
            next.set_turn(seat.opponent());
            tracing::debug!(seat = %seat, deck_left = next.deck().len(), "card drawn");
            Outcome::Drew { seat, card }
        }
        None => {
            next.set_winner(seat.opponent());
            tracing::debug!(seat = %seat, "draw from empty deck, game forfeited");
            Outcome::Forfeited { seat }
        }
    };
    debug_check_conservation(&next);

    Ok(Transition {
        state: next,
        outcome,
        reshuffled,
    })
}

pub fn apply_action(
    state: &GameState,
    rules: &RuleSet,
    seat: Seat,
    action: PlayerAction,
) -> Result<Transition, GameError> {
    match action {
        PlayerAction::Play(card_id) => play_card(state, rules, seat, card_id),
        PlayerAction::Draw => draw_card(state, rules, seat),
    }
}

/// Owns the current game and applies actions to it one at a time.
///
/// # Examples
///
/// ```
/// use inkflow_engine::engine::Engine;
/// use inkflow_engine::player::Seat;
/// use inkflow_engine::rules::RuleSet;
///
/// let mut engine = Engine::new(Some(12345), RuleSet::default()).unwrap();
/// assert_eq!(engine.state().turn(), Seat::Player);
///
/// // drawing always hands the turn to the opponent
/// let t = engine.draw_card(Seat::Player).unwrap();
/// assert_eq!(t.state.turn(), Seat::Cpu);
/// assert_eq!(engine.state().player_hand().len(), 8);
///
/// // out of turn: rejected, nothing changes
/// let before = engine.state().clone();
/// assert!(engine.draw_card(Seat::Player).is_err());
/// assert_eq!(engine.state(), &before);
/// ```
#[derive(Debug)]
pub struct Engine {
    rules: RuleSet,
    /// Seeds each new game's shuffle
    rng: ChaCha20Rng,
    state: GameState,
    games_started: u32,
}

impl Engine {
    /// The first game is dealt from `seed` itself, so it matches
    /// [`GameState::new_with_seed`] for the same value. Later games draw
    /// their seeds from a stream keyed on it. `None` takes a seed from OS
    /// entropy.
    pub fn new(seed: Option<u64>, rules: RuleSet) -> Result<Self, GameError> {
        rules.validate()?;
        let seed = seed.unwrap_or_else(rand::random);
        let rng = ChaCha20Rng::seed_from_u64(seed);
        let state = GameState::new_with_seed(seed, &rules)?;
        Ok(Self {
            rules,
            rng,
            state,
            games_started: 1,
        })
    }

    /// Throws the current game away and deals a fresh one.
    pub fn start_new_game(&mut self) -> Result<&GameState, GameError> {
        self.state = GameState::new_with_seed(self.rng.random(), &self.rules)?;
        self.games_started += 1;
        tracing::debug!(game = self.games_started, "new game dealt");
        Ok(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    pub fn play_card(&mut self, seat: Seat, card_id: CardId) -> Result<Transition, GameError> {
        self.apply_action(seat, PlayerAction::Play(card_id))
    }

    pub fn draw_card(&mut self, seat: Seat) -> Result<Transition, GameError> {
        self.apply_action(seat, PlayerAction::Draw)
    }

    pub fn apply_action(
        &mut self,
        seat: Seat,
        action: PlayerAction,
    ) -> Result<Transition, GameError> {
        match apply_action(&self.state, &self.rules, seat, action) {
            Ok(transition) => {
                self.state = transition.state.clone();
                Ok(transition)
            }
            Err(e) => {
                tracing::trace!(seat = %seat, action = ?action, error = %e, "action rejected");
                Err(e)
            }
        }
    }
}
