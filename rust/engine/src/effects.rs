//! Rank-driven card effects.
//!
//! Every rank maps to exactly one [`EffectKind`] and every kind to one
//! [`EffectSpec`] row, so the table stays exhaustive: adding a rank or a
//! kind fails to compile until the matches below cover it.
//!
//! | Rank  | Kind        | Turn          | Forced draw       |
//! |-------|-------------|---------------|-------------------|
//! | Jack  | Jump        | actor again   | none              |
//! | Queen | Reverse     | actor again   | none              |
//! | King  | Attack      | opponent      | opponent draws 2  |
//! | Seven | ChangeShape | opponent      | none              |
//! | other | Plain       | opponent      | none              |

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::player::Seat;
use crate::rules::RuleSet;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Jump,
    Reverse,
    Attack,
    ChangeShape,
    Plain,
}

/// How loudly presentation should react to a play.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    High,
}

/// One row of the effect table.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EffectSpec {
    pub keeps_turn: bool,
    pub attacks: bool,
    pub label: Option<&'static str>,
    pub intensity: Intensity,
}

impl EffectKind {
    pub fn for_rank(rank: Rank) -> EffectKind {
        match rank {
            Rank::Jack => EffectKind::Jump,
            Rank::Queen => EffectKind::Reverse,
            Rank::King => EffectKind::Attack,
            Rank::Seven => EffectKind::ChangeShape,
            Rank::Ace
            | Rank::Two
            | Rank::Three
            | Rank::Four
            | Rank::Five
            | Rank::Six
            | Rank::Eight
            | Rank::Nine
            | Rank::Ten => EffectKind::Plain,
        }
    }

    pub fn spec(self) -> EffectSpec {
        match self {
            EffectKind::Jump => EffectSpec {
                keeps_turn: true,
                attacks: false,
                label: Some("JUMP! Play Again"),
                intensity: Intensity::High,
            },
            EffectKind::Reverse => EffectSpec {
                keeps_turn: true,
                attacks: false,
                label: Some("REVERSE! Play Again"),
                intensity: Intensity::High,
            },
            EffectKind::Attack => EffectSpec {
                keeps_turn: false,
                attacks: true,
                label: Some("ATTACK! Opponent draws 2"),
                intensity: Intensity::High,
            },
            EffectKind::ChangeShape => EffectSpec {
                keeps_turn: false,
                attacks: false,
                label: Some("CHANGE SHAPE!"),
                intensity: Intensity::Low,
            },
            EffectKind::Plain => EffectSpec {
                keeps_turn: false,
                attacks: false,
                label: None,
                intensity: Intensity::Low,
            },
        }
    }
}

/// Cards the engine must move from the deck to `target`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ForcedDraw {
    pub target: Seat,
    pub count: usize,
}

/// Turn transition and side effects of playing a card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct Resolution {
    pub kind: EffectKind,
    pub next_turn: Seat,
    pub forced_draw: Option<ForcedDraw>,
    /// Table label; the attack row names the default count
    pub label: Option<&'static str>,
    pub intensity: Intensity,
}

impl Resolution {
    /// Text to show for this play. An attack names the count actually
    /// forced under the table's rules.
    pub fn banner(&self) -> Option<String> {
        match (self.kind, self.forced_draw) {
            (EffectKind::Attack, Some(draw)) => {
                Some(format!("ATTACK! Opponent draws {}", draw.count))
            }
            _ => self.label.map(str::to_string),
        }
    }
}

/// Resolves `card` played by `actor` under the default rules.
pub fn resolve_effect(card: &Card, actor: Seat) -> Resolution {
    resolve_effect_with(card, actor, &RuleSet::default())
}

/// Resolves `card` played by `actor`. Pure: the caller applies the draw.
pub fn resolve_effect_with(card: &Card, actor: Seat, rules: &RuleSet) -> Resolution {
    let kind = EffectKind::for_rank(card.rank);
    let spec = kind.spec();
    let next_turn = if spec.keeps_turn {
        actor
    } else {
        actor.opponent()
    };
    let forced_draw = spec.attacks.then(|| ForcedDraw {
        target: actor.opponent(),
        count: rules.attack_draw,
    });
    Resolution {
        kind,
        next_turn,
        forced_draw,
        label: spec.label,
        intensity: spec.intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{all_ranks, CardId, Suit};

    fn card(rank: Rank) -> Card {
        Card::new(CardId::new(0), Suit::Tiger, rank)
    }

    #[test]
    fn jack_and_queen_keep_the_turn() {
        for rank in [Rank::Jack, Rank::Queen] {
            let r = resolve_effect(&card(rank), Seat::Cpu);
            assert_eq!(r.next_turn, Seat::Cpu);
            assert_eq!(r.forced_draw, None);
            assert_eq!(r.intensity, Intensity::High);
        }
        assert_eq!(resolve_effect(&card(Rank::Jack), Seat::Player).label, Some("JUMP! Play Again"));
        assert_eq!(
            resolve_effect(&card(Rank::Queen), Seat::Player).label,
            Some("REVERSE! Play Again")
        );
    }

    #[test]
    fn king_attacks_the_opponent() {
        let r = resolve_effect(&card(Rank::King), Seat::Player);
        assert_eq!(r.kind, EffectKind::Attack);
        assert_eq!(r.next_turn, Seat::Cpu);
        assert_eq!(
            r.forced_draw,
            Some(ForcedDraw {
                target: Seat::Cpu,
                count: 2
            })
        );
        assert_eq!(r.label, Some("ATTACK! Opponent draws 2"));
        assert_eq!(r.banner().as_deref(), Some("ATTACK! Opponent draws 2"));
    }

    #[test]
    fn attack_size_follows_rules() {
        let rules = RuleSet {
            attack_draw: 4,
            ..RuleSet::default()
        };
        let r = resolve_effect_with(&card(Rank::King), Seat::Cpu, &rules);
        assert_eq!(
            r.forced_draw,
            Some(ForcedDraw {
                target: Seat::Player,
                count: 4
            })
        );
        assert_eq!(r.banner().as_deref(), Some("ATTACK! Opponent draws 4"));
    }

    #[test]
    fn seven_passes_with_label() {
        let r = resolve_effect(&card(Rank::Seven), Seat::Cpu);
        assert_eq!(r.next_turn, Seat::Player);
        assert_eq!(r.label, Some("CHANGE SHAPE!"));
        assert_eq!(r.intensity, Intensity::Low);
    }

    #[test]
    fn plain_ranks_pass_silently() {
        for rank in all_ranks().into_iter().filter(|r| !r.is_special()) {
            let r = resolve_effect(&card(rank), Seat::Player);
            assert_eq!(r.kind, EffectKind::Plain, "{rank:?}");
            assert_eq!(r.next_turn, Seat::Cpu);
            assert_eq!(r.forced_draw, None);
            assert_eq!(r.label, None);
        }
    }
}
