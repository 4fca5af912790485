use indexmap::IndexMap;
use tracing::debug;

use crate::{Dice, Strategy};

/// Tokens scanned in order; the first substring hit wins.
///
/// "attack" is checked first, so a reply mentioning "super_attack" resolves
/// to a regular attack.
const SCAN_ORDER: [Strategy; 2] = [Strategy::Attack, Strategy::SuperAttack];

/// Assumed previous move for a fighter that has not chosen yet.
pub const INITIAL_PREVIOUS: Strategy = Strategy::Attack;

/// How a reply was turned into a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched,
    Fallback,
}

/// Maps free-text completions onto a [`Strategy`].
///
/// Remembers the last choice per fighter name so the random fallback never
/// repeats it.
pub struct Interpreter {
    dice: Dice,
    previous: IndexMap<String, Strategy>,
}

impl Interpreter {
    pub fn new(dice: Dice) -> Self {
        Self { dice, previous: IndexMap::new() }
    }

    pub fn previous(&self, name: &str) -> Strategy {
        self.previous.get(name).copied().unwrap_or(INITIAL_PREVIOUS)
    }

    pub fn interpret(&mut self, completion: &str, name: &str) -> Strategy {
        self.interpret_detailed(completion, name).0
    }

    pub fn interpret_detailed(&mut self, completion: &str, name: &str) -> (Strategy, Resolution) {
        let lowered = completion.to_lowercase();
        let (chosen, how) = match SCAN_ORDER.iter().find(|s| lowered.contains(s.token())) {
            Some(&hit) => (hit, Resolution::Matched),
            None => (self.pick_fresh(name), Resolution::Fallback),
        };
        debug!(fighter = name, completion, ?chosen, ?how, "interpreted completion");
        self.previous.insert(name.to_string(), chosen);
        (chosen, how)
    }

    /// Random strategy other than `name`'s previous one, recorded as the new previous.
    pub fn fallback(&mut self, name: &str) -> Strategy {
        let chosen = self.pick_fresh(name);
        self.previous.insert(name.to_string(), chosen);
        chosen
    }

    fn pick_fresh(&mut self, name: &str) -> Strategy {
        let last = self.previous(name);
        let options: Vec<Strategy> = Strategy::ALL.into_iter().filter(|s| *s != last).collect();
        self.dice.pick(&options)
    }
}
