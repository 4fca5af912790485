use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod battle;
pub mod character;
pub mod error;
pub mod interpret;
pub mod present;
pub mod prompt;
pub mod provider;
pub mod strategy;

pub use battle::{BattleEngine, BattleEvent, BattleResult, MatchState, Outcome};
pub use character::{Character, BASE_DAMAGE, DEFENSE_STEP, SUPER_ATTACK_DAMAGE};
pub use error::BattleError;
pub use interpret::Interpreter;
pub use prompt::build_prompt;
pub use provider::{DecisionContext, DecisionProvider};
pub use strategy::{HistoryEntry, Strategy};

/// Seeded source of the random fallback choices.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    /// `Some(seed)` is deterministic, `None` draws from OS entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed(s),
            None => Self::from_entropy(),
        }
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<T: Copy>(&mut self, options: &[T]) -> T {
        debug_assert!(!options.is_empty());
        options[self.rng.gen_range(0..options.len())]
    }
}
