//! Sources of per-turn decisions.
//!
//! The engine only sees [`DecisionProvider`]; whether a move comes from a
//! remote model, canned replies or a coin flip is up to the implementation.

pub mod bedrock;
pub mod model;
pub mod random;

pub use bedrock::{BedrockSettings, JurassicClient, TitanClient};
pub use model::{ModelProvider, ScriptedGenerator, TextGenerator};
pub use random::RandomProvider;

use crate::error::Result;
use crate::{Character, HistoryEntry, Strategy};

/// Everything a provider may look at when choosing a move.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub actor: &'a Character,
    pub opponent: &'a Character,
    pub history: &'a [HistoryEntry],
    /// Index of the acting fighter within the round (0 or 1).
    pub turn: usize,
}

pub trait DecisionProvider {
    /// Short label used in logs.
    fn label(&self) -> &str;

    fn decide(&mut self, ctx: DecisionContext<'_>) -> Result<Strategy>;
}

impl<P: DecisionProvider + ?Sized> DecisionProvider for Box<P> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn decide(&mut self, ctx: DecisionContext<'_>) -> Result<Strategy> {
        (**self).decide(ctx)
    }
}
