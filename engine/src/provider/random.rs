use super::{DecisionContext, DecisionProvider};
use crate::error::Result;
use crate::{Interpreter, Strategy};

/// Offline provider: a random legal move that never repeats the fighter's
/// previous one.
pub struct RandomProvider {
    interpreter: Interpreter,
}

impl RandomProvider {
    pub fn new(interpreter: Interpreter) -> Self {
        Self { interpreter }
    }
}

impl DecisionProvider for RandomProvider {
    fn label(&self) -> &str {
        "random"
    }

    fn decide(&mut self, ctx: DecisionContext<'_>) -> Result<Strategy> {
        Ok(self.interpreter.fallback(&ctx.actor.name))
    }
}
