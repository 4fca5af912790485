use std::collections::VecDeque;

use tracing::debug;

use super::{DecisionContext, DecisionProvider};
use crate::error::{BattleError, Result};
use crate::{Interpreter, Strategy, build_prompt};

/// Opaque `prompt -> completion` call.
pub trait TextGenerator {
    fn name(&self) -> &str;

    fn generate(&mut self, prompt: &str) -> Result<String>;
}

/// Prompt, call the generator, interpret the reply.
pub struct ModelProvider<G> {
    generator: G,
    interpreter: Interpreter,
}

impl<G: TextGenerator> ModelProvider<G> {
    pub fn new(generator: G, interpreter: Interpreter) -> Self {
        Self { generator, interpreter }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G: TextGenerator> DecisionProvider for ModelProvider<G> {
    fn label(&self) -> &str {
        self.generator.name()
    }

    fn decide(&mut self, ctx: DecisionContext<'_>) -> Result<Strategy> {
        let prompt = build_prompt(ctx.actor, ctx.opponent, ctx.history, ctx.turn);
        debug!(
            fighter = %ctx.actor.name,
            model = self.generator.name(),
            %prompt,
            "requesting decision"
        );
        let completion = self.generator.generate(&prompt)?;
        Ok(self.interpreter.interpret(&completion, &ctx.actor.name))
    }
}

/// Replays canned completions in order; errors once they run out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGenerator {
    replies: VecDeque<String>,
    served: usize,
    prompts: Vec<String>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            served: 0,
            prompts: Vec::new(),
        }
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        let reply = self
            .replies
            .pop_front()
            .ok_or(BattleError::ScriptExhausted(self.served))?;
        self.served += 1;
        Ok(reply)
    }
}
