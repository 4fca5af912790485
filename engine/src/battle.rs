use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::{Character, DecisionContext, DecisionProvider, HistoryEntry, Strategy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Victory { winner: String },
    /// Reached through the round cap, or when nobody is left standing.
    Stalemate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchState {
    Running,
    Finished(Outcome),
}

/// Progress notifications handed to the observer of [`BattleEngine::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
    },
    TurnStarted {
        round: u32,
        actor: usize,
    },
    StrategyChosen {
        round: u32,
        actor: usize,
        strategy: Strategy,
        damage: i32,
    },
    RoundFinished {
        round: u32,
    },
    Victory {
        round: u32,
        winner: usize,
    },
    Stalemate {
        rounds: u32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct BattleResult {
    pub outcome: Outcome,
    pub winner: Option<String>,
    pub rounds: u32,
    pub fighters: [Character; 2],
    pub history: Vec<HistoryEntry>,
    pub log: Vec<String>,
}

/// Two fighters, two decision sources, one shared history.
pub struct BattleEngine<A, B> {
    fighters: [Character; 2],
    first: A,
    second: B,
    history: Vec<HistoryEntry>,
    round: u32,
    max_rounds: Option<u32>,
    state: MatchState,
    log: Vec<String>,
}

impl<A: DecisionProvider, B: DecisionProvider> BattleEngine<A, B> {
    /// Fighter 0 is driven by `first` and always acts first in a round.
    ///
    /// A match that starts with a fighter already at 0 health is settled on
    /// the first round without asking for decisions: the survivor wins, or
    /// it is a stalemate when both are down.
    pub fn new(fighters: [Character; 2], first: A, second: B) -> Self {
        Self {
            fighters,
            first,
            second,
            history: Vec::new(),
            round: 1,
            max_rounds: None,
            state: MatchState::Running,
            log: Vec::new(),
        }
    }

    /// End the match as a stalemate once this many rounds passed without a kill.
    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn fighters(&self) -> &[Character; 2] {
        &self.fighters
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Play until someone drops to 0 health (or the round cap is hit).
    pub fn run(
        mut self,
        mut observe: impl FnMut(&BattleEvent, &[Character; 2]),
    ) -> Result<BattleResult> {
        self.log.push(format!(
            "[START] {} (HP {}, INT {}, DEF {}) vs {} (HP {}, INT {}, DEF {})",
            self.fighters[0].name,
            self.fighters[0].health,
            self.fighters[0].intelligence,
            self.fighters[0].defense,
            self.fighters[1].name,
            self.fighters[1].health,
            self.fighters[1].intelligence,
            self.fighters[1].defense,
        ));

        let outcome = loop {
            if let MatchState::Finished(outcome) = &self.state {
                break outcome.clone();
            }
            self.play_round(&mut observe)?;
        };
        let winner = match &outcome {
            Outcome::Victory { winner } => Some(winner.clone()),
            Outcome::Stalemate => None,
        };
        self.log.push(format!(
            "[END] winner={} rounds={} {}={} {}={}",
            winner.as_deref().unwrap_or("none"),
            self.round,
            self.fighters[0].name,
            self.fighters[0].health,
            self.fighters[1].name,
            self.fighters[1].health,
        ));

        Ok(BattleResult {
            outcome,
            winner,
            rounds: self.round,
            fighters: self.fighters,
            history: self.history,
            log: self.log,
        })
    }

    /// One round: fighter 0 then fighter 1. Stops early on a kill.
    pub fn play_round(
        &mut self,
        observe: &mut impl FnMut(&BattleEvent, &[Character; 2]),
    ) -> Result<()> {
        if self.state != MatchState::Running {
            return Ok(());
        }
        let round = self.round;
        if self.settle_without_play(round, observe) {
            return Ok(());
        }
        self.log.push(format!("[ROUND] {}", round));
        observe(&BattleEvent::RoundStarted { round }, &self.fighters);

        for actor in 0..2 {
            if !self.fighters[actor].is_alive() {
                continue;
            }
            observe(&BattleEvent::TurnStarted { round, actor }, &self.fighters);

            let strategy = self.decide(actor)?;
            let damage = self.execute(strategy, actor);
            let name = self.fighters[actor].name.clone();
            self.log
                .push(format!("[TURN][{}] {} (dmg {})", name, strategy, damage));
            info!(round, fighter = %name, %strategy, damage, "turn resolved");
            self.history.push(HistoryEntry::new(name.clone(), strategy));
            let chosen = BattleEvent::StrategyChosen {
                round,
                actor,
                strategy,
                damage,
            };
            observe(&chosen, &self.fighters);

            if !self.fighters[1 - actor].is_alive() {
                self.state = MatchState::Finished(Outcome::Victory { winner: name });
                observe(&BattleEvent::Victory { round, winner: actor }, &self.fighters);
                return Ok(());
            }
        }

        observe(&BattleEvent::RoundFinished { round }, &self.fighters);
        if self.max_rounds.is_some_and(|cap| round >= cap) {
            self.log
                .push(format!("[STALEMATE] no winner after {} rounds", round));
            self.state = MatchState::Finished(Outcome::Stalemate);
            observe(&BattleEvent::Stalemate { rounds: round }, &self.fighters);
            return Ok(());
        }
        self.round += 1;
        Ok(())
    }

    /// Finish immediately when a fighter is already down. Returns true if it did.
    fn settle_without_play(
        &mut self,
        round: u32,
        observe: &mut impl FnMut(&BattleEvent, &[Character; 2]),
    ) -> bool {
        let alive = [self.fighters[0].is_alive(), self.fighters[1].is_alive()];
        match alive {
            [true, true] => false,
            [false, false] => {
                self.log.push("[STALEMATE] nobody is standing".to_string());
                self.state = MatchState::Finished(Outcome::Stalemate);
                observe(&BattleEvent::Stalemate { rounds: round }, &self.fighters);
                true
            }
            _ => {
                let winner = if alive[0] { 0 } else { 1 };
                let name = self.fighters[winner].name.clone();
                self.log.push(format!("[WALKOVER] {} is the only one standing", name));
                self.state = MatchState::Finished(Outcome::Victory { winner: name });
                observe(&BattleEvent::Victory { round, winner }, &self.fighters);
                true
            }
        }
    }

    fn decide(&mut self, actor: usize) -> Result<Strategy> {
        let ctx = DecisionContext {
            actor: &self.fighters[actor],
            opponent: &self.fighters[1 - actor],
            history: &self.history,
            turn: actor,
        };
        if actor == 0 {
            self.first.decide(ctx)
        } else {
            self.second.decide(ctx)
        }
    }

    /// Apply `strategy` for fighter `actor`; returns health removed from the opponent.
    pub fn execute(&mut self, strategy: Strategy, actor: usize) -> i32 {
        let [left, right] = &mut self.fighters;
        let (me, other) = if actor == 0 {
            (left, right)
        } else {
            (right, left)
        };
        let damage = match strategy {
            Strategy::Attack => me.attack(other),
            Strategy::Defense => {
                me.increase_defense();
                0
            }
            Strategy::SuperAttack => me.super_attack(other),
        };
        if damage > 0 {
            let target = &self.fighters[1 - actor];
            self.log.push(format!(
                "[DMG][{}] -{} → {} HP",
                target.name, damage, target.health
            ));
        }
        damage
    }

    /// Apply a raw strategy token. Unknown tokens are ignored and change nothing.
    pub fn apply_token(&mut self, token: &str, actor: usize) -> Option<Strategy> {
        match token.parse::<Strategy>() {
            Ok(strategy) => {
                self.execute(strategy, actor);
                Some(strategy)
            }
            Err(e) => {
                warn!(token, "ignoring strategy: {}", e);
                let name = &self.fighters[actor].name;
                self.log.push(format!("[IGNORED][{}] {}", name, token));
                None
            }
        }
    }
}
