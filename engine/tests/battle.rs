use std::cell::Cell;
use std::rc::Rc;

use battle_engine::error::Result;
use battle_engine::provider::{ModelProvider, ScriptedGenerator};
use battle_engine::{
    BattleEngine, BattleError, BattleEvent, Character, DecisionContext, DecisionProvider, Dice,
    Interpreter, MatchState, Outcome, Strategy,
};

/// Always plays the same move and counts how often it was asked.
struct Fixed {
    strategy: Strategy,
    calls: Rc<Cell<u32>>,
}

fn fixed(strategy: Strategy) -> (Fixed, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let provider = Fixed {
        strategy,
        calls: calls.clone(),
    };
    (provider, calls)
}

impl DecisionProvider for Fixed {
    fn label(&self) -> &str {
        "fixed"
    }

    fn decide(&mut self, _ctx: DecisionContext<'_>) -> Result<Strategy> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.strategy)
    }
}

fn mirrored() -> [Character; 2] {
    [Character::new("A", 100, 100, 50), Character::new("B", 100, 100, 50)]
}

fn scripted(replies: &[&str]) -> ModelProvider<ScriptedGenerator> {
    ModelProvider::new(
        ScriptedGenerator::new(replies.iter().copied()),
        Interpreter::new(Dice::from_seed(5)),
    )
}

#[test]
fn mirrored_attackers_end_in_round_two_with_first_mover_winning() {
    let (a, a_calls) = fixed(Strategy::Attack);
    let (b, b_calls) = fixed(Strategy::Attack);
    let res = BattleEngine::new(mirrored(), a, b).run(|_, _| {}).unwrap();

    assert_eq!(res.outcome, Outcome::Victory { winner: "A".into() });
    assert_eq!(res.winner.as_deref(), Some("A"));
    assert_eq!(res.rounds, 2);
    assert_eq!(res.fighters[0].health, 45);
    assert_eq!(res.fighters[1].health, 0);
    assert_eq!(a_calls.get(), 2);
    // B dies before its second turn
    assert_eq!(b_calls.get(), 1);
    assert_eq!(res.history.len(), 3);
}

#[test]
fn late_mover_can_win() {
    let (a, a_calls) = fixed(Strategy::Defense);
    let (b, _) = fixed(Strategy::SuperAttack);
    let res = BattleEngine::new(mirrored(), a, b).run(|_, _| {}).unwrap();

    assert_eq!(res.winner.as_deref(), Some("B"));
    assert_eq!(res.rounds, 10);
    assert_eq!(a_calls.get(), 10);
    assert_eq!(res.fighters[0].health, 0);
    assert_eq!(res.fighters[0].defense, 150);
    assert_eq!(res.history.len(), 20);
}

#[test]
fn no_decision_is_requested_after_a_kill() {
    let fighters = [Character::new("A", 100, 100, 50), Character::new("B", 10, 100, 50)];
    let (a, _) = fixed(Strategy::SuperAttack);
    let (b, b_calls) = fixed(Strategy::Attack);
    let mut events = Vec::new();
    let res = BattleEngine::new(fighters, a, b)
        .run(|ev, _| events.push(ev.clone()))
        .unwrap();

    assert_eq!(b_calls.get(), 0);
    assert_eq!(res.rounds, 1);
    assert_eq!(
        events,
        vec![
            BattleEvent::RoundStarted { round: 1 },
            BattleEvent::TurnStarted { round: 1, actor: 0 },
            BattleEvent::StrategyChosen {
                round: 1,
                actor: 0,
                strategy: Strategy::SuperAttack,
                damage: 10,
            },
            BattleEvent::Victory { round: 1, winner: 0 },
        ]
    );
}

#[test]
fn every_executed_move_is_recorded_in_order() {
    let (a, _) = fixed(Strategy::Defense);
    let (b, _) = fixed(Strategy::Defense);
    let res = BattleEngine::new(mirrored(), a, b)
        .with_max_rounds(Some(2))
        .run(|_, _| {})
        .unwrap();

    let names: Vec<_> = res.history.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "A", "B"]);
    assert!(res.history.iter().all(|h| h.strategy == Strategy::Defense));
}

#[test]
fn round_cap_ends_a_defensive_standoff() {
    let (a, _) = fixed(Strategy::Defense);
    let (b, _) = fixed(Strategy::Defense);
    let res = BattleEngine::new(mirrored(), a, b)
        .with_max_rounds(Some(5))
        .run(|_, _| {})
        .unwrap();

    assert_eq!(res.outcome, Outcome::Stalemate);
    assert_eq!(res.winner, None);
    assert_eq!(res.rounds, 5);
    assert_eq!(res.fighters[0].defense, 100);
    assert_eq!(res.fighters[1].health, 100);
    assert!(res.log.iter().any(|l| l.starts_with("[STALEMATE]")));
}

#[test]
fn single_round_plays_both_fighters_in_order() {
    let a = scripted(&["attack", "attack"]);
    let b = scripted(&["super_attack please"]);
    let mut engine = BattleEngine::new(mirrored(), a, b);
    engine.play_round(&mut |_, _| {}).unwrap();

    assert_eq!(engine.history().len(), 2);
    // "super_attack" resolves to a regular attack
    assert_eq!(engine.history()[1].strategy, Strategy::Attack);
    assert_eq!(engine.fighters()[0].health, 45);
    assert_eq!(engine.round(), 2);
    assert_eq!(engine.state(), &MatchState::Running);
}

#[test]
fn generator_failure_aborts_the_match() {
    let a = scripted(&["attack"]);
    let b = scripted(&[]);
    let err = BattleEngine::new(mirrored(), a, b).run(|_, _| {}).unwrap_err();
    assert!(matches!(err, BattleError::ScriptExhausted(0)));
}

#[test]
fn unknown_tokens_are_ignored() {
    let (a, _) = fixed(Strategy::Attack);
    let (b, _) = fixed(Strategy::Attack);
    let mut engine = BattleEngine::new(mirrored(), a, b);

    assert_eq!(engine.apply_token("heal", 0), None);
    assert_eq!(engine.fighters(), &mirrored());

    assert_eq!(engine.apply_token("SUPER_ATTACK", 1), Some(Strategy::SuperAttack));
    assert_eq!(engine.fighters()[0].health, 90);
    assert_eq!(engine.apply_token("Defense", 0), Some(Strategy::Defense));
    assert_eq!(engine.fighters()[0].defense, 60);
}

#[test]
fn result_serializes_with_outcome_tag() {
    let (a, _) = fixed(Strategy::Attack);
    let (b, _) = fixed(Strategy::Attack);
    let res = BattleEngine::new(mirrored(), a, b).run(|_, _| {}).unwrap();
    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(json["outcome"]["kind"], "victory");
    assert_eq!(json["outcome"]["winner"], "A");
    assert_eq!(json["history"][0]["strategy"], "attack");
}

#[test]
fn model_provider_sends_the_rendered_prompt() {
    use battle_engine::build_prompt;

    let [a, b] = mirrored();
    let history = vec![battle_engine::HistoryEntry::new("B", Strategy::Defense)];
    let mut provider = scripted(&["nothing useful"]);
    let ctx = DecisionContext {
        actor: &a,
        opponent: &b,
        history: &history,
        turn: 0,
    };

    let choice = provider.decide(ctx).unwrap();
    assert_ne!(choice, Strategy::Attack);
    assert_eq!(
        provider.generator().prompts(),
        [build_prompt(&a, &b, &history, 0)]
    );
}

#[test]
fn two_fallen_fighters_end_in_a_stalemate_without_decisions() {
    let fighters = [Character::new("A", 0, 100, 50), Character::new("B", -3, 100, 50)];
    let (a, a_calls) = fixed(Strategy::Attack);
    let (b, b_calls) = fixed(Strategy::Attack);
    let mut events = Vec::new();
    let res = BattleEngine::new(fighters, a, b)
        .run(|ev, _| events.push(ev.clone()))
        .unwrap();

    assert_eq!(res.outcome, Outcome::Stalemate);
    assert_eq!(res.winner, None);
    assert_eq!((a_calls.get(), b_calls.get()), (0, 0));
    assert!(res.history.is_empty());
    assert_eq!(events, vec![BattleEvent::Stalemate { rounds: 1 }]);
    assert!(res.log.iter().any(|l| l.starts_with("[STALEMATE]")));
}

#[test]
fn lone_survivor_wins_by_walkover() {
    let fighters = [Character::new("A", 0, 100, 50), Character::new("B", 100, 100, 50)];
    let (a, a_calls) = fixed(Strategy::Attack);
    let (b, b_calls) = fixed(Strategy::Attack);
    let mut events = Vec::new();
    let res = BattleEngine::new(fighters, a, b)
        .run(|ev, _| events.push(ev.clone()))
        .unwrap();

    assert_eq!(res.winner.as_deref(), Some("B"));
    assert_eq!((a_calls.get(), b_calls.get()), (0, 0));
    assert_eq!(res.rounds, 1);
    assert_eq!(events, vec![BattleEvent::Victory { round: 1, winner: 1 }]);
}
