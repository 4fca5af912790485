use battle_engine::prompt::history_line;
use battle_engine::{build_prompt, Character, HistoryEntry, Strategy};

fn pair() -> (Character, Character) {
    (Character::new("A", 100, 100, 50), Character::new("B", 40, 90, 60))
}

#[test]
fn opening_prompt_has_empty_history() {
    let (a, b) = pair();
    let prompt = build_prompt(&a, &b, &[], 0);
    insta::assert_snapshot!(prompt, @r"
    Round 1, Turn 1, A's turn.
    This is a strategic decision-making simulation. A (You) vs B (Opponent).
    Current stats:
      - A: Intelligence 100, Defense 50
      - B: Intelligence 90, Defense 60
    Game History:
    Please select your strategy. Answer should be one of these options and NOTHING ELSE [attack, defense, super_attack]:
    ");
}

#[test]
fn history_is_narrated_from_the_acting_fighter() {
    let (a, b) = pair();
    let history = vec![
        HistoryEntry::new("A", Strategy::Attack),
        HistoryEntry::new("B", Strategy::Defense),
        HistoryEntry::new("A", Strategy::SuperAttack),
        HistoryEntry::new("B", Strategy::Attack),
    ];
    let prompt = build_prompt(&b, &a, &history, 1);
    insta::assert_snapshot!(prompt, @r"
    Round 5, Turn 2, B's turn.
    This is a strategic decision-making simulation. B (You) vs A (Opponent).
    Current stats:
      - B: Intelligence 90, Defense 60
      - A: Intelligence 100, Defense 50
    Game History:
    Round 1: A chose to attack, which decreased their disadvantage.
    Round 2: B chose to defense, which held steady their advantage.
    Round 3: A chose to super_attack, which held steady their disadvantage.
    Round 4: B chose to attack, which increased their advantage.
    Please select your strategy. Answer should be one of these options and NOTHING ELSE [attack, defense, super_attack]:
    ");
}

#[test]
fn health_is_never_shown() {
    let (a, b) = pair();
    let prompt = build_prompt(&a, &b, &[], 0);
    assert!(!prompt.contains("Health"));
    assert!(!prompt.contains("40"));
}

#[test]
fn own_labels_hold_for_every_round_index() {
    for index in 0..200 {
        let attack = history_line(index, &HistoryEntry::new("A", Strategy::Attack), "A");
        let defend = history_line(index, &HistoryEntry::new("A", Strategy::Defense), "A");
        assert!(attack.ends_with("increased their advantage.\n"));
        assert!(defend.ends_with("held steady their advantage.\n"));
        assert!(attack.starts_with(&format!("Round {}: ", index + 1)));
    }
}

#[test]
fn opponent_super_attack_reads_held_steady() {
    let line = history_line(0, &HistoryEntry::new("B", Strategy::SuperAttack), "A");
    assert_eq!(line, "Round 1: B chose to super_attack, which held steady their disadvantage.\n");
}

#[test]
fn prompt_ends_with_the_answer_instruction() {
    let (a, b) = pair();
    let prompt = build_prompt(&a, &b, &[HistoryEntry::new("A", Strategy::Defense)], 1);
    assert!(prompt.ends_with("NOTHING ELSE [attack, defense, super_attack]:"));
    assert!(prompt.starts_with("Round 2, Turn 2, A's turn.\n"));
}
