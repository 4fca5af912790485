use std::fmt::Write;

use crate::{Character, HistoryEntry, Strategy};

const INSTRUCTION: &str = "Please select your strategy. Answer should be one of these options \
                           and NOTHING ELSE [attack, defense, super_attack]:";

/// Render the decision prompt for `me` on turn index `turn` (0 or 1).
///
/// Health is left out on purpose; only intelligence and defense are shown.
/// History lines are phrased from `me`'s point of view: its own attacks
/// "increased their advantage", the opponent's attacks "decreased their
/// disadvantage", anything else (super attacks included) "held steady".
pub fn build_prompt(
    me: &Character,
    opponent: &Character,
    history: &[HistoryEntry],
    turn: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Round {}, Turn {}, {}'s turn.",
        history.len() + 1,
        turn + 1,
        me.name
    );
    let _ = writeln!(
        out,
        "This is a strategic decision-making simulation. {} (You) vs {} (Opponent).",
        me.name, opponent.name
    );
    out.push_str("Current stats:\n");
    for c in [me, opponent] {
        let _ = writeln!(
            out,
            "  - {}: Intelligence {}, Defense {}",
            c.name, c.intelligence, c.defense
        );
    }
    out.push_str("Game History:\n");
    for (index, entry) in history.iter().enumerate() {
        out.push_str(&history_line(index, entry, &me.name));
    }
    out.push_str(INSTRUCTION);
    out
}

/// One narrated history line, newline-terminated.
pub fn history_line(index: usize, entry: &HistoryEntry, perspective: &str) -> String {
    let attacked = entry.strategy == Strategy::Attack;
    let (result, stake) = if entry.name == perspective {
        (if attacked { "increased" } else { "held steady" }, "advantage")
    } else {
        (if attacked { "decreased" } else { "held steady" }, "disadvantage")
    };
    format!(
        "Round {}: {} chose to {}, which {} their {}.\n",
        index + 1,
        entry.name,
        entry.strategy,
        result,
        stake
    )
}
