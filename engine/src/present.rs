//! Terminal rendering. Read-only over fighter snapshots; nothing here feeds
//! back into the match.

use owo_colors::OwoColorize;

use crate::{Character, Strategy};

pub const BAR_LENGTH: usize = 20;
/// Value drawn as a full bar.
pub const BAR_SCALE: i32 = 100;

/// Number of filled cells for `value` out of `max`, clamped to the bar.
pub fn filled_cells(value: i32, max: i32, length: usize) -> usize {
    if max <= 0 {
        return 0;
    }
    let filled = (length as f64 * value as f64 / max as f64).round();
    filled.clamp(0.0, length as f64) as usize
}

/// Green cells for the filled part, red for the rest.
pub fn attribute_bar(value: i32, max: i32, length: usize) -> String {
    let filled = filled_cells(value, max, length);
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "█".repeat(length - filled).red()
    )
}

/// Side-by-side health, intelligence and defense for both fighters.
pub fn stats_table(fighters: &[Character; 2]) -> String {
    let [left, right] = fighters;
    let mut out = format!("{}\n", format!("{:<15} {:>20}", "Attribute", "Value").cyan());
    let rows: [(&str, fn(&Character) -> i32); 3] = [
        ("Health", |c| c.health),
        ("Intelligence", |c| c.intelligence),
        ("Defense", |c| c.defense),
    ];
    for (label, get) in rows {
        let (lv, rv) = (get(left), get(right));
        out.push_str(&format!(
            "{} {} {} {}\n",
            format!("{}:", left.name).yellow(),
            attribute_bar(lv, BAR_SCALE, BAR_LENGTH),
            format!("{}:", right.name).yellow(),
            attribute_bar(rv, BAR_SCALE, BAR_LENGTH),
        ));
        out.push_str(&format!(
            "{:<15} {:>20}\n",
            format!("{}: {}", label, lv),
            format!("{}: {}", label, rv)
        ));
    }
    out
}

pub fn introduction(fighters: &[Character; 2]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "Welcome to the Battle Game!".cyan()));
    out.push_str("Get ready to watch a showdown between two characters controlled by AI:\n");
    out.push_str(&format!("1. {}\n2. {}\n\n", fighters[0].name, fighters[1].name));
    out.push_str("Each character has these important qualities:\n");
    out.push_str("- Health: How much damage they can take before losing.\n");
    out.push_str("- Intelligence: How effective their attacks are.\n");
    out.push_str("- Defense: How well they can defend against attacks.\n\n");
    out.push_str("Here are the moves they can make:\n");
    out.push_str(&format!("- {} Try to hurt the other character.\n", "Attack:".green()));
    out.push_str(&format!("- {} Protect themselves from damage.\n", "Defense:".yellow()));
    out.push_str(&format!(
        "- {} A powerful move that hurts the opponent a lot.\n\n",
        "Super Attack:".red()
    ));
    out.push_str("The game goes on in rounds. Each round, the characters pick their moves.\n");
    out.push_str("After each round, you'll see what happened and what choices were made.\n");
    out
}

pub fn press_enter() -> String {
    "Press Enter to start the game...".red().to_string()
}

pub fn round_banner(round: u32) -> String {
    format!("\nStarting Round {}...", round)
}

pub fn turn_banner(name: &str) -> String {
    format!("\n{}", format!("{}'s turn to play:", name).red())
}

pub fn choice_line(name: &str, strategy: Strategy) -> String {
    format!("{} {}", format!("{} chooses to", name).yellow(), strategy.bright_blue())
}

pub fn victory_line(name: &str) -> String {
    format!("\n{}", format!("{} wins the game!", name).green())
}

pub fn stalemate_line(rounds: u32) -> String {
    format!("\n{}", format!("No winner after {} rounds.", rounds).yellow())
}
