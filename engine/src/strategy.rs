use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three moves a fighter can make on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Attack,
    Defense,
    SuperAttack,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Attack, Strategy::Defense, Strategy::SuperAttack];

    pub fn token(self) -> &'static str {
        match self {
            Strategy::Attack => "attack",
            Strategy::Defense => "defense",
            Strategy::SuperAttack => "super_attack",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected attack, defense or super_attack)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attack" => Ok(Strategy::Attack),
            "defense" => Ok(Strategy::Defense),
            "super_attack" => Ok(Strategy::SuperAttack),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// One executed turn. The match history is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub strategy: Strategy,
}

impl HistoryEntry {
    pub fn new(name: impl Into<String>, strategy: Strategy) -> Self {
        Self { name: name.into(), strategy }
    }
}
