use std::{path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::provider::bedrock::DEFAULT_REGION;
use crate::provider::{
    BedrockSettings, DecisionProvider, JurassicClient, ModelProvider, RandomProvider,
    ScriptedGenerator, TitanClient,
};
use crate::{BattleEngine, BattleEvent, BattleResult, Character, Dice, Interpreter};

const DEFAULT_HEALTH: i32 = 100;
const DEFAULT_INTELLIGENCE: i32 = 100;
const DEFAULT_DEFENSE: i32 = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Which decision source drives a fighter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderKind {
    Titan,
    Jurassic,
    Random,
    /// Canned completions fed through the interpreter, no network.
    Scripted { completions: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FighterConfig {
    pub name: String,
    #[serde(default = "default_health")]
    pub health: i32,
    #[serde(default = "default_intelligence")]
    pub intelligence: i32,
    #[serde(default = "default_defense")]
    pub defense: i32,
    pub provider: ProviderKind,
}

impl FighterConfig {
    pub fn character(&self) -> Character {
        Character::new(self.name.clone(), self.health, self.intelligence, self.defense)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleConfig {
    #[serde(default = "default_fighters")]
    pub fighters: [FighterConfig; 2],
    /// Seed for the fallback RNG; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_rounds: Option<u32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            fighters: default_fighters(),
            seed: None,
            max_rounds: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            region: default_region(),
            endpoint: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.json` is JSON, anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl BattleConfig {
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self> {
        let cfg: BattleConfig = match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(text).context("failed to parse battle config YAML")?
            }
            ConfigFormat::Json => {
                serde_json::from_str(text).context("failed to parse battle config JSON")?
            }
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let [a, b] = &self.fighters;
        if a.name.trim().is_empty() || b.name.trim().is_empty() {
            bail!("fighter names must not be empty");
        }
        if a.name == b.name {
            bail!("fighter names must be unique, got '{}' twice", a.name);
        }
        if a.health <= 0 || b.health <= 0 {
            bail!("fighters must start with positive health");
        }
        if self.max_rounds == Some(0) {
            bail!("max_rounds must be at least 1");
        }
        Ok(())
    }

    pub fn characters(&self) -> [Character; 2] {
        [self.fighters[0].character(), self.fighters[1].character()]
    }

    fn bedrock_settings(&self) -> Result<BedrockSettings> {
        Ok(BedrockSettings::from_env(
            &self.region,
            self.endpoint.clone(),
            Duration::from_secs(self.timeout_secs),
        )?)
    }

    /// Build the decision source for fighter `index`.
    ///
    /// Each provider gets its own interpreter; with a seed, fighter 1's
    /// stream is offset so the two do not mirror each other.
    pub fn provider(&self, index: usize) -> Result<Box<dyn DecisionProvider>> {
        let dice = Dice::from_optional_seed(self.seed.map(|s| s.wrapping_add(index as u64)));
        let interpreter = Interpreter::new(dice);
        let provider: Box<dyn DecisionProvider> = match &self.fighters[index].provider {
            ProviderKind::Titan => {
                let client = TitanClient::new(self.bedrock_settings()?)?;
                Box::new(ModelProvider::new(client, interpreter))
            }
            ProviderKind::Jurassic => {
                let client = JurassicClient::new(self.bedrock_settings()?)?;
                Box::new(ModelProvider::new(client, interpreter))
            }
            ProviderKind::Random => Box::new(RandomProvider::new(interpreter)),
            ProviderKind::Scripted { completions } => {
                let script = ScriptedGenerator::new(completions.clone());
                Box::new(ModelProvider::new(script, interpreter))
            }
        };
        Ok(provider)
    }
}

/// Build everything from `cfg` and play one match to the end.
pub fn simulate_battle(
    cfg: &BattleConfig,
    observe: impl FnMut(&BattleEvent, &[Character; 2]),
) -> Result<BattleResult> {
    cfg.validate()?;
    let first = cfg.provider(0).context("failed to set up fighter 1")?;
    let second = cfg.provider(1).context("failed to set up fighter 2")?;
    let engine = BattleEngine::new(cfg.characters(), first, second).with_max_rounds(cfg.max_rounds);
    let result = engine.run(observe).context("battle aborted")?;
    Ok(result)
}

fn default_fighters() -> [FighterConfig; 2] {
    [
        FighterConfig {
            name: "AmazonTitan".into(),
            health: DEFAULT_HEALTH,
            intelligence: DEFAULT_INTELLIGENCE,
            defense: DEFAULT_DEFENSE,
            provider: ProviderKind::Titan,
        },
        FighterConfig {
            name: "Jurassic".into(),
            health: DEFAULT_HEALTH,
            intelligence: DEFAULT_INTELLIGENCE,
            defense: DEFAULT_DEFENSE,
            provider: ProviderKind::Jurassic,
        },
    ]
}

fn default_health() -> i32 {
    DEFAULT_HEALTH
}

fn default_intelligence() -> i32 {
    DEFAULT_INTELLIGENCE
}

fn default_defense() -> i32 {
    DEFAULT_DEFENSE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}
