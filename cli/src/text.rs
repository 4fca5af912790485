use std::{fs, path::Path};

use anyhow::Context;
use battle_engine::api::{BattleConfig, ConfigFormat};
use encoding_rs::Encoding;

/// Read a text file, honouring a UTF-8/UTF-16 BOM if present.
pub fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

/// Config from `path`, or the built-in default when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<BattleConfig> {
    match path {
        Some(p) => {
            let text = read_text_auto(p)?;
            BattleConfig::parse(&text, ConfigFormat::from_path(p))
                .with_context(|| format!("invalid battle config: {}", p.display()))
        }
        None => Ok(BattleConfig::default()),
    }
}
