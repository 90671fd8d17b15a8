use std::{collections::HashMap, path::PathBuf};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::issuer::GENERATOR_ID;
use crate::model::TemplateName;
use resolve_path::PathResolveExt;

#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    /// Путь до журнала выданных номеров.
    pub state_path: PathBuf,

    /// Именованные шаблоны номеров.
    #[serde(default)]
    pub templates: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("./numbers.json"),
            templates: HashMap::from([(GENERATOR_ID.to_owned(), "{Y}-{cy,4}".to_owned())]),
        }
    }
}

impl Config {
    /// Возвращает шаблон по имени.
    pub fn template(&self, name: &TemplateName) -> anyhow::Result<&str> {
        self.templates
            .get(name.as_str())
            .map(String::as_str)
            .ok_or(anyhow!("template {} not found", name))
    }
}

/// Загружает конфигурацию.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let mut cfg: Config = confy::load_path(path)?;

    normalize(&mut cfg)?;

    Ok(cfg)
}

pub fn normalize(cfg: &mut Config) -> anyhow::Result<()> {
    // Чтобы правильно обработать относительные пути.
    cfg.state_path = cfg.state_path.try_resolve()?.into_owned();

    for name in cfg.templates.keys() {
        TemplateName::new(name).map_err(|e| e.context(format!("template name {:?}", name)))?;
    }

    Ok(())
}
