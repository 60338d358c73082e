use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quote_spec::{AnswerMap, PriceTable, QuoteForm, cleaning_quote_form};
use serde::Deserialize;

/// On-disk TOML layout; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    form: Option<PathBuf>,
    prices: PriceTable,
}

/// Resolved configuration: the master question list and price tables.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    pub form: QuoteForm,
    pub form_source: Option<PathBuf>,
    pub prices: PriceTable,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            form: cleaning_quote_form(),
            form_source: None,
            prices: PriceTable::default(),
        }
    }
}

impl WizardConfig {
    /// Loads `path` when given, otherwise the built-in catalog and prices.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no config file; using built-in catalog");
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&raw, path.parent())
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parses TOML; a relative `form` path resolves against `base_dir`.
    pub fn from_toml_str(raw: &str, base_dir: Option<&Path>) -> Result<Self> {
        let file: ConfigFile = toml::from_str(raw).context("failed to parse config TOML")?;
        file.prices.check()?;
        let config = Self {
            prices: file.prices,
            ..Self::default()
        };
        match file.form {
            Some(form) => {
                let form = match base_dir {
                    Some(base) if form.is_relative() => base.join(form),
                    _ => form,
                };
                config.with_form_file(&form)
            }
            None => Ok(config),
        }
    }

    pub fn with_form_file(mut self, path: &Path) -> Result<Self> {
        self.form = load_form(path)?;
        self.form_source = Some(path.to_path_buf());
        Ok(self)
    }
}

pub fn load_form(path: &Path) -> Result<QuoteForm> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read form {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse form {}", path.display()))
}

pub fn load_answers(path: &Path) -> Result<AnswerMap> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read answers {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse answers {}", path.display()))
}
