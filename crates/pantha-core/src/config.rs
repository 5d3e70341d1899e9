use crate::command::Parser;
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Prompt printed before each line of input.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Phrase that switches the session into Pantham Mode.
    #[serde(default = "default_activation")]
    pub activation: String,
    #[serde(default = "default_true")]
    pub banner: bool,
    /// Play the awakening sequence when Pantham Mode turns on.
    #[serde(default = "default_true")]
    pub animation: bool,
}

fn default_version() -> u32 {
    1
}

fn default_prompt() -> String {
    "pantha> ".to_string()
}

fn default_activation() -> String {
    "pantham on".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            prompt: default_prompt(),
            activation: default_activation(),
            banner: true,
            animation: true,
        }
    }
}

impl Config {
    /// Load `<home>/.pantha/config.yaml`. A missing file yields the defaults.
    pub fn load(home: &Path) -> Result<Self> {
        let path = paths::config_path(home);
        let Some(data) = crate::io::read_if_exists(&path)? else {
            return Ok(Self::default());
        };
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, home: &Path) -> Result<()> {
        let path = paths::config_path(home);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.activation.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "activation phrase is empty".to_string(),
            });
        } else if let Ok(Some(cmd)) = Parser::without_activation().parse(&self.activation) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "activation phrase '{}' collides with the built-in '{}' command",
                    self.activation.trim(),
                    cmd.name()
                ),
            });
        }

        if self.prompt.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "prompt is empty".to_string(),
            });
        }

        warnings
    }

    /// Validate, then reset the activation phrase to the default if any
    /// error was found. Returns everything `validate` reported.
    pub fn repair(&mut self) -> Vec<ConfigWarning> {
        let warnings = self.validate();
        if warnings.iter().any(|w| w.level == WarnLevel::Error) {
            self.activation = default_activation();
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
