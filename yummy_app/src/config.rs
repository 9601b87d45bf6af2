use std::collections::HashMap;

use serde::Deserialize;

/// The config file read from the working directory, if present.
pub const CONFIG_FILE: &str = "yummy_app.toml";

/// The prefix for environment variables overriding the config.
/// Nested keys are separated by `__`, f.e. `YUMMY_DISCORD__TOKEN`.
pub const ENV_PREFIX: &str = "YUMMY";

#[derive(Debug, Deserialize)]
pub struct HConfig {
    pub discord: HDiscordConfig,
    #[serde(default)]
    pub bot: HBotConfig,
    #[serde(default)]
    pub log: HLogConfig,
}

#[derive(Debug, Deserialize)]
pub struct HDiscordConfig {
    pub token: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct HBotConfig {
    #[serde(default)]
    pub calc: HCalcConfig,
    #[serde(default)]
    pub regex: HRegexConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HCalcConfig {
    /// Longer results are truncated.
    pub max_output_len: usize,
    /// The most dice a single expression may roll.
    pub max_dice: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HRegexConfig {
    /// Size limit for a compiled pattern, in bytes.
    pub size_limit: usize,
}

#[derive(Debug, Deserialize, Default)]
pub struct HLogConfig {
    pub default: Option<HLogLevel>,
    #[serde(flatten)]
    pub modules: HashMap<String, HLogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for HCalcConfig {
    fn default() -> Self {
        Self {
            max_output_len: 2000,
            max_dice: 1000,
        }
    }
}

impl Default for HRegexConfig {
    fn default() -> Self {
        Self {
            size_limit: 1 << 20,
        }
    }
}

impl From<HLogLevel> for log::LevelFilter {
    fn from(value: HLogLevel) -> log::LevelFilter {
        use log::LevelFilter;
        match value {
            HLogLevel::Off => LevelFilter::Off,
            HLogLevel::Error => LevelFilter::Error,
            HLogLevel::Warn => LevelFilter::Warn,
            HLogLevel::Info => LevelFilter::Info,
            HLogLevel::Debug => LevelFilter::Debug,
            HLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Loads the config from [`CONFIG_FILE`] and the environment.
pub fn load() -> Result<HConfig, config_rs::ConfigError> {
    use config_rs::{Config, Environment, File, FileFormat};

    Config::builder()
        .add_source(File::new(CONFIG_FILE, FileFormat::Toml).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod test {
    use config_rs::{Config, File, FileFormat};

    use super::*;

    fn from_toml(text: &str) -> HConfig {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults() {
        let config = from_toml(r#"
            [discord]
            token = "abc"
        "#);

        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.bot.calc.max_output_len, 2000);
        assert_eq!(config.bot.calc.max_dice, 1000);
        assert_eq!(config.bot.regex.size_limit, 1 << 20);
        assert_eq!(config.log.default, None);
        assert!(config.log.modules.is_empty());
    }

    #[test]
    fn overrides() {
        let config = from_toml(r#"
            [discord]
            token = "abc"

            [bot.calc]
            max_dice = 50

            [log]
            default = "warn"
            dice_math = "trace"
        "#);

        assert_eq!(config.bot.calc.max_output_len, 2000);
        assert_eq!(config.bot.calc.max_dice, 50);
        assert_eq!(config.log.default, Some(HLogLevel::Warn));
        assert_eq!(config.log.modules.get("dice_math"), Some(&HLogLevel::Trace));
        assert_eq!(log::LevelFilter::from(HLogLevel::Trace), log::LevelFilter::Trace);
    }
}
