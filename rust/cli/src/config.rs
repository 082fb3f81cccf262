//! Layered configuration: defaults, then an optional TOML file named by
//! `INKFLOW_CONFIG`, then `INKFLOW_*` environment variables. Command-line
//! flags are applied on top by each command.

use inkflow_ai::AVAILABLE_AIS;
use inkflow_engine::rules::{ExhaustionPolicy, HAND_SIZE, RuleSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

pub const CONFIG_ENV: &str = "INKFLOW_CONFIG";
pub const MAX_CPU_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub hand_size: usize,
    pub exhaustion: ExhaustionPolicy,
    pub ai: String,
    pub cpu_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            hand_size: HAND_SIZE,
            exhaustion: ExhaustionPolicy::default(),
            ai: "baseline".into(),
            cpu_delay_ms: 1500,
        }
    }
}

impl Config {
    pub fn rules(&self) -> RuleSet {
        RuleSet {
            hand_size: self.hand_size,
            exhaustion: self.exhaustion,
            ..RuleSet::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub hand_size: ValueSource,
    pub exhaustion: ValueSource,
    pub ai: ValueSource,
    pub cpu_delay_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            hand_size: ValueSource::Default,
            exhaustion: ValueSource::Default,
            ai: ValueSource::Default,
            cpu_delay_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env_value(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.hand_size {
            cfg.hand_size = v;
            sources.hand_size = ValueSource::File;
        }
        if let Some(v) = f.exhaustion {
            cfg.exhaustion = parse_exhaustion(&v)?;
            sources.exhaustion = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
        if let Some(v) = f.cpu_delay_ms {
            cfg.cpu_delay_ms = v;
            sources.cpu_delay_ms = ValueSource::File;
        }
    }

    if let Some(seed) = env_value("INKFLOW_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(size) = env_value("INKFLOW_HAND_SIZE") {
        cfg.hand_size = size
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid hand size: {}", size)))?;
        sources.hand_size = ValueSource::Env;
    }
    if let Some(policy) = env_value("INKFLOW_EXHAUSTION") {
        cfg.exhaustion = parse_exhaustion(&policy)?;
        sources.exhaustion = ValueSource::Env;
    }
    if let Some(ai) = env_value("INKFLOW_AI") {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }
    if let Some(delay) = env_value("INKFLOW_CPU_DELAY_MS") {
        cfg.cpu_delay_ms = delay
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid cpu delay: {}", delay)))?;
        sources.cpu_delay_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    hand_size: Option<usize>,
    #[serde(default)]
    exhaustion: Option<String>,
    #[serde(default)]
    ai: Option<String>,
    #[serde(default)]
    cpu_delay_ms: Option<u64>,
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

pub fn parse_exhaustion(s: &str) -> Result<ExhaustionPolicy, ConfigError> {
    ExhaustionPolicy::parse(s).ok_or_else(|| {
        ConfigError::Invalid(format!(
            "Invalid exhaustion policy '{}': expected forfeit or reshuffle",
            s
        ))
    })
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.rules()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    if !AVAILABLE_AIS.contains(&cfg.ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown ai '{}' (available: {})",
            cfg.ai,
            AVAILABLE_AIS.join(", ")
        )));
    }
    if cfg.cpu_delay_ms > MAX_CPU_DELAY_MS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: cpu_delay_ms must be <= {}",
            MAX_CPU_DELAY_MS
        )));
    }
    Ok(())
}
