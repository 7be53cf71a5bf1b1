use core::fmt::{Debug, Display};
use core::num::NonZeroU32;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use secret_santa_draw::{
    DrawEngine, DrawStrategy, Fallback, InputError, Participants, RandomizedMatching,
    RejectionSampling, UnknownExclusionPolicy, DEFAULT_MAX_ATTEMPTS,
};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "santa.toml";
pub const ENV_PREFIX: &str = "SANTA_";

pub type BoxedStrategy = Box<dyn DrawStrategy + Send + Sync>;

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    RejectionSampling,
    Matching,
    RejectionSamplingThenMatching,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DrawConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: NonZeroU32,
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default)]
    pub unknown_exclusions: UnknownExclusionPolicy,
    /// Makes draws reproducible.
    pub seed: Option<u64>,
}

const fn default_max_attempts() -> NonZeroU32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            strategy: StrategyKind::default(),
            unknown_exclusions: UnknownExclusionPolicy::default(),
            seed: None,
        }
    }
}

impl DrawConfig {
    #[must_use]
    pub fn strategy(&self) -> BoxedStrategy {
        let sampling = RejectionSampling::new(self.max_attempts);
        match self.strategy {
            StrategyKind::RejectionSampling => Box::new(sampling),
            StrategyKind::Matching => Box::new(RandomizedMatching),
            StrategyKind::RejectionSamplingThenMatching => {
                Box::new(Fallback::new(sampling, RandomizedMatching))
            }
        }
    }

    #[must_use]
    pub fn engine(&self) -> DrawEngine<BoxedStrategy> {
        DrawEngine::with_strategy(self.strategy())
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ParticipantConfig {
    pub id: String,
    #[serde(default)]
    pub excludes: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Tracing filter directives, `RUST_LOG` takes precedence.
    pub log: Option<String>,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub participants: Vec<ParticipantConfig>,
}

impl Config {
    pub fn participants(&self) -> Result<Participants<String>, InputError<String>> {
        Participants::with_policy(
            self.participants
                .iter()
                .map(|participant| (participant.id.clone(), participant.excludes.clone())),
            self.draw.unknown_exclusions,
        )
    }
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

#[must_use]
pub fn providers() -> Figment {
    Figment::new()
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

pub fn get_config() -> Result<Config, ConfigError> {
    Ok(providers().extract()?)
}
