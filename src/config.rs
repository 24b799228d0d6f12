use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::ChatterError;

/// Which chat-completion backend rounds talk to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Provider {
    /// xAI through its OpenAI-compatible endpoint.
    #[default]
    Xai,
    /// Anthropic through claudius.
    Anthropic,
}

impl FromStr for Provider {
    type Err = ChatterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xai" | "grok" => Ok(Provider::Xai),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            _ => Err(ChatterError::invalid_config(format!(
                "unknown provider {s:?}; expected \"xai\" or \"anthropic\""
            ))),
        }
    }
}

/// Command-line options.  Every option has a default; none are required.
#[derive(Clone, Default, Debug, Eq, PartialEq, arrrg_derive::CommandLine)]
pub struct Options {
    #[arrrg(optional, "The service to brainstorm with: xai (default) or anthropic.")]
    provider: Option<String>,
    #[arrrg(optional, "The model to request; defaults depend on the provider.")]
    model: Option<String>,
    #[arrrg(optional, "Base URL of the OpenAI-compatible endpoint.")]
    base_url: Option<String>,
    #[arrrg(optional, "Calls per idea, including the opening pitch (default 15).")]
    max_calls: Option<usize>,
    #[arrrg(optional, "Output token cap per call (default 1200).")]
    max_tokens: Option<u32>,
    #[arrrg(optional, "Directory that receives idea files (default ideas).")]
    output_dir: Option<String>,
    #[arrrg(optional, "Directory holding mission_statement.txt and team_roles.txt.")]
    templates: Option<String>,
    #[arrrg(optional, "Seconds to sleep between ideas (default 300).")]
    round_pause_secs: Option<u64>,
    #[arrrg(optional, "Seconds to sleep after an idea uses its whole budget (default 300).")]
    budget_pause_secs: Option<u64>,
    #[arrrg(optional, "Seed for niche, constraint, hook, and role order.")]
    seed: Option<u64>,
}

impl Options {
    /// Resolve defaults and validate.
    pub fn config(&self) -> Result<Config, ChatterError> {
        let defaults = Config::default();
        let provider = match self.provider.as_deref() {
            Some(provider) => provider.parse()?,
            None => defaults.provider,
        };
        let max_calls = self.max_calls.unwrap_or(defaults.max_calls);
        if max_calls == 0 {
            return Err(ChatterError::invalid_config(
                "max-calls must be at least 1; the opening pitch is a call",
            ));
        }
        let max_tokens = self.max_tokens.unwrap_or(defaults.max_tokens);
        if max_tokens == 0 {
            return Err(ChatterError::invalid_config("max-tokens must be at least 1"));
        }
        Ok(Config {
            provider,
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            max_calls,
            max_tokens,
            output_dir: self
                .output_dir
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            templates: self
                .templates
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or(defaults.templates),
            round_pause: self
                .round_pause_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.round_pause),
            budget_pause: self
                .budget_pause_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.budget_pause),
            seed: self.seed,
        })
    }
}

/// Everything a run needs to know, resolved once at startup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The backend.
    pub provider: Provider,
    /// Model override.
    pub model: Option<String>,
    /// Endpoint override for the OpenAI-compatible backend.
    pub base_url: Option<String>,
    /// Calls per round, opening pitch included.  Always at least 1.
    pub max_calls: usize,
    /// Output token cap per call.
    pub max_tokens: u32,
    /// Where idea files go.
    pub output_dir: PathBuf,
    /// Where the templates come from.
    pub templates: PathBuf,
    /// Sleep between rounds.
    pub round_pause: Duration,
    /// Extra sleep after a round that used its whole budget.
    pub budget_pause: Duration,
    /// Fixed RNG seed, if any.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::Xai,
            model: None,
            base_url: None,
            max_calls: 15,
            max_tokens: 1200,
            output_dir: PathBuf::from("ideas"),
            templates: PathBuf::from("."),
            round_pause: Duration::from_secs(300),
            budget_pause: Duration::from_secs(300),
            seed: None,
        }
    }
}

impl Config {
    /// The single source of randomness for a run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
