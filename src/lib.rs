#![deny(missing_docs)]

//! Chatter: rounds of model-driven idea generation and critique, saved to disk.
//!
//! Each round seeds an opening pitch with a random niche, constraint, and creative hook, then
//! hands the most recent response to a rotating cast of critics until the call budget is spent.
//! The whole conversation is then written to its own file under the output directory.
//!
//! # Core Concepts
//!
//! - **Templates**: the mission statement and role roster every opening pitch is built from
//! - **RoundPlan**: the random choices for one round, drawn from a single seedable RNG
//! - **ChatService**: one request in, one completion out; xAI and Anthropic are provided
//! - **Chatter**: the context that runs a round and writes its idea file
//! - **run**: the outer loop, which stops cleanly when its shutdown future resolves
//! - **brainstorm**: picks the configured backend and calls `run`
//!
//! # Example
//!
//! ```no_run
//! use chatter::{run, Chatter, Config, OpenAiCompatible, Templates};
//!
//! # async fn example() -> Result<(), chatter::ChatterError> {
//! let config = Config::default();
//! let templates = Templates::load(&config.templates)?;
//! let service = OpenAiCompatible::from_env(None, None)?;
//! let mut rng = config.rng();
//! let chatter = Chatter::new(service, templates, config)?;
//! run(&chatter, &mut rng, async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

/// Turns, conversations, and idea files
pub mod conversation;

/// Prompt assembly
pub mod prompts;

/// Chat-completion backends
pub mod service;

/// Seed vocabularies and the role pool
pub mod vocabulary;

mod config;
mod driver;
mod errors;
mod round;
mod templates;
mod usage;

pub use config::{Config, Options, Provider};
pub use conversation::{Conversation, IdeaFile, IdeaId, IdeaWriter, Turn};
pub use driver::{brainstorm, run};
pub use errors::ChatterError;
pub use round::{Chatter, RoundReport};
pub use service::{AnthropicService, ChatService, Completion, CompletionRequest, OpenAiCompatible};
pub use templates::{Templates, MISSION_FILE, ROLES_FILE};
pub use usage::{TokenUsage, Usage};
pub use vocabulary::{RoleLabel, RoundPlan, Seeds};
