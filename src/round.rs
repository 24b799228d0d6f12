use std::time::Instant;

use rand::Rng;

use crate::conversation::{Conversation, IdeaFile, IdeaWriter};
use crate::prompts::{follow_up_prompt, opening_prompt, system_prompt};
use crate::service::{ChatService, CompletionRequest};
use crate::vocabulary::{RoleLabel, RoundPlan};
use crate::{ChatterError, Config, Templates, Usage};

/// What a finished round produced.
#[derive(Clone, Debug)]
pub struct RoundReport {
    /// One-based round number.
    pub round: u64,
    /// The saved conversation.
    pub file: IdeaFile,
    /// Calls made, opening pitch included.
    pub calls_used: usize,
    /// True if the round used every call it was allowed.
    pub budget_exhausted: bool,
    /// Tokens, calls, and time.
    pub usage: Usage,
}

/// The brainstorming context: a service, the templates, and the run's configuration.
///
/// One `Chatter` is built at startup and shared by every round.
pub struct Chatter<S> {
    service: S,
    templates: Templates,
    writer: IdeaWriter,
    config: Config,
}

impl<S: ChatService> Chatter<S> {
    /// Create the context, creating the output directory if necessary.
    pub fn new(service: S, templates: Templates, config: Config) -> Result<Self, ChatterError> {
        if config.max_calls == 0 {
            return Err(ChatterError::invalid_config("max-calls must be at least 1"));
        }
        let writer = IdeaWriter::new(&config.output_dir)?;
        Ok(Self {
            service,
            templates,
            writer,
            config,
        })
    }

    /// The service rounds talk to.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The configuration rounds run under.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one round: an opening pitch and up to `max_calls - 1` critiques, then save.
    ///
    /// Any service error ends the round before anything is written.
    pub async fn round(&self, rng: &mut impl Rng, round: u64) -> Result<RoundReport, ChatterError> {
        let start = Instant::now();
        let max_calls = self.config.max_calls;
        let plan = RoundPlan::draw(rng);
        tracing::info!(
            round,
            service = %self.service.describe(),
            niche = plan.seeds.niche,
            constraint = plan.seeds.constraint,
            hook = plan.seeds.hook,
            "starting round"
        );
        let mut usage = Usage::new();
        let mut conversation = Conversation::default();

        let opener = RoleLabel::initiating();
        let prompt = opening_prompt(&self.templates, &plan.seeds);
        let text = self.turn(round, &opener, prompt, &mut usage).await?;
        conversation.push(opener, text);

        for index in 0..max_calls - 1 {
            if usage.calls >= max_calls {
                break;
            }
            let role = plan.role_for(index);
            let prompt = follow_up_prompt(conversation.last(), role);
            let text = self.turn(round, role, prompt, &mut usage).await?;
            conversation.push(role.clone(), text);
        }

        let timestamp = chrono::Local::now().naive_local();
        let file = self.writer.write(&conversation, &timestamp)?;
        usage.set_wall_clock_time(start.elapsed());
        let tokens = usage.total_tokens();
        tracing::info!(
            round,
            id = %file.id,
            turns = conversation.len(),
            calls = usage.calls,
            input_tokens = tokens.input_tokens,
            output_tokens = tokens.output_tokens,
            elapsed_ms = usage.wall_clock_time.as_millis() as u64,
            "saved idea"
        );
        Ok(RoundReport {
            round,
            file,
            calls_used: usage.calls,
            budget_exhausted: usage.calls >= max_calls,
            usage,
        })
    }

    async fn turn(
        &self,
        round: u64,
        role: &RoleLabel,
        prompt: String,
        usage: &mut Usage,
    ) -> Result<String, ChatterError> {
        let req = CompletionRequest {
            system: system_prompt().to_string(),
            prompt,
            max_tokens: self.config.max_tokens,
        };
        let completion = self.service.complete(&req).await?;
        usage.increment_calls();
        if let Some(tokens) = completion.usage {
            usage.add_tokens(tokens);
        }
        if completion.text.trim().is_empty() {
            return Err(ChatterError::invalid_response(
                format!("{role} got an empty completion"),
                "Raise --max-tokens or pick a model that answers without tool use",
            ));
        }
        tracing::debug!(
            round,
            turn = usage.calls,
            role = role.as_str(),
            team = role.team(),
            chars = completion.text.len(),
            "turn complete"
        );
        Ok(completion.text)
    }
}
