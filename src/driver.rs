use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use rand::Rng;

use crate::service::{AnthropicService, ChatService, OpenAiCompatible};
use crate::{Chatter, ChatterError, Config, Provider, Templates};

/// Connect to the configured provider and [`run`] until `shutdown` resolves.
///
/// The credential is checked before the templates are read or the output directory is created,
/// so a missing credential leaves nothing behind.
pub async fn brainstorm<F>(config: Config, shutdown: F) -> Result<u64, ChatterError>
where
    F: Future<Output = ()>,
{
    match config.provider {
        Provider::Xai => {
            let service =
                OpenAiCompatible::from_env(config.base_url.as_deref(), config.model.as_deref())?;
            brainstorm_with(service, config, shutdown).await
        }
        Provider::Anthropic => {
            let service = AnthropicService::from_env(config.model.as_deref())?;
            brainstorm_with(service, config, shutdown).await
        }
    }
}

async fn brainstorm_with<S, F>(
    service: S,
    config: Config,
    shutdown: F,
) -> Result<u64, ChatterError>
where
    S: ChatService,
    F: Future<Output = ()>,
{
    let templates = Templates::load(&config.templates)?;
    let mut rng = config.rng();
    let chatter = Chatter::new(service, templates, config)?;
    run(&chatter, &mut rng, shutdown).await
}

/// Run rounds back to back until `shutdown` resolves or a round fails.
///
/// `shutdown` is raced against every round and every pause.  A request still in flight when it
/// resolves is dropped along with its round.  A round that is interrupted leaves nothing on disk;
/// rounds that already finished are untouched.  Returns the number of rounds completed.
pub async fn run<S, F>(
    chatter: &Chatter<S>,
    rng: &mut impl Rng,
    shutdown: F,
) -> Result<u64, ChatterError>
where
    S: ChatService,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let config = chatter.config();
    let mut completed = 0u64;
    loop {
        let round = completed + 1;
        let report = tokio::select! {
            biased;
            _ = shutdown.as_mut() => {
                tracing::info!(round, "interrupted; abandoning round");
                return Ok(completed);
            }
            report = chatter.round(rng, round) => report?,
        };
        completed = round;
        println!(
            "Completed idea {} with {} calls. Saved to {}.",
            report.file.id,
            report.calls_used,
            report.file.path.display()
        );
        if report.budget_exhausted {
            println!(
                "Budget hit. Pausing for {} seconds.",
                config.budget_pause.as_secs()
            );
            if pause(&mut shutdown, config.budget_pause).await {
                return Ok(completed);
            }
        }
        if pause(&mut shutdown, config.round_pause).await {
            return Ok(completed);
        }
    }
}

/// Sleep for `duration`; true if `shutdown` resolved first.
async fn pause<F: Future<Output = ()>>(shutdown: &mut Pin<&mut F>, duration: Duration) -> bool {
    tokio::select! {
        biased;
        _ = shutdown.as_mut() => true,
        _ = tokio::time::sleep(duration) => false,
    }
}
