use std::time::Duration;

/// Token counts reported by the service for a single completion.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub input_tokens: u64,
    /// Tokens in the completion.
    pub output_tokens: u64,
}

impl std::ops::Add for TokenUsage {
    type Output = TokenUsage;

    fn add(self, rhs: Self) -> Self::Output {
        TokenUsage {
            input_tokens: self.input_tokens + rhs.input_tokens,
            output_tokens: self.output_tokens + rhs.output_tokens,
        }
    }
}

/// What one brainstorming round cost.
///
/// `tokens` stays `None` until some completion reports its token counts.
#[derive(Debug, Clone, Default)]
pub struct Usage {
    /// Summed over every completion that reported tokens.
    pub tokens: Option<TokenUsage>,
    /// From the round's first draw to its saved file.
    pub wall_clock_time: Duration,
    /// Completions requested, failed ones excluded.
    pub calls: usize,
}

impl Usage {
    /// Nothing spent yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one completion's token counts into the round's.
    pub fn add_tokens(&mut self, usage: TokenUsage) {
        self.tokens = Some(match self.tokens {
            Some(existing) => existing + usage,
            None => usage,
        });
    }

    /// Token totals, zero when nothing was reported.
    pub fn total_tokens(&self) -> TokenUsage {
        self.tokens.unwrap_or_default()
    }

    /// Count one completed call.
    pub fn increment_calls(&mut self) {
        self.calls += 1;
    }

    /// Record how long the round took.
    pub fn set_wall_clock_time(&mut self, duration: Duration) {
        self.wall_clock_time = duration;
    }
}
