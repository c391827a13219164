//! Token usage tracking per pipeline stage.

use std::collections::BTreeMap;

use crate::TokenUsage;

/// Tracks cumulative token usage for one session, split by stage
/// (`"reply"`, `"extraction"`).
#[derive(Debug, Clone, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    by_stage: BTreeMap<&'static str, TokenUsage>,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from a capability call.
    pub fn record(&mut self, stage: &'static str, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.call_count += 1;

        let entry = self.by_stage.entry(stage).or_default();
        entry.input_tokens = entry.input_tokens.saturating_add(usage.input_tokens);
        entry.output_tokens = entry.output_tokens.saturating_add(usage.output_tokens);
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    /// Usage split by stage name.
    pub fn by_stage(&self) -> &BTreeMap<&'static str, TokenUsage> {
        &self.by_stage
    }

    /// Number of capability calls recorded.
    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}
