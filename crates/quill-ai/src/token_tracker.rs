//! Token usage tracking across tools.

use std::collections::HashMap;

use quill_common::Tool;

use crate::TokenUsage;

/// Tracks cumulative token usage per tool.
pub struct TokenTracker {
    /// Total usage across all tools.
    total: TokenUsage,
    /// Usage broken down by tool.
    by_tool: HashMap<Tool, TokenUsage>,
    /// Number of successful API calls.
    call_count: u64,
    /// Number of API calls that ended in an error reply.
    failed_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self {
            total: TokenUsage::default(),
            by_tool: HashMap::new(),
            call_count: 0,
            failed_count: 0,
        }
    }

    /// Record token usage from a successful API call.
    pub fn record(&mut self, tool: Tool, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.call_count += 1;

        let entry = self.by_tool.entry(tool).or_default();
        entry.input_tokens = entry.input_tokens.saturating_add(usage.input_tokens);
        entry.output_tokens = entry.output_tokens.saturating_add(usage.output_tokens);
    }

    /// Record an API call that failed.
    pub fn record_failure(&mut self) {
        self.failed_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    /// Get usage for a specific tool.
    pub fn for_tool(&self, tool: Tool) -> Option<&TokenUsage> {
        self.by_tool.get(&tool)
    }

    /// Get total tokens (input + output).
    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    pub fn failed_count(&self) -> u64 {
        self.failed_count
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        self.total = TokenUsage::default();
        self.by_tool.clear();
        self.call_count = 0;
        self.failed_count = 0;
    }
}

impl Default for TokenTracker {
    fn default() -> Self {
        Self::new()
    }
}
