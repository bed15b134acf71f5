use crate::context_management::{CompactionConfig, TokenEstimator};
use crate::conversations::Turn;

/// Sizes a conversation and decides whether it has outgrown its budget.
#[derive(Debug, Clone)]
pub struct ConversationAccountant {
    estimator: TokenEstimator,
    max_turns: usize,
    max_cost: usize,
    warning_threshold: f32,
}

impl ConversationAccountant {
    pub fn new(config: &CompactionConfig) -> Self {
        Self {
            estimator: TokenEstimator::new(config.chars_per_token),
            max_turns: config.max_turns,
            max_cost: config.max_cost,
            warning_threshold: config.warning_threshold,
        }
    }

    pub fn estimator(&self) -> &TokenEstimator {
        &self.estimator
    }

    pub fn total_cost(&self, turns: &[Turn]) -> usize {
        turns.iter().fold(0usize, |total, turn| {
            total.saturating_add(self.estimator.estimate(turn.content()))
        })
    }

    /// True once either the turn count or the estimated cost passes its limit.
    pub fn needs_compaction(&self, turns: &[Turn]) -> bool {
        turns.len() > self.max_turns || self.total_cost(turns) > self.max_cost
    }

    /// Fraction of the cost budget in use, clamped to `[0, 1]`.
    pub fn token_pressure(&self, turns: &[Turn]) -> f32 {
        let total = self.total_cost(turns);
        if self.max_cost == 0 {
            return if total == 0 { 0.0 } else { 1.0 };
        }
        (total as f32 / self.max_cost as f32).min(1.0)
    }

    pub fn should_warn_about_pressure(&self, turns: &[Turn]) -> bool {
        self.token_pressure(turns) > self.warning_threshold
    }
}

impl Default for ConversationAccountant {
    fn default() -> Self {
        Self::new(&CompactionConfig::default())
    }
}
