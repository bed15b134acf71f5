use serde::Serialize;
use std::sync::Arc;

use crate::console::console;
use crate::context_management::{CompactionConfig, ConversationAccountant, Summarizer};
use crate::conversations::{Conversation, Turn};

/// Outcome of one compaction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactionResult {
    pub was_compacted: bool,
    pub conversation: Conversation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
    pub original_length: usize,
    pub new_length: usize,
    /// Original cost minus new cost. Negative when the summary outweighs what it replaced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_saved: Option<i64>,
}

impl CompactionResult {
    fn unchanged(conversation: &Conversation) -> Self {
        Self {
            was_compacted: false,
            conversation: conversation.clone(),
            summary_text: None,
            original_length: conversation.len(),
            new_length: conversation.len(),
            cost_saved: None,
        }
    }

    /// Number of original turns folded into the summary.
    pub fn summarized_count(&self) -> usize {
        if self.was_compacted {
            self.original_length + 1 - self.new_length
        } else {
            0
        }
    }

    /// Pretty JSON for `compact --json`.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// One-line notice for the chat UI, if anything was compacted.
    pub fn notice(&self) -> Option<String> {
        if !self.was_compacted {
            return None;
        }

        let saved = match self.cost_saved {
            Some(saved) if saved >= 0 => format!(" (saved {} tokens)", saved),
            Some(saved) => format!(" (grew by {} tokens)", -saved),
            None => String::new(),
        };
        Some(format!(
            "Compacted {} earlier turns into a summary{}",
            self.summarized_count(),
            saved
        ))
    }
}

/// Replaces everything but the most recent turns with one summary turn.
pub struct ConversationCompactor {
    accountant: ConversationAccountant,
    summarizer: Arc<dyn Summarizer>,
    keep_recent: usize,
}

impl ConversationCompactor {
    pub fn new(config: &CompactionConfig, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            accountant: ConversationAccountant::new(config),
            summarizer,
            keep_recent: config.keep_recent,
        }
    }

    pub fn accountant(&self) -> &ConversationAccountant {
        &self.accountant
    }

    pub fn keep_recent(&self) -> usize {
        self.keep_recent
    }

    pub async fn compact(&self, conversation: &Conversation) -> CompactionResult {
        let turns = conversation.turns();

        if !self.accountant.needs_compaction(turns) {
            return CompactionResult::unchanged(conversation);
        }

        // Nothing older than the kept window: leave it alone even if over budget.
        let original_length = turns.len();
        if original_length <= self.keep_recent {
            console().verbose(&format!(
                "Conversation over budget but only {} turns, nothing to summarize",
                original_length
            ));
            return CompactionResult::unchanged(conversation);
        }

        let split_point = original_length - self.keep_recent;
        let (to_summarize, to_keep) = turns.split_at(split_point);

        let summary_text = self.summarizer.summarize(to_summarize).await;

        let mut new_turns = Vec::with_capacity(to_keep.len() + 1);
        new_turns.push(Turn::summary(&summary_text));
        new_turns.extend_from_slice(to_keep);
        let compacted = Conversation::from_turns(new_turns);

        let original_cost = self.accountant.total_cost(turns);
        let new_cost = self.accountant.total_cost(compacted.turns());
        let cost_saved = to_signed(original_cost).saturating_sub(to_signed(new_cost));

        console().verbose(&format!(
            "Compacted {} turns into {} ({} -> {} tokens)",
            original_length,
            compacted.len(),
            original_cost,
            new_cost
        ));

        CompactionResult {
            was_compacted: true,
            new_length: compacted.len(),
            conversation: compacted,
            summary_text: Some(summary_text),
            original_length,
            cost_saved: Some(cost_saved),
        }
    }
}

fn to_signed(cost: usize) -> i64 {
    i64::try_from(cost).unwrap_or(i64::MAX)
}
