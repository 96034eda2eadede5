//! Conversation context management
//!
//! A [`Conversation`] owns one session's state and message log and runs
//! turns end to end: record the user message, perform the one backend call
//! the turn needs, commit the transition and record the bot reply.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::models::{Message, MessageLog, SessionState, StepId};
use crate::services::PatientBackend;
use crate::utils::helpers::{generate_session_id, truncate_text};
use crate::utils::logging::{log_backend_error, log_transition, log_turn};
use super::classifier::TurnKind;
use super::replies::{self, BotReply};
use super::transitions::{required_call, transition, RemoteCall, RemoteOutcome};

/// One patient's dialogue
#[derive(Debug, Clone)]
pub struct Conversation {
    session_id: String,
    state: SessionState,
    log: MessageLog,
    next_message_id: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Start a new conversation; the greeting is its first message
    pub fn new() -> Self {
        Self::with_id(generate_session_id())
    }

    pub fn with_id(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        let mut conversation = Self {
            session_id: session_id.into(),
            state: SessionState::new(),
            log: MessageLog::new(),
            next_message_id: 1,
            created_at: now,
            updated_at: now,
        };
        conversation.push_bot(replies::greeting());
        conversation
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn step(&self) -> StepId {
        self.state.step
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn greeting(&self) -> Option<&Message> {
        self.log.all().next()
    }

    /// Process one user turn
    ///
    /// Returns the bot reply appended for the turn, or `None` when the input
    /// is empty or whitespace-only and nothing was recorded.
    pub async fn handle_turn(&mut self, input: &str, backend: &dyn PatientBackend) -> Option<&Message> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        log_turn(&self.session_id, self.state.step, trimmed.chars().count());
        let id = self.allocate_id();
        self.log.append(Message::user(id, input));

        let outcome = match required_call(&self.state, trimmed) {
            Some(call) => Some(self.dispatch(&call, backend).await),
            None => None,
        };

        let result = transition(&self.state, trimmed, outcome);
        let from = self.state.step;
        self.state = result.state;
        if from != self.state.step {
            log_transition(&self.session_id, from, self.state.step);
        }

        self.push_bot(result.reply);
        self.log.last()
    }

    async fn dispatch(&self, call: &RemoteCall, backend: &dyn PatientBackend) -> RemoteOutcome {
        let kind = match call {
            RemoteCall::LookupPatient { .. } => "name",
            RemoteCall::AskQuestion(_) => TurnKind::Question.as_str(),
            RemoteCall::ParseCombined(_) => TurnKind::DataStatement.as_str(),
        };
        debug!(
            session = %self.session_id,
            endpoint = call.endpoint(),
            kind = kind,
            "Dispatching backend call"
        );

        let outcome = match call {
            RemoteCall::LookupPatient { name } => RemoteOutcome::Lookup(backend.lookup_patient(name).await),
            RemoteCall::AskQuestion(request) => RemoteOutcome::Answer(backend.ask_question(request).await),
            RemoteCall::ParseCombined(request) => RemoteOutcome::Parsed(backend.parse_combined(request).await),
        };

        let error = match &outcome {
            RemoteOutcome::Lookup(Err(e)) => Some(e.to_string()),
            RemoteOutcome::Answer(Err(e)) => Some(e.to_string()),
            RemoteOutcome::Parsed(Err(e)) => Some(e.to_string()),
            _ => None,
        };
        if let Some(error) = error {
            log_backend_error(call.endpoint(), &error, Some(&self.session_id));
        }

        outcome
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.updated_at = Utc::now();
        id
    }

    fn push_bot(&mut self, reply: BotReply) {
        let id = self.allocate_id();
        self.log.append(Message::bot(id, reply.text, reply.richness));
    }

    /// Check if the conversation has been idle longer than `ttl`
    pub fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now() - self.updated_at > ttl
    }

    /// Create a summary of the conversation for logging
    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            session_id: self.session_id.clone(),
            step: self.state.step,
            patient: truncate_text(&self.state.patient_name, 32),
            messages: self.log.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    #[cfg(test)]
    pub(crate) fn backdate(&mut self, by: Duration) {
        self.updated_at = self.updated_at - by;
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Conversation summary for logging and debugging
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub session_id: String,
    pub step: StepId,
    pub patient: String,
    pub messages: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
