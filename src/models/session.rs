//! Session state model

use std::fmt;
use serde::{Deserialize, Serialize};

/// Conversation step, also the states of the dialogue state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    AwaitingName,
    AwaitingAge,
    AwaitingTurnInput,
    AwaitingContinueDecision,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::AwaitingName => "awaiting_name",
            StepId::AwaitingAge => "awaiting_age",
            StepId::AwaitingTurnInput => "awaiting_turn_input",
            StepId::AwaitingContinueDecision => "awaiting_continue_decision",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the dialogue knows about the patient and where the dialogue is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub patient_name: String,
    pub patient_age: Option<u32>,
    pub step: StepId,
    pub last_predicted_dose: Option<f64>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            patient_name: String::new(),
            patient_age: None,
            step: StepId::AwaitingName,
            last_predicted_dose: None,
        }
    }

    /// Whether the patient identity needed by the backend calls is complete
    pub fn has_patient(&self) -> bool {
        !self.patient_name.is_empty() && self.patient_age.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
