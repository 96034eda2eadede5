//! Step transition engine
//!
//! The dialogue state machine as two pure functions. [`required_call`] tells
//! the driver which backend call, if any, a turn needs before it can be
//! resolved; [`transition`] maps the current state, the turn text and the
//! settled call outcome to the next state and the single bot reply.
//! No I/O happens here.

use regex::Regex;
use std::sync::OnceLock;
use crate::models::{SessionState, StepId};
use crate::services::{CombinedParse, PatientLookup, QuestionAnswer, TurnRequest};
use crate::utils::errors::BackendResult;
use crate::utils::helpers::normalize_whitespace;
use super::classifier::{classify, TurnKind};
use super::replies::{self, BotReply};

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 150;

/// Backend call a turn depends on
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    LookupPatient { name: String },
    AskQuestion(TurnRequest),
    ParseCombined(TurnRequest),
}

impl RemoteCall {
    pub fn endpoint(&self) -> &'static str {
        match self {
            RemoteCall::LookupPatient { .. } => "patients",
            RemoteCall::AskQuestion(_) => "ask",
            RemoteCall::ParseCombined(_) => "parse-combined",
        }
    }
}

/// Settled result of a [`RemoteCall`]
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    Lookup(BackendResult<PatientLookup>),
    Answer(BackendResult<QuestionAnswer>),
    Parsed(BackendResult<CombinedParse>),
}

/// New session state plus the reply to append
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub reply: BotReply,
}

impl Transition {
    fn to(state: SessionState, reply: BotReply) -> Self {
        Self { state, reply }
    }
}

/// Decide which backend call the turn needs
pub fn required_call(state: &SessionState, input: &str) -> Option<RemoteCall> {
    let input = input.trim();

    match state.step {
        StepId::AwaitingName => Some(RemoteCall::LookupPatient {
            name: normalize_whitespace(input),
        }),
        StepId::AwaitingTurnInput => {
            let request = TurnRequest {
                description: input.to_string(),
                patient_name: state.patient_name.clone(),
                patient_age: state.patient_age,
            };
            match classify(input) {
                TurnKind::Question => Some(RemoteCall::AskQuestion(request)),
                TurnKind::DataStatement => Some(RemoteCall::ParseCombined(request)),
            }
        }
        StepId::AwaitingAge | StepId::AwaitingContinueDecision => None,
    }
}

/// Compute the next state and reply for a turn
///
/// `outcome` is the settled result of the call [`required_call`] asked for.
/// A missing or mismatched outcome takes the same path as a transport failure.
pub fn transition(state: &SessionState, input: &str, outcome: Option<RemoteOutcome>) -> Transition {
    let input = input.trim();

    match state.step {
        StepId::AwaitingName => on_name(state, input, outcome),
        StepId::AwaitingAge => on_age(state, input),
        StepId::AwaitingTurnInput => on_turn_input(state, input, outcome),
        StepId::AwaitingContinueDecision => on_continue_decision(state, input),
    }
}

fn on_name(state: &SessionState, input: &str, outcome: Option<RemoteOutcome>) -> Transition {
    let mut next = state.clone();
    next.patient_name = normalize_whitespace(input);

    match outcome {
        Some(RemoteOutcome::Lookup(Ok(PatientLookup { found: true, age: Some(age) }))) => {
            next.patient_age = Some(age);
            next.step = StepId::AwaitingTurnInput;
            let reply = replies::welcome_back(&next.patient_name);
            Transition::to(next, reply)
        }
        _ => {
            next.step = StepId::AwaitingAge;
            let reply = replies::ask_age(&next.patient_name);
            Transition::to(next, reply)
        }
    }
}

fn on_age(state: &SessionState, input: &str) -> Transition {
    match parse_age(input) {
        Some(age) => {
            let mut next = state.clone();
            next.patient_age = Some(age);
            next.step = StepId::AwaitingTurnInput;
            Transition::to(next, replies::age_confirmed(age))
        }
        None => Transition::to(state.clone(), replies::invalid_age()),
    }
}

fn on_turn_input(state: &SessionState, input: &str, outcome: Option<RemoteOutcome>) -> Transition {
    let mut next = state.clone();
    next.step = StepId::AwaitingContinueDecision;

    let reply = match (classify(input), outcome) {
        (TurnKind::Question, Some(RemoteOutcome::Answer(Ok(answer)))) => {
            match answer.answer.as_deref().filter(|_| answer.success) {
                Some(text) if !text.trim().is_empty() => replies::answer_report(&answer, text),
                _ => replies::question_unanswered(),
            }
        }
        (TurnKind::Question, _) => replies::question_transport_error(),
        (TurnKind::DataStatement, Some(RemoteOutcome::Parsed(Ok(parse)))) => {
            match parse.predicted_dose.filter(|_| parse.success) {
                Some(dose) => {
                    next.last_predicted_dose = Some(dose);
                    replies::dose_report(&parse, dose)
                }
                None => replies::parse_failed(parse.message.as_deref()),
            }
        }
        (TurnKind::DataStatement, _) => replies::parse_transport_error(),
    };

    Transition::to(next, reply)
}

fn on_continue_decision(state: &SessionState, input: &str) -> Transition {
    let choice = input.to_lowercase();

    match choice.as_str() {
        "otro" | "mas" => {
            let mut next = state.clone();
            next.step = StepId::AwaitingTurnInput;
            let reply = replies::new_day(&next.patient_name);
            Transition::to(next, reply)
        }
        "salir" => Transition::to(state.clone(), replies::farewell()),
        _ => Transition::to(state.clone(), replies::continue_clarification()),
    }
}

/// Read an age from the leading integer of the text, accepting 1..=150
///
/// "34", "34 años" and "+34" all read as 34; "treinta", "0" and "200" do not.
pub fn parse_age(input: &str) -> Option<u32> {
    static LEADING_INTEGER: OnceLock<Regex> = OnceLock::new();
    let pattern = LEADING_INTEGER.get_or_init(|| {
        Regex::new(r"^[+-]?\d+").expect("leading integer pattern is valid")
    });

    let digits = pattern.find(input.trim())?.as_str();
    let age = digits.parse::<i64>().ok()?;

    if (MIN_AGE..=MAX_AGE).contains(&age) {
        u32::try_from(age).ok()
    } else {
        None
    }
}
