//! Top-level phase machine of the screening front end.
//!
//! ```text
//! Intro --start--> Loading --questions ok--> Questionnaire
//!                  Loading --questions err-> Intro
//! Questionnaire --answer--> Questionnaire
//! Questionnaire --submit (complete only)--> Loading
//!                  Loading --result ok-----> Results
//!                  Loading --result err----> Questionnaire
//! Results --reset--> Intro
//! ```
//!
//! Input is applied with [`ViewController::handle`], which performs the
//! synchronous part of a transition and returns the network [`Effect`] to
//! run, if any. [`ViewController::run_effect`] performs that call and
//! applies its outcome. While an effect is pending the phase is
//! [`Phase::Loading`] and no action is accepted, so two requests can never
//! be in flight for the same session.

use std::fmt;

use thiserror::Error;
use tracing::Instrument;

use screener_client::api::ScreeningApi;
use screener_client::error::ClientError;
use screener_core::error::CoreError;
use screener_core::models::answer::{AnswerMap, AnswerValue};
use screener_core::models::question::Question;
use screener_core::models::result::ScreeningResult;

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Questionnaire,
    Loading,
    Results,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Intro => "intro",
            Phase::Questionnaire => "questionnaire",
            Phase::Loading => "loading",
            Phase::Results => "results",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    Answer { field: String, value: AnswerValue },
    Submit,
    Reset,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => f.write_str("start"),
            Action::Answer { field, value } => write!(f, "answer {field}={}", value.as_int()),
            Action::Submit => f.write_str("submit"),
            Action::Reset => f.write_str("reset"),
            Action::Quit => f.write_str("quit"),
        }
    }
}

/// Work left to do after a transition into [`Phase::Loading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchQuestions,
    SubmitAnswers(AnswerMap),
    Exit,
}

/// What the loading screen is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Questions,
    Prediction,
}

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("cannot {action} while in the {phase} phase")]
    IllegalAction { phase: Phase, action: String },

    #[error("submit is disabled until every question is answered ({remaining} remaining)")]
    SubmitDisabled { remaining: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub struct ViewController {
    api: Box<dyn ScreeningApi>,
    phase: Phase,
    pending: Option<Pending>,
    session: Option<Session>,
    result: Option<ScreeningResult>,
    alert: Option<String>,
}

impl ViewController {
    pub fn new(api: Box<dyn ScreeningApi>) -> Self {
        Self {
            api,
            phase: Phase::Intro,
            pending: None,
            session: None,
            result: None,
            alert: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn result(&self) -> Option<&ScreeningResult> {
        self.result.as_ref()
    }

    /// Failure message from the last network call, shown until the next
    /// accepted action.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Apply user input. Rejected actions leave every piece of state,
    /// including the alert, untouched.
    pub fn handle(&mut self, action: Action) -> Result<Effect, TransitionError> {
        let effect = match (self.phase, &action) {
            (Phase::Loading, _) => return Err(self.illegal(&action)),
            (_, Action::Quit) => Effect::Exit,
            (Phase::Intro, Action::Start) => {
                tracing::info!("screening started");
                self.enter_loading(Pending::Questions);
                Effect::FetchQuestions
            }
            (Phase::Questionnaire, Action::Answer { field, value }) => {
                self.record_answer(field, *value)?;
                Effect::None
            }
            (Phase::Questionnaire, Action::Submit) => {
                let payload = self.submission()?;
                self.session_span()
                    .in_scope(|| tracing::info!(answered = payload.len(), "submitting answers"));
                self.enter_loading(Pending::Prediction);
                Effect::SubmitAnswers(payload)
            }
            (Phase::Results, Action::Reset) => {
                self.reset();
                Effect::None
            }
            _ => return Err(self.illegal(&action)),
        };

        self.alert = None;
        Ok(effect)
    }

    /// Perform the network call for `effect` and apply its outcome.
    pub async fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchQuestions => {
                let outcome = self.api.fetch_questions().await;
                self.questions_loaded(outcome);
            }
            Effect::SubmitAnswers(payload) => {
                let outcome = self
                    .api
                    .submit_answers(&payload)
                    .instrument(self.session_span())
                    .await;
                self.result_received(outcome);
            }
            Effect::None | Effect::Exit => {}
        }
    }

    /// [`handle`](Self::handle) followed by [`run_effect`](Self::run_effect).
    pub async fn dispatch(&mut self, action: Action) -> Result<Effect, TransitionError> {
        let effect = self.handle(action)?;
        if effect == Effect::Exit {
            return Ok(effect);
        }
        self.run_effect(effect.clone()).await;
        Ok(effect)
    }

    fn illegal(&self, action: &Action) -> TransitionError {
        tracing::warn!(phase = %self.phase, %action, "rejected action");
        TransitionError::IllegalAction {
            phase: self.phase,
            action: action.to_string(),
        }
    }

    /// Span of the active session, or a disabled span outside one.
    fn session_span(&self) -> tracing::Span {
        self.session
            .as_ref()
            .map_or_else(tracing::Span::none, |s| s.span.clone())
    }

    fn enter_loading(&mut self, pending: Pending) {
        self.phase = Phase::Loading;
        self.pending = Some(pending);
    }

    fn record_answer(&mut self, field: &str, value: AnswerValue) -> Result<(), TransitionError> {
        let session = self
            .session
            .as_mut()
            .ok_or(TransitionError::Core(CoreError::EmptyQuestionSet))?;

        let _entered = session.span.enter();
        match session.state.record_answer(field, value) {
            Ok(previous) => {
                let progress = session.state.progress();
                tracing::debug!(
                    field,
                    value = value.as_int(),
                    changed = previous.is_some_and(|p| p != value),
                    answered = progress.answered,
                    total = progress.total,
                    "answer recorded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(field, error = %e, "answer rejected");
                Err(e.into())
            }
        }
    }

    fn submission(&self) -> Result<AnswerMap, TransitionError> {
        let session = self
            .session
            .as_ref()
            .ok_or(TransitionError::Core(CoreError::EmptyQuestionSet))?;

        session.state.payload().map_err(|e| match e {
            CoreError::Incomplete { remaining } => TransitionError::SubmitDisabled { remaining },
            other => other.into(),
        })
    }

    fn questions_loaded(&mut self, outcome: Result<Vec<Question>, ClientError>) {
        self.pending = None;

        let questions = match outcome {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load questions");
                self.back_to_intro(e.user_message());
                return;
            }
        };

        match Session::start(questions) {
            Ok(session) => {
                session.span.in_scope(|| {
                    tracing::info!(
                        questions = session.state.questions().len(),
                        "session started"
                    )
                });
                self.session = Some(session);
                self.phase = Phase::Questionnaire;
            }
            Err(e) => {
                tracing::warn!(error = %e, "unusable question set");
                self.back_to_intro(format!(
                    "The screening service returned an unusable question set ({e})."
                ));
            }
        }
    }

    fn result_received(&mut self, outcome: Result<ScreeningResult, ClientError>) {
        self.pending = None;
        let span = self.session_span();
        let _entered = span.enter();

        match outcome {
            Ok(result) => {
                tracing::info!(risk_level = %result.risk_level, "result received");
                self.result = Some(result);
                self.phase = Phase::Results;
            }
            Err(e) => {
                tracing::warn!(error = %e, "submission failed");
                self.alert = Some(e.user_message());
                self.phase = Phase::Questionnaire;
            }
        }
    }

    fn back_to_intro(&mut self, alert: String) {
        self.session = None;
        self.alert = Some(alert);
        self.phase = Phase::Intro;
    }

    fn reset(&mut self) {
        if let Some(session) = self.session.take() {
            let elapsed = jiff::Timestamp::now().since(session.started_at).ok();
            session
                .span
                .in_scope(|| tracing::info!(elapsed = ?elapsed, "session ended"));
        }
        self.result = None;
        self.pending = None;
        self.phase = Phase::Intro;
    }
}
