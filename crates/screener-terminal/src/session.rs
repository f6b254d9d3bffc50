use screener_core::error::CoreError;
use screener_core::models::question::Question;
use screener_core::questionnaire::QuestionnaireState;
use uuid::Uuid;

/// One screening session, from a loaded question set to reset.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub started_at: jiff::Timestamp,
    pub state: QuestionnaireState,
    /// Parent span for everything logged while this session is active.
    pub span: tracing::Span,
}

impl Session {
    pub fn start(questions: Vec<Question>) -> Result<Self, CoreError> {
        let mut state = QuestionnaireState::new();
        state.initialize(questions)?;
        let id = Uuid::new_v4();
        Ok(Self {
            id,
            span: tracing::info_span!("session", session_id = %id),
            started_at: jiff::Timestamp::now(),
            state,
        })
    }
}
