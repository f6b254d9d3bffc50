//! Rendering of the controller into a screen.
//!
//! [`render`] is a pure function of the controller's phase, session and
//! result. Every control on screen carries the [`Action`] it triggers, keyed
//! by the short token the user types, so input dispatch is a lookup in the
//! current view rather than anything derived from the rendered text.

use screener_core::models::answer::AnswerValue;
use screener_core::presentation::{present, ResultPresentation};
use screener_core::questionnaire::Progress;

use crate::controller::{Action, Pending, Phase, ViewController};

const BAR_WIDTH: usize = 20;

pub const DISCLAIMER: &str = "This screening is not a diagnosis. Please discuss the result with a qualified healthcare professional.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub token: String,
    pub label: String,
    pub action: Action,
    pub enabled: bool,
}

impl Control {
    fn new(token: impl Into<String>, label: impl Into<String>, action: Action) -> Self {
        Self {
            token: token.into(),
            label: label.into(),
            action,
            enabled: true,
        }
    }

    fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionItem {
    /// Server-assigned question id, shown as the item label.
    pub id: u32,
    /// 1-based position, used in the answer tokens (`1y`, `1n`).
    pub number: usize,
    pub text: String,
    pub answer: Option<AnswerValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Intro,
    Questionnaire {
        progress: Progress,
        items: Vec<QuestionItem>,
        /// Ids of the questions still without an answer.
        unanswered: Vec<u32>,
    },
    Loading {
        message: &'static str,
    },
    Results(ResultPresentation),
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub phase: Phase,
    pub alert: Option<String>,
    pub body: Body,
    pub controls: Vec<Control>,
}

impl View {
    /// Look up the control bound to `token` (case-insensitive).
    pub fn control(&self, token: &str) -> Option<&Control> {
        let token = token.trim();
        self.controls
            .iter()
            .find(|c| c.token.eq_ignore_ascii_case(token))
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Behaviour Screening\n");
        out.push_str("===================\n");
        if let Some(alert) = &self.alert {
            out.push_str(&format!("\n[!] {alert}\n"));
        }
        out.push('\n');

        match &self.body {
            Body::Intro => {
                out.push_str(
                    "Answer a short set of yes/no questions about the child's behaviour.\n\
                     Your answers are sent to the screening service, which returns a risk assessment.\n",
                );
            }
            Body::Questionnaire {
                progress,
                items,
                unanswered,
            } => {
                write_progress(&mut out, progress);
                out.push('\n');
                for item in items {
                    let marker = format!("[{:<3}]", item.answer.map_or("", |v| v.label()));
                    out.push_str(&format!(
                        "{:>2}. {marker} {}  ({n}y/{n}n)\n",
                        item.id,
                        item.text,
                        n = item.number
                    ));
                }
                if !unanswered.is_empty() {
                    let ids: Vec<String> = unanswered.iter().map(u32::to_string).collect();
                    out.push_str(&format!(
                        "\n{} question(s) remaining: {}\n",
                        unanswered.len(),
                        ids.join(", ")
                    ));
                }
            }
            Body::Loading { message } => {
                out.push_str(&format!("{message}\n"));
            }
            Body::Results(shown) => write_results(&mut out, shown),
        }

        if !self.controls.is_empty() {
            out.push('\n');
            let entries: Vec<String> = self
                .controls
                .iter()
                .filter(|c| !matches!(c.action, Action::Answer { .. }))
                .map(|c| {
                    if c.enabled {
                        format!("[{}] {}", c.token, c.label)
                    } else {
                        format!("[{}] {} (disabled)", c.token, c.label)
                    }
                })
                .collect();
            if self.phase == Phase::Questionnaire {
                out.push_str("Type the token shown after a question to answer it, e.g. 1y.\n");
            }
            out.push_str(&format!("{}\n", entries.join("   ")));
        }
        out
    }
}

fn write_progress(out: &mut String, progress: &Progress) {
    let filled = usize::from(progress.percent) * BAR_WIDTH / 100;
    out.push_str(&format!(
        "Answered {} of {}  {}{} {}%\n",
        progress.answered,
        progress.total,
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        progress.percent
    ));
}

fn write_results(out: &mut String, shown: &ResultPresentation) {
    out.push_str("Screening Results\n");
    out.push_str("-----------------\n");
    out.push_str(&format!(
        "{} Risk level: {} ({})\n",
        shown.icon,
        shown.label,
        shown.style.class_name()
    ));
    out.push_str(&format!("Confidence: {}\n", shown.confidence_text()));
    for (heading, text) in [
        ("Prediction", &shown.prediction),
        ("Details", &shown.message),
        ("Doctor recommendation", &shown.recommendation),
    ] {
        if !text.trim().is_empty() {
            out.push_str(&format!("{heading}: {text}\n"));
        }
    }
    out.push_str(&format!("\n{DISCLAIMER}\n"));
}

pub fn render(controller: &ViewController) -> View {
    let alert = controller.alert().map(str::to_string);

    let (body, controls) = match controller.phase() {
        Phase::Intro => (
            Body::Intro,
            vec![
                Control::new("s", "Start screening", Action::Start),
                Control::new("q", "Quit", Action::Quit),
            ],
        ),
        Phase::Loading => {
            let message = match controller.pending() {
                Some(Pending::Questions) => "Loading questions...",
                Some(Pending::Prediction) | None => "Analysing responses...",
            };
            (Body::Loading { message }, Vec::new())
        }
        Phase::Questionnaire => questionnaire(controller),
        Phase::Results => {
            let body = match controller.result() {
                Some(result) => Body::Results(present(result)),
                None => Body::Intro,
            };
            (
                body,
                vec![
                    Control::new("r", "Start again", Action::Reset),
                    Control::new("q", "Quit", Action::Quit),
                ],
            )
        }
    };

    View {
        phase: controller.phase(),
        alert,
        body,
        controls,
    }
}

fn questionnaire(controller: &ViewController) -> (Body, Vec<Control>) {
    let Some(session) = controller
        .session()
        .filter(|s| s.state.is_initialized())
    else {
        return (Body::Intro, vec![Control::new("q", "Quit", Action::Quit)]);
    };
    let state = &session.state;

    let mut items = Vec::with_capacity(state.questions().len());
    let mut controls = Vec::with_capacity(state.questions().len() * 2 + 2);

    for (index, question) in state.questions().iter().enumerate() {
        let number = index + 1;
        items.push(QuestionItem {
            id: question.id,
            number,
            text: question.text.clone(),
            answer: state.answer_for(&question.field),
        });
        for value in [AnswerValue::Yes, AnswerValue::No] {
            let suffix = if value == AnswerValue::Yes { 'y' } else { 'n' };
            controls.push(Control::new(
                format!("{number}{suffix}"),
                format!("{} to question {number}", value.label()),
                Action::Answer {
                    field: question.field.clone(),
                    value,
                },
            ));
        }
    }

    controls.push(
        Control::new("s", "Submit answers", Action::Submit).enabled(state.is_complete()),
    );
    controls.push(Control::new("q", "Quit", Action::Quit));

    (
        Body::Questionnaire {
            progress: state.progress(),
            items,
            unanswered: state.unanswered().iter().map(|q| q.id).collect(),
        },
        controls,
    )
}
