mod support;

use screener_core::models::answer::AnswerValue;
use screener_terminal::controller::{Action, ViewController};

use support::{high_risk, two_questions, FakeApi};

fn answer(field: &str, value: AnswerValue) -> Action {
    Action::Answer {
        field: field.to_string(),
        value,
    }
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[tokio::test]
async fn session_events_are_logged_inside_the_session_span() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _default = tracing::subscriber::set_default(subscriber);

    let api = FakeApi::new()
        .questions(Ok(two_questions()))
        .prediction(Ok(high_risk()));
    let mut controller = ViewController::new(Box::new(api));
    controller.dispatch(Action::Start).await.unwrap();
    let id = controller.session().unwrap().id;
    controller.handle(answer("a", AnswerValue::Yes)).unwrap();
    controller.handle(answer("b", AnswerValue::No)).unwrap();
    controller.dispatch(Action::Submit).await.unwrap();

    let span_prefix = format!("session{{session_id={id}}}");
    let logs = captured.text();
    for message in [
        "session started",
        "answer recorded",
        "submitting answers",
        "result received",
    ] {
        let line = logs
            .lines()
            .find(|l| l.contains(message))
            .unwrap_or_else(|| panic!("no log line for {message:?} in:\n{logs}"));
        assert!(
            line.contains(&span_prefix),
            "{message:?} logged outside the session span: {line}"
        );
    }
}
