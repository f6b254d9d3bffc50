//! Line-oriented input loop: draw the current view, read one token, look
//! it up in the view's control table, apply the bound action.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::{Action, Effect, ViewController};
use crate::view::{render, View};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalOptions {
    /// Clear the screen before each redraw. Only useful on a real terminal.
    pub clear_screen: bool,
}

/// How a line of input resolves against the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Control(Action),
    Disabled(String),
    Unknown(String),
}

pub fn resolve(view: &View, line: &str) -> Input {
    let token = line.trim();
    if token.is_empty() {
        return Input::Empty;
    }
    match view.control(token) {
        Some(control) if control.enabled => Input::Control(control.action.clone()),
        Some(control) => Input::Disabled(control.label.clone()),
        None => Input::Unknown(token.to_string()),
    }
}

fn draw<W: Write>(
    out: &mut W,
    view: &View,
    notice: Option<&str>,
    options: TerminalOptions,
) -> std::io::Result<()> {
    if options.clear_screen {
        out.write_all(CLEAR_SCREEN.as_bytes())?;
    }
    out.write_all(view.to_text().as_bytes())?;
    if let Some(notice) = notice {
        writeln!(out, "{notice}")?;
    }
    if !view.controls.is_empty() {
        write!(out, "> ")?;
    }
    out.flush()
}

/// Run until the user quits or input ends.
pub async fn run<R, W>(
    controller: &mut ViewController,
    input: R,
    out: &mut W,
    options: TerminalOptions,
) -> eyre::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut notice: Option<String> = None;

    loop {
        let view = render(controller);
        draw(out, &view, notice.take().as_deref(), options)?;

        let Some(line) = lines.next_line().await? else {
            tracing::debug!("input closed");
            break;
        };

        let action = match resolve(&view, &line) {
            Input::Empty => continue,
            Input::Control(action) => action,
            Input::Disabled(label) => {
                notice = Some(format!("\"{label}\" is not available yet."));
                continue;
            }
            Input::Unknown(token) => {
                notice = Some(format!("Unrecognised option: {token}"));
                continue;
            }
        };

        match controller.handle(action) {
            Ok(Effect::Exit) => break,
            Ok(Effect::None) => {}
            Ok(effect) => {
                draw(out, &render(controller), None, options)?;
                controller.run_effect(effect).await;
            }
            Err(e) => notice = Some(e.to_string()),
        }
    }

    writeln!(out)?;
    Ok(())
}
