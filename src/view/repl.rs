//! The interactive read-eval-print loop.
//!
//! Generic over the input reader and output writer so a session can be driven
//! from memory. On a terminal the typed line is erased once read and the
//! scrollback echo takes its place; off a terminal no prompt is written, so
//! every submitted line appears exactly once in the output.

use super::ScrollbackView;
use crate::app::{Dispatch, Effect, Interpreter, ScheduledEffect};
use crate::services::ai::CompletionBackend;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

fn greet<W: Write>(interp: &Interpreter, view: &ScrollbackView, out: &mut W) -> io::Result<()> {
    view.write_status(
        &format!(
            "Welcome to {}'s portfolio. Type 'help' to see available commands.",
            interp.profile().name
        ),
        out,
    )?;
    writeln!(out)
}

/// Run the session until input ends or a navigation effect fires.
pub async fn run<R, W>(
    interp: &mut Interpreter,
    backend: &dyn CompletionBackend,
    view: &mut ScrollbackView,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut input_open = true;

    greet(interp, view, out)?;

    while input_open {
        view.write_prompt(&interp.prompt(), out)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        view.erase_typed_line(out)?;

        let effect = match interp.submit(&line) {
            Dispatch::Done(effect) => effect,
            Dispatch::Busy => None,
            Dispatch::Ask(pending) => {
                view.draw(interp.scrollback(), out)?;
                view.write_status("Thinking...", out)?;

                let ask = pending.run(backend);
                tokio::pin!(ask);
                let outcome = loop {
                    tokio::select! {
                        outcome = &mut ask => break outcome,
                        extra = lines.next_line(), if input_open => match extra {
                            // Input typed while the query runs is rejected, not queued.
                            Ok(Some(extra)) => {
                                view.erase_typed_line(out)?;
                                if matches!(interp.submit(&extra), Dispatch::Busy) {
                                    view.write_status("(still waiting on the AI)", out)?;
                                }
                            }
                            Ok(None) => input_open = false,
                            Err(e) => {
                                tracing::warn!("Input closed while waiting on the AI: {}", e);
                                input_open = false;
                            }
                        },
                    }
                };
                interp.finish_ask(outcome);
                None
            }
        };
        view.draw(interp.scrollback(), out)?;

        if let Some(ScheduledEffect { after, effect }) = effect {
            tokio::time::sleep(after).await;
            match effect {
                Effect::Navigate(route) => {
                    tracing::info!("Navigating to {}", route);
                    view.write_status(&format!("Opening {}", route), out)?;
                    break;
                }
                Effect::Reset => {
                    interp.reset();
                    view.draw(interp.scrollback(), out)?;
                    greet(interp, view, out)?;
                }
            }
        }
    }

    out.flush()
}
