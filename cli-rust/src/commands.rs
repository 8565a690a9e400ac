use crate::{render, BoxedError};
use futures::{Stream, StreamExt};
use idea_forge_sdk::{
    DepthRequest, ForgeApi, ForgeStage, IndependentRequest, SessionEvent, SessionState,
};
use serde::Serialize;
use std::{io::Write, pin::pin};
use tracing::info;

const RULE: &str = "==================================================";

/// How results are written to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), BoxedError> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Generate one idea and print its card.
pub async fn independent<A, W>(
    api: &A,
    request: IndependentRequest,
    out: &mut W,
    output: Output,
) -> Result<SessionState, BoxedError>
where
    A: ForgeApi + ?Sized,
    W: Write,
{
    request.validate()?;

    let state = SessionState::new().reduce(SessionEvent::Started);
    if output == Output::Text {
        writeln!(out, "Idea Forge - Independent Mode")?;
        writeln!(out, "Track: {}", request.track)?;
        writeln!(
            out,
            "Requirements: {}",
            request.requirements.as_deref().unwrap_or("None")
        )?;
        writeln!(out, "{}", "-".repeat(RULE.len()))?;
    }

    let response = api.run_independent(request).await?;

    match output {
        Output::Json => write_json(out, &response)?,
        Output::Text => {
            writeln!(out, "Generated idea:")?;
            writeln!(out)?;
            write!(
                out,
                "{}",
                render::card(&response.idea, response.evaluation.as_ref())
            )?;
        }
    }

    Ok(state
        .reduce(SessionEvent::Generated(response))
        .reduce(SessionEvent::Finished))
}

/// Follow a depth run, printing each update as it arrives.
///
/// The first item from `interrupts` sends a stop request and the stream is
/// read until the server closes it. A second item stops listening right
/// away. Listening also stops at the first terminal update.
pub async fn depth<A, W, I>(
    api: &A,
    request: DepthRequest,
    out: &mut W,
    output: Output,
    interrupts: I,
) -> Result<SessionState, BoxedError>
where
    A: ForgeApi + ?Sized,
    W: Write,
    I: Stream<Item = ()>,
{
    request.validate()?;

    let mut state = SessionState::new().reduce(SessionEvent::Started);
    if output == Output::Text {
        writeln!(out, "Idea Forge - Depth Mode")?;
        writeln!(out, "Track: {}", request.track)?;
        writeln!(out, "Problem: {}", request.problem_statement)?;
        writeln!(
            out,
            "Threshold: {}/10 ({}%)",
            request.threshold,
            request.threshold * 10
        )?;
        writeln!(out, "Max iterations: {}", request.max_iterations)?;
        writeln!(out, "{}", "-".repeat(RULE.len()))?;
    }

    let mut updates = api.run_depth(request).await?;
    let mut interrupts = pin!(interrupts.fuse());
    let mut stop_sent = false;

    loop {
        let next = tokio::select! {
            biased;
            Some(()) = interrupts.next() => {
                if stop_sent {
                    info!("second interrupt received, no longer waiting for the server");
                    if output == Output::Text {
                        writeln!(out, "Stopped listening, the server may still be running.")?;
                    }
                    state = state.reduce(SessionEvent::Finished);
                    write_partial_result(out, &state, output)?;
                    return Ok(state);
                }
                stop_sent = true;
                info!("interrupt received, asking the server to stop");
                if output == Output::Text {
                    writeln!(
                        out,
                        "Stopping, waiting for the server to wrap up... (Ctrl-C again to quit)"
                    )?;
                }
                api.stop_depth().await;
                continue;
            }
            next = updates.next() => next,
        };

        let update = match next {
            None => break,
            Some(Ok(update)) => update,
            Some(Err(error)) => {
                state = state.reduce(SessionEvent::Failed(error.to_string()));
                write_partial_result(out, &state, output)?;
                return Err(error.into());
            }
        };

        match output {
            Output::Json => writeln!(out, "{}", serde_json::to_string(&update)?)?,
            Output::Text => write!(out, "{}", render::update(&update))?,
        }

        let terminal = update.is_terminal();
        state = state.reduce(SessionEvent::Update(update));
        if terminal {
            break;
        }
    }

    state = state.reduce(SessionEvent::Finished);

    if output == Output::Text {
        if let Some(idea) = &state.final_idea {
            writeln!(out)?;
            writeln!(out, "{RULE}")?;
            writeln!(out, "FINAL RESULT:")?;
            writeln!(out)?;
            write!(out, "{}", render::card(idea, state.final_evaluation.as_ref()))?;
        } else {
            write_partial_result(out, &state, Output::Text)?;
        }
    }

    Ok(state)
}

/// Report a run that ended without a final result.
fn write_partial_result<W: Write>(
    out: &mut W,
    state: &SessionState,
    output: Output,
) -> std::io::Result<()> {
    if output == Output::Json {
        return Ok(());
    }

    let interrupted = state
        .history
        .iter()
        .any(|update| update.stage == Some(ForgeStage::Interrupted));
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    if interrupted {
        writeln!(out, "Run interrupted after {} iteration(s).", state.iteration())?;
    } else {
        writeln!(out, "Run ended without a final idea.")?;
    }
    if let Some(error) = &state.error {
        writeln!(out, "Error: {error}")?;
    }
    if let Some(idea) = state.latest_idea() {
        writeln!(out, "Latest idea:")?;
        writeln!(out)?;
        write!(out, "{}", render::idea(idea))?;
    }
    Ok(())
}

pub async fn stop<A, W>(api: &A, out: &mut W) -> Result<(), BoxedError>
where
    A: ForgeApi + ?Sized,
    W: Write,
{
    api.stop_depth().await;
    writeln!(out, "Stop requested.")?;
    Ok(())
}

pub async fn status<A, W>(api: &A, out: &mut W, output: Output) -> Result<(), BoxedError>
where
    A: ForgeApi + ?Sized,
    W: Write,
{
    let status = api.status().await?;
    match output {
        Output::Json => write_json(out, &status)?,
        Output::Text => write!(out, "{}", render::status(&status))?,
    }
    Ok(())
}
