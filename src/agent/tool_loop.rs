//! Bounded model ↔ tool round-trip.
//!
//! Drives the completion service and tool execution: sends the request,
//! executes any tool calls in the response, appends results, and repeats.
//! The phase ends when the model answers in text, a tool result carries
//! the final-answer sentinel, or the round budget runs out — the caller
//! then renders the final reply (streamed, without tools).

use tracing::debug;

use crate::error::AgentError;
use crate::livestorm::FINAL_ANSWER_PREFIX;

use super::executor::ToolExecutor;
use super::message::{ChatRequest, ChatResponse, assistant_tool_calls_message, tool_message};
use super::provider::LlmProvider;

/// How the tool phase ended.
#[derive(Debug)]
pub enum ToolPhaseOutcome {
    /// The model produced a text answer without requesting tools.
    Answered(ChatResponse),
    /// Tool results were collected into the request: a result carried the
    /// final-answer sentinel, or the round budget was exhausted. The
    /// caller issues the final (streamed) turn.
    ToolsDone,
}

/// Runs the tool phase: model → tool calls → tool results → model → …
///
/// The request is mutated in place; assistant tool-call messages and tool
/// results are appended so the final turn sees the full exchange. Tools
/// execute strictly sequentially in the order the model requested them.
///
/// A sentinel-prefixed tool result is authoritative — no further tool
/// rounds are attempted after one arrives. `max_rounds` is a safety limit
/// only; the single-call policy itself lives in the tool descriptions.
///
/// # Errors
///
/// Propagates provider failures. Tool dispatch failures do not error —
/// they are appended as text results for the model to react to.
pub async fn run_tool_phase(
    provider: &dyn LlmProvider,
    request: &mut ChatRequest,
    executor: &ToolExecutor,
    max_rounds: usize,
) -> Result<ToolPhaseOutcome, AgentError> {
    for round in 0..max_rounds {
        let response = provider.chat(request).await?;

        if response.tool_calls.is_empty() {
            debug!(round, "model answered without tool calls");
            return Ok(ToolPhaseOutcome::Answered(response));
        }

        debug!(
            round,
            tool_count = response.tool_calls.len(),
            "executing tool calls"
        );

        request
            .messages
            .push(assistant_tool_calls_message(response.tool_calls.clone()));

        let mut saw_final_answer = false;
        for call in &response.tool_calls {
            let result = executor.execute(call).await;
            debug!(
                tool = call.name,
                call_id = call.id,
                is_error = result.is_error,
                "tool execution complete"
            );
            saw_final_answer |= result.content.starts_with(FINAL_ANSWER_PREFIX);
            request
                .messages
                .push(tool_message(&result.tool_call_id, &result.content));
        }

        if saw_final_answer {
            debug!(round, "tool produced a final answer, ending tool phase");
            return Ok(ToolPhaseOutcome::ToolsDone);
        }
    }

    debug!(max_rounds, "tool round budget exhausted");
    Ok(ToolPhaseOutcome::ToolsDone)
}
