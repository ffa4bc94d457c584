//! Turn-based chat loop: the driver side of the engine contract.
//!
//! Presents one directive, waits for exactly one user action, applies it
//! through `advance`, and repeats until the terminal phase or end of
//! input. All rendering goes through the generic writer so tests can
//! script a whole interview.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::artifact;
use crate::core::directive::{Answer, Directive, InputEdge};
use crate::core::phase::Phase;
use crate::engine::{UserInput, advance, get_directive};
use crate::core::session::Session;

/// How an interview ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatStop {
    /// Terminal phase reached; the artifact was compiled.
    Completed,
    /// Input ended before the interview finished; the session is
    /// abandoned.
    Abandoned,
}

/// Summary of one chat run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub stop: ChatStop,
    /// The compiled artifact, present only on completion.
    pub artifact: Option<String>,
    /// User turns consumed.
    pub turns: u32,
}

/// Run the interview loop over `input`/`output` until it completes or the
/// input runs dry.
pub fn run_chat<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    output: &mut W,
) -> Result<ChatOutcome> {
    let mut phase = Phase::Greeting;
    let mut pending: Option<Directive> = None;
    let mut turns = 0u32;

    loop {
        let directive = match pending.take() {
            Some(follow_up) => follow_up,
            None => get_directive(session, phase),
        };
        phase = directive.phase;

        writeln!(output, "\n{}", directive.prompt).context("write prompt")?;

        if matches!(directive.input, InputEdge::End) {
            return Ok(ChatOutcome {
                stop: ChatStop::Completed,
                artifact: Some(artifact::compile(session)),
                turns,
            });
        }

        render_choices(&directive, output)?;
        let Some(line) = read_line(input)? else {
            debug!(phase = ?phase, "input ended mid-interview");
            return Ok(ChatOutcome {
                stop: ChatStop::Abandoned,
                artifact: None,
                turns,
            });
        };

        let Some(user_input) = interpret(&directive, &line) else {
            writeln!(output, "Please pick one of the offered answers.")
                .context("write reprompt")?;
            continue;
        };

        turns += 1;
        let step = advance(session, phase, &user_input)?;
        phase = step.next_phase;
        pending = step.follow_up;
    }
}

fn render_choices<W: Write>(directive: &Directive, output: &mut W) -> Result<()> {
    match &directive.input {
        InputEdge::Decision(edges) => {
            if edges.allow_unsure {
                writeln!(output, "[yes / no / unsure]").context("write choices")?;
            } else {
                writeln!(output, "[yes / no]").context("write choices")?;
            }
        }
        InputEdge::FreeText { actions } => {
            for (index, action) in actions.iter().enumerate() {
                writeln!(output, "[{}] {}", index + 1, action.label).context("write choices")?;
            }
            writeln!(output, "(type your answer)").context("write choices")?;
        }
        InputEdge::Menu { actions } => {
            for (index, action) in actions.iter().enumerate() {
                writeln!(output, "[{}] {}", index + 1, action.label).context("write choices")?;
            }
        }
        InputEdge::End => {}
    }
    Ok(())
}

/// Map a raw input line onto the edges the directive offered.
///
/// Returns `None` when the line matches nothing; the caller re-prompts.
fn interpret(directive: &Directive, line: &str) -> Option<UserInput> {
    let trimmed = line.trim();
    match &directive.input {
        InputEdge::Decision(edges) => {
            parse_answer(trimmed, edges.allow_unsure).map(UserInput::Decision)
        }
        InputEdge::FreeText { actions } => {
            if let Some(index) = parse_action_index(trimmed, actions.len()) {
                return Some(UserInput::Action(index));
            }
            // Blank lines still go through; the collector treats them as a
            // no-op and the loop re-prompts.
            Some(UserInput::Text(line.to_string()))
        }
        InputEdge::Menu { actions } => {
            parse_action_index(trimmed, actions.len()).map(UserInput::Action)
        }
        InputEdge::End => None,
    }
}

fn parse_answer(trimmed: &str, allow_unsure: bool) -> Option<Answer> {
    match trimmed.to_lowercase().as_str() {
        "y" | "yes" | "1" => Some(Answer::Yes),
        "n" | "no" | "2" => Some(Answer::No),
        "u" | "unsure" | "3" if allow_unsure => Some(Answer::Unsure),
        _ => None,
    }
}

fn parse_action_index(trimmed: &str, len: usize) -> Option<usize> {
    let number: usize = trimmed.parse().ok()?;
    (1..=len).contains(&number).then(|| number - 1)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("read input line")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> (Session, ChatOutcome, String) {
        let mut session = Session::new();
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        let outcome = run_chat(&mut session, &mut input, &mut output).expect("chat");
        (session, outcome, String::from_utf8(output).expect("utf8"))
    }

    /// A full scripted interview: auth-only TodoApp on the web.
    #[test]
    fn scripted_interview_completes_and_compiles() {
        let script = "TodoApp\n\
                      create tasks, mark done\n\
                      1\n\
                      yes\n\
                      Email, Google\n\
                      no\n\
                      no\n\
                      no\n\
                      no\n\
                      yes\n\
                      Web\n\
                      1\n\
                      yes\n\
                      yes\n\
                      yes\n\
                      1\n";
        let (session, outcome, transcript) = run_script(script);

        assert_eq!(outcome.stop, ChatStop::Completed);
        let artifact = outcome.artifact.expect("artifact");
        assert!(artifact.contains("\"TodoApp\""));
        assert!(artifact.contains("**User Authentication:**"));
        assert!(session.console_actions_confirmed);
        assert!(transcript.contains("Firebase Setup & Prompt Assistant"));
        assert!(transcript.contains("console action summary"));
    }

    /// Running out of input abandons the session without an artifact.
    #[test]
    fn early_eof_abandons_the_session() {
        let (_, outcome, _) = run_script("TodoApp\n");
        assert_eq!(outcome.stop, ChatStop::Abandoned);
        assert!(outcome.artifact.is_none());
    }

    /// Unrecognized decision input re-prompts without consuming a turn.
    #[test]
    fn garbage_decision_input_reprompts() {
        let script = "TodoApp\n\
                      features\n\
                      1\n\
                      maybe\n";
        let (session, outcome, transcript) = run_script(script);
        assert_eq!(outcome.stop, ChatStop::Abandoned);
        assert!(transcript.contains("Please pick one of the offered answers."));
        assert_eq!(session.services.auth.decision, crate::core::session::TriState::Unknown);
        assert_eq!(outcome.turns, 3);
    }
}
