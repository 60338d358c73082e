use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use quote_spec::{
    AnswerMap, PriceTable, QuoteSubmission, WizardSession, build_render_payload, render_json_ui,
    render_text,
};

use crate::config::{WizardConfig, load_answers};
use crate::input::parse_input;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Answers JSON from an earlier session to resume from
    #[arg(long, value_name = "PATH")]
    pub answers: Option<PathBuf>,
    /// Write the quote submission here instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
    /// Render each step as a JSON payload instead of text
    #[arg(long)]
    pub json: bool,
}

const HELP: &str = "Commands: :back, :edit <id>, :clear, :done, :quit";

pub fn run(args: RunArgs, config: WizardConfig) -> Result<()> {
    let answers = match &args.answers {
        Some(path) => load_answers(path)?,
        None => AnswerMap::new(),
    };
    let session = WizardSession::resume(config.form, answers)?;

    let stdin = io::stdin();
    let mut stderr = io::stderr();
    let submission = drive(
        session,
        &config.prices,
        stdin.lock(),
        &mut stderr,
        args.json,
    )?;
    let payload = submission.to_json_pretty()?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
            fs::write(path, payload)
                .with_context(|| format!("failed to write submission {}", path.display()))?;
            tracing::info!(path = %path.display(), "quote submission written");
        }
        None => println!("{payload}"),
    }
    Ok(())
}

/// Drives a session from line input until the visitor confirms the summary.
///
/// Rendered steps and prompts go to `output`; the caller owns the submission.
pub fn drive<R, W>(
    mut session: WizardSession,
    prices: &PriceTable,
    mut input: R,
    output: &mut W,
    json: bool,
) -> Result<QuoteSubmission>
where
    R: BufRead,
    W: Write,
{
    let mut show = true;
    loop {
        if show {
            let payload = build_render_payload(&session, Some(prices));
            if json {
                writeln!(output, "{}", serde_json::to_string(&render_json_ui(&payload))?)?;
            } else {
                writeln!(output, "{}", render_text(&payload))?;
            }
        }
        show = true;
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            if session.is_complete() {
                return Ok(session.finish(prices)?);
            }
            bail!("input closed before the quote was complete");
        }
        let line = line.trim();

        if let Some(command) = line.strip_prefix(':') {
            let (name, arg) = command
                .split_once(char::is_whitespace)
                .map(|(name, arg)| (name, arg.trim()))
                .unwrap_or((command, ""));
            match name {
                "quit" | "q" => bail!("wizard cancelled"),
                "back" | "b" => {
                    session.retreat();
                }
                "edit" | "e" if !arg.is_empty() => {
                    if let Err(err) = session.edit(arg) {
                        writeln!(output, "{err}")?;
                        show = false;
                    }
                }
                "clear" => match session.current_question().map(|question| question.id.clone()) {
                    Some(id) => {
                        session.clear_answer(&id);
                    }
                    None => {
                        writeln!(output, "Use :edit <id> to pick a question first.")?;
                        show = false;
                    }
                },
                "done" | "d" => match confirm(&session, prices, output)? {
                    Some(submission) => return Ok(submission),
                    None => show = false,
                },
                _ => {
                    writeln!(output, "{HELP}")?;
                    show = false;
                }
            }
            continue;
        }

        let Some(question) = session.current_question().cloned() else {
            if line.is_empty() {
                if let Some(submission) = confirm(&session, prices, output)? {
                    return Ok(submission);
                }
            } else {
                writeln!(output, "Type :done to submit or :edit <id> to change an answer.")?;
            }
            show = false;
            continue;
        };

        if !line.is_empty() {
            let stored = parse_input(&question, line)
                .and_then(|value| session.set_answer(&question.id, value).map_err(Into::into));
            if let Err(err) = stored {
                writeln!(output, "{err:#}")?;
                show = false;
                continue;
            }
        }
        if session.can_advance() {
            session.advance();
        } else {
            writeln!(output, "An answer is required.")?;
            show = false;
        }
    }
}

fn confirm<W: Write>(
    session: &WizardSession,
    prices: &PriceTable,
    output: &mut W,
) -> Result<Option<QuoteSubmission>> {
    if !session.is_complete() {
        writeln!(output, "Answer the remaining questions first.")?;
        return Ok(None);
    }
    match session.finish(prices) {
        Ok(submission) => Ok(Some(submission)),
        Err(err) => {
            writeln!(output, "{err}")?;
            Ok(None)
        }
    }
}
