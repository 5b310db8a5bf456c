//! The `verbdrill quiz` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use verbdrill_core::ids::UuidAllocator;
use verbdrill_core::quiz::{Feedback, QuizSession, QuizState};
use verbdrill_core::selector::select_for_mode;
use verbdrill_core::QuizMode;

use super::open_workspace;

/// How an interactive session ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Ending {
    Finished,
    /// Input ran out before the last question.
    Abandoned,
}

pub fn execute(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    count: Option<usize>,
    mode: String,
    seed: Option<u64>,
) -> Result<()> {
    let mode: QuizMode = mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let workspace = open_workspace(config_path.as_deref(), data_dir, Arc::new(UuidAllocator))?;
    let count = count.unwrap_or(workspace.config.quiz_size);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let verbs = select_for_mode(workspace.store.records(), mode, count, &mut rng);
    let mut session = QuizSession::new(verbs);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    play(&mut session, &mut input, &mut out)?;
    Ok(())
}

/// Drive a session over line-based input until it finishes or input ends.
pub fn play<R: BufRead, W: Write>(
    session: &mut QuizSession,
    input: &mut R,
    out: &mut W,
) -> Result<Ending> {
    if session.is_empty() {
        writeln!(out, "No verbs to quiz on. Score: 0/0")?;
        return Ok(Ending::Finished);
    }

    while let Some(item) = session.current() {
        let (position, total) = session.progress();
        let verb = item.verb.clone();
        writeln!(out, "\n[{position}/{total}] {} ({})", verb.base, verb.meaning)?;

        let feedback = loop {
            let Some(past) = prompt(input, out, "  past simple: ")? else {
                return abandon(session, out);
            };
            let Some(participle) = prompt(input, out, "  past participle: ")? else {
                return abandon(session, out);
            };
            match session.submit(&past, &participle)? {
                Feedback::Blank => writeln!(out, "  Both forms are required.")?,
                graded => break graded,
            }
        };

        match feedback {
            Feedback::Correct => writeln!(out, "  Correct!")?,
            Feedback::Incorrect { past, participle } => {
                writeln!(out, "  Not quite. Answer: {past} / {participle}")?
            }
            Feedback::Blank => {}
        }
        writeln!(out, "  Score: {}", session.score())?;

        if position < total && prompt(input, out, "  Press Enter for the next question")?.is_none()
        {
            return abandon(session, out);
        }
        if session.advance()? == QuizState::Finished {
            break;
        }
    }

    let summary = session.summary();
    writeln!(
        out,
        "\nQuiz complete! Score: {}/{} ({:.0}%)",
        summary.score,
        summary.total_questions,
        summary.ratio() * 100.0
    )?;
    Ok(Ending::Finished)
}

fn abandon<W: Write>(session: &QuizSession, out: &mut W) -> Result<Ending> {
    writeln!(
        out,
        "\nQuiz abandoned. Score so far: {}/{}",
        session.score(),
        session.len()
    )?;
    Ok(Ending::Abandoned)
}

/// Print `label` and read one line; `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
