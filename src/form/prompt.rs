use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::FormState;
use crate::scoring::{parse_field, CATEGORIES};

/// Prompt with a message and return the trimmed answer.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        anyhow::bail!("Input ended before all questions were answered");
    }
    Ok(line.trim().to_string())
}

/// Prompt with a default value. Returns the default if the answer is empty.
fn prompt_with_default<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    let answer = if default.is_empty() {
        prompt(input, output, &format!("{}: ", message))?
    } else {
        prompt(input, output, &format!("{} [{}]: ", message, default))?
    };

    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

/// Ask all thirteen questions on stdin/stdout.
pub fn run_questionnaire(form: &mut FormState) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_questionnaire_with(form, &mut input, &mut output)
}

/// Ask all thirteen questions, using the current field text as defaults.
///
/// A negative answer is refused on the spot and the same question is asked
/// again, so the finished form always validates.
pub fn run_questionnaire_with<R: BufRead, W: Write>(
    form: &mut FormState,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "Answer each question (empty keeps the value in brackets, or 0).")
        .context("Failed to write prompt")?;

    for (i, spec) in CATEGORIES.iter().enumerate() {
        let message = format!(
            "{:>2}. {} {}? ({})",
            i + 1,
            spec.question,
            spec.cadence.per_phrase(),
            spec.unit
        );

        let answer = loop {
            let answer = prompt_with_default(input, output, &message, form.field(i))?;
            if parse_field(&answer) < 0.0 {
                writeln!(output, "  Invalid: please enter a positive number. Try again.")
                    .context("Failed to write prompt")?;
                continue;
            }
            break answer;
        };

        form.set_field(i, answer);
    }

    Ok(())
}
