//! The `aula answer` command.

use std::path::PathBuf;

use anyhow::Result;

use aula_core::record::NewAnswer;
use aula_core::session::SessionContext;
use aula_media::load_config_from;
use aula_store::{AnswerLog, AppendOutcome};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    unit: String,
    session: String,
    hour: String,
    exercise: String,
    email: String,
    name: String,
    text: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let ctx = SessionContext::student(&name, &email);

    let answer = NewAnswer {
        user_email: ctx.user_email.clone().unwrap_or_default(),
        user_name: ctx.user_name.clone().unwrap_or_default(),
        unit,
        session,
        hour,
        exercise_id: exercise,
        response: text,
    };

    let log = AnswerLog::new(config.responses_path());
    match log.append(&answer) {
        Ok(AppendOutcome::Appended) => {
            println!("Saved. Thank you, {}!", answer.user_name);
        }
        Ok(AppendOutcome::SkippedEmpty) => {
            println!("Nothing to save: the answer is empty.");
        }
        Err(e) => {
            // Store failures stay non-fatal: warn and carry on
            tracing::warn!("could not save answer: {e}");
            eprintln!("Warning: your answer could not be saved ({e}). Please try again.");
        }
    }

    Ok(())
}
