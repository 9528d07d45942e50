//! The `aula review` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use aula_core::session::{AdminGate, SessionContext};
use aula_media::load_config_from;
use aula_report::{filter_records, write_review_html, ReviewFilter, ReviewSummary};
use aula_store::{unescape_response, AnswerLog};

/// Widest a response gets in the terminal table before truncation.
const RESPONSE_PREVIEW_CHARS: usize = 48;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    unit: Option<String>,
    session: Option<String>,
    hour: Option<String>,
    exercise: Option<String>,
    student: Option<String>,
    format: String,
    output: Option<PathBuf>,
    secret: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let gate = AdminGate::from_env();
    let mut ctx = SessionContext::guest();
    if !ctx.elevate(&gate, &secret) {
        anyhow::bail!("reviewing answers requires the admin secret");
    }

    let log = AnswerLog::new(config.responses_path());
    let records = match log.load() {
        Ok(records) => records,
        Err(e) => {
            // Missing is already Ok(empty); anything else we log and
            // present the same way the original did
            tracing::warn!("answer log could not be read: {e}");
            println!("No answers yet.");
            return Ok(());
        }
    };

    let filter = ReviewFilter {
        unit,
        session,
        hour,
        exercise,
        student,
    };
    let filtered = filter_records(&records, &filter);

    if filtered.is_empty() {
        println!("No answers yet.");
        return Ok(());
    }

    match format.as_str() {
        "text" => print_table(&filtered),
        "html" => {
            let path = output.unwrap_or_else(|| config.data_dir.join("review.html"));
            write_review_html(&filtered, &describe_filter(&filter), &path)?;
            println!("Review saved to: {}", path.display());
        }
        other => {
            eprintln!("Unknown format: {other}");
        }
    }

    Ok(())
}

fn describe_filter(filter: &ReviewFilter) -> String {
    let mut parts = Vec::new();
    if let Some(unit) = &filter.unit {
        parts.push(format!("unit {unit}"));
    }
    if let Some(session) = &filter.session {
        parts.push(format!("session {session}"));
    }
    if let Some(hour) = &filter.hour {
        parts.push(format!("hour {hour}"));
    }
    if let Some(exercise) = &filter.exercise {
        parts.push(format!("exercise {exercise}"));
    }
    if let Some(student) = &filter.student {
        parts.push(format!("student {student}"));
    }
    if parts.is_empty() {
        "all answers".to_string()
    } else {
        parts.join(", ")
    }
}

fn print_table(records: &[&aula_core::record::AnswerRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        "Time", "Student", "Unit", "Session", "Hour", "Exercise", "Response",
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(&record.timestamp),
            Cell::new(format!("{} <{}>", record.user_name, record.user_email)),
            Cell::new(&record.unit),
            Cell::new(&record.session),
            Cell::new(&record.hour),
            Cell::new(&record.exercise_id),
            Cell::new(preview(&record.response)),
        ]);
    }

    println!("{table}");

    let summary = ReviewSummary::compute(records);
    println!("\n{} answers", summary.total);
    if let (Some(first), Some(last)) = (&summary.first_timestamp, &summary.last_timestamp) {
        println!("from {first} to {last}");
    }
}

/// One-line preview of a stored (escaped) response.
fn preview(stored: &str) -> String {
    let text = unescape_response(stored).replace('\n', " ");
    if text.chars().count() <= RESPONSE_PREVIEW_CHARS {
        text
    } else {
        let cut: String = text.chars().take(RESPONSE_PREVIEW_CHARS).collect();
        format!("{cut}...")
    }
}
