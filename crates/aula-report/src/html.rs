//! HTML review export.
//!
//! Produces a self-contained HTML file with all CSS inlined, so the
//! review can be opened or mailed without any other assets.

use std::path::Path;

use anyhow::{Context, Result};

use aula_core::record::AnswerRecord;
use aula_store::unescape_response;

use crate::review::ReviewSummary;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the review document for a set of (already filtered) records.
pub fn generate_review_html(records: &[&AnswerRecord], title: &str) -> String {
    let summary = ReviewSummary::compute(records);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>aula review — {}</title>\n",
        html_escape(title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Submitted answers</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} | {} answers | generated {}</p>\n",
        html_escape(title),
        summary.total,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary counts
    html.push_str("<section class=\"summary\">\n<h2>By exercise</h2>\n<ul>\n");
    for (exercise, count) in &summary.by_exercise {
        html.push_str(&format!(
            "<li><strong>{}</strong>: {count}</li>\n",
            html_escape(exercise)
        ));
    }
    html.push_str("</ul>\n<h2>By student</h2>\n<ul>\n");
    for (student, count) in &summary.by_student {
        html.push_str(&format!(
            "<li><strong>{}</strong>: {count}</li>\n",
            html_escape(student)
        ));
    }
    html.push_str("</ul>\n</section>\n");

    // Answer table
    html.push_str("<section>\n<h2>Answers</h2>\n<table>\n<thead><tr>");
    for column in [
        "Time", "Student", "Email", "Unit", "Session", "Hour", "Exercise", "Response",
    ] {
        html.push_str(&format!("<th>{column}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for record in records {
        html.push_str("<tr>");
        html.push_str(&format!("<td>{}</td>", html_escape(&record.timestamp)));
        html.push_str(&format!("<td>{}</td>", html_escape(&record.user_name)));
        html.push_str(&format!("<td>{}</td>", html_escape(&record.user_email)));
        html.push_str(&format!("<td>{}</td>", html_escape(&record.unit)));
        html.push_str(&format!("<td>{}</td>", html_escape(&record.session)));
        html.push_str(&format!("<td>{}</td>", html_escape(&record.hour)));
        html.push_str(&format!("<td>{}</td>", html_escape(&record.exercise_id)));
        // Stored responses are single-line escaped; show them multi-line
        html.push_str(&format!(
            "<td><pre>{}</pre></td>",
            html_escape(&unescape_response(&record.response))
        ));
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</section>\n");
    html.push_str("</body>\n</html>\n");
    html
}

/// Write the review document to a file.
pub fn write_review_html(records: &[&AnswerRecord], title: &str, path: &Path) -> Result<()> {
    let html = generate_review_html(records, title);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write review to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 70rem; color: #1d2129; }
header h1 { margin-bottom: 0.2rem; }
.meta { color: #667; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #d4d8dd; padding: 0.4rem 0.6rem; text-align: left; vertical-align: top; }
th { background: #f2f4f7; }
tr:nth-child(even) { background: #fafbfc; }
pre { margin: 0; white-space: pre-wrap; font-family: inherit; }
.summary ul { columns: 2; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn record(exercise: &str, response: &str) -> AnswerRecord {
        AnswerRecord {
            timestamp: "2026-02-01T09:00:00".into(),
            user_email: "ana@example.com".into(),
            user_name: "Ana <script>".into(),
            unit: "1".into(),
            session: "S1".into(),
            hour: "H1".into(),
            exercise_id: exercise.into(),
            response: response.into(),
        }
    }

    #[test]
    fn escapes_markup_in_fields() {
        let records = [record("grammar", "I <b>get up</b> at 7.")];
        let refs: Vec<&AnswerRecord> = records.iter().collect();
        let html = generate_review_html(&refs, "all answers");
        assert!(!html.contains("Ana <script>"));
        assert!(html.contains("Ana &lt;script&gt;"));
        assert!(html.contains("I &lt;b&gt;get up&lt;/b&gt; at 7."));
    }

    #[test]
    fn stored_escapes_render_as_newlines() {
        let records = [record("writing", "First line.\\nSecond line.")];
        let refs: Vec<&AnswerRecord> = records.iter().collect();
        let html = generate_review_html(&refs, "all answers");
        assert!(html.contains("First line.\nSecond line."));
    }

    #[test]
    fn writes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("review.html");
        let records = [record("grammar", "answer")];
        let refs: Vec<&AnswerRecord> = records.iter().collect();

        write_review_html(&refs, "session S1", &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("session S1"));
    }
}
