//! Append-only CSV answer log.
//!
//! One row per saved submission, header written when the file is first
//! created. Appends go through the OS append mode with no locking, so
//! two simultaneous writers can interleave within a row; the file as a
//! whole stays readable because nothing is ever rewritten.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::Utc;

use aula_core::record::{AnswerRecord, NewAnswer};

use crate::error::StoreError;

/// What `append` did with the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// A row was written.
    Appended,
    /// The response was empty; nothing was written.
    SkippedEmpty,
}

/// Escape a response so one CSV row stays on one line: every newline
/// becomes the literal two-character sequence `\n`.
pub fn escape_response(text: &str) -> String {
    text.replace("\r\n", "\\n").replace('\n', "\\n")
}

/// Reverse [`escape_response`].
pub fn unescape_response(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// The append-only answer log.
pub struct AnswerLog {
    path: PathBuf,
}

impl AnswerLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the log lives on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one submission, stamping it with the current UTC time at
    /// second precision. An empty response is a no-op: no row, and no
    /// file creation either.
    pub fn append(&self, answer: &NewAnswer) -> Result<AppendOutcome, StoreError> {
        if answer.is_empty() {
            return Ok(AppendOutcome::SkippedEmpty);
        }

        let record = AnswerRecord {
            timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            user_email: answer.user_email.clone(),
            user_name: answer.user_name.clone(),
            unit: answer.unit.clone(),
            session: answer.session.clone(),
            hour: answer.hour.clone(),
            exercise_id: answer.exercise_id.clone(),
            response: escape_response(&answer.response),
        };
        self.append_record(&record)?;
        Ok(AppendOutcome::Appended)
    }

    fn append_record(&self, record: &AnswerRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| self.map_csv_error(e))?;
        writer
            .flush()
            .map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Read the whole log into memory. The file, however large, is
    /// parsed per call; callers filter in memory.
    ///
    /// A missing file is an empty log. A present-but-unparsable file is
    /// [`StoreError::Malformed`].
    pub fn load(&self) -> Result<Vec<AnswerRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|e| self.map_csv_error(e))?;
        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: AnswerRecord = result.map_err(|e| self.map_csv_error(e))?;
            records.push(record);
        }
        tracing::debug!(rows = records.len(), path = %self.path.display(), "loaded answer log");
        Ok(records)
    }

    fn map_csv_error(&self, error: csv::Error) -> StoreError {
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(io) => StoreError::io(&self.path, io),
            _ => StoreError::Malformed {
                path: self.path.clone(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_answer(text: &str) -> NewAnswer {
        NewAnswer {
            user_email: "ana@example.com".into(),
            user_name: "Ana".into(),
            unit: "1".into(),
            session: "S1".into(),
            hour: "H1".into(),
            exercise_id: "grammar".into(),
            response: text.into(),
        }
    }

    #[test]
    fn append_writes_header_then_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let log = AnswerLog::new(dir.path().join("responses.csv"));

        let outcome = log.append(&sample_answer("I get up at 7.")).unwrap();
        assert_eq!(outcome, AppendOutcome::Appended);

        let content = std::fs::read_to_string(log.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "timestamp,user_email,user_name,unit,session,hour,exercise_id,response"
        );
        assert_eq!(lines.clone().count(), 1);
        assert!(lines.next().unwrap().ends_with("I get up at 7."));
    }

    #[test]
    fn header_is_not_repeated_on_second_append() {
        let dir = tempfile::tempdir().unwrap();
        let log = AnswerLog::new(dir.path().join("responses.csv"));

        log.append(&sample_answer("first")).unwrap();
        log.append(&sample_answer("second")).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let headers = content
            .lines()
            .filter(|l| l.starts_with("timestamp,"))
            .count();
        assert_eq!(headers, 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn empty_response_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let log = AnswerLog::new(dir.path().join("responses.csv"));

        let outcome = log.append(&sample_answer("")).unwrap();
        assert_eq!(outcome, AppendOutcome::SkippedEmpty);
        assert!(!log.path().exists());

        // And an existing file stays byte-identical
        log.append(&sample_answer("kept")).unwrap();
        let before = std::fs::read(log.path()).unwrap();
        log.append(&sample_answer("")).unwrap();
        let after = std::fs::read(log.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn multiline_response_roundtrips_through_escaping() {
        let dir = tempfile::tempdir().unwrap();
        let log = AnswerLog::new(dir.path().join("responses.csv"));

        let text = "I get up at 7.\nThen I have breakfast.\r\nThen I go to work.";
        log.append(&sample_answer(text)).unwrap();

        let records = log.load().unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].response.contains('\n'));
        assert_eq!(
            unescape_response(&records[0].response),
            "I get up at 7.\nThen I have breakfast.\nThen I go to work."
        );
    }

    #[test]
    fn append_increases_row_count_by_one() {
        let dir = tempfile::tempdir().unwrap();
        let log = AnswerLog::new(dir.path().join("responses.csv"));

        for expected in 1..=3 {
            log.append(&sample_answer("another answer")).unwrap();
            assert_eq!(log.load().unwrap().len(), expected);
        }
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = AnswerLog::new(dir.path().join("responses.csv"));
        assert!(log.load().unwrap().is_empty());
    }

    #[test]
    fn load_preserves_fields_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let log = AnswerLog::new(dir.path().join("responses.csv"));
        log.append(&sample_answer("I get up at 7.")).unwrap();

        let records = log.load().unwrap();
        let record = &records[0];
        assert_eq!(record.user_email, "ana@example.com");
        assert_eq!(record.user_name, "Ana");
        assert_eq!(record.unit, "1");
        assert_eq!(record.session, "S1");
        assert_eq!(record.hour, "H1");
        assert_eq!(record.exercise_id, "grammar");
        assert_eq!(record.response, "I get up at 7.");
    }

    #[test]
    fn malformed_csv_is_distinguishable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.csv");
        std::fs::write(
            &path,
            "timestamp,user_email,user_name,unit,session,hour,exercise_id,response\nonly,two\n",
        )
        .unwrap();

        let log = AnswerLog::new(&path);
        match log.load() {
            Err(StoreError::Malformed { .. }) => {}
            other => panic!("expected Malformed, got {other:?}"),
        }
    }
}
