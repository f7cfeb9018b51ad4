use anyhow::{Context, Result};
use regex::Regex;

use crate::{logger, session::Session};

/// Classification of a console response. The console reports outcomes only
/// as HTML markers, and omits them entirely for some statement kinds (DDL
/// such as CREATE TABLE ... IF NOT EXISTS), so a third state is needed:
/// `Executed` means no marker was recognized and the statement is assumed to
/// have gone through. That assumption can mask real failures; callers treat
/// it as accepted but it is logged and displayed distinctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// No recognized marker; optimistically treated as accepted.
    Executed,
    Error(String),
}

impl Outcome {
    pub fn accepted(&self) -> bool {
        !matches!(self, Outcome::Error(_))
    }

    pub fn label(&self) -> &str {
        match self {
            Outcome::Success => "success",
            Outcome::Executed => "executed",
            Outcome::Error(msg) => msg,
        }
    }
}

/// Result of a dump-file import: the classification plus the human-readable
/// lines scraped from success or error fragments.
#[derive(Debug)]
pub struct ImportOutcome {
    pub outcome: Outcome,
    pub messages: Vec<String>,
}

impl Session {
    /// Post one SQL statement through the console's query endpoint and return
    /// the raw response markup. The verification queries scan this themselves
    /// instead of going through the marker classification.
    pub fn raw_query(&self, sql: &str, db: &str) -> Result<String> {
        let url = format!("{}/sql.php", self.base_url);
        let body = self
            .client
            .post(&url)
            .form(&[
                ("server", self.server.as_str()),
                ("db", db),
                ("token", self.token.as_str()),
                ("sql_query", sql),
            ])
            .send()
            .with_context(|| format!("failed to post SQL to {url}"))?
            .text()?;
        Ok(body)
    }

    /// Submit one SQL statement and classify the response.
    pub fn execute(&self, sql: &str, db: &str) -> Result<Outcome> {
        let body = self.raw_query(sql, db)?;
        let outcome = classify(&body)?;
        if outcome == Outcome::Executed {
            logger::warn(&format!(
                "no success/error marker in response, assuming executed: {}",
                sql.chars().take(80).collect::<String>()
            ));
        }
        Ok(outcome)
    }

    /// Upload a whole SQL dump through the console's import endpoint. The
    /// console rotates the token on this page; when the response carries a
    /// fresh one the session picks it up for subsequent requests.
    pub fn import(&mut self, dump: Vec<u8>, db: &str) -> Result<ImportOutcome> {
        let url = format!("{}/import.php", self.base_url);
        let file = reqwest::blocking::multipart::Part::bytes(dump)
            .file_name("migration.sql")
            .mime_str("application/sql")?;
        let form = reqwest::blocking::multipart::Form::new()
            .text("server", self.server.clone())
            .text("db", db.to_string())
            .text("token", self.token.clone())
            .text("import_type", "database")
            .text("format", "sql")
            .text("sql_compatibility", "NONE")
            .text("sql_no_auto_value_on_zero", "something")
            .text("charset_of_file", "utf-8")
            .part("import_file", file);
        let body = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .with_context(|| format!("failed to upload dump to {url}"))?
            .text()?;

        let outcome = classify(&body)?;
        let messages = match outcome {
            Outcome::Error(_) => fragments(&body, "error")?,
            _ => fragments(&body, "success")?,
        };

        // import.php links back with a rotated 32-hex token
        let refresh = Regex::new(r"token=([a-f0-9]{32})")?;
        if let Some(c) = refresh.captures(&body) {
            self.token = c[1].to_string();
            logger::debug(&format!("token refreshed after import: {}", self.token));
        }

        Ok(ImportOutcome { outcome, messages })
    }
}

/// Marker scan, in priority order: a success marker wins even when the word
/// "error" appears elsewhere in unrelated markup; failing both markers the
/// response is ambiguous.
pub fn classify(body: &str) -> Result<Outcome> {
    let lower = body.to_lowercase();
    if lower.contains("success") || body.contains("ic_s_success") {
        return Ok(Outcome::Success);
    }
    if lower.contains("error") {
        let re = Regex::new(r#"(?s)class="error"[^>]*>(.*?)</div>"#)?;
        let msg = match re.captures(body) {
            Some(c) => strip_tags(&c[1])?,
            None => "unknown error".to_string(),
        };
        return Ok(Outcome::Error(msg));
    }
    Ok(Outcome::Executed)
}

/// Collect the tag-stripped, non-empty inner texts of every fragment whose
/// class matches (`success` or `error`).
pub fn fragments(body: &str, class: &str) -> Result<Vec<String>> {
    let re = Regex::new(&format!(r#"(?s)class="{class}"[^>]*>(.*?)</div>"#))?;
    let mut out = Vec::new();
    for c in re.captures_iter(body) {
        let text = strip_tags(&c[1])?;
        if !text.is_empty() {
            out.push(text);
        }
    }
    Ok(out)
}

pub fn strip_tags(html: &str) -> Result<String> {
    let re = Regex::new(r"<[^>]+>")?;
    Ok(re.replace_all(html, "").trim().to_string())
}
