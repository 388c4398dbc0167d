//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use docent_domain::{Session, SessionSummary};
use std::time::{SystemTime, UNIX_EPOCH};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a session listing.
    pub fn format_summaries(&self, summaries: &[SessionSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_summaries_json(summaries),
            OutputFormat::Table => Ok(self.format_summaries_table(summaries)),
            OutputFormat::Quiet => Ok(summaries
                .iter()
                .map(|s| s.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_summaries_json(&self, summaries: &[SessionSummary]) -> Result<String> {
        let values: Vec<serde_json::Value> = summaries
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.id.to_string(),
                    "title": s.title,
                    "has_topics": s.has_topics,
                    "has_questions": s.has_questions,
                    "created_at": s.created_at,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&values)?)
    }

    fn format_summaries_table(&self, summaries: &[SessionSummary]) -> String {
        if summaries.is_empty() {
            return self.colorize("No sessions found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Title", "Topics", "Questions", "Created"]);

        for summary in summaries {
            builder.push_record([
                &summary.id.to_string()[..8], // Truncate ID for readability
                &summary.title,
                if summary.has_topics { "yes" } else { "-" },
                if summary.has_questions { "yes" } else { "-" },
                &format_age(summary.created_at),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a full session with its item lists.
    pub fn format_session(&self, session: &Session) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "id": session.id.to_string(),
                    "title": session.title,
                    "created_at": session.created_at,
                    "topics": session.topics.iter().map(|i| &i.label).collect::<Vec<_>>(),
                    "questions": session.questions.iter().map(|i| &i.label).collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(session.id.to_string()),
            OutputFormat::Table => {
                let mut out = String::new();
                out.push_str(&format!(
                    "{} ({})\n",
                    self.colorize(&session.title, "bold"),
                    format_age(session.created_at)
                ));

                if !session.topics.is_empty() {
                    out.push_str(&format!("\n{}\n", self.colorize("Topics:", "blue")));
                    for (idx, item) in session.topics.iter().enumerate() {
                        out.push_str(&format!("  {}) {}\n", idx + 1, item.label));
                    }
                }

                if !session.questions.is_empty() {
                    out.push_str(&format!("\n{}\n", self.colorize("Questions:", "blue")));
                    for (idx, item) in session.questions.iter().enumerate() {
                        out.push_str(&format!("  {}) {}\n", idx + 1, item.label));
                    }
                }

                if session.topics.is_empty() && session.questions.is_empty() {
                    out.push_str(&self.colorize("\nNo items extracted yet.\n", "yellow"));
                }

                Ok(out)
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Apply a color if colors are enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "red" => text.red().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "bold" => text.bold().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render a creation timestamp as a rough age.
fn format_age(created_at: u64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let delta = now.saturating_sub(created_at);

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        format!("{}m ago", delta / 60)
    } else if delta < 86400 {
        format!("{}h ago", delta / 3600)
    } else {
        format!("{}d ago", delta / 86400)
    }
}
