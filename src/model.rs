use chrono::NaiveDateTime;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// One task record as returned by the API. Only `id` and `title` are
/// guaranteed by the server; everything else defaults when absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn status_label(&self) -> &'static str {
        if self.completed { "Done" } else { "Pending" }
    }
}

/// Server-side filters forwarded as query parameters on GET /tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

impl Filter {
    /// all -> pending -> done -> all
    pub fn cycle_completed(&mut self) {
        self.completed = match self.completed {
            None => Some(false),
            Some(false) => Some(true),
            Some(true) => None,
        };
    }

    pub fn set_priority(&mut self, value: &str) {
        let trimmed = value.trim();
        self.priority = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Query-string suffix appended after the mandatory page/limit params.
    /// Empty when no filter is active.
    pub fn query_suffix(&self) -> String {
        let mut suffix = String::new();
        if let Some(completed) = self.completed {
            suffix.push_str(&format!("&completed={}", completed));
        }
        if let Some(priority) = &self.priority {
            suffix.push_str(&format!("&priority={}", encode_component(priority)));
        }
        suffix
    }

    pub fn label(&self) -> String {
        let status = match self.completed {
            None => "all",
            Some(true) => "done",
            Some(false) => "pending",
        };
        match &self.priority {
            Some(p) => format!("{} / priority {}", status, p),
            None => status.to_string(),
        }
    }
}

/// Everything but the unreserved characters gets escaped in query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
