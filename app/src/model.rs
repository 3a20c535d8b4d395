use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier of a blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BlogId(pub u64);

impl std::fmt::Display for BlogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Mock REST servers hand out ids as numbers or as numeric strings.
impl<'de> Deserialize<'de> for BlogId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Ok(BlogId(id)),
            RawId::Text(id) => id
                .trim()
                .parse()
                .map(BlogId)
                .map_err(|_| serde::de::Error::custom(format!("invalid blog id {id:?}"))),
        }
    }
}

/// A persisted article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    pub description: String,
    /// Paragraphs separated by a blank line.
    pub content: String,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// ISO 8601 timestamp.
    pub date: String,
}

impl Blog {
    /// The cover image URL, if one is set and not blank.
    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Content split on blank lines, with empty chunks dropped.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.content
            .split("\n\n")
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .collect()
    }

    /// Estimated reading time at 200 words per minute, never less than a minute.
    pub fn read_time_minutes(&self) -> usize {
        let words = self.content.split_whitespace().count();
        (words / WORDS_PER_MINUTE).max(1)
    }

    /// Description shortened for list cards.
    pub fn preview(&self) -> String {
        truncate_description(&self.description, PREVIEW_LENGTH)
    }
}

const WORDS_PER_MINUTE: usize = 200;
const PREVIEW_LENGTH: usize = 140;

/// A blog before the server has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub date: String,
}

impl BlogDraft {
    /// True when every required text field has something other than whitespace in it.
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.description, &self.content]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Splits a comma-separated list of categories, dropping blanks.
pub fn parse_categories(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_string)
        .collect()
}

/// The current time as an ISO 8601 string with millisecond precision.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// "Jan 5, 2025". Unparseable dates are returned as is.
pub fn format_short_date(date: &str) -> String {
    format_date(date, "%b %-d, %Y")
}

/// "January 5, 2025". Unparseable dates are returned as is.
pub fn format_long_date(date: &str) -> String {
    format_date(date, "%B %-d, %Y")
}

fn format_date(date: &str, format: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(date)
        .map(|date| date.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"));

    match parsed {
        Ok(date) => date.format(format).to_string(),
        Err(_) => date.to_string(),
    }
}

/// Cuts `text` to at most `max_chars` characters, appending "..." when something was cut.
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", text[..end].trim_end()),
        None => text.to_string(),
    }
}
