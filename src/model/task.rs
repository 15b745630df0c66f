use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use indexmap::IndexSet;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Oldest year accepted in a due date
pub const MIN_DUE_YEAR: u32 = 1900;
/// Latest year accepted in a due date
pub const MAX_DUE_YEAR: u32 = 3000;

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)-(\d+)$").expect("date pattern compiles"));

/// Rejections produced by field validation on tasks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Task text cannot be empty")]
    EmptyText,
    #[error("Tag cannot be empty")]
    EmptyTag,
    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),
}

/// Stable task identity. Assigned once, never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority. Cycles none → low → medium → high → none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    #[serde(rename = "", alias = "none")]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// The next priority in the toggle cycle
    pub fn next(self) -> Priority {
        match self {
            Priority::None => Priority::Low,
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::None,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Priority::None
    }

    /// Exclamation marker shown in front of the task text
    pub fn marker(self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::Low => "!",
            Priority::Medium => "!!",
            Priority::High => "!!!",
        }
    }
}

/// A due date in `YYYY-MM-DD` form.
///
/// Validation is deliberately relaxed: the year must be within
/// [`MIN_DUE_YEAR`, `MAX_DUE_YEAR`], the month within 1..=12 and the day
/// within 1..=31, with no per-month day count. `2024-02-31` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(String);

impl DueDate {
    /// Parse `year-month-day`, normalising to zero-padded `YYYY-MM-DD`.
    pub fn parse(input: &str) -> Result<DueDate, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidDate(trimmed.to_string());
        let caps = DATE_SHAPE.captures(trimmed).ok_or_else(invalid)?;
        let year: u32 = caps[1].parse().map_err(|_| invalid())?;
        let month: u32 = caps[2].parse().map_err(|_| invalid())?;
        let day: u32 = caps[3].parse().map_err(|_| invalid())?;

        if !(MIN_DUE_YEAR..=MAX_DUE_YEAR).contains(&year)
            || !(1..=12).contains(&month)
            || !(1..=31).contains(&day)
        {
            return Err(invalid());
        }
        Ok(DueDate(format!("{:04}-{:02}-{:02}", year, month, day)))
    }

    /// Build a date from the three separately entered fields
    pub fn from_fields(day: &str, month: &str, year: &str) -> Result<DueDate, ValidationError> {
        DueDate::parse(&format!("{}-{}-{}", year.trim(), month.trim(), day.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date, if this is a real one (`2024-02-31` is not)
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }

    /// True when the date is a real calendar date strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.to_naive().is_some_and(|d| d < today)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tag is valid iff it is non-empty after trimming
pub fn validate_tag(tag: &str) -> Result<&str, ValidationError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(ValidationError::EmptyTag);
    }
    Ok(tag)
}

/// Task text is valid iff it is non-empty after trimming
pub fn validate_text(text: &str) -> Result<&str, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(text)
}

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Task text (serialized as `task`)
    #[serde(rename = "task")]
    pub text: String,
    #[serde(default)]
    pub checked: bool,
    /// Name of the owning context
    pub context: String,
    #[serde(default, skip_serializing_if = "Priority::is_none")]
    pub priority: Priority,
    /// Distinct tags in insertion order
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub tags: IndexSet<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_date_as_none"
    )]
    pub due_date: Option<DueDate>,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>, context: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            checked: false,
            context: context.into(),
            priority: Priority::None,
            tags: IndexSet::new(),
            due_date: None,
        }
    }

    /// Add a tag. Returns false when the tag was already present.
    pub fn add_tag(&mut self, tag: &str) -> Result<bool, ValidationError> {
        let tag = validate_tag(tag)?;
        Ok(self.tags.insert(tag.to_string()))
    }

    /// Remove the tags at the given positions (display order)
    pub fn remove_tags(&mut self, indices: &[usize]) {
        let mut position = 0;
        self.tags.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
    }

    /// Tags joined for display, e.g. `home, urgent`
    pub fn tag_line(&self) -> String {
        self.tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<DueDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(DueDate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_cycles_back_to_none_after_four_steps() {
        let mut p = Priority::None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            p = p.next();
            seen.push(p);
        }
        assert_eq!(
            seen,
            vec![Priority::Low, Priority::Medium, Priority::High, Priority::None]
        );
    }

    #[test]
    fn relaxed_date_accepts_february_31() {
        let date = DueDate::parse("2024-02-31").unwrap();
        assert_eq!(date.as_str(), "2024-02-31");
        assert!(date.to_naive().is_none());
    }

    #[test]
    fn date_rejects_month_13() {
        assert_eq!(
            DueDate::parse("2024-13-01"),
            Err(ValidationError::InvalidDate("2024-13-01".into()))
        );
    }

    #[test]
    fn date_year_bounds_are_inclusive() {
        assert!(DueDate::parse("1900-01-01").is_ok());
        assert!(DueDate::parse("3000-12-31").is_ok());
        assert!(DueDate::parse("1899-12-31").is_err());
        assert!(DueDate::parse("3001-01-01").is_err());
    }

    #[test]
    fn date_rejects_garbage_and_zero_fields() {
        for bad in ["", "tomorrow", "2024/01/01", "2024-1", "2024-00-10", "2024-01-00", "2024-01-32", "-2024-01-01"] {
            assert!(DueDate::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn date_from_fields_pads() {
        let date = DueDate::from_fields("5", "3", "2025").unwrap();
        assert_eq!(date.as_str(), "2025-03-05");
    }

    #[test]
    fn overdue_only_for_real_past_dates() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(DueDate::parse("2025-05-31").unwrap().is_overdue(today));
        assert!(!DueDate::parse("2025-06-01").unwrap().is_overdue(today));
        assert!(!DueDate::parse("2025-02-31").unwrap().is_overdue(today));
    }

    #[test]
    fn duplicate_tags_are_ignored() {
        let mut task = Task::new(TaskId(1), "Buy milk", "Home");
        assert_eq!(task.add_tag("shop"), Ok(true));
        assert_eq!(task.add_tag("shop"), Ok(false));
        assert_eq!(task.add_tag("Shop"), Ok(true));
        assert_eq!(task.tag_line(), "shop, Shop");
    }

    #[test]
    fn empty_tag_is_rejected() {
        let mut task = Task::new(TaskId(1), "Buy milk", "Home");
        assert_eq!(task.add_tag("   "), Err(ValidationError::EmptyTag));
        assert!(task.tags.is_empty());
    }

    #[test]
    fn remove_tags_by_position_keeps_order() {
        let mut task = Task::new(TaskId(1), "t", "c");
        for tag in ["a", "b", "c", "d"] {
            task.add_tag(tag).unwrap();
        }
        task.remove_tags(&[0, 2]);
        assert_eq!(task.tags.iter().cloned().collect::<Vec<_>>(), vec!["b", "d"]);
    }

    #[test]
    fn serde_omits_defaults() {
        let task = Task::new(TaskId(7), "Walk dog", "Personal");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"task":"Walk dog","checked":false,"context":"Personal"}"#
        );
    }

    #[test]
    fn serde_reads_empty_priority_and_date() {
        let task: Task = serde_json::from_str(
            r#"{"id":1,"task":"x","checked":true,"context":"Work","priority":"","due_date":""}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::None);
        assert_eq!(task.due_date, None);
        assert!(task.checked);
    }

    #[test]
    fn serde_reads_full_record() {
        let task: Task = serde_json::from_str(
            r#"{"id":3,"task":"Ship","checked":false,"context":"Work","priority":"high","tags":["a","b","a"],"due_date":"2025-01-09"}"#,
        )
        .unwrap();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.tags.len(), 2);
        assert_eq!(task.due_date.as_ref().map(DueDate::as_str), Some("2025-01-09"));
    }
}
