//! Federated-wiki page parsing.
//!
//! A page in `export.json` looks like this (fields we don't use are ignored):
//!
//! ```json
//! {
//!   "title": "Hello World",
//!   "story": [
//!     {"type": "paragraph", "id": "a1", "text": "First paragraph"},
//!     {"type": "markdown", "id": "b2", "text": "Second"}
//!   ],
//!   "journal": [
//!     {"type": "create", "date": 1420070400000},
//!     {"type": "edit", "date": 1420156800000}
//!   ]
//! }
//! ```
//!
//! Decoding is tolerant: a missing or `null` `story`/`journal` is an empty
//! list, a story item without a string `text` is an empty fragment, and
//! journal entries without a numeric `date` are passed over. Only a
//! `story` or `journal` that is not a list makes a page malformed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::Record;
use crate::config::CreatedPolicy;
use crate::error::PageExtractionError;

/// Separator placed between story fragments.
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Raw page structure for deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct RawPage {
    /// Body fragments in display order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub story: Vec<RawFragment>,
    /// Edit history, in no guaranteed order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub journal: Vec<RawJournalEntry>,
}

/// One `story` item.
///
/// Any JSON value decodes: an item that is not an object, or whose `text`
/// is not a string, becomes an empty fragment.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Value")]
pub struct RawFragment {
    /// Fragment text (absent on some plugin items)
    pub text: Option<String>,
}

impl From<Value> for RawFragment {
    fn from(item: Value) -> Self {
        Self {
            text: string_field(&item, "text"),
        }
    }
}

/// One `journal` item.
///
/// Decoding never fails: a `type` that is not a string or a `date` that is
/// not a number is read as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Value")]
pub struct RawJournalEntry {
    /// Event type: "create", "fork", "edit", "add", "move", "remove", ...
    pub kind: Option<String>,
    /// Epoch milliseconds
    pub date: Option<Number>,
}

impl From<Value> for RawJournalEntry {
    fn from(item: Value) -> Self {
        let date = match item.get("date") {
            Some(Value::Number(date)) => Some(date.clone()),
            _ => None,
        };
        Self {
            kind: string_field(&item, "type"),
            date,
        }
    }
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(str::to_owned)
}

impl RawJournalEntry {
    /// Returns the entry date in whole milliseconds, if it has one.
    ///
    /// Fractional dates are truncated toward zero.
    pub fn date_millis(&self) -> Option<i64> {
        let date = self.date.as_ref()?;
        date.as_i64().or_else(|| date.as_f64().map(|f| f as i64))
    }

    /// Returns `true` if the entry records a create or fork event.
    pub fn is_creation(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(CreatedPolicy::is_creation_event)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rebuilds the page body from its story.
///
/// Fragment texts are joined with a blank line and a single trailing newline
/// is appended, so an empty story yields `"\n"`.
///
/// # Example
///
/// ```ignore
/// let story = vec![fragment("a"), fragment("b")];
/// assert_eq!(reconstruct_content(&story), "a\n\nb\n");
/// ```
pub fn reconstruct_content(story: &[RawFragment]) -> String {
    let mut content = story
        .iter()
        .map(|fragment| fragment.text.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(FRAGMENT_SEPARATOR);
    content.push('\n');
    content
}

/// Picks the creation date, in epoch milliseconds, from a journal.
///
/// Returns `None` when no entry qualifies under `policy`.
pub fn resolve_created_millis(journal: &[RawJournalEntry], policy: CreatedPolicy) -> Option<i64> {
    match policy {
        CreatedPolicy::LatestJournalDate => journal.iter().filter_map(RawJournalEntry::date_millis).max(),
        CreatedPolicy::FirstCreateOrFork => journal
            .iter()
            .filter(|entry| entry.is_creation())
            .find_map(RawJournalEntry::date_millis),
    }
}

/// Converts epoch milliseconds to a UTC timestamp.
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Returns a short name for the JSON type of `value`, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decodes a single page value.
pub fn decode_page(value: Value) -> Result<RawPage, PageExtractionError> {
    if !value.is_object() {
        return Err(PageExtractionError::NotAnObject(json_type_name(&value)));
    }
    serde_json::from_value(value).map_err(PageExtractionError::Malformed)
}

/// Turns one export entry into a [`Record`].
///
/// This is the core per-page logic: decode, rebuild the body, resolve the
/// creation time.
pub fn parse_page(
    slug: &str,
    value: Value,
    policy: CreatedPolicy,
) -> Result<Record, PageExtractionError> {
    let page = decode_page(value)?;

    let millis = resolve_created_millis(&page.journal, policy)
        .ok_or(PageExtractionError::NoCreationDate { policy })?;
    let created = millis_to_datetime(millis).ok_or(PageExtractionError::DateOutOfRange(millis))?;

    Ok(Record::new(slug, reconstruct_content(&page.story), created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fragment(text: &str) -> RawFragment {
        RawFragment {
            text: Some(text.to_string()),
        }
    }

    fn entry(kind: &str, date: i64) -> RawJournalEntry {
        RawJournalEntry {
            kind: Some(kind.to_string()),
            date: Some(Number::from(date)),
        }
    }

    #[test]
    fn test_reconstruct_content_joins_with_blank_line() {
        let story = vec![fragment("a"), fragment("b")];
        assert_eq!(reconstruct_content(&story), "a\n\nb\n");
    }

    #[test]
    fn test_reconstruct_content_empty_story() {
        assert_eq!(reconstruct_content(&[]), "\n");
    }

    #[test]
    fn test_reconstruct_content_missing_text() {
        let story = vec![fragment("a"), RawFragment { text: None }, fragment("c")];
        assert_eq!(reconstruct_content(&story), "a\n\n\n\nc\n");
    }

    #[test]
    fn test_latest_date_ignores_type_and_order() {
        let journal = vec![entry("edit", 3000), entry("create", 1000), entry("remove", 2000)];
        assert_eq!(
            resolve_created_millis(&journal, CreatedPolicy::LatestJournalDate),
            Some(3000)
        );
    }

    // The two policies disagree whenever a page is edited after creation.
    #[test]
    fn test_policies_diverge_on_later_edit() {
        let journal = vec![entry("create", 1000), entry("edit", 2000)];
        assert_eq!(
            resolve_created_millis(&journal, CreatedPolicy::LatestJournalDate),
            Some(2000)
        );
        assert_eq!(
            resolve_created_millis(&journal, CreatedPolicy::FirstCreateOrFork),
            Some(1000)
        );
    }

    #[test]
    fn test_first_create_or_fork_takes_first_in_journal_order() {
        let journal = vec![entry("edit", 100), entry("fork", 900), entry("create", 50)];
        assert_eq!(
            resolve_created_millis(&journal, CreatedPolicy::FirstCreateOrFork),
            Some(900)
        );
    }

    #[test]
    fn test_first_create_or_fork_without_creation_event() {
        let journal = vec![entry("edit", 100), entry("add", 200)];
        assert_eq!(
            resolve_created_millis(&journal, CreatedPolicy::FirstCreateOrFork),
            None
        );
    }

    #[test]
    fn test_undated_entries_are_skipped() {
        let journal = vec![
            RawJournalEntry {
                kind: Some("create".into()),
                date: None,
            },
            entry("edit", 42),
        ];
        assert_eq!(
            resolve_created_millis(&journal, CreatedPolicy::LatestJournalDate),
            Some(42)
        );
        assert_eq!(
            resolve_created_millis(&journal, CreatedPolicy::FirstCreateOrFork),
            None
        );
    }

    #[test]
    fn test_fractional_date_truncates() {
        let entry: RawJournalEntry =
            serde_json::from_value(json!({"type": "create", "date": 1500.9})).unwrap();
        assert_eq!(entry.date_millis(), Some(1500));
    }

    #[test]
    fn test_decode_page_tolerates_missing_and_null_fields() {
        let page = decode_page(json!({"title": "x"})).unwrap();
        assert!(page.story.is_empty());
        assert!(page.journal.is_empty());

        let page = decode_page(json!({"story": null, "journal": null})).unwrap();
        assert!(page.story.is_empty());
    }

    #[test]
    fn test_decode_page_rejects_non_object() {
        let err = decode_page(json!("just a string")).unwrap_err();
        assert!(matches!(err, PageExtractionError::NotAnObject("string")));
    }

    #[test]
    fn test_decode_page_tolerates_bad_story_items() {
        let page = decode_page(json!({"story": [{"text": "a"}, null, {"text": 5}, "b"]})).unwrap();
        assert_eq!(reconstruct_content(&page.story), "a\n\n\n\n\n\n\n");
    }

    #[test]
    fn test_decode_page_tolerates_bad_journal_entries() {
        let page = decode_page(json!({"journal": [
            {"type": "create", "date": 1000},
            {"type": "edit", "date": "2000"},
            {"type": 7, "date": 1500},
            null
        ]}))
        .unwrap();

        assert_eq!(page.journal.len(), 4);
        assert_eq!(page.journal[1].date_millis(), None);
        assert!(!page.journal[2].is_creation());
        assert_eq!(
            resolve_created_millis(&page.journal, CreatedPolicy::LatestJournalDate),
            Some(1500)
        );
        assert_eq!(
            resolve_created_millis(&page.journal, CreatedPolicy::FirstCreateOrFork),
            Some(1000)
        );
    }

    #[test]
    fn test_decode_page_rejects_wrong_story_shape() {
        let err = decode_page(json!({"story": 7})).unwrap_err();
        assert!(matches!(err, PageExtractionError::Malformed(_)));
    }

    #[test]
    fn test_parse_page_end_to_end() {
        let value = json!({
            "story": [{"text": "Hi"}],
            "journal": [{"type": "create", "date": 0}, {"type": "fork", "date": 500}]
        });
        let record = parse_page("hello-world", value, CreatedPolicy::LatestJournalDate).unwrap();
        assert_eq!(record.slug, "hello-world");
        assert_eq!(record.content, "Hi\n");
        assert_eq!(record.created_millis(), 500);
    }

    #[test]
    fn test_parse_page_empty_journal() {
        let err = parse_page("p", json!({"story": []}), CreatedPolicy::LatestJournalDate)
            .unwrap_err();
        assert!(matches!(err, PageExtractionError::NoCreationDate { .. }));
    }

    #[test]
    fn test_parse_page_date_out_of_range() {
        let value = json!({"journal": [{"type": "create", "date": i64::MAX}]});
        let err = parse_page("p", value, CreatedPolicy::LatestJournalDate).unwrap_err();
        assert!(matches!(err, PageExtractionError::DateOutOfRange(_)));
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!([1])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
