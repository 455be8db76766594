//! Edge case tests for page extraction and materialization.
//!
//! Covers odd but legal export documents: unusual slugs, sparse or
//! unordered journals, and fragments with missing fields.

use std::fs;

use fedwiki_export::error::PageExtractionError;
use fedwiki_export::prelude::*;

fn single(json: &str) -> Export {
    transform(json.as_bytes()).unwrap()
}

// =========================================================================
// Slugs
// =========================================================================

mod slugs {
    use super::*;

    #[test]
    fn test_unicode_slug_kept_verbatim() {
        let export = single(
            r#"{"привет-мир": {"story": [{"text": "Привет"}], "journal": [{"type": "create", "date": 1}]}}"#,
        );
        assert_eq!(export.records[0].slug, "привет-мир");
        assert_eq!(export.records[0].file_name(), "привет-мир.md");
    }

    #[test]
    fn test_slug_with_spaces_and_case_not_normalized() {
        let export = single(
            r#"{"Welcome Visitors": {"story": [], "journal": [{"type": "create", "date": 1}]}}"#,
        );
        assert!(export.get("Welcome Visitors").is_some());
        assert!(export.get("welcome-visitors").is_none());
    }

    #[test]
    fn test_unsafe_slug_transforms_but_does_not_write() {
        let export = single(
            r#"{"a/b": {"story": [{"text": "x"}], "journal": [{"type": "create", "date": 1}]}}"#,
        );
        assert_eq!(export.records.len(), 1);

        let dir = tempfile::tempdir().unwrap();
        let err = MarkdownWriter::new(dir.path())
            .write(&export.records[0])
            .unwrap_err();
        assert_eq!(err.slug(), Some("a/b"));
        assert!(err.is_write());
        assert!(!dir.path().join("a").exists());
    }

    #[test]
    fn test_empty_document() {
        let export = single("{}");
        assert!(export.records.is_empty());
        assert!(export.is_complete());
        assert_eq!(export.page_count(), 0);
    }
}

// =========================================================================
// Journals
// =========================================================================

mod journals {
    use super::*;

    #[test]
    fn test_unordered_journal_uses_maximum() {
        let export = single(
            r#"{"p": {"story": [], "journal": [
                {"type": "edit", "date": 300},
                {"type": "create", "date": 100},
                {"type": "add", "date": 200}
            ]}}"#,
        );
        assert_eq!(export.records[0].created_millis(), 300);
    }

    #[test]
    fn test_entries_without_dates_are_ignored() {
        let export = single(
            r#"{"p": {"story": [], "journal": [
                {"type": "create"},
                {"type": "edit", "date": 42},
                {"type": "edit", "date": null}
            ]}}"#,
        );
        assert_eq!(export.records[0].created_millis(), 42);
    }

    #[test]
    fn test_fractional_date_truncated() {
        let export = single(r#"{"p": {"story": [], "journal": [{"type": "create", "date": 1234.9}]}}"#);
        assert_eq!(export.records[0].created_millis(), 1234);
    }

    #[test]
    fn test_negative_date_before_epoch() {
        let export = single(r#"{"p": {"story": [], "journal": [{"type": "create", "date": -1000}]}}"#);
        assert_eq!(export.records[0].created_millis(), -1000);
    }

    #[test]
    fn test_null_journal_is_skipped() {
        let export = single(r#"{"p": {"story": [{"text": "x"}], "journal": null}}"#);
        assert!(export.records.is_empty());
        assert!(matches!(
            export.skipped[0].reason,
            PageExtractionError::NoCreationDate { .. }
        ));
    }

    #[test]
    fn test_first_create_ignores_edits_only_journal() {
        let json = r#"{"p": {"story": [], "journal": [{"type": "edit", "date": 9}]}}"#;

        let latest = Transformer::new().transform_str(json).unwrap();
        assert_eq!(latest.records[0].created_millis(), 9);

        let first = Transformer::with_policy(CreatedPolicy::FirstCreateOrFork)
            .transform_str(json)
            .unwrap();
        assert!(first.records.is_empty());
        assert_eq!(first.skipped[0].slug, "p");
    }

    #[test]
    fn test_bad_journal_entries_do_not_drop_the_page() {
        let json = r#"{"p": {"story": [{"text": "x"}], "journal": [
            {"type": "create", "date": 1000},
            {"type": "edit", "date": "2000"},
            {"type": 7, "date": 1500},
            {"type": "edit", "date": "yesterday"},
            null
        ]}}"#;

        let latest = single(json);
        assert!(latest.is_complete());
        assert_eq!(latest.records[0].created_millis(), 1500);

        let first = Transformer::with_policy(CreatedPolicy::FirstCreateOrFork)
            .transform_str(json)
            .unwrap();
        assert_eq!(first.records[0].created_millis(), 1000);
    }

    #[test]
    fn test_journal_with_only_bad_dates_is_skipped() {
        let export = single(r#"{"p": {"story": [], "journal": [{"type": "create", "date": "yesterday"}]}}"#);
        assert!(export.records.is_empty());
        assert!(matches!(
            export.skipped[0].reason,
            PageExtractionError::NoCreationDate { .. }
        ));
    }

    #[test]
    fn test_journal_that_is_not_a_list_is_malformed() {
        let export = single(r#"{"p": {"story": [], "journal": {"type": "create", "date": 1}}}"#);
        assert!(matches!(
            export.skipped[0].reason,
            PageExtractionError::Malformed(_)
        ));
    }
}

// =========================================================================
// Story fragments
// =========================================================================

mod story {
    use super::*;

    #[test]
    fn test_missing_text_counts_as_empty() {
        let export = single(
            r#"{"p": {"story": [{"type": "image", "url": "x.png"}, {"text": "after"}], "journal": [{"type": "create", "date": 1}]}}"#,
        );
        assert_eq!(export.records[0].content, "\n\nafter\n");
    }

    #[test]
    fn test_null_text_counts_as_empty() {
        let export = single(
            r#"{"p": {"story": [{"text": null}], "journal": [{"type": "create", "date": 1}]}}"#,
        );
        assert_eq!(export.records[0].content, "\n");
    }

    #[test]
    fn test_text_with_trailing_newline_gets_another() {
        let export = single(
            r#"{"p": {"story": [{"text": "line\n"}], "journal": [{"type": "create", "date": 1}]}}"#,
        );
        assert_eq!(export.records[0].content, "line\n\n");
    }

    #[test]
    fn test_non_object_story_item_counts_as_empty() {
        let export = single(
            r#"{"p": {"story": [{"text": "a"}, null], "journal": [{"type": "create", "date": 1}]}}"#,
        );
        assert!(export.is_complete());
        assert_eq!(export.records[0].content, "a\n\n\n");
    }

    #[test]
    fn test_non_string_text_counts_as_empty() {
        let export = single(
            r#"{"p": {"story": [{"text": 42}, {"text": ["x"]}, {"text": "b"}], "journal": [{"type": "create", "date": 1}]}}"#,
        );
        assert_eq!(export.records[0].content, "\n\n\n\nb\n");
    }

    #[test]
    fn test_missing_story_is_empty_body() {
        let export = single(r#"{"p": {"journal": [{"type": "create", "date": 1}]}}"#);
        assert_eq!(export.records[0].content, "\n");
    }

    #[test]
    fn test_unicode_and_emoji_content_round_trips_to_disk() {
        let export = single(
            r#"{"p": {"story": [{"text": "日本語 🎉"}, {"text": "Ünïcödé"}], "journal": [{"type": "create", "date": 1}]}}"#,
        );

        let dir = tempfile::tempdir().unwrap();
        let path = MarkdownWriter::new(dir.path())
            .write(&export.records[0])
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "日本語 🎉\n\nÜnïcödé\n");
    }
}
