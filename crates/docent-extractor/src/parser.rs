//! Parse completion output into item labels

use crate::error::ExtractorError;
use docent_domain::ItemKind;
use serde_json::Value;
use tracing::warn;

/// Labels parsed from a completion response, plus the number of records that
/// were present but unusable
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLabels {
    /// Usable labels in response order
    pub labels: Vec<String>,

    /// Records skipped because they were not objects with the expected key
    pub skipped: usize,
}

/// Parse a completion response into item labels
///
/// The response must be a JSON array of objects keyed by the kind's record
/// key (`{"topic": …}` or `{"question": …}`). Models sometimes wrap the array
/// in a markdown code fence; that wrapper is stripped first. Individual
/// malformed records are skipped and counted, but a response that is not a
/// JSON array at all is an error.
pub fn parse_labels(response: &str, kind: ItemKind) -> Result<ParsedLabels, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let records = json
        .as_array()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON array".to_string()))?;

    let key = kind.record_key();
    let mut labels = Vec::new();
    let mut skipped = 0;

    for (idx, record) in records.iter().enumerate() {
        match record.get(key).and_then(|v| v.as_str()) {
            Some(label) if !label.trim().is_empty() => {
                labels.push(label.trim().to_string());
            }
            _ => {
                warn!("Skipping record {}: missing or empty '{}'", idx, key);
                skipped += 1;
            }
        }
    }

    Ok(ParsedLabels { labels, skipped })
}

/// Extract JSON from a response, handling markdown code fences
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence line and the closing fence
        let json_lines = &lines[1..lines.len().saturating_sub(1)];
        Ok(json_lines.join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_topics() {
        let response = r#"[{"topic": "Ownership"}, {"topic": "Borrowing"}]"#;

        let parsed = parse_labels(response, ItemKind::Topic).unwrap();
        assert_eq!(parsed.labels, vec!["Ownership", "Borrowing"]);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_parse_valid_questions() {
        let response = r#"[{"question": "What is ownership?"}]"#;

        let parsed = parse_labels(response, ItemKind::Question).unwrap();
        assert_eq!(parsed.labels, vec!["What is ownership?"]);
    }

    #[test]
    fn test_parse_with_markdown_wrapper() {
        let response = "```json\n[{\"topic\": \"Lifetimes\"}]\n```";

        let parsed = parse_labels(response, ItemKind::Topic).unwrap();
        assert_eq!(parsed.labels, vec!["Lifetimes"]);
    }

    #[test]
    fn test_parse_with_bare_fence() {
        let response = "```\n[{\"topic\": \"Traits\"}]\n```";

        let parsed = parse_labels(response, ItemKind::Topic).unwrap();
        assert_eq!(parsed.labels, vec!["Traits"]);
    }

    #[test]
    fn test_parse_not_json() {
        let result = parse_labels("This is not JSON", ItemKind::Topic);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_not_an_array() {
        let result = parse_labels(r#"{"topic": "Ownership"}"#, ItemKind::Topic);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_wrong_key_is_skipped() {
        // Question records in a topic response are individually unusable
        let response = r#"[{"question": "What?"}, {"topic": "Ownership"}]"#;

        let parsed = parse_labels(response, ItemKind::Topic).unwrap();
        assert_eq!(parsed.labels, vec!["Ownership"]);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_empty_label_is_skipped() {
        let response = r#"[{"topic": "   "}, {"topic": "Ownership"}]"#;

        let parsed = parse_labels(response, ItemKind::Topic).unwrap();
        assert_eq!(parsed.labels, vec!["Ownership"]);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_non_object_record_is_skipped() {
        let response = r#"["bare string", {"topic": "Ownership"}]"#;

        let parsed = parse_labels(response, ItemKind::Topic).unwrap();
        assert_eq!(parsed.labels, vec!["Ownership"]);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_labels_are_trimmed() {
        let response = r#"[{"topic": "  Ownership  "}]"#;

        let parsed = parse_labels(response, ItemKind::Topic).unwrap();
        assert_eq!(parsed.labels, vec!["Ownership"]);
    }

    #[test]
    fn test_empty_array() {
        let parsed = parse_labels("[]", ItemKind::Topic).unwrap();
        assert!(parsed.labels.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_extract_json_plain() {
        let json = r#"[{"topic": "X"}]"#;
        assert_eq!(extract_json(json).unwrap(), json);
    }

    #[test]
    fn test_extract_json_from_markdown() {
        let response = "```json\n[1, 2]\n```";
        assert_eq!(extract_json(response).unwrap().trim(), "[1, 2]");
    }
}
