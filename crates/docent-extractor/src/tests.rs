//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{Extractor, ExtractorConfig, ExtractorError, ExtractionRequest};
    use docent_domain::ItemKind;
    use docent_llm::MockProvider;
    use std::sync::Arc;

    fn extractor_with(response: &str) -> Extractor<MockProvider> {
        Extractor::new(
            Arc::new(MockProvider::new(response)),
            ExtractorConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_full_topic_extraction_flow() {
        let extractor = extractor_with(
            r#"[{"topic": "Ownership"}, {"topic": "Borrowing"}, {"topic": "Lifetimes"}]"#,
        );

        let outcome = extractor
            .extract(ExtractionRequest {
                text: "Rust's ownership system governs borrowing and lifetimes.".to_string(),
                kind: ItemKind::Topic,
            })
            .await
            .unwrap();

        assert_eq!(outcome.items.len(), 3);
        assert_eq!(outcome.items[0].label, "Ownership");
        assert_eq!(outcome.items[2].label, "Lifetimes");
        assert!(outcome.items.iter().all(|i| i.detail.is_none()));
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.metadata.records_attempted, 3);
    }

    #[tokio::test]
    async fn test_full_question_extraction_flow() {
        let extractor = extractor_with(r#"[{"question": "What does the borrow checker do?"}]"#);

        let outcome = extractor
            .extract(ExtractionRequest {
                text: "What does the borrow checker do?".to_string(),
                kind: ItemKind::Question,
            })
            .await
            .unwrap();

        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].label, "What does the borrow checker do?");
        assert_eq!(outcome.metadata.kind, ItemKind::Question);
    }

    #[tokio::test]
    async fn test_extraction_with_invalid_json() {
        let extractor = extractor_with("This is not JSON");

        let result = extractor
            .extract(ExtractionRequest {
                text: "Some text".to_string(),
                kind: ItemKind::Topic,
            })
            .await;

        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_extraction_with_empty_response() {
        let extractor = extractor_with("[]");

        let outcome = extractor
            .extract(ExtractionRequest {
                text: "Some text".to_string(),
                kind: ItemKind::Topic,
            })
            .await
            .unwrap();

        assert!(outcome.items.is_empty());
        assert_eq!(outcome.metadata.records_attempted, 0);
    }

    #[tokio::test]
    async fn test_extraction_tolerates_partial_records() {
        let extractor = extractor_with(
            r#"[{"topic": "Ownership"}, {"wrong_key": "x"}, {"topic": "Traits"}]"#,
        );

        let outcome = extractor
            .extract(ExtractionRequest {
                text: "Some text".to_string(),
                kind: ItemKind::Topic,
            })
            .await
            .unwrap();

        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.metadata.records_attempted, 3);
    }

    #[tokio::test]
    async fn test_extraction_text_too_long() {
        let extractor = extractor_with("[]");

        let long_text = "a".repeat(ExtractorConfig::default().max_text_length + 1);
        let result = extractor
            .extract(ExtractionRequest {
                text: long_text,
                kind: ItemKind::Topic,
            })
            .await;

        assert!(matches!(result, Err(ExtractorError::TextTooLong(_, _))));
    }

    #[tokio::test]
    async fn test_extraction_surfaces_provider_failure() {
        let mut provider = MockProvider::default();
        provider.add_failure("Extract all the important topics from the following text:\n\nX", "boom");

        let extractor = Extractor::new(Arc::new(provider), ExtractorConfig::default());

        let result = extractor
            .extract(ExtractionRequest {
                text: "X".to_string(),
                kind: ItemKind::Topic,
            })
            .await;

        match result {
            Err(ExtractorError::Completion(msg)) => assert!(msg.contains("boom")),
            other => panic!("Expected Completion error, got {:?}", other),
        }
    }
}
