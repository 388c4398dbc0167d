//! Prompt construction for per-item detail fetches

use docent_domain::traits::CompletionRequest;
use docent_domain::ItemKind;

const TOPIC_DETAIL_SYSTEM: &str = "You are a helpful assistant. Provide a detailed and accurate \
explanation of the given topic loosely based on the provided context. Format the response in \
markdown for better readability. Highlight keywords; do not repeat the topic name at the start.";

const QUESTION_DETAIL_SYSTEM: &str = "You are a helpful assistant. Provide a detailed and accurate \
answer to the given question loosely based on the provided context. Format the response in \
markdown for better readability.";

/// Build the completion request for fetching one item's detail text
///
/// Topics get an explanation-oriented instruction, questions an
/// answer-oriented one; both embed the shared source text as context.
pub fn detail_request(kind: ItemKind, label: &str, context: &str) -> CompletionRequest {
    match kind {
        ItemKind::Topic => CompletionRequest::new(
            TOPIC_DETAIL_SYSTEM,
            format!("Context:\n{}\n\nTopic: {}", context, label),
        ),
        ItemKind::Question => CompletionRequest::new(
            QUESTION_DETAIL_SYSTEM,
            format!("Context:\n{}\n\nQuestion: {}", context, label),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_detail_request() {
        let request = detail_request(ItemKind::Question, "What is ownership?", "the context");

        assert!(request.system.contains("answer"));
        assert!(request.user.contains("Context:\nthe context"));
        assert!(request.user.contains("Question: What is ownership?"));
    }

    #[test]
    fn test_topic_detail_request() {
        let request = detail_request(ItemKind::Topic, "Ownership", "the context");

        assert!(request.system.contains("explanation"));
        assert!(request.user.contains("Topic: Ownership"));
    }

    #[test]
    fn test_kinds_use_distinct_instructions() {
        let topic = detail_request(ItemKind::Topic, "x", "ctx");
        let question = detail_request(ItemKind::Question, "x", "ctx");
        assert_ne!(topic.system, question.system);
    }
}
