//! Prompt construction for item extraction

use docent_domain::traits::CompletionRequest;
use docent_domain::ItemKind;

const TOPIC_SYSTEM: &str = "You are a helpful assistant. Extract all important topics from the text. \
Your response must be a valid JSON array of objects, where each object has a \"topic\" property. \
Example format: [{\"topic\": \"X topic\"}, {\"topic\": \"Y topic\"}]. \
Do not include any other text or formatting, just the JSON array.";

const QUESTION_SYSTEM: &str = "You are a helpful assistant. Extract all questions from the text. \
Your response must be a valid JSON array of objects, where each object has a \"question\" property. \
Example format: [{\"question\": \"What is X?\"}, {\"question\": \"How does Y work?\"}]. \
Do not include any other text or formatting, just the JSON array.";

/// Build the completion request for extracting items of the given kind
pub fn extraction_request(kind: ItemKind, text: &str) -> CompletionRequest {
    match kind {
        ItemKind::Topic => CompletionRequest::new(
            TOPIC_SYSTEM,
            format!(
                "Extract all the important topics from the following text:\n\n{}",
                text
            ),
        ),
        ItemKind::Question => CompletionRequest::new(
            QUESTION_SYSTEM,
            format!("Extract questions from the following text:\n\n{}", text),
        ),
    }
}
