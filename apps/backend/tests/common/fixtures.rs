//! Test fixtures and factory functions for request bodies.

use serde_json::json;
use uuid::Uuid;

/// Create a register request body.
pub fn register_request(email: &str) -> serde_json::Value {
    json!({ "email": email })
}

/// Create a learn-word request body.
pub fn learn_word_request(word_id: Uuid) -> serde_json::Value {
    json!({ "word_id": word_id })
}

/// Create a learn-phrasal-verb request body.
pub fn learn_phrasal_verb_request(verb_id: Uuid) -> serde_json::Value {
    json!({ "verb_id": verb_id })
}

/// Create a complete-game request body.
pub fn complete_game_request(game_type: &str, score: i64) -> serde_json::Value {
    json!({ "game_type": game_type, "score": score })
}

/// Generate a unique category tag so tests do not see each other's rows.
pub fn unique_category(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}
