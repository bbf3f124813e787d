use tracing::warn;

use crate::constants::agent::FALLBACK_NAME;
use crate::services::A2aClient;

/// Trimmed caller name, `World` when missing or blank.
pub fn normalize_name(name: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_NAME)
        .to_string()
}

pub fn greeting_prompt(name: &str) -> String {
    format!("Say hello to {}.", name)
}

pub fn canned_greeting(name: &str) -> String {
    format!("Hello, {}!", name)
}

/// Asks the backend behind `client` for a greeting. A transport failure is
/// the one error recovered from here: it becomes the canned greeting.
pub async fn greet(client: &A2aClient, name: &str) -> String {
    match client.invoke_via_local_envelope(&greeting_prompt(name)).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Backend greeting failed, using canned reply: {}", e);
            canned_greeting(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_to_world() {
        assert_eq!(normalize_name(None), "World");
        assert_eq!(normalize_name(Some("   ")), "World");
        assert_eq!(normalize_name(Some(" Ada ")), "Ada");
    }

    #[test]
    fn prompt_and_canned_reply() {
        assert_eq!(greeting_prompt("Ada"), "Say hello to Ada.");
        assert_eq!(canned_greeting("Ada"), "Hello, Ada!");
    }
}
