//! Wikipedia "learn more" resolver
//!
//! Builds a Wikipedia search link for a graded question so curious
//! players can read up on it.

use quizcord_application::ReferenceResolver;
use tracing::debug;

/// Resolves question prompts to Wikipedia search URLs
pub struct WikipediaResolver {
    base_url: String,
}

impl WikipediaResolver {
    pub fn new() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
        }
    }
}

impl Default for WikipediaResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceResolver for WikipediaResolver {
    fn learn_more_url(&self, prompt: &str) -> Option<String> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/w/index.php", self.base_url),
            &[("search", prompt)],
        );
        match url {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!("could not build learn-more url: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_percent_encoded() {
        let resolver = WikipediaResolver::new();
        let url = resolver
            .learn_more_url("What is the chemical symbol for gold?")
            .unwrap();

        assert!(url.starts_with("https://en.wikipedia.org/w/index.php?search="));
        assert!(url.contains("chemical+symbol") || url.contains("chemical%20symbol"));
    }
}
