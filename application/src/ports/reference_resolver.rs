//! "Learn more" reference port

/// Builds a further-reading link for a graded question
pub trait ReferenceResolver: Send + Sync {
    /// A URL for the given question prompt, if one can be built
    fn learn_more_url(&self, prompt: &str) -> Option<String>;
}

/// No-op resolver for when references are not wanted
pub struct NoReference;

impl ReferenceResolver for NoReference {
    fn learn_more_url(&self, _prompt: &str) -> Option<String> {
        None
    }
}
