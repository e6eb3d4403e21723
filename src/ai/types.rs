use crate::board::types::IdeaCategory;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key configured")]
    MissingKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("could not extract text from response")]
    EmptyResponse,
}

/// A partial idea produced by structured generation: enough to prefill the
/// add-idea form, never inserted into the collection directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSeed {
    pub title: String,
    pub description: String,
    pub category: IdeaCategory,
}
