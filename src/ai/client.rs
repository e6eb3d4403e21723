use crate::ai::types::{AiError, IdeaSeed};
use crate::board::types::{Idea, IdeaCategory};
use serde_json::{json, Value};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Shown in the result buffer when the brainstorm call fails for any reason.
const BRAINSTORM_FALLBACK: &str = "Fout bij verbinden met AI. Controleer je API Key.";

const SYSTEM_INSTRUCTION: &str = "Je bent een creatieve AI assistent voor DigiHart.nl.";

/// Thin wrapper around the Gemini `generateContent` endpoint. Every public
/// method degrades to a placeholder or empty result; no error escapes the
/// wrapper. No request timeout is set: a hung call only ever stalls its own
/// result buffer.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        let base_url = base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();
        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    /// Freeform brainstorm: three short ideas on a topic within a category.
    /// Returns the fallback message when the call fails.
    pub async fn brainstorm(&self, topic: &str, category: IdeaCategory, language: &str) -> String {
        let prompt = format!(
            "Je bent een innovatie consultant voor DigiHart.nl. \
             Brainstorm 3 creatieve ideeën over het onderwerp: \"{}\" in de categorie: \"{}\". \
             Geef je antwoord in het {}. Houd het kort en krachtig.",
            topic,
            category.as_str(),
            language
        );

        let request = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "systemInstruction": {"parts": [{"text": SYSTEM_INSTRUCTION}]},
            "generationConfig": {"temperature": 0.9}
        });

        match self.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => "Geen resultaat.".to_string(),
            Err(e) => {
                eprintln!("Brainstorm request failed: {}", e);
                BRAINSTORM_FALLBACK.to_string()
            }
        }
    }

    /// Structured generation: partial ideas constrained to the category enum.
    /// Malformed or failed responses yield an empty vector.
    pub async fn generate_ideas(&self, topic: &str, language: &str) -> Vec<IdeaSeed> {
        let prompt = format!(
            "Genereer 3 innovatievoorstellen over het onderwerp: \"{}\". \
             Geef titel en omschrijving in het {}.",
            topic, language
        );

        let category_names: Vec<&str> = IdeaCategory::ALL.iter().map(|c| c.as_str()).collect();
        let request = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "systemInstruction": {"parts": [{"text": SYSTEM_INSTRUCTION}]},
            "generationConfig": {
                "temperature": 0.9,
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": {"type": "STRING"},
                            "description": {"type": "STRING"},
                            "category": {"type": "STRING", "enum": category_names}
                        },
                        "required": ["title", "description", "category"]
                    }
                }
            }
        });

        match self.generate(&request).await {
            Ok(text) => parse_idea_seeds(&text),
            Err(e) => {
                eprintln!("Structured generation failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Suggest a short official reply to an idea for the admin response field.
    /// Empty string on failure.
    pub async fn suggest_reply(&self, idea: &Idea, language: &str) -> String {
        let prompt = format!(
            "Een inwoner diende dit idee in op het DigiHart.nl ideeënbord:\n\
             Titel: {}\nOmschrijving: {}\n\n\
             Schrijf een korte, vriendelijke officiële reactie namens het beheer, \
             in het {}. Maximaal twee zinnen.",
            idea.title, idea.description, language
        );

        let request = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "systemInstruction": {"parts": [{"text": SYSTEM_INSTRUCTION}]},
            "generationConfig": {"temperature": 0.4}
        });

        match self.generate(&request).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                eprintln!("Reply suggestion failed: {}", e);
                String::new()
            }
        }
    }

    async fn generate(&self, request: &Value) -> Result<String, AiError> {
        if self.api_key.trim().is_empty() {
            return Err(AiError::MissingKey);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            let message = body
                .pointer("/error/message")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error")
                .to_string();
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        extract_text(&body).ok_or(AiError::EmptyResponse)
    }
}

/// Pull the concatenated text parts out of a `generateContent` response.
fn extract_text(body: &Value) -> Option<String> {
    let parts = body.pointer("/candidates/0/content/parts")?.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse structured output into seeds. Elements that fail to parse (missing
/// fields, category outside the closed set) are skipped rather than failing
/// the whole batch; anything unparseable yields an empty vector.
fn parse_idea_seeds(text: &str) -> Vec<IdeaSeed> {
    let trimmed = strip_code_fence(text);

    let Ok(items) = serde_json::from_str::<Vec<Value>>(trimmed) else {
        eprintln!("Structured generation returned non-JSON payload");
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<IdeaSeed>(item).ok())
        .filter(|seed| !seed.title.trim().is_empty() && !seed.description.trim().is_empty())
        .collect()
}

/// Models occasionally wrap JSON output in a markdown fence despite the
/// response MIME type.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_concatenates_parts() {
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "Idee 1"}, {"text": " en idee 2"}]
                }
            }]
        });
        assert_eq!(extract_text(&body).unwrap(), "Idee 1 en idee 2");
    }

    #[test]
    fn test_extract_text_handles_missing_candidates() {
        assert!(extract_text(&json!({})).is_none());
        assert!(extract_text(&json!({"candidates": []})).is_none());
    }

    #[test]
    fn test_parse_idea_seeds_valid_payload() {
        let text = r#"[
            {"title": "Buurtbieb", "description": "Minibieb per wijk", "category": "Community"},
            {"title": "Zonnepad", "description": "Fietspad met zonnecellen", "category": "Sustainability"}
        ]"#;

        let seeds = parse_idea_seeds(text);
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].category, IdeaCategory::Community);
        assert_eq!(seeds[1].title, "Zonnepad");
    }

    #[test]
    fn test_parse_idea_seeds_skips_invalid_elements() {
        let text = r#"[
            {"title": "Ok", "description": "Fine", "category": "Health"},
            {"title": "Bad category", "description": "x", "category": "Quantum"},
            {"title": "", "description": "blank title", "category": "Art"}
        ]"#;

        let seeds = parse_idea_seeds(text);
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].title, "Ok");
    }

    #[test]
    fn test_parse_idea_seeds_malformed_payload_is_empty() {
        assert!(parse_idea_seeds("not json at all").is_empty());
        assert!(parse_idea_seeds("{\"title\": \"object not array\"}").is_empty());
    }

    #[test]
    fn test_parse_idea_seeds_strips_markdown_fence() {
        let text = "```json\n[{\"title\": \"T\", \"description\": \"D\", \"category\": \"Art\"}]\n```";
        let seeds = parse_idea_seeds(text);
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].category, IdeaCategory::Art);
    }
}
