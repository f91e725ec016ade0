use serde::{Deserialize, Serialize};

/// JSON body posted to the streaming generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub language: String,
    pub model: String,
}

impl GenerateRequest {
    pub fn new(
        prompt: impl Into<String>,
        language: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            language: language.into(),
            model: model.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GenerateRequest;

    #[test]
    fn request_serializes_wire_field_names() {
        let request = GenerateRequest::new("make a parser", "rust", "m1");
        let value = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(value["prompt"], "make a parser");
        assert_eq!(value["language"], "rust");
        assert_eq!(value["model"], "m1");
    }
}
