//! Immutable option catalogs for language and model selection.
//!
//! Pure data: components receive these by reference and never mutate them.

/// One selectable value with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Target languages offered for generation, `auto` first.
pub const LANGUAGES: &[CatalogOption] = &[
    CatalogOption { value: "auto", label: "Auto-detect" },
    CatalogOption { value: "javascript", label: "JavaScript" },
    CatalogOption { value: "python", label: "Python" },
    CatalogOption { value: "typescript", label: "TypeScript" },
    CatalogOption { value: "java", label: "Java" },
    CatalogOption { value: "c", label: "C" },
    CatalogOption { value: "cpp", label: "C++" },
    CatalogOption { value: "csharp", label: "C#" },
    CatalogOption { value: "go", label: "Go" },
    CatalogOption { value: "rust", label: "Rust" },
    CatalogOption { value: "php", label: "PHP" },
    CatalogOption { value: "ruby", label: "Ruby" },
    CatalogOption { value: "swift", label: "Swift" },
    CatalogOption { value: "kotlin", label: "Kotlin" },
    CatalogOption { value: "sql", label: "SQL" },
    CatalogOption { value: "html", label: "HTML/CSS" },
    CatalogOption { value: "shell", label: "Shell/Bash" },
];

/// Models offered for generation, default first.
pub const MODELS: &[CatalogOption] = &[
    CatalogOption { value: "mixtral-8x7b-32768", label: "Mixtral 8x7B (default)" },
    CatalogOption { value: "llama3-70b-8192", label: "Llama 3 70B" },
    CatalogOption { value: "llama3-8b-8192", label: "Llama 3 8B" },
    CatalogOption { value: "gemma-7b-it", label: "Gemma 7B" },
];

#[must_use]
pub fn language_label(value: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|option| option.value == value)
        .map(|option| option.label)
}

#[must_use]
pub fn is_known_model(value: &str) -> bool {
    MODELS.iter().any(|option| option.value == value)
}

#[cfg(test)]
mod tests {
    use super::{is_known_model, language_label, LANGUAGES, MODELS};

    #[test]
    fn catalogs_lead_with_their_defaults() {
        assert_eq!(LANGUAGES[0].value, local_store::DEFAULT_LANGUAGE);
        assert_eq!(MODELS[0].value, local_store::DEFAULT_MODEL);
    }

    #[test]
    fn lookups_resolve_known_values() {
        assert_eq!(language_label("rust"), Some("Rust"));
        assert_eq!(language_label("cobol"), None);
        assert!(is_known_model("gemma-7b-it"));
        assert!(!is_known_model("gpt-x"));
    }
}
