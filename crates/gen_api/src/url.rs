/// Default base URL for generation requests.
pub const DEFAULT_API_BASE_URL: &str = "https://backend-agente-ia-1.onrender.com/api";

/// Path of the streaming generation endpoint.
pub const GENERATE_STREAM_PATH: &str = "/generate/stream";

/// Normalize a base URL to the streaming generation endpoint.
///
/// Normalization rules:
/// 1) keep a URL already ending in `/generate/stream` unchanged
/// 2) append `/stream` when the path ends in `/generate`
/// 3) append `/generate/stream` otherwise
pub fn normalize_generate_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_API_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/generate/stream") {
        return trimmed.to_string();
    }
    if trimmed.ends_with("/generate") {
        return format!("{trimmed}/stream");
    }
    format!("{trimmed}{GENERATE_STREAM_PATH}")
}
