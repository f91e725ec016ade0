use gen_api::url::DEFAULT_API_BASE_URL;
use gen_api::normalize_generate_url;

#[test]
fn url_appends_generate_stream_path() {
    assert_eq!(
        normalize_generate_url("https://api.example.com"),
        "https://api.example.com/generate/stream"
    );
}

#[test]
fn url_keeps_full_endpoint_unchanged() {
    assert_eq!(
        normalize_generate_url("https://api.example.com/generate/stream"),
        "https://api.example.com/generate/stream"
    );
}

#[test]
fn url_completes_generate_suffix() {
    assert_eq!(
        normalize_generate_url("https://api.example.com/generate/"),
        "https://api.example.com/generate/stream"
    );
}

#[test]
fn url_trims_trailing_slashes() {
    assert_eq!(
        normalize_generate_url("https://api.example.com/api///"),
        "https://api.example.com/api/generate/stream"
    );
}

#[test]
fn empty_input_falls_back_to_default_base() {
    assert_eq!(
        normalize_generate_url("  "),
        format!("{DEFAULT_API_BASE_URL}/generate/stream")
    );
}
