use std::path::{Path, PathBuf};

pub const STORE_DIR: [&str; 2] = [".codegen", "store"];

#[must_use]
pub fn store_root(home: &Path) -> PathBuf {
    home.join(STORE_DIR[0]).join(STORE_DIR[1])
}

#[must_use]
pub fn sanitize_key_for_filename(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            ':' | '/' | '\\' | ' ' => '-',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{sanitize_key_for_filename, store_root};

    #[test]
    fn store_root_nests_under_home() {
        let root = store_root(Path::new("/home/dev"));
        assert_eq!(root, Path::new("/home/dev/.codegen/store"));
    }

    #[test]
    fn sanitize_replaces_separator_characters() {
        assert_eq!(
            sanitize_key_for_filename("codegen.history"),
            "codegen.history"
        );
        assert_eq!(sanitize_key_for_filename("a:b/c\\d e"), "a-b-c-d-e");
    }
}
