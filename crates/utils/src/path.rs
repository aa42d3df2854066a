/// Width of a response-size band, in bytes
pub const SIZE_BUCKET_WIDTH: u64 = 1000;

/// Groups a content length into its 1 KB band: `floor(len / 1000) * 1000`
pub fn size_bucket(content_length: u64) -> u64 {
    (content_length / SIZE_BUCKET_WIDTH) * SIZE_BUCKET_WIDTH
}

pub fn is_directory_path(path: &str) -> bool {
    path.ends_with('/')
}

/// Strips leading dots and whitespace: ".php " -> "php"
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_string()
}

/// Returns the extension of the last path segment, if any ("a/b.tar.gz" -> "gz")
pub fn path_extension(path: &str) -> Option<&str> {
    if is_directory_path(path) {
        return None;
    }
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < segment.len() => Some(&segment[idx + 1..]),
        _ => None,
    }
}

/// Joins a base URL and a relative candidate path with exactly one slash
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_bucket_bands() {
        assert_eq!(size_bucket(0), 0);
        assert_eq!(size_bucket(999), 0);
        assert_eq!(size_bucket(1200), 1000);
        assert_eq!(size_bucket(1800), 1000);
        assert_eq!(size_bucket(2900), 2000);
    }

    #[test]
    fn test_path_extension() {
        assert_eq!(path_extension("index.php"), Some("php"));
        assert_eq!(path_extension("backup/site.tar.gz"), Some("gz"));
        assert_eq!(path_extension(".htaccess"), None);
        assert_eq!(path_extension("admin/"), None);
        assert_eq!(path_extension("readme"), None);
        assert_eq!(path_extension("v1.2/api"), None);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://host/", "/admin"), "http://host/admin");
        assert_eq!(join_url("http://host/app", "login.php"), "http://host/app/login.php");
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".php"), "php");
        assert_eq!(normalize_extension(" asp "), "asp");
    }
}
