const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Short human-readable size: 512 -> "512B", 2048 -> "2KB"
pub fn human_size(size: u64) -> String {
    let mut value = size;
    for unit in UNITS {
        if value < 1024 {
            return format!("{}{}", value, unit);
        }
        value = (value + 512) / 1024;
    }
    format!("{}TB", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0B");
        assert_eq!(human_size(512), "512B");
        assert_eq!(human_size(2048), "2KB");
        assert_eq!(human_size(1536), "2KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5MB");
        assert_eq!(human_size(3 * 1024 * 1024 * 1024 * 1024), "3TB");
    }
}
