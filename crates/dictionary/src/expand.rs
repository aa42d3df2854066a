use dirsift_config::DictionarySettings;
use dirsift_utils::{is_directory_path, path_extension};

const EXTENSION_TAGS: [&str; 2] = ["%EXT%", "%ext%"];

/// Turns one word-list entry into the candidate paths it stands for
pub(crate) fn expand_entry(entry: &str, extensions: &[String], settings: &DictionarySettings) -> Vec<String> {
    let entry = entry.trim_start_matches('/');
    if entry.is_empty() {
        return Vec::new();
    }

    let mut forms = Vec::new();
    if let Some(tag) = EXTENSION_TAGS.iter().find(|tag| entry.contains(*tag)) {
        for extension in extensions {
            forms.push(entry.replace(tag, extension));
        }
    } else if settings.force_extensions && !is_directory_path(entry) && path_extension(entry).is_none() {
        forms.push(entry.to_string());
        for extension in extensions {
            forms.push(format!("{}.{}", entry, extension));
        }
        forms.push(format!("{}/", entry));
    } else {
        forms.push(entry.to_string());
    }

    let forms = forms.into_iter().map(|form| {
        if settings.lowercase {
            form.to_lowercase()
        } else {
            form
        }
    });

    if settings.prefixes.is_empty() && settings.suffixes.is_empty() {
        return forms.collect();
    }

    let mut affixed = Vec::new();
    for form in forms {
        if is_directory_path(&form) {
            affixed.push(form);
            continue;
        }
        for prefix in &settings.prefixes {
            if !form.starts_with(prefix.as_str()) {
                affixed.push(format!("{}{}", prefix, form));
            }
        }
        for suffix in &settings.suffixes {
            if !form.ends_with(suffix.as_str()) {
                affixed.push(format!("{}{}", form, suffix));
            }
        }
    }
    affixed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extensions() -> Vec<String> {
        vec!["php".to_string(), "html".to_string()]
    }

    #[test]
    fn test_extension_tag() {
        let settings = DictionarySettings::default();

        assert_eq!(
            expand_entry("index.%EXT%", &extensions(), &settings),
            vec!["index.php", "index.html"]
        );
        assert!(expand_entry("index.%EXT%", &[], &settings).is_empty());
        assert_eq!(expand_entry("/admin/", &extensions(), &settings), vec!["admin/"]);
    }

    #[test]
    fn test_force_extensions() {
        let settings = DictionarySettings {
            force_extensions: true,
            ..Default::default()
        };

        assert_eq!(
            expand_entry("backup", &extensions(), &settings),
            vec!["backup", "backup.php", "backup.html", "backup/"]
        );
        assert_eq!(expand_entry("robots.txt", &extensions(), &settings), vec!["robots.txt"]);
        assert_eq!(expand_entry("admin/", &extensions(), &settings), vec!["admin/"]);
    }

    #[test]
    fn test_lowercase_and_affixes() {
        let settings = DictionarySettings {
            lowercase: true,
            prefixes: vec![".".to_string()],
            suffixes: vec!["~".to_string(), ".bak".to_string()],
            ..Default::default()
        };

        assert_eq!(
            expand_entry("Config.PHP", &extensions(), &settings),
            vec![".config.php", "config.php~", "config.php.bak"]
        );
        assert_eq!(expand_entry("Admin/", &extensions(), &settings), vec!["admin/"]);
        assert_eq!(expand_entry(".htaccess", &extensions(), &settings), vec![".htaccess~", ".htaccess.bak"]);
    }
}
