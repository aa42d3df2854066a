use super::errors::DictionaryError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

type Result<T> = std::result::Result<T, DictionaryError>;

/// Word-list files behind `path`: the file itself, or every `*.txt` below a directory
pub(crate) fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(DictionaryError::NotFound(path.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        let is_txt = entry.path().extension().is_some_and(|ext| ext == "txt");
        if entry.file_type().is_file() && is_txt {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        tracing::warn!("No *.txt word lists under {}", path.display());
    }
    Ok(files)
}

/// Non-blank, non-comment lines of a word-list file
pub(crate) fn read_entries(file: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(file)?;
    let text = String::from_utf8_lossy(&bytes);

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_entries_skipping_comments() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("words.txt");
        fs::write(&file, "# comment\nadmin\n\n  login.php  \r\n#another\n").unwrap();

        assert_eq!(read_entries(&file).unwrap(), vec!["admin", "login.php"]);
    }

    #[test]
    fn test_collects_txt_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), "c").unwrap();

        let files = collect_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|file| file.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "nested/c.txt"]);
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_files(&dir.path().join("absent.txt"));
        assert!(matches!(result, Err(DictionaryError::NotFound(_))));
    }
}
