//! File and stream I/O helpers shared across CLI commands.
//!
//! I/O errors are converted to `String` for easy integration with command
//! error handling.

use std::io::BufRead;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// This function is used for interactive commands that need user input.
/// It trims whitespace from the input and returns `None` on EOF or read errors.
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => {
            let trimmed = line.trim();
            Some(trimmed.to_string())
        }
        Err(_) => None, // Read error
    }
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stdin_line_valid_input() {
        let input = b"discard 7P\n";
        let mut cursor = Cursor::new(input);
        let result = read_stdin_line(&mut cursor);
        assert_eq!(result, Some("discard 7P".to_string()));
    }

    #[test]
    fn test_read_stdin_line_with_whitespace() {
        let input = b"  draw  \n";
        let mut cursor = Cursor::new(input);
        let result = read_stdin_line(&mut cursor);
        assert_eq!(result, Some("draw".to_string()));
    }

    #[test]
    fn test_read_stdin_line_eof() {
        let input = b"";
        let mut cursor = Cursor::new(input);
        let result = read_stdin_line(&mut cursor);
        assert_eq!(result, None);
    }

    #[test]
    fn test_ensure_parent_dir_creates_directory() {
        use tempfile::tempdir;

        let temp_dir = tempdir().unwrap();
        let nested_path = temp_dir.path().join("subdir").join("save.json");

        let result = ensure_parent_dir(&nested_path);
        assert!(result.is_ok());
        assert!(temp_dir.path().join("subdir").exists());
    }

    #[test]
    fn test_ensure_parent_dir_no_parent() {
        use std::path::Path;

        let path = Path::new("save.json");
        let result = ensure_parent_dir(path);
        assert!(result.is_ok());
    }
}
