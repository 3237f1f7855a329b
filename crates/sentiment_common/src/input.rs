//! Input collection: the text field, file loading and line normalization.

use crate::error::InputError;
use std::fs;
use std::path::Path;

/// Extensions accepted for upload
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["txt", "csv"];

/// Split on newlines, trim every line, drop blank ones
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reject anything but .txt / .csv (case-insensitive)
pub fn check_extension(name: &str) -> Result<(), InputError> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(InputError::UnsupportedFile(name.to_string())),
    }
}

/// Decode uploaded bytes into normalized lines
pub fn decode_file(name: &str, bytes: &[u8]) -> Result<Vec<String>, InputError> {
    check_extension(name)?;
    let content =
        std::str::from_utf8(bytes).map_err(|_| InputError::NotUtf8(name.to_string()))?;
    Ok(normalize_lines(content))
}

/// Read a .txt/.csv file from disk into normalized lines
pub fn read_input_file(path: &Path) -> Result<Vec<String>, InputError> {
    let name = path.display().to_string();
    check_extension(&name)?;
    let bytes = fs::read(path).map_err(|source| InputError::Io {
        path: name.clone(),
        source,
    })?;
    decode_file(&name, &bytes)
}

/// Dashboard text field plus the selected file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputArea {
    text: String,
    selected_file: Option<String>,
}

impl InputArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected_file.as_deref()
    }

    /// Manual edit of the text field
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Load an uploaded file. Normalized content replaces the text field so
    /// the user can edit before submitting. Returns the number of lines.
    pub fn load_file(&mut self, name: &str, bytes: &[u8]) -> Result<usize, InputError> {
        let lines = decode_file(name, bytes)?;
        self.text = lines.join("\n");
        self.selected_file = Some(name.to_string());
        Ok(lines.len())
    }

    /// Normalized lines ready for analysis, or `None` while a call is in
    /// flight or when there is nothing to submit
    pub fn submission(&self, is_loading: bool) -> Option<Vec<String>> {
        if is_loading {
            return None;
        }
        let lines = normalize_lines(&self.text);
        if lines.is_empty() {
            None
        } else {
            Some(lines)
        }
    }

    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && !self.text.trim().is_empty()
    }

    /// Reset text and file selection
    pub fn clear(&mut self) {
        self.text.clear();
        self.selected_file = None;
    }
}
