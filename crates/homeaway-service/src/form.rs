//! Untyped form submissions.

use std::collections::HashMap;

use bytes::Bytes;

/// A file part of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-side file name.
    pub name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
    /// Client-side modification time in milliseconds, when sent.
    pub last_modified: Option<i64>,
}

impl UploadedFile {
    /// Create a file part.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
            last_modified: None,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Browsers submit an untouched file input as a nameless, empty part.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.data.is_empty()
    }
}

/// Field name to value mapping of a submitted form.
///
/// When a name is submitted more than once the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// An empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FormData::insert_field`].
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_field(name, value);
        self
    }

    /// Builder-style [`FormData::insert_file`].
    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.insert_file(name, file);
        self
    }

    /// Set a text field.
    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.files.remove(&name);
        self.fields.insert(name, value.into());
    }

    /// Set a file field.
    pub fn insert_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        let name = name.into();
        self.fields.remove(&name);
        self.files.insert(name, file);
    }

    /// Text value of a field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// File submitted under `name`. Blank file inputs count as absent.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name).filter(|file| !file.is_blank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value_wins() {
        let form = FormData::new()
            .with_field("name", "first")
            .with_field("name", "second");
        assert_eq!(form.field("name"), Some("second"));
    }

    #[test]
    fn test_blank_file_is_absent() {
        let form = FormData::new().with_file("image", UploadedFile::new("", "application/octet-stream", Bytes::new()));
        assert!(form.file("image").is_none());
    }

    #[test]
    fn test_file_replaces_field_of_same_name() {
        let form = FormData::new()
            .with_field("image", "text")
            .with_file("image", UploadedFile::new("a.png", "image/png", vec![1, 2, 3]));
        assert_eq!(form.field("image"), None);
        assert_eq!(form.file("image").map(UploadedFile::size), Some(3));
    }
}
