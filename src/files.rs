//! Per-user upload area on the local filesystem.
//!
//! Every user gets one directory under the configured uploads root. All
//! file access goes through [`sanitize_filename`] and [`FileArea::user_dir`];
//! a request can only ever name a flat file inside its own (or a named
//! user's) directory, never a path.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AppError;

/// Extensions accepted for upload.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Upper bound on a single uploaded file.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

static FILENAME_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("filename pattern compiles"));

static USERNAME_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("username pattern compiles"));

/// Reduce an uploaded file name to a safe flat name.
///
/// Separators and `..` are rejected outright rather than stripped, so a
/// traversal attempt surfaces as an error instead of silently landing on
/// a different file.
pub fn sanitize_filename(raw: &str) -> Result<String, AppError> {
    if raw.contains('/') || raw.contains('\\') || raw.contains("..") {
        return Err(AppError::invalid_path(
            "File name must not contain path separators",
        ));
    }
    let stripped = FILENAME_STRIP.replace_all(raw, "");
    if stripped.is_empty() || stripped.starts_with('.') {
        return Err(AppError::invalid_path("Invalid file name"));
    }
    Ok(stripped.into_owned())
}

fn has_allowed_extension(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Manages the uploads root. Cheap to clone; holds no open handles.
#[derive(Debug, Clone)]
pub struct FileArea {
    root: PathBuf,
}

impl FileArea {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileArea { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for one user's files. The username is reduced to
    /// `[A-Za-z0-9_-]` and the joined path must stay under the root.
    pub fn user_dir(&self, username: &str) -> Result<PathBuf, AppError> {
        let stripped = USERNAME_STRIP.replace_all(username, "");
        if stripped.is_empty() {
            return Err(AppError::invalid_path("Invalid user directory"));
        }
        let dir = self.root.join(stripped.as_ref());
        if !dir.starts_with(&self.root) {
            return Err(AppError::invalid_path("Invalid user directory"));
        }
        Ok(dir)
    }

    /// Store uploaded bytes under the user's directory. Returns the name
    /// the file was stored as.
    pub fn save_file(&self, username: &str, filename: &str, data: &[u8]) -> Result<String, AppError> {
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "Upload is {} bytes, the cap is {}",
                data.len(),
                MAX_UPLOAD_BYTES
            )));
        }
        let name = sanitize_filename(filename)?;
        if !has_allowed_extension(&name) {
            return Err(AppError::invalid_file_type(format!(
                "Only image uploads are accepted ({})",
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            )));
        }
        let dir = self.user_dir(username)?;
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::internal(format!("Upload dir error: {e}")))?;
        fs::write(dir.join(&name), data)
            .map_err(|e| AppError::internal(format!("File write error: {e}")))?;
        Ok(name)
    }

    /// Read a stored file back, with a content type guessed from the name.
    pub fn open_file(&self, username: &str, filename: &str) -> Result<(Vec<u8>, String), AppError> {
        let name = sanitize_filename(filename)?;
        let path = self.user_dir(username)?.join(&name);
        let data = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::not_found("File not found"),
            _ => AppError::internal(format!("File read error: {e}")),
        })?;
        let content_type = mime_guess::from_path(&name).first_or_octet_stream().to_string();
        Ok((data, content_type))
    }

    /// Names of the user's stored files, ascending. A user who has never
    /// uploaded simply has no directory yet.
    pub fn list_files(&self, username: &str) -> Result<Vec<String>, AppError> {
        let dir = self.user_dir(username)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&dir)
            .map_err(|e| AppError::internal(format!("Upload dir error: {e}")))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AppError::internal(format!("Upload dir error: {e}")))?;
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("cat.png").unwrap(), "cat.png");
        assert_eq!(sanitize_filename("my_photo-2.jpeg").unwrap(), "my_photo-2.jpeg");
    }

    #[test]
    fn sanitize_strips_odd_characters() {
        assert_eq!(sanitize_filename("my photo!.png").unwrap(), "myphoto.png");
        assert_eq!(sanitize_filename("cät.png").unwrap(), "ct.png");
    }

    #[test]
    fn sanitize_rejects_traversal() {
        for raw in ["../../../etc/passwd", "..\\..\\boot.ini", "a/../b.png", "x/y.png"] {
            let err = sanitize_filename(raw).unwrap_err();
            assert!(matches!(err, AppError::InvalidPath(_)), "{raw}");
        }
    }

    #[test]
    fn sanitize_rejects_empty_and_hidden() {
        assert!(matches!(
            sanitize_filename("!!!").unwrap_err(),
            AppError::InvalidPath(_)
        ));
        assert!(matches!(
            sanitize_filename(".bashrc").unwrap_err(),
            AppError::InvalidPath(_)
        ));
    }

    #[test]
    fn user_dir_stays_under_root() {
        let area = FileArea::new("/srv/uploads");
        let dir = area.user_dir("../../etc").unwrap();
        assert!(dir.starts_with("/srv/uploads"));
        assert_eq!(dir, PathBuf::from("/srv/uploads/etc"));
    }

    #[test]
    fn user_dir_rejects_fully_stripped_names() {
        let area = FileArea::new("/srv/uploads");
        assert!(matches!(
            area.user_dir("../..").unwrap_err(),
            AppError::InvalidPath(_)
        ));
    }

    #[test]
    fn save_and_open_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let area = FileArea::new(tmp.path());
        let stored = area.save_file("alice", "cat.png", b"png bytes").unwrap();
        assert_eq!(stored, "cat.png");
        let (data, content_type) = area.open_file("alice", "cat.png").unwrap();
        assert_eq!(data, b"png bytes");
        assert_eq!(content_type, "image/png");
    }

    #[test]
    fn save_rejects_non_image_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        let area = FileArea::new(tmp.path());
        for name in ["notes.txt", "run.sh", "shot.png.exe", "noext"] {
            let err = area.save_file("alice", name, b"data").unwrap_err();
            assert!(matches!(err, AppError::InvalidFileType(_)), "{name}");
        }
    }

    #[test]
    fn save_rejects_oversized_uploads() {
        let tmp = tempfile::tempdir().unwrap();
        let area = FileArea::new(tmp.path());
        let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        assert!(matches!(
            area.save_file("alice", "big.png", &big).unwrap_err(),
            AppError::PayloadTooLarge(_)
        ));
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let area = FileArea::new(tmp.path());
        assert!(matches!(
            area.open_file("alice", "ghost.png").unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn list_files_is_sorted_and_scoped() {
        let tmp = tempfile::tempdir().unwrap();
        let area = FileArea::new(tmp.path());
        area.save_file("alice", "b.png", b"b").unwrap();
        area.save_file("alice", "a.png", b"a").unwrap();
        area.save_file("bob", "c.png", b"c").unwrap();
        assert_eq!(area.list_files("alice").unwrap(), vec!["a.png", "b.png"]);
        assert_eq!(area.list_files("bob").unwrap(), vec!["c.png"]);
        assert_eq!(area.list_files("carol").unwrap(), Vec::<String>::new());
    }
}
