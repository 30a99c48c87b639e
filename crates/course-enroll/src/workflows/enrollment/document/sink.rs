use std::path::PathBuf;

use super::{DocumentGenerationFailure, GeneratedDocument};

/// Destination for generated documents (the "download" step).
pub trait DocumentSink: Send + Sync {
    fn deliver(&self, document: &GeneratedDocument)
        -> Result<SavedDocument, DocumentGenerationFailure>;
}

/// Where a delivered document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub file_name: String,
    pub location: PathBuf,
    pub size_bytes: usize,
}

/// Writes documents into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSink for DirectorySink {
    fn deliver(
        &self,
        document: &GeneratedDocument,
    ) -> Result<SavedDocument, DocumentGenerationFailure> {
        std::fs::create_dir_all(&self.dir)?;
        let location = self.dir.join(disk_safe_name(&document.file_name));
        std::fs::write(&location, &document.bytes)?;

        Ok(SavedDocument {
            file_name: document.file_name.clone(),
            location,
            size_bytes: document.bytes.len(),
        })
    }
}

// applicant names are free text; keep the file inside the target directory
fn disk_safe_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::enrollment::document::ConfirmationLayout;

    fn document() -> GeneratedDocument {
        GeneratedDocument {
            file_name: "Asha Rao_CourseApplication.pdf".to_string(),
            layout: ConfirmationLayout {
                title: "Skill Academy".to_string(),
                subtitle: "Course Application Confirmation".to_string(),
                logo_mark: "SA".to_string(),
                details: Vec::new(),
                instructions: Vec::new(),
                file_name: "Asha Rao_CourseApplication.pdf".to_string(),
            },
            bytes: b"%PDF-1.3".to_vec(),
        }
    }

    #[test]
    fn writes_into_missing_directory() {
        let root = tempfile::tempdir().expect("temp dir");
        let sink = DirectorySink::new(root.path().join("confirmations"));

        let saved = sink.deliver(&document()).expect("document saved");

        assert_eq!(
            saved.location,
            root.path().join("confirmations/Asha Rao_CourseApplication.pdf")
        );
        assert_eq!(saved.size_bytes, 8);
        assert_eq!(std::fs::read(&saved.location).expect("readable"), b"%PDF-1.3");
    }

    #[test]
    fn unwritable_directory_is_an_io_failure() {
        let blocker = tempfile::NamedTempFile::new().expect("temp file");
        let sink = DirectorySink::new(blocker.path().join("confirmations"));

        match sink.deliver(&document()) {
            Err(DocumentGenerationFailure::Io(_)) => {}
            other => panic!("expected io failure, got {other:?}"),
        }
    }

    #[test]
    fn replaces_path_separators() {
        assert_eq!(
            disk_safe_name("A/B\\C_CourseApplication.pdf"),
            "A_B_C_CourseApplication.pdf"
        );
        assert_eq!(
            disk_safe_name("Asha Rao_CourseApplication.pdf"),
            "Asha Rao_CourseApplication.pdf"
        );
    }
}
