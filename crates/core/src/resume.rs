// crates/core/src/resume.rs
//! Résumé attachments: extension check and the archive of sent résumés.

use std::path::Path;

use jobtrack_types::Record;

use crate::error::StoreError;

/// Extensions accepted as a résumé, lowercase and without the dot.
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "rtf"];

/// A validated résumé reference: the full path and its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub path: String,
    pub file_name: String,
}

impl ResumeFile {
    /// Check the extension (case-insensitive). The file itself is not opened.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let allowed = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| RESUME_EXTENSIONS.contains(&ext.as_str()));
        if !allowed || file_name.is_empty() {
            return Err(StoreError::UnsupportedResume {
                file: path.display().to_string(),
            });
        }
        Ok(Self {
            path: path.display().to_string(),
            file_name,
        })
    }
}

/// One row of the résumé archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeEntry {
    pub file_name: String,
    pub path: String,
    pub title: String,
    pub company: String,
}

/// Every record with a résumé attached, in store order. Records missing
/// either the path or the file name are left out.
pub fn resume_archive(records: &[Record]) -> Vec<ResumeEntry> {
    records
        .iter()
        .filter_map(|r| {
            let path = r.resume_path.as_deref().filter(|p| !p.is_empty())?;
            let file_name = r.resume_file_name.as_deref().filter(|n| !n.is_empty())?;
            Some(ResumeEntry {
                file_name: file_name.to_string(),
                path: path.to_string(),
                title: r.title.clone(),
                company: r.company.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_extensions() {
        for name in ["cv.pdf", "cv.DOCX", "cv.Txt", "cv.rtf", "cv.doc"] {
            let file = ResumeFile::from_path(Path::new("/home/me/docs").join(name).as_path()).unwrap();
            assert_eq!(file.file_name, name);
            assert!(file.path.ends_with(name));
        }
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["cv.png", "cv", "cv.pdf.exe"] {
            let err = ResumeFile::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, StoreError::UnsupportedResume { .. }), "{name}");
        }
    }

    #[test]
    fn test_archive_lists_attached_resumes_in_order() {
        let mut go = Record::new("Go Dev", "Acme");
        go.resume_path = Some("/cv/go.pdf".into());
        go.resume_file_name = Some("go.pdf".into());
        let mut half = Record::new("QA", "Beta");
        half.resume_file_name = Some("qa.pdf".into());
        let mut rust = Record::new("Rust Dev", "Ferrous");
        rust.resume_path = Some("/cv/rust.docx".into());
        rust.resume_file_name = Some("rust.docx".into());

        let archive = resume_archive(&[go, Record::new("None", "Nobody"), half, rust]);
        assert_eq!(
            archive,
            vec![
                ResumeEntry {
                    file_name: "go.pdf".into(),
                    path: "/cv/go.pdf".into(),
                    title: "Go Dev".into(),
                    company: "Acme".into(),
                },
                ResumeEntry {
                    file_name: "rust.docx".into(),
                    path: "/cv/rust.docx".into(),
                    title: "Rust Dev".into(),
                    company: "Ferrous".into(),
                },
            ]
        );
    }

    #[test]
    fn test_archive_empty_without_attachments() {
        assert!(resume_archive(&[Record::new("a", "b")]).is_empty());
    }
}
