//! Load attachment views from JSON files on disk.

use std::path::Path;

use crate::error::{Result, ViewError};
use crate::model::attachment::parse_attachment_list;
use crate::view::attachment::AttachmentView;
use crate::view::ViewContext;

/// Views built from a file, plus how many entries were rejected.
#[derive(Debug)]
pub struct LoadedAttachments {
    pub views: Vec<AttachmentView>,
    pub skipped: usize,
}

/// Read `path` (a record, an array, or an attachment collection) and build
/// one view per valid record. Invalid entries are skipped, not fatal.
pub fn load_attachments(path: &Path, ctx: &ViewContext) -> Result<LoadedAttachments> {
    if !path.exists() {
        return Err(ViewError::FileNotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path).map_err(|e| ViewError::io(path, e))?;
    let json: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| ViewError::json(path, e))?;

    let mut views = Vec::new();
    let mut skipped = 0;
    for (i, entry) in parse_attachment_list(&json).iter().enumerate() {
        match AttachmentView::from_json(entry, ctx.clone()) {
            Some(view) => views.push(view),
            None => {
                tracing::warn!(index = i, path = %path.display(), "Skipping non-attachment record");
                skipped += 1;
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        count = views.len(),
        skipped,
        "Loaded attachments"
    );
    Ok(LoadedAttachments { views, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file() {
        let err = load_attachments(Path::new("/nonexistent/a.json"), &ViewContext::default())
            .unwrap_err();
        assert!(matches!(err, ViewError::FileNotFound(_)));
    }

    #[test]
    fn test_invalid_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{not json").unwrap();
        let err = load_attachments(f.path(), &ViewContext::default()).unwrap_err();
        assert!(matches!(err, ViewError::Json { .. }));
    }

    #[test]
    fn test_skips_untagged_entries() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"[{{"@Object":"Object/Attachment","MimeType":"text/plain"}},{{"MimeType":"x/y"}},null]"#
        )
        .unwrap();
        let loaded = load_attachments(f.path(), &ViewContext::default()).unwrap();
        assert_eq!(loaded.views.len(), 1);
        assert_eq!(loaded.skipped, 2);
    }
}
