//! Attachment view-model.
//!
//! Wraps one [`AttachmentRecord`] with everything a renderer needs: preview
//! predicates, links, icon class and drag-and-drop export. The record is a
//! snapshot taken at construction; derived fields are computed once and
//! never partially updated.

use serde::Serialize;
use serde_json::Value;

use super::icon::{icon_class, IconClass};
use super::{Registration, ViewContext, ViewModel, ViewPosition};
use crate::format::friendly_size;
use crate::links::PageLocation;
use crate::model::attachment::AttachmentRecord;

/// Key the drag payload is stored under in the platform data-transfer channel.
pub const DOWNLOAD_URL_KEY: &str = "DownloadURL";

/// MIME types previewed natively as images.
const IMAGE_TYPES: &[&str] = &["image/png", "image/jpg", "image/jpeg", "image/gif"];

/// Native drag-and-drop payload sink.
pub trait DataTransfer {
    fn set_data(&mut self, format: &str, data: &str);
}

/// Which link the main preview action opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    /// Native image/PDF preview.
    Native,
    /// Plain-text rendering.
    Plain,
    /// Third-party framed preview.
    Framed,
}

type Predicate = fn(&AttachmentView) -> bool;

/// Preview selection in priority order; first match wins.
const PREVIEW_RULES: &[(Predicate, PreviewKind)] = &[
    (AttachmentView::is_image, PreviewKind::Native),
    (AttachmentView::is_pdf, PreviewKind::Native),
    (AttachmentView::is_text, PreviewKind::Plain),
    (AttachmentView::is_framed, PreviewKind::Framed),
];

/// Display-ready attachment.
#[derive(Debug, Clone)]
pub struct AttachmentView {
    ctx: ViewContext,
    /// Lower-cased MIME type.
    pub mime_type: String,
    pub file_name: String,
    pub estimated_size: u64,
    pub friendly_size: String,
    pub is_inline: bool,
    pub is_linked: bool,
    pub is_thumbnail: bool,
    pub cid: String,
    /// `cid` without surrounding `<` / `>`.
    pub cid_without_tags: String,
    pub content_location: String,
    pub download: String,
    pub folder: String,
    pub uid: String,
    pub mime_index: String,
    pub framed: bool,
}

impl AttachmentView {
    /// An empty view bound to `ctx`.
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            mime_type: String::new(),
            file_name: String::new(),
            estimated_size: 0,
            friendly_size: String::new(),
            is_inline: false,
            is_linked: false,
            is_thumbnail: false,
            cid: String::new(),
            cid_without_tags: String::new(),
            content_location: String::new(),
            download: String::new(),
            folder: String::new(),
            uid: String::new(),
            mime_index: String::new(),
            framed: false,
        }
    }

    /// Build a view from server JSON. `None` when `json` is not a tagged
    /// attachment record.
    pub fn from_json(json: &Value, ctx: ViewContext) -> Option<Self> {
        let mut view = Self::new(ctx);
        view.init_by_json(json).then_some(view)
    }

    /// Populate from server JSON. Returns `false` and leaves the view
    /// untouched when the record is missing or not tagged as an attachment.
    pub fn init_by_json(&mut self, json: &Value) -> bool {
        match AttachmentRecord::from_value(json) {
            Some(record) => {
                self.apply_record(record);
                true
            }
            None => false,
        }
    }

    fn apply_record(&mut self, record: AttachmentRecord) {
        self.mime_type = record.mime_type.to_lowercase();
        self.file_name = record.file_name;
        self.estimated_size = record.estimated_size;
        self.friendly_size = friendly_size(record.estimated_size, self.ctx.size_units);
        self.is_inline = record.is_inline;
        self.is_linked = record.is_linked;
        self.is_thumbnail = record.is_thumbnail;
        self.cid_without_tags = strip_cid_tags(&record.cid);
        self.cid = record.cid;
        self.content_location = record.content_location;
        self.download = record.download;
        self.folder = record.folder;
        self.uid = record.uid;
        self.mime_index = record.mime_index;
        self.framed = record.framed;
    }

    // ── Predicates ──────────────────────────────────────────────

    pub fn is_image(&self) -> bool {
        let mime = self.mime_type.to_lowercase();
        IMAGE_TYPES.contains(&mime.as_str())
    }

    /// Any `text/*` type except HTML.
    pub fn is_text(&self) -> bool {
        self.mime_type.starts_with("text/") && self.mime_type != "text/html"
    }

    pub fn is_pdf(&self) -> bool {
        self.ctx.env.allow_pdf_preview() && self.mime_type == "application/pdf"
    }

    pub fn has_thumbnail(&self) -> bool {
        self.is_thumbnail
    }

    /// Framed preview is only a fallback when no native preview applies.
    pub fn is_framed(&self) -> bool {
        self.framed
            && self.ctx.env.framed_preview_supported()
            && !self.is_pdf()
            && !self.is_text()
            && !self.is_image()
    }

    /// The one predicate renderers should consult for a preview affordance.
    pub fn has_preview(&self) -> bool {
        self.is_image() || self.is_pdf() || self.is_text() || self.is_framed()
    }

    // ── Links ───────────────────────────────────────────────────

    pub fn link_download(&self) -> String {
        self.ctx.links.attachment_download(&self.download)
    }

    pub fn link_preview(&self) -> String {
        self.ctx.links.attachment_preview(&self.download)
    }

    /// Empty when the server has no thumbnail.
    pub fn link_thumbnail(&self) -> String {
        if self.has_thumbnail() {
            self.ctx.links.attachment_thumbnail_preview(&self.download)
        } else {
            String::new()
        }
    }

    /// CSS `background` declaration for the thumbnail, or empty.
    pub fn link_thumbnail_preview_style(&self) -> String {
        let link = self.link_thumbnail();
        if link.is_empty() {
            String::new()
        } else {
            format!("background:url({link})")
        }
    }

    pub fn link_framed(&self) -> String {
        self.ctx.links.attachment_framed(&self.download)
    }

    pub fn link_preview_as_plain(&self) -> String {
        self.ctx.links.attachment_preview_as_plain(&self.download)
    }

    /// Kind of preview the main action opens, if any.
    pub fn preview_kind(&self) -> Option<PreviewKind> {
        PREVIEW_RULES
            .iter()
            .find(|(applies, _)| applies(self))
            .map(|&(_, kind)| kind)
    }

    /// Link for the main preview action; empty when there is no preview.
    pub fn link_preview_main(&self) -> String {
        match self.preview_kind() {
            Some(PreviewKind::Native) => self.link_preview(),
            Some(PreviewKind::Plain) => self.link_preview_as_plain(),
            Some(PreviewKind::Framed) => self.link_framed(),
            None => String::new(),
        }
    }

    // ── Icon ────────────────────────────────────────────────────

    pub fn icon_class(&self) -> IconClass {
        icon_class(&self.mime_type)
    }

    // ── Drag export ─────────────────────────────────────────────

    /// `"<mime>:<file name>:<absolute download url>"`.
    pub fn generate_transfer_download_url(&self, page: &PageLocation) -> String {
        let link = page.absolutize(&self.link_download());
        format!("{}:{}:{link}", self.mime_type, self.file_name)
    }

    /// Drag-start handler: writes the download payload into `transfer` when
    /// one is available. Always reports the event as handled.
    pub fn event_drag_start(
        &self,
        transfer: Option<&mut dyn DataTransfer>,
        page: &PageLocation,
    ) -> bool {
        if let Some(transfer) = transfer {
            transfer.set_data(DOWNLOAD_URL_KEY, &self.generate_transfer_download_url(page));
        }
        true
    }

    /// Snapshot of every derived field, for JSON output.
    pub fn summary(&self) -> AttachmentSummary {
        AttachmentSummary {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            friendly_size: self.friendly_size.clone(),
            cid: self.cid_without_tags.clone(),
            icon_class: self.icon_class(),
            is_image: self.is_image(),
            is_text: self.is_text(),
            is_pdf: self.is_pdf(),
            is_framed: self.is_framed(),
            has_preview: self.has_preview(),
            preview_kind: self.preview_kind(),
            link_download: self.link_download(),
            link_preview_main: self.link_preview_main(),
            link_thumbnail: self.link_thumbnail(),
        }
    }
}

impl ViewModel for AttachmentView {
    fn registration(&self) -> Registration {
        Registration {
            position: ViewPosition::None,
            template: "AttachmentModel",
            name: "AttachmentModel",
        }
    }
}

/// Serializable view of an [`AttachmentView`].
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentSummary {
    pub file_name: String,
    pub mime_type: String,
    pub friendly_size: String,
    pub cid: String,
    pub icon_class: IconClass,
    pub is_image: bool,
    pub is_text: bool,
    pub is_pdf: bool,
    pub is_framed: bool,
    pub has_preview: bool,
    pub preview_kind: Option<PreviewKind>,
    pub link_download: String,
    pub link_preview_main: String,
    pub link_thumbnail: String,
}

/// Remove all leading `<` and trailing `>` from a Content-ID.
fn strip_cid_tags(cid: &str) -> String {
    cid.trim_start_matches('<').trim_end_matches('>').to_string()
}
