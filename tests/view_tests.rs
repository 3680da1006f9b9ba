//! Integration tests for the attachment and two-factor view-models.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use mailpane::env::{Environment, StaticEnvironment};
use mailpane::input::load_attachments;
use mailpane::links::{LinkBuilder, ServerLinks};
use mailpane::model::two_factor::{RemoteReply, StorageResultType, TwoFactorResponse};
use mailpane::remote::TwoFactorRemote;
use mailpane::view::attachment::{AttachmentView, PreviewKind};
use mailpane::view::icon::{icon_class, IconClass};
use mailpane::view::two_factor::TwoFactorTestView;
use mailpane::view::{ViewContext, ViewModel};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn ctx(pdf: bool, framed: bool) -> ViewContext {
    ViewContext::new(
        Arc::new(StaticEnvironment {
            allow_pdf_preview: pdf,
            framed_preview_supported: framed,
        }),
        Arc::new(ServerLinks::default()),
    )
}

fn record(mime: &str, framed: bool) -> serde_json::Value {
    json!({
        "@Object": "Object/Attachment",
        "MimeType": mime,
        "FileName": "a",
        "Download": "D",
        "Framed": framed
    })
}

// ─── Attachment construction ────────────────────────────────────────

#[test]
fn test_fixture_loads_valid_records_only() {
    let loaded = load_attachments(&fixture("attachments.json"), &ctx(true, true)).unwrap();
    assert_eq!(loaded.views.len(), 5);
    assert_eq!(loaded.skipped, 1);

    let photo = &loaded.views[0];
    assert_eq!(photo.mime_type, "image/jpeg");
    assert_eq!(photo.cid_without_tags, "holiday@mail.example.com");
    assert_eq!(
        photo.friendly_size,
        mailpane::format::friendly_size(245_760, mailpane::format::SizeUnits::Binary)
    );
    assert!(photo.has_thumbnail());

    let notes = &loaded.views[1];
    assert_eq!(notes.estimated_size, 1200);
    assert_eq!(notes.uid, "123");
}

#[test]
fn test_construction_rejects_untagged_or_absent_records() {
    let c = ctx(true, false);
    assert!(AttachmentView::from_json(&serde_json::Value::Null, c.clone()).is_none());
    assert!(AttachmentView::from_json(&json!({"MimeType": "image/png"}), c.clone()).is_none());
    assert!(
        AttachmentView::from_json(&json!({"@Object": "Object/Folder"}), c.clone()).is_none()
    );
    assert!(AttachmentView::from_json(&json!([record("image/png", false)]), c).is_none());
}

// ─── Predicates ─────────────────────────────────────────────────────

#[test]
fn test_is_text() {
    let c = ctx(true, false);
    let is_text = |mime: &str| {
        AttachmentView::from_json(&record(mime, false), c.clone())
            .unwrap()
            .is_text()
    };
    assert!(is_text("text/plain"));
    assert!(!is_text("text/html"));
    assert!(!is_text("application/pdf"));
}

#[test]
fn test_is_image_is_case_insensitive_and_closed_set() {
    let c = ctx(true, false);
    let is_image = |mime: &str| {
        AttachmentView::from_json(&record(mime, false), c.clone())
            .unwrap()
            .is_image()
    };
    assert!(is_image("IMAGE/GIF"));
    assert!(is_image("image/jpg"));
    assert!(!is_image("image/webp"));
}

#[test]
fn test_has_preview_is_disjunction_of_predicates() {
    let mimes = [
        "image/png",
        "image/bmp",
        "text/plain",
        "text/html",
        "application/pdf",
        "application/msword",
        "application/octet-stream",
        "",
    ];
    for &(pdf, framed_env) in &[(false, false), (false, true), (true, false), (true, true)] {
        for mime in mimes {
            for framed in [false, true] {
                let v = AttachmentView::from_json(&record(mime, framed), ctx(pdf, framed_env))
                    .unwrap();
                assert_eq!(
                    v.has_preview(),
                    v.is_image() || v.is_pdf() || v.is_text() || v.is_framed(),
                    "mime={mime} framed={framed} pdf={pdf} env={framed_env}"
                );
                assert_eq!(v.has_preview(), !v.link_preview_main().is_empty());
            }
        }
    }
}

/// Environment whose framed-preview support can change at runtime.
struct Toggle(AtomicBool);

impl Environment for Toggle {
    fn allow_pdf_preview(&self) -> bool {
        true
    }

    fn framed_preview_supported(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[test]
fn test_framed_follows_live_environment() {
    let env = Arc::new(Toggle(AtomicBool::new(false)));
    let c = ViewContext::new(env.clone(), Arc::new(ServerLinks::default()));
    let v = AttachmentView::from_json(&record("application/msword", true), c).unwrap();
    assert!(!v.is_framed());
    env.0.store(true, Ordering::SeqCst);
    assert!(v.is_framed());
}

// ─── Icons ──────────────────────────────────────────────────────────

#[test]
fn test_icon_class_examples() {
    assert_eq!(icon_class("image/png"), IconClass::Image);
    assert_eq!(icon_class("application/zip"), IconClass::Zip);
    assert_eq!(icon_class("application/vnd.ms-excel"), IconClass::Excel);
    assert_eq!(icon_class("application/octet-stream"), IconClass::File);
    assert_eq!(icon_class("image/png").as_str(), "icon-file-image");
}

#[test]
fn test_icon_class_method_matches_free_function() {
    let loaded = load_attachments(&fixture("attachments.json"), &ctx(true, true)).unwrap();
    let icons: Vec<IconClass> = loaded.views.iter().map(|v| v.icon_class()).collect();
    assert_eq!(
        icons,
        vec![
            IconClass::Image,
            IconClass::Text,
            IconClass::Excel,
            IconClass::File,
            IconClass::Zip,
        ]
    );
    for v in &loaded.views {
        assert_eq!(v.icon_class(), icon_class(&v.mime_type));
    }
}

#[test]
fn test_macro_enabled_office_icons_through_view() {
    let c = ctx(true, false);
    for (mime, class) in [
        ("application/vnd.ms-excel.sheet.macroEnabled.12", IconClass::Excel),
        ("application/vnd.ms-word.document.macroEnabled.12", IconClass::Text),
        ("application/vnd.ms-powerpoint.slideshow.macroEnabled.12", IconClass::ChartGraph),
    ] {
        let v = AttachmentView::from_json(&record(mime, false), c.clone()).unwrap();
        assert_eq!(v.icon_class(), class, "{mime}");
        assert_eq!(v.icon_class(), icon_class(mime), "{mime}");
    }
}

// ─── Preview link priority ──────────────────────────────────────────

/// Link builder that tags every link with its kind.
struct TaggedLinks;

impl LinkBuilder for TaggedLinks {
    fn attachment_download(&self, d: &str) -> String {
        format!("download:{d}")
    }
    fn attachment_preview(&self, d: &str) -> String {
        format!("preview:{d}")
    }
    fn attachment_thumbnail_preview(&self, d: &str) -> String {
        format!("thumb:{d}")
    }
    fn attachment_framed(&self, d: &str) -> String {
        format!("framed:{d}")
    }
    fn attachment_preview_as_plain(&self, d: &str) -> String {
        format!("plain:{d}")
    }
}

#[test]
fn test_preview_main_priority() {
    let c = ViewContext::new(
        Arc::new(StaticEnvironment {
            allow_pdf_preview: true,
            framed_preview_supported: true,
        }),
        Arc::new(TaggedLinks),
    );
    let main = |mime: &str| {
        AttachmentView::from_json(&record(mime, true), c.clone())
            .unwrap()
            .link_preview_main()
    };
    assert_eq!(main("image/png"), "preview:D");
    assert_eq!(main("application/pdf"), "preview:D");
    // Text beats the framed fallback even though the record is framed.
    assert_eq!(main("text/plain"), "plain:D");
    assert_eq!(main("application/msword"), "framed:D");
}

#[test]
fn test_fixture_preview_kinds() {
    let loaded = load_attachments(&fixture("attachments.json"), &ctx(true, true)).unwrap();
    let kinds: Vec<Option<PreviewKind>> = loaded.views.iter().map(|v| v.preview_kind()).collect();
    assert_eq!(
        kinds,
        vec![
            Some(PreviewKind::Native),
            Some(PreviewKind::Plain),
            Some(PreviewKind::Framed),
            Some(PreviewKind::Native),
            None,
        ]
    );
}

// ─── Two-factor dialog ──────────────────────────────────────────────

/// Remote that records the codes it receives and answers with a fixed reply.
struct ScriptedRemote {
    reply: RemoteReply,
    seen: Mutex<Vec<String>>,
}

impl ScriptedRemote {
    fn new(reply: RemoteReply) -> Self {
        Self {
            reply,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl TwoFactorRemote for ScriptedRemote {
    fn test_two_factor(&self, code: &str) -> RemoteReply {
        self.seen.lock().unwrap().push(code.to_string());
        self.reply.clone()
    }
}

#[test]
fn test_dialog_empty_code_is_noop() {
    let remote = ScriptedRemote::new(RemoteReply::success(true));
    let mut dialog = TwoFactorTestView::new();
    dialog.on_show();
    assert_eq!(dialog.run_test(&remote), None);
    assert!(!dialog.testing());
    assert_eq!(dialog.code_status(), None);
    assert!(remote.seen.lock().unwrap().is_empty());
}

#[test]
fn test_dialog_success_and_failure() {
    let mut dialog = TwoFactorTestView::new();
    dialog.set_code("314159");
    let request = dialog.test_code().unwrap();
    assert!(dialog.testing());
    dialog.apply_response(&request, &RemoteReply::success(true));
    assert_eq!(dialog.code_status(), Some(true));
    assert!(!dialog.testing());

    let request = dialog.test_code().unwrap();
    let reply = RemoteReply {
        status: StorageResultType::Unload,
        data: Some(TwoFactorResponse {
            action: "TestTwoFactor".to_string(),
            result: true,
            error_code: None,
        }),
    };
    dialog.apply_response(&request, &reply);
    assert_eq!(dialog.code_status(), Some(false));
}

#[test]
fn test_dialog_sends_entered_code() {
    let remote = ScriptedRemote::new(RemoteReply::success(false));
    let mut dialog = TwoFactorTestView::new();
    dialog.set_code("271828");
    assert_eq!(dialog.run_test(&remote), Some(false));
    assert_eq!(remote.seen.lock().unwrap().as_slice(), ["271828".to_string()]);
}

#[test]
fn test_dialog_show_resets_state() {
    let remote = ScriptedRemote::new(RemoteReply::success(true));
    let mut dialog = TwoFactorTestView::new();
    dialog.set_code("1");
    dialog.on_focus();
    dialog.run_test(&remote);

    dialog.on_show();
    assert_eq!(dialog.code(), "");
    assert!(!dialog.code_focused());
    assert_eq!(dialog.code_status(), None);
    assert!(!dialog.testing());
    assert_eq!(dialog.registration().template, "PopupsTwoFactorTest");
}
