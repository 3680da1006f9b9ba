//! Global application state for the TUI (the "Model" in Elm architecture).

use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

use crate::i18n;
use crate::links::PageLocation;
use crate::model::two_factor::RemoteReply;
use crate::remote::TwoFactorRemote;
use crate::view::attachment::{AttachmentView, DataTransfer, DOWNLOAD_URL_KEY};
use crate::view::two_factor::{TwoFactorRequest, TwoFactorTestView};
use crate::view::ViewModel;

/// In-app stand-in for the platform drag-and-drop channel.
#[derive(Debug, Default)]
pub struct TransferBuffer {
    data: BTreeMap<String, String>,
}

impl TransferBuffer {
    pub fn get(&self, format: &str) -> Option<&str> {
        self.data.get(format).map(String::as_str)
    }
}

impl DataTransfer for TransferBuffer {
    fn set_data(&mut self, format: &str, data: &str) {
        self.data.insert(format.to_string(), data.to_string());
    }
}

/// Complete TUI state.
pub struct App {
    // ── Data ──────────────────────────────────
    pub attachments: Vec<AttachmentView>,
    /// Location relative download links are resolved against.
    pub page: PageLocation,

    // ── Navigation ────────────────────────────
    /// Index of the selected attachment.
    pub selected: usize,

    // ── Two-factor dialog ─────────────────────
    pub two_factor: TwoFactorTestView,
    /// Dialog visible?
    pub show_two_factor: bool,
    /// Closing the dialog quits (started from `two-factor` without a code).
    pub dialog_only: bool,
    remote: Arc<dyn TwoFactorRemote>,
    replies_tx: Sender<(TwoFactorRequest, RemoteReply)>,
    replies_rx: Receiver<(TwoFactorRequest, RemoteReply)>,

    // ── Drag and drop ─────────────────────────
    pub transfer: TransferBuffer,

    // ── Lifecycle ─────────────────────────────
    pub should_quit: bool,
    /// Transient status message and the instant it was set.
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(
        attachments: Vec<AttachmentView>,
        page: PageLocation,
        remote: Arc<dyn TwoFactorRemote>,
    ) -> Self {
        let (replies_tx, replies_rx) = mpsc::channel();
        Self {
            attachments,
            page,
            selected: 0,
            two_factor: TwoFactorTestView::new(),
            show_two_factor: false,
            dialog_only: false,
            remote,
            replies_tx,
            replies_rx,
            transfer: TransferBuffer::default(),
            should_quit: false,
            status_message: None,
        }
    }

    /// The selected attachment, if any.
    pub fn current(&self) -> Option<&AttachmentView> {
        self.attachments.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.attachments.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Show the main preview link of the selected attachment.
    pub fn show_preview(&mut self) {
        let link = match self.current() {
            Some(att) if att.has_preview() => att.link_preview_main(),
            Some(_) => i18n::tui_no_preview().to_string(),
            None => return,
        };
        self.set_status(&link);
    }

    /// Run the drag-start handler of the selected attachment against the
    /// in-app transfer buffer.
    pub fn copy_drag_payload(&mut self) {
        let Some(att) = self.attachments.get(self.selected) else {
            return;
        };
        att.event_drag_start(Some(&mut self.transfer), &self.page);
        tracing::debug!(
            payload = self.transfer.get(DOWNLOAD_URL_KEY).unwrap_or(""),
            "Drag payload stored"
        );
        self.set_status(i18n::tui_drag_copied());
    }

    pub fn open_two_factor(&mut self) {
        let reg = self.two_factor.registration();
        tracing::debug!(template = reg.template, "Showing view");
        self.show_two_factor = true;
        self.two_factor.on_show();
        self.two_factor.on_focus();
    }

    pub fn close_two_factor(&mut self) {
        self.two_factor.on_hide();
        self.show_two_factor = false;
        if self.dialog_only {
            self.should_quit = true;
        }
    }

    /// Trigger the dialog's test action; the remote call runs on a worker
    /// thread and its reply is applied on the next [`App::tick`].
    pub fn trigger_two_factor_test(&mut self) {
        let Some(request) = self.two_factor.test_code() else {
            return;
        };
        let remote = Arc::clone(&self.remote);
        let tx = self.replies_tx.clone();
        std::thread::spawn(move || {
            let reply = remote.test_two_factor(&request.code);
            // The receiver only goes away when the app exits.
            let _ = tx.send((request, reply));
        });
    }

    /// Apply replies that arrived since the last tick.
    pub fn poll_replies(&mut self) {
        loop {
            match self.replies_rx.try_recv() {
                Ok((request, reply)) => {
                    if self.two_factor.apply_response(&request, &reply) {
                        let msg = if reply.passed() {
                            i18n::msg_code_ok()
                        } else {
                            i18n::msg_code_failed()
                        };
                        self.set_status(msg);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Set a transient status message that auto-clears after a few seconds.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), Instant::now()));
    }

    /// Called every tick: applies replies, logs dialog changes and clears
    /// expired status messages.
    pub fn tick(&mut self) {
        self.poll_replies();
        for change in self.two_factor.take_changes() {
            tracing::trace!(?change, "Dialog state changed");
        }
        if let Some((_, when)) = &self.status_message {
            if when.elapsed().as_secs() >= 5 {
                self.status_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::two_factor::StorageResultType;
    use crate::view::ViewContext;
    use serde_json::json;
    use std::time::Duration;

    struct EchoRemote;

    impl TwoFactorRemote for EchoRemote {
        fn test_two_factor(&self, code: &str) -> RemoteReply {
            if code == "123456" {
                RemoteReply::success(true)
            } else {
                RemoteReply::failed(StorageResultType::Error)
            }
        }
    }

    fn app() -> App {
        let ctx = ViewContext::default();
        let atts = ["image/png", "application/zip"]
            .iter()
            .filter_map(|mime| {
                AttachmentView::from_json(
                    &json!({
                        "@Object": "Object/Attachment",
                        "MimeType": mime,
                        "FileName": "f",
                        "Download": "T"
                    }),
                    ctx.clone(),
                )
            })
            .collect();
        App::new(
            atts,
            PageLocation::parse("https://mail.example.com/").unwrap(),
            Arc::new(EchoRemote),
        )
    }

    fn wait_for_reply(app: &mut App) {
        for _ in 0..200 {
            app.tick();
            if !app.two_factor.testing() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("reply never arrived");
    }

    #[test]
    fn test_navigation_bounds() {
        let mut app = app();
        app.select_prev();
        assert_eq!(app.selected, 0);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_copy_drag_payload() {
        let mut app = app();
        app.copy_drag_payload();
        assert_eq!(
            app.transfer.get(DOWNLOAD_URL_KEY),
            Some("image/png:f:https://mail.example.com/./?/Raw/&q[]=/0/Download/&q[]=/T")
        );
    }

    #[test]
    fn test_two_factor_round_trip_through_worker() {
        let mut app = app();
        app.open_two_factor();
        assert!(app.two_factor.code_focused());
        for c in "123456".chars() {
            app.two_factor.push_char(c);
        }
        app.trigger_two_factor_test();
        assert!(app.two_factor.testing());
        wait_for_reply(&mut app);
        assert_eq!(app.two_factor.code_status(), Some(true));
    }

    #[test]
    fn test_close_discards_late_reply() {
        let mut app = app();
        app.open_two_factor();
        app.two_factor.set_code("000000");
        app.trigger_two_factor_test();
        app.close_two_factor();
        std::thread::sleep(Duration::from_millis(50));
        app.tick();
        assert_eq!(app.two_factor.code_status(), None);
        assert!(!app.two_factor.testing());
    }

    #[test]
    fn test_dialog_only_close_quits() {
        let mut app = app();
        app.dialog_only = true;
        app.open_two_factor();
        app.close_two_factor();
        assert!(app.should_quit);
    }
}
