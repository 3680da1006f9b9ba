//! Keyboard event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::App;

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    // Ctrl+C always quits, from any view
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    // ── Popup handling (captures all keys) ────────────────
    if app.show_two_factor {
        handle_two_factor_popup(app, key);
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.selected = 0,
        KeyCode::End | KeyCode::Char('G') => {
            app.selected = app.attachments.len().saturating_sub(1);
        }
        KeyCode::Enter => app.show_preview(),
        KeyCode::Char('d') => app.copy_drag_payload(),
        KeyCode::Char('t') => app.open_two_factor(),
        _ => {}
    }
    Ok(())
}

/// Keys inside the two-factor dialog: typing edits the code.
fn handle_two_factor_popup(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_two_factor(),
        KeyCode::Enter => app.trigger_two_factor_test(),
        KeyCode::Backspace => app.two_factor.pop_char(),
        KeyCode::Char(c) if !c.is_control() => app.two_factor.push_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::PageLocation;
    use crate::model::two_factor::RemoteReply;
    use crate::remote::TwoFactorRemote;
    use std::sync::Arc;

    struct Never;

    impl TwoFactorRemote for Never {
        fn test_two_factor(&self, _code: &str) -> RemoteReply {
            RemoteReply::success(false)
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn empty_app() -> App {
        App::new(
            Vec::new(),
            PageLocation::parse("http://localhost/").unwrap(),
            Arc::new(Never),
        )
    }

    #[test]
    fn test_dialog_captures_typing() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('t'));
        assert!(app.show_two_factor);
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.two_factor.code(), "q7");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.two_factor.code(), "q");
    }

    #[test]
    fn test_enter_with_empty_code_is_noop() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Enter);
        assert!(!app.two_factor.testing());
    }

    #[test]
    fn test_escape_closes_dialog_then_quits() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_two_factor);
        assert_eq!(app.two_factor.code(), "");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_dialog() {
        let mut app = empty_app();
        press(&mut app, KeyCode::Char('t'));
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .unwrap();
        assert!(app.should_quit);
    }
}
