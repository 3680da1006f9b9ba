//! Localized strings for the CLI and the terminal UI.
//!
//! English is the default; Spanish is available. The language is chosen once
//! at startup and read through [`lang`].

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Environment variables consulted, in order, by [`detect_system_lang`].
const LANG_VARS: &[&str] = &["MAILPANE_LANG", "LC_MESSAGES", "LANG"];

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    En,
    Es,
}

impl Lang {
    /// Parse a language code such as `en`, `es_ES` or `es-MX`.
    pub fn from_code(code: &str) -> Option<Self> {
        let lowered = code.to_lowercase();
        match lowered.split(['_', '-', '.']).next().unwrap_or("") {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Set the global language. Later calls are ignored.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// The configured language (English until set).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect the language from the environment.
pub fn detect_system_lang() -> Lang {
    LANG_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| Lang::from_code(&v))
        .unwrap_or(Lang::En)
}

/// Define a function returning the string for the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(
    app_about,
    "mailpane \u{2014} inspect webmail attachments and test two-factor codes.",
    "mailpane \u{2014} inspecciona adjuntos de webmail y prueba c\u{f3}digos de doble factor."
);

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_cmd_inspect,
    "Show derived fields of every attachment in a JSON file",
    "Mostrar los campos derivados de cada adjunto de un fichero JSON"
);
msg!(
    help_cmd_icon,
    "Print the icon class of MIME types",
    "Mostrar la clase de icono de tipos MIME"
);
msg!(
    help_cmd_drag,
    "Print the drag-and-drop download payload of an attachment",
    "Mostrar el contenido de arrastrar y soltar de un adjunto"
);
msg!(
    help_cmd_browse,
    "Browse attachments in the terminal UI",
    "Explorar adjuntos en la interfaz de terminal"
);
msg!(
    help_cmd_two_factor,
    "Test a two-factor code against the server",
    "Probar un c\u{f3}digo de doble factor contra el servidor"
);
msg!(
    help_cmd_completions,
    "Generate shell completions",
    "Generar autocompletado para la shell"
);
msg!(help_cmd_manpage, "Generate a man page", "Generar p\u{e1}gina de manual");

// ── CLI output ───────────────────────────────────────────────────

msg!(err_file_not_found, "File not found", "Fichero no encontrado");
msg!(
    err_no_attachments,
    "No valid attachment records found",
    "No se encontraron adjuntos v\u{e1}lidos"
);
msg!(
    err_index_out_of_range,
    "Attachment index out of range",
    "\u{cd}ndice de adjunto fuera de rango"
);
msg!(
    cli_skipped_records,
    "record(s) skipped: not an attachment",
    "registro(s) omitidos: no son adjuntos"
);
msg!(msg_testing, "Testing code...", "Probando c\u{f3}digo...");
msg!(msg_code_ok, "Code accepted", "C\u{f3}digo aceptado");
msg!(msg_code_failed, "Code rejected", "C\u{f3}digo rechazado");

// ── TUI: attachments ─────────────────────────────────────────────

msg!(tui_attachments_title, " Attachments ", " Adjuntos ");
msg!(tui_no_attachments, "No attachments", "Sin adjuntos");
msg!(tui_col_filename, "Filename", "Nombre");
msg!(tui_col_type, "Type", "Tipo");
msg!(tui_col_size, "Size", "Tama\u{f1}o");
msg!(tui_col_preview, "Preview", "Vista");
msg!(tui_details_title, " Details ", " Detalles ");
msg!(tui_label_download, "Download", "Descarga");
msg!(tui_label_preview, "Preview", "Vista previa");
msg!(tui_label_thumbnail, "Thumbnail", "Miniatura");
msg!(tui_label_cid, "Content-ID", "Content-ID");
msg!(tui_label_icon, "Icon", "Icono");
msg!(tui_none, "(none)", "(ninguno)");
msg!(
    tui_drag_copied,
    "Drag payload copied",
    "Contenido de arrastre copiado"
);
msg!(tui_no_preview, "No preview available", "Sin vista previa");

// ── TUI: two-factor dialog ───────────────────────────────────────

msg!(
    tui_two_factor_title,
    " Test two-factor code ",
    " Probar c\u{f3}digo de doble factor "
);
msg!(tui_label_code, "Code", "C\u{f3}digo");
msg!(tui_status_testing, "Testing...", "Probando...");
msg!(tui_status_success, "Success", "Correcto");
msg!(tui_status_failure, "Failed", "Fallido");
msg!(tui_status_unknown, "Not tested", "Sin probar");

// ── TUI: hints ───────────────────────────────────────────────────

msg!(tui_hint_nav, "Navigate", "Navegar");
msg!(tui_hint_preview, "Preview", "Vista");
msg!(tui_hint_drag, "Drag", "Arrastrar");
msg!(tui_hint_two_factor, "2FA test", "Prueba 2FA");
msg!(tui_hint_quit, "Quit", "Salir");
msg!(tui_hint_test, "Test", "Probar");
msg!(tui_hint_close, "Close", "Cerrar");
