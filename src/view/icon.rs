//! MIME type → file icon class.
//!
//! Classification is an ordered rule table; the first matching rule wins.
//! Top-level families are checked before subtype sets, so `text/rtf` is a
//! text icon through the family rule, not the word-processor rule.

use serde::Serialize;

/// CSS icon classes for attachment tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IconClass {
    #[serde(rename = "icon-file")]
    File,
    #[serde(rename = "icon-file-image")]
    Image,
    #[serde(rename = "icon-file-text")]
    Text,
    #[serde(rename = "icon-file-music")]
    Music,
    #[serde(rename = "icon-file-movie")]
    Movie,
    #[serde(rename = "icon-file-zip")]
    Zip,
    #[serde(rename = "icon-file-excel")]
    Excel,
    #[serde(rename = "icon-file-chart-graph")]
    ChartGraph,
}

impl IconClass {
    /// The CSS class name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "icon-file",
            Self::Image => "icon-file-image",
            Self::Text => "icon-file-text",
            Self::Music => "icon-file-music",
            Self::Movie => "icon-file-movie",
            Self::Zip => "icon-file-zip",
            Self::Excel => "icon-file-excel",
            Self::ChartGraph => "icon-file-chart-graph",
        }
    }

    /// Short glyph for terminal rendering.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::File => "[F]",
            Self::Image => "[I]",
            Self::Text => "[T]",
            Self::Music => "[A]",
            Self::Movie => "[V]",
            Self::Zip => "[Z]",
            Self::Excel => "[X]",
            Self::ChartGraph => "[P]",
        }
    }
}

impl std::fmt::Display for IconClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ARCHIVE_SUBTYPES: &[&str] = &[
    "zip",
    "7z",
    "tar",
    "rar",
    "gzip",
    "bzip",
    "bzip2",
    "x-zip",
    "x-7z",
    "x-rar",
    "x-tar",
    "x-gzip",
    "x-bzip",
    "x-bzip2",
    "x-zip-compressed",
    "x-7z-compressed",
    "x-rar-compressed",
];

pub const WORD_SUBTYPES: &[&str] = &[
    "rtf",
    "msword",
    "vnd.msword",
    "vnd.openxmlformats-officedocument.wordprocessingml.document",
    "vnd.openxmlformats-officedocument.wordprocessingml.template",
    "vnd.ms-word.document.macroEnabled.12",
    "vnd.ms-word.template.macroEnabled.12",
];

pub const SPREADSHEET_SUBTYPES: &[&str] = &[
    "excel",
    "ms-excel",
    "vnd.ms-excel",
    "vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "vnd.openxmlformats-officedocument.spreadsheetml.template",
    "vnd.ms-excel.sheet.macroEnabled.12",
    "vnd.ms-excel.template.macroEnabled.12",
    "vnd.ms-excel.addin.macroEnabled.12",
    "vnd.ms-excel.sheet.binary.macroEnabled.12",
];

pub const PRESENTATION_SUBTYPES: &[&str] = &[
    "powerpoint",
    "ms-powerpoint",
    "vnd.ms-powerpoint",
    "vnd.openxmlformats-officedocument.presentationml.presentation",
    "vnd.openxmlformats-officedocument.presentationml.template",
    "vnd.openxmlformats-officedocument.presentationml.slideshow",
    "vnd.ms-powerpoint.addin.macroEnabled.12",
    "vnd.ms-powerpoint.presentation.macroEnabled.12",
    "vnd.ms-powerpoint.template.macroEnabled.12",
    "vnd.ms-powerpoint.slideshow.macroEnabled.12",
];

/// What a rule inspects.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    Family(&'static str),
    Subtype(&'static [&'static str]),
}

impl Matcher {
    fn matches(self, family: &str, subtype: &str) -> bool {
        match self {
            Self::Family(f) => family.eq_ignore_ascii_case(f),
            Self::Subtype(set) => set.iter().any(|s| s.eq_ignore_ascii_case(subtype)),
        }
    }
}

/// Ordered classification rules.
const RULES: &[(Matcher, IconClass)] = &[
    (Matcher::Family("image"), IconClass::Image),
    (Matcher::Family("text"), IconClass::Text),
    (Matcher::Family("audio"), IconClass::Music),
    (Matcher::Family("video"), IconClass::Movie),
    (Matcher::Subtype(ARCHIVE_SUBTYPES), IconClass::Zip),
    (Matcher::Subtype(WORD_SUBTYPES), IconClass::Text),
    (Matcher::Subtype(SPREADSHEET_SUBTYPES), IconClass::Excel),
    (Matcher::Subtype(PRESENTATION_SUBTYPES), IconClass::ChartGraph),
];

/// Classify a MIME type string, ignoring ASCII case. Strings without a
/// subtype get the generic icon.
pub fn icon_class(mime_type: &str) -> IconClass {
    let mut parts = mime_type.split('/');
    let family = parts.next().unwrap_or("");
    let subtype = match parts.next() {
        Some(s) if !s.is_empty() => s,
        _ => return IconClass::File,
    };

    RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(family, subtype))
        .map(|&(_, class)| class)
        .unwrap_or(IconClass::File)
}
