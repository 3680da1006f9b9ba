//! Environment flags supplied by the hosting application.

use crate::config::FeaturesConfig;

/// Global feature flags the view-models consult.
pub trait Environment: Send + Sync {
    /// Whether PDF attachments may be previewed natively.
    fn allow_pdf_preview(&self) -> bool;

    /// Whether an external (framed) preview provider is currently available.
    fn framed_preview_supported(&self) -> bool;
}

/// Fixed flags, typically read from the `[features]` config section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticEnvironment {
    pub allow_pdf_preview: bool,
    pub framed_preview_supported: bool,
}

impl From<&FeaturesConfig> for StaticEnvironment {
    fn from(features: &FeaturesConfig) -> Self {
        Self {
            allow_pdf_preview: features.allow_pdf_preview,
            framed_preview_supported: features.framed_preview_supported,
        }
    }
}

impl Environment for StaticEnvironment {
    fn allow_pdf_preview(&self) -> bool {
        self.allow_pdf_preview
    }

    fn framed_preview_supported(&self) -> bool {
        self.framed_preview_supported
    }
}
