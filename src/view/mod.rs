//! View-models: display-ready state bound to rendered views.
//!
//! Every view-model implements [`ViewModel`]. The host calls the lifecycle
//! hooks as views appear, gain focus and disappear, and uses
//! [`ViewModel::registration`] to find the template that renders it.

pub mod attachment;
pub mod icon;
pub mod two_factor;

use std::sync::Arc;

use crate::config::Config;
use crate::env::{Environment, StaticEnvironment};
use crate::format::SizeUnits;
use crate::links::{LinkBuilder, ServerLinks};

/// Where a view is mounted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPosition {
    /// Plain model, not mounted on its own.
    None,
    /// Modal popup layer.
    Popups,
}

/// Template binding of a view-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub position: ViewPosition,
    /// Template rendered for this view-model.
    pub template: &'static str,
    /// Name the view-model is registered under.
    pub name: &'static str,
}

/// Lifecycle contract shared by all view-models.
pub trait ViewModel {
    fn registration(&self) -> Registration;

    /// The view became visible.
    fn on_show(&mut self) {}

    /// The view was closed.
    fn on_hide(&mut self) {}

    /// The view received input focus.
    fn on_focus(&mut self) {}
}

/// Collaborators shared by attachment views: environment flags, link
/// construction and size formatting.
#[derive(Clone)]
pub struct ViewContext {
    pub env: Arc<dyn Environment>,
    pub links: Arc<dyn LinkBuilder>,
    pub size_units: SizeUnits,
}

impl ViewContext {
    pub fn new(env: Arc<dyn Environment>, links: Arc<dyn LinkBuilder>) -> Self {
        Self {
            env,
            links,
            size_units: SizeUnits::Binary,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            env: Arc::new(StaticEnvironment::from(&config.features)),
            links: Arc::new(ServerLinks::from_config(&config.server)),
            size_units: config.display.size_units,
        }
    }
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl std::fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewContext")
            .field("allow_pdf_preview", &self.env.allow_pdf_preview())
            .field(
                "framed_preview_supported",
                &self.env.framed_preview_supported(),
            )
            .field("size_units", &self.size_units)
            .finish()
    }
}
