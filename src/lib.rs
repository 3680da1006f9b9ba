//! `mailpane`: view-models for a webmail client.
//!
//! This crate turns server-supplied attachment records into display-ready
//! views (icon classes, friendly sizes, preview links) and drives the
//! two-factor test dialog. A terminal host is included to exercise both.

pub mod config;
pub mod env;
pub mod error;
pub mod format;
pub mod i18n;
pub mod input;
pub mod links;
pub mod model;
pub mod remote;
pub mod tui;
pub mod view;
