//! Monthly branch report builder and slide presenter.
//!
//! `model` holds the report, `edit` the pure update functions, `slides` the
//! deck projection and `session` ties them to navigation and file transfer.

pub mod command;
pub mod config;
pub mod edit;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod nav;
pub mod panel;
pub mod render;
pub mod session;
pub mod slides;
pub mod transfer;
