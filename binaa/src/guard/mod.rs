//! Per-request routing decisions: asset bypass, locale routing and dashboard access control.
//!
//! The decision is framework independent; `binaa_axum` runs it as middleware and applies
//! the sliding session refresh to responses that continue.

mod assets;
mod config;
mod main;

pub use assets::is_public_asset_path;
pub use main::{GuardDecision, GuardRequest, evaluate, strip_locale};
