//! Wealth Onboard — the onboarding data-collection and submission pipeline
//! of a personal-finance assistant.

pub mod api;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod session;
pub mod ui;
