//! Notification channel adapters

pub mod webhook;

pub use webhook::WebhookNotifier;
