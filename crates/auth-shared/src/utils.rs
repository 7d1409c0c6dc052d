//! Utility functions

/// Mask an email for log output: `alice@example.com` -> `al***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let keep: String = local.chars().take(if local.chars().count() <= 2 { 1 } else { 2 }).collect();
            format!("{}***@{}", keep, domain)
        }
        _ => "***".to_string(),
    }
}

/// Shorten a session id for log output. Full ids are bearer credentials.
pub fn mask_session_id(session_id: &str) -> String {
    let prefix: String = session_id.chars().take(8).collect();
    format!("{}…", prefix)
}
