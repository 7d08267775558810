/// Value for the `Authorization` header of a verify call
pub fn bearer_header(session_id: &str) -> String {
    format!("Bearer {}", session_id)
}

/// Shorten a session token for log output
///
/// Keeps the first four characters and replaces the rest, so log lines can
/// be correlated without leaking a usable credential.
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
