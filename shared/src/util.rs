/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC time as an RFC3339 string (stored-record timestamp format)
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Trim a user-supplied text field, returning None when blank
pub fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_rejects_whitespace() {
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(""), None);
        assert_eq!(non_blank("  ok "), Some("ok"));
    }
}
