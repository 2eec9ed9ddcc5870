//! Keeps API tokens and oversized bodies out of log output.

/// Bodies longer than this many bytes are cut in log lines.
const BODY_LOG_LIMIT: usize = 256;

const TOKEN_KEY: &str = "AUTH_TOKEN=";

/// Shorten a response body for a log line.
///
/// The cut lands on the last char boundary at or before the limit, and the
/// original byte length is appended so a reader knows how much was dropped.
pub fn truncate_for_log(body: &str) -> String {
    if body.len() <= BODY_LOG_LIMIT {
        return body.to_string();
    }
    let cut = (0..=BODY_LOG_LIMIT)
        .rev()
        .find(|&i| body.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}... ({} bytes)", &body[..cut], body.len())
}

/// Replace the value of every `AUTH_TOKEN` parameter with `***`.
pub fn redact_token(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(pos) = rest.find(TOKEN_KEY) {
        let value_start = pos + TOKEN_KEY.len();
        out.push_str(&rest[..value_start]);
        out.push_str("***");
        rest = &rest[value_start..];
        rest = rest.find('&').map_or("", |end| &rest[end..]);
    }
    out.push_str(rest);
    out
}
