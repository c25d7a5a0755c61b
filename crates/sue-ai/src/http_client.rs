use std::time::Duration;

use reqwest::Client;

use crate::error::Result;

const DISABLE_SYSTEM_PROXY_ENV: &str = "SUE_DISABLE_SYSTEM_PROXY";

// Truncate error bodies to prevent leaking large or sensitive responses.
const MAX_ERROR_BODY: usize = 512;

pub(crate) fn build_http_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    let builder = Client::builder().timeout(timeout).user_agent(user_agent);
    let builder = if should_disable_system_proxy() {
        builder.no_proxy()
    } else {
        builder
    };
    Ok(builder.build()?)
}

fn should_disable_system_proxy() -> bool {
    if std::env::var_os(DISABLE_SYSTEM_PROXY_ENV).is_some() {
        return true;
    }

    cfg!(test)
}

/// Cut an HTTP error body to at most `MAX_ERROR_BODY` bytes on a char boundary.
pub(crate) fn truncate_error_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }

    let mut cut = MAX_ERROR_BODY;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... [truncated]", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_error_body() {
        assert_eq!(truncate_error_body("short".to_string()), "short");

        let long = "я".repeat(400);
        let truncated = truncate_error_body(long);
        assert!(truncated.ends_with("... [truncated]"));
        assert!(truncated.len() <= MAX_ERROR_BODY + "... [truncated]".len());
    }
}
