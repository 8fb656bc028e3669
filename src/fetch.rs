use log::debug;
use reqwest::header::{REFERER, USER_AGENT};
use reqwest::Client;

use crate::identity::random_identity;

/// Decides whether a response body counts as a hit for a target URL.
///
/// The default is a literal substring check: the raw URL string must appear
/// somewhere in the body. Crude, but it is the established reachability
/// heuristic for this tool and callers can swap in their own.
pub type SuccessCheck = fn(url: &str, body: &str) -> bool;

pub fn url_in_body(url: &str, body: &str) -> bool {
    body.contains(url)
}

/// What became of one (proxy, url) attempt.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The request completed; `body_matched` says whether the success check
    /// accepted the body.
    Success { body_matched: bool },
    /// The request never completed (timeout, refused connection, DNS).
    TransportError(reqwest::Error),
    /// The request reached the wire but the exchange itself failed.
    HttpError(reqwest::Error),
}

/// Issues one GET for `url` through `client` with freshly randomized identity
/// headers, and classifies the result.
///
/// HTTP status is deliberately not inspected; only the success check over the
/// decoded body matters. Undecodable bytes are replaced, never fatal.
pub async fn fetch_url(client: &Client, url: &str, check: SuccessCheck) -> FetchOutcome {
    let identity = random_identity();
    let response = client
        .get(url)
        .header(USER_AGENT, identity.user_agent)
        .header(REFERER, identity.referer)
        .send()
        .await;

    let response = match response {
        Ok(r) => r,
        Err(e) if e.is_timeout() || e.is_connect() || e.is_request() => {
            return FetchOutcome::TransportError(e);
        }
        Err(e) => return FetchOutcome::HttpError(e),
    };

    debug!("{} replied with status {}", url, response.status());

    // Best-effort decode; reqwest replaces invalid bytes.
    match response.text().await {
        Ok(body) => FetchOutcome::Success {
            body_matched: check(url, &body),
        },
        Err(e) => FetchOutcome::HttpError(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_check_matches_literally() {
        assert!(url_in_body(
            "http://example.com",
            "<a href=\"http://example.com\">home</a>"
        ));
        assert!(!url_in_body("http://example.com", "<html>nothing here</html>"));
        // No normalization: a trailing slash is a different string.
        assert!(!url_in_body("http://example.com/", "http://example.com"));
    }
}
