use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::from_str;
use std::time::Duration;

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, String> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| e.to_string())
}

/// POSTs `body` as JSON and decodes the response. Non-2xx responses are
/// errors carrying the status and body text.
pub(crate) fn post_json<T: DeserializeOwned, B: Serialize>(
    client: &Client,
    url: &str,
    bearer: Option<&str>,
    body: &B,
) -> Result<T, String> {
    let mut req = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .json(body);
    if let Some(token) = bearer {
        req = req.bearer_auth(token);
    }
    let resp = req.send().map_err(|e| format!("POST {} failed: {}", url, e))?;
    let status = resp.status();
    let text = resp.text().unwrap_or_default();
    if !status.is_success() {
        return Err(format!("POST {} failed: {} {}", url, status, text));
    }
    from_str::<T>(&text).map_err(|e| format!("POST {} decode failed: {} | {}", url, e, text))
}
