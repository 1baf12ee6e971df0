use std::time::Duration;

use reqwest::{
    header::{
        ACCEPT,
        USER_AGENT,
    },
    Client,
    Response,
};
use serde::de::DeserializeOwned;

use crate::core::DexError;

const AGENT: &str = "dexview/0.1 (+reqwest)";

pub fn http_client(timeout: Duration) -> Result<Client, DexError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DexError::Custom(format!("HTTP client build failed: {e}")))
}

pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, DexError> {
    let resp = client
        .get(url)
        .header(USER_AGENT, AGENT)
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    ensure_success(&resp)?;

    let body = resp.json::<T>().await?;
    Ok(body)
}

fn ensure_success(resp: &Response) -> Result<(), DexError> {
    if !resp.status().is_success() {
        return Err(DexError::HttpStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
