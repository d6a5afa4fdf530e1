//! Workbook byte loading from a local path or an HTTP URL.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;

pub fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::blocking::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req)?;
    Ok(resp.bytes()?.to_vec())
}

/// Loads workbook bytes from a local file path or fetches them over HTTP.
pub fn load_source(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, source)
    } else {
        Ok(std::fs::read(source)?)
    }
}
