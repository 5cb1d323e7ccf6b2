use anyhow::{bail, Context, Result};

/// Fetch the raw feed. The one suspension point in a refresh cycle; any
/// failure here fails the whole cycle closed: callers keep (or show) the
/// previous complete snapshot, never partial data.
pub async fn fetch_feed(url: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("fetch {url}"))?;

    let status = resp.status();
    if !status.is_success() {
        bail!("feed returned {status} for {url}");
    }

    resp.text().await.context("read feed body")
}
