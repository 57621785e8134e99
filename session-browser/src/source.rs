use anyhow::{Context, Result};
use session_catalog::{parse_catalog, Catalog, Shape};

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch(source: &str) -> Result<String> {
    if is_url(source) {
        log::debug!("Sending HTTP request to {source}");
        let body = reqwest::get(source)
            .await?
            .error_for_status()?
            .text()
            .await?;
        return Ok(body);
    }

    tokio::fs::read_to_string(source)
        .await
        .with_context(|| format!("Failed to read {source}"))
}

/// Loads the catalog from a file or URL. Any failure is reported to the user
/// and yields an empty catalog.
pub async fn load_catalog(source: &str) -> Catalog {
    let body = match fetch(source).await {
        Ok(body) => body,
        Err(err) => {
            log::error!("Loading sessions from {source} failed: {err:#}");
            eprintln!("Error loading sessions. Please make sure {source} is available.");
            return Catalog::default();
        }
    };

    let report = parse_catalog(body);

    if report.shape == Shape::Unrecognized {
        eprintln!("{source} does not contain a session list.");
    } else if report.skipped > 0 {
        eprintln!(
            "Skipped {} incomplete session record(s) from {source}.",
            report.skipped
        );
    }

    log::info!("Loaded {} sessions from {source}", report.catalog.len());
    report.catalog
}
