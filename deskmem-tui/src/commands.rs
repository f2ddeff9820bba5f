use anyhow::Result;
use deskmem_api::models::{Ack, FailedScreenshot, SearchHit};
use deskmem_api::timezone::{self, FormatOptions};
use deskmem_api::{ApiError, SessionController};

fn explain(e: ApiError) -> anyhow::Error {
    if e.is_session_expired() {
        anyhow::anyhow!("Session expired. Run `deskmem-tui login` to sign in again.")
    } else {
        anyhow::anyhow!(e.user_message())
    }
}

pub async fn search(controller: &SessionController, query: &str, limit: u32) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("Search query must not be empty");
    }
    let page = controller
        .client()
        .search(query, limit)
        .await
        .map_err(explain)?;

    if page.items.is_empty() {
        println!("No results for \"{query}\".");
        return Ok(());
    }
    println!("{} result(s) for \"{query}\":", page.total_or_len());
    for hit in &page.items {
        println!("{}", format_hit(hit));
    }
    Ok(())
}

pub async fn trigger(controller: &SessionController) -> Result<()> {
    let ack = controller
        .client()
        .trigger_analysis()
        .await
        .map_err(explain)?;
    println!("{}", ack_line(&ack, "Analysis triggered"));
    Ok(())
}

pub async fn retry_failed(controller: &SessionController) -> Result<()> {
    let ack = controller.client().retry_failed().await.map_err(explain)?;
    println!("{}", ack_line(&ack, "Failed screenshots reset"));
    Ok(())
}

pub async fn failed(controller: &SessionController) -> Result<()> {
    let page = controller
        .client()
        .failed_screenshots()
        .await
        .map_err(explain)?;
    if page.items.is_empty() {
        println!("No failed analyses.");
        return Ok(());
    }
    println!("{} screenshot(s) failed analysis:", page.total_or_len());
    for item in &page.items {
        println!("{}", format_failed(item));
    }
    Ok(())
}

fn ack_line(ack: &Ack, fallback: &str) -> String {
    let message = ack.message.as_deref().unwrap_or(fallback);
    if ack.success {
        message.to_string()
    } else {
        format!("Server declined: {message}")
    }
}

fn format_hit(hit: &SearchHit) -> String {
    let when = timezone::format(hit.timestamp, FormatOptions::without_seconds());
    let score = hit
        .score_percent()
        .map(|s| format!(" {s}%"))
        .unwrap_or_default();
    format!(
        "{when}  [{}{score}]  {}  {}",
        hit.relevance.label(),
        hit.application.as_deref().unwrap_or("-"),
        hit.description.as_deref().unwrap_or(""),
    )
}

fn format_failed(item: &FailedScreenshot) -> String {
    format!(
        "#{:<6} {}  {}  tries: {}  {}",
        item.id,
        timezone::format(item.timestamp, FormatOptions::default()),
        item.filename,
        item.failed_count,
        item.last_error.as_deref().unwrap_or(""),
    )
}
