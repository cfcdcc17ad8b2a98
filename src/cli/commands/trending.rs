use anyhow::Context;

use crate::state::SharedState;

pub async fn cmd_trending(state: &SharedState) -> anyhow::Result<()> {
    let records = state
        .trending_service
        .fetch_trending()
        .await
        .context("Failed to fetch trending searches")?;

    if records.is_empty() {
        println!("No searches recorded yet.");
        return Ok(());
    }

    println!("Trending searches:");
    println!("{:-<70}", "");

    for (rank, record) in records.iter().enumerate() {
        println!(
            "{:>2}. {:<40} {:>6} searches",
            rank + 1,
            record.search_term,
            record.count
        );
        println!("    Movie {} | {}", record.movie_id, record.poster_url);
    }

    Ok(())
}
