use anyhow::Context;

use crate::models::Movie;
use crate::services::RecordOutcome;
use crate::state::SharedState;

pub async fn cmd_record(
    state: &SharedState,
    term: &str,
    movie_id: i64,
    poster_path: Option<&str>,
) -> anyhow::Result<()> {
    let movie = Movie::new(movie_id, poster_path);

    let outcome = state
        .trending_service
        .record_search(term, &movie)
        .await
        .with_context(|| format!("Failed to record search for \"{term}\""))?;

    match outcome {
        RecordOutcome::Created { id } => {
            println!("Now tracking \"{term}\" (document {id})");
        }
        RecordOutcome::Incremented { count, .. } => {
            println!("\"{term}\" has been searched {count} times");
        }
    }

    Ok(())
}
