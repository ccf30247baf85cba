use crate::models::GeneratedComment;
use crate::services::board::SubmitOutcome;
use crate::AppState;
use askama::Template;
use axum::{extract::State, response::IntoResponse, Form};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

/// Session key holding the id of the visitor's board.
const BOARD_ID_KEY: &str = "board_id";

pub const FAILURE_NOTICE: &str = "Failed to generate comments. Please try again.";
pub const BUSY_NOTICE: &str = "Still generating the previous comments, hang tight.";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub post: String,
    pub comments: Vec<GeneratedComment>,
    pub busy: bool,
    pub notice: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub post: String,
}

async fn stored_board_id(session: &Session) -> Option<String> {
    match session.get::<String>(BOARD_ID_KEY).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read session");
            None
        }
    }
}

pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let board = stored_board_id(&session)
        .await
        .and_then(|id| state.boards.existing(&id));

    let (comments, busy) = match board {
        Some(board) => (board.comments().await, board.is_busy()),
        None => (Vec::new(), false),
    };

    IndexTemplate {
        post: String::new(),
        comments,
        busy,
        notice: None,
    }
}

pub async fn generate(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GenerateForm>,
) -> impl IntoResponse {
    let board_id = match stored_board_id(&session).await {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4().to_string();
            if let Err(e) = session.insert(BOARD_ID_KEY, &id).await {
                tracing::warn!(error = %e, "Failed to store board id in session");
            }
            id
        }
    };
    let board = state.boards.board(&board_id);

    let outcome = board.submit(&form.post).await;
    tracing::info!(outcome = ?outcome, "Handled generate submission");

    let notice = match outcome {
        SubmitOutcome::Failed => Some(FAILURE_NOTICE),
        SubmitOutcome::Busy => Some(BUSY_NOTICE),
        SubmitOutcome::Skipped | SubmitOutcome::Rendered(_) => None,
    };

    IndexTemplate {
        post: form.post,
        comments: board.comments().await,
        busy: board.is_busy(),
        notice,
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
