use crate::ai::{GeminiClient, IdeaSeed, LatestRequest};
use crate::auth::{AdminSession, CredentialCheck};
use crate::board::{
    compute_statistics, export_csv, BoardSnapshot, BoardStats, DraftBuffer, Idea, IdeaBoard,
    IdeaCategory, IdeaDraft, ViewQuery,
};
use crate::database::{Database, DbError, Settings};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tauri::{command, State};

pub struct AppState {
    pub db: Arc<Database>,
    pub board: Mutex<IdeaBoard>,
    pub draft_buffer: Arc<DraftBuffer>,
    pub credentials: Box<dyn CredentialCheck>,
    pub admin: AdminSession,
    pub brainstorm_requests: LatestRequest,
    pub generation_requests: LatestRequest,
    pub reply_requests: LatestRequest,
}

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl From<DbError> for CommandError {
    fn from(e: DbError) -> Self {
        CommandError {
            message: e.to_string(),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        CommandError {
            message: e.to_string(),
        }
    }
}

fn lock_board<'a>(state: &'a AppState) -> Result<MutexGuard<'a, IdeaBoard>, CommandError> {
    state.board.lock().map_err(|_| CommandError {
        message: "board state lock poisoned".to_string(),
    })
}

fn require_admin(state: &AppState) -> Result<(), CommandError> {
    if state.admin.is_active() {
        Ok(())
    } else {
        Err(CommandError {
            message: "admin mode required".to_string(),
        })
    }
}

/// Build a Gemini client from the stored settings, falling back to the
/// `GEMINI_API_KEY` environment variable for the key.
fn ai_client(state: &AppState) -> GeminiClient {
    let settings = state.db.get_settings().unwrap_or_default();
    let api_key = if settings.api_key.is_empty() {
        std::env::var("GEMINI_API_KEY").unwrap_or_default()
    } else {
        settings.api_key
    };
    GeminiClient::new(api_key, Some(settings.base_url), Some(settings.model))
}

/// Map a UI language code onto the language name used in prompts.
fn prompt_language(code: &str) -> &'static str {
    match code {
        "nl" => "Nederlands",
        _ => "English",
    }
}

// ==================== Settings Commands ====================

#[command]
pub fn get_settings(state: State<'_, Arc<AppState>>) -> Result<Settings, CommandError> {
    state.db.get_settings().map_err(Into::into)
}

#[command]
pub fn save_settings(
    state: State<'_, Arc<AppState>>,
    settings: Settings,
) -> Result<(), CommandError> {
    state.db.save_settings(&settings).map_err(Into::into)
}

// ==================== Board Commands ====================

/// Load persisted state (or the seed records) into the board. Safe to call
/// more than once; later calls return the current snapshot unchanged.
#[command]
pub fn initialize_board(state: State<'_, Arc<AppState>>) -> Result<BoardSnapshot, CommandError> {
    let mut board = lock_board(&state)?;
    Ok(board.initialize(&state.db))
}

/// Derived, read-only view: filtered by search term and bookmark flag,
/// ordered by the requested sort mode.
#[command]
pub fn list_ideas(
    state: State<'_, Arc<AppState>>,
    query: ViewQuery,
) -> Result<Vec<Idea>, CommandError> {
    let board = lock_board(&state)?;
    Ok(board.query_view(&query))
}

/// Submit a new idea. Returns `None` when title or description is blank;
/// the form keeps its input in that case.
#[command]
pub fn add_idea(
    state: State<'_, Arc<AppState>>,
    title: String,
    description: String,
    category: IdeaCategory,
    author: Option<String>,
) -> Result<Option<Idea>, CommandError> {
    let mut board = lock_board(&state)?;
    let idea = board.add_idea(
        &state.db,
        &title,
        &description,
        category,
        author.as_deref().unwrap_or(""),
    );
    if idea.is_some() {
        // The stored draft was cleared with the submit; drop the staged copy
        state.draft_buffer.discard();
    }
    Ok(idea)
}

#[command]
pub fn like_idea(
    state: State<'_, Arc<AppState>>,
    id: String,
) -> Result<Option<Idea>, CommandError> {
    let mut board = lock_board(&state)?;
    Ok(board.like(&state.db, &id))
}

#[command]
pub fn dislike_idea(
    state: State<'_, Arc<AppState>>,
    id: String,
) -> Result<Option<Idea>, CommandError> {
    let mut board = lock_board(&state)?;
    Ok(board.dislike(&state.db, &id))
}

/// Remove an idea (admin only). Clears the selection when it pointed at the
/// removed record.
#[command]
pub fn delete_idea(state: State<'_, Arc<AppState>>, id: String) -> Result<bool, CommandError> {
    require_admin(&state)?;
    let mut board = lock_board(&state)?;
    Ok(board.delete_idea(&state.db, &id))
}

/// Set or overwrite the official response on an idea (admin only).
#[command]
pub fn set_admin_response(
    state: State<'_, Arc<AppState>>,
    id: String,
    text: String,
) -> Result<Option<Idea>, CommandError> {
    require_admin(&state)?;
    let mut board = lock_board(&state)?;
    Ok(board.set_admin_response(&state.db, &id, &text))
}

/// Toggle a bookmark; returns the bookmark list afterwards.
#[command]
pub fn toggle_bookmark(
    state: State<'_, Arc<AppState>>,
    id: String,
) -> Result<Vec<String>, CommandError> {
    let mut board = lock_board(&state)?;
    board.toggle_bookmark(&state.db, &id);
    Ok(board.bookmarks().to_vec())
}

#[command]
pub fn select_idea(
    state: State<'_, Arc<AppState>>,
    id: Option<String>,
) -> Result<Option<String>, CommandError> {
    let mut board = lock_board(&state)?;
    board.select(id);
    Ok(board.selected_id().map(String::from))
}

#[command]
pub fn get_statistics(state: State<'_, Arc<AppState>>) -> Result<BoardStats, CommandError> {
    let board = lock_board(&state)?;
    Ok(compute_statistics(board.ideas()))
}

/// Render the collection as CSV, optionally writing it to a path picked by
/// the frontend's save dialog. Returns the document either way.
#[command]
pub fn export_ideas(
    state: State<'_, Arc<AppState>>,
    path: Option<String>,
) -> Result<String, CommandError> {
    let csv = {
        let board = lock_board(&state)?;
        export_csv(board.ideas())
    };
    if let Some(path) = path {
        std::fs::write(&path, &csv)?;
    }
    Ok(csv)
}

// ==================== Draft Commands ====================

/// Stage the current form content; the durable write is debounced. Async so
/// the debounce timer lands on the runtime that drives the other commands.
#[command]
pub async fn update_draft(
    state: State<'_, Arc<AppState>>,
    draft: IdeaDraft,
) -> Result<(), CommandError> {
    {
        let mut board = lock_board(&state)?;
        board.set_draft(draft.clone());
    }
    state.draft_buffer.record(Arc::clone(&state.db), draft);
    Ok(())
}

/// Write any staged draft immediately (called on form close/unmount).
#[command]
pub fn flush_draft(state: State<'_, Arc<AppState>>) -> Result<(), CommandError> {
    state.draft_buffer.flush(&state.db);
    Ok(())
}

// ==================== Admin Commands ====================

/// Attempt admin login. `false` on a wrong password; the UI shows a
/// transient notification, there is no lockout.
#[command]
pub fn admin_login(state: State<'_, Arc<AppState>>, password: String) -> bool {
    state.admin.login(state.credentials.as_ref(), &password)
}

#[command]
pub fn admin_logout(state: State<'_, Arc<AppState>>) {
    state.admin.logout();
}

#[command]
pub fn admin_status(state: State<'_, Arc<AppState>>) -> bool {
    state.admin.is_active()
}

// ==================== AI Commands ====================

/// Freeform brainstorm on a topic. `None` means the request was superseded
/// by a newer one and its result must be discarded.
#[command]
pub async fn ai_brainstorm(
    state: State<'_, Arc<AppState>>,
    topic: String,
    category: IdeaCategory,
    language: Option<String>,
) -> Result<Option<String>, CommandError> {
    if topic.trim().is_empty() {
        return Ok(None);
    }

    let token = state.brainstorm_requests.begin();
    let client = ai_client(&state);
    let language = prompt_language(language.as_deref().unwrap_or("nl"));

    let result = client.brainstorm(&topic, category, language).await;
    if state.brainstorm_requests.is_current(token) {
        Ok(Some(result))
    } else {
        Ok(None)
    }
}

/// Structured generation of partial ideas for the import flow. Failures and
/// superseded requests both come back as an empty list.
#[command]
pub async fn ai_generate_ideas(
    state: State<'_, Arc<AppState>>,
    topic: String,
    language: Option<String>,
) -> Result<Vec<IdeaSeed>, CommandError> {
    if topic.trim().is_empty() {
        return Ok(Vec::new());
    }

    let token = state.generation_requests.begin();
    let client = ai_client(&state);
    let language = prompt_language(language.as_deref().unwrap_or("nl"));

    let seeds = client.generate_ideas(&topic, language).await;
    if state.generation_requests.is_current(token) {
        Ok(seeds)
    } else {
        Ok(Vec::new())
    }
}

/// Suggest an official reply for an idea (admin only). `None` when the idea
/// is gone or the request was superseded.
#[command]
pub async fn ai_suggest_reply(
    state: State<'_, Arc<AppState>>,
    id: String,
    language: Option<String>,
) -> Result<Option<String>, CommandError> {
    require_admin(&state)?;

    let idea = {
        let board = lock_board(&state)?;
        board.get(&id).cloned()
    };
    let Some(idea) = idea else {
        return Ok(None);
    };

    let token = state.reply_requests.begin();
    let client = ai_client(&state);
    let language = prompt_language(language.as_deref().unwrap_or("nl"));

    let reply = client.suggest_reply(&idea, language).await;
    if state.reply_requests.is_current(token) {
        Ok(Some(reply))
    } else {
        Ok(None)
    }
}
