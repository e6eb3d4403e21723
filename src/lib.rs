mod ai;
mod auth;
mod board;
mod commands;
mod database;

use auth::{AdminSession, StaticCredential};
use board::{DraftBuffer, IdeaBoard};
use commands::AppState;
use std::sync::{Arc, Mutex};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize database
    let db = Arc::new(database::Database::new().expect("Failed to initialize database"));

    let app_state = Arc::new(AppState {
        db,
        board: Mutex::new(IdeaBoard::new()),
        draft_buffer: Arc::new(DraftBuffer::new()),
        credentials: Box::new(StaticCredential::from_env()),
        admin: AdminSession::new(),
        brainstorm_requests: Default::default(),
        generation_requests: Default::default(),
        reply_requests: Default::default(),
    });

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // Settings commands
            commands::get_settings,
            commands::save_settings,
            // Board commands
            commands::initialize_board,
            commands::list_ideas,
            commands::add_idea,
            commands::like_idea,
            commands::dislike_idea,
            commands::delete_idea,
            commands::set_admin_response,
            commands::toggle_bookmark,
            commands::select_idea,
            commands::get_statistics,
            commands::export_ideas,
            // Draft commands
            commands::update_draft,
            commands::flush_draft,
            // Admin commands
            commands::admin_login,
            commands::admin_logout,
            commands::admin_status,
            // AI commands
            commands::ai_brainstorm,
            commands::ai_generate_ideas,
            commands::ai_suggest_reply,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
