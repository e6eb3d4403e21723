use crate::board::types::{Idea, IdeaDraft};
use crate::database::{Database, DbError};

/// Store keys for the board's persisted records. Fixed namespace strings; the
/// whole record is re-serialized on every successful mutation.
pub const KEY_IDEAS: &str = "digihart.ideas";
pub const KEY_BOOKMARKS: &str = "digihart.bookmarks";
pub const KEY_DRAFT: &str = "digihart.draft";

impl Database {
    /// Load the persisted idea collection. `None` means both "never saved" and
    /// "saved but unreadable": malformed JSON is logged and treated as absent
    /// so a corrupt store never takes the application down.
    pub fn load_ideas(&self) -> Result<Option<Vec<Idea>>, DbError> {
        let Some(raw) = self.get_value(KEY_IDEAS)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Idea>>(&raw) {
            Ok(ideas) => Ok(Some(ideas)),
            Err(e) => {
                eprintln!("Discarding unreadable idea store: {}", e);
                Ok(None)
            }
        }
    }

    /// Serialize the full collection under its fixed key.
    pub fn save_ideas(&self, ideas: &[Idea]) -> Result<(), DbError> {
        let json = serde_json::to_string(ideas).unwrap_or_else(|_| "[]".to_string());
        self.set_value(KEY_IDEAS, &json)
    }

    /// Load the bookmark id list, empty if absent or unreadable.
    pub fn load_bookmarks(&self) -> Result<Vec<String>, DbError> {
        let Some(raw) = self.get_value(KEY_BOOKMARKS)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                eprintln!("Discarding unreadable bookmark store: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub fn save_bookmarks(&self, bookmarks: &[String]) -> Result<(), DbError> {
        let json = serde_json::to_string(bookmarks).unwrap_or_else(|_| "[]".to_string());
        self.set_value(KEY_BOOKMARKS, &json)
    }

    /// Load the saved form draft, default (empty) if absent or unreadable.
    pub fn load_draft(&self) -> Result<IdeaDraft, DbError> {
        let Some(raw) = self.get_value(KEY_DRAFT)? else {
            return Ok(IdeaDraft::default());
        };

        match serde_json::from_str::<IdeaDraft>(&raw) {
            Ok(draft) => Ok(draft),
            Err(e) => {
                eprintln!("Discarding unreadable draft: {}", e);
                Ok(IdeaDraft::default())
            }
        }
    }

    pub fn save_draft(&self, draft: &IdeaDraft) -> Result<(), DbError> {
        let json = serde_json::to_string(draft).unwrap_or_else(|_| "{}".to_string());
        self.set_value(KEY_DRAFT, &json)
    }

    pub fn clear_draft(&self) -> Result<(), DbError> {
        self.delete_value(KEY_DRAFT)
    }
}
