use crate::board::types::{
    seed_ideas, BoardSnapshot, Idea, IdeaCategory, IdeaDraft, SortMode, ViewQuery, DEFAULT_AUTHOR,
};
use crate::database::Database;
use chrono::Utc;

/// Authoritative in-memory state of the idea board: the idea collection,
/// the bookmark id list, the saved form draft and the current selection.
/// All mutation goes through the methods here; each successful mutation
/// re-serializes the affected record to the database.
pub struct IdeaBoard {
    ideas: Vec<Idea>,
    bookmarks: Vec<String>,
    draft: IdeaDraft,
    selected: Option<String>,
    loaded: bool,
}

impl IdeaBoard {
    pub fn new() -> Self {
        Self {
            ideas: Vec::new(),
            bookmarks: Vec::new(),
            draft: IdeaDraft::default(),
            selected: None,
            loaded: false,
        }
    }

    /// Adopt persisted state, seeding the demo records when nothing usable was
    /// stored. Idempotent: once loaded, further calls leave state untouched.
    /// Saves are suppressed until this has run so an empty initial board can
    /// never overwrite a stored collection during startup.
    pub fn initialize(&mut self, db: &Database) -> BoardSnapshot {
        if self.loaded {
            return self.snapshot();
        }

        self.ideas = match db.load_ideas() {
            Ok(Some(ideas)) => ideas,
            Ok(None) => seed_ideas(),
            Err(e) => {
                eprintln!("Failed to read idea store: {}", e);
                seed_ideas()
            }
        };

        self.bookmarks = db.load_bookmarks().unwrap_or_else(|e| {
            eprintln!("Failed to read bookmark store: {}", e);
            Vec::new()
        });

        self.draft = db.load_draft().unwrap_or_else(|e| {
            eprintln!("Failed to read draft store: {}", e);
            IdeaDraft::default()
        });

        self.loaded = true;
        self.snapshot()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            ideas: self.ideas.clone(),
            bookmarks: self.bookmarks.clone(),
            draft: self.draft.clone(),
            selected: self.selected.clone(),
        }
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn bookmarks(&self) -> &[String] {
        &self.bookmarks
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.id == id)
    }

    /// Create a new idea. Declines (returns `None`) when title or description
    /// is empty after trimming. The new record is prepended and selected, and
    /// the saved draft is cleared.
    pub fn add_idea(
        &mut self,
        db: &Database,
        title: &str,
        description: &str,
        category: IdeaCategory,
        author: &str,
    ) -> Option<Idea> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return None;
        }

        let author = author.trim();
        let idea = Idea {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category,
            likes: 0,
            dislikes: 0,
            created_at: Utc::now(),
            author: if author.is_empty() {
                DEFAULT_AUTHOR.to_string()
            } else {
                author.to_string()
            },
            admin_response: None,
        };

        self.ideas.insert(0, idea.clone());
        self.selected = Some(idea.id.clone());
        self.persist_ideas(db);

        self.draft = IdeaDraft::default();
        if self.loaded {
            if let Err(e) = db.clear_draft() {
                eprintln!("Failed to clear draft: {}", e);
            }
        }

        Some(idea)
    }

    /// Increment the like counter by one. No-op on unknown id.
    pub fn like(&mut self, db: &Database, id: &str) -> Option<Idea> {
        let idea = self.ideas.iter_mut().find(|i| i.id == id)?;
        idea.likes += 1;
        let updated = idea.clone();
        self.persist_ideas(db);
        Some(updated)
    }

    /// Increment the dislike counter by one. No-op on unknown id.
    pub fn dislike(&mut self, db: &Database, id: &str) -> Option<Idea> {
        let idea = self.ideas.iter_mut().find(|i| i.id == id)?;
        idea.dislikes += 1;
        let updated = idea.clone();
        self.persist_ideas(db);
        Some(updated)
    }

    /// Remove a record. Clears the selection and any bookmark that pointed at
    /// the removed idea. Returns whether anything was deleted.
    pub fn delete_idea(&mut self, db: &Database, id: &str) -> bool {
        let before = self.ideas.len();
        self.ideas.retain(|i| i.id != id);
        if self.ideas.len() == before {
            return false;
        }

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if let Some(pos) = self.bookmarks.iter().position(|b| b == id) {
            self.bookmarks.remove(pos);
            if self.loaded {
                if let Err(e) = db.save_bookmarks(&self.bookmarks) {
                    eprintln!("Failed to persist bookmarks: {}", e);
                }
            }
        }
        self.persist_ideas(db);
        true
    }

    /// Set or overwrite the admin response. Declines on empty text.
    pub fn set_admin_response(&mut self, db: &Database, id: &str, text: &str) -> Option<Idea> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let idea = self.ideas.iter_mut().find(|i| i.id == id)?;
        idea.admin_response = Some(text.to_string());
        let updated = idea.clone();
        self.persist_ideas(db);
        Some(updated)
    }

    /// Add the id to the bookmark list if absent, remove it if present.
    /// Returns whether the idea is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self, db: &Database, id: &str) -> bool {
        let bookmarked = if let Some(pos) = self.bookmarks.iter().position(|b| b == id) {
            self.bookmarks.remove(pos);
            false
        } else {
            self.bookmarks.push(id.to_string());
            true
        };

        if self.loaded {
            if let Err(e) = db.save_bookmarks(&self.bookmarks) {
                eprintln!("Failed to persist bookmarks: {}", e);
            }
        }
        bookmarked
    }

    pub fn select(&mut self, id: Option<String>) {
        self.selected = match id {
            Some(id) if self.get(&id).is_some() => Some(id),
            _ => None,
        };
    }

    /// Update the in-memory draft. Durable persistence is debounced through
    /// `DraftBuffer`, not done here.
    pub fn set_draft(&mut self, draft: IdeaDraft) {
        self.draft = draft;
    }

    pub fn draft(&self) -> &IdeaDraft {
        &self.draft
    }

    /// Derive a filtered, sorted view of the collection. Pure with respect to
    /// the underlying data: repeated calls with the same inputs on an
    /// unchanged board yield the same result.
    pub fn query_view(&self, query: &ViewQuery) -> Vec<Idea> {
        let term = query.search.trim().to_lowercase();

        let mut view: Vec<Idea> = self
            .ideas
            .iter()
            .filter(|i| {
                term.is_empty()
                    || i.title.to_lowercase().contains(&term)
                    || i.description.to_lowercase().contains(&term)
                    || i.category.as_str().to_lowercase().contains(&term)
            })
            .filter(|i| !query.bookmarked_only || self.bookmarks.iter().any(|b| *b == i.id))
            .cloned()
            .collect();

        // Stable sorts so equal keys keep the store's newest-first order
        match query.sort {
            SortMode::Newest => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortMode::Likes => view.sort_by(|a, b| b.likes.cmp(&a.likes)),
        }

        view
    }

    /// Best-effort write of the full collection. Suppressed until
    /// `initialize` has completed; failures are logged, never surfaced.
    fn persist_ideas(&self, db: &Database) {
        if !self.loaded {
            return;
        }
        if let Err(e) = db.save_ideas(&self.ideas) {
            eprintln!("Failed to persist ideas: {}", e);
        }
    }
}

impl Default for IdeaBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_board() -> (IdeaBoard, Database) {
        let db = Database::open_in_memory().unwrap();
        let mut board = IdeaBoard::new();
        board.initialize(&db);
        (board, db)
    }

    fn empty_board() -> (IdeaBoard, Database) {
        let (mut board, db) = loaded_board();
        for id in board
            .ideas()
            .iter()
            .map(|i| i.id.clone())
            .collect::<Vec<_>>()
        {
            board.delete_idea(&db, &id);
        }
        (board, db)
    }

    #[test]
    fn test_initialize_seeds_and_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let mut board = IdeaBoard::new();

        let snap = board.initialize(&db);
        assert_eq!(snap.ideas.len(), 3);

        // Second call does not duplicate or reset
        board.like(&db, &snap.ideas[0].id.clone());
        let again = board.initialize(&db);
        assert_eq!(again.ideas.len(), 3);
        assert_eq!(again.ideas[0].likes, snap.ideas[0].likes + 1);
    }

    #[test]
    fn test_initialize_prefers_persisted_collection() {
        let db = Database::open_in_memory().unwrap();
        let mut first = IdeaBoard::new();
        first.initialize(&db);
        first.add_idea(&db, "Persisted", "Survives restart", IdeaCategory::Art, "");

        let mut second = IdeaBoard::new();
        let snap = second.initialize(&db);
        assert_eq!(snap.ideas.len(), 4);
        assert_eq!(snap.ideas[0].title, "Persisted");
    }

    #[test]
    fn test_add_idea_defaults_and_prepends() {
        let (mut board, db) = empty_board();

        let idea = board
            .add_idea(
                &db,
                "Smart Bench",
                "Solar bench with WiFi",
                IdeaCategory::Technology,
                "",
            )
            .unwrap();

        assert_eq!(idea.author, DEFAULT_AUTHOR);
        assert_eq!(idea.likes, 0);
        assert_eq!(idea.dislikes, 0);
        assert_eq!(board.ideas()[0].id, idea.id);
        assert_eq!(board.selected_id(), Some(idea.id.as_str()));

        // Unique id, record present exactly once
        let matches = board.ideas().iter().filter(|i| i.id == idea.id).count();
        assert_eq!(matches, 1);
    }

    #[test]
    fn test_add_idea_declines_blank_fields() {
        let (mut board, db) = loaded_board();
        let before = board.ideas().len();

        assert!(board
            .add_idea(&db, "   ", "desc", IdeaCategory::Health, "x")
            .is_none());
        assert!(board
            .add_idea(&db, "title", "\t\n", IdeaCategory::Health, "x")
            .is_none());
        assert_eq!(board.ideas().len(), before);
    }

    #[test]
    fn test_like_increments_only_target() {
        let (mut board, db) = loaded_board();
        let id = board.ideas()[1].id.clone();
        let before = board.get(&id).unwrap().clone();

        let updated = board.like(&db, &id).unwrap();
        assert_eq!(updated.likes, before.likes + 1);
        assert_eq!(updated.dislikes, before.dislikes);
        assert_eq!(updated.title, before.title);
        assert_eq!(updated.created_at, before.created_at);

        // Unknown id is a no-op
        assert!(board.like(&db, "no-such-id").is_none());
    }

    #[test]
    fn test_delete_clears_selection_only_for_target() {
        let (mut board, db) = loaded_board();
        let first = board.ideas()[0].id.clone();
        let second = board.ideas()[1].id.clone();

        board.select(Some(first.clone()));
        assert!(board.delete_idea(&db, &second));
        assert_eq!(board.selected_id(), Some(first.as_str()));

        assert!(board.delete_idea(&db, &first));
        assert_eq!(board.selected_id(), None);

        assert!(!board.delete_idea(&db, "no-such-id"));
    }

    #[test]
    fn test_delete_drops_bookmark_for_removed_idea() {
        let (mut board, db) = loaded_board();
        let kept = board.ideas()[0].id.clone();
        let removed = board.ideas()[1].id.clone();
        board.toggle_bookmark(&db, &kept);
        board.toggle_bookmark(&db, &removed);

        assert!(board.delete_idea(&db, &removed));
        assert_eq!(board.bookmarks(), &[kept.clone()]);
        // The persisted list must not keep the dangling id
        assert_eq!(db.load_bookmarks().unwrap(), vec![kept]);
    }

    #[test]
    fn test_set_admin_response() {
        let (mut board, db) = loaded_board();
        let id = board.ideas()[0].id.clone();

        assert!(board.set_admin_response(&db, &id, "  ").is_none());
        let updated = board.set_admin_response(&db, &id, "Great idea!").unwrap();
        assert_eq!(updated.admin_response.as_deref(), Some("Great idea!"));

        // Overwrite is allowed
        let updated = board.set_admin_response(&db, &id, "Revised").unwrap();
        assert_eq!(updated.admin_response.as_deref(), Some("Revised"));
    }

    #[test]
    fn test_toggle_bookmark_is_symmetric() {
        let (mut board, db) = loaded_board();
        let id = board.ideas()[0].id.clone();

        assert!(board.toggle_bookmark(&db, &id));
        assert_eq!(board.bookmarks(), &[id.clone()]);
        assert!(!board.toggle_bookmark(&db, &id));
        assert!(board.bookmarks().is_empty());
    }

    #[test]
    fn test_query_view_filters_all_three_fields() {
        let (mut board, db) = empty_board();
        board.add_idea(&db, "Solar Roof", "Panels on schools", IdeaCategory::Education, "a");
        board.add_idea(&db, "Mural Wall", "Community painting", IdeaCategory::Art, "b");

        let q = |search: &str| ViewQuery {
            search: search.to_string(),
            ..Default::default()
        };

        // title match
        assert_eq!(board.query_view(&q("solar")).len(), 1);
        // description match
        assert_eq!(board.query_view(&q("painting")).len(), 1);
        // category name match
        assert_eq!(board.query_view(&q("education")).len(), 1);
        // no match
        assert!(board.query_view(&q("blockchain")).is_empty());
    }

    #[test]
    fn test_query_view_is_pure() {
        let (board, _db) = loaded_board();
        let query = ViewQuery {
            search: "a".to_string(),
            sort: SortMode::Likes,
            bookmarked_only: false,
        };

        let ids_before: Vec<_> = board.ideas().iter().map(|i| i.id.clone()).collect();
        let first = board.query_view(&query);
        let second = board.query_view(&query);

        assert_eq!(
            first.iter().map(|i| &i.id).collect::<Vec<_>>(),
            second.iter().map(|i| &i.id).collect::<Vec<_>>()
        );
        let ids_after: Vec<_> = board.ideas().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids_before, ids_after);
    }

    #[test]
    fn test_query_view_sorting() {
        let (mut board, db) = empty_board();
        let a = board
            .add_idea(&db, "First", "d", IdeaCategory::Technology, "x")
            .unwrap();
        let b = board
            .add_idea(&db, "Second", "d", IdeaCategory::Technology, "x")
            .unwrap();
        let c = board
            .add_idea(&db, "Third", "d", IdeaCategory::Technology, "x")
            .unwrap();

        for _ in 0..5 {
            board.like(&db, &a.id);
        }
        board.like(&db, &b.id);
        for _ in 0..9 {
            board.like(&db, &c.id);
        }

        let newest = board.query_view(&ViewQuery {
            sort: SortMode::Newest,
            ..Default::default()
        });
        let titles: Vec<_> = newest.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Third", "Second", "First"]);

        let liked = board.query_view(&ViewQuery {
            sort: SortMode::Likes,
            ..Default::default()
        });
        let likes: Vec<_> = liked.iter().map(|i| i.likes).collect();
        assert_eq!(likes, [9, 5, 1]);
    }

    #[test]
    fn test_query_view_stable_on_equal_keys() {
        let (mut board, db) = empty_board();
        for title in ["A", "B", "C"] {
            board.add_idea(&db, title, "d", IdeaCategory::Community, "x");
        }

        // All have zero likes; stable sort keeps newest-first store order
        let view = board.query_view(&ViewQuery {
            sort: SortMode::Likes,
            ..Default::default()
        });
        let titles: Vec<_> = view.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[test]
    fn test_query_view_bookmark_filter() {
        let (mut board, db) = loaded_board();
        let id = board.ideas()[1].id.clone();
        board.toggle_bookmark(&db, &id);

        let view = board.query_view(&ViewQuery {
            bookmarked_only: true,
            ..Default::default()
        });
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, id);
    }
}
