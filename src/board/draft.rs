use crate::board::types::IdeaDraft;
use crate::database::Database;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Delay between the last draft edit and its durable write.
const DEBOUNCE: Duration = Duration::from_millis(1000);

/// Coalesces the per-keystroke draft updates into at most one database write
/// per debounce window. Each `record` supersedes the pending timer; `flush`
/// writes immediately (form close must not lose the last edit).
pub struct DraftBuffer {
    pending: Mutex<Option<IdeaDraft>>,
    generation: AtomicU64,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Stage a draft and (re)start the debounce timer.
    pub fn record(self: &Arc<Self>, db: Arc<Database>, draft: IdeaDraft) {
        *self.lock_pending() = Some(draft);
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let buffer = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;
            // A later record or flush superseded this timer
            if buffer.generation.load(Ordering::SeqCst) != my_generation {
                return;
            }
            buffer.write_pending(&db);
        });
    }

    /// Write any staged draft right now, cancelling the pending timer.
    pub fn flush(&self, db: &Database) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.write_pending(db);
    }

    /// Drop whatever is staged without writing (successful submit already
    /// cleared the stored draft).
    pub fn discard(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.lock_pending() = None;
    }

    fn write_pending(&self, db: &Database) {
        let draft = self.lock_pending().take();
        let Some(draft) = draft else {
            return;
        };

        if let Err(e) = db.save_draft(&draft) {
            eprintln!("Failed to persist draft: {}", e);
        }
    }

    // Poisoning can at worst lose a draft; take the inner value
    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<IdeaDraft>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for DraftBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> IdeaDraft {
        IdeaDraft {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_rapid_edits_coalesce_into_last_write() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let buffer = Arc::new(DraftBuffer::new());

        buffer.record(Arc::clone(&db), draft("S"));
        buffer.record(Arc::clone(&db), draft("Sm"));
        buffer.record(Arc::clone(&db), draft("Smart Bench"));

        // Not yet written inside the window
        assert!(db.load_draft().unwrap().is_empty());

        tokio::time::sleep(DEBOUNCE + Duration::from_millis(200)).await;
        assert_eq!(
            db.load_draft().unwrap().title.as_deref(),
            Some("Smart Bench")
        );
    }

    #[tokio::test]
    async fn test_flush_writes_immediately() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let buffer = Arc::new(DraftBuffer::new());

        buffer.record(Arc::clone(&db), draft("closing"));
        buffer.flush(&db);
        assert_eq!(db.load_draft().unwrap().title.as_deref(), Some("closing"));

        // The superseded timer must not write again after the flush
        db.clear_draft().unwrap();
        tokio::time::sleep(DEBOUNCE + Duration::from_millis(200)).await;
        assert!(db.load_draft().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_discard_cancels_pending_write() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let buffer = Arc::new(DraftBuffer::new());

        buffer.record(Arc::clone(&db), draft("abandoned"));
        buffer.discard();

        tokio::time::sleep(DEBOUNCE + Duration::from_millis(200)).await;
        assert!(db.load_draft().unwrap().is_empty());
    }
}
