//! SQLite storage for decks, flashcards and study sessions
//!
//! Every query is filtered by the owning user. Flashcards have no owner column; they
//! are reached through a join on `decks.user_id`. Writes run in an IMMEDIATE
//! transaction so the ownership filter and the mutation happen under one lock.
//!
//! Schema:
//! ```text
//! decks           (id, title, description, user_id, card_count, created_at, updated_at)
//! flashcards      (id, deck_id -> decks ON DELETE CASCADE, front, back, created_at, updated_at)
//! study_sessions  (id, deck_id -> decks ON DELETE CASCADE, user_id, score, total_cards, completed_at)
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use thiserror::Error;
use uuid::Uuid;

use super::models::*;
use super::validation::{validate_card, validate_deck, validate_session, ValidationError};
use crate::identity::UserId;

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Deck not found or access denied: {0}")]
    DeckNotFound(Uuid),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

const DECK_COLUMNS: &str = "id, title, description, user_id, card_count, created_at, updated_at";
const CARD_COLUMNS: &str = "f.id, f.deck_id, f.front, f.back, f.created_at, f.updated_at";
const SESSION_COLUMNS: &str = "s.id, s.deck_id, s.user_id, s.score, s.total_cards, s.completed_at";

/// Ownership-scoped gateway over the flashcard database
pub struct FlashcardStorage {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl FlashcardStorage {
    /// Open (or create) the database at the given path.
    pub fn open(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        Self::init(&conn)?;
        log::info!("Flashcard database opened at {:?}", db_path);

        Ok(Self {
            conn,
            db_path: Some(db_path),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Self { conn, db_path: None })
    }

    fn init(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS decks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                user_id TEXT NOT NULL,
                card_count INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS flashcards (
                id TEXT PRIMARY KEY,
                deck_id TEXT NOT NULL REFERENCES decks(id) ON DELETE CASCADE,
                front TEXT NOT NULL,
                back TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS study_sessions (
                id TEXT PRIMARY KEY,
                deck_id TEXT NOT NULL REFERENCES decks(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL,
                score INTEGER NOT NULL,
                total_cards INTEGER NOT NULL,
                completed_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_decks_user_id ON decks(user_id);
            CREATE INDEX IF NOT EXISTS idx_flashcards_deck_id ON flashcards(deck_id);
            CREATE INDEX IF NOT EXISTS idx_study_sessions_deck_id ON study_sessions(deck_id);
            "#,
        )?;
        Ok(())
    }

    /// Get the database path (`None` for in-memory databases).
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    // ==================== Deck Operations ====================

    /// List the decks owned by `user`. No identity means no data, not an error.
    pub fn list_decks(&self, user: Option<&UserId>) -> Result<Vec<Deck>> {
        let Some(user) = user else {
            return Ok(Vec::new());
        };

        let sql = format!(
            "SELECT {} FROM decks WHERE user_id = ?1 ORDER BY created_at, rowid",
            DECK_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let decks = stmt
            .query_map(params![user.as_str()], deck_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(decks)
    }

    /// Get a deck owned by `user`. Missing and foreign decks are both `None`.
    pub fn get_deck(&self, user: Option<&UserId>, deck_id: Uuid) -> Result<Option<Deck>> {
        let Some(user) = user else {
            return Ok(None);
        };
        Ok(find_deck(&self.conn, user, deck_id)?)
    }

    /// Create a new deck with no cards
    pub fn create_deck(
        &mut self,
        user: Option<&UserId>,
        title: &str,
        description: Option<&str>,
    ) -> Result<Deck> {
        let user = require_user(user)?;
        let fields = validate_deck(title, description)?;

        let deck = Deck::new(user.clone(), fields.title, fields.description);
        self.conn.execute(
            "INSERT INTO decks (id, title, description, user_id, card_count, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                deck.id.to_string(),
                deck.title,
                deck.description,
                deck.user_id.as_str(),
                deck.card_count as i64,
                timestamp(&deck.created_at),
                timestamp(&deck.updated_at),
            ],
        )?;

        log::debug!("Created deck {} for {}", deck.id, user);
        Ok(deck)
    }

    /// Update a deck's title and description. `None` when no owned deck matched.
    pub fn update_deck(
        &mut self,
        user: Option<&UserId>,
        deck_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<Option<Deck>> {
        let user = require_user(user)?;
        let fields = validate_deck(title, description)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE decks SET title = ?1, description = ?2, updated_at = ?3 WHERE id = ?4 AND user_id = ?5",
            params![
                fields.title,
                fields.description,
                timestamp(&now()),
                deck_id.to_string(),
                user.as_str(),
            ],
        )?;
        let deck = if changed == 0 {
            None
        } else {
            find_deck(&tx, user, deck_id)?
        };
        tx.commit()?;

        Ok(deck)
    }

    /// Delete a deck and, through the foreign key cascade, all of its cards and sessions.
    pub fn delete_deck(&mut self, user: Option<&UserId>, deck_id: Uuid) -> Result<bool> {
        let user = require_user(user)?;
        let removed = self.conn.execute(
            "DELETE FROM decks WHERE id = ?1 AND user_id = ?2",
            params![deck_id.to_string(), user.as_str()],
        )?;
        Ok(removed > 0)
    }

    /// Recount an owned deck's cards from the live collection.
    pub fn recount_deck(&mut self, user: Option<&UserId>, deck_id: Uuid) -> Result<Option<usize>> {
        let user = require_user(user)?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if find_deck(&tx, user, deck_id)?.is_none() {
            return Ok(None);
        }
        let count = recount(&tx, deck_id)?;
        tx.commit()?;
        Ok(Some(count))
    }

    // ==================== Card Operations ====================

    /// List the cards of an owned deck; empty when the deck is missing or foreign.
    pub fn list_flashcards(&self, user: Option<&UserId>, deck_id: Uuid) -> Result<Vec<Flashcard>> {
        if self.get_deck(user, deck_id)?.is_none() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM flashcards f WHERE f.deck_id = ?1 ORDER BY f.created_at, f.rowid",
            CARD_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let cards = stmt
            .query_map(params![deck_id.to_string()], card_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    /// Get a card that lives in a deck owned by `user`
    pub fn get_flashcard(&self, user: Option<&UserId>, card_id: Uuid) -> Result<Option<Flashcard>> {
        let Some(user) = user else {
            return Ok(None);
        };
        Ok(find_card(&self.conn, user, card_id)?)
    }

    /// Create a card in an owned deck and recount the deck
    pub fn create_flashcard(
        &mut self,
        user: Option<&UserId>,
        deck_id: Uuid,
        front: &str,
        back: &str,
    ) -> Result<Flashcard> {
        let user = require_user(user)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if find_deck(&tx, user, deck_id)?.is_none() {
            return Err(FlashcardStorageError::DeckNotFound(deck_id));
        }
        let fields = validate_card(front, back)?;

        let card = Flashcard::new(deck_id, fields.front, fields.back);
        tx.execute(
            "INSERT INTO flashcards (id, deck_id, front, back, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                card.id.to_string(),
                card.deck_id.to_string(),
                card.front,
                card.back,
                timestamp(&card.created_at),
                timestamp(&card.updated_at),
            ],
        )?;
        let count = recount(&tx, deck_id)?;
        tx.commit()?;

        log::debug!("Created card {} in deck {} ({} cards)", card.id, deck_id, count);
        Ok(card)
    }

    /// Update a card in place. `None` when no card in an owned deck matched.
    pub fn update_flashcard(
        &mut self,
        user: Option<&UserId>,
        card_id: Uuid,
        front: &str,
        back: &str,
    ) -> Result<Option<Flashcard>> {
        let user = require_user(user)?;
        let fields = validate_card(front, back)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE flashcards SET front = ?1, back = ?2, updated_at = ?3
             WHERE id = ?4 AND deck_id IN (SELECT id FROM decks WHERE user_id = ?5)",
            params![
                fields.front,
                fields.back,
                timestamp(&now()),
                card_id.to_string(),
                user.as_str(),
            ],
        )?;
        let card = if changed == 0 {
            None
        } else {
            find_card(&tx, user, card_id)?
        };
        tx.commit()?;

        Ok(card)
    }

    /// Delete a card and recount its deck in the same transaction.
    ///
    /// Returns the removed card (its `deck_id` scopes cache invalidation), or `None`
    /// when nothing owned matched.
    pub fn delete_flashcard(&mut self, user: Option<&UserId>, card_id: Uuid) -> Result<Option<Flashcard>> {
        let user = require_user(user)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let Some(card) = find_card(&tx, user, card_id)? else {
            return Ok(None);
        };
        let removed = tx.execute(
            "DELETE FROM flashcards WHERE id = ?1 AND deck_id IN (SELECT id FROM decks WHERE user_id = ?2)",
            params![card_id.to_string(), user.as_str()],
        )?;
        if removed == 0 {
            return Ok(None);
        }
        recount(&tx, card.deck_id)?;
        tx.commit()?;

        Ok(Some(card))
    }

    // ==================== Study Sessions ====================

    /// Record a finished study pass through an owned deck
    pub fn record_study_session(
        &mut self,
        user: Option<&UserId>,
        deck_id: Uuid,
        score: i64,
        total_cards: i64,
    ) -> Result<StudySession> {
        let user = require_user(user)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if find_deck(&tx, user, deck_id)?.is_none() {
            return Err(FlashcardStorageError::DeckNotFound(deck_id));
        }
        let (score, total_cards) = validate_session(score, total_cards)?;

        let session = StudySession::new(deck_id, user.clone(), score, total_cards);
        tx.execute(
            "INSERT INTO study_sessions (id, deck_id, user_id, score, total_cards, completed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.id.to_string(),
                session.deck_id.to_string(),
                session.user_id.as_str(),
                session.score,
                session.total_cards,
                timestamp(&session.completed_at),
            ],
        )?;
        tx.commit()?;

        Ok(session)
    }

    /// List sessions of an owned deck, newest first
    pub fn list_study_sessions(&self, user: Option<&UserId>, deck_id: Uuid) -> Result<Vec<StudySession>> {
        let Some(user) = user else {
            return Ok(Vec::new());
        };

        let sql = format!(
            "SELECT {} FROM study_sessions s
             JOIN decks d ON d.id = s.deck_id
             WHERE s.deck_id = ?1 AND d.user_id = ?2
             ORDER BY s.completed_at DESC, s.rowid DESC",
            SESSION_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let sessions = stmt
            .query_map(params![deck_id.to_string(), user.as_str()], session_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sessions)
    }
}

fn require_user(user: Option<&UserId>) -> Result<&UserId> {
    user.ok_or(FlashcardStorageError::Unauthenticated)
}

fn find_deck(conn: &Connection, user: &UserId, deck_id: Uuid) -> rusqlite::Result<Option<Deck>> {
    let sql = format!(
        "SELECT {} FROM decks WHERE id = ?1 AND user_id = ?2",
        DECK_COLUMNS
    );
    conn.query_row(&sql, params![deck_id.to_string(), user.as_str()], deck_from_row)
        .optional()
}

fn find_card(conn: &Connection, user: &UserId, card_id: Uuid) -> rusqlite::Result<Option<Flashcard>> {
    let sql = format!(
        "SELECT {} FROM flashcards f JOIN decks d ON d.id = f.deck_id WHERE f.id = ?1 AND d.user_id = ?2",
        CARD_COLUMNS
    );
    conn.query_row(&sql, params![card_id.to_string(), user.as_str()], card_from_row)
        .optional()
}

/// Full recount from the live rows, so the stored count recovers from any drift.
fn recount(conn: &Connection, deck_id: Uuid) -> rusqlite::Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM flashcards WHERE deck_id = ?1",
        params![deck_id.to_string()],
        |row| row.get(0),
    )?;
    conn.execute(
        "UPDATE decks SET card_count = ?1, updated_at = ?2 WHERE id = ?3",
        params![count, timestamp(&now()), deck_id.to_string()],
    )?;
    Ok(count as usize)
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn uuid_column(row: &Row, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn deck_from_row(row: &Row) -> rusqlite::Result<Deck> {
    Ok(Deck {
        id: uuid_column(row, 0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        user_id: UserId::from_stored(row.get(3)?),
        card_count: row.get::<_, i64>(4)?.max(0) as usize,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

fn card_from_row(row: &Row) -> rusqlite::Result<Flashcard> {
    Ok(Flashcard {
        id: uuid_column(row, 0)?,
        deck_id: uuid_column(row, 1)?,
        front: row.get(2)?,
        back: row.get(3)?,
        created_at: timestamp_column(row, 4)?,
        updated_at: timestamp_column(row, 5)?,
    })
}

fn session_from_row(row: &Row) -> rusqlite::Result<StudySession> {
    Ok(StudySession {
        id: uuid_column(row, 0)?,
        deck_id: uuid_column(row, 1)?,
        user_id: UserId::from_stored(row.get(2)?),
        score: row.get(3)?,
        total_cards: row.get(4)?,
        completed_at: timestamp_column(row, 5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> FlashcardStorage {
        FlashcardStorage::open_in_memory().unwrap()
    }

    fn alice() -> UserId {
        UserId::parse("user_alice").unwrap()
    }

    fn bob() -> UserId {
        UserId::parse("user_bob").unwrap()
    }

    fn live_card_rows(storage: &FlashcardStorage, deck_id: Uuid) -> usize {
        storage
            .conn
            .query_row(
                "SELECT COUNT(*) FROM flashcards WHERE deck_id = ?1",
                params![deck_id.to_string()],
                |row| row.get::<_, i64>(0),
            )
            .unwrap() as usize
    }

    #[test]
    fn test_create_deck_defaults() {
        let mut storage = create_test_storage();
        let deck = storage.create_deck(Some(&alice()), "Spanish", None).unwrap();

        assert_eq!(deck.title, "Spanish");
        assert_eq!(deck.description, None);
        assert_eq!(deck.card_count, 0);
        assert_eq!(deck.user_id, alice());

        let fetched = storage.get_deck(Some(&alice()), deck.id).unwrap().unwrap();
        assert_eq!(fetched, deck);
    }

    #[test]
    fn test_create_deck_requires_identity() {
        let mut storage = create_test_storage();
        let result = storage.create_deck(None, "Spanish", None);
        assert!(matches!(result, Err(FlashcardStorageError::Unauthenticated)));
    }

    #[test]
    fn test_create_deck_validation() {
        let mut storage = create_test_storage();
        let user = alice();

        let empty = storage.create_deck(Some(&user), "", Some("desc"));
        assert!(matches!(empty, Err(FlashcardStorageError::Validation(_))));

        let long = storage.create_deck(Some(&user), &"A".repeat(256), Some("desc"));
        assert!(matches!(long, Err(FlashcardStorageError::Validation(_))));

        assert!(storage.list_decks(Some(&user)).unwrap().is_empty());
    }

    #[test]
    fn test_list_decks_scoped_to_owner() {
        let mut storage = create_test_storage();
        storage.create_deck(Some(&alice()), "French", None).unwrap();
        storage.create_deck(Some(&alice()), "German", Some("Verbs")).unwrap();
        storage.create_deck(Some(&bob()), "History", None).unwrap();

        let titles: Vec<String> = storage
            .list_decks(Some(&alice()))
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["French", "German"]);

        assert_eq!(storage.list_decks(Some(&bob())).unwrap().len(), 1);
        assert!(storage.list_decks(None).unwrap().is_empty());
    }

    #[test]
    fn test_foreign_deck_behaves_like_missing_deck() {
        let mut storage = create_test_storage();
        let deck = storage.create_deck(Some(&alice()), "Private", None).unwrap();
        let missing = Uuid::new_v4();

        assert_eq!(
            storage.get_deck(Some(&bob()), deck.id).unwrap(),
            storage.get_deck(Some(&bob()), missing).unwrap()
        );
        assert_eq!(
            storage.update_deck(Some(&bob()), deck.id, "Stolen", None).unwrap(),
            storage.update_deck(Some(&bob()), missing, "Stolen", None).unwrap()
        );
        assert_eq!(
            storage.delete_deck(Some(&bob()), deck.id).unwrap(),
            storage.delete_deck(Some(&bob()), missing).unwrap()
        );

        // Alice's deck is untouched
        let still_there = storage.get_deck(Some(&alice()), deck.id).unwrap().unwrap();
        assert_eq!(still_there.title, "Private");
    }

    #[test]
    fn test_update_deck_is_idempotent() {
        let mut storage = create_test_storage();
        let user = alice();
        let deck = storage.create_deck(Some(&user), "Spanish", None).unwrap();

        let first = storage
            .update_deck(Some(&user), deck.id, "Spanish Verbs", Some("Irregulars"))
            .unwrap()
            .unwrap();
        let second = storage
            .update_deck(Some(&user), deck.id, "Spanish Verbs", Some("Irregulars"))
            .unwrap()
            .unwrap();

        assert_eq!(first.title, second.title);
        assert_eq!(first.description, second.description);
        assert_eq!(first.card_count, second.card_count);
        assert_eq!(first.created_at, deck.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(storage.list_decks(Some(&user)).unwrap().len(), 1);
    }

    #[test]
    fn test_update_and_delete_require_identity() {
        let mut storage = create_test_storage();
        let deck = storage.create_deck(Some(&alice()), "Spanish", None).unwrap();

        assert!(matches!(
            storage.update_deck(None, deck.id, "X", None),
            Err(FlashcardStorageError::Unauthenticated)
        ));
        assert!(matches!(
            storage.delete_deck(None, deck.id),
            Err(FlashcardStorageError::Unauthenticated)
        ));
    }

    #[test]
    fn test_card_count_tracks_creates_and_deletes() {
        let mut storage = create_test_storage();
        let user = alice();
        let deck = storage.create_deck(Some(&user), "Spanish", None).unwrap();

        let mut cards = Vec::new();
        for (front, back) in [("hola", "hello"), ("adiós", "goodbye"), ("gracias", "thank you")] {
            cards.push(storage.create_flashcard(Some(&user), deck.id, front, back).unwrap());
            let current = storage.get_deck(Some(&user), deck.id).unwrap().unwrap();
            assert_eq!(current.card_count, live_card_rows(&storage, deck.id));
        }

        let removed = storage.delete_flashcard(Some(&user), cards[1].id).unwrap().unwrap();
        assert_eq!(removed.deck_id, deck.id);

        let current = storage.get_deck(Some(&user), deck.id).unwrap().unwrap();
        assert_eq!(current.card_count, 2);
        assert_eq!(current.card_count, live_card_rows(&storage, deck.id));
        assert_eq!(storage.list_flashcards(Some(&user), deck.id).unwrap().len(), 2);
    }

    #[test]
    fn test_recount_recovers_from_drift() {
        let mut storage = create_test_storage();
        let user = alice();
        let deck = storage.create_deck(Some(&user), "Spanish", None).unwrap();
        storage
            .conn
            .execute(
                "UPDATE decks SET card_count = 99 WHERE id = ?1",
                params![deck.id.to_string()],
            )
            .unwrap();

        storage.create_flashcard(Some(&user), deck.id, "uno", "one").unwrap();
        let current = storage.get_deck(Some(&user), deck.id).unwrap().unwrap();
        assert_eq!(current.card_count, 1);

        storage
            .conn
            .execute(
                "UPDATE decks SET card_count = 7 WHERE id = ?1",
                params![deck.id.to_string()],
            )
            .unwrap();
        assert_eq!(storage.recount_deck(Some(&user), deck.id).unwrap(), Some(1));
        assert_eq!(storage.recount_deck(Some(&bob()), deck.id).unwrap(), None);
    }

    #[test]
    fn test_create_flashcard_in_foreign_deck() {
        let mut storage = create_test_storage();
        let deck = storage.create_deck(Some(&alice()), "Spanish", None).unwrap();

        let result = storage.create_flashcard(Some(&bob()), deck.id, "hola", "hello");
        assert!(matches!(result, Err(FlashcardStorageError::DeckNotFound(id)) if id == deck.id));

        let result = storage.create_flashcard(None, deck.id, "hola", "hello");
        assert!(matches!(result, Err(FlashcardStorageError::Unauthenticated)));

        // Ownership is checked before the card fields
        let result = storage.create_flashcard(Some(&bob()), deck.id, "", "");
        assert!(matches!(result, Err(FlashcardStorageError::DeckNotFound(_))));

        assert_eq!(live_card_rows(&storage, deck.id), 0);
    }

    #[test]
    fn test_create_flashcard_validation_writes_nothing() {
        let mut storage = create_test_storage();
        let user = alice();
        let deck = storage.create_deck(Some(&user), "Spanish", None).unwrap();

        let result = storage.create_flashcard(Some(&user), deck.id, "", "hello");
        assert!(matches!(result, Err(FlashcardStorageError::Validation(_))));
        let result = storage.create_flashcard(Some(&user), deck.id, "hola", &"x".repeat(1001));
        assert!(matches!(result, Err(FlashcardStorageError::Validation(_))));

        assert_eq!(live_card_rows(&storage, deck.id), 0);
    }

    #[test]
    fn test_update_flashcard_scoped_through_deck() {
        let mut storage = create_test_storage();
        let user = alice();
        let deck = storage.create_deck(Some(&user), "Spanish", None).unwrap();
        let card = storage.create_flashcard(Some(&user), deck.id, "hola", "hi").unwrap();

        assert!(storage
            .update_flashcard(Some(&bob()), card.id, "hacked", "hacked")
            .unwrap()
            .is_none());
        assert!(storage.get_flashcard(Some(&bob()), card.id).unwrap().is_none());

        let updated = storage
            .update_flashcard(Some(&user), card.id, "hola", "hello")
            .unwrap()
            .unwrap();
        assert_eq!(updated.back, "hello");
        assert_eq!(updated.deck_id, deck.id);
        assert_eq!(updated.created_at, card.created_at);

        assert!(storage.delete_flashcard(Some(&bob()), card.id).unwrap().is_none());
        assert!(storage.get_flashcard(Some(&user), card.id).unwrap().is_some());
    }

    #[test]
    fn test_list_flashcards_of_foreign_deck_is_empty() {
        let mut storage = create_test_storage();
        let deck = storage.create_deck(Some(&alice()), "Spanish", None).unwrap();
        storage.create_flashcard(Some(&alice()), deck.id, "hola", "hello").unwrap();

        assert!(storage.list_flashcards(Some(&bob()), deck.id).unwrap().is_empty());
        assert!(storage.list_flashcards(None, deck.id).unwrap().is_empty());
        assert_eq!(storage.list_flashcards(Some(&alice()), deck.id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_deck_cascades() {
        let mut storage = create_test_storage();
        let user = alice();
        let deck = storage.create_deck(Some(&user), "Spanish", None).unwrap();
        let card = storage.create_flashcard(Some(&user), deck.id, "hola", "hello").unwrap();
        storage.record_study_session(Some(&user), deck.id, 1, 1).unwrap();

        assert!(storage.delete_deck(Some(&user), deck.id).unwrap());
        assert!(!storage.delete_deck(Some(&user), deck.id).unwrap());

        assert!(storage.get_flashcard(Some(&user), card.id).unwrap().is_none());
        assert_eq!(live_card_rows(&storage, deck.id), 0);
        let sessions: i64 = storage
            .conn
            .query_row("SELECT COUNT(*) FROM study_sessions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(sessions, 0);
    }

    #[test]
    fn test_study_sessions() {
        let mut storage = create_test_storage();
        let user = alice();
        let deck = storage.create_deck(Some(&user), "Spanish", None).unwrap();

        let first = storage.record_study_session(Some(&user), deck.id, 3, 5).unwrap();
        let second = storage.record_study_session(Some(&user), deck.id, 5, 5).unwrap();

        let sessions = storage.list_study_sessions(Some(&user), deck.id).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, second.id);
        assert_eq!(sessions[1].id, first.id);

        assert!(storage.list_study_sessions(Some(&bob()), deck.id).unwrap().is_empty());
        assert!(matches!(
            storage.record_study_session(Some(&bob()), deck.id, 1, 1),
            Err(FlashcardStorageError::DeckNotFound(_))
        ));
        assert!(matches!(
            storage.record_study_session(Some(&user), deck.id, 6, 5),
            Err(FlashcardStorageError::Validation(_))
        ));
    }

    #[test]
    fn test_open_on_disk_persists() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("flashdeck.db");
        let user = alice();

        let deck_id = {
            let mut storage = FlashcardStorage::open(db_path.clone()).unwrap();
            assert_eq!(storage.db_path(), Some(db_path.as_path()));
            let deck = storage.create_deck(Some(&user), "Spanish", None).unwrap();
            storage.create_flashcard(Some(&user), deck.id, "hola", "hello").unwrap();
            deck.id
        };

        let storage = FlashcardStorage::open(db_path).unwrap();
        let deck = storage.get_deck(Some(&user), deck_id).unwrap().unwrap();
        assert_eq!(deck.card_count, 1);
    }
}
