//! Catalog repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `anime` table.
//! - Translate between `anime` rows and `AnimeEntry` value objects.
//!
//! # Invariants
//! - Write paths call `AnimeRecord::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Update/delete of a missing id returns `NotFound` and changes nothing.
//! - Title search is a case-sensitive substring match.

use crate::db::Store;
use crate::model::anime::{AnimeEntry, AnimeId, AnimeRecord};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Row};

const ANIME_SELECT_SQL: &str = "SELECT id, title, genre, episodes FROM anime";

/// Repository interface for the anime catalog.
pub trait CatalogRepository {
    /// Inserts a new record and returns its assigned id.
    fn add(&self, record: &AnimeRecord) -> RepoResult<AnimeId>;
    /// Returns every record in insertion order.
    fn list_all(&self) -> RepoResult<Vec<AnimeEntry>>;
    /// Returns one record by id.
    fn get(&self, id: AnimeId) -> RepoResult<Option<AnimeEntry>>;
    /// Returns records whose title contains `keyword`.
    fn search(&self, keyword: &str) -> RepoResult<Vec<AnimeEntry>>;
    /// Overwrites title, genre and episode count of the record with `id`.
    fn update(&self, id: AnimeId, record: &AnimeRecord) -> RepoResult<()>;
    /// Removes the record with `id`.
    fn delete(&self, id: AnimeId) -> RepoResult<()>;
    /// Number of stored records.
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed catalog repository.
pub struct SqliteCatalogRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteCatalogRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn add(&self, record: &AnimeRecord) -> RepoResult<AnimeId> {
        record.validate()?;

        self.store.execute(
            "INSERT INTO anime (title, genre, episodes) VALUES (?1, ?2, ?3);",
            params![
                record.title.as_str(),
                record.genre.as_str(),
                record.episode_count
            ],
        )?;

        Ok(self.store.last_insert_rowid())
    }

    fn list_all(&self) -> RepoResult<Vec<AnimeEntry>> {
        let rows = self.store.query(
            &format!("{ANIME_SELECT_SQL} ORDER BY id ASC;"),
            [],
            read_anime_row,
        )?;
        rows.into_iter().map(AnimeRow::into_entry).collect()
    }

    fn get(&self, id: AnimeId) -> RepoResult<Option<AnimeEntry>> {
        let rows = self.store.query(
            &format!("{ANIME_SELECT_SQL} WHERE id = ?1;"),
            [id],
            read_anime_row,
        )?;
        rows.into_iter().next().map(AnimeRow::into_entry).transpose()
    }

    fn search(&self, keyword: &str) -> RepoResult<Vec<AnimeEntry>> {
        // instr() is case-sensitive and needs no LIKE wildcard escaping.
        let rows = self.store.query(
            &format!("{ANIME_SELECT_SQL} WHERE instr(title, ?1) > 0 OR ?1 = '' ORDER BY id ASC;"),
            [keyword],
            read_anime_row,
        )?;
        rows.into_iter().map(AnimeRow::into_entry).collect()
    }

    fn update(&self, id: AnimeId, record: &AnimeRecord) -> RepoResult<()> {
        record.validate()?;

        let changed = self.store.execute(
            "UPDATE anime
             SET
                title = ?1,
                genre = ?2,
                episodes = ?3
             WHERE id = ?4;",
            params![
                record.title.as_str(),
                record.genre.as_str(),
                record.episode_count,
                id
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: AnimeId) -> RepoResult<()> {
        let changed = self
            .store
            .execute("DELETE FROM anime WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let counts = self
            .store
            .query("SELECT COUNT(*) FROM anime;", [], |row| row.get::<_, i64>(0))?;
        let total = counts.first().copied().unwrap_or(0);
        u64::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative anime row count `{total}`")))
    }
}

struct AnimeRow {
    id: AnimeId,
    title: String,
    genre: String,
    episodes: i64,
}

impl AnimeRow {
    fn into_entry(self) -> RepoResult<AnimeEntry> {
        let episode_count = u32::try_from(self.episodes).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid episode count `{}` in anime.episodes for id {}",
                self.episodes, self.id
            ))
        })?;

        let record = AnimeRecord {
            title: self.title,
            genre: self.genre,
            episode_count,
        };
        record.validate()?;

        Ok(AnimeEntry {
            id: self.id,
            record,
        })
    }
}

fn read_anime_row(row: &Row<'_>) -> rusqlite::Result<AnimeRow> {
    Ok(AnimeRow {
        id: row.get("id")?,
        title: row.get("title")?,
        genre: row.get("genre")?,
        episodes: row.get("episodes")?,
    })
}
