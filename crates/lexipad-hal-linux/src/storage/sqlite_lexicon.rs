//! Lexicon store over the `ecdict` SQLite table.

use std::{fmt, path::Path};

use lexipad_core::lexicon::{
    Inflections, LevelFlags, LexiconEntry, LexiconStore, LookupQuery,
};
use log::{debug, info};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};

const ENTRY_COLUMNS: &str = "word, phonetic, pos, definition, translation, collins, oxford, \
     gk, cet4, cet6, ky, plural, comparative, superlative, present, past, perfect, third, lemma";

#[derive(Debug)]
pub enum SqliteLexiconError {
    Closed,
    Sqlite(rusqlite::Error),
}

impl fmt::Display for SqliteLexiconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("connection closed"),
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
        }
    }
}

impl std::error::Error for SqliteLexiconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Closed => None,
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for SqliteLexiconError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}

pub struct SqliteLexicon {
    conn: Option<Connection>,
}

impl SqliteLexicon {
    /// Opens an existing dictionary read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteLexiconError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        info!("lexicon: opened {}", path.display());
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn: Some(conn) }
    }

    fn conn(&self) -> Result<&Connection, SqliteLexiconError> {
        self.conn.as_ref().ok_or(SqliteLexiconError::Closed)
    }
}

fn text(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn number(row: &Row<'_>, column: &str) -> rusqlite::Result<i64> {
    Ok(row.get::<_, Option<i64>>(column)?.unwrap_or(0))
}

fn flag(row: &Row<'_>, column: &str) -> rusqlite::Result<bool> {
    Ok(number(row, column)? != 0)
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<LexiconEntry> {
    Ok(LexiconEntry::new(text(row, "word")?)
        .with_phonetic(text(row, "phonetic")?)
        .with_part_of_speech(text(row, "pos")?)
        .with_definition(text(row, "definition")?)
        .with_translation(text(row, "translation")?)
        .with_rating(number(row, "collins")?.clamp(0, 5) as u8)
        .with_core_vocabulary(flag(row, "oxford")?)
        .with_levels(LevelFlags {
            gaokao: flag(row, "gk")?,
            cet4: flag(row, "cet4")?,
            cet6: flag(row, "cet6")?,
            kaoyan: flag(row, "ky")?,
        })
        .with_inflections(Inflections {
            plural: text(row, "plural")?,
            comparative: text(row, "comparative")?,
            superlative: text(row, "superlative")?,
            present_participle: text(row, "present")?,
            past: text(row, "past")?,
            past_participle: text(row, "perfect")?,
            third_person: text(row, "third")?,
            lemma: text(row, "lemma")?,
        }))
}

impl LexiconStore for SqliteLexicon {
    type Error = SqliteLexiconError;

    fn find(&mut self, query: &LookupQuery<'_>) -> Result<Vec<String>, Self::Error> {
        let sql = format!(
            "SELECT word FROM ecdict WHERE {} ORDER BY word COLLATE NOCASE LIMIT ?2",
            query.where_clause()
        );
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);

        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        let words = stmt
            .query_map(params![query.like_pattern(), limit], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(words)
    }

    fn get(&mut self, word: &str) -> Result<Option<LexiconEntry>, Self::Error> {
        let sql =
            format!("SELECT {ENTRY_COLUMNS} FROM ecdict WHERE word = ?1 COLLATE NOCASE LIMIT 1");
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt.query_row([word], entry_from_row).optional()?)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        debug!("lexicon: closing sqlite connection");
        conn.close().map_err(|(_, err)| SqliteLexiconError::Sqlite(err))
    }
}
