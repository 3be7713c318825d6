// src/store/sqlite.rs
use super::{ListingStore, LookupOutcome, StoreError};
use crate::db::Database;
use crate::domain::{ListingPreview, SitemapEntry};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

/// Local SQLite mirror of the `properties` table.
pub struct SqliteListingStore {
    db: Database,
}

impl SqliteListingStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Columns as stored; `images`, `type` and `listing_type` still need parsing.
struct PropertyRow {
    slug: String,
    title: String,
    description: Option<String>,
    images: String,
    kind: String,
    listing_type: String,
    city: Option<String>,
}

impl PropertyRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            slug: row.get("slug")?,
            title: row.get("title")?,
            description: row.get("description")?,
            images: row.get("images")?,
            kind: row.get("type")?,
            listing_type: row.get("listing_type")?,
            city: row.get("city")?,
        })
    }

    fn into_preview(self) -> Result<ListingPreview, StoreError> {
        let images = serde_json::from_str::<Option<Vec<String>>>(&self.images)
            .map_err(|e| StoreError::Decode(format!("images: {e}")))?
            .unwrap_or_default();

        Ok(ListingPreview {
            slug: self.slug,
            title: self.title,
            description: self.description,
            images,
            property_type: self.kind.parse().map_err(StoreError::Decode)?,
            listing_type: self.listing_type.parse().map_err(StoreError::Decode)?,
            city: self.city,
        })
    }
}

/// Accepts RFC 3339 and SQLite's `YYYY-MM-DD HH:MM:SS` form (taken as UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

impl ListingStore for SqliteListingStore {
    fn find_preview(&self, slug: &str) -> LookupOutcome {
        let result = self.db.with_conn(|conn| {
            conn.query_row(
                r#"
                select slug, title, description, images, type, listing_type, city
                from properties
                where slug = ?
                "#,
                params![slug],
                PropertyRow::from_row,
            )
            .optional()
            .map_err(|e| StoreError::Unavailable(format!("listing lookup failed: {e}")))
        });

        match result {
            Ok(Some(row)) => match row.into_preview() {
                Ok(listing) => LookupOutcome::Found(listing),
                Err(e) => LookupOutcome::TransientError(e),
            },
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => LookupOutcome::TransientError(e),
        }
    }

    fn active_listings(&self) -> Result<Vec<SitemapEntry>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    r#"
                    select slug, updated_at
                    from properties
                    where status = 'active'
                    order by julianday(updated_at) desc
                    "#,
                )
                .map_err(|e| StoreError::Unavailable(format!("prepare failed: {e}")))?;

            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
                })
                .map_err(|e| StoreError::Unavailable(format!("query failed: {e}")))?;

            let mut entries = Vec::new();
            for row in rows {
                let (slug, updated_at) =
                    row.map_err(|e| StoreError::Unavailable(format!("row read failed: {e}")))?;
                entries.push(SitemapEntry {
                    slug,
                    updated_at: updated_at.as_deref().and_then(parse_timestamp),
                });
            }
            Ok(entries)
        })
    }
}
