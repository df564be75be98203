use crate::db::mappers::ClipboardItemRowMapper;
use crate::db::models::{ClipboardItemRow, NewClipboardItemRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::clipboard_items;
use anyhow::{Context, Result};
use cv_core::ports::ItemStorePort;
use cv_core::{ClipboardItem, ContentHash, ItemId};
use diesel::prelude::*;

/// SQLite-backed item store.
///
/// Uniqueness of `content_hash` is enforced by a unique index, so a racing
/// second insert of the same content fails instead of creating a duplicate.
pub struct DieselItemRepository<E, M = ClipboardItemRowMapper> {
    executor: E,
    mapper: M,
}

impl<E> DieselItemRepository<E, ClipboardItemRowMapper> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            mapper: ClipboardItemRowMapper,
        }
    }
}

impl<E, M> DieselItemRepository<E, M> {
    pub fn with_mapper(executor: E, mapper: M) -> Self {
        Self { executor, mapper }
    }
}

#[async_trait::async_trait]
impl<E, M> ItemStorePort for DieselItemRepository<E, M>
where
    E: DbExecutor,
    M: InsertMapper<ClipboardItem, NewClipboardItemRow> + RowMapper<ClipboardItemRow, ClipboardItem>,
{
    async fn find_by_hash(&self, hash: &ContentHash) -> Result<Option<ClipboardItem>> {
        self.executor.run(|conn| {
            let row = clipboard_items::table
                .filter(clipboard_items::content_hash.eq(hash.as_str()))
                .select(ClipboardItemRow::as_select())
                .first::<ClipboardItemRow>(conn)
                .optional()?;

            row.map(|row| self.mapper.to_domain(&row)).transpose()
        })
    }

    async fn insert(&self, item: &ClipboardItem) -> Result<()> {
        let row = self.mapper.to_row(item)?;
        self.executor.run(|conn| {
            diesel::insert_into(clipboard_items::table)
                .values(&row)
                .execute(conn)
                .with_context(|| format!("insert clipboard item {}", item.id))?;
            Ok(())
        })
    }

    async fn touch_last_accessed(&self, id: &ItemId, at_ms: i64) -> Result<bool> {
        let id_str = id.inner().as_str();
        self.executor.run(|conn| {
            let updated = diesel::update(
                clipboard_items::table
                    .filter(clipboard_items::id.eq(id_str))
                    .filter(clipboard_items::last_accessed_at_ms.lt(at_ms)),
            )
            .set(clipboard_items::last_accessed_at_ms.eq(at_ms))
            .execute(conn)?;

            if updated > 0 {
                return Ok(true);
            }

            // Not updated: either missing, or already at or past `at_ms`.
            let existing = clipboard_items::table
                .filter(clipboard_items::id.eq(id_str))
                .select(clipboard_items::id)
                .first::<String>(conn)
                .optional()?;
            Ok(existing.is_some())
        })
    }

    async fn get_item(&self, id: &ItemId) -> Result<Option<ClipboardItem>> {
        self.executor.run(|conn| {
            let row = clipboard_items::table
                .filter(clipboard_items::id.eq(id.inner().as_str()))
                .select(ClipboardItemRow::as_select())
                .first::<ClipboardItemRow>(conn)
                .optional()?;

            row.map(|row| self.mapper.to_domain(&row)).transpose()
        })
    }
}
