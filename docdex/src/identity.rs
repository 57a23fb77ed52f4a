//! Deterministic record identity.

use uuid::Uuid;

/// Derive the stable id for a `(source, chunk_index)` pair.
///
/// The id is a UUIDv5 (SHA-1 name hash) over the UTF-8 bytes of
/// `"{source}:{chunk_index}"`, so identical inputs always produce the
/// identical id and re-indexing an unchanged document upserts the same
/// records instead of duplicating them. Collisions are handled only by
/// hash width.
///
/// The id deliberately ignores chunk content and chunk geometry: this is
/// what makes unchanged corpora re-index idempotently. The flip side is
/// that re-indexing with a different `chunk_size`/`overlap` writes new
/// boundaries under the old ids, and any indices past the new chunk count
/// survive as stale records. Drop or recreate the collection when changing
/// chunk geometry.
pub fn chunk_id(source: &str, chunk_index: usize) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{source}:{chunk_index}").as_bytes())
}
