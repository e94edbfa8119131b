use linker_core::{ColumnDescriptor, ColumnKind, EntitySchema};

use crate::{PreparedCatalogRecord, PreparedKbItem};

/// Builds the column-presence descriptor for a (catalog, entity) chunk
/// (§3.1): a column is included only if at least one row in the chunk
/// carries a value for it, and marked `required` when every row does.
/// Feature selection is gated off this descriptor instead of
/// re-deriving per-column presence inside the extractor.
pub fn infer_schema(
    catalog: &str,
    entity: &str,
    kb_items: &[PreparedKbItem],
    catalog_records: &[PreparedCatalogRecord],
) -> EntitySchema {
    let kb_columns = [
        presence("name", ColumnKind::TextList, kb_items.len(), kb_items.iter().filter(|i| !i.name_tokens.is_empty()).count()),
        presence("url", ColumnKind::UrlList, kb_items.len(), kb_items.iter().filter(|i| !i.url_tokens.is_empty()).count()),
        presence("birth_date", ColumnKind::Date, kb_items.len(), kb_items.iter().filter(|i| i.item.birth_date.is_some()).count()),
        presence("death_date", ColumnKind::Date, kb_items.len(), kb_items.iter().filter(|i| i.item.death_date.is_some()).count()),
        presence(
            "occupations",
            ColumnKind::OccupationSet,
            kb_items.len(),
            kb_items.iter().filter(|i| !i.item.occupations.is_empty()).count(),
        ),
        presence("genres", ColumnKind::GenreSet, kb_items.len(), kb_items.iter().filter(|i| !i.genre_tokens.is_empty()).count()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let catalog_columns = [
        presence(
            "name",
            ColumnKind::TextList,
            catalog_records.len(),
            catalog_records.iter().filter(|r| !r.name_tokens.is_empty()).count(),
        ),
        presence(
            "url",
            ColumnKind::UrlList,
            catalog_records.len(),
            catalog_records.iter().filter(|r| !r.url_tokens.is_empty()).count(),
        ),
        presence(
            "birth_date",
            ColumnKind::Date,
            catalog_records.len(),
            catalog_records.iter().filter(|r| r.record.birth_date.is_some()).count(),
        ),
        presence(
            "death_date",
            ColumnKind::Date,
            catalog_records.len(),
            catalog_records.iter().filter(|r| r.record.death_date.is_some()).count(),
        ),
        presence(
            "occupations",
            ColumnKind::OccupationSet,
            catalog_records.len(),
            catalog_records.iter().filter(|r| !r.record.relationships.is_empty()).count(),
        ),
        presence(
            "genres",
            ColumnKind::GenreSet,
            catalog_records.len(),
            catalog_records.iter().filter(|r| !r.genre_tokens.is_empty()).count(),
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    EntitySchema { catalog: catalog.to_string(), entity: entity.to_string(), kb_columns, catalog_columns }
}

fn presence(name: &str, kind: ColumnKind, total: usize, present: usize) -> Option<ColumnDescriptor> {
    if present == 0 {
        return None;
    }
    Some(ColumnDescriptor { name: name.to_string(), kind, required: present == total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linker_core::{CatalogRecord, KbItem};

    #[test]
    fn drops_columns_absent_on_every_row() {
        let kb = vec![crate::prepare_kb_item(KbItem { qid: "Q1".into(), ..Default::default() })];
        let catalog = vec![crate::prepare_catalog_record(CatalogRecord { tid: "T1".into(), ..Default::default() })];
        let schema = infer_schema("discogs", "person", &kb, &catalog);
        assert!(schema.kb_column("birth_date").is_none());
        assert!(schema.catalog_column("genres").is_none());
    }

    #[test]
    fn marks_column_required_when_every_row_has_it() {
        let kb = vec![crate::prepare_kb_item(KbItem {
            qid: "Q1".into(),
            genres: vec!["punk".into()],
            ..Default::default()
        })];
        let catalog = vec![crate::prepare_catalog_record(CatalogRecord {
            tid: "T1".into(),
            genres: vec!["punk".into()],
            ..Default::default()
        })];
        let schema = infer_schema("discogs", "band", &kb, &catalog);
        assert!(schema.kb_column("genres").unwrap().required);
        assert!(schema.catalog_column("genres").unwrap().required);
    }
}
