use std::collections::{BTreeMap, BTreeSet};

use collaborators::{CatalogStore, KbClient};
use linker_core::{FormatterRegistry, KbItem};

use crate::assess::AssessResult;
use crate::dead_id::dead_identifiers;
use crate::links::{check_links, LinksReport};
use crate::metadata::{check_metadata, BioFact};
use crate::ValidatorError;

/// Target identifiers a QID claims for `catalog_property`, keyed by QID.
fn target_ids_by_qid(items: &[KbItem], catalog_property: &str) -> BTreeMap<String, BTreeSet<String>> {
    items
        .iter()
        .map(|item| {
            let ids = item
                .identifier_claims
                .iter()
                .filter(|c| c.property == catalog_property)
                .map(|c| c.value.clone())
                .collect();
            (item.qid.clone(), ids)
        })
        .collect()
}

fn kb_items_with_targets(items: Vec<KbItem>, catalog_property: &str) -> BTreeMap<String, (KbItem, BTreeSet<String>)> {
    let targets = target_ids_by_qid(&items, catalog_property);
    items
        .into_iter()
        .map(|item| {
            let ids = targets.get(&item.qid).cloned().unwrap_or_default();
            (item.qid.clone(), (item, ids))
        })
        .collect()
}

/// `checks.py::check_existence`, fetching what it needs through
/// [`KbClient`]/[`CatalogStore`] instead of a direct DB session.
pub async fn validate_identifiers(
    catalog: &str,
    entity: &str,
    catalog_property: &str,
    qids: &[String],
    kb_client: &dyn KbClient,
    catalog_store: &dyn CatalogStore,
) -> Result<BTreeMap<String, BTreeSet<String>>, ValidatorError> {
    let items = kb_client.get_data_for_linker(catalog, entity, qids).await?;
    let claims: Vec<(String, String)> = items
        .iter()
        .flat_map(|item| {
            item.identifier_claims
                .iter()
                .filter(|c| c.property == catalog_property)
                .map(move |c| (item.qid.clone(), c.value.clone()))
        })
        .collect();

    let existing: BTreeSet<String> =
        catalog_store.entity_rows(entity, None).await?.into_iter().map(|row| row.tid).collect();

    Ok(dead_identifiers(&claims, &existing))
}

/// `checks.py::check_links`, fetching KB and catalog sides first.
pub async fn validate_links(
    catalog: &str,
    entity: &str,
    catalog_property: &str,
    qids: &[String],
    kb_client: &dyn KbClient,
    catalog_store: &dyn CatalogStore,
    registry: &FormatterRegistry,
    normalize: bool,
) -> Result<LinksReport, ValidatorError> {
    let items = kb_client.get_data_for_linker(catalog, entity, qids).await?;
    let kb_items = kb_items_with_targets(items, catalog_property);

    let all_target_ids: Vec<String> = kb_items.values().flat_map(|(_, ids)| ids.iter().cloned()).collect();
    let target_links: BTreeMap<String, BTreeSet<String>> = catalog_store
        .entity_rows(entity, Some(&all_target_ids))
        .await?
        .into_iter()
        .map(|row| (row.tid.clone(), row.urls.into_iter().collect()))
        .collect();

    Ok(check_links(&kb_items, &target_links, registry, normalize))
}

/// `checks.py::check_metadata`, fetching KB and catalog sides first.
pub async fn validate_metadata(
    catalog: &str,
    entity: &str,
    catalog_property: &str,
    qids: &[String],
    kb_client: &dyn KbClient,
    catalog_store: &dyn CatalogStore,
) -> Result<AssessResult<BioFact>, ValidatorError> {
    let items = kb_client.get_data_for_linker(catalog, entity, qids).await?;
    let kb_items = kb_items_with_targets(items, catalog_property);

    let all_target_ids: Vec<String> = kb_items.values().flat_map(|(_, ids)| ids.iter().cloned()).collect();
    let target_records: BTreeMap<String, linker_core::CatalogRecord> = catalog_store
        .entity_rows(entity, Some(&all_target_ids))
        .await?
        .into_iter()
        .map(|row| (row.tid.clone(), row))
        .collect();

    Ok(check_metadata(&kb_items, &target_records))
}
