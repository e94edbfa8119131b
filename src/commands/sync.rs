use std::path::PathBuf;

use anyhow::{Context, Result};
use collaborators::{FileCatalogStore, FileKbClient};
use linker_core::{FormatterRegistry, RunConfig};
use tracing::info;
use validators::{validate_identifiers, validate_links, validate_metadata};

use crate::cli::SyncCommand;

fn kb_source_path(config: &RunConfig, catalog: &str, entity: &str) -> PathBuf {
    config.cache_dir.join(format!("{catalog}_{entity}_kb_source.jsonl"))
}

fn catalog_source_path(config: &RunConfig, catalog: &str, entity: &str) -> PathBuf {
    config.cache_dir.join(format!("{catalog}_{entity}_catalog_source.jsonl"))
}

fn load_formatter_registry(path: Option<&PathBuf>) -> Result<FormatterRegistry> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading formatter registry at {}", path.display()))?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(FormatterRegistry::default()),
    }
}

pub async fn run_sync(command: &SyncCommand, config: &RunConfig, qids: &[String]) -> Result<()> {
    match command {
        SyncCommand::Ids { args, property } | SyncCommand::Works { args, property } => {
            let kb_client = FileKbClient::new(kb_source_path(config, &args.catalog, &args.entity));
            let catalog_store = FileCatalogStore::new(catalog_source_path(config, &args.catalog, &args.entity));
            let invalid =
                validate_identifiers(&args.catalog, &args.entity, property, qids, &kb_client, &catalog_store).await?;
            println!("{}", serde_json::to_string_pretty(&invalid)?);
            info!(count = invalid.len(), "dead-identifier sync complete");
            Ok(())
        }
        SyncCommand::Links { args, property, formatter_registry } => {
            let registry = load_formatter_registry(formatter_registry.as_ref())?;
            let kb_client = FileKbClient::new(kb_source_path(config, &args.catalog, &args.entity));
            let catalog_store = FileCatalogStore::new(catalog_source_path(config, &args.catalog, &args.entity));
            let report = validate_links(
                &args.catalog,
                &args.entity,
                property,
                qids,
                &kb_client,
                &catalog_store,
                &registry,
                config.normalize_link_urls,
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&report.to_deprecate)?);
            for (qid, bucket) in &report.to_add {
                for (property, value) in &bucket.identifiers {
                    println!("{qid}\t{property}\t{value}");
                }
                for url in &bucket.urls {
                    println!("{qid}\turl\t{url}");
                }
            }
            info!(deprecations = report.to_deprecate.len(), additions = report.to_add.len(), "links sync complete");
            Ok(())
        }
        SyncCommand::Bio { args, property } => {
            let kb_client = FileKbClient::new(kb_source_path(config, &args.catalog, &args.entity));
            let catalog_store = FileCatalogStore::new(catalog_source_path(config, &args.catalog, &args.entity));
            let result =
                validate_metadata(&args.catalog, &args.entity, property, qids, &kb_client, &catalog_store).await?;
            println!("{}", serde_json::to_string_pretty(&result.to_deprecate)?);
            for (qid, facts) in &result.to_add {
                for fact in facts {
                    println!("{qid}\t{}\t{}", fact.property(), fact.value());
                }
            }
            info!(deprecations = result.to_deprecate.len(), additions = result.to_add.len(), "biographical sync complete");
            Ok(())
        }
    }
}
