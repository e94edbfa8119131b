use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use classifier::{build_training_matrix, classify, load_model, model_path, save_model, train, Algorithm};
use collaborators::{FileCatalogStore, FileKbClient, HttpSparqlClient, SparqlClient};
use evaluator::{evaluate_averaged, evaluate_single};
use linker_core::RunConfig;
use tracing::info;

use crate::cli::LinkerCommand;

const DEFAULT_SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";

fn kb_source_path(config: &RunConfig, catalog: &str, entity: &str) -> PathBuf {
    config.cache_dir.join(format!("{catalog}_{entity}_kb_source.jsonl"))
}

fn catalog_source_path(config: &RunConfig, catalog: &str, entity: &str) -> PathBuf {
    config.cache_dir.join(format!("{catalog}_{entity}_catalog_source.jsonl"))
}

fn sparql_client(config: &RunConfig) -> Arc<dyn SparqlClient> {
    let endpoint = config.sparql_endpoint.clone().unwrap_or_else(|| DEFAULT_SPARQL_ENDPOINT.to_string());
    Arc::new(HttpSparqlClient::new(endpoint))
}

pub async fn run_linker(command: &LinkerCommand, config: &RunConfig, qids: &[String]) -> Result<()> {
    match command {
        LinkerCommand::Baseline(args) => {
            info!(
                catalog = %args.catalog,
                entity = %args.entity,
                "non-ML baseline matching strategies are out of core scope; nothing to run"
            );
            Ok(())
        }
        LinkerCommand::Train { algo, catalog, entity, property, tune, k } => {
            let algorithm = Algorithm::parse(algo)?;
            if *tune && !algorithm.supports_tuning() {
                bail!("grid-search tuning is not supported for {algo}");
            }
            let kb_client = FileKbClient::new(kb_source_path(config, catalog, entity));
            let catalog_store = FileCatalogStore::new(catalog_source_path(config, catalog, entity));
            let sparql = sparql_client(config);

            if *tune {
                info!(algo, k, "tuning requested: evaluating candidate folds before the final fit");
                let (records, targets, _) = build_training_matrix(
                    config,
                    catalog,
                    entity,
                    property,
                    qids,
                    &kb_client,
                    &catalog_store,
                    sparql.clone(),
                )
                .await?;
                let report = evaluate_averaged(&records, &targets, algorithm, *k, config.kfold_seed, config.classification_threshold)?;
                info!(mean_f1 = report.mean_f1, stdev_f1 = report.stdev_f1, "tuning cross-validation complete");
            }

            let persisted =
                train(config, catalog, entity, property, algorithm, qids, &kb_client, &catalog_store, sparql).await?;
            let path = model_path(&config.output_dir, catalog, entity, algorithm);
            save_model(&path, &persisted)?;
            info!(path = %path.display(), "model saved");
            Ok(())
        }
        LinkerCommand::Evaluate { algo, catalog, entity, property, single, k } => {
            let algorithm = Algorithm::parse(algo)?;
            let kb_client = FileKbClient::new(kb_source_path(config, catalog, entity));
            let catalog_store = FileCatalogStore::new(catalog_source_path(config, catalog, entity));
            let sparql = sparql_client(config);

            let (records, targets, _) =
                build_training_matrix(config, catalog, entity, property, qids, &kb_client, &catalog_store, sparql).await?;

            if *single {
                let report = evaluate_single(&records, &targets, algorithm, *k, config.kfold_seed, config.classification_threshold)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let report = evaluate_averaged(&records, &targets, algorithm, *k, config.kfold_seed, config.classification_threshold)?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Ok(())
        }
        LinkerCommand::Link { algo, catalog, entity, threshold, name_rule, upload, sandbox } => {
            let algorithm = Algorithm::parse(algo)?;
            let path = model_path(&config.output_dir, catalog, entity, algorithm);
            if !path.exists() {
                bail!("missing model for {catalog}/{entity}/{algo}: run `linker train` first");
            }
            let persisted = load_model(&path)?;

            let mut run_config = config.clone();
            if let Some(t) = threshold {
                run_config.classification_threshold = *t;
            }
            run_config.name_rule = *name_rule;

            let kb_client = FileKbClient::new(kb_source_path(&run_config, catalog, entity));
            let catalog_store = FileCatalogStore::new(catalog_source_path(&run_config, catalog, entity));
            let sparql = sparql_client(&run_config);

            let pairs =
                classify(&run_config, catalog, entity, &persisted, qids, &kb_client, &catalog_store, sparql).await?;

            let out_path = run_config.output_dir.join(format!("{catalog}_{entity}_{algo}_links.csv"));
            std::fs::create_dir_all(&run_config.output_dir)?;
            let mut writer = csv::Writer::from_path(&out_path)?;
            writer.write_record(["qid", "tid", "score"])?;
            for pair in &pairs {
                writer.write_record([pair.qid.as_str(), pair.tid.as_str(), &pair.score.to_string()])?;
            }
            writer.flush()?;
            info!(path = %out_path.display(), pairs = pairs.len(), "classification output written");

            if *upload {
                let bot = collaborators::LoggingEditBot;
                let edits: Vec<collaborators::EditTuple> = pairs
                    .iter()
                    .map(|p| collaborators::EditTuple {
                        subject: p.qid.clone(),
                        predicate: format!("{catalog}_identifier"),
                        value: p.tid.clone(),
                        reference_id: catalog.clone(),
                    })
                    .collect();
                info!(sandbox = *sandbox, "uploading {} accepted links", edits.len());
                collaborators::EditBot::upload(&bot, &edits).await?;
            }
            Ok(())
        }
    }
}
