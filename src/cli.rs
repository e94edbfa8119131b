use clap::{Args, Parser, Subcommand};

/// Synchronizes a knowledge base with external authority catalogs: links
/// KB items to catalog records, validates existing identifier statements,
/// and reports what should change.
#[derive(Debug, Parser)]
#[command(name = "soweego-rs", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Knowledge-base QIDs to operate on; defaults to every QID found in
    /// the file-backed KB source when empty.
    #[arg(long, global = true, value_delimiter = ',')]
    pub qids: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ingest a full catalog dump into the indexed relational store
    /// (external collaborator; out of core scope here).
    Import(ImportArgs),
    /// Train, evaluate, and run the record-linkage classifier.
    Linker {
        #[command(subcommand)]
        command: LinkerCommand,
    },
    /// Validate existing KB-to-catalog identifier statements.
    Sync {
        #[command(subcommand)]
        command: SyncCommand,
    },
    /// Emit edit streams to the knowledge base (external collaborator;
    /// logged rather than uploaded in this build).
    Ingest {
        #[command(subcommand)]
        command: IngestCommand,
    },
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub catalog: String,
    pub entity: String,
}

#[derive(Debug, Args)]
pub struct CatalogEntityArgs {
    pub catalog: String,
    pub entity: String,
}

#[derive(Debug, Subcommand)]
pub enum LinkerCommand {
    /// Non-ML baseline matching strategies (out of core scope, §1).
    Baseline(CatalogEntityArgs),
    Train {
        algo: String,
        catalog: String,
        entity: String,
        /// Property the catalog uses for this entity's identifier claims.
        #[arg(long)]
        property: String,
        #[arg(long)]
        tune: bool,
        #[arg(short = 'k', long, default_value_t = 5)]
        k: usize,
    },
    Evaluate {
        algo: String,
        catalog: String,
        entity: String,
        #[arg(long)]
        property: String,
        #[arg(long)]
        single: bool,
        #[arg(short = 'k', long, default_value_t = 5)]
        k: usize,
    },
    Link {
        algo: String,
        catalog: String,
        entity: String,
        #[arg(short = 't', long)]
        threshold: Option<f32>,
        /// Activate the name-overlap post-rule (off by default).
        #[arg(short = 'n', long)]
        name_rule: bool,
        /// Upload accepted links to the knowledge base.
        #[arg(short = 'u', long)]
        upload: bool,
        /// Upload to the sandbox item instead of production.
        #[arg(short = 's', long)]
        sandbox: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SyncCommand {
    /// Dead-identifier check: claims pointing at catalog rows that no
    /// longer exist.
    Ids {
        #[command(flatten)]
        args: CatalogEntityArgs,
        #[arg(long)]
        property: String,
    },
    /// Link-based validation.
    Links {
        #[command(flatten)]
        args: CatalogEntityArgs,
        #[arg(long)]
        property: String,
        #[arg(short = 'u', long)]
        formatter_registry: Option<std::path::PathBuf>,
    },
    /// Biographical-data validation.
    Bio {
        #[command(flatten)]
        args: CatalogEntityArgs,
        #[arg(long)]
        property: String,
    },
    /// Dead-identifier check scoped to work entities.
    Works {
        #[command(flatten)]
        args: CatalogEntityArgs,
        #[arg(long)]
        property: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum IngestCommand {
    Identifiers,
    People,
    Works,
    Delete,
    Deprecate,
    Mnm,
}
