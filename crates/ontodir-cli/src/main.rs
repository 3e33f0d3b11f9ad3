//! ontodir CLI
//!
//! Runs the extraction and directory pipeline over saved BioPortal REST
//! documents:
//! - `relations`: targets of an entity's relations, filtered and paged
//! - `associations`: full association records (or graph nodes)
//! - `count`: size of a filtered relation directory
//! - `value-sets`: value set definitions from an `ontologyBean` listing

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use ontodir_bioportal::references::{
    association_references, entity_references, value_set_definition_references,
};
use ontodir_bioportal::{
    AssociationTransform, BaseUrlConstructor, Scope, ServiceConfig, ValueSetDefinitionTransform,
};
use ontodir_directory::{
    AttributeReference, DirectoryBuilder, DirectoryResult, FilterComponent, KnownReferences,
    MatchAlgorithmReference, Page,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ontodir")]
#[command(author, version, about = "Directory queries over BioPortal REST documents")]
struct Cli {
    /// Service configuration (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Targets of an entity's relations, optionally of one predicate only.
    Relations {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Relation label, e.g. `SubClass`; every relation when omitted
        #[arg(long)]
        predicate: Option<String>,
        #[command(flatten)]
        directory: DirectoryArgs,
    },

    /// Association records of an entity.
    Associations {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Emit graph nodes carrying the target's synopsis
        #[arg(long, conflicts_with_all = ["filter", "start", "max"])]
        graph: bool,
        #[command(flatten)]
        directory: DirectoryArgs,
    },

    /// Number of relation targets left after filtering.
    Count {
        #[command(flatten)]
        scope: ScopeArgs,
        #[arg(long)]
        predicate: Option<String>,
        /// `attribute:algorithm:value`, e.g. `resourceName:contains:cell`
        #[arg(long)]
        filter: Option<String>,
    },

    /// Value set definitions from a latest-views or ontology-versions listing.
    ValueSets {
        /// Saved listing document
        input: PathBuf,
        #[command(flatten)]
        directory: DirectoryArgs,
    },
}

#[derive(Args)]
struct ScopeArgs {
    /// Saved entity document (`success.data.classBean`)
    input: PathBuf,
    /// Code system the entity belongs to
    #[arg(long)]
    code_system: String,
    /// Code system version the document was read from
    #[arg(long)]
    code_system_version: String,
}

impl ScopeArgs {
    fn scope(&self) -> Scope {
        Scope::new(&self.code_system, &self.code_system_version)
    }
}

#[derive(Args)]
struct DirectoryArgs {
    /// `attribute:algorithm:value`, e.g. `resourceName:contains:cell`
    #[arg(long)]
    filter: Option<String>,
    /// First entry to return
    #[arg(long)]
    start: Option<usize>,
    /// Maximum number of entries to return
    #[arg(long)]
    max: Option<usize>,
}

impl DirectoryArgs {
    fn filter(&self) -> Result<Option<FilterComponent>> {
        self.filter.as_deref().map(parse_filter).transpose()
    }

    fn is_unrestricted(&self) -> bool {
        self.filter.is_none() && self.start.is_none() && self.max.is_none()
    }

    fn page(&self, default: Page) -> Page {
        Page::new(
            self.start.unwrap_or(default.start),
            self.max.unwrap_or(default.max_to_return),
        )
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    let urls = config.url_constructor()?;

    match cli.command {
        Commands::Relations {
            scope,
            predicate,
            directory,
        } => cmd_relations(&config, &urls, &scope, predicate.as_deref(), &directory),
        Commands::Associations {
            scope,
            graph,
            directory,
        } => cmd_associations(&config, &urls, &scope, graph, &directory),
        Commands::Count {
            scope,
            predicate,
            filter,
        } => cmd_count(&urls, &scope, predicate.as_deref(), filter.as_deref()),
        Commands::ValueSets { input, directory } => {
            cmd_value_sets(&config, &urls, &input, &directory)
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_relations(
    config: &ServiceConfig,
    urls: &BaseUrlConstructor,
    scope: &ScopeArgs,
    predicate: Option<&str>,
    directory: &DirectoryArgs,
) -> Result<()> {
    let xml = read_document(&scope.input)?;
    let entries =
        AssociationTransform::new(urls).entities_for_relationship(&xml, &scope.scope(), predicate)?;
    let references = entity_references();
    let result = paged(entries, &references, directory, config.default_page)?;
    report("relations", &result);
    print_json(&result)
}

fn cmd_associations(
    config: &ServiceConfig,
    urls: &BaseUrlConstructor,
    scope: &ScopeArgs,
    graph: bool,
    directory: &DirectoryArgs,
) -> Result<()> {
    let xml = read_document(&scope.input)?;
    let transform = AssociationTransform::new(urls);
    let scope = scope.scope();

    if graph {
        let result = DirectoryResult::from_complete(transform.graph_for_subject(&xml, &scope)?);
        report("graph nodes", &result);
        return print_json(&result);
    }

    let result = if directory.is_unrestricted() {
        transform.subject_of_associations_for_entity(&xml, &scope)?
    } else {
        let references = association_references();
        let associations = transform.associations_for_subject(&xml, &scope)?;
        paged(associations, &references, directory, config.default_page)?
    };
    report("associations", &result);
    print_json(&result)
}

fn cmd_count(
    urls: &BaseUrlConstructor,
    scope: &ScopeArgs,
    predicate: Option<&str>,
    filter: Option<&str>,
) -> Result<()> {
    let xml = read_document(&scope.input)?;
    let entries =
        AssociationTransform::new(urls).entities_for_relationship(&xml, &scope.scope(), predicate)?;
    let references = entity_references();
    let filter = filter.map(parse_filter).transpose()?;
    let count = DirectoryBuilder::new(entries, &references)
        .restrict(filter.as_ref())?
        .count();
    println!("{count}");
    Ok(())
}

fn cmd_value_sets(
    config: &ServiceConfig,
    urls: &BaseUrlConstructor,
    input: &Path,
    directory: &DirectoryArgs,
) -> Result<()> {
    let xml = read_document(input)?;
    let definitions = ValueSetDefinitionTransform::new(urls).value_set_definitions(&xml)?;
    let references = value_set_definition_references();
    let result = paged(definitions, &references, directory, config.default_page)?;
    report("value set definitions", &result);
    print_json(&result)
}

// ============================================================================
// Helpers
// ============================================================================

fn read_document(path: &Path) -> Result<String> {
    let xml = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = xml.len(), "document read");
    Ok(xml)
}

fn paged<T>(
    candidates: Vec<T>,
    references: &KnownReferences<T>,
    directory: &DirectoryArgs,
    default_page: Page,
) -> Result<DirectoryResult<T>> {
    let filter = directory.filter()?;
    Ok(DirectoryBuilder::new(candidates, references)
        .restrict(filter.as_ref())?
        .page(directory.page(default_page))
        .resolve())
}

/// Parses `attribute:algorithm:value`; the value may itself contain `:`.
fn parse_filter(text: &str) -> Result<FilterComponent> {
    let mut parts = text.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(attribute), Some(algorithm), Some(value))
            if !attribute.is_empty() && !algorithm.is_empty() =>
        {
            Ok(FilterComponent::new(
                AttributeReference::new(attribute),
                MatchAlgorithmReference::new(algorithm),
                value,
            ))
        }
        _ => Err(anyhow!(
            "invalid filter `{text}`: expected `attribute:algorithm:value`"
        )),
    }
}

fn report<T>(what: &str, result: &DirectoryResult<T>) {
    let more = if result.has_more() {
        "more available".yellow()
    } else {
        "at end".normal()
    };
    eprintln!(
        "{} {} of {} {} ({})",
        "ok".green().bold(),
        result.len(),
        result.total(),
        what,
        more
    );
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
