//! Ad-hoc command line access to the terminology registry.
//!
//! Prints results as pretty JSON so output can be piped into `jq` or saved as
//! fixtures. Honours `AYUSH_TERMINOLOGY_FILE` the same way the server does.

use clap::{Parser, Subcommand};
use fhir::{CodeSystem, ConceptMap};
use std::path::PathBuf;
use terminology_core::{CodingSystem, RegistryConfig, SystemFilter, TerminologyRegistry};

#[derive(Parser)]
#[command(name = "ayush")]
#[command(about = "AYUSH terminology registry CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search both catalogs by free text
    Search {
        /// Free-text query
        query: String,
        /// Result cap
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Scope: 'all', a family (NAMASTE, ICD-11) or a full system name
        #[arg(long, default_value = "all")]
        system: String,
    },
    /// Look up a single code in the catalog a system selects
    Lookup {
        /// Exact code, e.g. AYU001
        code: String,
        /// Coding system wire name, e.g. NAMASTE-Ayurveda
        system: String,
    },
    /// Translate a code into another coding system
    Translate {
        /// Source code
        source_code: String,
        /// Source coding system wire name
        source_system: String,
        /// Target coding system wire name
        target_system: String,
    },
    /// Resolve a NAMASTE term's ICD-11 cross-references
    Mappings {
        /// NAMASTE code
        code: String,
        /// Coding system wire name
        system: String,
    },
    /// Export the NAMASTE catalog as a FHIR CodeSystem document
    ExportCodeSystem,
    /// Export the mapping table as a FHIR ConceptMap document
    ExportConceptMap,
}

fn load_registry() -> anyhow::Result<TerminologyRegistry> {
    let catalog_file = std::env::var("AYUSH_TERMINOLOGY_FILE")
        .ok()
        .map(PathBuf::from);
    Ok(RegistryConfig::new(catalog_file).build_registry()?)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_system(input: &str) -> anyhow::Result<CodingSystem> {
    CodingSystem::parse(input).map_err(|err| {
        anyhow::anyhow!(
            "{err}; expected one of: {}",
            CodingSystem::ALL
                .iter()
                .map(|s| s.as_wire())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let registry = load_registry()?;

    match cli.command {
        Commands::Search {
            query,
            limit,
            system,
        } => {
            let filter = SystemFilter::parse(&system)?;
            let mut results = registry.search(&query, limit);
            if filter != SystemFilter::All {
                results.retain(|hit| filter.matches(hit.system));
            }
            print_json(&results)?;
        }
        Commands::Lookup { code, system } => {
            let system = parse_system(&system)?;
            match registry.get_by_code(&code, system) {
                Some(hit) => print_json(&hit)?,
                None => anyhow::bail!("no entry for {code} in {system}"),
            }
        }
        Commands::Translate {
            source_code,
            source_system,
            target_system,
        } => {
            let source_system = parse_system(&source_system)?;
            let target_system = parse_system(&target_system)?;
            let records = registry.translate(&source_code, source_system, target_system);
            print_json(&records)?;
        }
        Commands::Mappings { code, system } => {
            let system = parse_system(&system)?;
            print_json(&registry.mappings_for(&code, system))?;
        }
        Commands::ExportCodeSystem => {
            print_json(&CodeSystem::generate(&registry))?;
        }
        Commands::ExportConceptMap => {
            print_json(&ConceptMap::generate(&registry))?;
        }
    }

    Ok(())
}
