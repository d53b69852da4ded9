mod annotation;
mod config;
mod enrich;
mod error;
mod input;
mod logging;
mod mapping;
mod model;
mod pipeline;
mod report;
mod services;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use crate::annotation::OrgDb;
use crate::config::{MapConfig, MapTarget, OrgDbConfig, RunConfig, ServiceConfig};
use crate::error::Result;
use crate::input::load_sample_table;
use crate::mapping::{map_to_entrez, map_to_uniprot};
use crate::model::params::{AdjustMethod, EnrichParams};
use crate::model::species::{Ontology, Species};
use crate::pipeline::{AnalyzeOptions, analyze};
use crate::services::LiveServices;
use crate::services::kegg::DEFAULT_KEGG_URL;
use crate::services::uniprot::DEFAULT_UNIPROT_URL;

#[derive(Debug, Parser)]
#[command(name = "myco-enrich", version, about)]
struct Cli {
    /// Debug logging (overrides RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(flatten)]
    service: ServiceArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct ServiceArgs {
    #[arg(long, global = true, env = "MYCO_ENRICH_UNIPROT_URL", default_value = DEFAULT_UNIPROT_URL)]
    uniprot_url: String,

    #[arg(long, global = true, env = "MYCO_ENRICH_KEGG_URL", default_value = DEFAULT_KEGG_URL)]
    kegg_url: String,

    /// HTTP request timeout in seconds.
    #[arg(long, global = true, env = "MYCO_ENRICH_TIMEOUT_SECS", default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Map identifiers and write KEGG/GO enrichment tables.
    Run(RunArgs),
    /// Print mapped UniProt accessions or Entrez IDs, one per line.
    Map(MapArgs),
}

#[derive(Debug, Args)]
struct OrgDbArgs {
    /// Directory with NCBI gene_info, gene2go and optionally go-basic.obo.
    #[arg(long)]
    orgdb: Option<PathBuf>,

    /// Keep only annotation rows of this NCBI taxon.
    #[arg(long)]
    orgdb_taxon: Option<u32>,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Two-column table: protein, gene.
    #[arg(long)]
    input: PathBuf,

    #[arg(long)]
    out_prefix: String,

    /// avium | abscessus
    #[arg(long)]
    species: String,

    #[arg(long)]
    no_kegg: bool,

    #[arg(long)]
    go: bool,

    #[arg(long, default_value = "BP", value_parser = parse_ontology)]
    ontology: Ontology,

    #[arg(long, default_value_t = 0.05)]
    pvalue_cutoff: f64,

    #[arg(long, default_value_t = 0.2)]
    qvalue_cutoff: f64,

    #[arg(long, default_value = "BH", value_parser = parse_adjust)]
    p_adjust: AdjustMethod,

    #[arg(long, default_value_t = 10)]
    min_gs_size: usize,

    #[arg(long, default_value_t = 500)]
    max_gs_size: usize,

    #[command(flatten)]
    orgdb: OrgDbArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MapTo {
    Uniprot,
    Entrez,
}

#[derive(Debug, Args)]
struct MapArgs {
    #[arg(long)]
    input: PathBuf,

    #[arg(long)]
    species: String,

    #[arg(long, value_enum)]
    to: MapTo,

    /// Write IDs here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    orgdb: OrgDbArgs,
}

fn parse_ontology(s: &str) -> std::result::Result<Ontology, String> {
    s.parse().map_err(|e: error::EnrichError| e.to_string())
}

fn parse_adjust(s: &str) -> std::result::Result<AdjustMethod, String> {
    s.parse().map_err(|e: error::EnrichError| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let services = service_config(&cli.service);
    match cli.command {
        Command::Run(args) => run_analysis(&run_config(args, services)),
        Command::Map(args) => run_map(&map_config(args, services)),
    }
}

fn service_config(args: &ServiceArgs) -> ServiceConfig {
    ServiceConfig {
        uniprot_url: args.uniprot_url.clone(),
        kegg_url: args.kegg_url.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
        ..ServiceConfig::default()
    }
}

fn orgdb_config(args: OrgDbArgs) -> OrgDbConfig {
    OrgDbConfig {
        dir: args.orgdb,
        taxon: args.orgdb_taxon,
    }
}

fn run_config(args: RunArgs, services: ServiceConfig) -> RunConfig {
    RunConfig {
        input: args.input,
        output_prefix: args.out_prefix,
        species: args.species,
        options: AnalyzeOptions {
            do_kegg: !args.no_kegg,
            do_go: args.go,
            ontology: args.ontology,
            params: EnrichParams {
                pvalue_cutoff: args.pvalue_cutoff,
                qvalue_cutoff: args.qvalue_cutoff,
                adjust: args.p_adjust,
                min_gs_size: args.min_gs_size,
                max_gs_size: args.max_gs_size,
            },
        },
        orgdb: orgdb_config(args.orgdb),
        services,
    }
}

fn map_config(args: MapArgs, services: ServiceConfig) -> MapConfig {
    MapConfig {
        input: args.input,
        species: args.species,
        target: match args.to {
            MapTo::Uniprot => MapTarget::Uniprot,
            MapTo::Entrez => MapTarget::Entrez,
        },
        out: args.out,
        orgdb: orgdb_config(args.orgdb),
        services,
    }
}

/// Only abscessus needs the annotation database; anything else skips loading.
fn load_orgdb(config: &OrgDbConfig, species: &str) -> Result<Option<OrgDb>> {
    match (species.parse::<Species>(), &config.dir) {
        (Ok(Species::Abscessus), Some(dir)) => Ok(Some(OrgDb::load_dir(dir, config.taxon)?)),
        _ => Ok(None),
    }
}

fn run_analysis(config: &RunConfig) -> Result<()> {
    let orgdb = load_orgdb(&config.orgdb, &config.species)?;
    let live = LiveServices::connect(&config.services, orgdb)?;
    let written = analyze(
        &config.input,
        &config.output_prefix,
        &config.species,
        &config.options,
        &live.backends(),
    )?;
    for path in written {
        info!("output: {}", path.display());
    }
    Ok(())
}

fn run_map(config: &MapConfig) -> Result<()> {
    let species: Species = config.species.parse()?;
    let table = load_sample_table(&config.input)?;
    let orgdb = load_orgdb(&config.orgdb, &config.species)?;
    let live = LiveServices::connect(&config.services, orgdb)?;
    let backends = live.backends();
    let ids = match config.target {
        MapTarget::Uniprot => map_to_uniprot(&table, species, &backends)?,
        MapTarget::Entrez => map_to_entrez(&table, species, &backends)?,
    };

    let mut out: Box<dyn Write> = match &config.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    for id in &ids {
        writeln!(out, "{id}")?;
    }
    out.flush()?;
    info!("{} identifiers written", ids.len());
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
