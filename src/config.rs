use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::AnalyzeOptions;
use crate::services::kegg::DEFAULT_KEGG_URL;
use crate::services::uniprot::DEFAULT_UNIPROT_URL;

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_POLLS: u32 = 60;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub uniprot_url: String,
    pub kegg_url: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            uniprot_url: DEFAULT_UNIPROT_URL.to_string(),
            kegg_url: DEFAULT_KEGG_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrgDbConfig {
    pub dir: Option<PathBuf>,
    pub taxon: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_prefix: String,
    pub species: String,
    pub options: AnalyzeOptions,
    pub orgdb: OrgDbConfig,
    pub services: ServiceConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTarget {
    Uniprot,
    Entrez,
}

#[derive(Debug, Clone)]
pub struct MapConfig {
    pub input: PathBuf,
    pub species: String,
    pub target: MapTarget,
    pub out: Option<PathBuf>,
    pub orgdb: OrgDbConfig,
    pub services: ServiceConfig,
}
