use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

pub mod kegg;
pub mod uniprot;

use crate::annotation::OrgDb;
use crate::config::ServiceConfig;
use crate::error::{EnrichError, Result};
use crate::model::gene_sets::GeneSets;
pub use kegg::KeggRestClient;
pub use uniprot::UniprotRestClient;

/// Entrez Gene ID to UniProt accession lookup scoped to one taxon.
pub trait UniprotMapper {
    fn entrez_to_uniprot(&self, entrez_ids: &[String], taxon: u32) -> Result<Vec<String>>;
}

/// KEGG pathway membership for one organism, keyed by UniProt accession.
pub trait KeggSource {
    fn pathway_sets(&self, organism: &str) -> Result<GeneSets>;
}

pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("myco-enrich/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub(crate) fn get_text(client: &Client, service: &'static str, url: &str) -> Result<String> {
    debug!("GET {}", url);
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(EnrichError::service(
            service,
            format!("GET {url} returned {status}"),
        ));
    }
    Ok(response.text()?)
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Text after the first `:` (`mav:MAV_0001` -> `MAV_0001`).
pub(crate) fn strip_db_prefix(id: &str) -> &str {
    id.split_once(':').map(|(_, rest)| rest).unwrap_or(id)
}

/// External collaborators of one analysis run.
#[derive(Clone, Copy)]
pub struct Backends<'a> {
    pub orgdb: Option<&'a OrgDb>,
    pub uniprot: &'a dyn UniprotMapper,
    pub kegg: &'a dyn KeggSource,
}

impl<'a> Backends<'a> {
    pub fn orgdb(&self) -> Result<&'a OrgDb> {
        self.orgdb.ok_or_else(|| {
            EnrichError::MissingInput(
                "annotation database required (pass --orgdb <DIR> with gene_info and gene2go)"
                    .to_string(),
            )
        })
    }
}

/// Owns the live HTTP clients and the optional annotation database.
pub struct LiveServices {
    pub orgdb: Option<OrgDb>,
    pub uniprot: UniprotRestClient,
    pub kegg: KeggRestClient,
}

impl LiveServices {
    pub fn connect(config: &ServiceConfig, orgdb: Option<OrgDb>) -> Result<Self> {
        let client = build_http_client(config.timeout)?;
        Ok(Self {
            orgdb,
            uniprot: UniprotRestClient::new(
                client.clone(),
                config.uniprot_url.clone(),
                config.poll_interval,
                config.max_polls,
            ),
            kegg: KeggRestClient::new(client, config.kegg_url.clone()),
        })
    }

    pub fn backends(&self) -> Backends<'_> {
        Backends {
            orgdb: self.orgdb.as_ref(),
            uniprot: &self.uniprot,
            kegg: &self.kegg,
        }
    }
}
