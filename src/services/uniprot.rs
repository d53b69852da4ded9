use std::collections::{HashMap, HashSet};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{EnrichError, Result};
use crate::services::{UniprotMapper, get_text, join_url};

pub const DEFAULT_UNIPROT_URL: &str = "https://rest.uniprot.org";

#[derive(Debug, Deserialize)]
struct JobSubmission {
    #[serde(rename = "jobId")]
    job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Finished,
    Failed,
}

pub struct UniprotRestClient {
    client: Client,
    base_url: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl UniprotRestClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        poll_interval: Duration,
        max_polls: u32,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            poll_interval,
            max_polls,
        }
    }

    fn submit(&self, entrez_ids: &[String], taxon: u32) -> Result<String> {
        let url = join_url(&self.base_url, "idmapping/run");
        let ids = entrez_ids.join(",");
        let taxon = taxon.to_string();
        let form = [
            ("from", "GeneID"),
            ("to", "UniProtKB"),
            ("ids", ids.as_str()),
            ("taxId", taxon.as_str()),
        ];
        debug!("POST {}", url);
        let response = self.client.post(&url).form(&form).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EnrichError::service(
                "UniProt",
                format!("POST {url} returned {status}: {}", body.trim()),
            ));
        }
        let job: JobSubmission = serde_json::from_str(&response.text()?)?;
        Ok(job.job_id)
    }

    fn wait(&self, job_id: &str) -> Result<()> {
        let url = join_url(&self.base_url, &format!("idmapping/status/{job_id}"));
        for attempt in 0..self.max_polls {
            let body = get_text(&self.client, "UniProt", &url)?;
            match parse_job_state(&body)? {
                JobState::Finished => return Ok(()),
                JobState::Failed => {
                    return Err(EnrichError::service(
                        "UniProt",
                        format!("ID mapping job {job_id} failed: {}", body.trim()),
                    ));
                }
                JobState::Running => {
                    debug!("ID mapping job {} running (poll {})", job_id, attempt + 1);
                    thread::sleep(self.poll_interval);
                }
            }
        }
        Err(EnrichError::service(
            "UniProt",
            format!(
                "ID mapping job {job_id} did not finish after {} polls",
                self.max_polls
            ),
        ))
    }

    fn results(&self, job_id: &str) -> Result<Vec<(String, String)>> {
        let url = join_url(
            &self.base_url,
            &format!("idmapping/uniprotkb/results/stream/{job_id}?format=tsv&fields=accession"),
        );
        parse_mapping_tsv(&get_text(&self.client, "UniProt", &url)?)
    }
}

impl UniprotMapper for UniprotRestClient {
    fn entrez_to_uniprot(&self, entrez_ids: &[String], taxon: u32) -> Result<Vec<String>> {
        if entrez_ids.is_empty() {
            return Ok(Vec::new());
        }
        info!(
            "mapping {} Entrez IDs to UniProt (taxon {})",
            entrez_ids.len(),
            taxon
        );
        let job_id = self.submit(entrez_ids, taxon)?;
        self.wait(&job_id)?;
        let pairs = self.results(&job_id)?;
        Ok(order_by_input(entrez_ids, &pairs))
    }
}

/// A finished job redirects its status URL to the results, which carry no
/// `jobStatus` field.
pub fn parse_job_state(body: &str) -> Result<JobState> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.get("results").is_some() {
        return Ok(JobState::Finished);
    }
    match value.get("jobStatus").and_then(|s| s.as_str()) {
        Some("FINISHED") => Ok(JobState::Finished),
        Some("NEW") | Some("RUNNING") => Ok(JobState::Running),
        Some(_) => Ok(JobState::Failed),
        None if value.get("messages").is_some() || value.get("errors").is_some() => {
            Ok(JobState::Failed)
        }
        None => Err(EnrichError::service(
            "UniProt",
            format!("unexpected status response: {}", body.trim()),
        )),
    }
}

/// Parses `From\tEntry` rows of the results stream.
pub fn parse_mapping_tsv(text: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || (idx == 0 && line.starts_with("From")) {
            continue;
        }
        let (from, to) = line.split_once('\t').ok_or_else(|| {
            EnrichError::service(
                "UniProt",
                format!("result line {} is not tab separated: '{}'", idx + 1, line),
            )
        })?;
        pairs.push((from.trim().to_string(), to.trim().to_string()));
    }
    Ok(pairs)
}

/// Accessions in the order of `inputs`; one-to-many hits are kept in place.
pub fn order_by_input(inputs: &[String], pairs: &[(String, String)]) -> Vec<String> {
    let mut by_from: HashMap<&str, Vec<&str>> = HashMap::new();
    for (from, to) in pairs {
        by_from.entry(from.as_str()).or_default().push(to.as_str());
    }
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut unmapped = 0usize;
    for id in inputs {
        if !seen.insert(id.as_str()) {
            continue;
        }
        match by_from.get(id.as_str()) {
            Some(hits) => out.extend(hits.iter().map(|s| s.to_string())),
            None => unmapped += 1,
        }
    }
    if unmapped > 0 {
        warn!(
            "{} of {} Entrez IDs had no UniProt accession",
            unmapped,
            seen.len()
        );
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/services/uniprot.rs"]
mod tests;
