//! Report assembly and serialization.
//!
//! Drives the whole mapping run: samples every configured block, resolves
//! the target host through every configured resolver, enriches and
//! classifies each address, and serializes the ordered row set to CSV.

use crate::config::TargetConfig;
use crate::dns::Resolver;
use crate::error::Result;
use crate::geo::IpLookup;
use crate::incident;
use crate::report::types::{ReportRow, RowSource, CSV_HEADER};
use std::collections::HashSet;
use std::path::Path;

/// Assembles the mapping report.
///
/// Generic over the lookup and resolution seams so the assembly logic
/// can be exercised without network access.
pub struct ReportBuilder<'a, L, R> {
    config: &'a TargetConfig,
    lookup: &'a L,
    resolver: &'a R,
}

impl<'a, L: IpLookup, R: Resolver> ReportBuilder<'a, L, R> {
    /// Create a builder over the given configuration and seams.
    pub fn new(config: &'a TargetConfig, lookup: &'a L, resolver: &'a R) -> Self {
        Self {
            config,
            lookup,
            resolver,
        }
    }

    /// Collect the full ordered row set.
    ///
    /// Block rows come first (active blocks, then removed, each in
    /// declared order), then resolver rows in resolver order. Resolved
    /// addresses are deduplicated across resolvers: each unique address
    /// is attributed to the first resolver that answered it. Block
    /// samples are never deduplicated, not even against resolved
    /// addresses.
    pub async fn collect(&self) -> Vec<ReportRow> {
        let mut rows = Vec::new();

        for block in self.config.blocks() {
            let ip = block.sample_ip();
            let geo = self.lookup.lookup(&ip).await;
            let flag = incident::classify(&geo.country, &geo.region, &geo.city);
            rows.push(ReportRow {
                source: RowSource::Cidr,
                status: Some(block.status),
                input: block.cidr,
                ip,
                geo,
                flag,
            });
        }

        let mut seen: HashSet<String> = HashSet::new();
        for resolver in &self.config.resolvers {
            let ips = self
                .resolver
                .resolve(resolver.address.as_deref(), &self.config.host)
                .await;
            tracing::debug!(resolver = %resolver.name, count = ips.len(), "resolved");

            for ip in ips {
                if !seen.insert(ip.clone()) {
                    continue;
                }
                let geo = self.lookup.lookup(&ip).await;
                let flag = incident::classify(&geo.country, &geo.region, &geo.city);
                rows.push(ReportRow {
                    source: RowSource::Resolved(resolver.name.clone()),
                    status: None,
                    input: self.config.host.clone(),
                    ip,
                    geo,
                    flag,
                });
            }
        }

        rows
    }
}

/// Serialize rows to a CSV file with the fixed column header.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written. This is
/// the one fatal failure of a mapping run.
pub fn write_csv<P: AsRef<Path>>(rows: &[ReportRow], path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record(row.record())?;
    }
    writer.flush()?;
    Ok(())
}
