//! In-memory report repository.

use anyhow::{bail, Result};
use log::debug;
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::domain::models::report::Report as DomainReport;
use crate::storage::traits::ReportStore;

#[derive(Clone)]
pub struct ReportRepository {
    connection: Arc<MemoryConnection>,
}

impl ReportRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl ReportStore for ReportRepository {
    fn store_report(&self, report: &DomainReport) -> Result<()> {
        let mut reports = self.connection.reports.write().unwrap();
        if reports.contains_key(&report.id) {
            bail!("report already stored: {}", report.id);
        }
        debug!("Storing report {}", report.id);
        reports.insert(report.id.clone(), report.clone());
        Ok(())
    }

    fn get_report(&self, report_id: &str) -> Result<Option<DomainReport>> {
        Ok(self
            .connection
            .reports
            .read()
            .unwrap()
            .get(report_id)
            .cloned())
    }

    fn list_reports_for_club(&self, club_id: &str) -> Result<Vec<DomainReport>> {
        let mut reports: Vec<DomainReport> = self
            .connection
            .reports
            .read()
            .unwrap()
            .values()
            .filter(|r| r.club_id == club_id)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(reports)
    }
}
