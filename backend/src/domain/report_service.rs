//! Report generation.
//!
//! Reports are immutable snapshots: generation aggregates live data from
//! the club and event services, renders it into a JSON content document
//! and stores the result. There is no update or delete; regenerating over
//! the same inputs produces a new report.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::authorization_service::{Action, AuthorizationService};
use crate::domain::club_service::ClubService;
use crate::domain::commands::reports::GenerateReportCommand;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::event_service::EventService;
use crate::domain::mappers::ReportMapper;
use crate::domain::models::report::{Report as DomainReport, ReportKind, Semester};
use crate::domain::models::user::UserRole;
use crate::domain::session::Session;
use crate::storage::traits::{ReportStore, UserStore};

/// Content of a MemberStatistics report
#[derive(Debug, Serialize)]
struct MemberStatisticsContent {
    active_members: usize,
    inactive_members: usize,
    role_breakdown: shared::RoleBreakdown,
}

/// One event's outcome inside an EventOutcomes report
#[derive(Debug, Serialize)]
struct EventOutcomeRow {
    event_id: String,
    name: String,
    date: String,
    registered: usize,
    attended: usize,
    absent: usize,
    attendance_rate: f64,
}

/// Content of an EventOutcomes report
#[derive(Debug, Serialize)]
struct EventOutcomesContent {
    events: Vec<EventOutcomeRow>,
}

/// Content of an ActivityTracking report
#[derive(Debug, Serialize)]
struct ActivityTrackingContent {
    events_held: usize,
    total_registrations: usize,
    overall_attendance_rate: f64,
}

/// Content of a ClubLeadership report
#[derive(Debug, Serialize)]
struct ClubLeadershipContent {
    chairman: Option<String>,
    vice_chairmen: Vec<String>,
    team_leaders: Vec<String>,
}

/// Service for generating and retrieving report snapshots
#[derive(Clone)]
pub struct ReportService {
    report_store: Arc<dyn ReportStore>,
    club_service: ClubService,
    event_service: EventService,
    user_store: Arc<dyn UserStore>,
    authorization: AuthorizationService,
}

impl ReportService {
    /// Create a new ReportService
    pub fn new(
        report_store: Arc<dyn ReportStore>,
        club_service: ClubService,
        event_service: EventService,
        user_store: Arc<dyn UserStore>,
        authorization: AuthorizationService,
    ) -> Self {
        Self {
            report_store,
            club_service,
            event_service,
            user_store,
            authorization,
        }
    }

    /// Generate a report snapshot for one club and semester.
    ///
    /// Aggregation reads go through the club and event services; any
    /// failure inside aggregation or serialization comes back as
    /// `ReportGenerationFailed` rather than propagating raw.
    pub fn generate(
        &self,
        actor: &Session,
        command: GenerateReportCommand,
    ) -> DomainResult<shared::Report> {
        info!(
            "Generating {} report for club {} ({})",
            command.kind, command.club_id, command.semester
        );

        self.authorization
            .ensure(actor.role, Action::GenerateReport)?;

        let semester = Semester::parse(&command.semester)
            .map_err(|e| DomainError::invalid_parameters("semester", e.to_string()))?;

        let club = self.club_service.get_club(&command.club_id)?;

        self.user_store
            .get_user(&command.author_id)
            .map_err(|e| DomainError::data_integrity("generate_report", e))?
            .ok_or_else(|| DomainError::UserNotFound {
                user_id: command.author_id.clone(),
            })?;

        let content = self
            .render_content(command.kind, &club, semester)
            .map_err(|e| DomainError::ReportGenerationFailed {
                kind: command.kind,
                cause: e.to_string(),
            })?;

        let report = DomainReport {
            id: DomainReport::generate_id(),
            title: format!("{} - {} ({})", command.kind, club.name, semester),
            kind: command.kind,
            content,
            semester: semester.to_string(),
            club_id: club.id,
            author_id: command.author_id,
            generated_at: Utc::now(),
        };

        self.report_store
            .store_report(&report)
            .map_err(|e| DomainError::data_integrity("generate_report", e))?;

        info!("Generated report: {} with ID: {}", report.title, report.id);

        Ok(ReportMapper::to_dto(report))
    }

    /// Get a report by ID, content included
    pub fn get_report(&self, report_id: &str) -> DomainResult<shared::Report> {
        debug!("Getting report: {}", report_id);

        let report = self
            .report_store
            .get_report(report_id)
            .map_err(|e| DomainError::data_integrity("get_report", e))?
            .ok_or_else(|| DomainError::ReportNotFound {
                report_id: report_id.to_string(),
            })?;

        Ok(ReportMapper::to_dto(report))
    }

    /// List one club's reports, newest first, without their content
    pub fn get_summaries(&self, club_id: &str) -> DomainResult<Vec<shared::ReportSummary>> {
        debug!("Listing report summaries for club {}", club_id);

        let reports = self
            .report_store
            .list_reports_for_club(club_id)
            .map_err(|e| DomainError::data_integrity("get_summaries", e))?;

        Ok(reports.into_iter().map(ReportMapper::to_summary).collect())
    }

    /// Render the JSON content document for one report kind.
    fn render_content(
        &self,
        kind: ReportKind,
        club: &shared::Club,
        semester: Semester,
    ) -> anyhow::Result<String> {
        match kind {
            ReportKind::MemberStatistics => {
                let stats = self.club_service.compute_statistics(&club.id)?;
                let content = MemberStatisticsContent {
                    active_members: stats.active_members,
                    inactive_members: stats.inactive_members,
                    role_breakdown: stats.role_breakdown,
                };
                Ok(serde_json::to_string(&content)?)
            }
            ReportKind::EventOutcomes => {
                let mut rows = Vec::new();
                for event in self.events_in_semester(&club.id, semester)? {
                    let stats = self.event_service.compute_statistics(&event.id)?;
                    rows.push(EventOutcomeRow {
                        event_id: event.id,
                        name: event.name,
                        date: event.date,
                        registered: stats.registered,
                        attended: stats.attended,
                        absent: stats.absent,
                        attendance_rate: stats.attendance_rate,
                    });
                }
                Ok(serde_json::to_string(&EventOutcomesContent { events: rows })?)
            }
            ReportKind::ActivityTracking => {
                let mut events_held = 0;
                let mut total_registrations = 0;
                let mut total_attended = 0;
                for event in self.events_in_semester(&club.id, semester)? {
                    let stats = self.event_service.compute_statistics(&event.id)?;
                    events_held += 1;
                    total_registrations += stats.registered;
                    total_attended += stats.attended;
                }
                let overall_attendance_rate = if total_registrations == 0 {
                    0.0
                } else {
                    total_attended as f64 / total_registrations as f64
                };
                let content = ActivityTrackingContent {
                    events_held,
                    total_registrations,
                    overall_attendance_rate,
                };
                Ok(serde_json::to_string(&content)?)
            }
            ReportKind::ClubLeadership => {
                let users = self.user_store.list_users()?;
                // Deactivated accounts keep their role on file but are
                // not part of the current leadership
                let leadership: Vec<_> = users
                    .iter()
                    .filter(|user| user.active && user.is_member_of(&club.id))
                    .collect();
                let content = ClubLeadershipContent {
                    chairman: leadership
                        .iter()
                        .find(|user| user.role == UserRole::Chairman)
                        .map(|user| user.full_name.clone()),
                    vice_chairmen: leadership
                        .iter()
                        .filter(|user| user.role == UserRole::ViceChairman)
                        .map(|user| user.full_name.clone())
                        .collect(),
                    team_leaders: leadership
                        .iter()
                        .filter(|user| user.role == UserRole::TeamLeader)
                        .map(|user| user.full_name.clone())
                        .collect(),
                };
                Ok(serde_json::to_string(&content)?)
            }
        }
    }

    /// The club's events whose date falls inside the semester window.
    fn events_in_semester(
        &self,
        club_id: &str,
        semester: Semester,
    ) -> anyhow::Result<Vec<shared::Event>> {
        let mut in_window = Vec::new();
        for event in self.event_service.list_events_by_club(club_id)? {
            let date: DateTime<Utc> = event.date.parse()?;
            if semester.contains(date) {
                in_window.push(event);
            }
        }
        Ok(in_window)
    }
}
