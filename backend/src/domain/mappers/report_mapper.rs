//! Conversions from domain report types to their boundary projections.

use crate::domain::models::report::{Report as DomainReport, ReportKind as DomainKind};
use shared::{Report as SharedReport, ReportKind as SharedKind, ReportSummary};

/// Mapper to convert domain report models into shared DTOs.
pub struct ReportMapper;

impl ReportMapper {
    pub fn kind_to_dto(kind: DomainKind) -> SharedKind {
        match kind {
            DomainKind::MemberStatistics => SharedKind::MemberStatistics,
            DomainKind::EventOutcomes => SharedKind::EventOutcomes,
            DomainKind::ActivityTracking => SharedKind::ActivityTracking,
            DomainKind::ClubLeadership => SharedKind::ClubLeadership,
        }
    }

    /// Convert a domain report to a shared Report DTO, content included.
    pub fn to_dto(domain: DomainReport) -> SharedReport {
        SharedReport {
            id: domain.id,
            title: domain.title,
            kind: Self::kind_to_dto(domain.kind),
            club_id: domain.club_id,
            semester: domain.semester,
            author_id: domain.author_id,
            generated_at: domain.generated_at.to_rfc3339(),
            content: domain.content,
        }
    }

    /// Convert a domain report to its listing projection without content.
    pub fn to_summary(domain: DomainReport) -> ReportSummary {
        ReportSummary {
            id: domain.id,
            title: domain.title,
            kind: Self::kind_to_dto(domain.kind),
            club_id: domain.club_id,
            semester: domain.semester,
            author_id: domain.author_id,
            generated_at: domain.generated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_report() -> DomainReport {
        DomainReport {
            id: "report::1".to_string(),
            title: "Member Statistics - Robotics (2026-Spring)".to_string(),
            kind: DomainKind::MemberStatistics,
            content: r#"{"active_members":12}"#.to_string(),
            semester: "2026-Spring".to_string(),
            club_id: "club::1".to_string(),
            author_id: "user::1".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_drops_content_but_keeps_metadata() {
        let report = sample_report();
        let dto = ReportMapper::to_dto(report.clone());
        let summary = ReportMapper::to_summary(report);

        assert_eq!(dto.content, r#"{"active_members":12}"#);
        assert_eq!(summary.id, dto.id);
        assert_eq!(summary.title, dto.title);
        assert_eq!(summary.kind, SharedKind::MemberStatistics);
        assert_eq!(summary.generated_at, dto.generated_at);
    }
}
