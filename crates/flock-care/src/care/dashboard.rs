use chrono::NaiveDate;
use serde::Serialize;

use super::celebrations::{upcoming_celebrations, CelebrationKind, UpcomingCelebrations};
use super::domain::{MemberId, MemberProfile, MembershipTier};
use super::engagement::{self, EngagementLevel, EngagementScore};
use crate::missions::tracks::{recommend_track, recommendation_code, ServiceTrack, TRACK_RULES};

/// Per-member row shown on the care dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct MemberCareView {
    pub member_id: MemberId,
    pub name: String,
    pub email: String,
    pub tier: MembershipTier,
    pub engagement_score: u8,
    pub engagement_level: EngagementLevel,
    pub engagement_label: &'static str,
    pub recommended_track: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_birthday: Option<i64>,
}

impl MemberCareView {
    pub fn build(member: &MemberProfile, today: NaiveDate) -> Self {
        let EngagementScore { total, level, .. } = engagement::score(&member.engagement_inputs());
        let track = recommend_track(member.occupation.as_deref());

        Self {
            member_id: member.id.clone(),
            name: member.full_name(),
            email: member.email.clone(),
            tier: member.tier,
            engagement_score: total,
            engagement_level: level,
            engagement_label: level.label(),
            recommended_track: recommendation_code(track),
            track_label: track.map(|track| track.label()),
            days_until_birthday: member
                .date_of_birth
                .map(|date| super::celebrations::days_until(date, today)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EngagementSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub average_score: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackInterestEntry {
    pub track: ServiceTrack,
    pub track_label: &'static str,
    pub members: usize,
}

/// Aggregated member-care view over a roster for a given day.
#[derive(Debug, Clone, Serialize)]
pub struct CareDashboard {
    pub today: NaiveDate,
    pub member_count: usize,
    pub engagement: EngagementSummary,
    pub members: Vec<MemberCareView>,
    /// Low-engagement members, least engaged first.
    pub follow_up: Vec<MemberCareView>,
    pub birthdays: UpcomingCelebrations,
    pub anniversaries: UpcomingCelebrations,
    /// Recommendation counts in rule order.
    pub track_interest: Vec<TrackInterestEntry>,
    pub without_recommendation: usize,
}

impl CareDashboard {
    pub fn build(members: &[MemberProfile], today: NaiveDate) -> Self {
        let views: Vec<MemberCareView> = members
            .iter()
            .map(|member| MemberCareView::build(member, today))
            .collect();

        let mut summary = EngagementSummary::default();
        for view in &views {
            match view.engagement_level {
                EngagementLevel::High => summary.high += 1,
                EngagementLevel::Medium => summary.medium += 1,
                EngagementLevel::Low => summary.low += 1,
            }
        }
        if !views.is_empty() {
            let total: u32 = views.iter().map(|view| view.engagement_score as u32).sum();
            summary.average_score = total as f32 / views.len() as f32;
        }

        let mut follow_up: Vec<MemberCareView> = views
            .iter()
            .filter(|view| view.engagement_level == EngagementLevel::Low)
            .cloned()
            .collect();
        follow_up.sort_by(|a, b| {
            a.engagement_score
                .cmp(&b.engagement_score)
                .then_with(|| a.name.cmp(&b.name))
        });

        let track_interest = TRACK_RULES
            .iter()
            .map(|(track, _)| TrackInterestEntry {
                track: *track,
                track_label: track.label(),
                members: views
                    .iter()
                    .filter(|view| view.recommended_track == track.code())
                    .count(),
            })
            .collect();
        let without_recommendation = views
            .iter()
            .filter(|view| view.recommended_track.is_empty())
            .count();

        Self {
            today,
            member_count: views.len(),
            engagement: summary,
            follow_up,
            birthdays: upcoming_celebrations(members, CelebrationKind::Birthday, today),
            anniversaries: upcoming_celebrations(members, CelebrationKind::Anniversary, today),
            members: views,
            track_interest,
            without_recommendation,
        }
    }
}
