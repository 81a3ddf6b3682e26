use serde::{Deserialize, Serialize};

/// Ministry focus areas an applicant serves in during a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceTrack {
    MedicalMissions,
    EducationYouth,
    MinistrySpiritual,
    BusinessDevelopment,
    FoodSecurity,
    /// Selectable by applicants, never recommended from an occupation.
    ConstructionCommunity,
}

impl ServiceTrack {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceTrack::MedicalMissions => "medical_missions",
            ServiceTrack::EducationYouth => "education_youth",
            ServiceTrack::MinistrySpiritual => "ministry_spiritual",
            ServiceTrack::BusinessDevelopment => "business_development",
            ServiceTrack::FoodSecurity => "food_security",
            ServiceTrack::ConstructionCommunity => "construction_community",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceTrack::MedicalMissions => "Medical Missions",
            ServiceTrack::EducationYouth => "Education & Youth",
            ServiceTrack::MinistrySpiritual => "Ministry & Spiritual Care",
            ServiceTrack::BusinessDevelopment => "Business Development",
            ServiceTrack::FoodSecurity => "Food Security",
            ServiceTrack::ConstructionCommunity => "Construction & Community",
        }
    }

    fn calling(&self) -> &'static str {
        match self {
            ServiceTrack::MedicalMissions => {
                "your care for the sick could bring healing to families who rarely see a clinic"
            }
            ServiceTrack::EducationYouth => {
                "your gift for teaching could open doors for children and young leaders"
            }
            ServiceTrack::MinistrySpiritual => {
                "your heart for shepherding could strengthen local pastors and congregations"
            }
            ServiceTrack::BusinessDevelopment => {
                "your business experience could help local entrepreneurs build lasting livelihoods"
            }
            ServiceTrack::FoodSecurity => {
                "your knowledge of growing and feeding could help communities thrive through dry seasons"
            }
            ServiceTrack::ConstructionCommunity => {
                "your willing hands could help build spaces where the community gathers"
            }
        }
    }
}

/// Ordered first-match-wins rules. Earlier groups take precedence when an occupation matches
/// keywords from several groups.
pub const TRACK_RULES: &[(ServiceTrack, &[&str])] = &[
    (
        ServiceTrack::MedicalMissions,
        &["doctor", "nurse", "medical", "health", "physician", "therapist"],
    ),
    (
        ServiceTrack::EducationYouth,
        &["teacher", "professor", "education", "tutor", "school"],
    ),
    (
        ServiceTrack::MinistrySpiritual,
        &["pastor", "minister", "missionary", "chaplain", "worship"],
    ),
    (
        ServiceTrack::BusinessDevelopment,
        &["business", "entrepreneur", "finance", "accountant", "consultant"],
    ),
    (
        ServiceTrack::FoodSecurity,
        &["agriculture", "farm", "food", "nutrition"],
    ),
];

pub fn recommend_track(occupation: Option<&str>) -> Option<ServiceTrack> {
    recommend_with(TRACK_RULES, occupation)
}

pub(crate) fn recommend_with(
    rules: &[(ServiceTrack, &[&str])],
    occupation: Option<&str>,
) -> Option<ServiceTrack> {
    let occupation = occupation?.to_lowercase();
    if occupation.trim().is_empty() {
        return None;
    }

    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| occupation.contains(keyword)))
        .map(|(track, _)| *track)
}

/// Wire code for an optional recommendation; no recommendation is the empty string.
pub fn recommendation_code(track: Option<ServiceTrack>) -> &'static str {
    track.map(|track| track.code()).unwrap_or("")
}

pub fn personalized_invitation(first_name: &str, track: Option<ServiceTrack>) -> String {
    let greeting = match first_name.trim() {
        "" => "Friend".to_string(),
        name => name.to_string(),
    };

    match track {
        Some(track) => format!(
            "{greeting}, we think {} is a great fit: {}.",
            track.label(),
            track.calling()
        ),
        None => format!(
            "{greeting}, every team needs willing hearts. Browse the service tracks and pick the one that stirs you."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommends_from_occupation_keywords() {
        assert_eq!(
            recommend_track(Some("Registered Nurse")),
            Some(ServiceTrack::MedicalMissions)
        );
        assert_eq!(
            recommend_track(Some("High School Teacher")),
            Some(ServiceTrack::EducationYouth)
        );
        assert_eq!(
            recommend_track(Some("Worship Leader")),
            Some(ServiceTrack::MinistrySpiritual)
        );
        assert_eq!(
            recommend_track(Some("Small business owner")),
            Some(ServiceTrack::BusinessDevelopment)
        );
        assert_eq!(
            recommend_track(Some("Dairy farmer")),
            Some(ServiceTrack::FoodSecurity)
        );
    }

    #[test]
    fn no_match_or_missing_occupation_yields_nothing() {
        assert_eq!(recommend_track(Some("Retired")), None);
        assert_eq!(recommend_track(None), None);
        assert_eq!(recommend_track(Some("")), None);
        assert_eq!(recommend_track(Some("   ")), None);
        assert_eq!(recommendation_code(recommend_track(Some("Retired"))), "");
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(recommend_track(Some("DOCTOR")), recommend_track(Some("doctor")));
        assert_eq!(recommend_track(Some("DOCTOR")), Some(ServiceTrack::MedicalMissions));
    }

    #[test]
    fn earlier_groups_win_ties() {
        // "school" (education) and "nurse" (medical) both match.
        assert_eq!(
            recommend_track(Some("School nurse")),
            Some(ServiceTrack::MedicalMissions)
        );
        // "health" (medical) beats "education".
        assert_eq!(
            recommend_track(Some("Health education coordinator")),
            Some(ServiceTrack::MedicalMissions)
        );
        // "minister" is tested before the business keyword "finance".
        assert_eq!(
            recommend_track(Some("Finance minister")),
            Some(ServiceTrack::MinistrySpiritual)
        );
    }

    #[test]
    fn rule_order_is_the_tie_breaker() {
        let reversed: Vec<(ServiceTrack, &[&str])> = TRACK_RULES.iter().rev().copied().collect();
        assert_eq!(
            recommend_with(&reversed, Some("School nurse")),
            Some(ServiceTrack::EducationYouth)
        );
    }

    #[test]
    fn construction_track_is_never_recommended() {
        assert!(TRACK_RULES
            .iter()
            .all(|(track, _)| *track != ServiceTrack::ConstructionCommunity));
        assert_eq!(recommend_track(Some("construction worker")), None);
    }

    #[test]
    fn invitations_mention_the_track() {
        let message = personalized_invitation("Grace", Some(ServiceTrack::MedicalMissions));
        assert!(message.starts_with("Grace, "));
        assert!(message.contains("Medical Missions"));

        let fallback = personalized_invitation(" ", None);
        assert!(fallback.starts_with("Friend, "));
    }
}
