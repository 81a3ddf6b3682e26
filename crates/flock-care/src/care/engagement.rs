use serde::{Deserialize, Serialize};

use super::domain::SpiritualActivity;

const DEVOTIONAL_POINTS: u32 = 5;
const DEVOTIONAL_CAP: u32 = 30;
const JOURNAL_POINTS: u32 = 10;
const JOURNAL_CAP: u32 = 30;
const PRAYER_POINTS: u32 = 5;
const PRAYER_CAP: u32 = 20;
const PRIMARY_GIFT_POINTS: u32 = 10;
const CURRENT_SEASON_POINTS: u32 = 10;
const MAX_SCORE: u32 = 100;

const HIGH_THRESHOLD: u8 = 70;
const MEDIUM_THRESHOLD: u8 = 40;

/// Normalized counters fed to the scorer. Absent counts are already zero here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementInputs {
    pub devotionals: u32,
    pub journal_entries: u32,
    pub prayers: u32,
    pub has_primary_gift: bool,
    pub has_current_season: bool,
}

impl From<&SpiritualActivity> for EngagementInputs {
    fn from(activity: &SpiritualActivity) -> Self {
        Self {
            devotionals: activity.devotionals_read.unwrap_or(0),
            journal_entries: activity.journal_entries.unwrap_or(0),
            prayers: activity.prayers_submitted.unwrap_or(0),
            has_primary_gift: is_set(activity.primary_gift.as_deref()),
            has_current_season: is_set(activity.current_season.as_deref()),
        }
    }
}

fn is_set(value: Option<&str>) -> bool {
    value.map(|raw| !raw.trim().is_empty()).unwrap_or(false)
}

/// Display band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
}

impl EngagementLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EngagementLevel::High => "High",
            EngagementLevel::Medium => "Medium",
            EngagementLevel::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementFactor {
    Devotionals,
    JournalEntries,
    Prayers,
    PrimaryGift,
    CurrentSeason,
}

/// Points contributed by one factor, kept so dashboards can explain a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementComponent {
    pub factor: EngagementFactor,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementScore {
    pub total: u8,
    pub level: EngagementLevel,
    pub components: Vec<EngagementComponent>,
}

fn capped(count: u32, per_item: u32, cap: u32) -> u32 {
    count.saturating_mul(per_item).min(cap)
}

/// Weighted, capped sum of a member's activity, bounded to 0..=100.
pub fn score(inputs: &EngagementInputs) -> EngagementScore {
    let mut components = Vec::with_capacity(5);

    let devotionals = capped(inputs.devotionals, DEVOTIONAL_POINTS, DEVOTIONAL_CAP);
    components.push(EngagementComponent {
        factor: EngagementFactor::Devotionals,
        points: devotionals as u8,
        notes: format!("{} devotional(s) read", inputs.devotionals),
    });

    let journal = capped(inputs.journal_entries, JOURNAL_POINTS, JOURNAL_CAP);
    components.push(EngagementComponent {
        factor: EngagementFactor::JournalEntries,
        points: journal as u8,
        notes: format!("{} journal entr(ies)", inputs.journal_entries),
    });

    let prayers = capped(inputs.prayers, PRAYER_POINTS, PRAYER_CAP);
    components.push(EngagementComponent {
        factor: EngagementFactor::Prayers,
        points: prayers as u8,
        notes: format!("{} prayer(s) submitted", inputs.prayers),
    });

    let gift = if inputs.has_primary_gift {
        PRIMARY_GIFT_POINTS
    } else {
        0
    };
    components.push(EngagementComponent {
        factor: EngagementFactor::PrimaryGift,
        points: gift as u8,
        notes: if inputs.has_primary_gift {
            "primary spiritual gift recorded".to_string()
        } else {
            "no primary spiritual gift recorded".to_string()
        },
    });

    let season = if inputs.has_current_season {
        CURRENT_SEASON_POINTS
    } else {
        0
    };
    components.push(EngagementComponent {
        factor: EngagementFactor::CurrentSeason,
        points: season as u8,
        notes: if inputs.has_current_season {
            "current season recorded".to_string()
        } else {
            "no current season recorded".to_string()
        },
    });

    let total = (devotionals + journal + prayers + gift + season).min(MAX_SCORE) as u8;

    EngagementScore {
        total,
        level: EngagementLevel::from_score(total),
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(d: u32, j: u32, p: u32, g: bool, s: bool) -> EngagementInputs {
        EngagementInputs {
            devotionals: d,
            journal_entries: j,
            prayers: p,
            has_primary_gift: g,
            has_current_season: s,
        }
    }

    #[test]
    fn empty_activity_scores_zero() {
        let result = score(&inputs(0, 0, 0, false, false));
        assert_eq!(result.total, 0);
        assert_eq!(result.level, EngagementLevel::Low);
    }

    #[test]
    fn every_term_at_cap_scores_one_hundred() {
        let result = score(&inputs(6, 3, 4, true, true));
        assert_eq!(result.total, 100);
        assert_eq!(result.level, EngagementLevel::High);
    }

    #[test]
    fn single_items_use_their_weights() {
        assert_eq!(score(&inputs(1, 0, 0, false, false)).total, 5);
        assert_eq!(score(&inputs(0, 1, 0, false, false)).total, 10);
        assert_eq!(score(&inputs(0, 0, 1, false, false)).total, 5);
        assert_eq!(score(&inputs(0, 0, 0, true, false)).total, 10);
        assert_eq!(score(&inputs(0, 0, 0, false, true)).total, 10);
    }

    #[test]
    fn huge_counters_saturate_instead_of_overflowing() {
        let result = score(&inputs(u32::MAX, u32::MAX, u32::MAX, true, true));
        assert_eq!(result.total, 100);
    }

    #[test]
    fn score_stays_within_bounds() {
        for d in 0..10 {
            for j in 0..5 {
                for p in 0..6 {
                    for (g, s) in [(false, false), (true, false), (false, true), (true, true)] {
                        let total = score(&inputs(d, j, p, g, s)).total;
                        assert!(total <= 100, "score {total} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn band_thresholds_are_inclusive_at_the_lower_edge() {
        assert_eq!(EngagementLevel::from_score(70), EngagementLevel::High);
        assert_eq!(EngagementLevel::from_score(69), EngagementLevel::Medium);
        assert_eq!(EngagementLevel::from_score(40), EngagementLevel::Medium);
        assert_eq!(EngagementLevel::from_score(39), EngagementLevel::Low);
    }

    #[test]
    fn missing_counts_and_blank_labels_count_as_unset() {
        let activity = SpiritualActivity {
            devotionals_read: None,
            journal_entries: Some(2),
            prayers_submitted: None,
            primary_gift: Some("   ".to_string()),
            current_season: Some("Rebuilding".to_string()),
        };
        let normalized = EngagementInputs::from(&activity);
        assert_eq!(normalized, inputs(0, 2, 0, false, true));
        assert_eq!(score(&normalized).total, 30);
    }

    #[test]
    fn components_sum_to_total() {
        let result = score(&inputs(3, 1, 2, true, false));
        let sum: u32 = result.components.iter().map(|c| c.points as u32).sum();
        assert_eq!(sum, result.total as u32);
        assert_eq!(result.total, 45);
        assert_eq!(result.level, EngagementLevel::Medium);
    }

    #[test]
    fn scoring_is_repeatable() {
        let input = inputs(4, 2, 1, false, true);
        assert_eq!(score(&input), score(&input));
    }
}
