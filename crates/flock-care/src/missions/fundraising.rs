use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Support raised by a trip participant against their goal, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FundraisingProgress {
    pub raised_cents: u64,
    pub goal_cents: u64,
}

impl FundraisingProgress {
    pub fn new(raised_cents: u64, goal_cents: u64) -> Self {
        Self {
            raised_cents,
            goal_cents,
        }
    }

    /// Whole percent of the goal raised, rounded half up and capped at 100.
    pub fn percent(&self) -> u8 {
        if self.goal_cents == 0 {
            return 0;
        }

        let raised = self.raised_cents as u128 * 100;
        let goal = self.goal_cents as u128;
        ((raised + goal / 2) / goal).min(100) as u8
    }

    pub fn remaining_cents(&self) -> u64 {
        self.goal_cents.saturating_sub(self.raised_cents)
    }

    pub fn is_funded(&self) -> bool {
        self.goal_cents > 0 && self.raised_cents >= self.goal_cents
    }
}

/// Scripture and prayer theme for one day of the trip. Days are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFocus {
    pub day: u16,
    pub scripture: String,
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripTimeline {
    pub departure: NaiveDate,
    pub return_date: NaiveDate,
    #[serde(default)]
    pub daily_focus: Vec<DailyFocus>,
}

impl TripTimeline {
    /// Negative once the team has departed.
    pub fn days_until_departure(&self, today: NaiveDate) -> i64 {
        (self.departure - today).num_days()
    }

    /// 1-based day of the trip, `None` outside the travel window.
    pub fn trip_day(&self, today: NaiveDate) -> Option<u16> {
        if today < self.departure || today > self.return_date {
            return None;
        }
        u16::try_from((today - self.departure).num_days() + 1).ok()
    }

    pub fn focus_for(&self, today: NaiveDate) -> Option<&DailyFocus> {
        let day = self.trip_day(today)?;
        self.daily_focus.iter().find(|focus| focus.day == day)
    }
}
