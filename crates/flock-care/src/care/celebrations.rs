use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{MemberId, MemberProfile};

pub const UPCOMING_WINDOW_DAYS: i64 = 30;
pub const THIS_WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelebrationKind {
    Birthday,
    Anniversary,
}

impl CelebrationKind {
    pub fn label(&self) -> &'static str {
        match self {
            CelebrationKind::Birthday => "Birthday",
            CelebrationKind::Anniversary => "Anniversary",
        }
    }

    fn date_for(&self, member: &MemberProfile) -> Option<NaiveDate> {
        match self {
            CelebrationKind::Birthday => member.date_of_birth,
            CelebrationKind::Anniversary => member.anniversary_date,
        }
    }
}

/// Places the month/day of `date` in `year`. 29 February lands on 1 March in common years.
fn on_year(date: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}

/// The next time the annual date comes around, counting today itself.
pub fn next_occurrence(date: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = on_year(date, today.year());
    if this_year < today {
        on_year(date, today.year() + 1)
    } else {
        this_year
    }
}

pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (next_occurrence(date, today) - today).num_days()
}

/// Age or years together being turned at the next occurrence.
///
/// Completed years are `today.year - date.year`, less one while this year's date is still
/// ahead; the announcement adds one to that.
pub fn turning(date: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - date.year();
    if (today.month(), today.day()) < (date.month(), date.day()) {
        years -= 1;
    }
    years + 1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub member_id: MemberId,
    pub member_name: String,
    pub kind: CelebrationKind,
    pub date: NaiveDate,
    pub next_occurrence: NaiveDate,
    pub days_until: i64,
    pub turning: i32,
}

impl Celebration {
    /// `None` when the member has no date on file for `kind`.
    pub fn for_member(
        member: &MemberProfile,
        kind: CelebrationKind,
        today: NaiveDate,
    ) -> Option<Self> {
        let date = kind.date_for(member)?;
        let next = next_occurrence(date, today);
        Some(Self {
            member_id: member.id.clone(),
            member_name: member.full_name(),
            kind,
            date,
            next_occurrence: next,
            days_until: (next - today).num_days(),
            turning: turning(date, today),
        })
    }

    pub fn is_upcoming(&self) -> bool {
        (0..=UPCOMING_WINDOW_DAYS).contains(&self.days_until)
    }

    pub fn is_this_week(&self) -> bool {
        (0..=THIS_WEEK_DAYS).contains(&self.days_until)
    }
}

/// Celebrations bucketed by proximity. Entries in `this_week` also appear in `next_30_days`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingCelebrations {
    pub this_week: Vec<Celebration>,
    pub next_30_days: Vec<Celebration>,
}

pub fn upcoming_celebrations<'a, I>(
    members: I,
    kind: CelebrationKind,
    today: NaiveDate,
) -> UpcomingCelebrations
where
    I: IntoIterator<Item = &'a MemberProfile>,
{
    let mut next_30_days: Vec<Celebration> = members
        .into_iter()
        .filter_map(|member| Celebration::for_member(member, kind, today))
        .filter(Celebration::is_upcoming)
        .collect();

    next_30_days.sort_by(|a, b| {
        a.days_until
            .cmp(&b.days_until)
            .then_with(|| a.member_name.cmp(&b.member_name))
    });

    let this_week = next_30_days
        .iter()
        .filter(|celebration| celebration.is_this_week())
        .cloned()
        .collect();

    UpcomingCelebrations {
        this_week,
        next_30_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::care::domain::{MembershipTier, SpiritualActivity};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn member(id: &str, name: &str, birthday: Option<NaiveDate>) -> MemberProfile {
        MemberProfile {
            id: MemberId(id.to_string()),
            first_name: name.to_string(),
            last_name: String::new(),
            email: format!("{id}@example.org"),
            occupation: None,
            date_of_birth: birthday,
            anniversary_date: None,
            membership_start: None,
            tier: MembershipTier::Free,
            activity: SpiritualActivity::default(),
        }
    }

    #[test]
    fn birthday_later_this_month_is_this_week() {
        let today = date(2025, 6, 10);
        let birthday = date(1990, 6, 15);
        assert_eq!(next_occurrence(birthday, today), date(2025, 6, 15));
        assert_eq!(days_until(birthday, today), 5);

        let celebration =
            Celebration::for_member(&member("m1", "Ada", Some(birthday)), CelebrationKind::Birthday, today)
                .expect("birthday on file");
        assert!(celebration.is_this_week());
        assert!(celebration.is_upcoming());
    }

    #[test]
    fn passed_birthday_rolls_into_next_year() {
        let today = date(2025, 6, 10);
        let birthday = date(1990, 6, 1);
        assert_eq!(next_occurrence(birthday, today), date(2026, 6, 1));
        let days = days_until(birthday, today);
        assert!(days > 300, "expected a roll-over, got {days}");

        let celebration =
            Celebration::for_member(&member("m1", "Ada", Some(birthday)), CelebrationKind::Birthday, today)
                .expect("birthday on file");
        assert!(!celebration.is_upcoming());
    }

    #[test]
    fn window_edges_are_inclusive() {
        let today = date(2025, 6, 10);
        let at = |month: u32, day: u32| {
            Celebration::for_member(
                &member("m1", "Ada", Some(date(1990, month, day))),
                CelebrationKind::Birthday,
                today,
            )
            .expect("birthday on file")
        };

        let seventh = at(6, 17);
        assert_eq!(seventh.days_until, 7);
        assert!(seventh.is_this_week());
        assert!(seventh.is_upcoming());

        let eighth = at(6, 18);
        assert_eq!(eighth.days_until, 8);
        assert!(!eighth.is_this_week());
        assert!(eighth.is_upcoming());

        let thirtieth = at(7, 10);
        assert_eq!(thirtieth.days_until, 30);
        assert!(thirtieth.is_upcoming());

        let thirty_first = at(7, 11);
        assert_eq!(thirty_first.days_until, 31);
        assert!(!thirty_first.is_upcoming());
        assert!(!thirty_first.is_this_week());
    }

    #[test]
    fn buckets_follow_window_edges() {
        let today = date(2025, 6, 10);
        let members = vec![
            member("m1", "Ada", Some(date(1990, 6, 17))),
            member("m2", "Ben", Some(date(1990, 6, 18))),
            member("m3", "Cal", Some(date(1990, 7, 10))),
            member("m4", "Dee", Some(date(1990, 7, 11))),
        ];

        let upcoming = upcoming_celebrations(&members, CelebrationKind::Birthday, today);
        let names = |list: &[Celebration]| {
            list.iter()
                .map(|c| c.member_name.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&upcoming.this_week), vec!["Ada"]);
        assert_eq!(names(&upcoming.next_30_days), vec!["Ada", "Ben", "Cal"]);
    }

    #[test]
    fn today_counts_as_zero_days() {
        let today = date(2025, 6, 10);
        assert_eq!(days_until(date(2001, 6, 10), today), 0);
    }

    #[test]
    fn turning_adds_one_to_completed_years() {
        let today = date(2025, 6, 10);
        assert_eq!(turning(date(1990, 6, 15), today), 35);
        assert_eq!(turning(date(1990, 6, 1), today), 36);
        assert_eq!(turning(date(1990, 6, 10), today), 36);
    }

    #[test]
    fn leap_day_falls_on_first_of_march_in_common_years() {
        let leap_birthday = date(2000, 2, 29);
        assert_eq!(next_occurrence(leap_birthday, date(2025, 2, 10)), date(2025, 3, 1));
        assert_eq!(next_occurrence(leap_birthday, date(2027, 12, 1)), date(2028, 2, 29));
    }

    #[test]
    fn members_without_dates_are_skipped() {
        let today = date(2025, 6, 10);
        let members = vec![
            member("m1", "Ada", Some(date(1980, 6, 12))),
            member("m2", "Ben", None),
            member("m3", "Cal", Some(date(1975, 7, 1))),
            member("m4", "Dee", Some(date(1999, 8, 30))),
        ];

        let upcoming = upcoming_celebrations(&members, CelebrationKind::Birthday, today);
        let week: Vec<_> = upcoming.this_week.iter().map(|c| c.member_name.as_str()).collect();
        let month: Vec<_> = upcoming
            .next_30_days
            .iter()
            .map(|c| c.member_name.as_str())
            .collect();
        assert_eq!(week, vec!["Ada"]);
        assert_eq!(month, vec!["Ada", "Cal"]);
    }

    #[test]
    fn anniversaries_read_the_anniversary_column() {
        let today = date(2025, 6, 10);
        let mut couple = member("m1", "Ada", Some(date(1980, 1, 1)));
        couple.anniversary_date = Some(date(2005, 6, 14));

        let upcoming = upcoming_celebrations([&couple], CelebrationKind::Anniversary, today);
        assert_eq!(upcoming.this_week.len(), 1);
        assert_eq!(upcoming.this_week[0].turning, 20);
    }
}
