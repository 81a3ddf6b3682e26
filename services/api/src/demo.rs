use crate::infra::{InMemoryNotificationPublisher, InMemoryTripApplicationRepository};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use flock_care::care::celebrations::{CelebrationKind, UpcomingCelebrations};
use flock_care::care::{
    CareDashboard, MemberId, MemberProfile, MemberRosterImporter, MembershipTier,
    SpiritualActivity,
};
use flock_care::error::AppError;
use flock_care::missions::applications::{
    ReviewDecision, TripApplicationService, TripApplicationSubmission,
};
use flock_care::missions::{
    personalized_invitation, recommend_track, DailyFocus, FundraisingProgress, TripTimeline,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// Member export (CSV with header row)
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Include one line per member in the output
    #[arg(long)]
    pub(crate) list_members: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Occupation as typed on the application form
    #[arg(required = true)]
    pub(crate) occupation: Vec<String>,
    /// First name used to personalize the invitation
    #[arg(long)]
    pub(crate) first_name: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the mission trip application portion of the demo.
    #[arg(long)]
    pub(crate) skip_application: bool,
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let DashboardArgs {
        roster,
        today,
        list_members,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let members = MemberRosterImporter::from_path(&roster)?;
    let dashboard = CareDashboard::build(&members, today);
    render_dashboard(&dashboard, list_members);
    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs) {
    let occupation = args.occupation.join(" ");
    let track = recommend_track(Some(&occupation));

    match track {
        Some(track) => println!("Recommended track: {} ({})", track.label(), track.code()),
        None => println!("Recommended track: none"),
    }
    println!(
        "{}",
        personalized_invitation(args.first_name.as_deref().unwrap_or(""), track)
    );
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        skip_application,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Member care demo");
    let members = demo_roster(today);
    let dashboard = CareDashboard::build(&members, today);
    render_dashboard(&dashboard, true);

    let trip = demo_trip(today);
    println!("\nMission trip countdown");
    println!(
        "- Departs {} ({} days), returns {}",
        trip.departure,
        trip.days_until_departure(today),
        trip.return_date
    );
    match trip.focus_for(today) {
        Some(focus) => println!("- Today's focus: {} ({})", focus.theme, focus.scripture),
        None => println!("- Daily focus begins on departure day"),
    }

    println!("\nFundraising");
    for (name, progress) in [
        ("Grace Hopper", FundraisingProgress::new(350_000, 350_000)),
        ("Sam Ortiz", FundraisingProgress::new(96_000, 350_000)),
    ] {
        if progress.is_funded() {
            println!("- {}: fully funded", name);
        } else {
            println!(
                "- {}: {}% raised, ${:.2} remaining",
                name,
                progress.percent(),
                progress.remaining_cents() as f64 / 100.0
            );
        }
    }

    if skip_application {
        return Ok(());
    }

    println!("\nMission trip application demo");
    let repository = Arc::new(InMemoryTripApplicationRepository::default());
    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let service = TripApplicationService::new(repository, notifier.clone());

    let submission = TripApplicationSubmission {
        full_name: "Grace Hopper".to_string(),
        email: "grace@example.org".to_string(),
        occupation: Some("Registered Nurse".to_string()),
        preferred_track: None,
        member_id: Some(MemberId("m-1".to_string())),
    };

    let record = match service.submit(submission) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    let view = record.status_view();
    println!(
        "- Received application {} -> status {}",
        view.application_id.0, view.status
    );
    println!(
        "  Assigned track: {} ({:?})",
        view.track_label.unwrap_or("none"),
        view.track_source
    );
    println!("  Invitation: {}", view.invitation);

    match service.review(&record.applicant.application_id, ReviewDecision::Accept) {
        Ok(reviewed) => println!("  Review decision: {}", reviewed.status.label()),
        Err(err) => println!("  Review unavailable: {}", err),
    }

    let events = notifier.events();
    if events.is_empty() {
        println!("  Notifications: none dispatched");
    } else {
        println!("  Notifications:");
        for event in events {
            println!("    - template={} -> {}", event.template, event.recipient);
        }
    }

    Ok(())
}

pub(crate) fn render_dashboard(dashboard: &CareDashboard, list_members: bool) {
    println!(
        "Care dashboard for {} ({} members)",
        dashboard.today, dashboard.member_count
    );

    let engagement = &dashboard.engagement;
    println!(
        "\nEngagement: {} high | {} medium | {} low | average {:.1}",
        engagement.high, engagement.medium, engagement.low, engagement.average_score
    );

    if dashboard.follow_up.is_empty() {
        println!("\nFollow-up: none");
    } else {
        println!("\nFollow-up (low engagement)");
        for view in &dashboard.follow_up {
            println!("- {} <{}>: score {}", view.name, view.email, view.engagement_score);
        }
    }

    render_celebrations(CelebrationKind::Birthday, &dashboard.birthdays);
    render_celebrations(CelebrationKind::Anniversary, &dashboard.anniversaries);

    println!("\nService track interest");
    for entry in &dashboard.track_interest {
        println!("- {}: {}", entry.track_label, entry.members);
    }
    println!("- No recommendation: {}", dashboard.without_recommendation);

    if list_members {
        println!("\nMembers");
        for view in &dashboard.members {
            println!(
                "- {} | {} | {} | {} ({}) | track {}",
                view.member_id.0,
                view.name,
                view.tier.label(),
                view.engagement_score,
                view.engagement_label,
                if view.recommended_track.is_empty() {
                    "-"
                } else {
                    view.recommended_track
                }
            );
        }
    }
}

fn render_celebrations(kind: CelebrationKind, upcoming: &UpcomingCelebrations) {
    let title = kind.label();
    let verb = match kind {
        CelebrationKind::Birthday => "turning",
        CelebrationKind::Anniversary => "celebrating year",
    };

    if upcoming.next_30_days.is_empty() {
        println!("\n{title} celebrations: none in the next 30 days");
        return;
    }

    println!(
        "\n{title} celebrations ({} this week, {} in the next 30 days)",
        upcoming.this_week.len(),
        upcoming.next_30_days.len()
    );
    for celebration in &upcoming.next_30_days {
        let when = match celebration.days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            days => format!("in {days} days"),
        };
        println!(
            "- {} {} on {}, {} {}",
            celebration.member_name, when, celebration.next_occurrence, verb, celebration.turning
        );
    }
}

fn demo_roster(today: NaiveDate) -> Vec<MemberProfile> {
    let years_ago = |years: i64, offset_days: i64| {
        today
            .checked_sub_signed(Duration::days(365 * years))
            .and_then(|date| date.checked_add_signed(Duration::days(offset_days)))
            .unwrap_or(today)
    };

    vec![
        MemberProfile {
            id: MemberId("m-1".to_string()),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.org".to_string(),
            occupation: Some("Registered Nurse".to_string()),
            date_of_birth: Some(years_ago(40, 3)),
            anniversary_date: Some(years_ago(15, 20)),
            membership_start: Some(years_ago(6, 0)),
            tier: MembershipTier::Covenant,
            activity: SpiritualActivity {
                devotionals_read: Some(12),
                journal_entries: Some(4),
                prayers_submitted: Some(5),
                primary_gift: Some("Mercy".to_string()),
                current_season: Some("Flourishing".to_string()),
            },
        },
        MemberProfile {
            id: MemberId("m-2".to_string()),
            first_name: "Sam".to_string(),
            last_name: "Ortiz".to_string(),
            email: "sam@example.org".to_string(),
            occupation: Some("Middle school teacher".to_string()),
            date_of_birth: Some(years_ago(29, 12)),
            anniversary_date: None,
            membership_start: Some(years_ago(2, 0)),
            tier: MembershipTier::Partner,
            activity: SpiritualActivity {
                devotionals_read: Some(4),
                journal_entries: Some(1),
                prayers_submitted: Some(2),
                primary_gift: Some("Teaching".to_string()),
                current_season: None,
            },
        },
        MemberProfile {
            id: MemberId("m-3".to_string()),
            first_name: "Lena".to_string(),
            last_name: "Kim".to_string(),
            email: "lena@example.org".to_string(),
            occupation: Some("Retired".to_string()),
            date_of_birth: Some(years_ago(74, -40)),
            anniversary_date: Some(years_ago(50, 1)),
            membership_start: Some(years_ago(30, 0)),
            tier: MembershipTier::Free,
            activity: SpiritualActivity::default(),
        },
    ]
}

fn demo_trip(today: NaiveDate) -> TripTimeline {
    let departure = today + Duration::days(45);
    TripTimeline {
        departure,
        return_date: departure + Duration::days(9),
        daily_focus: vec![
            DailyFocus {
                day: 1,
                scripture: "Isaiah 6:8".to_string(),
                theme: "Here am I, send me".to_string(),
            },
            DailyFocus {
                day: 2,
                scripture: "Matthew 25:40".to_string(),
                theme: "Serving the least of these".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_roster_covers_every_band() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).expect("valid date");
        let dashboard = CareDashboard::build(&demo_roster(today), today);
        assert_eq!(dashboard.engagement.high, 1);
        assert_eq!(dashboard.engagement.medium, 1);
        assert_eq!(dashboard.engagement.low, 1);
        assert_eq!(
            dashboard
                .members
                .iter()
                .map(|view| view.recommended_track)
                .collect::<Vec<_>>(),
            vec!["medical_missions", "education_youth", ""]
        );
    }

    #[test]
    fn demo_runs_end_to_end() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).expect("valid date");
        run_demo(DemoArgs {
            today: Some(today),
            skip_application: false,
        })
        .expect("demo completes");
    }
}
