//! Member-care heuristics: engagement scoring, celebration scheduling, roster import, and the
//! aggregated care dashboard.

pub mod celebrations;
pub mod dashboard;
pub mod domain;
pub mod engagement;
pub mod roster;

pub use celebrations::{
    upcoming_celebrations, Celebration, CelebrationKind, UpcomingCelebrations,
};
pub use dashboard::CareDashboard;
pub use domain::{MemberId, MemberProfile, MembershipTier, SpiritualActivity};
pub use engagement::{EngagementInputs, EngagementLevel, EngagementScore};
pub use roster::{MemberRosterImporter, RosterImportError};
