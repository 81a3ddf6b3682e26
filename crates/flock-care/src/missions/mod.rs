//! Short-term mission trip support: service-track recommendation, fundraising progress, the
//! trip's daily focus timeline, and applicant intake.

pub mod applications;
pub mod fundraising;
pub mod tracks;

pub use fundraising::{DailyFocus, FundraisingProgress, TripTimeline};
pub use tracks::{personalized_invitation, recommend_track, ServiceTrack, TRACK_RULES};
