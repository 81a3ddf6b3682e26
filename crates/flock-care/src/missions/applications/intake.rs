use super::domain::{TripApplicant, TripApplicationId, TripApplicationSubmission};

/// Validation errors raised while accepting a submission.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("full name is required")]
    MissingName,
    #[error("'{email}' is not a valid e-mail address")]
    InvalidEmail { email: String },
}

/// Normalizes a submission into an applicant, leaving the id for the service to assign.
pub(crate) fn applicant_from_submission(
    submission: TripApplicationSubmission,
) -> Result<TripApplicant, IntakeViolation> {
    let full_name = submission
        .full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if full_name.is_empty() {
        return Err(IntakeViolation::MissingName);
    }

    let email = submission.email.trim().to_ascii_lowercase();
    if !is_plausible_email(&email) {
        return Err(IntakeViolation::InvalidEmail {
            email: submission.email,
        });
    }

    let occupation = submission
        .occupation
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    Ok(TripApplicant {
        application_id: TripApplicationId(String::new()),
        full_name,
        email,
        occupation,
        preferred_track: submission.preferred_track,
        member_id: submission.member_id,
    })
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
