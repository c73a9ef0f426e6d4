// ============================================================================
// FEEDBACK FORM VIEWMODEL - Customer feedback checks and star rating
// ============================================================================
// The form posts natively; these checks only decide whether the browser may
// submit it.
// ============================================================================

use crate::utils::format::escape_html;
use crate::utils::validation::{validate_form, FieldInput};

pub const NAME_FIELD: &str = "customerName";
pub const COMMENTS_FIELD: &str = "comments";
pub const RATING_FIELD: &str = "rating";

pub const MIN_COMMENT_CHARS: usize = 10;
pub const MAX_RATING: u8 = 5;
/// Value the star widget starts at when the page leaves it empty.
pub const DEFAULT_RATING: u8 = MAX_RATING;

const NAME_REQUIRED_MESSAGE: &str = "Please enter your name";
const COMMENTS_REQUIRED_MESSAGE: &str = "Please enter your feedback";
const COMMENTS_TOO_SHORT_MESSAGE: &str = "Feedback must be at least 10 characters long";
const RATING_RANGE_MESSAGE: &str = "Please select a rating between 1 and 5 stars";

pub const SUBMITTING_MARKUP: &str = "<i class=\"fas fa-spinner fa-spin mr-2\"></i>Submitting...";

#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    pub customer_name: String,
    pub comments: String,
    pub rating: String,
}

/// Why the browser must not submit the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackRejection {
    /// Shown under the field, which also gets focus.
    Field {
        field: &'static str,
        message: &'static str,
    },
    /// The rating widget has no text slot; this one is a blocking alert.
    Rating(&'static str),
}

impl FeedbackRejection {
    pub fn message(&self) -> &'static str {
        match self {
            FeedbackRejection::Field { message, .. } => message,
            FeedbackRejection::Rating(message) => message,
        }
    }
}

fn rating_in_range(raw: &str) -> bool {
    raw.trim()
        .parse::<f64>()
        .is_ok_and(|r| (1.0..=f64::from(MAX_RATING)).contains(&r))
}

/// First failing rule, checked in page order: name, comments, rating.
pub fn validate_feedback(form: &FeedbackForm) -> Result<(), FeedbackRejection> {
    let required = [
        FieldInput::text(NAME_FIELD, &form.customer_name),
        FieldInput::text(COMMENTS_FIELD, &form.comments),
    ];
    if let Err(errors) = validate_form(&required, 0) {
        let rejection = if errors.invalid_fields.contains(NAME_FIELD) {
            FeedbackRejection::Field {
                field: NAME_FIELD,
                message: NAME_REQUIRED_MESSAGE,
            }
        } else {
            FeedbackRejection::Field {
                field: COMMENTS_FIELD,
                message: COMMENTS_REQUIRED_MESSAGE,
            }
        };
        return Err(rejection);
    }

    if form.comments.trim().chars().count() < MIN_COMMENT_CHARS {
        return Err(FeedbackRejection::Field {
            field: COMMENTS_FIELD,
            message: COMMENTS_TOO_SHORT_MESSAGE,
        });
    }

    if !rating_in_range(&form.rating) {
        return Err(FeedbackRejection::Rating(RATING_RANGE_MESSAGE));
    }
    Ok(())
}

/// Markup of the inline error placed after an invalid field.
pub fn validation_error_html(message: &str) -> String {
    format!(
        "<i class=\"fas fa-exclamation-triangle mr-1\"></i>{}",
        escape_html(message)
    )
}

/// Filled (`true`) or hollow state of each star for `rating`.
pub fn star_states(rating: u8) -> [bool; MAX_RATING as usize] {
    let mut states = [false; MAX_RATING as usize];
    for (index, state) in states.iter_mut().enumerate() {
        *state = index < usize::from(rating);
    }
    states
}

/// Rating held by the hidden input; empty or garbage reads as unrated.
pub fn current_rating(raw: &str) -> u8 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, comments: &str, rating: &str) -> FeedbackForm {
        FeedbackForm {
            customer_name: name.into(),
            comments: comments.into(),
            rating: rating.into(),
        }
    }

    #[test]
    fn valid_feedback_passes() {
        assert_eq!(validate_feedback(&form("Jane", "Great service!", "5")), Ok(()));
    }

    #[test]
    fn name_is_checked_first() {
        let err = validate_feedback(&form("  ", "", "")).unwrap_err();
        assert_eq!(
            err,
            FeedbackRejection::Field {
                field: NAME_FIELD,
                message: NAME_REQUIRED_MESSAGE,
            }
        );
    }

    #[test]
    fn comments_required_then_minimum_length() {
        let err = validate_feedback(&form("Jane", "   ", "5")).unwrap_err();
        assert_eq!(err.message(), COMMENTS_REQUIRED_MESSAGE);

        let nine = "123456789";
        let err = validate_feedback(&form("Jane", nine, "5")).unwrap_err();
        assert_eq!(
            err,
            FeedbackRejection::Field {
                field: COMMENTS_FIELD,
                message: COMMENTS_TOO_SHORT_MESSAGE,
            }
        );

        assert_eq!(validate_feedback(&form("Jane", "1234567890", "5")), Ok(()));
        // Surrounding blanks do not count towards the minimum.
        assert!(validate_feedback(&form("Jane", "  123456789  ", "5")).is_err());
    }

    #[test]
    fn rating_must_be_one_to_five() {
        for rating in ["0", "6", "", "abc", "-1"] {
            assert_eq!(
                validate_feedback(&form("Jane", "Lovely car, clean.", rating)),
                Err(FeedbackRejection::Rating(RATING_RANGE_MESSAGE)),
                "{}",
                rating
            );
        }
        for rating in ["1", "5"] {
            assert!(validate_feedback(&form("Jane", "Lovely car, clean.", rating)).is_ok());
        }
    }

    #[test]
    fn stars_follow_rating() {
        assert_eq!(star_states(0), [false; 5]);
        assert_eq!(star_states(3), [true, true, true, false, false]);
        assert_eq!(star_states(DEFAULT_RATING), [true; 5]);
        assert_eq!(current_rating(""), 0);
        assert_eq!(current_rating("4"), 4);
    }

    #[test]
    fn inline_error_is_escaped() {
        assert_eq!(
            validation_error_html("a <b>"),
            "<i class=\"fas fa-exclamation-triangle mr-1\"></i>a &lt;b&gt;"
        );
    }
}
