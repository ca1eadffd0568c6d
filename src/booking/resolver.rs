//! Step resolution: turns the raw step token of a location into a validated
//! step or a corrective redirect.

use crate::booking::location::{BookingPaths, Location};
use crate::booking::navigator::NavigationRequest;
use crate::booking::step::BookingStep;

/// Result of resolving a step token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Token is valid (or absent, which means the canonical step)
    Step(BookingStep),
    /// Token is invalid; replace the location and render nothing this pass
    Redirect(NavigationRequest),
}

impl Resolution {
    /// The validated step, if this resolution renders one
    pub fn step(&self) -> Option<BookingStep> {
        match self {
            Resolution::Step(step) => Some(*step),
            Resolution::Redirect(_) => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Resolution::Redirect(_))
    }
}

/// Parse a step token with strict integer rules.
///
/// Only ASCII digits are accepted. Leading zeros are fine (`"02"` is 2), but
/// signs, whitespace, decimals and values that overflow are rejected.
pub fn parse_step_token(token: &str) -> Option<BookingStep> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<u32>().ok().and_then(BookingStep::from_number)
}

/// Validates step tokens against the booking path scheme
#[derive(Debug, Clone, Default)]
pub struct StepResolver {
    paths: BookingPaths,
}

impl StepResolver {
    pub fn new(paths: BookingPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &BookingPaths {
        &self.paths
    }

    /// Resolve a raw token. An absent or empty token is the canonical entry
    /// state and never redirects.
    pub fn resolve(&self, raw: Option<&str>) -> Resolution {
        let token = match raw {
            None => return Resolution::Step(BookingStep::CANONICAL),
            Some(token) if token.is_empty() => return Resolution::Step(BookingStep::CANONICAL),
            Some(token) => token,
        };

        match parse_step_token(token) {
            Some(step) => Resolution::Step(step),
            None => {
                tracing::debug!(token, "invalid booking step, redirecting to canonical step");
                Resolution::Redirect(NavigationRequest::replace(
                    self.paths.step_path(BookingStep::CANONICAL),
                ))
            }
        }
    }

    /// Resolve the step token carried by a location
    pub fn resolve_location(&self, location: &Location) -> Resolution {
        self.resolve(self.paths.step_token(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::navigator::NavigationMode;

    fn resolver() -> StepResolver {
        StepResolver::default()
    }

    fn assert_redirects(token: &str) {
        match resolver().resolve(Some(token)) {
            Resolution::Redirect(request) => {
                assert_eq!(request.location.as_str(), "/booking/1");
                assert_eq!(request.mode, NavigationMode::Replace);
            }
            other => panic!("expected redirect for {token:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_tokens() {
        let r = resolver();
        assert_eq!(r.resolve(Some("1")), Resolution::Step(BookingStep::ServiceSchedule));
        assert_eq!(r.resolve(Some("2")), Resolution::Step(BookingStep::PatientInformation));
        assert_eq!(r.resolve(Some("3")), Resolution::Step(BookingStep::Confirmation));
    }

    #[test]
    fn test_leading_zero_is_accepted() {
        assert_eq!(
            resolver().resolve(Some("02")),
            Resolution::Step(BookingStep::PatientInformation)
        );
        assert_eq!(
            resolver().resolve(Some("003")),
            Resolution::Step(BookingStep::Confirmation)
        );
    }

    #[test]
    fn test_absent_token_defaults_without_redirect() {
        assert_eq!(resolver().resolve(None), Resolution::Step(BookingStep::ServiceSchedule));
        assert_eq!(resolver().resolve(Some("")), Resolution::Step(BookingStep::ServiceSchedule));
    }

    #[test]
    fn test_non_numeric_redirects() {
        assert_redirects("abc");
        assert_redirects("2a");
        assert_redirects("two");
    }

    #[test]
    fn test_out_of_range_redirects() {
        assert_redirects("0");
        assert_redirects("4");
        assert_redirects("99");
        assert_redirects("00");
    }

    #[test]
    fn test_non_integer_numbers_redirect() {
        assert_redirects("2.5");
        assert_redirects("2.0");
        assert_redirects("-1");
        assert_redirects("+2");
        assert_redirects(" 2");
        assert_redirects("1e0");
        assert_redirects("99999999999999999999999");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let r = resolver();
        for token in ["abc", "4", "2.5", "-3"] {
            let first = r.resolve(Some(token));
            let second = r.resolve(Some(token));
            assert_eq!(first, second);
            assert!(first.is_redirect());
        }
    }

    #[test]
    fn test_resolving_the_redirect_target_is_stable() {
        let r = resolver();
        let Resolution::Redirect(request) = r.resolve(Some("abc")) else {
            panic!("expected redirect");
        };
        assert_eq!(
            r.resolve_location(&request.location),
            Resolution::Step(BookingStep::ServiceSchedule)
        );
    }

    #[test]
    fn test_resolve_location() {
        let r = resolver();
        assert_eq!(
            r.resolve_location(&"/booking/2?from=home".into()),
            Resolution::Step(BookingStep::PatientInformation)
        );
        assert!(r.resolve_location(&"/booking/2/extra".into()).is_redirect());
        assert_eq!(r.resolve_location(&"/booking".into()).step(), Some(BookingStep::ServiceSchedule));
    }

    #[test]
    fn test_parse_step_token() {
        assert_eq!(parse_step_token("1"), Some(BookingStep::ServiceSchedule));
        assert_eq!(parse_step_token(""), None);
        assert_eq!(parse_step_token("٣"), None);
    }
}
