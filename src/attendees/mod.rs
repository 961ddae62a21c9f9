//! Attendee list parsing for calendar scheduling.

use crate::models::Attendee;

/// Turn one-email-per-line text into attendees.
///
/// Lines are trimmed and blank lines dropped. Order and duplicates are kept
/// and nothing is validated; the server decides what an acceptable address is.
pub fn parse_attendees(text: &str) -> Vec<Attendee> {
    text.split('\n')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(Attendee::new)
        .collect()
}
