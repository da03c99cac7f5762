use chrono::{NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

use crate::domain::models::{test_drive::TestDrive, vehicle::Vehicle};

/// Generates an iCalendar (.ics) string for a test-drive appointment.
/// Returns None when the stored slot cannot be resolved to a wall-clock
/// instant (e.g. a DST gap); the confirmation email then goes out without
/// an attachment.
pub fn generate_ics(
    test_drive: &TestDrive,
    vehicle: &Vehicle,
    tz: Tz,
    duration_min: u32,
    location: &str,
) -> Option<String> {
    let time = NaiveTime::parse_from_str(&test_drive.time, "%H:%M").ok()?;
    let start = tz
        .from_local_datetime(&test_drive.date.and_time(time))
        .earliest()?
        .with_timezone(&Utc);
    let end = start + chrono::Duration::minutes(duration_min as i64);

    let mut calendar = Calendar::new();

    let ical_event = IcalEvent::new()
        .summary(&format!("Test drive: {}", vehicle.display_name()))
        .description(&format!(
            "Test drive of the {} (VIN {}) with {}.",
            vehicle.display_name(),
            vehicle.vin,
            test_drive.customer_name
        ))
        .location(location)
        .starts(start)
        .ends(end)
        .uid(&test_drive.id)
        .done();

    calendar.push(ical_event);
    Some(calendar.to_string())
}
