use crate::application::engine::FareQuery;
use crate::domain::fare::FareBreakdown;
use chrono::NaiveDateTime;

fn display_time(instant: NaiveDateTime) -> String {
    instant.format("%d/%m/%Y, %I:%M %P").to_string()
}

/// The shareable trip summary staff paste into chat with the customer.
pub fn trip_summary(query: &FareQuery, fare: &FareBreakdown) -> String {
    format!(
        "Trip Start Time - {}\n\
         Trip End Time - {}\n\
         Trip Type - {}\n\
         Trip Route - {}\n\
         Total Time - {}\n\
         Total Price - ₹{}",
        display_time(query.start),
        display_time(query.end),
        query.zone.label(),
        query.route.label(),
        fare.clock_duration(),
        fare.total_amount,
    )
}

/// Multi-line breakdown of the figures behind a fare.
pub fn breakdown_text(fare: &FareBreakdown) -> String {
    format!(
        "Total Duration: {}h {}m\n\
         Band: {} (rate table {})\n\
         Shift Mix: {}m (Day) / {}m (Night)\n\
         Rate per Minute: ₹{:.2} (Day), ₹{:.2} (Night)\n\
         Base Price: ₹{:.2}\n\
         GST (18%): ₹{}\n\
         Total Price: ₹{}",
        fare.hours(),
        fare.minutes(),
        fare.band,
        fare.rate_table_version,
        fare.day_minutes,
        fare.night_minutes,
        fare.day_rate,
        fare.night_rate,
        fare.base_amount,
        fare.tax_amount,
        fare.total_amount,
    )
}
