use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const UPLIFTS: [&str; 2] = ["standard", "uplift"];
pub const ZONES: [&str; 2] = ["local", "intercity"];
pub const ROUTES: [&str; 2] = ["roundTrip", "oneWay"];

fn first_of_year() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

/// Writes `rows` random trips, each at most three days long.
pub fn generate_trips_csv(path: &Path, rows: usize, seed: u64) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    let mut rng = StdRng::seed_from_u64(seed);

    wtr.write_record(["trip", "start", "end", "uplift", "zone", "route"])?;

    for i in 1..=rows {
        let start = first_of_year() + TimeDelta::minutes(rng.gen_range(0..366 * 24 * 60));
        let end = start + TimeDelta::minutes(rng.gen_range(0..=3 * 24 * 60));
        wtr.write_record([
            format!("T-{i}"),
            start.format("%Y-%m-%dT%H:%M").to_string(),
            end.format("%Y-%m-%dT%H:%M").to_string(),
            UPLIFTS[rng.gen_range(0..2)].to_string(),
            ZONES[rng.gen_range(0..2)].to_string(),
            ROUTES[rng.gen_range(0..2)].to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
