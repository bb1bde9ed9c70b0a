//! Seeded random-walk bars for demos, benches and property tests.
//!
//! Clearly fake: daily bars from 2024-01-01 on weekdays only, ±3% closes,
//! up to 1% wicks, volume in [500k, 5M).

use crate::domain::Bar;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn generate_bars(count: usize, seed: u64, start_price: f64) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bars = Vec::with_capacity(count);
    let mut price = start_price;
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();

    while bars.len() < count {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            date += Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000..5_000_000u64) as f64;

        bars.push(Bar {
            time: date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            open,
            high,
            low,
            close,
            volume,
        });

        price = close;
        date += Duration::days(1);
    }

    bars
}
