// Consumption statistics over one period's readings
use chrono::{Duration, NaiveDateTime, NaiveTime};

use super::reading::{sanitize_balance, Reading};
use super::timeparse::parse_reading_time;

const TRAILING_WINDOW_DAYS: i64 = 14;
const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Projected days until a circuit's balance runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysLeft {
    Days(i64),
    /// Average daily consumption is zero, so the balance never runs out.
    Unbounded,
}

/// Consumption snapshot for the dashboard.
///
/// Values are pre-rounded to one decimal the way they are displayed; the
/// days-left projections divide by the rounded average so the snapshot is
/// internally consistent with what the user sees.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Today's balance delta, baseline minus latest. Negative means the
    /// balance grew (a recharge), which the UI renders with a "+" prefix.
    pub light_trend: f64,
    pub ac_trend: f64,
    /// Yesterday's consumption, floored at zero.
    pub light_yesterday_trend: f64,
    pub ac_yesterday_trend: f64,
    pub max_light: f64,
    pub min_light: f64,
    pub max_ac: f64,
    pub min_ac: f64,
    pub light_avg_daily: f64,
    pub ac_avg_daily: f64,
    pub light_days_left: DaysLeft,
    pub ac_days_left: DaysLeft,
    /// Raw time string of the latest reading.
    pub last_update: String,
    pub yesterday_total_consumption: f64,
}

/// Computes the consumption snapshot for a chronologically sorted sequence.
///
/// Returns `None` below two readings; everything else degrades to a default
/// rather than failing.
pub fn calculate_stats(data: &[Reading], now: NaiveDateTime) -> Option<Stats> {
    if data.len() < 2 {
        tracing::warn!("not enough readings to compute statistics");
        return None;
    }

    let light_values: Vec<f64> = data.iter().filter_map(|r| r.light_balance).collect();
    let ac_values: Vec<f64> = data.iter().filter_map(|r| r.ac_balance).collect();

    let latest = &data[data.len() - 1];
    let latest_time = parse_reading_time(&latest.time, now);
    let today_start = latest_time.date().and_time(NaiveTime::MIN);

    // earliest reading of the latest day, falling back to the one before last
    let baseline = data
        .iter()
        .find(|r| parse_reading_time(&r.time, now) >= today_start)
        .unwrap_or(&data[data.len() - 2]);

    // daily average over the trailing two weeks, or everything if the window
    // holds fewer than two readings
    let window_start = latest_time - Duration::days(TRAILING_WINDOW_DAYS);
    let recent: Vec<&Reading> = data
        .iter()
        .filter(|r| parse_reading_time(&r.time, now) >= window_start)
        .collect();
    let calc: Vec<&Reading> = if recent.len() >= 2 {
        recent
    } else {
        data.iter().collect()
    };

    let first_time = parse_reading_time(&calc[0].time, now);
    let last_time = parse_reading_time(&calc[calc.len() - 1].time, now);
    let days_diff = ((last_time - first_time).num_milliseconds() as f64 / MILLIS_PER_DAY).max(1.0);

    // only balance decreases count as consumption; recharges contribute zero
    let mut light_total = 0.0;
    let mut ac_total = 0.0;
    for pair in calc.windows(2) {
        let prev_light = sanitize_balance(pair[0].light_balance.unwrap_or(0.0));
        let curr_light = sanitize_balance(pair[1].light_balance.unwrap_or(0.0));
        if prev_light > curr_light {
            light_total += prev_light - curr_light;
        }
        let prev_ac = sanitize_balance(pair[0].ac_balance.unwrap_or(0.0));
        let curr_ac = sanitize_balance(pair[1].ac_balance.unwrap_or(0.0));
        if prev_ac > curr_ac {
            ac_total += prev_ac - curr_ac;
        }
    }

    let light_avg_daily = round1(safe_divide(light_total, days_diff));
    let ac_avg_daily = round1(safe_divide(ac_total, days_diff));

    let light_days_left = days_left(latest.light_balance.unwrap_or(0.0), light_avg_daily);
    let ac_days_left = days_left(latest.ac_balance.unwrap_or(0.0), ac_avg_daily);

    let light_trend =
        round1(baseline.light_balance.unwrap_or(0.0) - latest.light_balance.unwrap_or(0.0));
    let ac_trend = round1(baseline.ac_balance.unwrap_or(0.0) - latest.ac_balance.unwrap_or(0.0));

    // yesterday's consumption runs from its earliest reading to today's baseline
    let yesterday_start = today_start - Duration::days(1);
    let yesterday_first = data.iter().find(|r| {
        let t = parse_reading_time(&r.time, now);
        t >= yesterday_start && t < today_start
    });
    let (light_yesterday_trend, ac_yesterday_trend) = match yesterday_first {
        Some(first) => (
            round1(
                (first.light_balance.unwrap_or(0.0) - baseline.light_balance.unwrap_or(0.0))
                    .max(0.0),
            ),
            round1(
                (first.ac_balance.unwrap_or(0.0) - baseline.ac_balance.unwrap_or(0.0)).max(0.0),
            ),
        ),
        None => (0.0, 0.0),
    };

    Some(Stats {
        light_trend,
        ac_trend,
        light_yesterday_trend,
        ac_yesterday_trend,
        max_light: round1(safe_max(&light_values)),
        min_light: round1(safe_min(&light_values)),
        max_ac: round1(safe_max(&ac_values)),
        min_ac: round1(safe_min(&ac_values)),
        light_avg_daily,
        ac_avg_daily,
        light_days_left,
        ac_days_left,
        last_update: latest.time.clone(),
        yesterday_total_consumption: round1(light_yesterday_trend + ac_yesterday_trend),
    })
}

fn days_left(balance: f64, avg_daily: f64) -> DaysLeft {
    if avg_daily > 0.0 {
        DaysLeft::Days(safe_divide(balance, avg_daily).floor() as i64)
    } else {
        DaysLeft::Unbounded
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if !numerator.is_finite() || !denominator.is_finite() || denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

fn safe_max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .reduce(f64::max)
        .unwrap_or(0.0)
}

fn safe_min(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .reduce(f64::min)
        .unwrap_or(0.0)
}
