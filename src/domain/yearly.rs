// Yearly consumption aggregation across monthly period files
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use super::reading::{sanitize_balance, Circuit, Reading};
use super::timeparse::parse_clock;

/// Day-to-day gaps at or under this many days count as contiguous data.
pub const CONTINUOUS_DAY_THRESHOLD: f64 = 1.5;
/// Ceiling for a filled day's consumption, per circuit.
pub const MAX_DAILY_CONSUMPTION: f64 = 50.0;

/// A reading tagged with the `"YYYY-MM"` period file it came from. The tag
/// supplies the year its own time value lacks.
#[derive(Debug, Clone)]
pub struct TaggedReading {
    pub period: String,
    pub reading: Reading,
}

/// Electricity drawn down on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyConsumption {
    pub date: NaiveDate,
    pub light: f64,
    pub ac: f64,
    /// True for calendar-gap days synthesized from their neighbors. Filled
    /// days keep the charts continuous; totals and the peak day never use
    /// them.
    pub filled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyConsumption {
    /// `"YYYY-MM"`.
    pub month: String,
    pub light: f64,
    pub ac: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakDay {
    pub date: NaiveDate,
    pub total: f64,
}

/// Aggregated consumption report for one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyReport {
    pub year: i32,
    pub total_light: f64,
    pub total_ac: f64,
    pub peak: Option<PeakDay>,
    pub daily: Vec<DailyConsumption>,
    pub monthly: Vec<MonthlyConsumption>,
}

impl YearlyReport {
    pub fn total(&self) -> f64 {
        self.total_light + self.total_ac
    }

    /// Light share of the total, in percent. Zero when nothing was consumed.
    pub fn light_percent(&self) -> f64 {
        if self.total() > 0.0 {
            self.total_light / self.total() * 100.0
        } else {
            0.0
        }
    }

    pub fn ac_percent(&self) -> f64 {
        if self.total() > 0.0 {
            self.total_ac / self.total() * 100.0
        } else {
            0.0
        }
    }

    /// First and last day covered by the daily series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.daily.first(), self.daily.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

/// Buckets readings by calendar day and derives per-day consumption for the
/// target year.
///
/// Consumption normally carries through to the next day's first reading so
/// overnight draw lands on the day it started. When the next present day is
/// further than [`CONTINUOUS_DAY_THRESHOLD`] away (a data outage), the day
/// falls back to its own first/last delta so a multi-day drop is not
/// attributed to a single day. Calendar gaps inside the covered range are
/// filled from neighboring days, capped and clamped; totals and the peak day
/// come from real buckets only.
pub fn aggregate_yearly(records: &[TaggedReading], year: i32) -> YearlyReport {
    let mut by_date: BTreeMap<NaiveDate, Vec<&TaggedReading>> = BTreeMap::new();
    for record in records {
        match record_date(record) {
            Some(date) if date.year() == year => by_date.entry(date).or_default().push(record),
            Some(_) => {}
            None => tracing::warn!(
                period = %record.period,
                time = %record.reading.time,
                "skipping record with unparsable date"
            ),
        }
    }
    for (date, day) in by_date.iter_mut() {
        day.sort_by_key(|r| record_timestamp(r, *date));
    }

    let present: Vec<NaiveDate> = by_date.keys().copied().collect();
    let mut real: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

    for (index, &date) in present.iter().enumerate() {
        let day_records = &by_date[&date];
        let (Some(first), Some(last)) = (day_records.first(), day_records.last()) else {
            continue;
        };

        let next = present
            .get(index + 1)
            .and_then(|next_date| by_date[next_date].first().map(|r| (*next_date, *r)));

        let consumption = match next {
            Some((next_date, next_first)) => {
                let gap_days = (next_date - date).num_days() as f64;
                if gap_days <= CONTINUOUS_DAY_THRESHOLD {
                    // overnight draw belongs to the day it started
                    cross_delta(first, next_first)
                } else {
                    tracing::warn!(
                        "non-contiguous dates {date} -> {next_date} ({gap_days:.1} day gap), \
                         using same-day delta"
                    );
                    same_day_delta(first, last, day_records.len())
                }
            }
            None => same_day_delta(first, last, day_records.len()),
        };
        real.insert(date, consumption);
    }

    // totals and peak come from real data only
    let mut total_light = 0.0;
    let mut total_ac = 0.0;
    let mut peak: Option<PeakDay> = None;
    for (&date, &(light, ac)) in &real {
        total_light += light;
        total_ac += ac;
        let day_total = light + ac;
        if day_total > peak.map_or(0.0, |p| p.total) {
            peak = Some(PeakDay {
                date,
                total: day_total,
            });
        }
    }

    let daily = fill_calendar_gaps(&real);
    let monthly = monthly_rollup(&daily);

    YearlyReport {
        year,
        total_light,
        total_ac,
        peak,
        daily,
        monthly,
    }
}

/// Derives the calendar date of a tagged record: year from the period tag,
/// month and day from the record's own time value. A time value with more
/// than one hyphen-separated pair (legacy `"MM-DD-HH"`) keeps only `MM-DD`.
fn record_date(record: &TaggedReading) -> Option<NaiveDate> {
    let year: i32 = record.period.split('-').next()?.parse().ok()?;
    let date_part = record.reading.time.split_whitespace().next()?;
    let mut fields = date_part.split('-');
    let month: u32 = fields.next()?.parse().ok()?;
    let day: u32 = fields.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Intra-day ordering key. A missing or malformed clock sorts at midnight.
fn record_timestamp(record: &TaggedReading, date: NaiveDate) -> NaiveDateTime {
    let clock = record
        .reading
        .time
        .split_whitespace()
        .nth(1)
        .and_then(parse_clock)
        .unwrap_or(NaiveTime::MIN);
    date.and_time(clock)
}

fn cross_delta(first: &TaggedReading, next_first: &TaggedReading) -> (f64, f64) {
    (
        circuit_drop(&first.reading, &next_first.reading, Circuit::Light),
        circuit_drop(&first.reading, &next_first.reading, Circuit::Ac),
    )
}

fn same_day_delta(first: &TaggedReading, last: &TaggedReading, record_count: usize) -> (f64, f64) {
    if record_count < 2 {
        return (0.0, 0.0);
    }
    (
        circuit_drop(&first.reading, &last.reading, Circuit::Light),
        circuit_drop(&first.reading, &last.reading, Circuit::Ac),
    )
}

fn circuit_drop(from: &Reading, to: &Reading, circuit: Circuit) -> f64 {
    let from_balance = sanitize_balance(from.balance(circuit).unwrap_or(0.0));
    let to_balance = sanitize_balance(to.balance(circuit).unwrap_or(0.0));
    (from_balance - to_balance).max(0.0)
}

/// Fills missing calendar days strictly between the first and last present
/// dates. A filled day takes the average of its nearest real neighbors (one
/// side alone stands in when the other is missing), capped at twice the
/// overall average and clamped to `[0, MAX_DAILY_CONSUMPTION]`.
fn fill_calendar_gaps(real: &BTreeMap<NaiveDate, (f64, f64)>) -> Vec<DailyConsumption> {
    let mut daily: BTreeMap<NaiveDate, DailyConsumption> = real
        .iter()
        .map(|(&date, &(light, ac))| {
            (
                date,
                DailyConsumption {
                    date,
                    light,
                    ac,
                    filled: false,
                },
            )
        })
        .collect();

    if real.len() > 1 {
        let (Some(&first), Some(&last)) = (
            real.keys().next(),
            real.keys().next_back(),
        ) else {
            return daily.into_values().collect();
        };

        let avg_light = real.values().map(|v| v.0).sum::<f64>() / real.len() as f64;
        let avg_ac = real.values().map(|v| v.1).sum::<f64>() / real.len() as f64;

        let mut date = first;
        while date <= last {
            if !real.contains_key(&date) {
                let prev = real.range(..date).next_back().map(|(_, &v)| v);
                let next = real.range(date..).next().map(|(_, &v)| v);
                let (light, ac) = match (prev, next) {
                    (Some(p), Some(n)) => (
                        ((p.0 + n.0) / 2.0).min(avg_light * 2.0),
                        ((p.1 + n.1) / 2.0).min(avg_ac * 2.0),
                    ),
                    (Some(p), None) => (p.0.min(avg_light * 2.0), p.1.min(avg_ac * 2.0)),
                    (None, Some(n)) => (n.0.min(avg_light * 2.0), n.1.min(avg_ac * 2.0)),
                    (None, None) => (avg_light, avg_ac),
                };
                daily.insert(
                    date,
                    DailyConsumption {
                        date,
                        light: light.clamp(0.0, MAX_DAILY_CONSUMPTION),
                        ac: ac.clamp(0.0, MAX_DAILY_CONSUMPTION),
                        filled: true,
                    },
                );
            }
            date = match date.succ_opt() {
                Some(next_date) => next_date,
                None => break,
            };
        }
    }

    daily.into_values().collect()
}

/// Per-month sums of the daily series, filled days included, for the stacked
/// monthly chart.
fn monthly_rollup(daily: &[DailyConsumption]) -> Vec<MonthlyConsumption> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for day in daily {
        let key = format!("{:04}-{:02}", day.date.year(), day.date.month());
        let entry = months.entry(key).or_insert((0.0, 0.0));
        entry.0 += day.light;
        entry.1 += day.ac;
    }
    months
        .into_iter()
        .map(|(month, (light, ac))| MonthlyConsumption { month, light, ac })
        .collect()
}
