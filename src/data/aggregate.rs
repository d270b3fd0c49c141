//! Descriptive statistics over a (usually filtered) table.
//!
//! Every function is pure and accepts an empty table, returning zero or an
//! empty collection. Rankings are deterministic: ties keep the order in
//! which a group first appears in the table unless stated otherwise.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::model::{LoadRow, LoadTable};

// ---------------------------------------------------------------------------
// Column selectors
// ---------------------------------------------------------------------------

/// Categorical columns that can be counted or grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    EquipmentType,
    Company,
    Route,
}

impl Category {
    pub fn of<'a>(&self, row: &'a LoadRow) -> &'a str {
        let p = row.posting();
        match self {
            Category::EquipmentType => &p.equipment_type,
            Category::Company => &p.company_name,
            Category::Route => row.route(),
        }
    }
}

/// Numeric columns, original or derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    RateDollars,
    RatePerMileDollars,
    DistanceMiles,
    Weight,
}

impl Measure {
    pub fn of(&self, row: &LoadRow) -> f64 {
        let p = row.posting();
        match self {
            Measure::RateDollars => row.rate_dollars(),
            Measure::RatePerMileDollars => row.rate_per_mile_dollars(),
            Measure::DistanceMiles => p.distance_miles as f64,
            Measure::Weight => p.weight as f64,
        }
    }
}

/// Timestamp columns that can be bucketed by calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeColumn {
    Posted,
    Pickup,
}

impl TimeColumn {
    pub fn date_of(&self, row: &LoadRow) -> NaiveDate {
        match self {
            TimeColumn::Posted => row.posted_date(),
            TimeColumn::Pickup => row.pickup_date(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `a - b`, saturating at the `i64` bounds.
fn signed(a: u64, b: u64) -> i64 {
    let diff = i128::from(a) - i128::from(b);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

pub fn row_count(table: &LoadTable) -> usize {
    table.len()
}

pub fn count_delta(table: &LoadTable, baseline: &LoadTable) -> i64 {
    signed(table.len() as u64, baseline.len() as u64)
}

/// Mean dollar rate, `None` for an empty table.
pub fn mean_rate(table: &LoadTable) -> Option<f64> {
    mean(table.iter().map(LoadRow::rate_dollars))
}

pub fn mean_rate_delta(table: &LoadTable, baseline: &LoadTable) -> Option<f64> {
    Some(mean_rate(table)? - mean_rate(baseline)?)
}

/// Sum of distances, saturating at `u64::MAX`.
pub fn total_distance(table: &LoadTable) -> u64 {
    table
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.posting().distance_miles))
}

pub fn distance_delta(table: &LoadTable, baseline: &LoadTable) -> i64 {
    signed(total_distance(table), total_distance(baseline))
}

pub fn distinct_companies(table: &LoadTable) -> usize {
    distinct(table, Category::Company)
}

pub fn distinct(table: &LoadTable, category: Category) -> usize {
    table
        .iter()
        .map(|r| category.of(r))
        .collect::<std::collections::HashSet<_>>()
        .len()
}

pub fn companies_delta(table: &LoadTable, baseline: &LoadTable) -> i64 {
    signed(distinct_companies(table) as u64, distinct_companies(baseline) as u64)
}

/// A headline value with its change against the unfiltered table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric<T, D> {
    pub value: T,
    /// Present only when the view is narrower than the baseline.
    pub delta: Option<D>,
}

/// The four numbers across the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyMetrics {
    pub total_loads: Metric<usize, i64>,
    pub average_rate: Metric<Option<f64>, f64>,
    pub total_distance: Metric<u64, i64>,
    pub companies: Metric<usize, i64>,
}

impl KeyMetrics {
    pub fn compute(view: &LoadTable, baseline: &LoadTable) -> Self {
        let narrowed = view.len() != baseline.len();
        KeyMetrics {
            total_loads: Metric {
                value: row_count(view),
                delta: narrowed.then(|| count_delta(view, baseline)),
            },
            average_rate: Metric {
                value: mean_rate(view),
                delta: if narrowed {
                    mean_rate_delta(view, baseline)
                } else {
                    None
                },
            },
            total_distance: Metric {
                value: total_distance(view),
                delta: narrowed.then(|| distance_delta(view, baseline)),
            },
            companies: Metric {
                value: distinct_companies(view),
                delta: narrowed.then(|| companies_delta(view, baseline)),
            },
        }
    }
}

impl Default for KeyMetrics {
    fn default() -> Self {
        let empty = LoadTable::empty();
        KeyMetrics::compute(&empty, &empty)
    }
}

// ---------------------------------------------------------------------------
// Rankings and grouped statistics
// ---------------------------------------------------------------------------

/// Group rows by `category`, keeping groups in first-seen order.
fn groups<'a>(table: &'a LoadTable, category: Category) -> Vec<(&'a str, Vec<&'a LoadRow>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<(&str, Vec<&LoadRow>)> = Vec::new();
    for row in table.iter() {
        let key = category.of(row);
        let slot = *index.entry(key).or_insert_with(|| {
            out.push((key, Vec::new()));
            out.len() - 1
        });
        out[slot].1.push(row);
    }
    out
}

/// Frequency of each value of `category`, most frequent first. Equal counts
/// keep first-seen order. `top_n` truncates the result.
pub fn value_counts(table: &LoadTable, category: Category, top_n: Option<usize>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = groups(table, category)
        .into_iter()
        .map(|(key, rows)| (key.to_string(), rows.len()))
        .collect();
    // Stable sort preserves first-seen order among ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some(n) = top_n {
        counts.truncate(n);
    }
    counts
}

/// Mean of `measure` per group, ascending by mean.
pub fn grouped_mean(table: &LoadTable, by: Category, measure: Measure) -> Vec<(String, f64)> {
    let mut means: Vec<(String, f64)> = groups(table, by)
        .into_iter()
        .filter_map(|(key, rows)| {
            mean(rows.iter().map(|r| measure.of(r))).map(|m| (key.to_string(), m))
        })
        .collect();
    means.sort_by(|a, b| a.1.total_cmp(&b.1));
    means
}

/// One line of the performance table.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub group: String,
    pub avg_rate: f64,
    pub load_count: usize,
    pub avg_distance: f64,
    pub avg_weight: f64,
}

/// Per-group mean rate, count, mean distance and mean weight (rounded to
/// cents), busiest groups first. Equal counts are ordered by group name.
pub fn group_stats(table: &LoadTable, by: Category, limit: usize) -> Vec<GroupStats> {
    let mut stats: Vec<GroupStats> = groups(table, by)
        .into_iter()
        .map(|(key, rows)| {
            let avg = |m: Measure| round2(mean(rows.iter().map(|r| m.of(r))).unwrap_or(0.0));
            GroupStats {
                group: key.to_string(),
                avg_rate: avg(Measure::RateDollars),
                load_count: rows.len(),
                avg_distance: avg(Measure::DistanceMiles),
                avg_weight: avg(Measure::Weight),
            }
        })
        .collect();
    stats.sort_by(|a, b| b.load_count.cmp(&a.load_count).then_with(|| a.group.cmp(&b.group)));
    stats.truncate(limit);
    stats
}

/// Rows per calendar date, oldest first.
pub fn daily_counts(table: &LoadTable, column: TimeColumn) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for row in table.iter() {
        *counts.entry(column.date_of(row)).or_default() += 1;
    }
    counts.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins spanning the observed range; the last bin includes the
/// maximum. A constant column yields one zero-width bin.
pub fn histogram(table: &LoadTable, measure: Measure, bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = table.iter().map(|r| measure.of(r)).collect();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = max - min;
    if width <= 0.0 {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let step = width / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + step * i as f64,
            upper: if i + 1 == bins { max } else { min + step * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for v in values {
        let idx = (((v - min) / step) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Five-number summary of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub group: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Linear-interpolation quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Distribution of `measure` per group, groups in first-seen order.
pub fn box_stats(table: &LoadTable, by: Category, measure: Measure) -> Vec<BoxStats> {
    groups(table, by)
        .into_iter()
        .map(|(key, rows)| {
            let mut values: Vec<f64> = rows.iter().map(|r| measure.of(r)).collect();
            values.sort_by(f64::total_cmp);
            BoxStats {
                group: key.to_string(),
                min: values[0],
                q1: quantile(&values, 0.25),
                median: quantile(&values, 0.5),
                q3: quantile(&values, 0.75),
                max: values[values.len() - 1],
            }
        })
        .collect()
}

/// `(x, y)` points per group, groups in first-seen order.
pub fn scatter(table: &LoadTable, x: Measure, y: Measure, by: Category) -> Vec<(String, Vec<[f64; 2]>)> {
    groups(table, by)
        .into_iter()
        .map(|(key, rows)| {
            let points = rows.iter().map(|r| [x.of(r), y.of(r)]).collect();
            (key.to_string(), points)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// `"City, ST"`.
    pub label: String,
}

/// Origin and destination coordinates for the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapPoints {
    pub origins: Vec<GeoPoint>,
    pub destinations: Vec<GeoPoint>,
}

pub fn map_points(table: &LoadTable) -> MapPoints {
    let point = |loc: &super::model::Location| GeoPoint {
        latitude: loc.latitude,
        longitude: loc.longitude,
        label: loc.label(),
    };
    MapPoints {
        origins: table.iter().map(|r| point(&r.posting().origin)).collect(),
        destinations: table.iter().map(|r| point(&r.posting().destination)).collect(),
    }
}
