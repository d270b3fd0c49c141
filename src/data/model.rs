use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Location – one end of a route
// ---------------------------------------------------------------------------

/// Origin or destination of a load posting.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Opaque signed location identifier from the posting source.
    pub key: i64,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// `"City, ST"` label used by the route string and map hover text.
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

// ---------------------------------------------------------------------------
// LoadPosting – one source record
// ---------------------------------------------------------------------------

/// A freight shipment listing exactly as it appears in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadPosting {
    pub id: i64,
    pub reference_number: String,
    pub tracking_number: String,

    /// Epoch milliseconds.
    pub posted_timestamp: i64,
    pub pickup_timestamp: i64,
    /// Absent until delivery is confirmed.
    pub dropoff_timestamp: Option<i64>,
    pub comments: Option<String>,

    pub rate_cents: i64,
    pub rate_cents_per_mile: i64,

    pub origin: Location,
    pub destination: Location,
    pub distance_miles: u64,
    pub origin_deadhead: Option<f64>,
    pub destination_deadhead: Option<f64>,

    pub equipment_type: String,
    pub weight: i64,
    pub length: i64,

    pub dot_number: Option<String>,
    pub mc_number: Option<String>,
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,

    /// Undocumented score, carried through untouched.
    pub value: f64,
    pub viewed: bool,
    pub credit: bool,
}

impl LoadPosting {
    pub fn rate_dollars(&self) -> f64 {
        self.rate_cents as f64 / 100.0
    }

    pub fn rate_per_mile_dollars(&self) -> f64 {
        self.rate_cents_per_mile as f64 / 100.0
    }

    pub fn route(&self) -> String {
        format!("{} → {}", self.origin.label(), self.destination.label())
    }
}

// ---------------------------------------------------------------------------
// LoadRow – a posting plus its derived columns
// ---------------------------------------------------------------------------

/// One row of the built table. Derived columns that cost an allocation or
/// a fallible conversion are computed once here; dollar amounts are always
/// recomputed from the cents fields.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRow {
    posting: LoadPosting,
    route: String,
    posted_at: NaiveDateTime,
    pickup_at: NaiveDateTime,
}

impl LoadRow {
    /// Derive the computed columns. Returns the name of the offending
    /// timestamp field when it is outside chrono's representable range.
    pub fn new(posting: LoadPosting) -> Result<Self, &'static str> {
        let posted_at = millis_to_datetime(posting.posted_timestamp).ok_or("postedTimestamp")?;
        let pickup_at = millis_to_datetime(posting.pickup_timestamp).ok_or("pickupTimestamp")?;
        let route = posting.route();
        Ok(Self {
            posting,
            route,
            posted_at,
            pickup_at,
        })
    }

    pub fn posting(&self) -> &LoadPosting {
        &self.posting
    }

    pub fn rate_dollars(&self) -> f64 {
        self.posting.rate_dollars()
    }

    pub fn rate_per_mile_dollars(&self) -> f64 {
        self.posting.rate_per_mile_dollars()
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Posting time in UTC.
    pub fn posted_at(&self) -> NaiveDateTime {
        self.posted_at
    }

    /// Scheduled pickup time in UTC.
    pub fn pickup_at(&self) -> NaiveDateTime {
        self.pickup_at
    }

    pub fn posted_date(&self) -> NaiveDate {
        self.posted_at.date()
    }

    pub fn pickup_date(&self) -> NaiveDate {
        self.pickup_at.date()
    }
}

fn millis_to_datetime(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

// ---------------------------------------------------------------------------
// LoadTable – the immutable collection of rows
// ---------------------------------------------------------------------------

/// An immutable, ordered collection of rows. Subsets share rows with the
/// table they were taken from, so row identity survives filtering.
#[derive(Debug, Clone, Default)]
pub struct LoadTable {
    rows: Vec<Arc<LoadRow>>,
}

impl LoadTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Arc<LoadRow>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Arc<LoadRow>] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadRow> {
        self.rows.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when both tables hold the very same rows in the same order.
    pub fn same_rows(&self, other: &LoadTable) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl fmt::Display for LoadTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} load postings", self.rows.len())
    }
}
