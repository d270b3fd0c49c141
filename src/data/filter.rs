use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{LoadRow, LoadTable};

/// Selection sentinel meaning "no constraint", shown first in every choice list.
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Filter specification
// ---------------------------------------------------------------------------

/// Inclusive bounds on the dollar rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min && rate <= self.max
    }

    /// Bounds satisfied by exactly the rates both ranges accept. May be
    /// inverted, in which case nothing matches.
    pub fn intersect(&self, other: &RateRange) -> RateRange {
        RateRange {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }
}

/// The active sidebar selections. `None` (or [`ALL`]) leaves a category
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub equipment_type: Option<String>,
    /// Matches the origin state or the destination state.
    pub state: Option<String>,
    pub company_name: Option<String>,
    pub rate_range: Option<RateRange>,
}

fn active(selection: &Option<String>) -> Option<&str> {
    selection.as_deref().filter(|s| *s != ALL)
}

impl FilterSpec {
    /// A spec that constrains nothing.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment_type = Some(equipment.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company_name = Some(company.into());
        self
    }

    pub fn with_rate_range(mut self, min: f64, max: f64) -> Self {
        self.rate_range = Some(RateRange::new(min, max));
        self
    }

    /// True when no category is constrained.
    pub fn is_noop(&self) -> bool {
        active(&self.equipment_type).is_none()
            && active(&self.state).is_none()
            && active(&self.company_name).is_none()
            && self.rate_range.is_none()
    }

    pub fn matches(&self, row: &LoadRow) -> bool {
        let p = row.posting();
        if let Some(equipment) = active(&self.equipment_type) {
            if p.equipment_type != equipment {
                return false;
            }
        }
        if let Some(state) = active(&self.state) {
            if p.origin.state != state && p.destination.state != state {
                return false;
            }
        }
        if let Some(company) = active(&self.company_name) {
            if p.company_name != company {
                return false;
            }
        }
        if let Some(range) = &self.rate_range {
            if !range.contains(row.rate_dollars()) {
                return false;
            }
        }
        true
    }

    /// Single spec equivalent to applying `self` then `other`, or `None`
    /// when the two constrain the same category to different values.
    pub fn intersect(&self, other: &FilterSpec) -> Option<FilterSpec> {
        fn merge(a: &Option<String>, b: &Option<String>) -> Option<Option<String>> {
            match (active(a), active(b)) {
                (Some(x), Some(y)) if x != y => None,
                (Some(x), _) | (None, Some(x)) => Some(Some(x.to_string())),
                (None, None) => Some(None),
            }
        }

        let rate_range = match (&self.rate_range, &other.rate_range) {
            (Some(a), Some(b)) => Some(a.intersect(b)),
            (a, b) => (*a).or(*b),
        };

        Some(FilterSpec {
            equipment_type: merge(&self.equipment_type, &other.equipment_type)?,
            state: merge(&self.state, &other.state)?,
            company_name: merge(&self.company_name, &other.company_name)?,
            rate_range,
        })
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Rows of `table` that pass every predicate in `spec`, in table order.
pub fn filter(table: &LoadTable, spec: &FilterSpec) -> LoadTable {
    if spec.is_noop() {
        return table.clone();
    }
    let rows: Vec<Arc<LoadRow>> = table
        .rows()
        .iter()
        .filter(|row| spec.matches(row))
        .cloned()
        .collect();
    log::debug!("Filter {spec:?} kept {} of {} rows", rows.len(), table.len());
    LoadTable::from_rows(rows)
}

// ---------------------------------------------------------------------------
// Sidebar choices
// ---------------------------------------------------------------------------

/// The values each filter can take for a given table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub equipment_types: Vec<String>,
    /// Union of origin and destination states.
    pub states: Vec<String>,
    pub companies: Vec<String>,
    /// Smallest and largest dollar rate; `None` for an empty table.
    pub rate_bounds: Option<RateRange>,
}

impl FilterOptions {
    pub fn from_table(table: &LoadTable) -> Self {
        let mut equipment = BTreeSet::new();
        let mut states = BTreeSet::new();
        let mut companies = BTreeSet::new();
        let mut bounds: Option<RateRange> = None;

        for row in table.iter() {
            let p = row.posting();
            equipment.insert(p.equipment_type.clone());
            states.insert(p.origin.state.clone());
            states.insert(p.destination.state.clone());
            companies.insert(p.company_name.clone());

            let rate = row.rate_dollars();
            bounds = Some(match bounds {
                None => RateRange::new(rate, rate),
                Some(b) => RateRange::new(b.min.min(rate), b.max.max(rate)),
            });
        }

        FilterOptions {
            equipment_types: equipment.into_iter().collect(),
            states: states.into_iter().collect(),
            companies: companies.into_iter().collect(),
            rate_bounds: bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{load, posting, table, with_states};
    use crate::data::model::LoadPosting;
    use proptest::prelude::*;

    fn ids(t: &LoadTable) -> Vec<i64> {
        t.iter().map(|r| r.posting().id).collect()
    }

    #[test]
    fn state_matches_origin_or_destination() {
        let t = table(vec![
            with_states(posting(1), "IL", "NY"),
            with_states(posting(2), "IL", "CA"),
            with_states(posting(3), "TX", "IL"),
            with_states(posting(4), "TX", "CA"),
            with_states(posting(5), "AZ", "PA"),
        ]);
        let out = filter(&t, &FilterSpec::all().with_state("IL"));
        assert_eq!(ids(&out), vec![1, 2, 3]);
    }

    #[test]
    fn degenerate_rate_range_is_inclusive() {
        let t = table(vec![
            load(1, "A", "Van", 8_500),
            load(2, "A", "Van", 10_000),
            load(3, "A", "Van", 12_000),
        ]);
        let out = filter(&t, &FilterSpec::all().with_rate_range(100.0, 100.0));
        assert_eq!(ids(&out), vec![2]);
    }

    #[test]
    fn categories_combine_with_and() {
        let t = table(vec![
            load(1, "A", "Van", 10_000),
            load(2, "A", "Flatbed", 10_000),
            load(3, "B", "Van", 10_000),
        ]);
        let spec = FilterSpec::all().with_company("A").with_equipment("Van");
        assert_eq!(ids(&filter(&t, &spec)), vec![1]);
    }

    #[test]
    fn all_sentinel_is_no_constraint() {
        let t = table(vec![load(1, "A", "Van", 100), load(2, "B", "Reefer", 200)]);
        let spec = FilterSpec::all()
            .with_equipment(ALL)
            .with_state(ALL)
            .with_company(ALL);
        assert!(spec.is_noop());
        assert!(filter(&t, &spec).same_rows(&t));
    }

    #[test]
    fn out_of_data_bounds_are_accepted() {
        let t = table(vec![load(1, "A", "Van", 10_000)]);
        assert_eq!(filter(&t, &FilterSpec::all().with_rate_range(-1e9, 1e9)).len(), 1);
        assert!(filter(&t, &FilterSpec::all().with_rate_range(5e8, 1e9)).is_empty());
    }

    #[test]
    fn empty_table_filters_to_empty() {
        let out = filter(&LoadTable::empty(), &FilterSpec::all().with_state("IL"));
        assert!(out.is_empty());
    }

    #[test]
    fn conflicting_specs_do_not_intersect() {
        let a = FilterSpec::all().with_company("A");
        let b = FilterSpec::all().with_company("B");
        assert_eq!(a.intersect(&b), None);
        assert_eq!(
            a.intersect(&FilterSpec::all().with_company(ALL)),
            Some(FilterSpec::all().with_company("A"))
        );
    }

    #[test]
    fn options_are_sorted_and_deduplicated() {
        let t = table(vec![
            with_states(load(1, "Zeta", "Van", 9_000), "TX", "CA"),
            with_states(load(2, "Alpha", "Reefer", 15_000), "CA", "IL"),
            with_states(load(3, "Zeta", "Van", 12_000), "IL", "AZ"),
        ]);
        let opts = FilterOptions::from_table(&t);
        assert_eq!(opts.equipment_types, vec!["Reefer", "Van"]);
        assert_eq!(opts.states, vec!["AZ", "CA", "IL", "TX"]);
        assert_eq!(opts.companies, vec!["Alpha", "Zeta"]);
        assert_eq!(opts.rate_bounds, Some(RateRange::new(90.0, 150.0)));
        assert_eq!(FilterOptions::from_table(&LoadTable::empty()).rate_bounds, None);
    }

    // -- Property tests --

    const COMPANIES: [&str; 3] = ["A", "B", "C"];
    const EQUIPMENT: [&str; 3] = ["Van", "Reefer", "Flatbed"];
    const STATES: [&str; 4] = ["IL", "CA", "TX", "NY"];

    fn arb_posting() -> impl Strategy<Value = LoadPosting> {
        (0usize..3, 0usize..3, 0usize..4, 0usize..4, 0i64..50_000).prop_map(
            |(c, e, o, d, cents)| {
                with_states(load(cents, COMPANIES[c], EQUIPMENT[e], cents), STATES[o], STATES[d])
            },
        )
    }

    fn arb_choice(values: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::sample::select(values).prop_map(String::from))
    }

    fn arb_spec() -> impl Strategy<Value = FilterSpec> {
        (
            arb_choice(&EQUIPMENT),
            arb_choice(&STATES),
            arb_choice(&COMPANIES),
            prop::option::of((0u32..600, 0u32..600)),
        )
            .prop_map(|(equipment_type, state, company_name, range)| FilterSpec {
                equipment_type,
                state,
                company_name,
                rate_range: range.map(|(a, b)| RateRange::new(a.min(b) as f64, a.max(b) as f64)),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_filter_is_ordered_subset(
            postings in prop::collection::vec(arb_posting(), 0..30),
            spec in arb_spec(),
        ) {
            let t = table(postings);
            let out = filter(&t, &spec);
            // Every kept row is the same allocation as a source row, in order.
            let mut source = t.rows().iter();
            for kept in out.rows() {
                prop_assert!(source.any(|r| Arc::ptr_eq(r, kept)));
            }
            prop_assert!(out.iter().all(|r| spec.matches(r)));
            prop_assert_eq!(out.len(), t.iter().filter(|r| spec.matches(r)).count());
        }

        #[test]
        fn prop_noop_spec_is_identity(postings in prop::collection::vec(arb_posting(), 0..30)) {
            let t = table(postings);
            prop_assert!(filter(&t, &FilterSpec::all()).same_rows(&t));
        }

        #[test]
        fn prop_sequential_filters_compose(
            postings in prop::collection::vec(arb_posting(), 0..30),
            s1 in arb_spec(),
            s2 in arb_spec(),
        ) {
            let combined = s1.intersect(&s2);
            prop_assume!(combined.is_some());
            let t = table(postings);
            let stepwise = filter(&filter(&t, &s1), &s2);
            let at_once = filter(&t, &combined.unwrap());
            prop_assert!(stepwise.same_rows(&at_once));
        }
    }
}
