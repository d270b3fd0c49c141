use std::path::PathBuf;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

pub const DATA_PATH_VAR: &str = "NEXTLOAD_DATA";
pub const TOP_ROUTES_VAR: &str = "NEXTLOAD_TOP_ROUTES";
pub const TOP_COMPANIES_VAR: &str = "NEXTLOAD_TOP_COMPANIES";
pub const PERFORMANCE_ROWS_VAR: &str = "NEXTLOAD_PERFORMANCE_ROWS";
pub const HISTOGRAM_BINS_VAR: &str = "NEXTLOAD_HISTOGRAM_BINS";

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Source file loaded at startup.
    pub data_path: PathBuf,
    pub top_routes: usize,
    pub top_companies: usize,
    /// Rows in the company performance table.
    pub performance_rows: usize,
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("sample_data.json"),
            top_routes: 10,
            top_companies: 15,
            performance_rows: 10,
            histogram_bins: 50,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unparseable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(DATA_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        override_with(&lookup, TOP_ROUTES_VAR, &mut config.top_routes);
        override_with(&lookup, TOP_COMPANIES_VAR, &mut config.top_companies);
        override_with(&lookup, PERFORMANCE_ROWS_VAR, &mut config.performance_rows);
        override_with(&lookup, HISTOGRAM_BINS_VAR, &mut config.histogram_bins);
        config
    }
}

fn override_with<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(v) => *slot = v,
        Err(_) => log::warn!("Ignoring {key}={raw:?}: not a valid number"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(DashboardConfig::from_lookup(lookup(&[])), DashboardConfig::default());
    }

    #[test]
    fn overrides_apply_and_bad_numbers_are_ignored() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (DATA_PATH_VAR, "/srv/loads.parquet"),
            (TOP_ROUTES_VAR, " 5 "),
            (HISTOGRAM_BINS_VAR, "many"),
        ]));
        assert_eq!(config.data_path, PathBuf::from("/srv/loads.parquet"));
        assert_eq!(config.top_routes, 5);
        assert_eq!(config.histogram_bins, 50);
        assert_eq!(config.top_companies, 15);
    }
}
