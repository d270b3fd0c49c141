//! Writes a synthetic `sample_data.json` with `N` load postings (default 100).
//!
//! Usage: `generate_sample [N] [OUTPUT]`

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};

use nextload_dashboard::data::loader::RECORDS_KEY;

struct City {
    name: &'static str,
    state: &'static str,
    lat: f64,
    lon: f64,
}

const fn city(name: &'static str, state: &'static str, lat: f64, lon: f64) -> City {
    City { name, state, lat, lon }
}

const CITIES: [City; 20] = [
    city("Chicago", "IL", 41.8781, -87.6298),
    city("New York", "NY", 40.7128, -74.0060),
    city("Los Angeles", "CA", 34.0522, -118.2437),
    city("Houston", "TX", 29.7604, -95.3698),
    city("Phoenix", "AZ", 33.4484, -112.0740),
    city("Philadelphia", "PA", 39.9526, -75.1652),
    city("San Antonio", "TX", 29.4241, -98.4936),
    city("San Diego", "CA", 32.7157, -117.1611),
    city("Dallas", "TX", 32.7767, -96.7970),
    city("San Jose", "CA", 37.3382, -121.8863),
    city("Austin", "TX", 30.2672, -97.7431),
    city("Jacksonville", "FL", 30.3322, -81.6557),
    city("Fort Worth", "TX", 32.7555, -97.3308),
    city("Columbus", "OH", 39.9612, -82.9988),
    city("Charlotte", "NC", 35.2271, -80.8431),
    city("San Francisco", "CA", 37.7749, -122.4194),
    city("Indianapolis", "IN", 39.7684, -86.1581),
    city("Seattle", "WA", 47.6062, -122.3321),
    city("Denver", "CO", 39.7392, -104.9903),
    city("Washington", "DC", 38.9072, -77.0369),
];

const EQUIPMENT_TYPES: [&str; 4] = ["Dry Van", "Reefer", "Flatbed", "Power Only"];

const COMPANIES: [&str; 10] = [
    "Koola Logistics LLC",
    "Surge Transportation",
    "JB Hunt",
    "Swift Transportation",
    "Schneider National",
    "Werner Enterprises",
    "Knight Transportation",
    "Prime Inc",
    "Covenant Transport",
    "USA Truck",
];

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    // Slices here are non-empty constants.
    &items[rng.gen_range(0..items.len())]
}

fn posting(rng: &mut StdRng, i: usize, now_ms: i64) -> Value {
    let origin = pick(rng, &CITIES);
    let destination = loop {
        let d = pick(rng, &CITIES);
        if d.name != origin.name {
            break d;
        }
    };

    // Manhattan distance in degrees, scaled to rough miles.
    let distance =
        (((origin.lat - destination.lat).abs() + (origin.lon - destination.lon).abs()) * 100.0)
            as i64;
    let rate_cents = (distance as f64 * rng.gen_range(1.5..3.0) * 100.0) as i64;
    let rate_per_mile = if distance > 0 { rate_cents / distance } else { 0 };

    let posted = now_ms - rng.gen_range(0..=7 * DAY_MS);
    let pickup = posted + rng.gen_range(HOUR_MS..=3 * DAY_MS);

    let email_company: String = pick(rng, &COMPANIES)
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '.')
        .collect();

    json!({
        "id": 568_188_000 + i as i64,
        "referenceNumber": format!("REF{}", 100_000 + i),
        "trackingNumber": format!("TRK{}", 100_000 + i),
        "postedTimestamp": posted,
        "pickupTimestamp": pickup,
        "dropoffTimestamp": null,
        "comments": format!("Load {} - Standard delivery", i + 1),
        "rateCents": rate_cents,
        "rateCentsPerMile": rate_per_mile,
        "originKey": rng.gen_range(-2_000_000_000_i64..=2_000_000_000),
        "originCity": origin.name,
        "originState": origin.state,
        "originLatitude": origin.lat,
        "originLongitude": origin.lon,
        "destinationKey": rng.gen_range(-2_000_000_000_i64..=2_000_000_000),
        "destinationCity": destination.name,
        "destinationState": destination.state,
        "destinationLatitude": destination.lat,
        "destinationLongitude": destination.lon,
        "distanceMiles": distance,
        "originDeadhead": null,
        "destinationDeadhead": null,
        "equipmentType": pick(rng, &EQUIPMENT_TYPES),
        "weight": rng.gen_range(10_000..=45_000),
        "length": *pick(rng, &[48, 53]),
        "dotNumber": rng.gen_range(1_000_000..=9_999_999).to_string(),
        "mcNumber": rng.gen_range(100_000..=999_999).to_string(),
        "companyName": pick(rng, &COMPANIES),
        "companyEmail": format!("ops@{email_company}.com"),
        "companyPhone": format!(
            "({}) {}-{}",
            rng.gen_range(200..=999),
            rng.gen_range(200..=999),
            rng.gen_range(1000..=9999)
        ),
        "contactName": null,
        "contactEmail": null,
        "contactPhone": rng.gen_range(2_000_000_000_i64..=9_999_999_999).to_string(),
        "value": rng.gen_range(0.05..0.5),
        "viewed": rng.gen_bool(0.5),
        "credit": rng.gen_bool(0.5),
    })
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let count: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid record count '{n}'"))?,
        None => 100,
    };
    let output_path = args.next().unwrap_or_else(|| "sample_data.json".to_string());

    let mut rng = StdRng::seed_from_u64(42);
    let now_ms = chrono::Utc::now().timestamp_millis();
    let postings: Vec<Value> = (0..count).map(|i| posting(&mut rng, i, now_ms)).collect();

    let companies: BTreeSet<&str> = postings
        .iter()
        .filter_map(|p| p["companyName"].as_str())
        .collect();
    let equipment: BTreeSet<&str> = postings
        .iter()
        .filter_map(|p| p["equipmentType"].as_str())
        .collect();
    let rates: Vec<i64> = postings.iter().filter_map(|p| p["rateCents"].as_i64()).collect();
    let distances: Vec<i64> = postings
        .iter()
        .filter_map(|p| p["distanceMiles"].as_i64())
        .collect();

    let mut document = serde_json::Map::new();
    document.insert(RECORDS_KEY.to_string(), Value::Array(postings.clone()));
    document.insert("timestamp".to_string(), json!(now_ms));
    document.insert("total".to_string(), json!(count));

    let text = serde_json::to_string_pretty(&Value::Object(document))?;
    std::fs::write(&output_path, text)
        .with_context(|| format!("Failed to write {output_path}"))?;

    println!("Generated {count} sample load postings");
    println!("Saved to {output_path}");
    println!();
    println!("Summary:");
    println!("- Companies: {}", companies.len());
    println!("- Equipment types: {}", equipment.len());
    if let (Some(lo), Some(hi)) = (rates.iter().min(), rates.iter().max()) {
        println!("- Rate range: ${:.0} - ${:.0}", *lo as f64 / 100.0, *hi as f64 / 100.0);
    }
    if let (Some(lo), Some(hi)) = (distances.iter().min(), distances.iter().max()) {
        println!("- Distance range: {lo} - {hi} miles");
    }
    Ok(())
}
