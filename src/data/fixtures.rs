use std::sync::Arc;

use serde_json::{json, Value as JsonValue};

use super::model::{LoadPosting, LoadRow, LoadTable, Location};

pub fn posting(id: i64) -> LoadPosting {
    LoadPosting {
        id,
        reference_number: format!("REF{}", 100_000 + id),
        tracking_number: format!("TRK{}", 100_000 + id),
        posted_timestamp: 1_760_301_567_626,
        pickup_timestamp: 1_760_502_119_495,
        dropoff_timestamp: None,
        comments: None,
        rate_cents: 12_900,
        rate_cents_per_mile: 129,
        origin: Location {
            key: -1_234_567_890,
            city: "Chicago".into(),
            state: "IL".into(),
            latitude: 41.8781,
            longitude: -87.6298,
        },
        destination: Location {
            key: 987_654_321,
            city: "New York".into(),
            state: "NY".into(),
            latitude: 40.7128,
            longitude: -74.0060,
        },
        distance_miles: 100,
        origin_deadhead: None,
        destination_deadhead: None,
        equipment_type: "Dry Van".into(),
        weight: 25_000,
        length: 48,
        dot_number: Some("1234567".into()),
        mc_number: Some("123456".into()),
        company_name: "Koola Logistics LLC".into(),
        company_email: "ops@koolalogisticsllc.com".into(),
        company_phone: "(555) 123-4567".into(),
        contact_name: None,
        contact_email: None,
        contact_phone: Some("5551234567".into()),
        value: 0.15,
        viewed: true,
        credit: true,
    }
}

pub fn row(id: i64) -> LoadRow {
    LoadRow::new(posting(id)).unwrap()
}

pub fn table(postings: Vec<LoadPosting>) -> LoadTable {
    LoadTable::from_rows(
        postings
            .into_iter()
            .map(|p| Arc::new(LoadRow::new(p).unwrap()))
            .collect(),
    )
}

/// Posting with the fields most aggregations key on.
pub fn load(id: i64, company: &str, equipment: &str, rate_cents: i64) -> LoadPosting {
    let mut p = posting(id);
    p.company_name = company.into();
    p.equipment_type = equipment.into();
    p.rate_cents = rate_cents;
    p
}

pub fn with_states(mut p: LoadPosting, origin: &str, destination: &str) -> LoadPosting {
    p.origin.state = origin.into();
    p.destination.state = destination.into();
    p
}

/// Source record as it appears in `sample_data.json`.
pub fn record_json(id: i64) -> JsonValue {
    json!({
        "id": id,
        "referenceNumber": format!("REF{}", 100_000 + id),
        "trackingNumber": format!("TRK{}", 100_000 + id),
        "postedTimestamp": 1_760_301_567_626_i64,
        "pickupTimestamp": 1_760_502_119_495_i64,
        "dropoffTimestamp": null,
        "comments": format!("Load {id} - Standard delivery"),
        "rateCents": 8500,
        "rateCentsPerMile": 85,
        "originKey": -1_234_567_891_i64,
        "originCity": "Los Angeles",
        "originState": "CA",
        "originLatitude": 34.0522,
        "originLongitude": -118.2437,
        "destinationKey": 987_654_322,
        "destinationCity": "Houston",
        "destinationState": "TX",
        "destinationLatitude": 29.7604,
        "destinationLongitude": -95.3698,
        "distanceMiles": 1547,
        "originDeadhead": null,
        "destinationDeadhead": null,
        "equipmentType": "Reefer",
        "weight": 35000,
        "length": 53,
        "dotNumber": "2345678",
        "mcNumber": "234567",
        "companyName": "Surge Transportation",
        "companyEmail": "ops@surgetransportation.com",
        "companyPhone": "(555) 234-5678",
        "contactName": null,
        "contactEmail": null,
        "contactPhone": "5552345678",
        "value": 0.25,
        "viewed": false,
        "credit": true
    })
}
