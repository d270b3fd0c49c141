use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::{LoadRow, LoadTable};

/// One exported line: the dashboard table columns plus the derived ones.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    id: i64,
    reference_number: &'a str,
    route: &'a str,
    equipment_type: &'a str,
    rate_dollars: f64,
    rate_per_mile_dollars: f64,
    distance_miles: u64,
    weight: i64,
    company_name: &'a str,
    posted_date: String,
    pickup_date: String,
}

impl<'a> From<&'a LoadRow> for ExportRow<'a> {
    fn from(row: &'a LoadRow) -> Self {
        let p = row.posting();
        ExportRow {
            id: p.id,
            reference_number: &p.reference_number,
            route: row.route(),
            equipment_type: &p.equipment_type,
            rate_dollars: row.rate_dollars(),
            rate_per_mile_dollars: row.rate_per_mile_dollars(),
            distance_miles: p.distance_miles,
            weight: p.weight,
            company_name: &p.company_name,
            posted_date: row.posted_at().format("%Y-%m-%d %H:%M:%S").to_string(),
            pickup_date: row.pickup_at().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Write `table` as CSV with a header row. An empty table still gets the header.
pub fn write_csv<W: Write>(table: &LoadTable, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer
        .write_record([
            "id",
            "referenceNumber",
            "route",
            "equipmentType",
            "rateDollars",
            "ratePerMileDollars",
            "distanceMiles",
            "weight",
            "companyName",
            "postedDate",
            "pickupDate",
        ])
        .context("writing CSV header")?;
    for row in table.iter() {
        writer
            .serialize(ExportRow::from(row))
            .with_context(|| format!("writing load {}", row.posting().id))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

pub fn export_csv(table: &LoadTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(table, file)?;
    log::info!("Exported {table} to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{posting, table};

    #[test]
    fn writes_header_and_derived_columns() {
        let t = table(vec![posting(1)]);
        let mut buf = Vec::new();
        write_csv(&t, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,referenceNumber,route,equipmentType,rateDollars,ratePerMileDollars,distanceMiles,weight,companyName,postedDate,pickupDate"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,REF100001,\"Chicago, IL → New York, NY\",Dry Van,129.0,1.29,100,25000,Koola Logistics LLC,2025-10-12 20:39:27,2025-10-15 04:21:59"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_table_exports_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loads.csv");
        export_csv(&LoadTable::empty(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
