use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Number, Value as JsonValue};
use sha2::{Digest, Sha256};

use super::error::LoadError;
use super::model::{LoadPosting, LoadRow, LoadTable, Location};

/// One source record: field name → value, before validation.
pub type Record = Map<String, JsonValue>;

/// Top-level key holding the record array in JSON sources.
pub const RECORDS_KEY: &str = "load_postings";

// ---------------------------------------------------------------------------
// Source formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
    Parquet,
}

impl SourceFormat {
    /// Dispatch by file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "json" => Ok(SourceFormat::Json),
            "csv" => Ok(SourceFormat::Csv),
            "parquet" | "pq" => Ok(SourceFormat::Parquet),
            other => bail!("Unsupported file extension: .{other}"),
        }
    }

    fn tag(self) -> &'static [u8] {
        match self {
            SourceFormat::Json => b"json",
            SourceFormat::Csv => b"csv",
            SourceFormat::Parquet => b"parquet",
        }
    }
}

/// Parse raw source content into records. Parquet is read from `path`;
/// the other formats are parsed from `bytes`.
pub fn parse_records(path: &Path, bytes: &[u8], format: SourceFormat) -> Result<Vec<Record>> {
    match format {
        SourceFormat::Json => json_records(bytes),
        SourceFormat::Csv => csv_records(bytes),
        SourceFormat::Parquet => parquet_records(path),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Expected layout (extra top-level keys are ignored):
///
/// ```json
/// {
///   "load_postings": [ { "id": 568188000, "rateCents": 12900, ... }, ... ],
///   "timestamp": 1760301567626,
///   "total": 100
/// }
/// ```
///
/// A bare top-level array of records is accepted too.
fn json_records(bytes: &[u8]) -> Result<Vec<Record>> {
    let root: JsonValue = serde_json::from_slice(bytes).context("parsing JSON")?;

    let records = match root {
        JsonValue::Object(mut obj) => obj
            .remove(RECORDS_KEY)
            .with_context(|| format!("missing top-level '{RECORDS_KEY}' key"))?,
        array @ JsonValue::Array(_) => array,
        _ => bail!("Expected a JSON object or array at top level"),
    };

    let JsonValue::Array(records) = records else {
        bail!("'{RECORDS_KEY}' is not an array");
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| match rec {
            JsonValue::Object(obj) => Ok(obj),
            _ => bail!("Row {i} is not a JSON object"),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Header row with field names, one record per line. Cells stay text (empty
/// cells become null); typed fields are parsed when the record is built.
fn csv_records(bytes: &[u8]) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| {
                let value = if cell.trim().is_empty() {
                    JsonValue::Null
                } else {
                    JsonValue::String(cell.to_string())
                };
                (name.clone(), value)
            })
            .collect();
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Flat columns named after the record fields. Works with files written by
/// both Pandas (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn parquet_records(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        for row in 0..batch.num_rows() {
            let record: Record = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(i, field)| (field.name().clone(), arrow_cell(batch.column(i), row)))
                .collect();
            records.push(record);
        }
    }
    Ok(records)
}

fn arrow_cell(col: &ArrayRef, row: usize) -> JsonValue {
    if col.is_null(row) {
        return JsonValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => JsonValue::from(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => JsonValue::from(col.as_string::<i64>().value(row)),
        DataType::Int32 => JsonValue::from(col.as_primitive::<Int32Type>().value(row)),
        DataType::Int64 => JsonValue::from(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt32 => JsonValue::from(col.as_primitive::<UInt32Type>().value(row)),
        DataType::UInt64 => JsonValue::from(col.as_primitive::<UInt64Type>().value(row)),
        DataType::Float32 => float_cell(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => float_cell(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => JsonValue::Bool(col.as_boolean().value(row)),
        DataType::Null => JsonValue::Null,
        other => JsonValue::String(format!("{other:?}")),
    }
}

/// NaN is how Pandas stores a missing value in a numeric column.
fn float_cell(v: f64) -> JsonValue {
    Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number)
}

// ---------------------------------------------------------------------------
// Table builder
// ---------------------------------------------------------------------------

/// Build the table from parsed records. The first malformed record aborts
/// the whole load.
pub fn build_table(records: &[Record]) -> Result<LoadTable, LoadError> {
    let mut rows = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let fields = RecordFields { index, record };
        let posting = fields.posting()?;
        let row = LoadRow::new(posting)
            .map_err(|field| LoadError::malformed(index, field, "is out of range"))?;
        rows.push(Arc::new(row));
    }
    Ok(LoadTable::from_rows(rows))
}

/// Typed access to one record's fields. `null` counts as absent.
struct RecordFields<'a> {
    index: usize,
    record: &'a Record,
}

impl RecordFields<'_> {
    fn posting(&self) -> Result<LoadPosting, LoadError> {
        let distance = self.int("distanceMiles")?;
        let distance_miles =
            u64::try_from(distance).map_err(|_| self.invalid("distanceMiles", "is negative"))?;

        Ok(LoadPosting {
            id: self.int("id")?,
            reference_number: self.text("referenceNumber")?,
            tracking_number: self.text("trackingNumber")?,
            posted_timestamp: self.int("postedTimestamp")?,
            pickup_timestamp: self.int("pickupTimestamp")?,
            dropoff_timestamp: self.opt_int("dropoffTimestamp")?,
            comments: self.opt_text("comments")?,
            rate_cents: self.int("rateCents")?,
            rate_cents_per_mile: self.int("rateCentsPerMile")?,
            origin: self.location("origin")?,
            destination: self.location("destination")?,
            distance_miles,
            origin_deadhead: self.opt_float("originDeadhead")?,
            destination_deadhead: self.opt_float("destinationDeadhead")?,
            equipment_type: self.text("equipmentType")?,
            weight: self.int("weight")?,
            length: self.int("length")?,
            dot_number: self.opt_text("dotNumber")?,
            mc_number: self.opt_text("mcNumber")?,
            company_name: self.text("companyName")?,
            company_email: self.text("companyEmail")?,
            company_phone: self.text("companyPhone")?,
            contact_name: self.opt_text("contactName")?,
            contact_email: self.opt_text("contactEmail")?,
            contact_phone: self.opt_text("contactPhone")?,
            value: self.float("value")?,
            viewed: self.flag("viewed")?,
            credit: self.flag("credit")?,
        })
    }

    /// `prefix` is `origin` or `destination`.
    fn location(&self, prefix: &str) -> Result<Location, LoadError> {
        Ok(Location {
            key: self.int(&format!("{prefix}Key"))?,
            city: self.text(&format!("{prefix}City"))?,
            state: self.text(&format!("{prefix}State"))?,
            latitude: self.float(&format!("{prefix}Latitude"))?,
            longitude: self.float(&format!("{prefix}Longitude"))?,
        })
    }

    fn get(&self, field: &str) -> Option<&JsonValue> {
        self.record.get(field).filter(|v| !v.is_null())
    }

    fn invalid(&self, field: &str, reason: &str) -> LoadError {
        LoadError::malformed(self.index, field, reason)
    }

    fn required<T>(&self, field: &str, value: Option<T>) -> Result<T, LoadError> {
        value.ok_or_else(|| self.invalid(field, "is missing"))
    }

    fn typed<T>(
        &self,
        field: &str,
        expected: &str,
        convert: impl Fn(&JsonValue) -> Option<T>,
    ) -> Result<Option<T>, LoadError> {
        match self.get(field) {
            None => Ok(None),
            Some(v) => convert(v)
                .map(Some)
                .ok_or_else(|| self.invalid(field, &format!("is not {expected}"))),
        }
    }

    fn int(&self, field: &str) -> Result<i64, LoadError> {
        self.required(field, self.opt_int(field)?)
    }

    fn opt_int(&self, field: &str) -> Result<Option<i64>, LoadError> {
        self.typed(field, "an integer", as_int)
    }

    fn float(&self, field: &str) -> Result<f64, LoadError> {
        self.required(field, self.opt_float(field)?)
    }

    fn opt_float(&self, field: &str) -> Result<Option<f64>, LoadError> {
        self.typed(field, "a number", as_float)
    }

    fn text(&self, field: &str) -> Result<String, LoadError> {
        self.required(field, self.opt_text(field)?)
    }

    fn opt_text(&self, field: &str) -> Result<Option<String>, LoadError> {
        self.typed(field, "a string", as_text)
    }

    fn flag(&self, field: &str) -> Result<bool, LoadError> {
        self.required(field, self.typed(field, "a boolean", as_flag)?)
    }
}

/// Integers may arrive as whole floats from Parquet columns that held nulls,
/// or as text from CSV.
fn as_int(v: &JsonValue) -> Option<i64> {
    let whole = |f: f64| (f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64);
    match v {
        JsonValue::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => v.as_i64().or_else(|| v.as_f64().and_then(whole)),
    }
}

fn as_float(v: &JsonValue) -> Option<f64> {
    match v {
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => v.as_f64(),
    }
}

fn as_flag(v: &JsonValue) -> Option<bool> {
    match v {
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => v.as_bool(),
    }
}

/// Text is kept verbatim; JSON sources may carry identifiers as numbers.
fn as_text(v: &JsonValue) -> Option<String> {
    match v {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Content-keyed cache
// ---------------------------------------------------------------------------

type Fingerprint = [u8; 32];

fn fingerprint(format: SourceFormat, bytes: &[u8]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(format.tag());
    hasher.update(bytes);
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

/// Result of a load: always a table, plus the condition when it had to be
/// emptied.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: Arc<LoadTable>,
    pub problem: Option<LoadError>,
    /// False when identical content was already built.
    pub rebuilt: bool,
}

/// Memoizes the last successfully built table on the content of its source.
#[derive(Debug, Default)]
pub struct SourceCache {
    fingerprint: Option<Fingerprint>,
    table: Arc<LoadTable>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently cached table (empty before the first successful load).
    pub fn table(&self) -> Arc<LoadTable> {
        Arc::clone(&self.table)
    }

    /// Read and build `path`, reusing the cached table if its content is unchanged.
    pub fn load_path(&mut self, path: &Path) -> LoadOutcome {
        let read = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))
            .and_then(|bytes| Ok((bytes, SourceFormat::from_path(path)?)));

        match read {
            Ok((bytes, format)) => self.load_source(path, &bytes, format),
            Err(e) => self.fail(LoadError::unavailable(
                path.display().to_string(),
                format!("{e:#}"),
            )),
        }
    }

    /// Build from content already in memory. `path` is used for messages
    /// and, for Parquet, as the file to decode.
    pub fn load_source(&mut self, path: &Path, bytes: &[u8], format: SourceFormat) -> LoadOutcome {
        let fp = fingerprint(format, bytes);
        if self.fingerprint == Some(fp) {
            log::debug!("Source {} unchanged, reusing cached table", path.display());
            return LoadOutcome {
                table: self.table(),
                problem: None,
                rebuilt: false,
            };
        }

        let built = parse_records(path, bytes, format)
            .map_err(|e| LoadError::unavailable(path.display().to_string(), format!("{e:#}")))
            .and_then(|records| build_table(&records));

        match built {
            Ok(table) => {
                log::info!("Built {table} from {}", path.display());
                self.fingerprint = Some(fp);
                self.table = Arc::new(table);
                LoadOutcome {
                    table: self.table(),
                    problem: None,
                    rebuilt: true,
                }
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, problem: LoadError) -> LoadOutcome {
        log::warn!("Load failed: {problem}");
        self.fingerprint = None;
        self.table = Arc::new(LoadTable::empty());
        LoadOutcome {
            table: self.table(),
            problem: Some(problem),
            rebuilt: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::record_json;
    use serde_json::json;
    use std::io::Write;

    fn records(values: Vec<JsonValue>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    fn source_json(n: i64) -> Vec<u8> {
        let postings: Vec<JsonValue> = (0..n).map(record_json).collect();
        serde_json::to_vec(&json!({ "load_postings": postings, "timestamp": 0, "total": n }))
            .unwrap()
    }

    #[test]
    fn builds_rows_with_derived_columns() {
        let table = build_table(&records(vec![record_json(7)])).unwrap();
        assert_eq!(table.len(), 1);
        let row = table.iter().next().unwrap();
        assert_eq!(row.posting().id, 7);
        assert_eq!(row.rate_dollars(), 85.0);
        assert_eq!(row.rate_per_mile_dollars(), 0.85);
        assert_eq!(row.route(), "Los Angeles, CA → Houston, TX");
        assert_eq!(row.posting().contact_name, None);
        assert_eq!(row.posting().comments.as_deref(), Some("Load 7 - Standard delivery"));
    }

    #[test]
    fn missing_required_field_names_field_and_index() {
        let mut bad = record_json(1);
        bad.as_object_mut().unwrap().remove("originCity");
        let err = build_table(&records(vec![record_json(0), bad])).unwrap_err();
        assert_eq!(err, LoadError::malformed(1, "originCity", "is missing"));
    }

    #[test]
    fn null_required_field_is_missing() {
        let mut bad = record_json(0);
        bad["companyName"] = JsonValue::Null;
        let err = build_table(&records(vec![bad])).unwrap_err();
        assert_eq!(err, LoadError::malformed(0, "companyName", "is missing"));
    }

    #[test]
    fn wrong_type_and_negative_distance_are_malformed() {
        let mut bad = record_json(0);
        bad["rateCents"] = json!("lots");
        let err = build_table(&records(vec![bad])).unwrap_err();
        assert_eq!(err, LoadError::malformed(0, "rateCents", "is not an integer"));

        let mut bad = record_json(0);
        bad["distanceMiles"] = json!(-4);
        let err = build_table(&records(vec![bad])).unwrap_err();
        assert_eq!(err, LoadError::malformed(0, "distanceMiles", "is negative"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut rec = record_json(0);
        rec["somethingNew"] = json!({"nested": true});
        assert_eq!(build_table(&records(vec![rec])).unwrap().len(), 1);
    }

    #[test]
    fn json_accepts_keyed_object_and_bare_array() {
        let keyed = json_records(&source_json(3)).unwrap();
        assert_eq!(keyed.len(), 3);

        let bare = serde_json::to_vec(&json!([record_json(0)])).unwrap();
        assert_eq!(json_records(&bare).unwrap().len(), 1);

        assert!(json_records(br#"{"postings": []}"#).is_err());
        assert!(json_records(b"not json").is_err());
    }

    fn csv_text(rec: &JsonValue) -> String {
        let obj = rec.as_object().unwrap();
        let header: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        let cells: Vec<String> = obj
            .values()
            .map(|v| match v {
                JsonValue::Null => "\"\"".to_string(),
                JsonValue::String(s) => format!("\"{s}\""),
                other => format!("\"{other}\""),
            })
            .collect();
        format!("{}\n{}\n", header.join(","), cells.join(","))
    }

    #[test]
    fn csv_cells_are_parsed_per_field() {
        let parsed = csv_records(csv_text(&record_json(0)).as_bytes()).unwrap();
        let table = build_table(&parsed).unwrap();
        let row = table.iter().next().unwrap();
        assert_eq!(row.posting().rate_cents, 8500);
        assert_eq!(row.posting().dot_number.as_deref(), Some("2345678"));
        assert_eq!(row.posting().origin.latitude, 34.0522);
        assert!(!row.posting().viewed);
        assert!(row.posting().credit);
        assert_eq!(row.posting().dropoff_timestamp, None);
    }

    #[test]
    fn csv_identifiers_keep_their_source_text() {
        let mut rec = record_json(0);
        rec["referenceNumber"] = json!("007310");
        rec["mcNumber"] = json!("1e3");
        rec["contactPhone"] = json!("0155523456");
        let parsed = csv_records(csv_text(&rec).as_bytes()).unwrap();
        let table = build_table(&parsed).unwrap();
        let p = table.iter().next().unwrap().posting();
        assert_eq!(p.reference_number, "007310");
        assert_eq!(p.mc_number.as_deref(), Some("1e3"));
        assert_eq!(p.contact_phone.as_deref(), Some("0155523456"));
    }

    #[test]
    fn csv_typed_fields_reject_bad_text() {
        let mut rec = record_json(0);
        rec["weight"] = json!("heavy");
        let parsed = csv_records(csv_text(&rec).as_bytes()).unwrap();
        assert_eq!(
            build_table(&parsed).unwrap_err(),
            LoadError::malformed(0, "weight", "is not an integer")
        );
    }

    #[test]
    fn text_values_convert_on_demand() {
        assert_eq!(as_int(&json!(" 42 ")), Some(42));
        assert_eq!(as_int(&json!("35000.0")), Some(35_000));
        assert_eq!(as_int(&json!("1.5")), None);
        assert_eq!(as_float(&json!("-1.5")), Some(-1.5));
        assert_eq!(as_float(&json!("NaN")), None);
        assert_eq!(as_flag(&json!("True")), Some(true));
        assert_eq!(as_flag(&json!("yes")), None);
        assert_eq!(as_text(&json!(2345678)), Some("2345678".to_string()));
    }

    #[test]
    fn cache_reuses_table_for_identical_content() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(&source_json(4)).unwrap();
        file.flush().unwrap();

        let mut cache = SourceCache::new();
        let first = cache.load_path(file.path());
        assert!(first.problem.is_none());
        assert!(first.rebuilt);
        assert_eq!(first.table.len(), 4);

        let second = cache.load_path(file.path());
        assert!(!second.rebuilt);
        assert!(Arc::ptr_eq(&first.table, &second.table));
    }

    #[test]
    fn cache_rebuilds_when_content_changes() {
        let mut cache = SourceCache::new();
        let path = Path::new("postings.json");
        let a = cache.load_source(path, &source_json(2), SourceFormat::Json);
        let b = cache.load_source(path, &source_json(3), SourceFormat::Json);
        assert!(b.rebuilt);
        assert!(!Arc::ptr_eq(&a.table, &b.table));
        assert_eq!(cache.table().len(), 3);
    }

    #[test]
    fn missing_source_degrades_to_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SourceCache::new();
        let outcome = cache.load_path(&dir.path().join("absent.json"));
        assert!(outcome.table.is_empty());
        assert!(matches!(
            outcome.problem,
            Some(LoadError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn unsupported_extension_is_unavailable() {
        let mut file = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
        file.write_all(b"<loads/>").unwrap();
        let outcome = SourceCache::new().load_path(file.path());
        match outcome.problem {
            Some(LoadError::SourceUnavailable { reason, .. }) => {
                assert!(reason.contains("Unsupported file extension"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_record_empties_previous_table() {
        let mut cache = SourceCache::new();
        let path = Path::new("postings.json");
        cache.load_source(path, &source_json(2), SourceFormat::Json);

        let mut bad = record_json(0);
        bad.as_object_mut().unwrap().remove("weight");
        let bytes = serde_json::to_vec(&json!({ "load_postings": [bad] })).unwrap();
        let outcome = cache.load_source(path, &bytes, SourceFormat::Json);
        assert!(outcome.table.is_empty());
        assert_eq!(
            outcome.problem,
            Some(LoadError::malformed(0, "weight", "is missing"))
        );
        assert!(cache.table().is_empty());
    }

    #[test]
    fn parquet_columns_become_records() {
        use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let rec = record_json(5);
        let mut fields = Vec::new();
        let mut columns: Vec<ArrayRef> = Vec::new();
        for (name, value) in rec.as_object().unwrap() {
            let (dtype, array): (DataType, ArrayRef) = match value {
                JsonValue::String(s) => (DataType::Utf8, Arc::new(StringArray::from(vec![s.as_str()]))),
                JsonValue::Bool(b) => (DataType::Boolean, Arc::new(BooleanArray::from(vec![*b]))),
                JsonValue::Number(n) if n.is_i64() => {
                    (DataType::Int64, Arc::new(Int64Array::from(vec![n.as_i64().unwrap()])))
                }
                JsonValue::Number(n) => {
                    (DataType::Float64, Arc::new(Float64Array::from(vec![n.as_f64().unwrap()])))
                }
                _ => (
                    DataType::Float64,
                    Arc::new(Float64Array::from(vec![None::<f64>])),
                ),
            };
            fields.push(Field::new(name, dtype, true));
            columns.push(array);
        }
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let outcome = SourceCache::new().load_path(file.path());
        assert_eq!(outcome.problem, None);
        let row = outcome.table.iter().next().unwrap();
        assert_eq!(row.posting().id, 5);
        assert_eq!(row.posting().equipment_type, "Reefer");
        assert_eq!(row.posting().origin_deadhead, None);
        assert!(row.posting().credit);
    }
}
