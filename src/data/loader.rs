use std::io::Read;
use std::path::Path;
use std::time::Duration;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can stop a dataset from being produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not reach {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(String),

    #[error("malformed Parquet: {0}")]
    Parquet(String),

    #[error("the response is empty")]
    Empty,

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e.to_string())
    }
}

impl From<parquet::errors::ParquetError> for LoadError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        LoadError::Parquet(e.to_string())
    }
}

impl From<arrow::error::ArrowError> for LoadError {
    fn from(e: arrow::error::ArrowError) -> Self {
        LoadError::Parquet(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a URL or a local path.
///
/// `http://` and `https://` sources are fetched as CSV; anything else goes
/// through [`load_file`].
pub fn load(source: &str, timeout: Duration) -> Result<Dataset, LoadError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        load_url(source, timeout)
    } else {
        load_file(Path::new(source))
    }
}

/// Fetch a CSV resource over HTTP(S) and parse it.
pub fn load_url(url: &str, timeout: Duration) -> Result<Dataset, LoadError> {
    log::info!("Fetching dataset from {url}");
    let response = ureq::get(url)
        .timeout(timeout)
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(status, _) => LoadError::Status {
                url: url.to_string(),
                status,
            },
            ureq::Error::Transport(t) => LoadError::Fetch {
                url: url.to_string(),
                reason: t.to_string(),
            },
        })?;

    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;
    parse_csv(&body)
}

/// Load a local file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – header row plus data rows
/// * `.json`         – `[{ "CAS": "...", "LC50": 1.2, ... }, ...]`
/// * `.parquet`      – flat table of string / numeric / boolean columns
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    log::info!("Loading dataset from {}", path.display());
    match ext.as_str() {
        "csv" | "txt" => parse_csv(&std::fs::read(path)?),
        "json" => parse_json(&std::fs::read(path)?),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Parse CSV bytes with a header row.
///
/// Short rows are padded with missing cells; rows wider than the header are
/// rejected. A header with no data rows is a valid, empty dataset.
pub fn parse_csv(bytes: &[u8]) -> Result<Dataset, LoadError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LoadError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let header: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if header.is_empty() {
        return Err(LoadError::Empty);
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > header.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(row_no as u64 + 2);
            return Err(LoadError::Csv(csv::Error::from(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "line {line}: expected {} fields, saw {}",
                    header.len(),
                    record.len()
                ),
            ))));
        }
        rows.push(record.iter().map(CellValue::infer).collect());
    }

    Ok(Dataset::new(header, rows))
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).
///
/// Columns are the object keys in first-seen order; keys absent from a
/// record become missing cells. String values follow the CSV cell rules, so
/// `"1.5"` is a number and `"NA"` is missing.
pub fn parse_json(bytes: &[u8]) -> Result<Dataset, LoadError> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(LoadError::Empty);
    }
    let root: JsonValue = serde_json::from_slice(bytes)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Json("expected a top-level array".into()))?;

    let mut header: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Json(format!("row {i} is not an object")))?;
        for key in obj.keys() {
            if !header.contains(key) {
                header.push(key.clone());
            }
        }
    }
    if header.is_empty() {
        return Err(LoadError::Empty);
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            header
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Missing))
                .collect()
        })
        .collect();

    Ok(Dataset::new(header, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Null => CellValue::Missing,
        JsonValue::String(s) => CellValue::infer(s),
        JsonValue::Number(n) => n
            .as_f64()
            .filter(|v| !v.is_nan())
            .map(CellValue::Number)
            .unwrap_or(CellValue::Missing),
        JsonValue::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. String cells follow the CSV cell rules.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let header: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            rows.push(batch.columns().iter().map(|col| arrow_cell(col, row)).collect());
        }
    }

    Ok(Dataset::new(header, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Missing;
    }
    let number = |v: f64| {
        if v.is_nan() {
            CellValue::Missing
        } else {
            CellValue::Number(v)
        }
    };
    match col.data_type() {
        DataType::Utf8 => CellValue::infer(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => CellValue::infer(col.as_string::<i64>().value(row)),
        DataType::Int8 => number(col.as_primitive::<Int8Type>().value(row) as f64),
        DataType::Int16 => number(col.as_primitive::<Int16Type>().value(row) as f64),
        DataType::Int32 => number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::UInt8 => number(col.as_primitive::<UInt8Type>().value(row) as f64),
        DataType::UInt16 => number(col.as_primitive::<UInt16Type>().value(row) as f64),
        DataType::UInt32 => number(col.as_primitive::<UInt32Type>().value(row) as f64),
        DataType::UInt64 => number(col.as_primitive::<UInt64Type>().value(row) as f64),
        DataType::Float32 => number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Text(col.as_boolean().value(row).to_string()),
        other => CellValue::Text(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    use super::*;

    /// Serve one canned HTTP response on a local port; returns the URL.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let mut request = Vec::new();
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/hazards.csv")
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn parses_header_and_infers_types() {
        let csv = b"CAS,Name,SMILES,LC50\n50-00-0,Formaldehyde,C=O,1.5\n64-17-5,Ethanol,CCO,\n";
        let ds = parse_csv(csv).unwrap();
        assert_eq!(ds.columns, vec!["CAS", "Name", "SMILES", "LC50"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].values[3], CellValue::Number(1.5));
        assert_eq!(ds.rows[1].values[3], CellValue::Missing);
        assert_eq!(ds.rows[1].values[1], text("Ethanol"));
    }

    #[test]
    fn quoted_fields_keep_separators() {
        let csv = b"CAS,Name\n\"7732-18-5\",\"water, \"\"pure\"\"\"\n";
        let ds = parse_csv(csv).unwrap();
        assert_eq!(ds.rows[0].values[1], text("water, \"pure\""));
    }

    #[test]
    fn empty_body_is_an_error() {
        assert!(matches!(parse_csv(b""), Err(LoadError::Empty)));
        assert!(matches!(parse_csv(b"  \n\r\n"), Err(LoadError::Empty)));
    }

    #[test]
    fn byte_order_mark_alone_is_empty() {
        assert!(matches!(parse_csv(b"\xEF\xBB\xBF"), Err(LoadError::Empty)));
        assert!(matches!(parse_csv(b"\xEF\xBB\xBF \r\n\t"), Err(LoadError::Empty)));
    }

    #[test]
    fn header_only_is_an_empty_dataset() {
        let ds = parse_csv(b"CAS,LC50\n").unwrap();
        assert_eq!(ds.columns, vec!["CAS", "LC50"]);
        assert!(ds.is_empty());
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = parse_csv(b"a,b,c\n1\n").unwrap();
        assert_eq!(
            ds.rows[0].values,
            vec![CellValue::Number(1.0), CellValue::Missing, CellValue::Missing]
        );
    }

    #[test]
    fn wide_rows_are_malformed() {
        assert!(matches!(parse_csv(b"a,b\n1,2,3\n"), Err(LoadError::Csv(_))));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        assert!(matches!(parse_csv(b"a,b\n\xff\xfe,1\n"), Err(LoadError::Csv(_))));
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let ds = parse_csv(b"\xEF\xBB\xBFCAS\n50-00-0\n").unwrap();
        assert_eq!(ds.columns, vec!["CAS"]);
    }

    #[test]
    fn json_records_union_keys() {
        let json = br#"[{"CAS": "50-00-0", "LC50": 1.5}, {"CAS": "64-17-5", "EC50": null, "Flag": true}]"#;
        let ds = parse_json(json).unwrap();
        assert_eq!(ds.columns, vec!["CAS", "LC50", "EC50", "Flag"]);
        assert_eq!(ds.rows[1].values[1], CellValue::Missing);
        assert_eq!(ds.rows[1].values[2], CellValue::Missing);
        assert_eq!(ds.rows[1].values[3], text("true"));
    }

    #[test]
    fn json_strings_follow_csv_cell_rules() {
        let json = br#"[{"CAS": "50-00-0", "Code": "1.5", "Flag": "NA", "Note": ""}]"#;
        let ds = parse_json(json).unwrap();
        assert_eq!(
            ds.rows[0].values,
            vec![text("50-00-0"), CellValue::Number(1.5), CellValue::Missing, CellValue::Missing]
        );
    }

    #[test]
    fn json_without_columns_is_empty() {
        assert!(matches!(parse_json(b"[]"), Err(LoadError::Empty)));
        assert!(matches!(parse_json(b"[{}, {}]"), Err(LoadError::Empty)));
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(matches!(parse_json(br#"{"CAS": 1}"#), Err(LoadError::Json(_))));
        assert!(matches!(parse_json(b"[1, 2]"), Err(LoadError::Json(_))));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("hazards.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn http_error_status_is_reported() {
        let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        let err = load(&url, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, .. }), "{err}");
    }

    #[test]
    fn empty_http_body_is_empty() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let err = load(&url, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, LoadError::Empty), "{err}");
    }

    #[test]
    fn fetches_csv_over_http() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 30\r\nConnection: close\r\n\r\nCAS,LC50\n50-00-0,1.5\n64-17-5,\n",
        );
        let ds = load(&url, Duration::from_secs(5)).unwrap();
        assert_eq!(ds.columns, vec!["CAS", "LC50"]);
        assert_eq!(ds.rows[1].values, vec![text("64-17-5"), CellValue::Missing]);
    }

    #[test]
    fn unreachable_url_is_a_fetch_error() {
        let err = load("http://127.0.0.1:9/hazards.csv", Duration::from_secs(2)).unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }), "{err}");
    }
}
