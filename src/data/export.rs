use super::model::Dataset;

/// File name offered for the filtered download.
pub const EXPORT_FILE_NAME: &str = "filtered_data.csv";
/// MIME type of the filtered download.
pub const EXPORT_MIME: &str = "text/csv";

/// A ready-to-save download.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode a dataset as UTF-8 CSV: header row in dataset column order, no
/// row index, fields quoted only when needed, quotes doubled.
///
/// Numbers use the shortest representation that parses back to the same
/// value, and missing cells are empty fields, so re-parsing yields the same
/// rows.
pub fn to_csv_bytes(subset: &Dataset) -> csv::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());
    writer.write_record(&subset.columns)?;
    for row in &subset.rows {
        writer.write_record(row.values.iter().map(|v| v.to_field()))?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Wrap the CSV encoding of `subset` as the `filtered_data.csv` artifact.
pub fn export_artifact(subset: &Dataset) -> csv::Result<ExportArtifact> {
    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME,
        mime: EXPORT_MIME,
        bytes: to_csv_bytes(subset)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_csv;
    use crate::data::model::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn writes_header_and_escapes_fields() {
        let ds = Dataset::new(
            vec!["CAS".into(), "Name".into(), "LC50".into()],
            vec![
                vec![text("50-00-0"), text("formaldehyde, \"37%\""), CellValue::Number(1.5)],
                vec![text("64-17-5"), text("ethanol"), CellValue::Missing],
            ],
        );
        let bytes = to_csv_bytes(&ds).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "CAS,Name,LC50\n50-00-0,\"formaldehyde, \"\"37%\"\"\",1.5\n64-17-5,ethanol,\n"
        );
    }

    #[test]
    fn reparses_to_the_same_rows() {
        let ds = Dataset::new(
            vec!["CAS".into(), "SMILES".into(), "EC50".into()],
            vec![
                vec![text("50-00-0"), text("C=O"), CellValue::Number(0.1 + 0.2)],
                vec![text("7732-18-5"), text("line\nbreak"), CellValue::Number(-1e-12)],
                vec![text("64-17-5"), CellValue::Missing, CellValue::Number(1e21)],
            ],
        );
        let back = parse_csv(&to_csv_bytes(&ds).unwrap()).unwrap();
        assert_eq!(back, ds);
    }

    #[test]
    fn empty_subset_keeps_header() {
        let ds = Dataset::new(vec!["CAS".into(), "LC50".into()], Vec::new());
        assert_eq!(to_csv_bytes(&ds).unwrap(), b"CAS,LC50\n");
    }

    #[test]
    fn artifact_is_named_for_download() {
        let ds = Dataset::new(vec!["CAS".into()], vec![vec![text("50-00-0")]]);
        let artifact = export_artifact(&ds).unwrap();
        assert_eq!(artifact.file_name, "filtered_data.csv");
        assert_eq!(artifact.mime, "text/csv");
        assert_eq!(artifact.bytes, b"CAS\n50-00-0\n");
    }
}
