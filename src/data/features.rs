//! Features table loading from the pipeline CSV

use super::types::{FeatureRecord, FeatureTable};
use std::path::Path;

/// Candidate file names under the data directory, in preference order.
/// The clustered file is produced by a later pipeline stage and wins
/// when both are present.
pub const FEATURES_FILES: [&str; 2] = [
    "data/tp53_features_with_similarity_clustered.csv",
    "data/tp53_features_with_similarity.csv",
];

/// Load the features table from the first candidate CSV that exists
/// under `base_dir`.
pub fn load_features(base_dir: &Path) -> Result<FeatureTable, String> {
    for fname in FEATURES_FILES {
        let path = base_dir.join(fname);
        if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            return parse_features_csv(&text, fname);
        }
    }
    Err(format!(
        "Could not find features file in '{}'. Expected one of: {} or {}",
        base_dir.join("data").display(),
        FEATURES_FILES[0],
        FEATURES_FILES[1]
    ))
}

/// Parse CSV text into a FeatureTable.
///
/// Column presence is decided here, once: the `cluster` flag and the set
/// of `frac_*` composition columns are fixed for the session. Blank cells
/// become absent fields. Integer columns are parsed through f64 because
/// pandas writes "393.0" for integer columns that ever held a NaN.
pub fn parse_features_csv(text: &str, source_file: &str) -> Result<FeatureTable, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV header: {}", e))?
        .clone();

    let col = |name: &str| headers.iter().position(|h| h == name);

    let id_col = col("id").ok_or("Features CSV has no 'id' column")?;
    let length_col = col("length");
    let identity_col = col("identity_to_human");
    let gc_col = col("GC_like");
    let cluster_col = col("cluster");
    let frac_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            h.strip_prefix("frac_")
                .map(|name| (i, name.to_string()))
        })
        .collect();

    let mut records = Vec::new();
    for (row_num, row) in reader.records().enumerate() {
        let row = row.map_err(|e| format!("Failed to parse CSV row {}: {}", row_num + 2, e))?;
        let field = |i: usize| row.get(i).unwrap_or("");

        let id = field(id_col).to_string();
        if id.is_empty() {
            return Err(format!("Row {} has an empty 'id' value", row_num + 2));
        }

        let length = length_col
            .map(|i| parse_opt_u64(field(i), "length", row_num + 2))
            .transpose()?
            .flatten();
        let identity_to_human = identity_col
            .map(|i| parse_opt_f64(field(i), "identity_to_human", row_num + 2))
            .transpose()?
            .flatten();
        let gc_like = gc_col
            .map(|i| parse_opt_u64(field(i), "GC_like", row_num + 2))
            .transpose()?
            .flatten();
        let cluster = cluster_col
            .map(|i| parse_opt_i64(field(i), "cluster", row_num + 2))
            .transpose()?
            .flatten();

        let mut composition = Vec::new();
        for (i, name) in &frac_cols {
            if let Some(value) = parse_opt_f64(field(*i), name, row_num + 2)? {
                composition.push((name.clone(), value));
            }
        }

        records.push(FeatureRecord {
            id,
            length,
            identity_to_human,
            gc_like,
            cluster,
            composition,
        });
    }

    Ok(FeatureTable {
        records,
        has_cluster: cluster_col.is_some(),
        source_file: source_file.to_string(),
    })
}

fn parse_opt_f64(value: &str, column: &str, row: usize) -> Result<Option<f64>, String> {
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("Row {}: invalid number '{}' in column '{}'", row, value, column))
}

fn parse_opt_u64(value: &str, column: &str, row: usize) -> Result<Option<u64>, String> {
    // Through f64 to accept pandas float formatting of integer columns
    match parse_opt_f64(value, column, row)? {
        Some(v) if v >= 0.0 => Ok(Some(v as u64)),
        Some(v) => Err(format!(
            "Row {}: negative value '{}' in column '{}'",
            row, v, column
        )),
        None => Ok(None),
    }
}

fn parse_opt_i64(value: &str, column: &str, row: usize) -> Result<Option<i64>, String> {
    Ok(parse_opt_f64(value, column, row)?.map(|v| v as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_table() {
        let csv = "id,length,identity_to_human,GC_like,cluster\n\
                   ELEPHANT_01,393,82.5,120,0\n\
                   HUMAN_TP53,393,100.0,118,0\n";
        let table = parse_features_csv(csv, "test.csv").unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.has_cluster);
        let rec = table.find("ELEPHANT_01").unwrap();
        assert_eq!(rec.length, Some(393));
        assert_eq!(rec.identity_to_human, Some(82.5));
        assert_eq!(rec.gc_like, Some(120));
        assert_eq!(rec.cluster, Some(0));
    }

    #[test]
    fn test_parse_without_cluster_column() {
        let csv = "id,length,identity_to_human\nRTG_03,380,45.1\n";
        let table = parse_features_csv(csv, "test.csv").unwrap();
        assert!(!table.has_cluster);
        assert_eq!(table.find("RTG_03").unwrap().cluster, None);
    }

    #[test]
    fn test_blank_cells_are_absent_not_errors() {
        let csv = "id,length,identity_to_human,GC_like\nX,,55.0,\n";
        let table = parse_features_csv(csv, "test.csv").unwrap();
        let rec = table.find("X").unwrap();
        assert_eq!(rec.length, None);
        assert_eq!(rec.identity_to_human, Some(55.0));
        assert_eq!(rec.gc_like, None);
    }

    #[test]
    fn test_pandas_float_formatted_integers() {
        let csv = "id,length,GC_like\nY,393.0,120.0\n";
        let table = parse_features_csv(csv, "test.csv").unwrap();
        let rec = table.find("Y").unwrap();
        assert_eq!(rec.length, Some(393));
        assert_eq!(rec.gc_like, Some(120));
    }

    #[test]
    fn test_nan_cell_is_absent() {
        let csv = "id,identity_to_human\nZ,NaN\n";
        let table = parse_features_csv(csv, "test.csv").unwrap();
        assert_eq!(table.find("Z").unwrap().identity_to_human, None);
    }

    #[test]
    fn test_composition_columns() {
        let csv = "id,frac_A,frac_C,frac_W\nQ,0.08,0.02,0.01\n";
        let table = parse_features_csv(csv, "test.csv").unwrap();
        let rec = table.find("Q").unwrap();
        assert_eq!(
            rec.composition,
            vec![
                ("A".to_string(), 0.08),
                ("C".to_string(), 0.02),
                ("W".to_string(), 0.01)
            ]
        );
    }

    #[test]
    fn test_missing_id_column_is_error() {
        let csv = "name,length\nfoo,10\n";
        assert!(parse_features_csv(csv, "test.csv").is_err());
    }

    #[test]
    fn test_malformed_number_is_error() {
        let csv = "id,length\nfoo,not_a_number\n";
        assert!(parse_features_csv(csv, "test.csv").is_err());
    }

    #[test]
    fn test_row_order_preserved() {
        let csv = "id\nB_SECOND\nA_FIRST\n";
        let table = parse_features_csv(csv, "test.csv").unwrap();
        assert_eq!(table.ids(), vec!["B_SECOND", "A_FIRST"]);
    }

    fn write_candidate(base: &std::path::Path, fname: &str, csv: &str) {
        let path = base.join(fname);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, csv).unwrap();
    }

    #[test]
    fn test_load_prefers_clustered_file() {
        let dir = tempfile::tempdir().unwrap();
        write_candidate(dir.path(), FEATURES_FILES[0], "id,cluster\nCLUSTERED_ROW,0\n");
        write_candidate(dir.path(), FEATURES_FILES[1], "id\nPLAIN_ROW\n");
        let table = load_features(dir.path()).unwrap();
        assert_eq!(table.source_file, FEATURES_FILES[0]);
        assert!(table.has_cluster);
        assert!(table.find("CLUSTERED_ROW").is_some());
        assert!(table.find("PLAIN_ROW").is_none());
    }

    #[test]
    fn test_load_falls_back_to_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        write_candidate(dir.path(), FEATURES_FILES[1], "id\nPLAIN_ROW\n");
        let table = load_features(dir.path()).unwrap();
        assert_eq!(table.source_file, FEATURES_FILES[1]);
        assert!(!table.has_cluster);
        assert!(table.find("PLAIN_ROW").is_some());
    }

    #[test]
    fn test_load_with_no_candidate_names_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_features(dir.path()).unwrap_err();
        assert!(error.contains(FEATURES_FILES[0]));
        assert!(error.contains(FEATURES_FILES[1]));
    }
}
