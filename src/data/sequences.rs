//! Cleaned protein sequences, keyed by record ID

use bio::io::fasta;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// FASTA file of cleaned protein sequences under the data directory.
pub const SEQUENCES_FILE: &str = "data/tp53_cleaned_proteins.fasta";

/// ID -> protein sequence mapping, loaded once at startup.
///
/// Shares the ID namespace with the features table but is independent of
/// it: an ID present in one need not be present in the other, and no
/// cross-validation is performed.
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    sequences: HashMap<String, String>,
}

impl SequenceStore {
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.sequences.get(id).map(|s| s.as_str())
    }
}

/// Load the sequence store from `data/tp53_cleaned_proteins.fasta`
/// under `base_dir`.
pub fn load_sequences(base_dir: &Path) -> Result<SequenceStore, String> {
    let path = base_dir.join(SEQUENCES_FILE);
    let file = std::fs::File::open(&path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
    parse_sequences(io::BufReader::new(file))
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Parse FASTA records into a SequenceStore. The first record wins when
/// an ID repeats.
pub fn parse_sequences<R: io::Read>(reader: R) -> Result<SequenceStore, String> {
    let mut sequences = HashMap::new();
    for record in fasta::Reader::new(reader).records() {
        let record = record.map_err(|e| format!("Invalid FASTA record: {}", e))?;
        let seq = String::from_utf8_lossy(record.seq()).to_string();
        sequences.entry(record.id().to_string()).or_insert(seq);
    }
    Ok(SequenceStore { sequences })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_protein_fasta() {
        let fasta = ">ELEPHANT_01 some description\nMEEPQSDPSV\nEPPLSQETFS\n>HUMAN_TP53\nMEEPQSDPSV\n";
        let store = parse_sequences(fasta.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("ELEPHANT_01"), Some("MEEPQSDPSVEPPLSQETFS"));
        assert_eq!(store.get("HUMAN_TP53"), Some("MEEPQSDPSV"));
    }

    #[test]
    fn test_missing_id_is_none() {
        let store = parse_sequences(">A\nMEEP\n".as_bytes()).unwrap();
        assert_eq!(store.get("B"), None);
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let fasta = ">A\nMEEP\n>A\nQSDP\n";
        let store = parse_sequences(fasta.as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("A"), Some("MEEP"));
    }

    #[test]
    fn test_empty_input_is_empty_store() {
        let store = parse_sequences("".as_bytes()).unwrap();
        assert!(store.is_empty());
    }
}
