//! NOC code to region name lookup.

use std::collections::HashMap;

use super::source::DataTable;

/// Column holding the NOC code in the lookup file.
pub const NOC_COLUMN: &str = "NOC";
/// Column holding the region name in the lookup file.
pub const REGION_COLUMN: &str = "region";

/// Many-to-one mapping from NOC code to a human-readable region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionLookup {
    regions: HashMap<String, String>,
}

impl RegionLookup {
    /// Build a lookup from a loaded table.
    ///
    /// Returns the names of the required columns that are missing when the
    /// table cannot serve as a lookup. Blank regions are left out so those
    /// codes resolve as unmatched; the first mapping for a code wins.
    pub fn from_table(table: &DataTable) -> Result<Self, Vec<&'static str>> {
        let noc_idx = table.column_index(NOC_COLUMN);
        let region_idx = table.column_index(REGION_COLUMN);

        let (noc_idx, region_idx) = match (noc_idx, region_idx) {
            (Some(n), Some(r)) => (n, r),
            (n, r) => {
                let mut missing = Vec::new();
                if n.is_none() {
                    missing.push(NOC_COLUMN);
                }
                if r.is_none() {
                    missing.push(REGION_COLUMN);
                }
                return Err(missing);
            }
        };

        let mut regions = HashMap::new();
        for row in &table.rows {
            let noc = row.get(noc_idx).map(|s| s.trim()).unwrap_or("");
            let region = row.get(region_idx).map(|s| s.trim()).unwrap_or("");
            if DataTable::is_null_value(noc) || DataTable::is_null_value(region) {
                continue;
            }
            regions
                .entry(noc.to_string())
                .or_insert_with(|| region.to_string());
        }

        Ok(Self { regions })
    }

    /// Build a lookup from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut regions = HashMap::new();
        for (noc, region) in pairs {
            regions.entry(noc.into()).or_insert_with(|| region.into());
        }
        Self { regions }
    }

    /// Resolve a NOC code.
    pub fn get(&self, noc: &str) -> Option<&str> {
        self.regions.get(noc).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        DataTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_from_table() {
        let t = table(
            &["NOC", "region", "notes"],
            &[
                &["FRG", "Germany", ""],
                &["GER", "Germany", ""],
                &["ROT", "NA", "Refugee Olympic Team"],
            ],
        );
        let lookup = RegionLookup::from_table(&t).unwrap();

        assert_eq!(lookup.get("FRG"), Some("Germany"));
        assert_eq!(lookup.get("GER"), Some("Germany"));
        assert_eq!(lookup.get("ROT"), None);
        assert_eq!(lookup.len(), 2);
    }

    #[test]
    fn test_missing_columns() {
        let t = table(&["code", "name"], &[&["USA", "USA"]]);
        let missing = RegionLookup::from_table(&t).unwrap_err();
        assert_eq!(missing, vec!["NOC", "region"]);
    }

    #[test]
    fn test_first_mapping_wins() {
        let lookup = RegionLookup::from_pairs([("SGP", "Singapore"), ("SGP", "Other")]);
        assert_eq!(lookup.get("SGP"), Some("Singapore"));
    }
}
