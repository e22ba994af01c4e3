use std::collections::HashMap;

use crate::error::AppError;

/// Required columns, exact and case-sensitive as exported by the ticketing
/// tool. The import fails if any of them is absent.
pub const REQUIRED: &[&str] = &[
    "ID du ticket",
    "Type",
    "Organisation",
    "Date - Création (Europe/Paris)",
    "Date - Clôture (Europe/Paris)",
    "SLA - Clôture - Statut",
    "Priorité",
];

/// Maps column names to their index in a CSV record.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    /// Build a ColumnMap from the CSV header record.
    /// Header fields are trimmed of surrounding whitespace.
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut indices = HashMap::new();
        for (i, field) in headers.iter().enumerate() {
            indices.insert(field.trim().to_string(), i);
        }
        ColumnMap { indices }
    }

    /// Get the value of a named column from a record.
    pub fn get<'a>(&self, record: &'a csv::StringRecord, col: &str) -> Option<&'a str> {
        self.indices.get(col).and_then(|&i| record.get(i))
    }

    /// Returns true if the column is present in the CSV headers.
    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }
}

/// Validate that all required columns are present.
/// Returns `AppError::MissingColumns` listing every absent column.
pub fn validate_columns(col_map: &ColumnMap) -> Result<(), AppError> {
    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingColumns(missing))
    }
}
