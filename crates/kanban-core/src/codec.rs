//! Column Field Codec
//!
//! The remote todo API has no column concept. Column membership is stored
//! in two text fields, `completed` and `category`. This module is the only
//! place that knows about that encoding.

use crate::column::ColumnId;

/// Remote field pair carrying a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFields {
    pub completed: String,
    pub category: String,
}

/// Classify a remote item into a column.
///
/// `category` wins when it names a column exactly, then `completed`,
/// then the first column.
pub fn derive_column(completed: &str, category: &str) -> ColumnId {
    ColumnId::from_title(category)
        .or_else(|| ColumnId::from_title(completed))
        .unwrap_or_default()
}

/// Write a column into both remote fields
pub fn encode_column(column: ColumnId) -> ColumnFields {
    ColumnFields {
        completed: column.title().to_string(),
        category: column.title().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_takes_precedence() {
        assert_eq!(derive_column("Pendiente", "Completados"), ColumnId::Completados);
    }

    #[test]
    fn test_falls_back_to_completed() {
        assert_eq!(derive_column("En proceso", ""), ColumnId::EnProceso);
        assert_eq!(derive_column("En proceso", "trabajo"), ColumnId::EnProceso);
    }

    #[test]
    fn test_defaults_to_first_column() {
        assert_eq!(derive_column("", ""), ColumnId::Pendiente);
        assert_eq!(derive_column("true", "personal"), ColumnId::Pendiente);
        assert_eq!(derive_column("completados", "EN PROCESO"), ColumnId::Pendiente);
    }

    #[test]
    fn test_encoded_fields_derive_back() {
        for column in ColumnId::ALL {
            let fields = encode_column(column);
            assert_eq!(fields.completed, column.title());
            assert_eq!(derive_column(&fields.completed, &fields.category), column);
        }
    }
}
