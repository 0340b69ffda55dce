//! Fixed Board Columns
//!
//! The board always shows exactly three columns. A column's title doubles
//! as its identifier and as the status value stored remotely.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three fixed columns, in left-to-right order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ColumnId {
    #[default]
    #[serde(rename = "Pendiente")]
    Pendiente,
    #[serde(rename = "En proceso")]
    EnProceso,
    #[serde(rename = "Completados")]
    Completados,
}

impl ColumnId {
    /// All columns in display order. The first one is the default.
    pub const ALL: [ColumnId; 3] = [ColumnId::Pendiente, ColumnId::EnProceso, ColumnId::Completados];

    pub fn title(&self) -> &'static str {
        match self {
            ColumnId::Pendiente => "Pendiente",
            ColumnId::EnProceso => "En proceso",
            ColumnId::Completados => "Completados",
        }
    }

    /// Left-to-right rank among the columns
    pub fn position(&self) -> usize {
        match self {
            ColumnId::Pendiente => 0,
            ColumnId::EnProceso => 1,
            ColumnId::Completados => 2,
        }
    }

    /// Exact, case-sensitive title match
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.title() == title)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Column as shown on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub position: usize,
}

impl Column {
    /// Materialise the three fixed columns
    pub fn fixed() -> Vec<Column> {
        ColumnId::ALL
            .into_iter()
            .map(|id| Column {
                id,
                title: id.title().to_string(),
                position: id.position(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_columns_are_ordered() {
        let columns = Column::fixed();
        let titles: Vec<_> = columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Pendiente", "En proceso", "Completados"]);
        assert!(columns.iter().enumerate().all(|(i, c)| c.position == i));
    }

    #[test]
    fn test_from_title_is_exact() {
        assert_eq!(ColumnId::from_title("En proceso"), Some(ColumnId::EnProceso));
        assert_eq!(ColumnId::from_title("en proceso"), None);
        assert_eq!(ColumnId::from_title(" Pendiente"), None);
        assert_eq!(ColumnId::from_title(""), None);
    }

    #[test]
    fn test_serializes_as_title() {
        let json = serde_json::to_string(&ColumnId::EnProceso).unwrap();
        assert_eq!(json, "\"En proceso\"");
    }
}
