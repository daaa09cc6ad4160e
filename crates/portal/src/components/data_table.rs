//! Data table component types.
//!
//! These types define the configuration for the list screens: column
//! headers and the filter bar above the table. Row cells stay hand-written
//! per template; the descriptors keep headers and filters consistent across
//! pages.

use serde::{Deserialize, Serialize};

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column holds a numeric value (right-aligned).
    pub numeric: bool,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            numeric: false,
        }
    }

    /// Create a right-aligned numeric column.
    #[must_use]
    pub fn numeric(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            numeric: true,
        }
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Text input filter.
    Text,
    /// Single-select dropdown.
    Select,
}

/// Filter definition for a data table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFilter {
    /// Filter parameter key (becomes the query parameter name).
    pub key: String,
    /// Display label.
    pub label: String,
    /// Filter type.
    pub filter_type: FilterType,
    /// Placeholder text (for text inputs).
    pub placeholder: Option<String>,
    /// Available options (for selects).
    pub options: Vec<FilterOption>,
    /// Currently selected/entered value, echoed back into the form.
    pub value: Option<String>,
}

/// Option for select filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

impl TableFilter {
    /// Create a text filter.
    #[must_use]
    pub fn text(key: &str, label: &str, placeholder: &str, value: Option<String>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Text,
            placeholder: Some(placeholder.to_string()),
            options: vec![],
            value,
        }
    }

    /// Create a select filter.
    #[must_use]
    pub fn select(
        key: &str,
        label: &str,
        options: Vec<FilterOption>,
        value: Option<String>,
    ) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            placeholder: None,
            options,
            value,
        }
    }

    /// Whether `option` is the currently selected value.
    #[must_use]
    pub fn is_selected(&self, option: &FilterOption) -> bool {
        self.value.as_deref() == Some(option.value.as_str())
    }

    /// Whether this renders as a text input. Used by templates.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.filter_type == FilterType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builders() {
        let col = TableColumn::new("customer", "Customer");
        assert!(!col.numeric);

        let amount = TableColumn::numeric("amount", "Amount");
        assert!(amount.numeric);
    }

    #[test]
    fn test_select_filter_tracks_selection() {
        let filter = TableFilter::select(
            "status",
            "Status",
            vec![
                FilterOption::new("PENDING", "Pending"),
                FilterOption::new("COMPLETED", "Completed"),
            ],
            Some("PENDING".to_string()),
        );
        assert!(filter.is_selected(&FilterOption::new("PENDING", "Pending")));
        assert!(!filter.is_selected(&FilterOption::new("COMPLETED", "Completed")));
    }
}
