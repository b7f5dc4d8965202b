use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One spreadsheet row, columns A through E in order.
///
/// Cells missing from the end of a row stay `None` and are left out of the
/// JSON output entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record {
    /// Maps a row positionally. Anything past the fifth column is ignored.
    pub fn from_row(row: &[Value]) -> Self {
        let cell = |index: usize| row.get(index).map(cell_text);
        Self {
            name: cell(0),
            email: cell(1),
            phone: cell(2),
            address: cell(3),
            notes: cell(4),
        }
    }

    /// Column values in sheet order, for tabular display.
    pub fn columns(&self) -> [Option<&str>; 5] {
        [
            self.name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.address.as_deref(),
            self.notes.as_deref(),
        ]
    }
}

// Formatted values arrive as strings; anything else is kept as its JSON text.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
