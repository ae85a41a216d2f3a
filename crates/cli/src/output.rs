//! Output formatting for flattened rows

use anyhow::Result;
use lokq_protocol::{RowCursor, ValueType};

/// Output format
#[derive(Debug, Clone, Copy)]
pub enum Format {
    /// Human-readable text (default)
    Table,
    /// One JSON object per row
    Json,
}

impl Format {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "j" => Format::Json,
            _ => Format::Table,
        }
    }
}

/// Row printer driven by the cursor's field accessors
pub struct Formatter {
    format: Format,
}

impl Formatter {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// Print the cursor's current row to stdout
    pub fn print_row(&self, cursor: &RowCursor) -> Result<()> {
        match self.format {
            Format::Table => self.print_table(cursor),
            Format::Json => self.print_json(cursor),
        }
    }

    fn print_table(&self, cursor: &RowCursor) -> Result<()> {
        let labels = cursor
            .labels()?
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");
        let timestamp = cursor.timestamp()?.to_rfc3339();

        match cursor.schema().value_type {
            ValueType::Text => {
                println!("{timestamp}  {{{labels}}}  {}", cursor.value_text()?);
            }
            ValueType::Double => {
                println!("{timestamp}  {{{labels}}}  {}", cursor.value_double()?);
            }
        }
        Ok(())
    }

    fn print_json(&self, cursor: &RowCursor) -> Result<()> {
        let value = match cursor.schema().value_type {
            ValueType::Text => serde_json::Value::from(cursor.value_text()?),
            ValueType::Double => serde_json::Value::from(cursor.value_double()?),
        };
        let row = serde_json::json!({
            "labels": cursor.labels()?.as_ref(),
            "timestamp": cursor.timestamp()?.to_rfc3339(),
            "value": value,
        });
        println!("{row}");
        Ok(())
    }
}
