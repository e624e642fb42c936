use anyhow::Result;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::data::record::Record;
use crate::ui::columns::{ColumnKind, ColumnSpec};
use crate::ui::render_state::RenderState;

/// Text for one cell of a record under a column
pub fn cell_text(record: &Record, column: &ColumnSpec) -> String {
    match column.kind {
        ColumnKind::Button => column
            .button
            .as_ref()
            .map(|button| format!("[{}]", button.label))
            .unwrap_or_default(),
        ColumnKind::Currency => match column.display_field().and_then(|f| record.field(f)) {
            Some(Value::Number(n)) => n
                .as_f64()
                .map(format_currency)
                .unwrap_or_else(|| n.to_string()),
            other => value_text(other.as_ref()),
        },
        ColumnKind::Url | ColumnKind::Text => {
            value_text(column.display_field().and_then(|f| record.field(f)).as_ref())
        }
    }
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(v) => v.to_string(),
    }
}

fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Build the visible page as a table, with a leading selection marker
pub fn build_table(state: &RenderState, use_glyphs: bool) -> Table {
    let (checked, unchecked) = if use_glyphs {
        ("☑", "☐")
    } else {
        ("[x]", "[ ]")
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut headers = vec![
        Cell::new("").add_attribute(Attribute::Bold),
        Cell::new("Id").add_attribute(Attribute::Bold),
    ];
    headers.extend(
        state
            .columns
            .iter()
            .map(|column| Cell::new(column.header()).add_attribute(Attribute::Bold)),
    );
    table.set_header(headers);

    for record in &state.visible_page {
        let selected = state.is_selected(&record.id);
        let marker = Cell::new(if selected { checked } else { unchecked });
        let marker = if selected {
            marker.fg(Color::Green)
        } else {
            marker
        };

        let mut row = vec![marker, Cell::new(record.id.as_str())];
        row.extend(
            state
                .columns
                .iter()
                .map(|column| Cell::new(cell_text(record, column))),
        );
        table.add_row(row);
    }

    table
}

/// Write the given records to CSV, one column per field seen
///
/// `oppId` and `name` come first, the remaining fields in sorted order.
/// Returns the number of rows written.
pub fn export_records_csv(records: &[&Record], path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;

    let extra: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.attributes.keys().map(String::as_str))
        .collect();

    let mut headers = vec!["oppId", "name"];
    headers.extend(extra.iter().copied());
    wtr.write_record(&headers)?;

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|field| value_text(record.field(field).as_ref()))
            .collect();
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    info!(target: "export", "Exported {} records to {}", records.len(), path.display());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::paginator::RecordRange;
    use crate::data::record::RecordId;
    use crate::ui::columns::default_columns;

    fn record() -> Record {
        Record::new("006A", "Acme Renewal")
            .with_attribute("accountName", "Acme Corp")
            .with_attribute("stageName", "Negotiation")
            .with_attribute("amount", 1234567.5)
    }

    #[test]
    fn test_cell_text_per_column_kind() {
        let columns = default_columns();
        let record = record();

        assert_eq!(cell_text(&record, &columns[0]), "Acme Renewal");
        assert_eq!(cell_text(&record, &columns[1]), "Acme Corp");
        assert_eq!(cell_text(&record, &columns[3]), "");
        assert_eq!(cell_text(&record, &columns[4]), "$1,234,567.50");
        assert_eq!(cell_text(&record, &columns[5]), "[API]");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-42.1), "-$42.10");
    }

    #[test]
    fn test_table_marks_selected_rows() {
        let state = RenderState {
            visible_page: vec![record(), Record::new("006B", "Other")],
            columns: default_columns(),
            selected_identities: vec![RecordId::from("006A")],
            range: RecordRange {
                start: 1,
                end: 2,
                total: 2,
            },
            page: 1,
            total_pages: 1,
            query: String::new(),
            error: None,
        };

        let rendered = build_table(&state, false).to_string();
        assert!(rendered.contains("[x]"));
        assert!(rendered.contains("[ ]"));
        assert!(rendered.contains("Opportunity name"));
    }

    #[test]
    fn test_export_records_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selected.csv");
        let first = record();
        let second = Record::new("006B", "Globex").with_attribute("type", "New Business");

        let written = export_records_csv(&[&first, &second], &path).unwrap();
        assert_eq!(written, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("oppId,name,accountName,amount,stageName,type")
        );
        assert_eq!(
            lines.next(),
            Some("006A,Acme Renewal,Acme Corp,1234567.5,Negotiation,")
        );
        assert_eq!(lines.next(), Some("006B,Globex,,,,New Business"));
    }
}
