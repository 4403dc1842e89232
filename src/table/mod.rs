//! Table module
//!
//! A small column-labelled integer table, serializable as row records and
//! renderable as an HTML `<table>`.

use std::fmt::Write as _;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column-labelled table with row-major cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<i64>>,
}

/// One row viewed as a `{column: value}` record, columns in table order
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [i64],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

impl Table {
    /// Build a table from named columns of equal length
    ///
    /// Longer columns are truncated to the shortest one.
    pub fn from_columns(columns: &[(&str, &[i64])]) -> Self {
        let height = columns.iter().map(|(_, cells)| cells.len()).min().unwrap_or(0);
        let rows = (0..height)
            .map(|i| columns.iter().map(|(_, cells)| cells[i]).collect())
            .collect();
        Self {
            columns: columns.iter().map(|(name, _)| (*name).to_string()).collect(),
            rows,
        }
    }

    /// The fixed demo table `{a: [1, 2, 3], b: [4, 5, 6]}`
    pub fn demo() -> Self {
        Self::from_columns(&[("a", &[1, 2, 3]), ("b", &[4, 5, 6])])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// (rows, columns)
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn records(&self) -> Vec<Record<'_>> {
        self.rows
            .iter()
            .map(|values| Record {
                columns: &self.columns,
                values,
            })
            .collect()
    }

    /// Render as an HTML table
    ///
    /// Layout: a header row led by an empty index cell, then one row per
    /// record led by its 0-based index.
    pub fn to_html(&self, classes: &str, table_id: &str) -> String {
        let mut html = String::new();
        let _ = writeln!(
            html,
            "<table border=\"1\" class=\"dataframe {}\" id=\"{}\">",
            escape_html(classes),
            escape_html(table_id)
        );
        html.push_str("  <thead>\n");
        html.push_str("    <tr style=\"text-align: right;\">\n");
        html.push_str("      <th></th>\n");
        for column in &self.columns {
            let _ = writeln!(html, "      <th>{}</th>", escape_html(column));
        }
        html.push_str("    </tr>\n");
        html.push_str("  </thead>\n");
        html.push_str("  <tbody>\n");
        for (index, row) in self.rows.iter().enumerate() {
            html.push_str("    <tr>\n");
            let _ = writeln!(html, "      <th>{index}</th>");
            for value in row {
                let _ = writeln!(html, "      <td>{value}</td>");
            }
            html.push_str("    </tr>\n");
        }
        html.push_str("  </tbody>\n");
        html.push_str("</table>");
        html
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Wrap a rendered table in a complete, styled HTML document
pub fn html_document(title: &str, table_html: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
        th {{ background-color: #f2f2f2; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
{table_html}
</body>
</html>
"#
    )
}
