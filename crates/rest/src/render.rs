//! Table and error rendering.
//!
//! Responsibilities:
//! - Read the table parameters (`v`, `h`, `format`) from a request.
//! - Render tables as padded text or JSON, and column help as text.
//! - Render any [`AdminError`] as a structured JSON body.
//!
//! Invariants:
//! - Rendering never mutates the table.
//! - Column selection by `h` ignores names the table does not have.

use admin_client::{AdminError, DispatchError, Result};
use admin_config::constants::DEFAULT_MISSING_VALUE;
use serde_json::{Map, Value, json};

use crate::table::{Alignment, Cell, Table};
use crate::transport::{RestRequest, RestResponse};

/// Output format chosen with `format=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How to render a table for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub verbose: bool,
    pub columns: Option<Vec<String>>,
    pub format: OutputFormat,
}

impl RenderOptions {
    /// Read `v`, `h` and `format` from `request`.
    ///
    /// # Errors
    /// Returns a parse error for a non-boolean `v` or an unknown `format`.
    pub fn from_request(request: &RestRequest) -> Result<Self> {
        let verbose = request.flag("v", false)?;
        let columns = request.param_list("h");
        let format = match request.param("format") {
            None => OutputFormat::Text,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "text" | "txt" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(AdminError::parse(
                        "format",
                        value,
                        "expected [text] or [json]",
                    ));
                }
            },
        };

        Ok(Self {
            verbose,
            columns,
            format,
        })
    }
}

/// Indices of the columns to render, in output order.
fn selected_columns(table: &Table, options: &RenderOptions) -> Vec<usize> {
    match &options.columns {
        Some(names) => names
            .iter()
            .filter_map(|name| table.column_index(name))
            .collect(),
        None => (0..table.columns().len()).collect(),
    }
}

fn text_cell(cell: &Cell) -> String {
    if cell.is_empty() {
        DEFAULT_MISSING_VALUE.to_string()
    } else {
        cell.to_string()
    }
}

fn pad(out: &mut String, value: &str, width: usize, alignment: Alignment) {
    let fill = width.saturating_sub(value.chars().count());
    match alignment {
        Alignment::Left => {
            out.push_str(value);
            out.extend(std::iter::repeat_n(' ', fill));
        }
        Alignment::Right => {
            out.extend(std::iter::repeat_n(' ', fill));
            out.push_str(value);
        }
    }
}

/// Space-padded text, one line per row, header line only when verbose.
pub fn render_text(table: &Table, options: &RenderOptions) -> String {
    let selected = selected_columns(table, options);
    if selected.is_empty() {
        return String::new();
    }

    let mut lines: Vec<Vec<String>> = Vec::with_capacity(table.len() + 1);
    if options.verbose {
        lines.push(
            selected
                .iter()
                .map(|&i| table.columns()[i].name.clone())
                .collect(),
        );
    }
    for row in table.rows() {
        lines.push(selected.iter().map(|&i| text_cell(&row[i])).collect());
    }

    let widths: Vec<usize> = (0..selected.len())
        .map(|col| {
            lines
                .iter()
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in &lines {
        let mut rendered = String::new();
        for (col, value) in line.iter().enumerate() {
            if col > 0 {
                rendered.push(' ');
            }
            let alignment = table.columns()[selected[col]].alignment;
            pad(&mut rendered, value, widths[col], alignment);
        }
        out.push_str(rendered.trim_end());
        out.push('\n');
    }
    out
}

fn json_cell(cell: &Cell) -> Value {
    match cell {
        Cell::Integer(value) => Value::from(*value),
        Cell::Text(text) => Value::from(text.as_str()),
    }
}

/// JSON array with one object per row, keys in column order.
pub fn render_json(table: &Table, options: &RenderOptions) -> Result<String> {
    let selected = selected_columns(table, options);
    let rows: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let object: Map<String, Value> = selected
                .iter()
                .map(|&i| (table.columns()[i].name.clone(), json_cell(&row[i])))
                .collect();
            Value::Object(object)
        })
        .collect();

    serde_json::to_string(&rows).map_err(|e| AdminError::serialization("table", e))
}

/// One `name | description` line per column.
pub fn render_help(table: &Table) -> String {
    let width = table
        .columns()
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for column in table.columns() {
        pad(&mut out, &column.name, width, Alignment::Left);
        out.push_str(" | ");
        out.push_str(&column.description);
        out.push('\n');
    }
    out
}

/// Render `table` as a 200 response in the requested format.
pub fn render(table: &Table, options: &RenderOptions) -> Result<RestResponse> {
    match options.format {
        OutputFormat::Text => Ok(RestResponse::text(200, render_text(table, options))),
        OutputFormat::Json => Ok(RestResponse::json(200, render_json(table, options)?)),
    }
}

fn cause_json(error: &DispatchError) -> Value {
    let mut body = json!({
        "type": error.kind().as_str(),
        "reason": error.reason(),
    });
    if let Some(cause) = error.cause() {
        body["caused_by"] = cause_json(cause);
    }
    body
}

/// JSON body for a failure.
pub fn error_body(error: &AdminError) -> Value {
    let reason = match error {
        AdminError::Dispatch(e) => e.reason().to_string(),
        other => other.to_string(),
    };
    let mut detail = json!({
        "type": error.error_type(),
        "reason": reason,
    });
    if let AdminError::Dispatch(e) = error
        && let Some(cause) = e.cause()
    {
        detail["caused_by"] = cause_json(cause);
    }

    json!({
        "error": detail,
        "status": error.status(),
    })
}

/// `error_body` wrapped in a response carrying the error's status.
pub fn error_response(error: &AdminError) -> RestResponse {
    RestResponse::json(error.status(), error_body(error).to_string())
}
