use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print only `columns` of each record as a table; other formats print the
/// full response.
///
/// Organization records have two dozen fields, most of them long text, so
/// list views pick the columns worth scanning.
pub fn output_columns<T: Serialize>(
    value: &T,
    rows: &[Value],
    columns: &[&str],
    format: OutputFormat,
) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(value, format);
    }
    println!("{}", render_columns(rows, columns));
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options()))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    headers.sort();
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    render_columns(items, &header_refs)
}

fn render_columns(items: &[Value], columns: &[&str]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let rows = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|column| {
                    item.get(*column)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(columns, &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::{render, render_columns, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        version: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "org_1", version: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "org_1");
        assert_eq!(parsed["version"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "org_1", version: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_of_object_lists_sorted_keys() {
        let value = Example { id: "org_1", version: 7 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines = out.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("key"));
        assert!(lines[2].starts_with("id"));
        assert!(lines[3].starts_with("version"));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let out = render(&Vec::<Example>::new(), OutputFormat::Table).expect("render");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn column_render_marks_missing_cells() {
        let rows = vec![
            json!({"ID": "org_1", "Name": "Foo", "Region": ["EU", "NA"]}),
            json!({"ID": "org_2"}),
        ];
        let out = render_columns(&rows, &["ID", "Name", "Region"]);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("EU, NA"));
        assert!(lines[3].contains('-'));
    }

    #[test]
    fn string_lists_render_comma_separated() {
        assert_eq!(value_to_cell(&json!(["water", "energy"])), "water, energy");
        assert_eq!(value_to_cell(&json!({"a": 1})), "{\"a\":1}");
        assert_eq!(value_to_cell(&json!(null)), "null");
    }
}
