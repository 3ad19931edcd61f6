#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table of string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad_cell(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let padded = pad_cell(&truncated, *width, looks_numeric(&truncated));
                if options.color {
                    colorize_action(&padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

const MIN_WIDTH: usize = 6;

/// Shrink the widest columns one character at a time until the table fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].chars().count().max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };

        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    let single_line = value.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out = single_line.chars().take(width - 1).collect::<String>();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = " ".repeat(width.saturating_sub(value.chars().count()));
    if numeric {
        format!("{pad}{value}")
    } else {
        format!("{value}{pad}")
    }
}

/// Color history actions and review flags; padding is applied first so
/// escape codes never skew alignment.
fn colorize_action(cell: &str) -> String {
    let code = match cell.trim().to_ascii_lowercase().as_str() {
        "created" | "false" => Some("32"),
        "updated" => Some("33"),
        "deleted" | "true" => Some("31"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{cell}\u{1b}[0m"),
        None => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_are_aligned() {
        let rows = vec![
            vec!["1".to_string(), "created".to_string()],
            vec!["12".to_string(), "updated".to_string()],
        ];
        let out = render_entity_table(&["version", "action"], &rows, PLAIN);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "version  action ");
        assert_eq!(lines[2], "      1  created");
        assert_eq!(lines[3], "     12  updated");
    }

    #[test]
    fn wide_tables_are_truncated_to_fit() {
        let rows = vec![vec!["a".repeat(80), "b".repeat(80)]];
        let options = TableOptions {
            max_width: Some(60),
            color: false,
        };
        let out = render_entity_table(&["Overview", "Notes"], &rows, options);
        for line in out.lines() {
            assert!(line.chars().count() <= 60, "line too wide: {line}");
        }
        assert!(out.contains('…'));
    }

    #[test]
    fn multiline_text_is_flattened() {
        assert_eq!(truncate_text("line one\nline two", 40), "line one line two");
    }

    #[test]
    fn color_wraps_actions_only() {
        assert_eq!(colorize_action("deleted"), "\u{1b}[31mdeleted\u{1b}[0m");
        assert_eq!(colorize_action("Lisbon"), "Lisbon");
    }

    #[test]
    fn numeric_detection() {
        assert!(looks_numeric("42"));
        assert!(looks_numeric("-1.5"));
        assert!(!looks_numeric("org_1"));
        assert!(!looks_numeric(""));
    }
}
