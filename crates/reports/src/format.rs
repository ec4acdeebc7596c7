use teloxide::utils::html::escape;

/// One column of a text table: its header and how a row renders into a cell.
pub struct Column<R> {
    pub header: &'static str,
    pub value: fn(&R) -> String,
}

impl<R> Column<R> {
    pub const fn new(header: &'static str, value: fn(&R) -> String) -> Self {
        Column { header, value }
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn push_cell(out: &mut String, text: &str, column_width: usize) {
    out.push_str(&escape(text));
    out.push_str(&" ".repeat(column_width + 1 - width(text)));
}

/// Fixed-width table inside a `<pre>` block.
///
/// Every column is as wide as its longest header or cell, each cell is padded
/// to that width plus one separating space. No rows, no table.
pub fn render_table<R>(rows: &[R], columns: &[Column<R>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|column| (column.value)(row)).collect())
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            cells
                .iter()
                .map(|row| width(&row[idx]))
                .fold(width(column.header), usize::max)
        })
        .collect();

    let mut table = String::from("\n<pre>");
    for (column, column_width) in columns.iter().zip(&widths) {
        push_cell(&mut table, column.header, *column_width);
    }
    table.push('\n');
    for row in &cells {
        for (cell, column_width) in row.iter().zip(&widths) {
            push_cell(&mut table, cell, *column_width);
        }
        table.push('\n');
    }
    table.push_str("</pre>");
    table
}

/// Bold title, optional ingress paragraph and the table. `ingress` is html.
pub fn render_report<R>(
    title: &str,
    ingress: Option<&str>,
    rows: &[R],
    columns: &[Column<R>],
) -> String {
    let mut message = String::new();
    if !title.is_empty() {
        message.push_str(&format!("<strong>{}</strong>", escape(title)));
    }
    if let Some(ingress) = ingress.filter(|ingress| !ingress.is_empty()) {
        message.push_str(&format!("\n\n{}\n", ingress));
    }
    message.push_str(&render_table(rows, columns));
    message
}

/// Subtitled table, `None` when there is nothing to list.
pub fn render_section<R>(subtitle: &str, rows: &[R], columns: &[Column<R>]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    Some(format!(
        "\n<strong>{}</strong>{}",
        escape(subtitle),
        render_table(rows, columns)
    ))
}
