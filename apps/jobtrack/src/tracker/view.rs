use std::fmt;

use crate::tracker::controller::TableState;

pub const COLUMNS: [&str; 5] = ["Company", "Role", "Status", "Date Applied", "Actions"];
pub const EMPTY_MESSAGE: &str = "No applications yet. Add one above!";
const DATE_PLACEHOLDER: &str = "N/A";

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    Application {
        id: i64,
        company: String,
        role: String,
        status: String,
        /// Badge style key, `status-<status>`.
        status_class: String,
        date_applied: String,
    },
    /// Full-width row: empty state, loading or error text.
    Notice { kind: NoticeKind, colspan: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Loading,
    Empty,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: [&'static str; 5],
    pub rows: Vec<TableRow>,
}

fn notice(kind: NoticeKind, message: impl Into<String>) -> TableRow {
    TableRow::Notice {
        kind,
        colspan: COLUMNS.len(),
        message: message.into(),
    }
}

/// Projects tracker state into table rows. Pure.
pub fn render_table(table: &TableState) -> TableView {
    let rows = match table {
        TableState::Loading => vec![notice(NoticeKind::Loading, "Loading applications...")],
        TableState::Loaded(applications) if applications.is_empty() => {
            vec![notice(NoticeKind::Empty, EMPTY_MESSAGE)]
        }
        TableState::Loaded(applications) => applications
            .iter()
            .map(|app| TableRow::Application {
                id: app.id,
                company: app.company.clone(),
                role: app.role.clone(),
                status: app.status.to_string(),
                status_class: format!("status-{}", app.status),
                date_applied: app
                    .date_applied
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| DATE_PLACEHOLDER.to_string()),
            })
            .collect(),
        TableState::Unreachable { endpoint } => vec![notice(
            NoticeKind::Error,
            format!("Error connecting to backend at {endpoint}. Make sure the backend is running!"),
        )],
    };

    TableView {
        headers: COLUMNS,
        rows,
    }
}

impl TableView {
    fn cells(row: &TableRow) -> Option<[String; 5]> {
        match row {
            TableRow::Application {
                id,
                company,
                role,
                status,
                date_applied,
                ..
            } => Some([
                company.clone(),
                role.clone(),
                format!("[{status}]"),
                date_applied.clone(),
                format!("delete {id}"),
            ]),
            TableRow::Notice { .. } => None,
        }
    }
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<[String; 5]> = self.rows.iter().filter_map(Self::cells).collect();

        let mut widths = self.headers.map(|h| h.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let total = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);

        let header: Vec<String> = self
            .headers
            .iter()
            .zip(widths)
            .map(|(h, w)| format!("{h:<w$}"))
            .collect();
        writeln!(f, "{}", header.join(" | "))?;
        writeln!(f, "{}", "-".repeat(total))?;

        let mut cells = cells.into_iter();
        for row in &self.rows {
            match row {
                TableRow::Notice { message, .. } => {
                    writeln!(f, "{message:^total$}")?;
                }
                TableRow::Application { .. } => {
                    if let Some(row) = cells.next() {
                        let line: Vec<String> = row
                            .iter()
                            .zip(widths)
                            .map(|(c, w)| format!("{c:<w$}"))
                            .collect();
                        writeln!(f, "{}", line.join(" | ").trim_end())?;
                    }
                }
            }
        }
        Ok(())
    }
}
