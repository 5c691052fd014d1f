//! Text rendering of the board: heading, the two controls, then the order
//! table.

use board_orders::{Order, SortKey, StatusFilter};
use itertools::Itertools;
use std::io::{self, Write};

use crate::store::{BoardStore, FetchState};

pub const HEADING: &str = "Order Management";
pub const COMPLETE_ACTION: &str = "[Complete Order]";

const COLUMNS: [&str; 7] = [
    "Order ID",
    "Customer",
    "Items",
    "Total Price",
    "Status",
    "Timestamp",
    "Action",
];

pub fn render_board<W: Write>(store: &mut BoardStore, out: &mut W) -> io::Result<()> {
    writeln!(out, "{HEADING}")?;
    writeln!(out)?;
    render_controls(store.filter(), store.sort(), out)?;
    writeln!(out)?;

    match store.fetch_state() {
        FetchState::Pending => writeln!(out, "Loading orders...")?,
        FetchState::Failed { reason } => writeln!(out, "Failed to load orders: {reason}")?,
        FetchState::Loaded => {}
    }

    render_table(store.view(), out)
}

pub fn render_controls<W: Write>(
    filter: StatusFilter,
    sort: SortKey,
    out: &mut W,
) -> io::Result<()> {
    let filters = StatusFilter::OPTIONS
        .iter()
        .map(|option| mark(option.as_str(), *option == filter))
        .join(" ");
    let sorts = SortKey::OPTIONS
        .iter()
        .map(|option| mark(option.label(), *option == sort))
        .join(" ");

    writeln!(out, "Filter: {filters}")?;
    writeln!(out, "Sort:   {sorts}")
}

pub fn render_table<W: Write>(orders: &[Order], out: &mut W) -> io::Result<()> {
    let rows: Vec<[String; 7]> = orders.iter().map(row_cells).collect();

    let mut widths = COLUMNS.map(|title| title.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(out, &COLUMNS.map(str::to_string), &widths)?;
    write_line(out, &widths.map(|width| "-".repeat(width)), &widths)?;
    for row in &rows {
        write_line(out, row, &widths)?;
    }
    Ok(())
}

fn row_cells(order: &Order) -> [String; 7] {
    [
        order.id.to_string(),
        order.customer.clone(),
        order.items.iter().join(", "),
        format!("$ {}", order.total_price),
        order.status.to_string(),
        order.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        if order.is_pending() {
            COMPLETE_ACTION.to_string()
        } else {
            String::new()
        },
    ]
}

fn write_line<W: Write>(out: &mut W, cells: &[String; 7], widths: &[usize; 7]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .join(" | ");
    writeln!(out, "{}", line.trim_end())
}

fn mark(label: &str, active: bool) -> String {
    if active {
        format!("[{label}]")
    } else {
        label.to_string()
    }
}
