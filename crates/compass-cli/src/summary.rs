use comfy_table::{Cell, CellAlignment, Table};

use compass_core::StartupStats;
use compass_store::RecordStore;
use compass_cli::terminal::{apply_table_style, dim_cell, header_cell};

pub fn print_stats(stats: StartupStats, store: &RecordStore) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Standard"),
        header_cell("Controls"),
        header_cell("Mappings"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in store.group_by(|record| record.standard.clone()) {
        let mappings: usize = group
            .records
            .iter()
            .map(|record| record.mapping_count())
            .sum();
        let standard = if group.key.is_empty() {
            dim_cell("(none)")
        } else {
            Cell::new(&group.key)
        };
        table.add_row(vec![
            standard,
            Cell::new(group.records.len()),
            Cell::new(mappings),
        ]);
    }
    table.add_row(vec![
        header_cell("Total"),
        header_cell(&stats.controls.to_string()),
        header_cell(&stats.mappings.to_string()),
    ]);
    println!("{table}");
}

pub fn print_categories(store: &RecordStore) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Controls"),
        header_cell("Standards"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let mut groups = store.group_by(|record| record.category.clone());
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    for group in groups {
        let mut standards: Vec<&str> = group
            .records
            .iter()
            .map(|record| record.standard.as_str())
            .collect();
        standards.sort_unstable();
        standards.dedup();
        let category = if group.key.is_empty() {
            dim_cell("(none)")
        } else {
            Cell::new(&group.key)
        };
        table.add_row(vec![
            category,
            Cell::new(group.records.len()),
            Cell::new(standards.join(", ")),
        ]);
    }
    println!("{table}");
    let standards = store.standards();
    if standards.is_empty() {
        println!("Standards: (none)");
    } else {
        println!("Standards: {}", standards.join(", "));
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
