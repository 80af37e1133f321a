//! Property-based tests for table rendering.
//!
//! Test coverage:
//! - Every row is exactly as wide as the header
//! - Text output has one line per row, plus the header when verbose
//! - Unknown `h` names never change the output

use admin_rest::render::{render_json, render_text};
use admin_rest::{Alignment, Cell, ColumnDef, RenderOptions, Table, TableError};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        any::<i64>().prop_map(Cell::Integer),
        "[a-z0-9.-]{0,12}".prop_map(Cell::Text),
    ]
}

fn table(width: usize) -> impl Strategy<Value = Table> {
    prop::collection::vec(prop::collection::vec(cell(), width), 0..20).prop_map(move |rows| {
        let columns = (0..width)
            .map(|i| {
                let alignment = if i % 2 == 0 {
                    Alignment::Left
                } else {
                    Alignment::Right
                };
                ColumnDef::new(format!("c{}", i), alignment, "generated")
            })
            .collect();
        let mut table = Table::new(columns);
        for row in rows {
            table.add_row(row).expect("generated rows match the header");
        }
        table
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_mismatched_row_rejected(width in 1usize..6, extra in 1usize..3) {
        let columns = (0..width)
            .map(|i| ColumnDef::new(format!("c{}", i), Alignment::Left, ""))
            .collect();
        let mut table = Table::new(columns);

        let result = table.add_row(vec![Cell::Integer(0); width + extra]);
        prop_assert_eq!(
            result,
            Err(TableError::ColumnCountMismatch { expected: width, actual: width + extra })
        );
        prop_assert!(table.is_empty());
    }

    #[test]
    fn test_line_count_matches_rows(table in table(4), verbose in any::<bool>()) {
        let options = RenderOptions { verbose, ..RenderOptions::default() };
        let text = render_text(&table, &options);

        let expected = table.len() + usize::from(verbose);
        prop_assert_eq!(text.lines().count(), expected);
    }

    #[test]
    fn test_unknown_columns_ignored(table in table(3)) {
        let plain = RenderOptions {
            columns: Some(vec!["c2".to_string(), "c0".to_string()]),
            ..RenderOptions::default()
        };
        let noisy = RenderOptions {
            columns: Some(vec![
                "zz".to_string(),
                "c2".to_string(),
                "nope".to_string(),
                "c0".to_string(),
            ]),
            ..RenderOptions::default()
        };

        prop_assert_eq!(render_text(&table, &plain), render_text(&table, &noisy));
        prop_assert_eq!(
            render_json(&table, &plain).unwrap(),
            render_json(&table, &noisy).unwrap()
        );
    }
}
