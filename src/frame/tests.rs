#![cfg(test)]

use super::error::{ApplyError, ColumnLengthMismatch, UnknownColumn};
use super::store::{ColumnStore, MemTable};
use super::Frame;
use crate::registry::Registry;
use crate::registry::error::UnknownFunction;

fn arithmetic() -> Registry<i64> {
    let mut registry = Registry::new();
    registry.register("add1", |x: i64| x + 1).expect("free name");
    registry.register("mul2", |x: i64| x * 2).expect("free name");
    registry
}

#[test]
fn test_chained_column_applications() {
    let registry = arithmetic();
    let table = MemTable::new()
        .with_column("a", vec![0_i64, 1, 2, 3, 4])
        .expect("first column");

    let mut frame = Frame::new(table);
    frame
        .apply_into("add1", "a", "b", &registry)
        .expect("valid step")
        .apply_into("mul2", "b", "c", &registry)
        .expect("valid step");

    assert_eq!(frame.row_count(), 5);
    assert_eq!(
        frame.store().names(),
        vec!["a", "b", "c"],
        "New columns should appear after the existing ones."
    );
    assert_eq!(frame.store().column("a"), Some(&[0_i64, 1, 2, 3, 4][..]));
    assert_eq!(frame.store().column("b"), Some(&[1_i64, 2, 3, 4, 5][..]));
    assert_eq!(frame.store().column("c"), Some(&[2_i64, 4, 6, 8, 10][..]));
}

#[test]
fn test_apply_updates_in_place() {
    let registry = arithmetic();
    let table = MemTable::new()
        .with_column("a", vec![1_i64, 2, 3])
        .expect("first column")
        .with_column("other", vec![7_i64, 8, 9])
        .expect("equal length");

    let mut frame = Frame::new(table);
    frame.apply("mul2", "a", &registry).expect("valid step");

    assert_eq!(frame.store().column("a"), Some(&[2_i64, 4, 6][..]));
    assert_eq!(
        frame.store().column("other"),
        Some(&[7_i64, 8, 9][..]),
        "Applying to one column should leave the others untouched."
    );
}

#[test]
fn test_apply_overwrites_existing_output() {
    let registry = arithmetic();
    let table = MemTable::new()
        .with_column("a", vec![1_i64, 2])
        .expect("first column")
        .with_column("b", vec![0_i64, 0])
        .expect("equal length");

    let mut frame = Frame::new(table);
    frame
        .apply_into("add1", "a", "b", &registry)
        .expect("valid step");

    assert_eq!(frame.store().column("b"), Some(&[2_i64, 3][..]));
    assert_eq!(
        frame.store().names(),
        vec!["a", "b"],
        "Overwriting should not duplicate the column."
    );
}

#[test]
fn test_failures_leave_the_table_intact() {
    let registry = arithmetic();
    let table = MemTable::new()
        .with_column("a", vec![1_i64, 2])
        .expect("first column");
    let mut frame = Frame::new(table);

    assert_eq!(
        frame
            .apply_into("nope", "a", "b", &registry)
            .expect_err("unregistered name"),
        ApplyError::UnknownFunction(UnknownFunction {
            name: "nope".to_owned()
        })
    );
    assert_eq!(
        frame
            .apply_into("add1", "missing", "b", &registry)
            .expect_err("missing input column"),
        ApplyError::UnknownColumn(UnknownColumn {
            name: "missing".to_owned()
        })
    );

    assert_eq!(
        frame.store().names(),
        vec!["a"],
        "A failed application should not have created the output column."
    );
    assert_eq!(frame.store().column("a"), Some(&[1_i64, 2][..]));
}

#[test]
fn test_column_flow_round_trip_with_containment() {
    let table = MemTable::new()
        .with_column("x", vec![0_i64, 1, 2, 5])
        .expect("first column");
    let mut frame = Frame::new(table);

    let filled = frame
        .column_flow("x")
        .expect("existing column")
        .safe()
        .map(|x| 10 / x)
        .fill_empty(-1)
        .to_vec();
    frame.with_column("y", filled).expect("one value per row");

    assert_eq!(frame.store().column("x"), Some(&[0_i64, 1, 2, 5][..]));
    assert_eq!(frame.store().column("y"), Some(&[-1_i64, 10, 5, 2][..]));
}

#[test]
fn test_column_flow_unknown_column() {
    let table: MemTable<i64> = MemTable::new();
    let frame = Frame::new(table);
    assert_eq!(
        frame.column_flow("ghost").expect_err("no columns at all"),
        UnknownColumn {
            name: "ghost".to_owned()
        }
    );
}

#[test]
fn test_with_column_length_mismatch() {
    let table = MemTable::new()
        .with_column("a", vec![1_i64, 2, 3])
        .expect("first column");
    let mut frame = Frame::new(table);

    assert_eq!(
        frame
            .with_column("b", vec![1_i64])
            .expect_err("wrong length"),
        ColumnLengthMismatch {
            expected: 3,
            actual: 1
        }
    );
}

#[test]
fn test_mem_table_builder_validates_lengths() {
    let error = MemTable::new()
        .with_column("a", vec![1, 2, 3])
        .expect("first column")
        .with_column("b", vec![1, 2])
        .expect_err("shorter column");
    assert_eq!(
        error,
        ColumnLengthMismatch {
            expected: 3,
            actual: 2
        }
    );

    let table = MemTable::new()
        .with_column("a", vec![1, 2])
        .expect("first column")
        .with_column("a", vec![3, 4])
        .expect("replacement");
    assert_eq!(table.column("a"), Some(&[3, 4][..]));
    assert_eq!(table.names().len(), 1);
}

#[test]
fn test_mem_table_debug() {
    let table = MemTable::new()
        .with_column("a", vec![1, 2])
        .expect("first column");
    assert_eq!(format!("{table:?}"), "{\"a\": [1, 2]}");
}
