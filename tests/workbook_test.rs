//! Integration tests for workbook output, read back with calamine.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use untable::{
    extract_all, CellValue, Error, SheetNaming, Table, TableRow, TableSet, WorkbookWriter,
    WriteOptions,
};

fn open(path: &Path) -> Xlsx<std::io::BufReader<std::fs::File>> {
    open_workbook(path).unwrap()
}

fn sample_tables() -> TableSet {
    extract_all(
        r#"<table><caption>People</caption>
            <tr><th>Name</th><th>Age</th></tr>
            <tr><td>Ann</td><td>34</td></tr>
            <tr><td>Bob</td><td>27.5</td></tr>
        </table>
        <table><tr><td>only</td><td></td><td>row</td></tr></table>"#,
    )
    .unwrap()
}

#[test]
fn test_one_sheet_per_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tables.xlsx");

    let summary = WorkbookWriter::new().write(&sample_tables(), &path).unwrap();
    assert_eq!(summary.sheets, vec!["Table_1", "Table_2"]);

    let workbook = open(&path);
    assert_eq!(workbook.sheet_names(), vec!["Table_1", "Table_2"]);
}

#[test]
fn test_cells_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tables.xlsx");
    WorkbookWriter::new().write(&sample_tables(), &path).unwrap();

    let mut workbook = open(&path);
    let first = workbook.worksheet_range("Table_1").unwrap();

    assert_eq!(first.get_value((0, 0)), Some(&Data::String("Name".into())));
    assert_eq!(first.get_value((0, 1)), Some(&Data::String("Age".into())));
    assert_eq!(first.get_value((1, 0)), Some(&Data::String("Ann".into())));
    assert_eq!(first.get_value((1, 1)), Some(&Data::Float(34.0)));
    assert_eq!(first.get_value((2, 1)), Some(&Data::Float(27.5)));

    let second = workbook.worksheet_range("Table_2").unwrap();
    assert_eq!(second.get_value((0, 0)), Some(&Data::String("only".into())));
    assert_eq!(second.get_value((0, 1)), Some(&Data::Empty));
    assert_eq!(second.get_value((0, 2)), Some(&Data::String("row".into())));
}

#[test]
fn test_empty_set_writes_placeholder_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    let tables = extract_all("<p>no tables here</p>").unwrap();
    WorkbookWriter::new().write(&tables, &path).unwrap();

    let mut workbook = open(&path);
    assert_eq!(workbook.sheet_names(), vec!["Sheet1"]);
    assert!(workbook.worksheet_range("Sheet1").unwrap().is_empty());
}

#[test]
fn test_empty_table_gets_empty_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.xlsx");

    let tables: TableSet = vec![Table::default(), Table::from_rows(vec![TableRow::from_strings(["x"])])].into();
    WorkbookWriter::new().write(&tables, &path).unwrap();

    let mut workbook = open(&path);
    assert_eq!(workbook.sheet_names().len(), 2);
    assert!(workbook.worksheet_range("Table_1").unwrap().is_empty());
}

#[test]
fn test_caption_sheet_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("captions.xlsx");

    let options = WriteOptions::new().with_sheet_naming(SheetNaming::Caption);
    WorkbookWriter::with_options(options)
        .write(&sample_tables(), &path)
        .unwrap();

    assert_eq!(open(&path).sheet_names(), vec!["People", "Table_2"]);
}

#[test]
fn test_existing_file_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tables.xlsx");
    std::fs::write(&path, b"stale contents").unwrap();

    let tables: TableSet = vec![Table::from_rows(vec![TableRow::new(vec![
        CellValue::Number(1.0),
    ])])]
    .into();
    WorkbookWriter::new().write(&tables, &path).unwrap();

    let mut workbook = open(&path);
    let range = workbook.worksheet_range("Table_1").unwrap();
    assert_eq!(range.get_value((0, 0)), Some(&Data::Float(1.0)));
}

#[test]
fn test_invalid_prefix_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.xlsx");

    let options = WriteOptions::new().with_sheet_prefix("Bad:");
    let err = WorkbookWriter::with_options(options)
        .write(&sample_tables(), &path)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidSheetName(_)));
    assert!(!path.exists());
}
