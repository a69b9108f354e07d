//! Fuzz target for the lineage parser.
//!
//! `parse` must return `Err` for input it cannot tokenize and never panic.

#![no_main]

use arbitrary::Arbitrary;
use colscope_core::{
    infer_output_columns, Dialect, ExtractionOptions, LineageParser, ResolutionIndex,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    sql: String,
    dialect_idx: u8,
}

impl FuzzInput {
    fn dialect(&self) -> Dialect {
        match self.dialect_idx % 5 {
            0 => Dialect::Generic,
            1 => Dialect::Postgres,
            2 => Dialect::Mssql,
            3 => Dialect::Mysql,
            _ => Dialect::Sqlite,
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let index: ResolutionIndex = [
        ("employees", vec!["id", "name", "salary"]),
        ("jobs", vec!["id", "title"]),
    ]
    .into_iter()
    .collect();
    let options = ExtractionOptions::default().with_dialect(input.dialect());

    if let Ok(edges) = LineageParser::new(&index, &options).parse("target", &input.sql) {
        for edge in edges {
            assert!(index.has_column(&edge.source_object, &edge.source_column));
        }
    }
    let _ = infer_output_columns(&input.sql, input.dialect());
});
