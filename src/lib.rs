pub mod batch;
pub mod config;
pub mod encoding;
pub mod error;
pub mod formant;
pub mod lexer;
pub mod parser;
pub mod row;
pub mod sample;
pub mod table;
pub mod textgrid;
pub mod tiers;
pub mod vowel;
pub mod word;

pub use batch::{natural_cmp, run, BatchReport, SampleFailure, SampleOutcome};
pub use config::{Config, OutputSpec};
pub use encoding::Encoding;
pub use error::*;
pub use parser::parse;
pub use row::{Row, Speaker, HEADER};
pub use sample::process_sample;
pub use table::write_table_file;
pub use textgrid::*;
pub use tiers::TierSet;

/// Convert TextGrid text into rows.
/// This is the main entry point for in-memory use.
pub fn convert(source: &str, sample: &str, speaker: &Speaker) -> Result<Vec<Row>, TableError> {
    let grid = parse(source)?;
    let tiers = TierSet::from_textgrid(&grid)?;
    process_sample(&tiers, sample, speaker)
}

/// Run the whole batch and write every configured output table.
pub fn convert_directory(config: &Config) -> Result<BatchReport, TableError> {
    let report = run(config)?;
    for output in &config.outputs {
        write_table_file(&output.path, &report.rows, output.delimiter)?;
    }
    Ok(report)
}
