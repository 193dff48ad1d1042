//! File formats: network structure definitions, comma-separated datasets, and the reports written
//! by the command line tools.

pub mod dataset;
pub mod report;
pub mod structure;

pub use self::dataset::{read_test, read_training, test_from_reader, training_from_reader};
pub use self::dataset::{ColumnBinding, TestRecord, TestSet, TokenPolicy};
pub use self::report::{write_estimates, write_file, write_predictions, write_samples};
pub use self::structure::{parse_structure, read_structure};
