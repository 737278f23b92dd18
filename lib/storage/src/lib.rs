pub mod artifacts;
pub mod encoding;
pub mod report;
pub mod source;

pub use artifacts::{load_catalog, load_lemmas, load_stopwords, save_catalog, write_atomic};
pub use encoding::TextEncoding;
pub use report::{format_ratio, ReportStem, ReportWriter, TIMESTAMP_FORMAT};
pub use source::{read_lines, source_number};
