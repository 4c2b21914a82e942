// * Slide validation pipeline
// * batch -> page -> slide -> {inspector, rules}

pub mod batch;
pub mod dedup;
pub mod facts;
pub mod page;
pub mod row;
pub mod rules;
pub mod slide;

pub use batch::{BatchOutcome, BatchRunner};
pub use dedup::ProcessedUrlSet;
pub use facts::{ExtractionFault, SlideFacts, SlideLabel};
pub use page::PageAnalyzer;
pub use row::{ReportRow, NOT_AVAILABLE, REPORT_COLUMNS, WORD_COUNT_COLUMN};
pub use rules::{count_words, evaluate, url_extension, Note, Rule};
pub use slide::SlideProcessor;
