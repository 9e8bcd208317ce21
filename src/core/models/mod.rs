//! Data models for `Libretto`

pub mod exam;
pub mod record;

pub use exam::ExamRecord;
pub use record::{ParameterUpdate, Parameters, RecordState};
