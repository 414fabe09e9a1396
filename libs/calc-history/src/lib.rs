//! calc-history - Durable history log for simpcalc
//!
//! Every evaluation attempt can be recorded as a [`CalculationRecord`] and
//! appended to a JSON array on disk. See [`store`] for the write protocol.

pub mod record;
pub mod store;

pub use errors::{HistoryError, HistoryResult};
pub use record::{utc_timestamp, CalculationRecord, Outcome};
pub use store::{append_record, read_history, HistoryStore};
