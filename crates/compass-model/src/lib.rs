pub mod criteria;
pub mod error;
pub mod record;

pub use criteria::FilterCriteria;
pub use error::{ModelError, Result};
pub use record::{ComplianceRecord, Mappings, parse_records};
