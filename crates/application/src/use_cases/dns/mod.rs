mod get_records;

pub use get_records::{GetRecordsUseCase, DEFAULT_MAX_DEPTH, DEFAULT_RESOLUTION_TIMEOUT};
