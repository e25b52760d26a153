pub mod dns;

pub use dns::{GetRecordsUseCase, DEFAULT_MAX_DEPTH, DEFAULT_RESOLUTION_TIMEOUT};
