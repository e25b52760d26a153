mod memory;
mod slow;

pub use memory::InMemoryPageGetter;
pub use slow::SlowPageGetter;
