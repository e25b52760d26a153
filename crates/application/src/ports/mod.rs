mod page_getter;

pub use page_getter::PageGetter;

// Re-export for convenience
pub use djdns_domain::Page;
