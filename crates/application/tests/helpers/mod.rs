pub mod mock_page_getters;

pub use mock_page_getters::{DelayedPageGetter, FailingPageGetter, StaticPageGetter};
