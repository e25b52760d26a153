//! DJDNS Infrastructure Layer
pub mod dns;
pub mod page_getters;
