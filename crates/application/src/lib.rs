//! Ferrous DoH Application Layer
//!
//! Protocol translation between RFC 8484 HTTP requests and DNS messages.
pub mod codec;
pub mod ports;
pub mod use_cases;
