//! HTTP integration tests.
//!
//! Each test starts its own axum server on an ephemeral port and drives it
//! with reqwest, following redirects by hand so status codes and cookies can
//! be asserted.
#![cfg(feature = "http")]

mod support;

mod pages;
