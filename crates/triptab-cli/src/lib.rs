#![deny(unsafe_code)]

//! Shared pieces of the `triptab` binary that are useful from tests.

pub mod logging;
