//! # QuickBill Server Library
//!
//! Library half of the `quickbill` binary, exposed so integration tests can
//! build the router without starting a real server.

pub mod api;
pub mod cli;
