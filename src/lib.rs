// Shared library surface for the stylist server and its API client.
// The binary in main.rs wires these modules to CLI configuration.

pub mod client;
pub mod models;
pub mod shutdown_signal;
pub mod store;
pub mod stylist;
pub mod web;
