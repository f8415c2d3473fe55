//! ovh-api: Signed HTTP client for the ovh CLI client
//!
//! This crate provides the implementation of the ApiClient trait
//! using reqwest and the OVH request signature scheme. It is the only
//! crate that directly touches the network.

pub mod client;
pub mod signature;

pub use client::{DEFAULT_TIMEOUT, OvhClient};
