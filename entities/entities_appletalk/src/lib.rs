//! Entities Layer: AppleTalk Addressing
//!
//! This crate provides the core AppleTalk addressing types used throughout the
//! DDP socket shim. It implements the network/node address pair, the in-process
//! socket address value, and the addressing constants for wildcard, broadcast,
//! and dynamically assigned socket numbers.
//!
//! ## Overview
//!
//! The `entities_appletalk` crate is the innermost layer of the workspace and
//! has no dependencies on other crates in the system. The types here are plain
//! immutable values: they carry no platform byte layout of their own. Packing
//! an address into the fixed `sockaddr_at` form the operating system expects
//! (and validating that its fields fit that form) is the job of the
//! infrastructure layer.
//!
//! ## Modules
//!
//! - **[`addr`](addr/index.html)**: The `AtAddr` network/node pair, the
//!   `SockaddrAt` in-process socket address, and DDP addressing constants.

pub mod addr;

pub use addr::{
    is_dynamic_socket, AtAddr, SockaddrAt, ANY_NET, ANY_NODE, ANY_PORT, BROADCAST_NODE,
    SOCKET_DYNAMIC_MAX, SOCKET_DYNAMIC_MIN, SOCKET_WELL_KNOWN_MAX,
};
