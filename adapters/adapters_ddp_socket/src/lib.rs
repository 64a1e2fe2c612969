//! Adapters Layer: DDP Socket
//!
//! Provides the socket-address shim over the operating system's AppleTalk
//! DDP socket provider.
//!
//! ## Overview
//!
//! The `adapters_ddp_socket` crate is the OS-facing layer of the workspace.
//! Every operation is a stateless translation step (marshal or unmarshal the
//! socket address through `infrastructure_sockaddr_encoding`) followed by a
//! single delegation to the provider's socket call. The shim keeps no state
//! across calls, performs no retries, and never closes a handle on its own:
//! a [`SocketHandle`] is owned by the caller from `ddp_open` until exactly one
//! `ddp_close`.
//!
//! Calls block exactly as the underlying socket call blocks, subject to the
//! `flags` argument (e.g. `MSG_DONTWAIT`), which is passed through to the
//! provider untouched.
//!
//! ## Modules
//!
//! - **[`ddp`](ddp/index.html)**: socket handle, error taxonomy, and the
//!   open/close/send/receive operations
//! - **[`debug`](debug/index.html)**: gated debug output

pub mod ddp;
pub mod debug;

pub use ddp::{ddp_close, ddp_open, ddp_recv_from, ddp_send_to, DdpError, SocketHandle};
pub use debug::DebugUtils;
