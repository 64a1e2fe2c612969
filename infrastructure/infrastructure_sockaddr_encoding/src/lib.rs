//! Infrastructure Layer: sockaddr_at Encoding
//!
//! Provides encoding/decoding between the in-process [`SockaddrAt`] value and
//! the fixed-layout `sockaddr_at` byte structure the operating system's
//! AppleTalk socket provider expects.
//!
//! ## Overview
//!
//! Two incompatible `sockaddr_at` layouts exist across AppleTalk-capable
//! platforms:
//!
//! - **legacy** (16 bytes): 8-bit length, port, and node fields
//! - **wide** (20 bytes): 16-bit length, port, node, and an extra datagram
//!   type field
//!
//! The layouts are not wire-compatible, so the variant is selected at build
//! time through the mutually exclusive `legacy-abi` (default) and `wide-abi`
//! cargo features. Enabling both, or neither, is a compile error: one binary
//! can never carry both forms. Each variant lives in its own module with
//! identical function signatures, and the active module is re-exported at the
//! crate root.
//!
//! Field packing is explicit and offset-by-offset. Multi-byte fields use host
//! byte order, exactly as the corresponding C struct sits in memory. Values
//! that do not fit the active layout's field widths are rejected with
//! [`EncodeError`] instead of being narrowed silently.
//!
//! ## Modules
//!
//! - **`legacy`**: the 16-byte layout (`legacy-abi` feature)
//! - **`wide`**: the 20-byte layout (`wide-abi` feature)

#[cfg(all(feature = "legacy-abi", feature = "wide-abi"))]
compile_error!(
    "features `legacy-abi` and `wide-abi` are mutually exclusive: \
     the two sockaddr_at layouts must never be linked into one binary"
);

#[cfg(not(any(feature = "legacy-abi", feature = "wide-abi")))]
compile_error!(
    "a sockaddr_at layout must be selected explicitly: \
     enable exactly one of the `legacy-abi` or `wide-abi` features"
);

#[cfg(feature = "legacy-abi")]
pub mod legacy;
#[cfg(feature = "wide-abi")]
pub mod wide;

#[cfg(feature = "legacy-abi")]
pub use legacy::{decode_sockaddr_at, encode_sockaddr_at, NODE_MAX, PORT_MAX, SOCKADDR_AT_LEN};
#[cfg(feature = "wide-abi")]
pub use wide::{decode_sockaddr_at, encode_sockaddr_at, NODE_MAX, PORT_MAX, SOCKADDR_AT_LEN};

/// AppleTalk address family tag written into the `sat_family` field.
#[cfg(unix)]
pub const AF_APPLETALK: i16 = libc::AF_APPLETALK as i16;

/// AppleTalk address family tag (placeholder on platforms without libc).
#[cfg(not(unix))]
pub const AF_APPLETALK: i16 = 5;

/// Encoding error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Node number does not fit the active layout's node field
    NodeOutOfRange {
        /// Node number that was supplied
        node: u16,
        /// Largest node number the layout can carry
        max: u16,
    },
    /// Socket number does not fit the active layout's port field
    PortOutOfRange {
        /// Socket number that was supplied
        port: u16,
        /// Largest socket number the layout can carry
        max: u16,
    },
    /// The active layout has no datagram type field
    TypeNotSupported {
        /// Datagram type that was supplied
        dtype: u16,
    },
}

/// Decoding error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input buffer is shorter than the fixed layout
    BufferTooShort {
        /// Bytes the layout requires
        needed: usize,
        /// Bytes that were supplied
        got: usize,
    },
    /// Length field does not match the fixed layout size
    InvalidLength {
        /// Length value found in the buffer
        len: i32,
        /// Length the layout requires
        expected: i32,
    },
    /// Family tag is not AF_APPLETALK
    InvalidFamily {
        /// Family value found in the buffer
        family: i16,
    },
}
