//! Legacy Layout Module
//!
//! Field-by-field encoding/decoding for the 16-byte `sockaddr_at` layout with
//! 8-bit length, port, and node fields:
//!
//! ```text
//! offset  0      sat_len     u8   (= 16)
//! offset  1..3   sat_family  i16  (= AF_APPLETALK)
//! offset  3      sat_port    u8
//! offset  4..6   s_net       u16
//! offset  6      s_node      u8
//! offset  7      padding     u8   (= 0)
//! offset  8..16  sat_zero    [u8; 8]
//! ```

use entities_appletalk::{AtAddr, SockaddrAt};

use crate::{DecodeError, EncodeError, AF_APPLETALK};

/// Total size of the marshaled structure in bytes
pub const SOCKADDR_AT_LEN: usize = 16;

/// Largest node number the 8-bit node field can carry
pub const NODE_MAX: u16 = 0xff;

/// Largest socket number the 8-bit port field can carry
pub const PORT_MAX: u16 = 0xff;

const OFF_LEN: usize = 0;
const OFF_FAMILY: usize = 1;
const OFF_PORT: usize = 3;
const OFF_NET: usize = 4;
const OFF_NODE: usize = 6;

/// Encode a socket address into the fixed 16-byte layout
///
/// Validates that every field fits its on-the-wire width before packing.
/// This layout has no datagram type field, so a nonzero `dtype` is rejected
/// rather than dropped.
///
/// # Arguments
///
/// * `sat` - Socket address to encode
///
/// # Returns
///
/// * `Ok([u8; 16])` - Marshaled bytes
/// * `Err(EncodeError)` - A field does not fit the layout
pub fn encode_sockaddr_at(sat: &SockaddrAt) -> Result<[u8; SOCKADDR_AT_LEN], EncodeError> {
    if sat.addr.node > NODE_MAX {
        return Err(EncodeError::NodeOutOfRange {
            node: sat.addr.node,
            max: NODE_MAX,
        });
    }
    if sat.port > PORT_MAX {
        return Err(EncodeError::PortOutOfRange {
            port: sat.port,
            max: PORT_MAX,
        });
    }
    if sat.dtype != 0 {
        return Err(EncodeError::TypeNotSupported { dtype: sat.dtype });
    }

    let mut buf = [0u8; SOCKADDR_AT_LEN];
    buf[OFF_LEN] = SOCKADDR_AT_LEN as u8;
    buf[OFF_FAMILY..OFF_FAMILY + 2].copy_from_slice(&AF_APPLETALK.to_ne_bytes());
    buf[OFF_PORT] = sat.port as u8;
    buf[OFF_NET..OFF_NET + 2].copy_from_slice(&sat.addr.net.to_ne_bytes());
    buf[OFF_NODE] = sat.addr.node as u8;
    Ok(buf)
}

/// Decode a socket address from the fixed 16-byte layout
///
/// # Arguments
///
/// * `buf` - Buffer holding at least one marshaled structure
///
/// # Returns
///
/// * `Ok(SockaddrAt)` - Decoded socket address
/// * `Err(DecodeError)` - Buffer too short or tagged with the wrong layout
pub fn decode_sockaddr_at(buf: &[u8]) -> Result<SockaddrAt, DecodeError> {
    if buf.len() < SOCKADDR_AT_LEN {
        return Err(DecodeError::BufferTooShort {
            needed: SOCKADDR_AT_LEN,
            got: buf.len(),
        });
    }
    let len = buf[OFF_LEN];
    // Some providers leave sat_len unset.
    if len != 0 && len as usize != SOCKADDR_AT_LEN {
        return Err(DecodeError::InvalidLength {
            len: len as i32,
            expected: SOCKADDR_AT_LEN as i32,
        });
    }
    let family = i16::from_ne_bytes([buf[OFF_FAMILY], buf[OFF_FAMILY + 1]]);
    if family != AF_APPLETALK {
        return Err(DecodeError::InvalidFamily { family });
    }

    Ok(SockaddrAt {
        addr: AtAddr {
            net: u16::from_ne_bytes([buf[OFF_NET], buf[OFF_NET + 1]]),
            node: buf[OFF_NODE] as u16,
        },
        port: buf[OFF_PORT] as u16,
        dtype: 0,
    })
}
