//! Wide Layout Module
//!
//! Field-by-field encoding/decoding for the 20-byte `sockaddr_at` layout with
//! 16-bit fields throughout and a datagram type field:
//!
//! ```text
//! offset  0..2    sat_len     i16  (= 20)
//! offset  2..4    sat_family  i16  (= AF_APPLETALK)
//! offset  4..6    sat_port    i16
//! offset  6..8    sat_type    i16
//! offset  8..10   s_net       u16
//! offset 10..12   s_node      u16
//! offset 12..20   sat_zero    [u8; 8]
//! ```

use entities_appletalk::{AtAddr, SockaddrAt};

use crate::{DecodeError, EncodeError, AF_APPLETALK};

/// Total size of the marshaled structure in bytes
pub const SOCKADDR_AT_LEN: usize = 20;

/// Largest node number the 16-bit node field can carry
pub const NODE_MAX: u16 = u16::MAX;

/// Largest socket number the signed 16-bit port field can carry
pub const PORT_MAX: u16 = i16::MAX as u16;

/// Largest datagram type the signed 16-bit type field can carry
pub const TYPE_MAX: u16 = i16::MAX as u16;

const OFF_LEN: usize = 0;
const OFF_FAMILY: usize = 2;
const OFF_PORT: usize = 4;
const OFF_TYPE: usize = 6;
const OFF_NET: usize = 8;
const OFF_NODE: usize = 10;

/// Encode a socket address into the fixed 20-byte layout
///
/// # Arguments
///
/// * `sat` - Socket address to encode
///
/// # Returns
///
/// * `Ok([u8; 20])` - Marshaled bytes
/// * `Err(EncodeError)` - A field does not fit the layout
pub fn encode_sockaddr_at(sat: &SockaddrAt) -> Result<[u8; SOCKADDR_AT_LEN], EncodeError> {
    if sat.port > PORT_MAX {
        return Err(EncodeError::PortOutOfRange {
            port: sat.port,
            max: PORT_MAX,
        });
    }
    if sat.dtype > TYPE_MAX {
        return Err(EncodeError::TypeNotSupported { dtype: sat.dtype });
    }

    let mut buf = [0u8; SOCKADDR_AT_LEN];
    buf[OFF_LEN..OFF_LEN + 2].copy_from_slice(&(SOCKADDR_AT_LEN as i16).to_ne_bytes());
    buf[OFF_FAMILY..OFF_FAMILY + 2].copy_from_slice(&AF_APPLETALK.to_ne_bytes());
    buf[OFF_PORT..OFF_PORT + 2].copy_from_slice(&(sat.port as i16).to_ne_bytes());
    buf[OFF_TYPE..OFF_TYPE + 2].copy_from_slice(&(sat.dtype as i16).to_ne_bytes());
    buf[OFF_NET..OFF_NET + 2].copy_from_slice(&sat.addr.net.to_ne_bytes());
    buf[OFF_NODE..OFF_NODE + 2].copy_from_slice(&sat.addr.node.to_ne_bytes());
    Ok(buf)
}

/// Decode a socket address from the fixed 20-byte layout
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
    let len = i16::from_ne_bytes([buf[OFF_LEN], buf[OFF_LEN + 1]]);
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
            node: u16::from_ne_bytes([buf[OFF_NODE], buf[OFF_NODE + 1]]),
        },
        port: i16::from_ne_bytes([buf[OFF_PORT], buf[OFF_PORT + 1]]) as u16,
        dtype: i16::from_ne_bytes([buf[OFF_TYPE], buf[OFF_TYPE + 1]]) as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for sat in [
            SockaddrAt::new(AtAddr::new(0, 0), 0),
            SockaddrAt::new(AtAddr::new(1000, 5), 129),
            SockaddrAt::new(AtAddr::new(u16::MAX, u16::MAX), PORT_MAX),
            SockaddrAt {
                addr: AtAddr::new(42, 300),
                port: 4,
                dtype: 7,
            },
        ] {
            let buf = encode_sockaddr_at(&sat).unwrap();
            assert_eq!(decode_sockaddr_at(&buf).unwrap(), sat);
        }
    }

    #[test]
    fn test_layout_size_is_fixed() {
        let buf =
            encode_sockaddr_at(&SockaddrAt::new(AtAddr::new(u16::MAX, u16::MAX), PORT_MAX))
                .unwrap();
        assert_eq!(buf.len(), 20);
        let buf = encode_sockaddr_at(&SockaddrAt::default()).unwrap();
        assert_eq!(buf.len(), 20);
    }

    #[test]
    fn test_sixteen_bit_node_is_carried() {
        // Values past the 8-bit range are valid under this layout.
        let sat = SockaddrAt::new(AtAddr::new(1000, 0x1234), 1);
        let buf = encode_sockaddr_at(&sat).unwrap();
        assert_eq!(decode_sockaddr_at(&buf).unwrap().addr.node, 0x1234);
    }

    #[test]
    fn test_port_width_is_enforced() {
        let sat = SockaddrAt::new(AtAddr::new(1, 2), PORT_MAX + 1);
        assert!(matches!(
            encode_sockaddr_at(&sat),
            Err(EncodeError::PortOutOfRange { .. })
        ));
    }

    #[test]
    fn test_type_width_is_enforced() {
        let sat = SockaddrAt {
            addr: AtAddr::new(1, 2),
            port: 3,
            dtype: TYPE_MAX + 1,
        };
        assert!(matches!(
            encode_sockaddr_at(&sat),
            Err(EncodeError::TypeNotSupported { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        assert_eq!(
            decode_sockaddr_at(&[0u8; 16]),
            Err(DecodeError::BufferTooShort {
                needed: 20,
                got: 16
            })
        );
    }

    #[test]
    fn test_decode_rejects_wrong_family() {
        let mut buf = encode_sockaddr_at(&SockaddrAt::new(AtAddr::new(1, 2), 3)).unwrap();
        let bogus = (AF_APPLETALK + 1).to_ne_bytes();
        buf[2] = bogus[0];
        buf[3] = bogus[1];
        assert!(matches!(
            decode_sockaddr_at(&buf),
            Err(DecodeError::InvalidFamily { .. })
        ));
    }

    #[test]
    fn test_decode_accepts_unset_length() {
        let mut buf = encode_sockaddr_at(&SockaddrAt::new(AtAddr::new(1000, 6), 2)).unwrap();
        buf[0] = 0;
        buf[1] = 0;
        let sat = decode_sockaddr_at(&buf).unwrap();
        assert_eq!(sat.addr, AtAddr::new(1000, 6));
    }
}
