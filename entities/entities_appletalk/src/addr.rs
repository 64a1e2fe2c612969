//! AppleTalk Address Module
//!
//! Provides the AppleTalk network/node address pair and the in-process socket
//! address value, together with the DDP addressing constants.

use std::fmt;

/// Wildcard network number: "any network".
pub const ANY_NET: u16 = 0;

/// Wildcard node number: node not yet known / any node.
pub const ANY_NODE: u16 = 0;

/// Broadcast node number.
pub const BROADCAST_NODE: u16 = 0xff;

/// Wildcard DDP socket number: the provider assigns a dynamic socket at bind.
pub const ANY_PORT: u16 = 0;

/// Highest well-known (statically assigned) DDP socket number.
pub const SOCKET_WELL_KNOWN_MAX: u16 = 127;

/// Lowest dynamically assigned DDP socket number.
pub const SOCKET_DYNAMIC_MIN: u16 = 128;

/// Highest dynamically assigned DDP socket number.
pub const SOCKET_DYNAMIC_MAX: u16 = 254;

/// AppleTalk network/node address
///
/// Identifies a host on an AppleTalk internet. Both fields are carried at the
/// widest width any platform variant supports; layouts with an 8-bit node
/// field narrow the value during marshaling, which fails for out-of-range
/// values rather than wrapping.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtAddr {
    /// Network number
    pub net: u16,
    /// Node number within the network
    pub node: u16,
}

impl AtAddr {
    /// Create an address from a network and node number
    pub fn new(net: u16, node: u16) -> Self {
        Self { net, node }
    }

    /// True if both fields are wildcards
    pub fn is_any(&self) -> bool {
        self.net == ANY_NET && self.node == ANY_NODE
    }

    /// True if the node field is the broadcast node
    pub fn is_broadcast(&self) -> bool {
        self.node == BROADCAST_NODE
    }
}

impl fmt::Display for AtAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.net, self.node)
    }
}

/// In-process AppleTalk socket address
///
/// The native-runtime form of the OS `sockaddr_at`: address, DDP socket
/// number, and the datagram type field that only some platform layouts carry.
/// Length and family tags are not part of the value; the encoder owns them.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SockaddrAt {
    /// Network/node address
    pub addr: AtAddr,
    /// DDP socket number (`ANY_PORT` lets the provider assign one)
    pub port: u16,
    /// Datagram type; must be 0 on layouts without a type field
    pub dtype: u16,
}

impl SockaddrAt {
    /// Create a socket address with no datagram type
    pub fn new(addr: AtAddr, port: u16) -> Self {
        Self {
            addr,
            port,
            dtype: 0,
        }
    }
}

/// Check whether a DDP socket number falls in the dynamically assigned range
pub fn is_dynamic_socket(port: u16) -> bool {
    (SOCKET_DYNAMIC_MIN..=SOCKET_DYNAMIC_MAX).contains(&port)
}
