//! DDP Socket Module
//!
//! Provides the four socket operations over the operating system's AppleTalk
//! DDP provider: open, close, send, receive. Each call marshals addresses
//! through the build-time selected `sockaddr_at` layout and delegates to the
//! provider once; OS errors are classified into [`DdpError`] and surfaced,
//! never swallowed or retried.

use entities_appletalk::SockaddrAt;

#[cfg(unix)]
use std::io;
#[cfg(unix)]
use std::os::unix::io::IntoRawFd;

#[cfg(unix)]
use infrastructure_sockaddr_encoding::{decode_sockaddr_at, encode_sockaddr_at, SOCKADDR_AT_LEN};
#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::unistd::close;
#[cfg(unix)]
use socket2::{Domain, SockAddr, Socket, Type};

#[cfg(unix)]
use crate::debug::debug_output;

/// DDP shim error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdpError {
    /// Malformed or out-of-range address fields
    AddressInvalid(String),
    /// Closed or unknown handle reused
    InvalidHandle,
    /// The provider cannot allocate a socket
    ResourceExhausted,
    /// Caller lacks privilege to open AppleTalk sockets
    PermissionDenied,
    /// Non-blocking operation would block; the caller may retry
    WouldBlock,
    /// Datagram longer than the supplied buffer
    BufferTooSmall {
        /// Full length of the datagram the provider reported
        datagram_len: usize,
        /// Capacity of the caller's buffer
        capacity: usize,
    },
    /// No AppleTalk provider on this platform
    NotSupported,
    /// Other OS-level failure, with the operation that produced it
    Io {
        /// Socket call that failed
        op: &'static str,
        /// Raw OS error code
        errno: i32,
    },
}

/// Opaque handle to an open DDP socket
///
/// Plain value wrapper around the provider's descriptor. The caller owns the
/// handle from `ddp_open` until exactly one `ddp_close`; the shim never
/// closes it implicitly, and a second close is surfaced as
/// [`DdpError::InvalidHandle`] rather than deduplicated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SocketHandle(i32);

impl SocketHandle {
    /// Wrap an existing raw descriptor
    pub fn from_raw_fd(fd: i32) -> Self {
        Self(fd)
    }

    /// Raw descriptor value
    pub fn as_raw_fd(&self) -> i32 {
        self.0
    }
}

/// Classify an OS error reported by `op`
#[cfg(unix)]
fn os_error(op: &'static str, err: io::Error) -> DdpError {
    if err.kind() == io::ErrorKind::WouldBlock {
        return DdpError::WouldBlock;
    }
    match err.raw_os_error() {
        Some(libc::EBADF) => DdpError::InvalidHandle,
        Some(libc::EACCES) | Some(libc::EPERM) => DdpError::PermissionDenied,
        Some(libc::EMFILE) | Some(libc::ENFILE) | Some(libc::ENOBUFS) | Some(libc::ENOMEM) => {
            DdpError::ResourceExhausted
        }
        Some(libc::EAFNOSUPPORT) | Some(libc::EPROTONOSUPPORT) | Some(libc::ESOCKTNOSUPPORT) => {
            DdpError::NotSupported
        }
        Some(errno) => DdpError::Io { op, errno },
        None => DdpError::Io { op, errno: 0 },
    }
}

#[cfg(unix)]
fn addr_invalid<E: std::fmt::Debug>(err: E) -> DdpError {
    DdpError::AddressInvalid(format!("{:?}", err))
}

/// Build a provider socket address from marshaled bytes
#[cfg(unix)]
fn raw_sock_addr(raw: &[u8; SOCKADDR_AT_LEN]) -> SockAddr {
    let mut storage: libc::sockaddr_storage = unsafe { std::mem::zeroed() };
    unsafe {
        std::ptr::copy_nonoverlapping(raw.as_ptr(), &mut storage as *mut _ as *mut u8, raw.len());
        SockAddr::new(storage, raw.len() as libc::socklen_t)
    }
}

/// Open a DDP socket bound to a local address
///
/// Both addresses are validated and marshaled before the provider is touched.
/// When a bridge (router/gateway) address is given, the socket is connected
/// to it so outbound datagrams are routed through that gateway; explicit
/// destinations in [`ddp_send_to`] remain available.
///
/// # Arguments
///
/// * `local` - Local address to bind (`ANY_PORT` lets the provider assign a
///   dynamic socket number)
/// * `bridge` - Optional bridge address to route through
///
/// # Returns
///
/// * `Ok(SocketHandle)` - Open socket, owned by the caller
/// * `Err(DdpError)` - `AddressInvalid`, `ResourceExhausted`,
///   `PermissionDenied`, `NotSupported`, or `Io`
#[cfg(unix)]
pub fn ddp_open(local: &SockaddrAt, bridge: Option<&SockaddrAt>) -> Result<SocketHandle, DdpError> {
    let local_raw = encode_sockaddr_at(local).map_err(addr_invalid)?;
    let bridge_raw = bridge
        .map(|b| encode_sockaddr_at(b).map_err(addr_invalid))
        .transpose()?;

    let socket = Socket::new(Domain::from(libc::AF_APPLETALK), Type::DGRAM, None)
        .map_err(|e| os_error("socket", e))?;
    socket
        .bind(&raw_sock_addr(&local_raw))
        .map_err(|e| os_error("bind", e))?;
    if let Some(raw) = bridge_raw {
        socket
            .connect(&raw_sock_addr(&raw))
            .map_err(|e| os_error("connect", e))?;
    }

    let handle = SocketHandle(socket.into_raw_fd());
    debug_output(&format!("open {} -> fd {}", local.addr, handle.0));
    Ok(handle)
}

#[cfg(not(unix))]
pub fn ddp_open(
    _local: &SockaddrAt,
    _bridge: Option<&SockaddrAt>,
) -> Result<SocketHandle, DdpError> {
    Err(DdpError::NotSupported)
}

/// Release a DDP socket
///
/// Releases the descriptor exactly once. Closing an already-closed handle is
/// a caller error and returns `InvalidHandle`; the shim does not deduplicate.
///
/// # Arguments
///
/// * `handle` - Handle returned by [`ddp_open`]
#[cfg(unix)]
pub fn ddp_close(handle: SocketHandle) -> Result<(), DdpError> {
    match close(handle.as_raw_fd()) {
        Ok(()) => {
            debug_output(&format!("close fd {}", handle.0));
            Ok(())
        }
        Err(Errno::EBADF) => Err(DdpError::InvalidHandle),
        Err(errno) => Err(DdpError::Io {
            op: "close",
            errno: errno as i32,
        }),
    }
}

#[cfg(not(unix))]
pub fn ddp_close(_handle: SocketHandle) -> Result<(), DdpError> {
    Err(DdpError::NotSupported)
}

/// Send a datagram to a destination address
///
/// # Arguments
///
/// * `handle` - Handle returned by [`ddp_open`]
/// * `buf` - Datagram payload
/// * `dest` - Destination address, marshaled into the fixed layout
/// * `flags` - Provider send flags, passed through untouched
///
/// # Returns
///
/// * `Ok(usize)` - Number of bytes sent
/// * `Err(DdpError)` - `WouldBlock`, `AddressInvalid`, `InvalidHandle`,
///   or `Io`
#[cfg(unix)]
pub fn ddp_send_to(
    handle: SocketHandle,
    buf: &[u8],
    dest: &SockaddrAt,
    flags: i32,
) -> Result<usize, DdpError> {
    let dest_raw = encode_sockaddr_at(dest).map_err(addr_invalid)?;

    let sent = unsafe {
        libc::sendto(
            handle.as_raw_fd(),
            buf.as_ptr() as *const libc::c_void,
            buf.len(),
            flags,
            dest_raw.as_ptr() as *const libc::sockaddr,
            SOCKADDR_AT_LEN as libc::socklen_t,
        )
    };
    if sent < 0 {
        return Err(os_error("sendto", io::Error::last_os_error()));
    }
    Ok(sent as usize)
}

#[cfg(not(unix))]
pub fn ddp_send_to(
    _handle: SocketHandle,
    _buf: &[u8],
    _dest: &SockaddrAt,
    _flags: i32,
) -> Result<usize, DdpError> {
    Err(DdpError::NotSupported)
}

/// Receive a datagram and its source address
///
/// The source address is unmarshaled from the fixed layout back into a
/// [`SockaddrAt`]. A datagram longer than `buf` is surfaced as
/// `BufferTooSmall` with the full length the provider reported, never
/// truncated silently.
///
/// # Arguments
///
/// * `handle` - Handle returned by [`ddp_open`]
/// * `buf` - Caller-supplied receive buffer
/// * `flags` - Provider receive flags, passed through untouched
///
/// # Returns
///
/// * `Ok((usize, SockaddrAt))` - Bytes received and the source address
/// * `Err(DdpError)` - `WouldBlock`, `BufferTooSmall`, `AddressInvalid`,
///   `InvalidHandle`, or `Io`
#[cfg(unix)]
pub fn ddp_recv_from(
    handle: SocketHandle,
    buf: &mut [u8],
    flags: i32,
) -> Result<(usize, SockaddrAt), DdpError> {
    // MSG_TRUNC makes the provider report the full datagram length even when
    // it exceeds the buffer.
    #[cfg(target_os = "linux")]
    let flags = flags | libc::MSG_TRUNC;

    let mut src_raw = [0u8; SOCKADDR_AT_LEN];
    let mut addrlen = SOCKADDR_AT_LEN as libc::socklen_t;
    let received = unsafe {
        libc::recvfrom(
            handle.as_raw_fd(),
            buf.as_mut_ptr() as *mut libc::c_void,
            buf.len(),
            flags,
            src_raw.as_mut_ptr() as *mut libc::sockaddr,
            &mut addrlen,
        )
    };
    if received < 0 {
        return Err(os_error("recvfrom", io::Error::last_os_error()));
    }
    let received = received as usize;
    if received > buf.len() {
        return Err(DdpError::BufferTooSmall {
            datagram_len: received,
            capacity: buf.len(),
        });
    }

    let src = decode_sockaddr_at(&src_raw).map_err(addr_invalid)?;
    Ok((received, src))
}

#[cfg(not(unix))]
pub fn ddp_recv_from(
    _handle: SocketHandle,
    _buf: &mut [u8],
    _flags: i32,
) -> Result<(usize, SockaddrAt), DdpError> {
    Err(DdpError::NotSupported)
}
