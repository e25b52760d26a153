use super::server::{DnsServerHandler, Transport};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const DEFAULT_TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_UDP_MESSAGE_SIZE: usize = 4096;

/// Serves the handler over UDP and TCP on one address until closed.
pub struct DnsServer {
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
    tcp_idle_timeout: Duration,
}

impl DnsServer {
    pub fn new(handler: Arc<DnsServerHandler>) -> Self {
        Self {
            handler,
            shutdown: CancellationToken::new(),
            tcp_idle_timeout: DEFAULT_TCP_IDLE_TIMEOUT,
        }
    }

    pub fn with_tcp_idle_timeout(mut self, timeout: Duration) -> Self {
        self.tcp_idle_timeout = timeout;
        self
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Stops accepting new requests. Requests already being handled run to
    /// completion. Safe to call more than once, and before `run`.
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    /// Binds `address` and serves until `close` is called.
    pub async fn run(&self, address: &str) -> io::Result<()> {
        let socket_addr = tokio::net::lookup_host(address).await?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("address '{}' did not resolve", address),
            )
        })?;

        let udp_socket = Arc::new(create_udp_socket(socket_addr)?);
        let local_addr = udp_socket.local_addr()?;
        let tcp_listener = create_tcp_listener(local_addr)?;

        info!(bind_address = %local_addr, "DNS server listening on UDP and TCP");

        tokio::join!(
            serve_udp(udp_socket, self.handler.clone(), self.shutdown.clone()),
            serve_tcp(
                tcp_listener,
                self.handler.clone(),
                self.tcp_idle_timeout,
                self.shutdown.clone()
            ),
        );

        info!(bind_address = %local_addr, "DNS server stopped");
        Ok(())
    }
}

async fn serve_udp(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) {
    let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (len, peer) = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => match received {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let request = recv_buf[..len].to_vec();
        let handler = handler.clone();
        let socket = socket.clone();
        tokio::spawn(async move {
            if let Some(response) = handler.handle_wire(&request, Transport::Udp).await {
                if let Err(e) = socket.send_to(&response, peer).await {
                    warn!(client = %peer, error = %e, "UDP send error");
                }
            }
        });
    }
}

async fn serve_tcp(
    listener: TcpListener,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "TCP accept error");
                    continue;
                }
            },
        };

        let handler = handler.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            serve_tcp_connection(stream, peer, handler, idle_timeout, shutdown).await;
        });
    }
}

async fn serve_tcp_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    loop {
        let request = tokio::select! {
            _ = shutdown.cancelled() => break,
            read = tokio::time::timeout(idle_timeout, read_with_length_prefix(&mut stream)) => {
                match read {
                    Ok(Ok(Some(frame))) => frame,
                    Ok(Ok(None)) => break,
                    Ok(Err(e)) => {
                        warn!(client = %peer, error = %e, "TCP read error");
                        break;
                    }
                    Err(_) => {
                        debug!(client = %peer, "TCP connection idle, closing");
                        break;
                    }
                }
            }
        };

        if let Some(response) = handler.handle_wire(&request, Transport::Tcp).await {
            if let Err(e) = send_with_length_prefix(&mut stream, &response).await {
                warn!(client = %peer, error = %e, "TCP send error");
                break;
            }
        }
    }
}

/// Reads one length-prefixed message. `None` means the peer closed the
/// connection between messages.
pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Option<Vec<u8>>>
where
    S: AsyncReadExt + Unpin,
{
    let len = match stream.read_u16().await {
        Ok(len) => len as usize,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    };

    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).await?;
    Ok(Some(buf))
}

pub(crate) async fn send_with_length_prefix<S>(stream: &mut S, message: &[u8]) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let len = u16::try_from(message.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("message of {} bytes exceeds TCP frame limit", message.len()),
        )
    })?;

    let mut frame = Vec::with_capacity(2 + message.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(message);
    stream.write_all(&frame).await?;
    stream.flush().await
}

fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let socket = Socket::new(
        Domain::for_address(socket_addr),
        Type::DGRAM,
        Some(Protocol::UDP),
    )?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

fn create_tcp_listener(socket_addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(
        Domain::for_address(socket_addr),
        Type::STREAM,
        Some(Protocol::TCP),
    )?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
