mod helpers;

use djdns_infrastructure::dns::DnsServer;
use helpers::*;
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::task::JoinHandle;

const IO_TIMEOUT: Duration = Duration::from_secs(3);

async fn start_server(address: &'static str) -> (Arc<DnsServer>, JoinHandle<std::io::Result<()>>) {
    let server = Arc::new(
        DnsServer::new(Arc::new(standard_handler(Duration::from_millis(200))))
            .with_tcp_idle_timeout(Duration::from_millis(500)),
    );
    let handle = {
        let server = server.clone();
        tokio::spawn(async move { server.run(address).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    (server, handle)
}

async fn udp_exchange(address: &str, request: &Message) -> Message {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(&to_wire(request), address).await.unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(IO_TIMEOUT, socket.recv_from(&mut buf))
        .await
        .expect("no UDP response")
        .unwrap();
    from_wire(&buf[..len])
}

async fn tcp_exchange(stream: &mut TcpStream, request: &Message) -> Message {
    let bytes = to_wire(request);
    stream.write_u16(bytes.len() as u16).await.unwrap();
    stream.write_all(&bytes).await.unwrap();

    let len = tokio::time::timeout(IO_TIMEOUT, stream.read_u16())
        .await
        .expect("no TCP response")
        .unwrap();
    let mut buf = vec![0u8; len as usize];
    stream.read_exact(&mut buf).await.unwrap();
    from_wire(&buf)
}

#[tokio::test]
async fn test_udp_queries_are_answered() {
    let address = "127.0.0.1:19953";
    let (server, handle) = start_server(address).await;

    let answered = udp_exchange(address, &query(100, "abcdef.")).await;
    let failed = udp_exchange(address, &query(101, "evil.")).await;
    let after = udp_exchange(address, &query(102, "dogbreath.de.")).await;

    assert_eq!(answered.id(), 100);
    assert_eq!(answered.answers().len(), 2);
    assert_eq!(failed.id(), 101);
    assert_eq!(failed.response_code(), ResponseCode::ServFail);
    assert_eq!(after.response_code(), ResponseCode::NoError);
    assert_eq!(after.answers().len(), 1);

    server.close();
    let result = tokio::time::timeout(IO_TIMEOUT, handle).await.unwrap().unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_udp_timeout_does_not_block_other_queries() {
    let address = "127.0.0.1:19954";
    let (server, handle) = start_server(address).await;

    let slow_query = query(200, "slow.query.");
    let fast_query = query(201, "abcdef.");

    let (slow, fast) = tokio::join!(
        udp_exchange(address, &slow_query),
        udp_exchange(address, &fast_query),
    );

    assert_eq!(slow.response_code(), ResponseCode::ServFail);
    assert_eq!(fast.response_code(), ResponseCode::NoError);

    server.close();
    tokio::time::timeout(IO_TIMEOUT, handle).await.unwrap().unwrap().unwrap();
}

#[tokio::test]
async fn test_tcp_serves_several_messages_per_connection() {
    let address = "127.0.0.1:19955";
    let (server, handle) = start_server(address).await;

    let mut stream = TcpStream::connect(address).await.unwrap();
    let first = tcp_exchange(&mut stream, &query(300, "abcdef.")).await;
    let second = tcp_exchange(&mut stream, &query(301, "big.example.")).await;

    assert_eq!(first.id(), 300);
    assert_eq!(first.answers().len(), 2);
    assert!(!second.truncated());
    assert_eq!(second.answers().len(), big_records().len());

    server.close();
    tokio::time::timeout(IO_TIMEOUT, handle).await.unwrap().unwrap().unwrap();
}

#[tokio::test]
async fn test_close_before_run_returns_promptly() {
    let server = DnsServer::new(Arc::new(standard_handler(Duration::from_millis(200))));

    server.close();
    server.close();
    let result = tokio::time::timeout(IO_TIMEOUT, server.run("127.0.0.1:19956")).await;

    assert!(result.unwrap().is_ok());
}

#[tokio::test]
async fn test_close_is_idempotent_while_running() {
    let (server, handle) = start_server("127.0.0.1:19957").await;

    server.close();
    server.close();

    let result = tokio::time::timeout(IO_TIMEOUT, handle).await.unwrap().unwrap();
    assert!(result.is_ok());
    assert!(server.shutdown_token().is_cancelled());
}

#[tokio::test]
async fn test_run_rejects_unresolvable_address() {
    let server = DnsServer::new(Arc::new(standard_handler(Duration::from_millis(200))));

    let result = server.run("not an address").await;

    assert!(result.is_err());
}
