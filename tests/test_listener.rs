//! Tests for the connection dispatcher over real sockets

mod common;

use std::sync::Arc;

use common::{Site, split_response};
use simple_webserver::server::listener::serve;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn fetch(addr: std::net::SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn test_serves_one_request_per_connection() {
    let site = Site::new();
    site.write("www/res/default.html", "<h1><cs371server></h1>\n");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve(listener, Arc::new(site.config())));

    let raw = fetch(addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    let (head, body) = split_response(&raw);

    assert_eq!(head, "HTTP/1.1 200 OK\nContent-Type: text/html");
    assert_eq!(body, b"<h1>xiao's server</h1>\n");

    server.abort();
}

#[tokio::test]
async fn test_concurrent_connections_are_independent() {
    let site = Site::new();
    site.write("a.html", "alpha");
    site.write("b.gif", b"GIF89a");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve(listener, Arc::new(site.config())));

    // Hold one connection open without sending anything
    let idle = TcpStream::connect(addr).await.unwrap();

    let (a, b, missing) = tokio::join!(
        fetch(addr, b"GET /a.html HTTP/1.1\r\n\r\n"),
        fetch(addr, b"GET /b.gif HTTP/1.1\r\n\r\n"),
        fetch(addr, b"GET /nope.html HTTP/1.1\r\n\r\n"),
    );

    assert_eq!(split_response(&a).1, b"alpha");

    let (head, body) = split_response(&b);
    assert!(head.ends_with("Content-Type: image/gif"));
    assert_eq!(body, b"GIF89a");

    assert!(String::from_utf8(missing).unwrap().contains("404 Error Page Not Found"));

    drop(idle);
    server.abort();
}
