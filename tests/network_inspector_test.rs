use std::io::Cursor;
use std::time::Duration;

use image::{ImageFormat, RgbImage};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use carousel_audit::network::{IdentityProfile, ImageClient, ImageInspector, InspectionError};

// * Serves a single canned HTTP response on a local port and returns its base URL.
async fn serve_once(response: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

fn http_response(status: &str, content_type: &str, body: &[u8], with_length: bool) -> Vec<u8> {
    let mut head = format!("HTTP/1.1 {}\r\nContent-Type: {}\r\nConnection: close\r\n", status, content_type);
    if with_length {
        head.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    head.push_str("\r\n");

    let mut out = head.into_bytes();
    out.extend_from_slice(body);
    out
}

fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    RgbImage::new(width, height).write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

fn client(timeout: Duration) -> ImageClient {
    ImageClient::with_timeout(&IdentityProfile::desktop_chrome(), timeout).unwrap()
}

#[tokio::test]
async fn test_inspect_png_with_content_length() {
    let body = encoded(428, 612, ImageFormat::Png);
    let base = serve_once(http_response("200 OK", "image/png", &body, true)).await;

    let details = client(Duration::from_secs(5))
        .inspect(&format!("{}/banner.png", base))
        .await
        .unwrap();

    assert_eq!((details.width, details.height), (428, 612));
    assert_eq!(details.size_bytes, body.len() as u64);
}

#[tokio::test]
async fn test_inspect_jpeg_without_content_length_uses_body_size() {
    let body = encoded(300, 200, ImageFormat::Jpeg);
    let base = serve_once(http_response("200 OK", "image/jpeg", &body, false)).await;

    let details = client(Duration::from_secs(5))
        .inspect(&format!("{}/hero.jpg", base))
        .await
        .unwrap();

    assert_eq!((details.width, details.height), (300, 200));
    assert_eq!(details.size_bytes, body.len() as u64);
}

#[tokio::test]
async fn test_request_does_not_negotiate_image_variants() {
    let body = encoded(428, 612, ImageFormat::Png);
    let response = http_response("200 OK", "image/png", &body, true);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<String>();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            // * Read until the end of the request head
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = tx.send(String::from_utf8_lossy(&request).to_string());
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
        }
    });

    client(Duration::from_secs(5))
        .inspect(&format!("http://{}/banner.png", addr))
        .await
        .unwrap();

    let request = rx.await.unwrap().to_lowercase();
    let accept = request
        .lines()
        .find(|line| line.starts_with("accept:"))
        .unwrap_or_default()
        .to_string();

    assert_eq!(accept.trim(), "accept: */*");
    assert!(!request.contains("image/avif"));
    assert!(!request.contains("image/webp"));
}

#[tokio::test]
async fn test_non_success_status_is_fetch_failure() {
    let base = serve_once(http_response("404 Not Found", "text/plain", b"missing", true)).await;

    let err = client(Duration::from_secs(5))
        .inspect(&format!("{}/gone.png", base))
        .await
        .unwrap_err();

    assert!(matches!(err, InspectionError::FetchFailed(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_html_body_is_unrecognized_format() {
    let body = b"<!doctype html><html><body>Soft 404</body></html>";
    let base = serve_once(http_response("200 OK", "text/html", body, true)).await;

    let err = client(Duration::from_secs(5))
        .inspect(&format!("{}/banner.png", base))
        .await
        .unwrap_err();

    assert!(matches!(err, InspectionError::UnrecognizedFormat(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        }
    });

    let err = client(Duration::from_millis(200))
        .inspect(&format!("http://{}/slow.png", addr))
        .await
        .unwrap_err();

    assert!(matches!(err, InspectionError::Timeout), "got {:?}", err);
}

#[tokio::test]
async fn test_refused_connection_is_fetch_failure() {
    // * Bind then drop to get a port nobody listens on
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let err = client(Duration::from_secs(5))
        .inspect(&format!("http://{}/banner.png", addr))
        .await
        .unwrap_err();

    assert!(matches!(err, InspectionError::FetchFailed(_)), "got {:?}", err);
}
