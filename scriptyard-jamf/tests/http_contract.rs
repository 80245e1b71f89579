//! Contract tests for `JamfClient` against a local single-request responder.
//!
//! No HTTP-mock crate: a `TcpListener` thread accepts exactly one request,
//! captures it for assertions, and replies with a canned response.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use scriptyard_core::types::ScriptId;
use scriptyard_jamf::{JamfClient, JamfError, ScriptSummary, ScriptsRemote};

// ---------------------------------------------------------------------------
// Responder
// ---------------------------------------------------------------------------

struct Received {
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Received {
    fn header(&self, name: &str) -> Option<&str> {
        let wanted = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == wanted)
            .map(|(_, v)| v.as_str())
    }
}

fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Serve exactly one request, reply with the canned response, and hand the
/// captured request back through the join handle.
fn one_shot(
    status: u16,
    reason: &str,
    content_type: &str,
    body: &str,
) -> (String, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        while head_end(&buf).is_none() {
            let n = stream.read(&mut chunk).expect("read head");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let header_end = head_end(&buf).expect("complete request head") + 4;
        let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();

        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();
        let mut parts = request_line.split(' ');
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(": "))
            .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
            .collect();

        let content_length: usize = headers
            .iter()
            .find(|(k, _)| k == "content-length")
            .and_then(|(_, v)| v.trim().parse().ok())
            .unwrap_or(0);
        let mut body_bytes = buf[header_end..].to_vec();
        while body_bytes.len() < content_length {
            let n = stream.read(&mut chunk).expect("read body");
            if n == 0 {
                break;
            }
            body_bytes.extend_from_slice(&chunk[..n]);
        }

        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().ok();

        Received {
            method,
            path,
            headers,
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        }
    });

    (format!("http://{addr}"), handle)
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_summaries_hits_the_collection_with_auth_and_parses_json() {
    let (base, server) = one_shot(
        200,
        "OK",
        "application/json",
        r#"{"scripts": [{"id": 12, "name": "admin-1.1.sh"}]}"#,
    );
    let client = JamfClient::new(&base, "api", "pw");

    let summaries = client.list_summaries().expect("list");
    let request = server.join().expect("server thread");

    assert_eq!(
        summaries,
        vec![ScriptSummary {
            id: ScriptId(12),
            name: "admin-1.1.sh".to_string(),
        }]
    );
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/JSSResource/scripts");
    assert_eq!(request.header("authorization"), Some("Basic YXBpOnB3"));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[test]
fn list_summaries_maps_server_error_to_remote_unavailable() {
    let (base, server) = one_shot(500, "Internal Server Error", "text/html", "boom");
    let client = JamfClient::new(&base, "api", "pw");

    let err = client.list_summaries().unwrap_err();
    server.join().expect("server thread");

    match err {
        JamfError::RemoteUnavailable { status, url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("/JSSResource/scripts"), "url was {url}");
        }
        other => panic!("expected RemoteUnavailable, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// fetch
// ---------------------------------------------------------------------------

#[test]
fn fetch_envelope_returns_raw_xml() {
    let envelope = "<script><id>12</id><name>a.sh</name></script>";
    let (base, server) = one_shot(200, "OK", "text/xml", envelope);
    let client = JamfClient::new(&base, "api", "pw");

    let raw = client.fetch_envelope(ScriptId(12)).expect("fetch");
    let request = server.join().expect("server thread");

    assert_eq!(raw, envelope);
    assert_eq!(request.path, "/JSSResource/scripts/id/12");
}

#[test]
fn fetch_envelope_failure_carries_the_failing_url() {
    let (base, server) = one_shot(404, "Not Found", "text/html", "no such script");
    let client = JamfClient::new(&base, "api", "pw");

    let err = client.fetch_envelope(ScriptId(99)).unwrap_err();
    server.join().expect("server thread");

    match err {
        JamfError::RemoteUnavailable { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/id/99"), "url was {url}");
        }
        other => panic!("expected RemoteUnavailable, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// create / replace
// ---------------------------------------------------------------------------

#[test]
fn create_or_replace_puts_the_envelope_and_returns_the_response_body() {
    let (base, server) = one_shot(201, "Created", "text/xml", "<script><id>442</id></script>");
    let client = JamfClient::new(&base, "api", "pw");
    let envelope = "<script><id>0</id><name>new.sh</name></script>";

    let reply = client
        .create_or_replace(ScriptId::UNASSIGNED, envelope)
        .expect("put");
    let request = server.join().expect("server thread");

    assert_eq!(reply, "<script><id>442</id></script>");
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/JSSResource/scripts/id/0");
    assert_eq!(request.header("content-type"), Some("text/xml"));
    assert_eq!(request.body, envelope);
}

#[test]
fn create_or_replace_rejection_aborts_with_status_and_url() {
    let (base, server) = one_shot(409, "Conflict", "text/html", "name already in use");
    let client = JamfClient::new(&base, "api", "pw");

    let err = client
        .create_or_replace(ScriptId(12), "<script><id>12</id></script>")
        .unwrap_err();
    server.join().expect("server thread");

    match err {
        JamfError::RemoteRejected { status, url } => {
            assert_eq!(status, 409);
            assert!(url.ends_with("/id/12"), "url was {url}");
        }
        other => panic!("expected RemoteRejected, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

#[test]
fn delete_issues_a_delete_to_the_element_url() {
    let (base, server) = one_shot(200, "OK", "text/xml", "<script><id>12</id></script>");
    let client = JamfClient::new(&base, "api", "pw");

    client.delete(ScriptId(12)).expect("delete");
    let request = server.join().expect("server thread");

    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/JSSResource/scripts/id/12");
}

#[test]
fn delete_rejection_maps_to_remote_rejected() {
    let (base, server) = one_shot(404, "Not Found", "text/html", "gone already");
    let client = JamfClient::new(&base, "api", "pw");

    let err = client.delete(ScriptId(12)).unwrap_err();
    server.join().expect("server thread");

    assert!(matches!(err, JamfError::RemoteRejected { status: 404, .. }));
}

// ---------------------------------------------------------------------------
// transport
// ---------------------------------------------------------------------------

#[test]
fn refused_connection_surfaces_as_transport_error() {
    // Bind to grab a free port, then drop the listener so nothing answers.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let client = JamfClient::new(&format!("http://127.0.0.1:{port}"), "api", "pw");

    let err = client.list_summaries().unwrap_err();
    assert!(matches!(err, JamfError::Transport { .. }), "got {err:?}");
}
