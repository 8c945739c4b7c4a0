use feather::http::response::{Response, StatusCode, build};
use feather::http::writer::{ResponseWriter, serialize_response};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
}

#[test]
fn test_build_found_is_ok() {
    let response = build(true, b"<h1>Hi</h1>".to_vec());

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"<h1>Hi</h1>".to_vec());
}

#[test]
fn test_build_not_found_carries_error_page() {
    let response = build(false, b"nothing here".to_vec());

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"nothing here".to_vec());
}

#[test]
fn test_serialize_ok() {
    let bytes = serialize_response(&Response::ok(b"body".to_vec()));
    assert_eq!(bytes, b"HTTP/1.1 200 OK\r\n\nbody".to_vec());
}

#[test]
fn test_serialize_not_found() {
    let bytes = serialize_response(&Response::not_found(b"404 page".to_vec()));
    assert_eq!(bytes, b"HTTP/1.1 404 Not Found\r\n\n404 page".to_vec());
}

#[test]
fn test_serialize_emits_no_headers() {
    let bytes = serialize_response(&Response::ok(b"x".to_vec()));
    let text = String::from_utf8(bytes).unwrap();

    assert!(!text.contains("Content-Length"));
    assert!(!text.contains("Content-Type"));
    assert!(!text.contains("Connection"));
}

#[test]
fn test_serialize_binary_body_verbatim() {
    let body = vec![0u8, 159, 146, 150, 255];
    let bytes = serialize_response(&Response::ok(body.clone()));
    let header_len = b"HTTP/1.1 200 OK\r\n\n".len();

    assert_eq!(&bytes[header_len..], body.as_slice());
}

#[test]
fn test_empty_body() {
    let writer = ResponseWriter::new(&Response::not_found(Vec::new()));
    assert_eq!(writer.as_bytes(), b"HTTP/1.1 404 Not Found\r\n\n");
}
