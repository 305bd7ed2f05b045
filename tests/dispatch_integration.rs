use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use scribe::app::{Message, Model, Route, update};
use scribe::dispatch::{Command, Dispatcher, HttpActionClient};
use scribe::editor::{BufferPos, EditorBuffer};

/// Answer one request with `status` and `body`, returning the endpoint URL.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':')
                && name.eq_ignore_ascii_case("content-length")
            {
                content_length = value.trim().parse().unwrap();
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{addr}/proc")
}

fn dispatcher_for(endpoint: &str) -> Dispatcher {
    let client = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap();
    Dispatcher::new(Arc::new(HttpActionClient::with_client(endpoint, client)))
}

/// Select `start..end` on line 0 and press `command`; returns the model after
/// the outcome has been applied.
fn run_action(endpoint: &str, text: &str, end: usize, command: Command) -> Model {
    let dispatcher = dispatcher_for(endpoint);
    let mut model = Model::new((80, 24)).with_route(Route::Dashboard);
    model.editor = EditorBuffer::from_text(text);

    model = update(model, Message::PointerDown(BufferPos { line: 0, col: 0 }));
    model = update(model, Message::PointerUp(BufferPos { line: 0, col: end }));
    assert!(model.popup_visible());

    model = update(model, Message::RequestAction(command));
    let (token, request) = model.take_outgoing().unwrap();
    dispatcher.dispatch(token, request);

    let outcome = dispatcher.wait_next(Duration::from_secs(10)).unwrap();
    update(model, Message::DispatchFinished(outcome))
}

#[test]
fn test_successful_action_replaces_editor_content() {
    let endpoint = serve_once("200 OK", "\"Hello world\"");
    let model = run_action(&endpoint, "hi there", 2, Command::Paraphrase);
    assert_eq!(model.editor.text(), "Hello world");
    assert!(!model.popup_visible());
    assert!(model.in_flight.is_none());
}

#[test]
fn test_server_error_leaves_content_and_hides_popup() {
    let endpoint = serve_once("500 Internal Server Error", "\"boom\"");
    let model = run_action(&endpoint, "hi there", 2, Command::Summarize);
    assert_eq!(model.editor.text(), "hi there");
    assert!(!model.popup_visible());
}

#[test]
fn test_numeric_body_is_inserted_as_text() {
    let endpoint = serve_once("200 OK", "42");
    let model = run_action(&endpoint, "the answer", 3, Command::Expand);
    assert_eq!(model.editor.text(), "42");
}
