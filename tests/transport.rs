//! Connection handling over real sockets and transcript replay through the binary.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::process::Command as Process;
use std::thread;

use gridbot::session::SessionConfig;
use gridbot::transport::{ServerConfig, serve_stream};

const TRANSCRIPT: &str = concat!(
    r#"{"game_info":{"map_width":10,"map_height":10,"unit_info":{"worker":{"cost":100},"scout":{"cost":130},"tank":{"cost":150}}}}"#,
    "\n",
    "\n",
    r#"{"unit_updates":[{"id":1,"player_id":0,"x":2,"y":2,"type":"base","status":"idle","health":300,"resource":150}]}"#,
    "\n",
    r#"{"unit_updates":[{"id":3,"player_id":0,"x":4,"y":4,"type":"tank","status":"idle","health":30}],"tile_updates":[{"x":5,"y":4,"visible":true,"blocked":false,"units":[{"id":90,"player_id":1}]}]}"#,
    "\n",
);

fn write_transcript(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_tcp_connection_answers_each_line() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = ServerConfig {
        addr: listener.local_addr().unwrap(),
        seed: Some(5),
        session: SessionConfig::default(),
    };

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        serve_stream(stream, &config)
    });

    let mut client = TcpStream::connect(config.addr).unwrap();
    client.write_all(TRANSCRIPT.as_bytes()).unwrap();
    client.shutdown(std::net::Shutdown::Write).unwrap();

    let responses: Vec<String> = BufReader::new(client).lines().map(Result::unwrap).collect();
    assert_eq!(
        responses,
        vec![
            r#"{"commands":[]}"#,
            r#"{"commands":[{"command":"CREATE","type":"worker"}]}"#,
            r#"{"commands":[{"command":"MELEE","unit":3,"target":90},{"command":"CREATE","type":"worker"}]}"#,
        ]
    );
    assert_eq!(server.join().unwrap().unwrap(), 3);
}

#[test]
fn test_each_connection_starts_fresh() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = ServerConfig {
        addr: listener.local_addr().unwrap(),
        seed: Some(5),
        session: SessionConfig::default(),
    };

    let server = thread::spawn(move || {
        let mut turns = Vec::new();
        for _ in 0..2 {
            let (stream, _) = listener.accept().unwrap();
            turns.push(serve_stream(stream, &config).unwrap());
        }
        turns
    });

    // The second connection must not inherit the first one's base.
    let exchanges = [
        (
            r#"{"unit_updates":[{"id":1,"player_id":0,"x":2,"y":2,"type":"base","status":"idle","health":300,"resource":150}]}"#,
            "{\"commands\":[{\"command\":\"CREATE\",\"type\":\"worker\"}]}\n",
        ),
        (
            r#"{"unit_updates":[{"id":3,"player_id":0,"x":0,"y":0,"type":"tank","status":"idle","health":30}]}"#,
            "{\"commands\":[]}\n",
        ),
    ];
    for (request, expected) in exchanges {
        let mut client = TcpStream::connect(config.addr).unwrap();
        client.write_all(request.as_bytes()).unwrap();
        client.write_all(b"\n").unwrap();
        client.shutdown(std::net::Shutdown::Write).unwrap();

        let mut line = String::new();
        BufReader::new(client).read_line(&mut line).unwrap();
        assert_eq!(line, expected);
    }

    assert_eq!(server.join().unwrap(), vec![1, 1]);
}

#[test]
fn test_malformed_line_closes_connection() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = ServerConfig {
        addr: listener.local_addr().unwrap(),
        seed: None,
        session: SessionConfig::default(),
    };

    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        serve_stream(stream, &config)
    });

    let mut client = TcpStream::connect(config.addr).unwrap();
    client.write_all(b"{}\n{oops\n{}\n").unwrap();
    client.shutdown(std::net::Shutdown::Write).unwrap();

    // The server may reset the socket once it gives up; stop at that point.
    let responses: Vec<String> = BufReader::new(client).lines().map_while(Result::ok).collect();
    assert_eq!(responses, vec![r#"{"commands":[]}"#]);
    assert!(server.join().unwrap().is_err());
}

#[test]
fn test_replay_json_prints_wire_responses() {
    let transcript = write_transcript(TRANSCRIPT);

    let output = Process::new(env!("CARGO_BIN_EXE_gridbot"))
        .args(["replay", "--seed", "1"])
        .arg(transcript.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        concat!(
            "{\"commands\":[]}\n",
            "{\"commands\":[{\"command\":\"CREATE\",\"type\":\"worker\"}]}\n",
            "{\"commands\":[{\"command\":\"MELEE\",\"unit\":3,\"target\":90},{\"command\":\"CREATE\",\"type\":\"worker\"}]}\n",
        )
    );
}

#[test]
fn test_replay_text_lists_commands() {
    let transcript = write_transcript(TRANSCRIPT);

    let output = Process::new(env!("CARGO_BIN_EXE_gridbot"))
        .args(["replay", "--format", "text", "--seed", "1"])
        .arg(transcript.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Turn 1 (stockpile: 0, commands: 0)"));
    assert!(stdout.contains("Turn 2 (stockpile: 150, commands: 1)"));
    assert!(stdout.contains("  base: create worker"));
    assert!(stdout.contains("Turn 3 (stockpile: 150, commands: 2)"));
    assert!(stdout.contains("  unit 3: melee unit 90"));
}

#[test]
fn test_replay_reports_bad_line() {
    let transcript = write_transcript("{}\n[1, 2\n");

    let output = Process::new(env!("CARGO_BIN_EXE_gridbot"))
        .args(["replay", "--format", "text"])
        .arg(transcript.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Line 2"));
}

#[test]
fn test_replay_missing_file_fails() {
    let output = Process::new(env!("CARGO_BIN_EXE_gridbot"))
        .args(["replay", "/nonexistent/transcript.jsonl"])
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("Failed to read"));
}
