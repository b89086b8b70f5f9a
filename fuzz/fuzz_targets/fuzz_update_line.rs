#![no_main]

//! Raw update line fuzzer.
//!
//! Any byte sequence either yields one well-formed response line or an
//! error; the session must never panic.

use gridbot::transport::session_rng;
use gridbot::{Response, SessionConfig, TurnSession};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut session = TurnSession::new(SessionConfig::default(), session_rng(Some(0)));
    for line in text.lines() {
        if let Ok(response) = session.handle_line(line) {
            assert!(response.ends_with('\n'));
            assert_eq!(response.matches('\n').count(), 1);
            let parsed: Result<Response, _> = serde_json::from_str(response.trim_end());
            assert!(parsed.is_ok(), "unparseable response: {response}");
        }
    }
});
