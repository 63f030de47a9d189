#![no_main]

use libfuzzer_sys::fuzz_target;
use rotate::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Source buffers are UTF-8; other inputs are rejected by the loader before lexing.
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            let _ = parser::parse(s, &tokens);
        }
    }
});
