#![no_main]
use libfuzzer_sys::fuzz_target;
use xmldom::{Node, Serializer};

// Anything the parser accepts must serialize to text it accepts again.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(node) = s.parse::<Node>() {
            let text = Serializer::new().serialize(&node);
            assert!(text.parse::<Node>().is_ok());
        }
    }
});
