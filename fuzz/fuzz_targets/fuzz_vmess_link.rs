#![no_main]
//! VMess share-link decoding fuzzer
//!
//! Feeds arbitrary text both as a raw link and as a base64-wrapped payload,
//! so the JSON layer sees hostile input too. Decoding must never panic and
//! every descriptor it returns must carry a name.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(d) = sb_link::vmess::decode(s) {
            assert!(!d.display_name.is_empty());
        }
    }
    let wrapped = format!("vmess://{}", STANDARD.encode(data));
    if let Ok(d) = sb_link::vmess::decode(&wrapped) {
        assert!(!d.display_name.is_empty());
        if d.attributes.contains_key("tls") {
            assert!(d.attr_path(&["tls", "server_name"]).is_some());
        }
    }
});
