#![cfg(feature = "vmess")]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use proptest::prelude::*;
use sb_link::vmess;
use serde_json::{json, Value};

fn link(payload: &Value) -> String {
    format!("vmess://{}", STANDARD.encode(payload.to_string()))
}

fn any_json_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(|f| json!(f)),
        ".{0,12}".prop_map(Value::String),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // any port/aid shape decodes
    #[test]
    fn numeric_fields_never_fail(port in any_json_scalar(), aid in any_json_scalar()) {
        let d = vmess::decode(&link(&json!({"add": "h", "port": port, "aid": aid})));
        prop_assert!(d.is_ok());
    }

    #[test]
    fn valid_ports_roundtrip(port in any::<u16>(), quoted in any::<bool>()) {
        let v = if quoted { json!(port.to_string()) } else { json!(port) };
        let d = vmess::decode(&link(&json!({"add": "h", "port": v}))).unwrap();
        prop_assert_eq!(d.server_port, port);
    }

    #[test]
    fn name_never_empty(
        ps in ".{0,8}",
        add in ".{0,8}",
        frag in "[A-Za-z0-9%+]{0,8}",
    ) {
        let l = format!("{}#{}", link(&json!({"ps": ps, "add": add})), frag);
        let d = vmess::decode(&l).unwrap();
        prop_assert!(!d.display_name.is_empty());
    }

    #[test]
    fn arbitrary_input_never_panics(s in "\\PC{0,64}") {
        let _ = vmess::decode(&s);
    }
}
