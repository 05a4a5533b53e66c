use app::cli::decode::{run, DecodeArgs};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

fn link(json: &str, name: &str) -> String {
    format!("vmess://{}#{}", STANDARD.encode(json), name)
}

#[test]
fn decodes_arguments_one_per_line() {
    let args = DecodeArgs {
        links: vec![
            link(r#"{"add":"a.example","port":443,"id":"u1","tls":"tls"}"#, "one"),
            link(r#"{"add":"b.example","port":"80","net":"ws","path":"/ws"}"#, "two"),
        ],
        ..Default::default()
    };
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let failed = run(&args, std::io::empty(), &mut out, &mut err).unwrap();
    assert_eq!(failed, 0);

    let text = String::from_utf8(out).unwrap();
    let docs: Vec<Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["tag"], "one");
    assert_eq!(docs[0]["type"], "vmess");
    assert_eq!(docs[0]["extra"]["tls"]["server_name"], "a.example");
    assert_eq!(docs[1]["server_port"], 80);
    assert_eq!(docs[1]["extra"]["transport"]["path"], "/ws");
}

#[test]
fn first_failure_aborts_without_keep_going() {
    let args = DecodeArgs {
        links: vec!["vmess://###".into()],
        ..Default::default()
    };
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let e = run(&args, std::io::empty(), &mut out, &mut err).unwrap_err();
    assert!(format!("{e:#}").starts_with("link 1: "));
}

#[test]
fn keep_going_counts_failures() {
    let input = format!(
        "{}\nvmess://not*base64\n",
        link(r#"{"add":"h","port":1}"#, "ok")
    );
    let args = DecodeArgs {
        keep_going: true,
        pretty: true,
        ..Default::default()
    };
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let failed = run(&args, input.as_bytes(), &mut out, &mut err).unwrap();
    assert_eq!(failed, 1);
    let doc: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(doc["tag"], "ok");
    assert!(String::from_utf8(err).unwrap().contains("link 2: payload base64 decode failed"));
}

struct ClosedPipe(Vec<u8>);

impl std::io::Write for ClosedPipe {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }
}

#[test]
fn flush_failure_is_reported() {
    let args = DecodeArgs {
        links: vec![link(r#"{"add":"h","port":1}"#, "n")],
        ..Default::default()
    };
    let mut out = ClosedPipe(Vec::new());
    let mut err = Vec::new();
    let e = run(&args, std::io::empty(), &mut out, &mut err).unwrap_err();
    assert!(format!("{e:#}").starts_with("flush output: "));
    assert!(!out.0.is_empty());
}
