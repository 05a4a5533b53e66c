//! VMess share links: `vmess://BASE64(json)#name`.
//!
//! The JSON payload uses the v2rayN key set (`add`, `port`, `id`, `aid`,
//! `scy`, `net`, `type`, `host`, `path`, `tls`, `sni`, `alpn`, `fp`,
//! `skip-cert-verify`). Producers disagree on types and on which keys they
//! fill in, so only two things are fatal: a payload that is not base64 and
//! a payload that is not a JSON object. Everything else gets a default.
//!
//! Output `extra` layout:
//!
//! ```text
//! uuid, alter_id, security
//! transport: { type, path, headers{Host}, host[], service_name, security }
//! tls:       { enabled, server_name, insecure, utls{enabled, fingerprint}, alpn[] }
//! ```

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, trace};

use crate::codec::{LenientBase64, PayloadDecoder};
use crate::loose::{
    coerce_u16, coerce_u32, loose_bool, loose_opt_string, loose_string, LooseNumber,
};
use crate::model::{Attributes, ConnectionDescriptor, LinkError};
use crate::uri::{query_unescape, split_fragment};
use crate::LinkParser;

/// URI prefix of VMess links.
pub const SCHEME: &str = "vmess://";
/// Protocol tag of produced descriptors.
pub const PROTOCOL: &str = "vmess";

const DEFAULT_NETWORK: &str = "tcp";
const DEFAULT_SECURITY: &str = "auto";

/// Decoded payload. Lives only for the duration of one decode call.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VmessPayload {
    #[serde(deserialize_with = "loose_opt_string")]
    v: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    ps: String,
    #[serde(deserialize_with = "loose_string")]
    add: String,
    port: Option<LooseNumber>,
    #[serde(deserialize_with = "loose_string")]
    id: String,
    aid: Option<LooseNumber>,
    #[serde(deserialize_with = "loose_string")]
    scy: String,
    #[serde(deserialize_with = "loose_string")]
    net: String,
    /// Camouflage header type; the QUIC security for `net=quic`.
    #[serde(rename = "type", deserialize_with = "loose_string")]
    header_type: String,
    #[serde(deserialize_with = "loose_string")]
    host: String,
    #[serde(deserialize_with = "loose_string")]
    path: String,
    #[serde(deserialize_with = "loose_string")]
    tls: String,
    #[serde(deserialize_with = "loose_string")]
    sni: String,
    #[serde(deserialize_with = "loose_string")]
    alpn: String,
    #[serde(deserialize_with = "loose_string")]
    fp: String,
    #[serde(rename = "skip-cert-verify", deserialize_with = "loose_bool")]
    skip_cert_verify: bool,
}

/// VMess adapter. Stateless apart from the payload decoder, which is
/// [`LenientBase64`] by default.
#[derive(Debug, Clone, Default)]
pub struct VmessParser<D = LenientBase64> {
    decoder: D,
}

impl VmessParser {
    /// Adapter using [`LenientBase64`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: PayloadDecoder> VmessParser<D> {
    /// Adapter using a caller-supplied payload decoder.
    pub fn with_decoder(decoder: D) -> Self {
        Self { decoder }
    }

    /// Decode one link.
    ///
    /// A missing `vmess://` prefix is tolerated; callers that already
    /// stripped it may pass the bare payload.
    pub fn decode(&self, link: &str) -> Result<ConnectionDescriptor, LinkError> {
        let link = link.strip_prefix(SCHEME).unwrap_or(link);

        let (body, fragment) = split_fragment(link);
        let fragment_name = match fragment {
            Some(raw) => query_unescape(raw).unwrap_or_else(|| {
                debug!(target: "sb_link::vmess", fragment = raw, "dropping undecodable link name");
                String::new()
            }),
            None => String::new(),
        };

        let bytes = self.decoder.decode(body).map_err(LinkError::PayloadDecode)?;
        // Going through a map first rejects arrays, which serde would
        // otherwise bind to the struct positionally. `null` is an empty payload.
        let object: Option<Map<String, Value>> =
            serde_json::from_slice(&bytes).map_err(LinkError::PayloadFormat)?;
        let payload: VmessPayload =
            serde_json::from_value(Value::Object(object.unwrap_or_default()))
                .map_err(LinkError::PayloadFormat)?;
        if let Some(v) = payload.v.as_deref() {
            trace!(target: "sb_link::vmess", version = v, "payload version");
        }

        let descriptor = build(payload, fragment_name);
        let network = descriptor
            .attr_path(&["transport", "type"])
            .and_then(serde_json::Value::as_str)
            .unwrap_or(DEFAULT_NETWORK);
        debug!(
            target: "sb_link::vmess",
            tag = %descriptor.display_name,
            server = %descriptor.server_address,
            port = descriptor.server_port,
            transport = network,
            tls = descriptor.attr("tls").is_some(),
            "decoded vmess link"
        );
        Ok(descriptor)
    }
}

impl<D: PayloadDecoder> LinkParser for VmessParser<D> {
    fn protocol(&self) -> &'static str {
        PROTOCOL
    }

    fn scheme(&self) -> &'static str {
        SCHEME
    }

    fn parse(&self, link: &str) -> Result<ConnectionDescriptor, LinkError> {
        self.decode(link)
    }
}

/// Decode with the default base64 decoder.
pub fn decode(link: &str) -> Result<ConnectionDescriptor, LinkError> {
    VmessParser::new().decode(link)
}

fn build(p: VmessPayload, fragment_name: String) -> ConnectionDescriptor {
    let port = coerce_u16(p.port.as_ref());
    let alter_id = coerce_u32(p.aid.as_ref());

    let display_name = if !fragment_name.is_empty() {
        fragment_name
    } else if !p.ps.is_empty() {
        p.ps.clone()
    } else {
        format!("{}:{}", p.add, port)
    };

    let mut extra = Attributes::new();
    extra.insert("uuid".into(), json!(p.id));
    extra.insert("alter_id".into(), json!(alter_id));
    let security = if p.scy.is_empty() {
        DEFAULT_SECURITY
    } else {
        p.scy.as_str()
    };
    extra.insert("security".into(), json!(security));

    if let Some(transport) = transport(&p) {
        extra.insert("transport".into(), Value::Object(transport));
    }
    if let Some(tls) = tls(&p) {
        extra.insert("tls".into(), Value::Object(tls));
    }

    ConnectionDescriptor {
        display_name,
        protocol_kind: PROTOCOL.to_string(),
        server_address: p.add,
        server_port: port,
        attributes: extra,
    }
}

/// Transport block, omitted for plain TCP unless HTTP camouflage is set.
fn transport(p: &VmessPayload) -> Option<Map<String, Value>> {
    let network = if p.net.is_empty() {
        DEFAULT_NETWORK
    } else {
        p.net.as_str()
    };
    if network == DEFAULT_NETWORK && p.header_type != "http" {
        return None;
    }

    let mut t = Map::new();
    t.insert("type".into(), json!(network));
    match network {
        "ws" => {
            if !p.path.is_empty() {
                t.insert("path".into(), json!(p.path));
            }
            if !p.host.is_empty() {
                t.insert("headers".into(), json!({ "Host": p.host }));
            }
        }
        "http" | "h2" => {
            if !p.path.is_empty() {
                t.insert("path".into(), json!(p.path));
            }
            if !p.host.is_empty() {
                t.insert("host".into(), json!(split_list(&p.host)));
            }
        }
        "grpc" => {
            // service name travels in the path slot
            if !p.path.is_empty() {
                t.insert("service_name".into(), json!(p.path));
            }
        }
        "quic" => {
            if !p.header_type.is_empty() {
                t.insert("security".into(), json!(p.header_type));
            }
        }
        _ => {}
    }
    Some(t)
}

/// TLS block, only for a literal `tls` flag (`reality` and others get none).
fn tls(p: &VmessPayload) -> Option<Map<String, Value>> {
    if p.tls != "tls" {
        return None;
    }

    let server_name = [&p.sni, &p.host, &p.add]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(&p.add);

    let mut t = Map::new();
    t.insert("enabled".into(), json!(true));
    t.insert("server_name".into(), json!(server_name));
    if p.skip_cert_verify {
        t.insert("insecure".into(), json!(true));
    }
    if !p.fp.is_empty() {
        t.insert("utls".into(), json!({ "enabled": true, "fingerprint": p.fp }));
    }
    if !p.alpn.is_empty() {
        t.insert("alpn".into(), json!(split_list(&p.alpn)));
    }
    Some(t)
}

fn split_list(s: &str) -> Vec<&str> {
    s.split(',').collect()
}
