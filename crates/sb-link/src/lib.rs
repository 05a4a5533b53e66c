//! Share-link decoders for proxy subscriptions.
//! 订阅分享链接解析。
//!
//! Each adapter turns one link format into a [`ConnectionDescriptor`], the
//! shape shared by every adapter in the family:
//! - `vmess` (`vmess://BASE64(json)#name`) - requires the `vmess` feature
//!
//! Dispatching a link to the right adapter by scheme is left to the caller;
//! adapters only expose [`LinkParser::scheme`] for that purpose.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod codec;
pub mod loose;
pub mod model;
pub mod uri;

#[cfg(feature = "vmess")]
pub mod vmess;

pub use codec::{DecodeFailure, LenientBase64, PayloadDecoder};
pub use model::{Attributes, ConnectionDescriptor, LinkError};

#[cfg(feature = "vmess")]
pub use vmess::VmessParser;

/// A format-specific share-link adapter.
pub trait LinkParser: Send + Sync {
    /// Protocol tag written to [`ConnectionDescriptor::protocol_kind`].
    fn protocol(&self) -> &'static str;

    /// URI prefix claimed by this adapter, e.g. `vmess://`.
    fn scheme(&self) -> &'static str;

    /// Decode one link into a descriptor.
    fn parse(&self, link: &str) -> Result<ConnectionDescriptor, LinkError>;
}
