#![deny(missing_docs)]
//! Shardcast API contains the collaborator traits and the basic types
//! required to dispatch data retrieval requests in a sharded p2p network.
//!
//! If you want a working request sender, please see the shardcast_core
//! crate.

pub(crate) mod serde_bytes_base64 {
    pub fn serialize<S>(
        b: &bytes::Bytes,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use base64::prelude::*;
        serializer.serialize_str(&BASE64_URL_SAFE_NO_PAD.encode(b))
    }

    pub fn deserialize<'de, D, T: From<bytes::Bytes>>(
        deserializer: D,
    ) -> Result<T, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use base64::prelude::*;
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        BASE64_URL_SAFE_NO_PAD
            .decode(s.as_bytes())
            .map(|v| bytes::Bytes::from(v).into())
            .map_err(serde::de::Error::custom)
    }
}

pub mod builder;
pub mod config;

mod error;
pub use error::*;

pub mod id;
pub use id::{Epoch, PeerCategory, PeerId, ShardId, METACHAIN_SHARD_ID};

mod messenger;
pub use messenger::*;

mod peers;
pub use peers::*;

mod random;
pub use random::*;

mod request;
pub use request::*;

pub mod sender;
pub use sender::*;
