//! The request payload broadcast on request topics.

use crate::{Epoch, ShardcastResult};
use bytes::Bytes;
use std::sync::Arc;

/// Appended to a topic name to obtain the topic requests are sent on.
pub const TOPIC_REQUEST_SUFFIX: &str = "_REQUEST";

/// What [RequestData::value] identifies.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    prost::Enumeration,
    serde::Serialize,
    serde::Deserialize,
)]
#[repr(i32)]
pub enum RequestDataType {
    /// Unset or unknown.
    Invalid = 0,
    /// The value is a single hash.
    HashType = 1,
    /// The value is a marshalled list of hashes.
    HashArrayType = 2,
    /// The value is a nonce.
    NonceType = 3,
    /// The value is an epoch.
    EpochType = 4,
    /// The value is a hash and the request targets one chunk of it.
    ChunkType = 5,
}

/// A data retrieval request.
///
/// This is a protobuf message as well as a serde type so it can be handed
/// to either of the provided marshallers.
#[derive(Clone, PartialEq, prost::Message, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    /// What the value identifies. See [RequestDataType].
    #[prost(enumeration = "RequestDataType", tag = "1")]
    pub request_type: i32,

    /// The requested key (hash, nonce, ...).
    #[prost(bytes = "bytes", tag = "2")]
    #[serde(with = "crate::serde_bytes_base64")]
    pub value: Bytes,

    /// The chunk index for chunked requests.
    #[prost(uint32, tag = "3")]
    pub chunk_index: u32,

    /// The epoch of the requested data.
    #[prost(uint32, tag = "4")]
    pub epoch: Epoch,
}

impl RequestData {
    /// Construct a request for `value` at `epoch`.
    pub fn new(request_type: RequestDataType, value: Bytes, epoch: Epoch) -> Self {
        Self {
            request_type: request_type.into(),
            value,
            chunk_index: 0,
            epoch,
        }
    }
}

/// Encodes requests into the bytes put on the wire.
#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait RequestMarshaller: 'static + Send + Sync + std::fmt::Debug {
    /// Encode a request.
    fn marshal(&self, request: &RequestData) -> ShardcastResult<Bytes>;

    /// Decode a request.
    fn unmarshal(&self, data: &[u8]) -> ShardcastResult<RequestData>;
}

/// Trait-object [RequestMarshaller].
pub type DynRequestMarshaller = Arc<dyn RequestMarshaller>;

#[cfg(test)]
mod test {
    use super::*;
    use prost::Message;

    #[test]
    fn request_type_accessor() {
        let request = RequestData::new(
            RequestDataType::NonceType,
            Bytes::from_static(b"42"),
            7,
        );
        assert_eq!(RequestDataType::NonceType, request.request_type());
        assert_eq!(7, request.epoch);
    }

    #[test]
    fn unknown_request_type_decodes_as_default() {
        let request = RequestData {
            request_type: 99,
            ..Default::default()
        };
        let dec = RequestData::decode(request.encode_to_vec().as_slice())
            .unwrap();
        assert_eq!(RequestDataType::Invalid, dec.request_type());
    }
}
