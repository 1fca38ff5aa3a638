//! Request marshallers.

use prost::Message;
use shardcast_api::*;
use std::sync::Arc;

/// Encodes requests as protobuf. This is the wire format peers expect.
#[derive(Debug)]
pub struct ProtoMarshaller;

impl ProtoMarshaller {
    /// Construct a new [ProtoMarshaller].
    pub fn create() -> DynRequestMarshaller {
        Arc::new(ProtoMarshaller)
    }
}

impl RequestMarshaller for ProtoMarshaller {
    fn marshal(&self, request: &RequestData) -> ShardcastResult<bytes::Bytes> {
        let mut out = bytes::BytesMut::with_capacity(request.encoded_len());
        request
            .encode(&mut out)
            .map_err(|e| ShardcastError::serialization_src("encode", e))?;
        Ok(out.freeze())
    }

    fn unmarshal(&self, data: &[u8]) -> ShardcastResult<RequestData> {
        RequestData::decode(data)
            .map_err(|e| ShardcastError::serialization_src("decode", e))
    }
}

/// Encodes requests as JSON. Handy when inspecting traffic by hand.
#[derive(Debug)]
pub struct JsonMarshaller;

impl JsonMarshaller {
    /// Construct a new [JsonMarshaller].
    pub fn create() -> DynRequestMarshaller {
        Arc::new(JsonMarshaller)
    }
}

impl RequestMarshaller for JsonMarshaller {
    fn marshal(&self, request: &RequestData) -> ShardcastResult<bytes::Bytes> {
        serde_json::to_vec(request)
            .map(bytes::Bytes::from)
            .map_err(|e| ShardcastError::serialization_src("encode", e))
    }

    fn unmarshal(&self, data: &[u8]) -> ShardcastResult<RequestData> {
        serde_json::from_slice(data)
            .map_err(|e| ShardcastError::serialization_src("decode", e))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn request() -> RequestData {
        RequestData {
            request_type: RequestDataType::ChunkType.into(),
            value: bytes::Bytes::from_static(b"hash"),
            chunk_index: 3,
            epoch: 12,
        }
    }

    #[test]
    fn proto_marshal_unmarshal() {
        let marshaller = ProtoMarshaller;
        let enc = marshaller.marshal(&request()).unwrap();
        assert_eq!(request(), marshaller.unmarshal(&enc).unwrap());
    }

    #[test]
    fn json_uses_camel_case_and_base64() {
        let enc = JsonMarshaller.marshal(&request()).unwrap();
        assert_eq!(
            r#"{"requestType":5,"value":"aGFzaA","chunkIndex":3,"epoch":12}"#,
            std::str::from_utf8(&enc).unwrap(),
        );
        assert_eq!(request(), JsonMarshaller.unmarshal(&enc).unwrap());
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        assert!(matches!(
            JsonMarshaller.unmarshal(b"not json"),
            Err(ShardcastError::Serialization { .. })
        ));
        assert!(matches!(
            ProtoMarshaller.unmarshal(&[0xff, 0xff, 0xff]),
            Err(ShardcastError::Serialization { .. })
        ));
    }
}
