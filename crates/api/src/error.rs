//! Shardcast error types.

use std::sync::Arc;

/// A clonable trait-object inner error.
#[derive(Clone, Default)]
pub struct DynInnerError(
    pub Option<Arc<dyn std::error::Error + 'static + Send + Sync>>,
);

impl std::fmt::Debug for DynInnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for DynInnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.as_ref() {
            None => f.write_str("None"),
            Some(s) => s.fmt(f),
        }
    }
}

impl std::error::Error for DynInnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.as_ref().map(|s| {
            let out: &(dyn std::error::Error + 'static) = &**s;
            out
        })
    }
}

impl DynInnerError {
    /// Construct a new DynInnerError from a source error.
    pub fn new<E: std::error::Error + 'static + Send + Sync>(e: E) -> Self {
        Self(Some(Arc::new(e)))
    }
}

/// The shardcast error type, used by every collaborator trait and by the
/// request sender itself.
///
/// The type is `Clone` so results can be fanned out to several callers
/// without re-running the failed operation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ShardcastError {
    /// A construction argument or configuration value was rejected.
    #[error("invalid value for {field}: {reason}")]
    InvalidArgument {
        /// The offending field.
        field: Arc<str>,

        /// Why the value was rejected.
        reason: Arc<str>,
    },

    /// A request could not be encoded.
    #[error("serialization error: {ctx} (src: {src})")]
    Serialization {
        /// Any context associated with this error.
        ctx: Arc<str>,

        /// The inner error (if any).
        #[source]
        src: DynInnerError,
    },

    /// Not a single peer accepted the request.
    #[error(
        "send request failed, topic: {topic}, crossPeers: {cross_peers}, intraPeers: {intra_peers}, fullHistoryPeers: {full_history_peers}"
    )]
    SendRequest {
        /// The topic the request was meant for.
        topic: Arc<str>,

        /// Number of cross shard candidates considered.
        cross_peers: usize,

        /// Number of intra shard candidates considered.
        intra_peers: usize,

        /// Number of full history candidates considered.
        full_history_peers: usize,
    },

    /// Generic shardcast internal error.
    #[error("{ctx} (src: {src})")]
    Other {
        /// Any context associated with this error.
        ctx: Arc<str>,

        /// The inner error (if any).
        #[source]
        src: DynInnerError,
    },
}

impl ShardcastError {
    /// Construct an "invalid argument" error naming the offending field.
    pub fn invalid_argument<F: std::fmt::Display, R: std::fmt::Display>(
        field: F,
        reason: R,
    ) -> Self {
        Self::InvalidArgument {
            field: field.to_string().into_boxed_str().into(),
            reason: reason.to_string().into_boxed_str().into(),
        }
    }

    /// Construct a serialization error with an inner source error.
    pub fn serialization_src<
        C: std::fmt::Display,
        S: std::error::Error + 'static + Send + Sync,
    >(
        ctx: C,
        src: S,
    ) -> Self {
        Self::Serialization {
            ctx: ctx.to_string().into_boxed_str().into(),
            src: DynInnerError::new(src),
        }
    }

    /// Construct a serialization error.
    pub fn serialization<C: std::fmt::Display>(ctx: C) -> Self {
        Self::Serialization {
            ctx: ctx.to_string().into_boxed_str().into(),
            src: DynInnerError::default(),
        }
    }

    /// Construct an "other" error with an inner source error.
    pub fn other_src<
        C: std::fmt::Display,
        S: std::error::Error + 'static + Send + Sync,
    >(
        ctx: C,
        src: S,
    ) -> Self {
        Self::Other {
            ctx: ctx.to_string().into_boxed_str().into(),
            src: DynInnerError::new(src),
        }
    }

    /// Construct an "other" error.
    pub fn other<C: std::fmt::Display>(ctx: C) -> Self {
        Self::Other {
            ctx: ctx.to_string().into_boxed_str().into(),
            src: DynInnerError::default(),
        }
    }
}

/// The shardcast result type.
pub type ShardcastResult<T> = Result<T, ShardcastError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            "bla (src: None)",
            ShardcastError::other("bla").to_string().as_str(),
        );
        assert_eq!(
            "foo (src: bar)",
            ShardcastError::other_src("foo", std::io::Error::other("bar"))
                .to_string()
                .as_str(),
        );
        assert_eq!(
            "invalid value for topic_name: should not be empty",
            ShardcastError::invalid_argument(
                "topic_name",
                "should not be empty"
            )
            .to_string()
            .as_str(),
        );
        assert_eq!(
            "serialization error: encode (src: None)",
            ShardcastError::serialization("encode").to_string().as_str(),
        );
    }

    #[test]
    fn send_request_display_names_topic_and_sizes() {
        let err = ShardcastError::SendRequest {
            topic: "tx".into(),
            cross_peers: 4,
            intra_peers: 0,
            full_history_peers: 0,
        };
        assert_eq!(
            "send request failed, topic: tx, crossPeers: 4, intraPeers: 0, fullHistoryPeers: 0",
            err.to_string().as_str(),
        );
    }

    #[test]
    fn error_debug() {
        assert_eq!(
            "Other { ctx: \"bla\", src: None }",
            format!("{:?}", ShardcastError::other("bla")).as_str(),
        );
    }

    #[test]
    fn ensure_error_type_is_send_and_sync() {
        fn ensure<T: std::fmt::Display + Send + Sync>(_t: T) {}
        ensure(ShardcastError::other("bla"));
    }
}
