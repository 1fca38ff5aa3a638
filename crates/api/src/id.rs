//! Types dealing with peer and shard identity.

macro_rules! imp_deref {
    ($i:ty, $t:ty) => {
        impl std::ops::Deref for $i {
            type Target = $t;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}

macro_rules! imp_from {
    ($a:ty, $b:ty, $i:ident => $e:expr) => {
        impl From<$b> for $a {
            fn from($i: $b) -> Self {
                $e
            }
        }
    };
}

/// Identifies a shard. The metachain uses [METACHAIN_SHARD_ID].
pub type ShardId = u32;

/// The shard id reserved for the metachain.
pub const METACHAIN_SHARD_ID: ShardId = u32::MAX;

/// A network epoch number.
pub type Epoch = u32;

/// The function signature for PeerId display overrides.
pub type DisplayCb =
    fn(&bytes::Bytes, &mut std::fmt::Formatter<'_>) -> std::fmt::Result;

/// The default display function encodes the id as base64.
fn default_display(
    b: &bytes::Bytes,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    use base64::prelude::*;
    f.write_str(&BASE64_URL_SAFE_NO_PAD.encode(b))
}

static PEER_DISP: std::sync::OnceLock<DisplayCb> = std::sync::OnceLock::new();

/// Identifies a peer on the network.
///
/// These bytes are opaque to shardcast, it only ever compares and hashes
/// them. Display and debug output is the "pretty" base64 form.
#[derive(
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct PeerId(
    #[serde(with = "crate::serde_bytes_base64")] pub bytes::Bytes,
);

imp_deref!(PeerId, bytes::Bytes);
imp_from!(PeerId, bytes::Bytes, b => PeerId(b));
imp_from!(PeerId, &'static str, s => PeerId(bytes::Bytes::from_static(s.as_bytes())));

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        PEER_DISP.get_or_init(|| default_display)(&self.0, f)
    }
}

impl std::fmt::Debug for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        PEER_DISP.get_or_init(|| default_display)(&self.0, f)
    }
}

impl PeerId {
    /// Set the display/debug implementation for PeerId for the duration
    /// of this process. Note, if anything was printed earlier, the
    /// default impl will have been set and cannot be changed.
    /// Returns false if the default was unable to be set.
    pub fn set_global_display_callback(cb: DisplayCb) -> bool {
        PEER_DISP.set(cb).is_ok()
    }
}

/// The category a candidate peer list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeerCategory {
    /// Peers of a shard other than ours.
    CrossShard,

    /// Peers of our own shard.
    IntraShard,

    /// Peers keeping data past the pruning window.
    FullHistory,
}

impl PeerCategory {
    /// The label used in logs and request histograms.
    pub fn label(&self) -> &'static str {
        match self {
            PeerCategory::CrossShard => "cross shard",
            PeerCategory::IntraShard => "intra shard",
            PeerCategory::FullHistory => "full history",
        }
    }
}

impl std::fmt::Display for PeerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn peer_id_display_is_base64() {
        let peer = PeerId::from("peer");
        assert_eq!("cGVlcg", peer.to_string());
        assert_eq!("cGVlcg", format!("{peer:?}"));
    }

    #[test]
    fn peer_id_serde_round_trip() {
        let peer = PeerId::from("peer");
        let enc = serde_json::to_string(&peer).unwrap();
        assert_eq!("\"cGVlcg\"", enc);
        let dec: PeerId = serde_json::from_str(&enc).unwrap();
        assert_eq!(peer, dec);
    }

    #[test]
    fn category_labels() {
        assert_eq!("cross shard", PeerCategory::CrossShard.to_string());
        assert_eq!("intra shard", PeerCategory::IntraShard.label());
        assert_eq!("full history", PeerCategory::FullHistory.label());
    }
}
