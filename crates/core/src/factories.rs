//! Factories and reference implementations of the shardcast modules.

pub mod core_request_sender;
pub use core_request_sender::{CoreRequestSenderFactory, CoreTopicRequestSender};

mod core_epoch_provider;
pub use core_epoch_provider::*;

mod core_marshaller;
pub use core_marshaller::*;

mod core_randomizer;
pub use core_randomizer::*;

mod disabled;
pub use disabled::*;

mod mem_debug_handler;
pub use mem_debug_handler::*;

pub mod mem_messenger;
pub use mem_messenger::MemMessenger;

mod mem_peer_list;
pub use mem_peer_list::*;

mod mem_peers_rating;
pub use mem_peers_rating::*;

mod mem_preferred_peers;
pub use mem_preferred_peers::*;
