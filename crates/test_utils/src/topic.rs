//! Test tools associated with request topics.

/// A test topic name.
pub const TEST_TOPIC: &str = "test_topic";

/// The request topic of [TEST_TOPIC].
pub const TEST_REQUEST_TOPIC: &str = "test_topic_REQUEST";
