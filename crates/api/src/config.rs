//! Types for use when configuring shardcast modules.

use crate::*;
use std::sync::Mutex;

/// helper transcode function
fn tc<S: serde::Serialize, D: serde::de::DeserializeOwned>(
    s: &S,
) -> ShardcastResult<D> {
    serde_json::from_str(
        &serde_json::to_string(s)
            .map_err(|e| ShardcastError::other_src("encode", e))?,
    )
    .map_err(|e| ShardcastError::other_src("decode", e))
}

/// Denotes a type used to configure a specific shardcast module.
///
/// A module config is a struct with a single top-level field named after
/// the module, e.g. `{ "coreRequestSender": { ... } }`, so several modules
/// can share one [Config] without clobbering each other.
pub trait ModConfig:
    'static
    + Sized
    + Default
    + std::fmt::Debug
    + serde::Serialize
    + serde::de::DeserializeOwned
    + Send
    + Sync
{
}

impl<T> ModConfig for T where
    T: 'static
        + Sized
        + Default
        + std::fmt::Debug
        + serde::Serialize
        + serde::de::DeserializeOwned
        + Send
        + Sync
{
}

/// Shardcast configuration.
///
/// The node configuration file is loaded into this map. Module factories
/// write their defaults with [Config::set_module_config] and read their
/// parameters back with [Config::get_module_config].
#[derive(Debug, Default)]
pub struct Config(Mutex<serde_json::Map<String, serde_json::Value>>);

impl serde::Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.lock().unwrap().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map: serde_json::Map<String, serde_json::Value> =
            serde::Deserialize::deserialize(deserializer)?;
        Ok(Self(Mutex::new(map)))
    }
}

impl Config {
    /// Merge the top-level properties of a module config into this config.
    /// Existing properties with the same name are overwritten.
    pub fn set_module_config<M: ModConfig>(
        &self,
        module_config: &M,
    ) -> ShardcastResult<()> {
        let map: serde_json::Map<String, serde_json::Value> =
            tc(module_config)?;
        let mut lock = self.0.lock().unwrap();
        for (k, v) in map {
            lock.insert(k, v);
        }
        Ok(())
    }

    /// Extract a module config. Note that this config can be edited by
    /// humans, so module configs should tolerate missing properties by
    /// setting sane defaults. Extraneous properties are ignored.
    pub fn get_module_config<M: ModConfig>(&self) -> ShardcastResult<M> {
        let lock = self.0.lock().unwrap();
        let out: M = tc(&*lock)?;
        Ok(out)
    }
}
