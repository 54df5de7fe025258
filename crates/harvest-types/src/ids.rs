//! Location and identifier types.
//!
//! A [`BlockPos`] is the opaque integer coordinate the host world uses to
//! address a single block. A [`ResourceId`] is a `namespace:path` name used
//! to look up crop and fertilizer profiles; it mirrors the way the host game
//! registers blocks and items.

use serde::{Deserialize, Serialize};

/// Namespace assumed when an identifier is written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Namespace owned by this simulation (fertilizer items, data records).
pub const HARVEST_NAMESPACE: &str = "harvest";

/// Integer block coordinate in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// East/west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North/south axis.
    pub z: i32,
}

impl BlockPos {
    /// Create a position from its three coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The block directly beneath this one.
    ///
    /// Crops sit on top of the soil they draw from, so growth hooks look
    /// one block down. Saturates at `i32::MIN`.
    pub const fn below(self) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_sub(1),
            z: self.z,
        }
    }

    /// Offset this position by the given deltas, saturating at the `i32`
    /// bounds.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }
}

impl core::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// A namespaced identifier of the form `namespace:path`.
///
/// Parsing never fails: a string without a colon is placed in
/// [`DEFAULT_NAMESPACE`]. Serialized as its string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ResourceId {
    namespace: String,
    path: String,
}

impl ResourceId {
    /// Create an identifier from explicit parts.
    pub fn new(namespace: &str, path: &str) -> Self {
        Self {
            namespace: namespace.to_owned(),
            path: path.to_owned(),
        }
    }

    /// Parse `namespace:path`, defaulting the namespace when absent.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, raw),
        }
    }

    /// The namespace part.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path part (the name within the namespace).
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl core::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl From<String> for ResourceId {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn below_decrements_y_only() {
        let pos = BlockPos::new(3, 64, -7);
        assert_eq!(pos.below(), BlockPos::new(3, 63, -7));
    }

    #[test]
    fn below_saturates_at_min() {
        let pos = BlockPos::new(0, i32::MIN, 0);
        assert_eq!(pos.below().y, i32::MIN);
    }

    #[test]
    fn offset_applies_all_axes() {
        let pos = BlockPos::new(10, 20, 30).offset(-4, 0, 4);
        assert_eq!(pos, BlockPos::new(6, 20, 34));
    }

    #[test]
    fn parse_with_namespace() {
        let id = ResourceId::parse("harvest:compost_fertilizer");
        assert_eq!(id.namespace(), "harvest");
        assert_eq!(id.path(), "compost_fertilizer");
    }

    #[test]
    fn parse_without_namespace_uses_default() {
        let id = ResourceId::parse("wheat");
        assert_eq!(id.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(id.to_string(), "minecraft:wheat");
    }

    #[test]
    fn resource_id_serializes_as_string() {
        let id = ResourceId::new("minecraft", "carrots");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"minecraft:carrots\"");
        let back: ResourceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
