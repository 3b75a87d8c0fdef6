// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Enforces a non-empty zone list with unique names.

use nonempty::NonEmpty;
use serde::Deserialize;
use std::collections::HashSet;

use super::ZoneSpec;

pub fn deserialize_zones<'de, D>(deserializer: D) -> Result<NonEmpty<ZoneSpec>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let zones: Vec<ZoneSpec> = Vec::deserialize(deserializer)?;

    let mut seen = HashSet::new();
    for zone in &zones {
        if !seen.insert(zone.name.as_str()) {
            return Err(serde::de::Error::custom(format!(
                "duplicate zone name: {}",
                zone.name
            )));
        }
    }

    NonEmpty::from_vec(zones).ok_or_else(|| serde::de::Error::custom("at least one zone is required"))
}
