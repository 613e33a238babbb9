use chrono::{DateTime, Utc};

use crate::constants::{CENTER_MAX, CENTER_MIN, DEFAULT_CENTER, DEFAULT_SCALE};
use crate::types::clamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placement of the bleed area on the background photo.
///
/// Only ever produced by [`constrain`], so every field is in range. Stored
/// records are read through [`MappingPatch`] and repaired on the way in; the
/// scale is only forced positive there, since the configured limits are
/// applied by whoever holds the options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", from = "MappingPatch")
)]
pub struct BackgroundMapping {
    pub enabled: bool,
    /// Horizontal center, percent of the background display width
    pub center_x: f64,
    /// Vertical center, percent of the background display height
    pub center_y: f64,
    pub scale: f64,
    pub applied_at: Option<DateTime<Utc>>,
    /// Save counter; 0 until the mapping is first saved
    pub version: u32,
}

impl Default for BackgroundMapping {
    fn default() -> Self {
        Self {
            enabled: true,
            center_x: DEFAULT_CENTER,
            center_y: DEFAULT_CENTER,
            scale: DEFAULT_SCALE,
            applied_at: None,
            version: 0,
        }
    }
}

impl BackgroundMapping {
    /// Re-run [`constrain`] on an existing record
    pub fn constrained(&self, min_scale: f64, max_scale: f64) -> Self {
        constrain(MappingPatch::from(self.clone()), min_scale, max_scale)
    }

    /// The record to persist: version bumped, stamped with `now`.
    ///
    /// Conflicts with a newer server-side version are the persistence
    /// layer's concern.
    pub fn next_revision(&self, now: DateTime<Utc>) -> Self {
        Self {
            applied_at: Some(now),
            version: self.version.saturating_add(1),
            ..self.clone()
        }
    }
}

/// A possibly incomplete or malformed mapping, as received from an editor, a
/// partial update or a stored record. Values of the wrong type deserialize as
/// absent.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct MappingPatch {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::flag"))]
    pub enabled: Option<bool>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::number"))]
    pub center_x: Option<f64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::number"))]
    pub center_y: Option<f64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::number"))]
    pub scale: Option<f64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::timestamp"))]
    pub applied_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::count"))]
    pub version: Option<u32>,
}

impl From<MappingPatch> for BackgroundMapping {
    fn from(patch: MappingPatch) -> Self {
        constrain(patch, f64::MIN_POSITIVE, f64::MAX)
    }
}

impl From<BackgroundMapping> for MappingPatch {
    fn from(mapping: BackgroundMapping) -> Self {
        Self {
            enabled: Some(mapping.enabled),
            center_x: Some(mapping.center_x),
            center_y: Some(mapping.center_y),
            scale: Some(mapping.scale),
            applied_at: mapping.applied_at,
            version: Some(mapping.version),
        }
    }
}

impl MappingPatch {
    /// Overlay the fields present in `self` onto `base`
    pub fn over(self, base: &BackgroundMapping) -> MappingPatch {
        MappingPatch {
            enabled: self.enabled.or(Some(base.enabled)),
            center_x: self.center_x.or(Some(base.center_x)),
            center_y: self.center_y.or(Some(base.center_y)),
            scale: self.scale.or(Some(base.scale)),
            applied_at: self.applied_at.or(base.applied_at),
            version: self.version.or(Some(base.version)),
        }
    }
}

/// Fill defaults and clamp a mapping into its legal ranges.
///
/// Total: missing or non-finite values take their defaults (center 50/50,
/// scale 1, enabled), centers are clamped into `[0, 100]` and scale into
/// `[min_scale, max_scale]`. Never panics, even with inverted or NaN bounds,
/// and `constrain(constrain(m)) == constrain(m)`.
pub fn constrain(patch: MappingPatch, min_scale: f64, max_scale: f64) -> BackgroundMapping {
    let center_x = finite_or(patch.center_x, DEFAULT_CENTER);
    let center_y = finite_or(patch.center_y, DEFAULT_CENTER);
    let scale = finite_or(patch.scale, DEFAULT_SCALE);

    let constrained = BackgroundMapping {
        enabled: patch.enabled.unwrap_or(true),
        center_x: clamp(center_x, CENTER_MIN, CENTER_MAX),
        center_y: clamp(center_y, CENTER_MIN, CENTER_MAX),
        scale: clamp(scale, min_scale, max_scale),
        applied_at: patch.applied_at,
        version: patch.version.unwrap_or(0),
    };

    if constrained.center_x != center_x
        || constrained.center_y != center_y
        || constrained.scale != scale
    {
        log::debug!(
            "Constrained mapping ({}, {}, x{}) to ({}, {}, x{})",
            center_x,
            center_y,
            scale,
            constrained.center_x,
            constrained.center_y,
            constrained.scale
        );
    }

    constrained
}

fn finite_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

#[cfg(feature = "serde")]
mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accept numbers and numeric strings; anything else reads as absent
    pub fn number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(as_number(&Value::deserialize(deserializer)?))
    }

    /// Whole non-negative numbers, including `1.0` and `"1"`
    pub fn count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let count = as_number(&Value::deserialize(deserializer)?)
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
            .map(|v| v as u32);
        Ok(count)
    }

    pub fn flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => s.trim().parse::<bool>().ok(),
            _ => None,
        })
    }

    /// RFC 3339 strings; anything unparseable reads as never applied
    pub fn timestamp<'de, D>(
        deserializer: D,
    ) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s.trim().parse::<DateTime<Utc>>().ok(),
            _ => None,
        })
    }

    fn as_number(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_bounds_do_not_panic() {
        let mapping = constrain(
            MappingPatch {
                scale: Some(2.0),
                ..Default::default()
            },
            5.0,
            0.1,
        );
        assert!(mapping.scale.is_finite());
    }

    #[test]
    fn nan_fields_take_defaults() {
        let mapping = constrain(
            MappingPatch {
                center_x: Some(f64::NAN),
                scale: Some(f64::INFINITY),
                ..Default::default()
            },
            0.1,
            5.0,
        );
        assert_eq!(mapping.center_x, 50.0);
        assert_eq!(mapping.scale, 1.0);
    }
}
