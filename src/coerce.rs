//! Identifier coercion: raw path segments to typed keys.
//!
//! Numeric segments never fail. A segment that is not a base-10 integer
//! becomes `0`; a well-formed integer outside the target range saturates at
//! the nearest bound. Handlers rely on this so that an unsubstituted URI
//! template placeholder (`{x}`) still resolves to a resource. Every numeric
//! path parameter goes through [`numeric`], which keeps the policy in one
//! place.

use log::debug;
use serde::{Deserialize, Deserializer};

/// Integer widths used in the URI space.
pub trait SegmentInt: Copy + Default {
    /// Lowest value of the type, widened.
    const LOW: i64;
    /// Highest value of the type, widened.
    const HIGH: i64;

    fn from_clamped(value: i64) -> Self;
}

macro_rules! segment_int {
    ($($ty:ty),*) => {
        $(impl SegmentInt for $ty {
            const LOW: i64 = <$ty>::MIN as i64;
            const HIGH: i64 = <$ty>::MAX as i64;

            fn from_clamped(value: i64) -> Self {
                value.clamp(Self::LOW, Self::HIGH) as $ty
            }
        })*
    };
}

segment_int!(i8, i16);

/// Coerce a path segment into an integer of width `T`.
pub fn numeric<T: SegmentInt>(raw: &str) -> T {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        debug!("Path segment '{}' is not numeric, using 0", raw);
        return T::default();
    }

    let negative = raw.starts_with('-');
    let value = raw
        .parse::<i64>()
        .unwrap_or(if negative { i64::MIN } else { i64::MAX });
    if value < T::LOW || value > T::HIGH {
        debug!("Path segment '{}' out of range, saturating", raw);
    }
    T::from_clamped(value)
}

/// Project names pass through untouched; existence is the store's concern.
pub fn project_name(raw: &str) -> &str {
    raw
}

/// `#[serde(deserialize_with = "coerce::lenient")]` adapter for path structs.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: SegmentInt,
{
    let raw = String::deserialize(deserializer)?;
    Ok(numeric(&raw))
}
