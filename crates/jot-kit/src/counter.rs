use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A running count with the time of its last change.
///
/// Serializes as `{"count": 7, "updatedAt": "2024-05-01T09:30:00Z"}`.
/// Deserialization is lenient: an absent or malformed `count` degrades to
/// `0` and a malformed `updatedAt` to none, so a corrupt persisted document
/// resets the counter instead of failing a load.
///
/// The count is signed — decrementing past zero is allowed, matching a
/// counter that tracks net votes rather than occurrences.
///
/// # Example
///
/// ```
/// use jot_kit::Counter;
///
/// let mut counter = Counter::new();
/// counter.increment();
/// counter.increment();
/// counter.decrement();
/// assert_eq!(counter.value(), 1);
/// assert!(counter.updated_at().is_some());
///
/// counter.reset();
/// assert_eq!(counter.value(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    #[serde(default, deserialize_with = "count_or_zero")]
    count: i64,
    #[serde(
        default,
        deserialize_with = "timestamp_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    updated_at: Option<DateTime<Utc>>,
}

impl Counter {
    /// A counter at zero that has never been touched.
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: 0,
            updated_at: None,
        }
    }

    /// Current count.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.count
    }

    /// When the counter last changed, if it ever has.
    #[must_use]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Increase the count by 1 and return the new value.
    pub fn increment(&mut self) -> i64 {
        self.count += 1;
        self.touch();
        self.count
    }

    /// Decrease the count by 1 and return the new value.
    pub fn decrement(&mut self) -> i64 {
        self.count -= 1;
        self.touch();
        self.count
    }

    /// Set the count back to 0.
    pub fn reset(&mut self) {
        self.count = 0;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

fn count_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Count(i64),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Count(count) => count,
        Raw::Other(_) => 0,
    })
}

fn timestamp_or_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Timestamp(DateTime<Utc>),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Timestamp(ts) => Some(ts),
        Raw::Other(_) => None,
    })
}
