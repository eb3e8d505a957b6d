//! Pill presentation: per-bucket colors published as style properties.
//!
//! Colors are process-wide presentation state with a lifecycle tied to
//! plugin activation: applied through the host's [`StyleSink`] on load
//! and after every settings save, removed again on unload.

use serde::{Deserialize, Serialize};

use datepill_host_api::StyleSink;

use crate::classify::Bucket;

/// Style property carrying the universal pill text color.
pub const TEXT_PROPERTY: &str = "--date-pill-text";

/// Style property carrying a bucket's pill background color.
#[must_use]
pub fn bucket_property(bucket: Bucket) -> String {
    format!("--date-pill-{}", bucket.as_str())
}

/// User-configurable pill color per temporal bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PillColors {
    pub overdue: String,
    pub today: String,
    pub tomorrow: String,
    pub this_week: String,
    pub future: String,
}

impl PillColors {
    pub const DEFAULT_OVERDUE: &'static str = "#d1453b";
    pub const DEFAULT_TODAY: &'static str = "#058527";
    pub const DEFAULT_TOMORROW: &'static str = "#ad6200";
    pub const DEFAULT_THIS_WEEK: &'static str = "#692ec2";
    pub const DEFAULT_FUTURE: &'static str = "#808080";

    #[must_use]
    pub fn color_for(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Overdue => &self.overdue,
            Bucket::Today => &self.today,
            Bucket::Tomorrow => &self.tomorrow,
            Bucket::ThisWeek => &self.this_week,
            Bucket::Future => &self.future,
        }
    }
}

impl Default for PillColors {
    fn default() -> Self {
        Self {
            overdue: Self::DEFAULT_OVERDUE.to_string(),
            today: Self::DEFAULT_TODAY.to_string(),
            tomorrow: Self::DEFAULT_TOMORROW.to_string(),
            this_week: Self::DEFAULT_THIS_WEEK.to_string(),
            future: Self::DEFAULT_FUTURE.to_string(),
        }
    }
}

/// Publish the palette to the host.
pub fn apply(colors: &PillColors, text_color: &str, sink: &mut dyn StyleSink) {
    for bucket in Bucket::ALL {
        sink.set_property(&bucket_property(bucket), colors.color_for(bucket));
    }
    sink.set_property(TEXT_PROPERTY, text_color);
}

/// Remove every property [`apply`] publishes, so nothing leaks past
/// deactivation.
pub fn clear(sink: &mut dyn StyleSink) {
    for bucket in Bucket::ALL {
        sink.remove_property(&bucket_property(bucket));
    }
    sink.remove_property(TEXT_PROPERTY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepill_host_api::MemoryStyleSink;
    use pretty_assertions::assert_eq;

    #[test]
    fn apply_publishes_all_six_properties() {
        let mut sink = MemoryStyleSink::new();
        apply(&PillColors::default(), "#ffffff", &mut sink);

        assert_eq!(sink.len(), 6);
        assert_eq!(sink.get("--date-pill-overdue"), Some("#d1453b"));
        assert_eq!(sink.get("--date-pill-this-week"), Some("#692ec2"));
        assert_eq!(sink.get("--date-pill-text"), Some("#ffffff"));
    }

    #[test]
    fn clear_removes_everything_applied() {
        let mut sink = MemoryStyleSink::new();
        apply(&PillColors::default(), "#ffffff", &mut sink);
        clear(&mut sink);
        assert!(sink.is_empty());
    }

    #[test]
    fn colors_serialize_camel_case() {
        let json = serde_json::to_value(PillColors::default()).unwrap();
        assert_eq!(json["thisWeek"], "#692ec2");
        assert_eq!(json["overdue"], "#d1453b");
    }
}
