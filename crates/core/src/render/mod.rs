//! Annotation renderers.
//!
//! Two variants share one contract (scan, classify, replace matched
//! spans with pills) and differ in surface: [`editor`] decorates the
//! live editing viewport and steps aside for the cursor, [`reader`]
//! rewrites static rendered output and tracks task completion.

pub mod editor;
pub mod reader;

use datepill_host_api::dom::{Dom, NodeId};

use crate::classify::Bucket;

/// Class carried by every pill element.
pub const PILL_CLASS: &str = "date-pill";
/// Modifier class for pills inside a completed task.
pub const STRIKE_CLASS: &str = "date-pill-strike";

/// Build a pill element: a span classed by bucket, labeled with the
/// relative text, with the original date string as its tooltip.
pub(crate) fn create_pill(
    dom: &mut Dom,
    label: &str,
    bucket: Bucket,
    source: &str,
    struck: bool,
) -> NodeId {
    let span = dom.create_element("span");
    dom.add_class(span, PILL_CLASS);
    dom.add_class(span, &format!("{PILL_CLASS}-{}", bucket.as_str()));
    if struck {
        dom.add_class(span, STRIKE_CLASS);
    }
    dom.set_attr(span, "title", source);
    let text = dom.create_text(label);
    dom.append_child(span, text);
    span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pill_element_shape() {
        let mut dom = Dom::new("div");
        let pill = create_pill(&mut dom, "Today", Bucket::Today, "2024-06-10", false);

        assert_eq!(dom.tag(pill), Some("span"));
        assert!(dom.has_class(pill, "date-pill"));
        assert!(dom.has_class(pill, "date-pill-today"));
        assert!(!dom.has_class(pill, STRIKE_CLASS));
        assert_eq!(dom.attr(pill, "title"), Some("2024-06-10"));
        assert_eq!(dom.text_content(pill), "Today");
    }

    #[test]
    fn struck_pill_carries_modifier() {
        let mut dom = Dom::new("div");
        let pill = create_pill(&mut dom, "9 Jun", Bucket::Overdue, "2024-06-09", true);
        assert!(dom.has_class(pill, STRIKE_CLASS));
        assert!(dom.has_class(pill, "date-pill-overdue"));
    }
}
