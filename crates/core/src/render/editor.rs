//! Editing-surface renderer.
//!
//! Rebuilds replace decorations over the visible ranges whenever the
//! document, viewport, or selection changes. A token whose span holds
//! the cursor is left as raw text so the user can edit it in place;
//! the same text renders differently depending on where the cursor
//! sits, and that is the point.

use chrono::NaiveDateTime;

use datepill_host_api::dom::{Dom, NodeId};
use datepill_host_api::{DecorationSet, EditorView, ViewAugmentation, ViewChange};

use crate::classify::{classify, Bucket};
use crate::render::create_pill;
use crate::scanner::scan;

/// Inline replacement widget for one date token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PillWidget {
    pub label: String,
    pub bucket: Bucket,
    /// The date string as written, surfaced as the pill tooltip.
    pub source: String,
}

impl PillWidget {
    /// Materialize the widget as a host element.
    pub fn to_element(&self, dom: &mut Dom) -> NodeId {
        create_pill(dom, &self.label, self.bucket, &self.source, false)
    }
}

/// The view augmentation the host registers over its editing surface.
#[derive(Debug)]
pub struct DateHighlighter {
    decorations: DecorationSet<PillWidget>,
}

impl DateHighlighter {
    fn build(view: &dyn EditorView, now: NaiveDateTime) -> DecorationSet<PillWidget> {
        let cursor = view.cursor();
        let mut builder = DecorationSet::builder();

        for range in view.visible_ranges() {
            let base = range.start;
            let text = view.slice(range);
            for token in scan(&text) {
                let start = base + token.start;
                let end = base + token.end;

                // Cursor anywhere on the token, edges included, keeps
                // it editable as raw text.
                if cursor >= start && cursor <= end {
                    continue;
                }
                let Some(class) = classify(token.date, token.time, now) else {
                    continue;
                };
                builder.add(
                    start,
                    end,
                    PillWidget {
                        label: class.label,
                        bucket: class.bucket,
                        source: token.source(),
                    },
                );
            }
        }

        let set = builder.finish();
        tracing::trace!(count = set.len(), "rebuilt date decorations");
        set
    }
}

impl ViewAugmentation for DateHighlighter {
    type Widget = PillWidget;

    fn from_view(view: &dyn EditorView, now: NaiveDateTime) -> Self {
        Self {
            decorations: Self::build(view, now),
        }
    }

    fn update(&mut self, change: &ViewChange, view: &dyn EditorView, now: NaiveDateTime) {
        if change.needs_rebuild() {
            self.decorations = Self::build(view, now);
        }
    }

    fn decorations(&self) -> &DecorationSet<PillWidget> {
        &self.decorations
    }
}
