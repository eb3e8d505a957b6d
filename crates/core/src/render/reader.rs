//! Rendered-output renderer.
//!
//! Post-processes the host's rendered subtree: every task list item is
//! scanned for date tokens and matched spans become static pill
//! elements. Pills inside a completed task carry a strike modifier,
//! and checkbox toggles trigger a deferred reconciliation pass that
//! re-reads completion state without re-scanning any text.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDateTime;

use datepill_host_api::dom::{Dom, NodeId};
use datepill_host_api::Scheduler;

use crate::classify::classify;
use crate::render::{create_pill, PILL_CLASS, STRIKE_CLASS};
use crate::scanner::scan;

/// Class the host puts on task list items.
pub const TASK_ITEM_CLASS: &str = "task-list-item";
/// Attribute on a task item holding its checkbox state. Empty or a
/// single space means open; anything else means done.
pub const TASK_STATE_ATTR: &str = "data-task";

/// Annotate every task list item in the subtree under `root`.
pub fn annotate_task_items(dom: &mut Dom, root: NodeId, now: NaiveDateTime) {
    let items: Vec<NodeId> = dom
        .descendants(root)
        .into_iter()
        .filter(|&node| is_task_item(dom, node))
        .collect();
    tracing::trace!(items = items.len(), "post-processing rendered output");
    for item in items {
        annotate_item(dom, item, now);
    }
}

/// Replace date tokens in one item's own text with pills.
///
/// Nested list containers are skipped: their items show up in the
/// caller's own iteration, so descending here would process the same
/// text twice.
fn annotate_item(dom: &mut Dom, item: NodeId, now: NaiveDateTime) {
    let struck = is_completed(dom, item);
    let text_nodes =
        dom.collect_text_nodes(item, |dom, child| !is_list_container(dom, child));

    for node in text_nodes {
        let Some(value) = dom.text(node).map(str::to_owned) else {
            continue;
        };
        if scan(&value).next().is_none() {
            continue;
        }

        let mut fragment = Vec::new();
        let mut last = 0;
        for token in scan(&value) {
            if token.start > last {
                fragment.push(dom.create_text(&value[last..token.start]));
            }
            match classify(token.date, token.time, now) {
                Some(class) => fragment.push(create_pill(
                    dom,
                    &class.label,
                    class.bucket,
                    &token.source(),
                    struck,
                )),
                // Lexical match, impossible date: keep the raw text.
                None => fragment.push(dom.create_text(token.text)),
            }
            last = token.end;
        }
        if last < value.len() {
            fragment.push(dom.create_text(&value[last..]));
        }
        dom.replace_with(node, fragment);
    }
}

fn is_task_item(dom: &Dom, node: NodeId) -> bool {
    dom.has_class(node, TASK_ITEM_CLASS)
}

fn is_list_container(dom: &Dom, node: NodeId) -> bool {
    matches!(dom.tag(node), Some("ul" | "ol"))
}

fn is_checkbox(dom: &Dom, node: NodeId) -> bool {
    dom.tag(node) == Some("input") && dom.attr(node, "type") == Some("checkbox")
}

/// Completion is the item's own state attribute. A parent task's state
/// never strikes a child task's pills; a pill with no enclosing task
/// item is never struck.
fn is_completed(dom: &Dom, item: NodeId) -> bool {
    dom.attr(item, TASK_STATE_ATTR)
        .is_some_and(|value| !value.trim().is_empty())
}

/// Nearest enclosing task item, the given node included.
fn enclosing_task_item(dom: &Dom, node: NodeId) -> Option<NodeId> {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if is_task_item(dom, candidate) {
            return Some(candidate);
        }
        current = dom.parent(candidate);
    }
    None
}

/// Checkbox click hook.
///
/// The host applies its own completion-state mutation after this event
/// fires, so the strike refresh is deferred one scheduler turn instead
/// of running inline.
pub fn handle_click(dom: &Rc<RefCell<Dom>>, target: NodeId, scheduler: &dyn Scheduler) {
    let item = {
        let dom = dom.borrow();
        if !is_checkbox(&dom, target) {
            return;
        }
        enclosing_task_item(&dom, target)
    };
    let Some(item) = item else {
        return;
    };

    let dom = Rc::clone(dom);
    scheduler.defer(Box::new(move || {
        refresh_struck_state(&mut dom.borrow_mut(), item);
    }));
}

/// Reconcile strike state for `item` and every nested task item.
///
/// Re-reads completion and toggles the strike class on existing pills;
/// labels, buckets, and surrounding text stay exactly as rendered.
/// Safe to run any number of times with the same outcome.
pub fn refresh_struck_state(dom: &mut Dom, item: NodeId) {
    let pills: Vec<NodeId> = dom
        .descendants(item)
        .into_iter()
        .filter(|&node| dom.has_class(node, PILL_CLASS))
        .collect();

    for pill in pills {
        let struck =
            enclosing_task_item(dom, pill).is_some_and(|owner| is_completed(dom, owner));
        if struck {
            dom.add_class(pill, STRIKE_CLASS);
        } else {
            dom.remove_class(pill, STRIKE_CLASS);
        }
    }
}
