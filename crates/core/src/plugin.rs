//! Plugin lifecycle.
//!
//! Ties the engine to host activation: settings load and style
//! publication on load, persistence on save, explicit style teardown
//! on unload. The rendered-output and click hooks delegate to the
//! reader renderer; the editing surface registers [`DateHighlighter`]
//! directly as its view augmentation.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDateTime;

use datepill_host_api::dom::{Dom, NodeId};
use datepill_host_api::{Scheduler, SettingsStore, StyleSink};

use crate::render::reader;
use crate::settings::{PillSettings, SettingsError};
use crate::style;

/// The plugin object the host holds between activation and
/// deactivation.
#[derive(Debug, Clone)]
pub struct DatePillPlugin {
    pub settings: PillSettings,
}

impl DatePillPlugin {
    /// Activate: load persisted settings and publish the pill palette.
    pub fn load(
        store: &dyn SettingsStore,
        styles: &mut dyn StyleSink,
    ) -> Result<Self, SettingsError> {
        let settings = PillSettings::load(store)?;
        style::apply(&settings.pill_colors, &settings.pill_text_color, styles);
        tracing::debug!("date pill plugin activated");
        Ok(Self { settings })
    }

    /// Persist the current settings and re-publish the palette, so a
    /// color change takes effect immediately.
    pub fn save_settings(
        &self,
        store: &dyn SettingsStore,
        styles: &mut dyn StyleSink,
    ) -> Result<(), SettingsError> {
        self.settings.save(store)?;
        style::apply(
            &self.settings.pill_colors,
            &self.settings.pill_text_color,
            styles,
        );
        Ok(())
    }

    /// Deactivate: remove every published style property so no visual
    /// state survives unload.
    pub fn unload(&self, styles: &mut dyn StyleSink) {
        style::clear(styles);
        tracing::debug!("date pill plugin deactivated");
    }

    /// Rendered-output post-processing hook.
    pub fn post_process(&self, dom: &mut Dom, root: NodeId, now: NaiveDateTime) {
        reader::annotate_task_items(dom, root, now);
    }

    /// Click hook for checkbox toggles in rendered output.
    pub fn handle_click(
        &self,
        dom: &Rc<RefCell<Dom>>,
        target: NodeId,
        scheduler: &dyn Scheduler,
    ) {
        reader::handle_click(dom, target, scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datepill_host_api::{MemorySettingsStore, MemoryStyleSink};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn load_applies_stored_colors() {
        let store = MemorySettingsStore::with_data(json!({
            "pillColors": { "today": "#00ff00" }
        }));
        let mut styles = MemoryStyleSink::new();

        let plugin = DatePillPlugin::load(&store, &mut styles).unwrap();

        assert_eq!(plugin.settings.pill_colors.today, "#00ff00");
        assert_eq!(styles.get("--date-pill-today"), Some("#00ff00"));
        assert_eq!(styles.len(), 6);
    }

    #[test]
    fn unload_clears_published_state() {
        let store = MemorySettingsStore::new();
        let mut styles = MemoryStyleSink::new();
        let plugin = DatePillPlugin::load(&store, &mut styles).unwrap();
        assert_eq!(styles.len(), 6);

        plugin.unload(&mut styles);
        assert!(styles.is_empty());
    }

    #[test]
    fn save_persists_and_reapplies() {
        let store = MemorySettingsStore::new();
        let mut styles = MemoryStyleSink::new();
        let mut plugin = DatePillPlugin::load(&store, &mut styles).unwrap();

        plugin.settings.pill_colors.future = "#101010".to_string();
        plugin.save_settings(&store, &mut styles).unwrap();

        assert_eq!(styles.get("--date-pill-future"), Some("#101010"));
        let reloaded = PillSettings::load(&store).unwrap();
        assert_eq!(reloaded.pill_colors.future, "#101010");
    }

    #[test]
    fn post_process_renders_pills() {
        let store = MemorySettingsStore::new();
        let mut styles = MemoryStyleSink::new();
        let plugin = DatePillPlugin::load(&store, &mut styles).unwrap();

        let mut dom = Dom::new("div");
        let li = dom.create_element("li");
        dom.add_class(li, reader::TASK_ITEM_CLASS);
        dom.set_attr(li, reader::TASK_STATE_ATTR, " ");
        let text = dom.create_text("📅 2024-06-11");
        dom.append_child(li, text);
        let root = dom.root();
        dom.append_child(root, li);

        let now = NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        plugin.post_process(&mut dom, root, now);

        assert_eq!(dom.text_content(li), "Tomorrow");
    }
}
