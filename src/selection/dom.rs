use super::{apply_format, FormatCommand, FormatError, SelectionHost, SelectionManager};
use crate::toolbar::{toolbar_position, Point, Rect};
use leptos::logging::warn;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn live_selection() -> Option<web_sys::Selection> {
    web_sys::window()?.get_selection().ok().flatten()
}

pub(crate) fn page_scroll() -> Point {
    let Some(w) = web_sys::window() else {
        return Point::default();
    };
    Point {
        x: w.scroll_x().unwrap_or(0.0),
        y: w.scroll_y().unwrap_or(0.0),
    }
}

/// `window.getSelection()` plus `document.execCommand`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DomSelectionHost;

impl SelectionHost for DomSelectionHost {
    type Range = web_sys::Range;

    fn capture(&self) -> Option<web_sys::Range> {
        let sel = live_selection()?;
        if sel.range_count() == 0 || sel.is_collapsed() {
            return None;
        }
        // Ranges are live objects; keep a copy so later edits don't move ours.
        sel.get_range_at(0).ok().map(|r| r.clone_range())
    }

    fn select(&self, range: &web_sys::Range) {
        if let Some(sel) = live_selection() {
            let _ = sel.remove_all_ranges();
            let _ = sel.add_range(range);
        }
    }

    fn exec(&self, command: &FormatCommand) -> bool {
        let Some(doc) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        else {
            return false;
        };

        doc.exec_command_with_show_ui_and_value(command.command_name(), false, command.value())
            .unwrap_or(false)
    }

    fn refocus(&self, range: &web_sys::Range) {
        let Ok(node) = range.common_ancestor_container() else {
            return;
        };
        let element = if node.node_type() == web_sys::Node::ELEMENT_NODE {
            node.dyn_into::<web_sys::Element>().ok()
        } else {
            node.parent_element()
        };

        let editable = element
            .and_then(|el| el.closest("[contenteditable]").ok().flatten())
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(editable) = editable {
            let _ = editable.focus();
        }
    }

    fn bounds(&self, range: &web_sys::Range) -> Rect {
        let r = range.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn text(&self, range: &web_sys::Range) -> String {
        String::from(range.to_string())
    }
}

/// Reactive handle on one editor's selection.
///
/// Owned by the block editor and handed to the toolbar, color picker and link dialog
/// through context. Every event goes through the [`SelectionManager`]; the signals here
/// only mirror its saved range for rendering. The manager is never borrowed across a DOM
/// call, since `focus()` and `execCommand` dispatch events synchronously.
#[derive(Clone, Copy)]
pub(crate) struct SelectionController {
    manager: StoredValue<SelectionManager<web_sys::Range>, LocalStorage>,

    /// Page coordinates of the toolbar; `None` while it is hidden.
    toolbar_at: RwSignal<Option<Point>>,

    /// Viewport rectangle of the saved selection.
    selection_rect: RwSignal<Option<Rect>>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            manager: StoredValue::new_local(SelectionManager::new()),
            toolbar_at: RwSignal::new(None),
            selection_rect: RwSignal::new(None),
        }
    }

    fn saved_range(&self) -> Option<web_sys::Range> {
        self.manager.with_value(|m| m.saved().cloned())
    }

    fn sync(&self) {
        let rect = self.saved_range().map(|r| DomSelectionHost.bounds(&r));
        let scroll = page_scroll();

        self.selection_rect.set(rect);
        self.toolbar_at
            .set(rect.map(|r| toolbar_position(&r, scroll)));
    }

    pub fn on_pointer_up(&self) {
        let live = DomSelectionHost.capture();
        self.manager.update_value(|m| {
            m.on_pointer_up(live);
        });
        self.sync();
    }

    pub fn on_key_up(&self) {
        let live = DomSelectionHost.capture();
        self.manager.update_value(|m| {
            m.on_key_up(live);
        });
        self.sync();
    }

    pub fn on_focus(&self) {
        let live = DomSelectionHost.capture();
        self.manager.update_value(|m| {
            m.on_focus(live);
        });
        self.sync();
    }

    pub fn on_blur(&self) {
        let live = DomSelectionHost.capture();
        self.manager.update_value(|m| m.on_blur(live));
        self.sync();
    }

    pub fn dismiss(&self) {
        if self.manager.with_value(|m| m.is_toolbar_visible()) {
            self.manager.update_value(|m| m.dismiss());
            self.sync();
        }
    }

    pub fn apply(&self, command: FormatCommand) -> Result<(), FormatError> {
        let result = apply_format(
            &DomSelectionHost,
            &command,
            || self.manager.with_value(|m| m.target()),
            |live| self.manager.update_value(|m| m.after_apply(live)),
        );
        if let Err(e) = &result {
            warn!("{} failed: {e}", command.command_name());
        }
        self.sync();
        result
    }

    pub fn selected_text(&self) -> String {
        self.saved_range()
            .map(|r| DomSelectionHost.text(&r))
            .unwrap_or_default()
    }

    pub fn is_visible(&self) -> bool {
        self.toolbar_at.with(|p| p.is_some())
    }

    pub fn toolbar_at(&self) -> Option<Point> {
        self.toolbar_at.get()
    }

    pub fn selection_rect(&self) -> Option<Rect> {
        self.selection_rect.get_untracked()
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}
