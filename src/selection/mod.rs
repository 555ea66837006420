mod dom;

pub(crate) use dom::{page_scroll, SelectionController};

use crate::toolbar::Rect;
use std::fmt;

/// Inline formatting issued against the saved selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormatCommand {
    Bold,
    Italic,
    Underline,
    /// `#rrggbb`
    ForeColor(String),
    CreateLink(String),
}

impl FormatCommand {
    /// Name understood by `document.execCommand`.
    pub fn command_name(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::ForeColor(_) => "foreColor",
            FormatCommand::CreateLink(_) => "createLink",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            FormatCommand::ForeColor(v) | FormatCommand::CreateLink(v) => v,
            _ => "",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormatError {
    NoSavedSelection,
    CommandRejected,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::NoSavedSelection => write!(f, "no saved selection to format"),
            FormatError::CommandRejected => write!(f, "the browser rejected the formatting command"),
        }
    }
}

/// The browser side of selection handling.
pub(crate) trait SelectionHost {
    type Range: Clone;

    /// The live selection, only when it is non-collapsed.
    fn capture(&self) -> Option<Self::Range>;

    /// Make `range` the live selection again.
    fn select(&self, range: &Self::Range);

    fn exec(&self, command: &FormatCommand) -> bool;

    /// Return focus to the editable region containing `range`.
    fn refocus(&self, range: &Self::Range);

    fn bounds(&self, range: &Self::Range) -> Rect;

    fn text(&self, range: &Self::Range) -> String;
}

/// Keeps the last non-collapsed selection alive while focus wanders to toolbar buttons,
/// color pickers and dialogs.
///
/// The toolbar is visible exactly while a range is saved. Collapse events (pointer-up or
/// key-up with nothing selected) and `dismiss` clear it. Focus may save a range; blur only
/// refreshes one that is still saved.
///
/// Every method takes the live selection as captured by the caller, so the manager never
/// calls into the host itself.
pub(crate) struct SelectionManager<R> {
    saved: Option<R>,
}

impl<R: Clone> Default for SelectionManager<R> {
    fn default() -> Self {
        Self { saved: None }
    }
}

impl<R: Clone> SelectionManager<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Option<&R> {
        self.saved.as_ref()
    }

    pub fn is_toolbar_visible(&self) -> bool {
        self.saved.is_some()
    }

    fn capture_or_clear(&mut self, live: Option<R>) -> bool {
        self.saved = live;
        self.saved.is_some()
    }

    pub fn on_pointer_up(&mut self, live: Option<R>) -> bool {
        self.capture_or_clear(live)
    }

    pub fn on_key_up(&mut self, live: Option<R>) -> bool {
        self.capture_or_clear(live)
    }

    pub fn on_focus(&mut self, live: Option<R>) -> bool {
        if live.is_some() {
            self.saved = live;
        }
        self.saved.is_some()
    }

    /// Blur fires before a toolbar click lands, and also right after an outside click
    /// dismissed the toolbar. Only the first case may touch the saved range.
    pub fn on_blur(&mut self, live: Option<R>) {
        if self.saved.is_none() {
            return;
        }
        if live.is_some() {
            self.saved = live;
        }
    }

    pub fn dismiss(&mut self) {
        self.saved = None;
    }

    /// The range a formatting command should act on.
    pub fn target(&self) -> Result<R, FormatError> {
        self.saved.clone().ok_or(FormatError::NoSavedSelection)
    }

    /// Save the selection a command left behind. If it left nothing selected the old
    /// range stays, so the next toolbar action still has a target.
    pub fn after_apply(&mut self, live: Option<R>) {
        if self.saved.is_some() && live.is_some() {
            self.saved = live;
        }
    }
}

/// Restore the saved range, run `command` on it, refocus and save the resulting selection.
///
/// `read` and `write` are the only places the manager is touched. Neither is held across
/// the host calls: refocusing fires `focus` synchronously, and that handler reaches for the
/// manager again.
pub(crate) fn apply_format<H: SelectionHost>(
    host: &H,
    command: &FormatCommand,
    read: impl FnOnce() -> Result<H::Range, FormatError>,
    write: impl FnOnce(Option<H::Range>),
) -> Result<(), FormatError> {
    let range = read()?;

    host.select(&range);
    let accepted = host.exec(command);
    host.refocus(&range);

    write(host.capture());

    if accepted {
        Ok(())
    } else {
        Err(FormatError::CommandRejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Debug, PartialEq)]
    struct FakeRange {
        start: u32,
        end: u32,
    }

    #[derive(Default)]
    struct FakeHost {
        live: RefCell<Option<FakeRange>>,
        log: RefCell<Vec<String>>,
        reject: bool,
        // Simulates createLink growing the selection.
        grow_on_exec: u32,
        // Runs during refocus, like a synchronously dispatched `focus` handler.
        on_refocus: Option<Box<dyn Fn()>>,
    }

    impl FakeHost {
        fn set_live(&self, start: u32, end: u32) {
            *self.live.borrow_mut() = Some(FakeRange { start, end });
        }

        fn collapse(&self) {
            let mut live = self.live.borrow_mut();
            if let Some(r) = live.as_mut() {
                r.end = r.start;
            }
        }
    }

    impl SelectionHost for FakeHost {
        type Range = FakeRange;

        fn capture(&self) -> Option<FakeRange> {
            self.live.borrow().clone().filter(|r| r.end > r.start)
        }

        fn select(&self, range: &FakeRange) {
            self.log.borrow_mut().push(format!("select {}..{}", range.start, range.end));
            *self.live.borrow_mut() = Some(range.clone());
        }

        fn exec(&self, command: &FormatCommand) -> bool {
            let live = self.live.borrow().clone();
            self.log.borrow_mut().push(format!(
                "exec {} on {:?}",
                command.command_name(),
                live.map(|r| (r.start, r.end))
            ));
            if let Some(r) = self.live.borrow_mut().as_mut() {
                r.end += self.grow_on_exec;
            }
            !self.reject
        }

        fn refocus(&self, _range: &FakeRange) {
            self.log.borrow_mut().push("refocus".to_string());
            if let Some(handler) = &self.on_refocus {
                handler();
            }
        }

        fn bounds(&self, range: &FakeRange) -> Rect {
            Rect::new(range.start as f64, 0.0, (range.end - range.start) as f64, 10.0)
        }

        fn text(&self, range: &FakeRange) -> String {
            "x".repeat((range.end - range.start) as usize)
        }
    }

    fn apply(
        mgr: &RefCell<SelectionManager<FakeRange>>,
        host: &FakeHost,
        command: &FormatCommand,
    ) -> Result<(), FormatError> {
        apply_format(
            host,
            command,
            || mgr.borrow().target(),
            |live| mgr.borrow_mut().after_apply(live),
        )
    }

    #[test]
    fn test_pointer_up_with_selection_shows_toolbar() {
        let host = FakeHost::default();
        let mut mgr = SelectionManager::new();
        host.set_live(2, 7);
        assert!(mgr.on_pointer_up(host.capture()));
        assert!(mgr.is_toolbar_visible());
        assert_eq!(mgr.saved(), Some(&FakeRange { start: 2, end: 7 }));
    }

    #[test]
    fn test_collapse_on_key_up_hides_toolbar() {
        let host = FakeHost::default();
        let mut mgr = SelectionManager::new();
        host.set_live(2, 7);
        mgr.on_key_up(host.capture());
        host.collapse();
        assert!(!mgr.on_key_up(host.capture()));
        assert!(!mgr.is_toolbar_visible());
    }

    #[test]
    fn test_focus_without_selection_keeps_saved_range() {
        let host = FakeHost::default();
        let mut mgr = SelectionManager::new();
        host.set_live(0, 4);
        mgr.on_pointer_up(host.capture());
        host.collapse();
        assert!(mgr.on_focus(host.capture()));
        assert_eq!(mgr.saved(), Some(&FakeRange { start: 0, end: 4 }));
    }

    #[test]
    fn test_blur_keeps_saved_range_when_selection_is_lost() {
        let host = FakeHost::default();
        let mut mgr = SelectionManager::new();
        host.set_live(1, 3);
        mgr.on_pointer_up(host.capture());
        *host.live.borrow_mut() = None;
        mgr.on_blur(host.capture());
        assert!(mgr.is_toolbar_visible());
    }

    #[test]
    fn test_blur_after_dismiss_keeps_toolbar_hidden() {
        let host = FakeHost::default();
        let mut mgr = SelectionManager::new();
        host.set_live(2, 7);
        mgr.on_pointer_up(host.capture());

        // Outside click: the window listener dismisses, then the editor blurs while the
        // old range is still live.
        mgr.dismiss();
        mgr.on_blur(host.capture());

        assert!(!mgr.is_toolbar_visible());
        assert_eq!(mgr.saved(), None);
    }

    #[test]
    fn test_blur_refreshes_a_saved_range() {
        let host = FakeHost::default();
        let mut mgr = SelectionManager::new();
        host.set_live(2, 7);
        mgr.on_pointer_up(host.capture());
        host.set_live(2, 9);
        mgr.on_blur(host.capture());
        assert_eq!(mgr.saved(), Some(&FakeRange { start: 2, end: 9 }));
    }

    #[test]
    fn test_apply_restores_before_exec_after_focus_loss() {
        let host = FakeHost::default();
        let mgr = RefCell::new(SelectionManager::new());
        host.set_live(3, 9);
        mgr.borrow_mut().on_pointer_up(host.capture());

        // Clicking a toolbar button clears the live selection.
        *host.live.borrow_mut() = None;

        assert_eq!(apply(&mgr, &host, &FormatCommand::Bold), Ok(()));
        let log = host.log.borrow();
        assert_eq!(log[0], "select 3..9");
        assert_eq!(log[1], "exec bold on Some((3, 9))");
        assert_eq!(log[2], "refocus");
    }

    #[test]
    fn test_apply_recaptures_changed_bounds() {
        let host = FakeHost {
            grow_on_exec: 2,
            ..Default::default()
        };
        let mgr = RefCell::new(SelectionManager::new());
        host.set_live(0, 5);
        mgr.borrow_mut().on_pointer_up(host.capture());

        apply(&mgr, &host, &FormatCommand::CreateLink("https://a.dev".to_string()))
            .expect("link should apply");
        assert_eq!(mgr.borrow().saved(), Some(&FakeRange { start: 0, end: 7 }));

        *host.live.borrow_mut() = None;
        apply(&mgr, &host, &FormatCommand::Italic).expect("italic should apply");
        assert_eq!(host.log.borrow()[3], "select 0..7");
    }

    #[test]
    fn test_focus_fired_by_refocus_can_reach_the_manager() {
        let mgr = Rc::new(RefCell::new(SelectionManager::new()));
        let live = Rc::new(RefCell::new(None::<FakeRange>));
        let focus_mgr = mgr.clone();
        let focus_live = live.clone();
        let host = FakeHost {
            // A borrow held across refocus would make this `borrow_mut` panic.
            on_refocus: Some(Box::new(move || {
                let captured = focus_live.borrow().clone();
                focus_mgr.borrow_mut().on_focus(captured);
            })),
            ..Default::default()
        };
        host.set_live(1, 6);
        mgr.borrow_mut().on_pointer_up(host.capture());

        // Focus sits in the link dialog, so the live selection is gone.
        *host.live.borrow_mut() = None;
        *live.borrow_mut() = Some(FakeRange { start: 1, end: 6 });

        apply(&mgr, &host, &FormatCommand::CreateLink("https://b.dev".to_string()))
            .expect("link should apply");
        assert_eq!(mgr.borrow().saved(), Some(&FakeRange { start: 1, end: 6 }));
    }

    #[test]
    fn test_apply_without_saved_range_fails() {
        let host = FakeHost::default();
        let mgr: RefCell<SelectionManager<FakeRange>> = RefCell::new(SelectionManager::new());
        host.set_live(0, 3);
        assert_eq!(
            apply(&mgr, &host, &FormatCommand::Underline),
            Err(FormatError::NoSavedSelection)
        );
        assert!(host.log.borrow().is_empty());
        assert!(!mgr.borrow().is_toolbar_visible());
    }

    #[test]
    fn test_rejected_command_keeps_selection() {
        let host = FakeHost {
            reject: true,
            ..Default::default()
        };
        let mgr = RefCell::new(SelectionManager::new());
        host.set_live(4, 6);
        mgr.borrow_mut().on_pointer_up(host.capture());
        assert_eq!(
            apply(&mgr, &host, &FormatCommand::ForeColor("#ff0000".to_string())),
            Err(FormatError::CommandRejected)
        );
        assert!(mgr.borrow().is_toolbar_visible());
    }

    #[test]
    fn test_dismiss_hides_toolbar() {
        let host = FakeHost::default();
        let mut mgr = SelectionManager::new();
        host.set_live(4, 6);
        mgr.on_pointer_up(host.capture());
        mgr.dismiss();
        assert!(!mgr.is_toolbar_visible());
    }

    #[test]
    fn test_command_names_and_values() {
        assert_eq!(FormatCommand::Bold.command_name(), "bold");
        assert_eq!(FormatCommand::Bold.value(), "");
        let color = FormatCommand::ForeColor("#00ff00".to_string());
        assert_eq!(color.command_name(), "foreColor");
        assert_eq!(color.value(), "#00ff00");
        assert_eq!(
            FormatCommand::CreateLink("https://x.io".to_string()).command_name(),
            "createLink"
        );
    }

    #[test]
    fn test_host_geometry_and_text_for_saved_range() {
        let host = FakeHost::default();
        let mut mgr = SelectionManager::new();
        host.set_live(10, 13);
        mgr.on_pointer_up(host.capture());
        let saved = mgr.saved().expect("range saved");
        assert_eq!(host.bounds(saved).width, 3.0);
        assert_eq!(host.text(saved), "xxx");
    }
}
