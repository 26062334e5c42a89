//! Roving-focus navigation over an ordered set of focusable items.
//!
//! The navigator owns only the index bookkeeping: exactly one item is the
//! current tab stop, directional keys move it, and the embedding surface
//! applies the returned command (move focus, activate, dismiss). Keeping
//! the state machine free of any UI type makes the wrap/clamp rules and
//! the pointer-resync behavior directly testable.

/// Navigation keys the embedding surface maps real input onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Move to the previous item (arrow up / arrow left).
    Prev,
    /// Move to the next item (arrow down / arrow right).
    Next,
    /// Activate the current item (enter / space).
    Activate,
    /// Dismiss (escape).
    Cancel,
}

/// What the embedding surface should do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusCommand {
    /// Give focus to the item at this index.
    Focus(usize),
    /// Invoke the enter handler for the item at this index, if any.
    Enter(usize),
    /// Invoke the escape handler for the item at this index, if any.
    Escape(usize),
}

/// Navigator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusOptions {
    /// Wrap to the opposite end at a boundary instead of clamping.
    pub wrap: bool,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self { wrap: true }
    }
}

/// Roving-tabindex controller: one active index over `len` ordered items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusNavigator {
    len: usize,
    active: usize,
    wrap: bool,
}

impl FocusNavigator {
    #[must_use]
    pub fn new(len: usize, options: FocusOptions) -> Self {
        Self {
            len,
            active: 0,
            wrap: options.wrap,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the active item, `None` for an empty set.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        (self.len > 0).then_some(self.active)
    }

    /// Whether the item at `index` is the single sequential tab stop.
    #[must_use]
    pub fn tab_stop(&self, index: usize) -> bool {
        self.active() == Some(index)
    }

    /// Handles a navigation key, returning the command to apply.
    ///
    /// Empty sets are inert. Directional keys always yield a `Focus`
    /// command, even when clamping leaves the index unchanged, mirroring
    /// how a focus move is re-asserted on the same element at a clamped
    /// boundary.
    pub fn handle_key(&mut self, key: NavKey) -> Option<FocusCommand> {
        if self.len == 0 {
            return None;
        }

        match key {
            NavKey::Prev => {
                self.active = if self.active > 0 {
                    self.active - 1
                } else if self.wrap {
                    self.len - 1
                } else {
                    0
                };
                Some(FocusCommand::Focus(self.active))
            }
            NavKey::Next => {
                self.active = if self.active < self.len - 1 {
                    self.active + 1
                } else if self.wrap {
                    0
                } else {
                    self.len - 1
                };
                Some(FocusCommand::Focus(self.active))
            }
            NavKey::Activate => Some(FocusCommand::Enter(self.active)),
            NavKey::Cancel => Some(FocusCommand::Escape(self.active)),
        }
    }

    /// Resynchronizes the active index after focus landed on an item some
    /// other way (pointer click, programmatic focus).
    ///
    /// Returns false and changes nothing for an out-of-range index, so
    /// keyboard and pointer interaction can never disagree about which
    /// item is active.
    pub fn sync_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.active = index;
        true
    }

    /// Moves the active index to the first item.
    pub fn focus_first(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.active = 0;
        Some(self.active)
    }

    /// Moves the active index to the last item.
    pub fn focus_last(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.active = self.len - 1;
        Some(self.active)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapping(len: usize) -> FocusNavigator {
        FocusNavigator::new(len, FocusOptions { wrap: true })
    }

    fn clamping(len: usize) -> FocusNavigator {
        FocusNavigator::new(len, FocusOptions { wrap: false })
    }

    #[test]
    fn wraps_at_both_boundaries() {
        let mut nav = wrapping(3);
        assert_eq!(nav.handle_key(NavKey::Prev), Some(FocusCommand::Focus(2)));
        assert_eq!(nav.handle_key(NavKey::Next), Some(FocusCommand::Focus(0)));
    }

    #[test]
    fn clamps_at_both_boundaries() {
        let mut nav = clamping(3);
        assert_eq!(nav.handle_key(NavKey::Prev), Some(FocusCommand::Focus(0)));

        nav.focus_last();
        assert_eq!(nav.handle_key(NavKey::Next), Some(FocusCommand::Focus(2)));
    }

    #[test]
    fn moves_between_items() {
        let mut nav = wrapping(3);
        assert_eq!(nav.handle_key(NavKey::Next), Some(FocusCommand::Focus(1)));
        assert_eq!(nav.handle_key(NavKey::Next), Some(FocusCommand::Focus(2)));
        assert_eq!(nav.handle_key(NavKey::Prev), Some(FocusCommand::Focus(1)));
    }

    #[test]
    fn exactly_one_tab_stop() {
        let mut nav = wrapping(4);
        nav.handle_key(NavKey::Next);

        let stops: Vec<usize> = (0..4).filter(|i| nav.tab_stop(*i)).collect();
        assert_eq!(stops, vec![1]);
    }

    #[test]
    fn activate_and_cancel_report_current_index() {
        let mut nav = wrapping(3);
        nav.handle_key(NavKey::Next);
        assert_eq!(
            nav.handle_key(NavKey::Activate),
            Some(FocusCommand::Enter(1))
        );
        assert_eq!(nav.handle_key(NavKey::Cancel), Some(FocusCommand::Escape(1)));
    }

    #[test]
    fn sync_to_follows_pointer_focus() {
        let mut nav = wrapping(5);
        assert!(nav.sync_to(3));
        assert_eq!(nav.active(), Some(3));
        assert_eq!(nav.handle_key(NavKey::Next), Some(FocusCommand::Focus(4)));
    }

    #[test]
    fn sync_to_rejects_out_of_range() {
        let mut nav = wrapping(2);
        assert!(!nav.sync_to(2));
        assert_eq!(nav.active(), Some(0));
    }

    #[test]
    fn focus_first_and_last_hit_boundaries() {
        let mut nav = wrapping(4);
        assert_eq!(nav.focus_last(), Some(3));
        assert_eq!(nav.active(), Some(3));
        assert_eq!(nav.focus_first(), Some(0));
        assert_eq!(nav.active(), Some(0));
    }

    #[test]
    fn empty_set_is_inert() {
        let mut nav = wrapping(0);
        assert_eq!(nav.active(), None);
        assert_eq!(nav.handle_key(NavKey::Next), None);
        assert_eq!(nav.focus_first(), None);
        assert_eq!(nav.focus_last(), None);
        assert!(!nav.sync_to(0));
    }
}
