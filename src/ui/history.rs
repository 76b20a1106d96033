//! Back/forward navigation stacks.
//!
//! The stacks hold saved page snapshots. The page on screen is never in
//! either stack: going back pushes the current snapshot onto the forward
//! stack and pops the previous one off the back stack, and vice versa.

use std::collections::VecDeque;

/// Upper bound on the entries kept in each direction. The oldest entry is
/// dropped when the back stack overflows.
pub const MAX_HISTORY: usize = 100;

#[derive(Debug, Clone)]
pub struct History<T> {
    back: VecDeque<T>,
    forward: VecDeque<T>,
    limit: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_limit(MAX_HISTORY)
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            back: VecDeque::new(),
            forward: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Record the page being left for a fresh navigation. Clears the
    /// forward stack.
    pub fn push(&mut self, entry: T) {
        self.forward.clear();
        Self::push_bounded(&mut self.back, entry, self.limit);
    }

    /// Previous entry, if any. The caller pushes the page it is leaving
    /// with [`History::push_forward`].
    pub fn pop_back(&mut self) -> Option<T> {
        self.back.pop_back()
    }

    pub fn pop_forward(&mut self) -> Option<T> {
        self.forward.pop_back()
    }

    /// Record the page being left by going back.
    pub fn push_forward(&mut self, entry: T) {
        Self::push_bounded(&mut self.forward, entry, self.limit);
    }

    /// Record the page being left by going forward. Unlike [`History::push`]
    /// this keeps the forward stack.
    pub fn push_back(&mut self, entry: T) {
        Self::push_bounded(&mut self.back, entry, self.limit);
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn back_len(&self) -> usize {
        self.back.len()
    }

    pub fn forward_len(&self) -> usize {
        self.forward.len()
    }

    pub fn clear(&mut self) {
        self.back.clear();
        self.forward.clear();
    }

    fn push_bounded(stack: &mut VecDeque<T>, entry: T, limit: usize) {
        if stack.len() == limit {
            stack.pop_front();
        }
        stack.push_back(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Minimal browser over `History<u32>` used to check the stack rules.
    struct Browser {
        current: u32,
        history: History<u32>,
    }

    impl Browser {
        fn new() -> Self {
            Self {
                current: 0,
                history: History::new(),
            }
        }

        fn navigate(&mut self, page: u32) {
            let leaving = std::mem::replace(&mut self.current, page);
            self.history.push(leaving);
        }

        fn back(&mut self) -> bool {
            match self.history.pop_back() {
                Some(prev) => {
                    let leaving = std::mem::replace(&mut self.current, prev);
                    self.history.push_forward(leaving);
                    true
                }
                None => false,
            }
        }

        fn forward(&mut self) -> bool {
            match self.history.pop_forward() {
                Some(next) => {
                    let leaving = std::mem::replace(&mut self.current, next);
                    self.history.push_back(leaving);
                    true
                }
                None => false,
            }
        }
    }

    #[test]
    fn test_back_then_forward() {
        let mut b = Browser::new();
        b.navigate(1);
        b.navigate(2);

        assert!(b.back());
        assert_eq!(b.current, 1);
        assert!(b.history.can_go_forward());

        assert!(b.forward());
        assert_eq!(b.current, 2);
        assert!(!b.history.can_go_forward());
    }

    #[test]
    fn test_navigate_clears_forward() {
        let mut b = Browser::new();
        b.navigate(1);
        b.navigate(2);
        b.back();
        b.navigate(3);

        assert!(!b.history.can_go_forward());
        assert!(b.back());
        assert_eq!(b.current, 1);
    }

    #[test]
    fn test_empty_stacks_do_nothing() {
        let mut b = Browser::new();
        assert!(!b.back());
        assert!(!b.forward());
        assert_eq!(b.current, 0);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(3);
        for i in 0..5 {
            history.push(i);
        }
        assert_eq!(history.back_len(), 3);
        assert_eq!(history.pop_back(), Some(4));
        assert_eq!(history.pop_back(), Some(3));
        assert_eq!(history.pop_back(), Some(2));
        assert_eq!(history.pop_back(), None);
    }

    #[test]
    fn test_clear() {
        let mut b = Browser::new();
        b.navigate(1);
        b.navigate(2);
        b.back();
        b.history.clear();
        assert!(!b.history.can_go_back());
        assert!(!b.history.can_go_forward());
    }

    proptest! {
        #[test]
        fn back_n_then_forward_n_returns_to_start(
            pages in proptest::collection::vec(1u32..1000, 1..40),
            steps in 0usize..40,
        ) {
            let mut b = Browser::new();
            for page in &pages {
                b.navigate(*page);
            }
            let start = b.current;
            let steps = steps.min(pages.len());

            for _ in 0..steps {
                prop_assert!(b.back());
            }
            for _ in 0..steps {
                prop_assert!(b.forward());
            }

            prop_assert_eq!(b.current, start);
            prop_assert!(!b.history.can_go_forward());
            prop_assert_eq!(b.history.back_len(), pages.len());
        }

        #[test]
        fn stacks_never_exceed_limit(ops in proptest::collection::vec(0u8..3, 0..400)) {
            let mut b = Browser::new();
            for (i, op) in ops.iter().enumerate() {
                match op {
                    0 => b.navigate(i as u32),
                    1 => { b.back(); }
                    _ => { b.forward(); }
                }
                prop_assert!(b.history.back_len() <= MAX_HISTORY);
                prop_assert!(b.history.forward_len() <= MAX_HISTORY);
            }
        }
    }
}
