//! Keyboard shortcut table.
//!
//! Built once at startup for the running platform. macOS uses Cmd where
//! other platforms use Ctrl, and Cmd+[ / Cmd+] instead of Alt+arrows for
//! history navigation.

use iced::keyboard::{Key, Modifiers, key};

use super::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Back,
    Forward,
    Reload,
    FocusSearch,
    SelectAll,
    /// Activate the navigation button at this index
    NavButton(usize),
    ClosePopup,
    PlayPause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Named(key::Named),
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: ShortcutKey,
    pub modifiers: Modifiers,
    pub action: ShortcutAction,
}

#[derive(Debug, Clone)]
pub struct ShortcutMap {
    bindings: Vec<Binding>,
}

impl ShortcutMap {
    pub fn platform_default() -> Self {
        Self::for_platform(cfg!(target_os = "macos"))
    }

    pub fn for_platform(macos: bool) -> Self {
        let command = if macos { Modifiers::LOGO } else { Modifiers::CTRL };
        let mut bindings = Vec::new();
        let mut bind = |key, modifiers, action| {
            bindings.push(Binding {
                key,
                modifiers,
                action,
            })
        };

        if macos {
            bind(ShortcutKey::Char('['), command, ShortcutAction::Back);
            bind(ShortcutKey::Char(']'), command, ShortcutAction::Forward);
        } else {
            bind(
                ShortcutKey::Named(key::Named::ArrowLeft),
                Modifiers::ALT,
                ShortcutAction::Back,
            );
            bind(
                ShortcutKey::Named(key::Named::ArrowRight),
                Modifiers::ALT,
                ShortcutAction::Forward,
            );
        }
        bind(ShortcutKey::Char('r'), command, ShortcutAction::Reload);
        bind(ShortcutKey::Char('f'), command, ShortcutAction::FocusSearch);
        bind(ShortcutKey::Char('a'), command, ShortcutAction::SelectAll);
        for index in 0..Route::NAV_BUTTONS.len() {
            let Some(digit) = char::from_digit(index as u32 + 1, 10) else {
                continue;
            };
            bind(ShortcutKey::Char(digit), command, ShortcutAction::NavButton(index));
        }
        bind(
            ShortcutKey::Named(key::Named::Escape),
            Modifiers::empty(),
            ShortcutAction::ClosePopup,
        );
        bind(
            ShortcutKey::Named(key::Named::Space),
            Modifiers::empty(),
            ShortcutAction::PlayPause,
        );

        Self { bindings }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Find the action bound to this key press. Modifiers must match
    /// exactly, so Ctrl+Shift+R is not Ctrl+R.
    pub fn resolve(&self, key: &Key, modifiers: Modifiers) -> Option<ShortcutAction> {
        let pressed = match key.as_ref() {
            Key::Named(named) => ShortcutKey::Named(named),
            Key::Character(c) => {
                let mut chars = c.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => ShortcutKey::Char(ch.to_ascii_lowercase()),
                    _ => return None,
                }
            }
            Key::Unidentified => return None,
        };
        let action = self
            .bindings
            .iter()
            .find(|b| b.key == pressed && b.modifiers == modifiers)
            .map(|b| b.action);
        if let Some(action) = action {
            tracing::debug!(target: "ui::keyboard", ?action, "Shortcut");
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn test_history_shortcuts_per_platform() {
        let linux = ShortcutMap::for_platform(false);
        assert_eq!(
            linux.resolve(&Key::Named(key::Named::ArrowLeft), Modifiers::ALT),
            Some(ShortcutAction::Back)
        );
        assert_eq!(
            linux.resolve(&Key::Named(key::Named::ArrowRight), Modifiers::ALT),
            Some(ShortcutAction::Forward)
        );
        assert_eq!(linux.resolve(&ch("["), Modifiers::LOGO), None);

        let mac = ShortcutMap::for_platform(true);
        assert_eq!(mac.resolve(&ch("["), Modifiers::LOGO), Some(ShortcutAction::Back));
        assert_eq!(mac.resolve(&ch("]"), Modifiers::LOGO), Some(ShortcutAction::Forward));
        assert_eq!(
            mac.resolve(&Key::Named(key::Named::ArrowLeft), Modifiers::ALT),
            None
        );
    }

    #[test]
    fn test_command_modifier_per_platform() {
        let linux = ShortcutMap::for_platform(false);
        assert_eq!(linux.resolve(&ch("r"), Modifiers::CTRL), Some(ShortcutAction::Reload));
        assert_eq!(linux.resolve(&ch("r"), Modifiers::LOGO), None);

        let mac = ShortcutMap::for_platform(true);
        assert_eq!(mac.resolve(&ch("f"), Modifiers::LOGO), Some(ShortcutAction::FocusSearch));
        assert_eq!(mac.resolve(&ch("f"), Modifiers::CTRL), None);
    }

    #[test]
    fn test_numbered_navigation() {
        let map = ShortcutMap::for_platform(false);
        for i in 0..Route::NAV_BUTTONS.len() {
            let digit = (i + 1).to_string();
            assert_eq!(
                map.resolve(&ch(&digit), Modifiers::CTRL),
                Some(ShortcutAction::NavButton(i))
            );
        }
        assert_eq!(map.resolve(&ch("7"), Modifiers::CTRL), None);
    }

    #[test]
    fn test_modifiers_match_exactly() {
        let map = ShortcutMap::for_platform(false);
        assert_eq!(map.resolve(&ch("r"), Modifiers::CTRL | Modifiers::SHIFT), None);
        assert_eq!(map.resolve(&ch("r"), Modifiers::empty()), None);
        assert_eq!(
            map.resolve(&Key::Named(key::Named::Space), Modifiers::SHIFT),
            None
        );
    }

    #[test]
    fn test_uppercase_characters_resolve() {
        let map = ShortcutMap::for_platform(false);
        assert_eq!(map.resolve(&ch("A"), Modifiers::CTRL), Some(ShortcutAction::SelectAll));
    }

    #[test]
    fn test_escape_and_space() {
        let map = ShortcutMap::platform_default();
        assert_eq!(
            map.resolve(&Key::Named(key::Named::Escape), Modifiers::empty()),
            Some(ShortcutAction::ClosePopup)
        );
        assert_eq!(
            map.resolve(&Key::Named(key::Named::Space), Modifiers::empty()),
            Some(ShortcutAction::PlayPause)
        );
    }

    #[test]
    fn test_every_action_has_a_binding() {
        let map = ShortcutMap::for_platform(false);
        let actions: Vec<ShortcutAction> = map.bindings().iter().map(|b| b.action).collect();
        for expected in [
            ShortcutAction::Back,
            ShortcutAction::Forward,
            ShortcutAction::Reload,
            ShortcutAction::FocusSearch,
            ShortcutAction::SelectAll,
            ShortcutAction::ClosePopup,
            ShortcutAction::PlayPause,
        ] {
            assert!(actions.contains(&expected), "{:?} unbound", expected);
        }
    }
}
