//! Mode selector
//!
//! Two stacked buttons in the bottom-left corner. Mouse click or Up/Down +
//! Enter picks a mode; Escape quits.

use glam::Vec2;

use crate::app::FrameInput;
use crate::config::ScreenConfig;
use crate::renderer::{Color, Rect};
use crate::sim::Mode;

pub const BUTTON_W: f32 = 220.0;
pub const BUTTON_H: f32 = 56.0;
pub const BUTTON_GAP: f32 = 10.0;
pub const PADDING: f32 = 24.0;

/// A clickable mode button
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub mode: Mode,
    pub rect: Rect,
    pub fill: Color,
}

/// What the menu wants the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Start(Mode),
    Quit,
}

#[derive(Debug, Clone)]
pub struct Menu {
    buttons: [Button; 2],
    selected: usize,
    hovered: Option<usize>,
    last_mouse: Option<Vec2>,
}

impl Menu {
    pub fn new(screen: &ScreenConfig) -> Self {
        let x = PADDING;
        let top = screen.h() - PADDING - BUTTON_H * 2.0 - BUTTON_GAP;
        Self {
            buttons: [
                Button {
                    label: "SURVIVOR",
                    mode: Mode::Survivor,
                    rect: Rect::new(x, top, BUTTON_W, BUTTON_H),
                    fill: Color::rgb(40, 40, 60),
                },
                Button {
                    label: "CATCHER",
                    mode: Mode::Catcher,
                    rect: Rect::new(x, top + BUTTON_H + BUTTON_GAP, BUTTON_W, BUTTON_H),
                    fill: Color::rgb(60, 40, 40),
                },
            ],
            selected: 0,
            hovered: None,
            last_mouse: None,
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.selected == index
    }

    /// Top-left of the "Choose mode" hint, above the first button
    pub fn hint_pos(&self) -> Vec2 {
        let first = &self.buttons[0].rect;
        Vec2::new(first.x, first.y - 30.0)
    }

    /// Button under the mouse cursor
    pub fn button_at(&self, pos: Vec2) -> Option<usize> {
        self.buttons.iter().position(|b| b.rect.contains(pos))
    }

    /// Process one frame of input
    pub fn update(&mut self, input: &FrameInput) -> MenuAction {
        if input.quit || input.back {
            return MenuAction::Quit;
        }

        self.hovered = input.mouse.and_then(|p| self.button_at(p));
        // Only a moving mouse takes over the keyboard selection
        if input.mouse != self.last_mouse {
            if let Some(i) = self.hovered {
                self.selected = i;
            }
            self.last_mouse = input.mouse;
        }

        if input.click
            && let Some(i) = self.hovered
        {
            return self.start(i);
        }

        let n = self.buttons.len();
        if input.menu_up {
            self.selected = (self.selected + n - 1) % n;
        }
        if input.menu_down {
            self.selected = (self.selected + 1) % n;
        }

        if input.confirm {
            return self.start(self.selected);
        }
        MenuAction::None
    }

    fn start(&self, index: usize) -> MenuAction {
        let mode = self.buttons[index].mode;
        log::info!("Mode selected: {}", mode.as_str());
        MenuAction::Start(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        Menu::new(&ScreenConfig::new(1280, 720))
    }

    #[test]
    fn test_layout_bottom_left() {
        let menu = menu();
        let [surv, catch] = &menu.buttons;
        assert_eq!(surv.rect, Rect::new(24.0, 720.0 - 24.0 - 112.0 - 10.0, 220.0, 56.0));
        assert_eq!(catch.rect.y, surv.rect.y + 66.0);
        assert_eq!(catch.rect.y + catch.rect.h, 720.0 - 24.0);
        assert_eq!(menu.hint_pos(), Vec2::new(24.0, surv.rect.y - 30.0));
    }

    #[test]
    fn test_click_selects_mode() {
        let mut menu = menu();
        let catch = menu.buttons[1].rect;
        let input = FrameInput {
            mouse: Some(Vec2::new(catch.x + 5.0, catch.y + 5.0)),
            click: true,
            ..Default::default()
        };
        assert_eq!(menu.update(&input), MenuAction::Start(Mode::Catcher));
    }

    #[test]
    fn test_click_outside_does_nothing() {
        let mut menu = menu();
        let input = FrameInput {
            mouse: Some(Vec2::new(640.0, 100.0)),
            click: true,
            ..Default::default()
        };
        assert_eq!(menu.update(&input), MenuAction::None);
        assert_eq!(menu.hovered, None);
    }

    #[test]
    fn test_keyboard_navigation_wraps() {
        let mut menu = menu();
        let down = FrameInput {
            menu_down: true,
            ..Default::default()
        };
        menu.update(&down);
        assert_eq!(menu.selected, 1);
        menu.update(&down);
        assert_eq!(menu.selected, 0);

        let up = FrameInput {
            menu_up: true,
            ..Default::default()
        };
        menu.update(&up);
        assert!(menu.is_highlighted(1));

        let confirm = FrameInput {
            confirm: true,
            ..Default::default()
        };
        assert_eq!(menu.update(&confirm), MenuAction::Start(Mode::Catcher));
    }

    #[test]
    fn test_still_mouse_keeps_keyboard_choice() {
        let mut menu = menu();
        let surv = menu.buttons[0].rect;
        let over_survivor = Some(Vec2::new(surv.x + 10.0, surv.y + 10.0));
        menu.update(&FrameInput {
            mouse: over_survivor,
            ..Default::default()
        });
        menu.update(&FrameInput {
            mouse: over_survivor,
            menu_down: true,
            ..Default::default()
        });
        let action = menu.update(&FrameInput {
            mouse: over_survivor,
            confirm: true,
            ..Default::default()
        });
        assert_eq!(action, MenuAction::Start(Mode::Catcher));
    }

    #[test]
    fn test_escape_quits() {
        let mut menu = menu();
        let input = FrameInput {
            back: true,
            ..Default::default()
        };
        assert_eq!(menu.update(&input), MenuAction::Quit);
    }
}
