//! Draw lists for the menu and for a run
//!
//! Pure functions of the state they are given; no pixel work happens here.

use glam::Vec2;

use super::{Color, DrawCmd, Rect, SpriteId};
use crate::assets::Assets;
use crate::menu::Menu;
use crate::records::Records;
use crate::sim::{GamePhase, GameState, Mode, ParticleKind, Snake, Tier};

/// Menu background dim
pub const MENU_DIM: u8 = 80;
/// Button hover brightening
const HIGHLIGHT: u8 = 15;
const BUTTON_RADIUS: f32 = 12.0;

/// Run-independent HUD options
#[derive(Debug, Clone, Copy, Default)]
pub struct HudOptions {
    /// Show the survivor difficulty line
    pub show_difficulty: bool,
    /// Escape restarts instead of returning to the menu
    pub restart_on_back: bool,
    /// The finished run set a record
    pub new_best: bool,
}

pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Low => Color::RED,
        Tier::Mid => Color::CYAN,
        Tier::High => Color::GOLD,
    }
}

fn particle_color(kind: ParticleKind) -> Color {
    match kind {
        ParticleKind::Pickup => Color::GOLD,
        ParticleKind::Impact => Color::WHITE,
    }
}

pub fn menu_scene(menu: &Menu, records: &Records, width: f32) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Background, DrawCmd::Dim(MENU_DIM)];

    cmds.push(DrawCmd::centered_text(
        "S.H.R.I.M.P",
        Vec2::new(width / 2.0, 40.0),
        8,
        Color::WHITE,
    ));

    let mut y = 112.0;
    if let Some(score) = records.best_score() {
        cmds.push(DrawCmd::centered_text(
            format!("Best catch: {score}"),
            Vec2::new(width / 2.0, y),
            2,
            Color::GOLD,
        ));
        y += 22.0;
    }
    if let Some(secs) = records.best_survival() {
        cmds.push(DrawCmd::centered_text(
            format!("Best survival: {secs:.2} s"),
            Vec2::new(width / 2.0, y),
            2,
            Color::CYAN,
        ));
    }

    for (i, button) in menu.buttons().iter().enumerate() {
        let fill = if menu.is_highlighted(i) {
            button.fill.lighten(HIGHLIGHT)
        } else {
            button.fill
        };
        cmds.push(DrawCmd::Rect {
            rect: button.rect,
            fill,
            corner_radius: BUTTON_RADIUS,
            outline: Some(Color::rgba(255, 255, 255, 40)),
        });
        cmds.push(DrawCmd::text(
            button.label,
            label_pos(&button.rect, 4),
            4,
            Color::WHITE,
        ));
    }

    cmds.push(DrawCmd::text("Choose mode", menu.hint_pos(), 3, Color::WHITE));
    cmds
}

/// Left-padded, vertically centered label position
fn label_pos(rect: &Rect, scale: u32) -> Vec2 {
    let h = super::font::text_height(scale) as f32;
    Vec2::new(rect.x + 16.0, rect.y + (rect.h - h) / 2.0)
}

pub fn session_scene(state: &GameState, assets: &Assets, hud: HudOptions) -> Vec<DrawCmd> {
    let background = match state.mode {
        Mode::Catcher => Color::BG,
        Mode::Survivor => Color::BLACK,
    };
    let mut cmds = vec![DrawCmd::Clear(background)];

    for snake in &state.snakes {
        push_snake(&mut cmds, snake);
    }

    for p in &state.particles {
        let alpha = (p.fade() * 255.0) as u8;
        cmds.push(DrawCmd::Circle {
            center: p.pos,
            radius: 1.5 + 2.0 * p.fade(),
            color: particle_color(p.kind).with_alpha(alpha),
        });
    }

    if assets.player(state.mode).is_some() {
        cmds.push(DrawCmd::Sprite {
            id: SpriteId::Player(state.mode),
            center: state.player.pos,
        });
    } else {
        cmds.push(DrawCmd::Circle {
            center: state.player.pos,
            radius: state.player.radius,
            color: Color::PLAYER,
        });
    }

    match state.mode {
        Mode::Catcher => catcher_hud(&mut cmds, state, hud),
        Mode::Survivor => survivor_hud(&mut cmds, state, hud),
    }
    cmds
}

/// Body tail-first so the head is on top, then the eye
fn push_snake(cmds: &mut Vec<DrawCmd>, snake: &Snake) {
    let segments = snake.segments();
    let color = tier_color(snake.tier);
    for seg in segments.iter().rev() {
        cmds.push(DrawCmd::Circle {
            center: seg.pos,
            radius: seg.radius,
            color,
        });
    }
    if let Some(head) = segments.first() {
        let r = head.radius;
        cmds.push(DrawCmd::Circle {
            center: head.pos + Vec2::new(r * 0.3, -r * 0.1),
            radius: (r * 0.18).max(2.0),
            color: Color::EYE,
        });
    }
}

fn back_hint(hud: HudOptions) -> &'static str {
    if hud.restart_on_back {
        "Esc - play again"
    } else {
        "Esc - back to menu"
    }
}

fn catcher_hud(cmds: &mut Vec<DrawCmd>, state: &GameState, hud: HudOptions) {
    let (w, h) = (state.screen.w(), state.screen.h());

    cmds.push(DrawCmd::text(
        format!("Score: {}", state.score),
        Vec2::new(16.0, 12.0),
        3,
        Color::WHITE,
    ));
    let secs = state.time_left().unwrap_or(0.0) as u64;
    cmds.push(DrawCmd::Text {
        text: format!("Time: {secs:02}s"),
        pos: Vec2::new(w - 16.0, 12.0),
        scale: 3,
        color: Color::WHITE,
        align: super::Align::Right,
    });

    // Reward legend, bottom left
    let rewards = state.config.rewards;
    let legend_y = h - 70.0;
    for (i, (tier, value)) in [
        (Tier::Low, rewards.low),
        (Tier::Mid, rewards.mid),
        (Tier::High, rewards.high),
    ]
    .into_iter()
    .enumerate()
    {
        let y = legend_y + 22.0 * i as f32;
        cmds.push(DrawCmd::Circle {
            center: Vec2::new(26.0, y),
            radius: 6.0,
            color: tier_color(tier),
        });
        cmds.push(DrawCmd::text(
            format!("= {value}"),
            Vec2::new(44.0, y - 7.0),
            2,
            Color::WHITE,
        ));
    }

    let cx = w / 2.0;
    match state.phase {
        GamePhase::Paused => {
            cmds.push(DrawCmd::centered_text(
                "PAUSED",
                Vec2::new(cx, h / 2.0 - 24.0),
                7,
                Color::GRAY,
            ));
        }
        GamePhase::GameOver => {
            cmds.push(DrawCmd::centered_text(
                "Time out!",
                Vec2::new(cx, h / 2.0 - 80.0),
                6,
                Color::WHITE,
            ));
            cmds.push(DrawCmd::centered_text(
                format!("Your score: {}", state.score),
                Vec2::new(cx, h / 2.0 - 20.0),
                3,
                Color::GOLD,
            ));
            if hud.new_best {
                cmds.push(DrawCmd::centered_text(
                    "New best!",
                    Vec2::new(cx, h / 2.0 + 2.0),
                    2,
                    Color::GOLD,
                ));
            }
            cmds.push(DrawCmd::centered_text(
                back_hint(hud),
                Vec2::new(cx, h / 2.0 + 24.0),
                3,
                Color::GRAY,
            ));
        }
        GamePhase::Playing => {}
    }
}

fn survivor_hud(cmds: &mut Vec<DrawCmd>, state: &GameState, hud: HudOptions) {
    let (w, h) = (state.screen.w(), state.screen.h());

    cmds.push(DrawCmd::text(
        format!("Time: {:05.2}s", state.clock),
        Vec2::new(24.0, 20.0),
        4,
        Color::WHITE,
    ));
    cmds.push(DrawCmd::text(
        "WASD/Arrows - move, P - pause",
        Vec2::new(24.0, 60.0),
        2,
        Color::GRAY,
    ));
    if hud.show_difficulty && state.phase != GamePhase::GameOver {
        let scalars = state.difficulty_scalars();
        cmds.push(DrawCmd::text(
            format!("Speed x{:.2}  Spawn x{:.2}", scalars.speed, scalars.spawn),
            Vec2::new(24.0, 82.0),
            2,
            Color::GRAY,
        ));
    }

    let cx = w / 2.0;
    match state.phase {
        GamePhase::Paused => {
            cmds.push(DrawCmd::centered_text(
                "PAUSED",
                Vec2::new(cx, h / 2.0 - 28.0),
                8,
                Color::CYAN,
            ));
        }
        GamePhase::GameOver => {
            cmds.push(DrawCmd::centered_text(
                "GAME OVER",
                Vec2::new(cx, h / 2.0 - 110.0),
                8,
                Color::RED,
            ));
            cmds.push(DrawCmd::centered_text(
                format!("You survived: {:.2} s", state.clock),
                Vec2::new(cx, h / 2.0 - 40.0),
                4,
                Color::WHITE,
            ));
            if hud.new_best {
                cmds.push(DrawCmd::centered_text(
                    "New best!",
                    Vec2::new(cx, h / 2.0 - 4.0),
                    2,
                    Color::GOLD,
                ));
            }
            cmds.push(DrawCmd::centered_text(
                back_hint(hud),
                Vec2::new(cx, h / 2.0 + 20.0),
                4,
                Color::WHITE,
            ));
        }
        GamePhase::Playing => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, ScreenConfig};
    use crate::sim::Outcome;

    fn texts(cmds: &[DrawCmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn state(mode: Mode) -> GameState {
        let mut state = GameState::new(mode, &GameConfig::default(), 5);
        state.next_spawn = f32::INFINITY;
        state
    }

    #[test]
    fn test_menu_scene() {
        let menu = Menu::new(&ScreenConfig::default());
        let cmds = menu_scene(&menu, &Records::new(), 1280.0);
        assert_eq!(cmds[0], DrawCmd::Background);
        assert_eq!(cmds[1], DrawCmd::Dim(MENU_DIM));
        let labels = texts(&cmds);
        assert!(labels.contains(&"S.H.R.I.M.P"));
        assert!(labels.contains(&"SURVIVOR"));
        assert!(labels.contains(&"CATCHER"));
        assert!(labels.contains(&"Choose mode"));
        assert!(!labels.iter().any(|t| t.starts_with("Best")));

        let rects = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Rect { .. }))
            .count();
        assert_eq!(rects, 2);
    }

    #[test]
    fn test_menu_shows_records() {
        let menu = Menu::new(&ScreenConfig::default());
        let mut records = Records::new();
        records.record(Mode::Catcher, Outcome::Score(350));
        records.record(Mode::Survivor, Outcome::Survived(12.5));
        let cmds = menu_scene(&menu, &records, 1280.0);
        let labels = texts(&cmds);
        assert!(labels.contains(&"Best catch: 350"));
        assert!(labels.contains(&"Best survival: 12.50 s"));
    }

    #[test]
    fn test_highlighted_button_is_lighter() {
        let menu = Menu::new(&ScreenConfig::default());
        let cmds = menu_scene(&menu, &Records::new(), 1280.0);
        let fills: Vec<Color> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Rect { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills[0], Color::rgb(55, 55, 75));
        assert_eq!(fills[1], Color::rgb(60, 40, 40));
    }

    #[test]
    fn test_catcher_hud() {
        let mut state = state(Mode::Catcher);
        state.score = 150;
        let cmds = session_scene(&state, &Assets::none(), HudOptions::default());
        assert_eq!(cmds[0], DrawCmd::Clear(Color::BG));
        let labels = texts(&cmds);
        assert!(labels.contains(&"Score: 150"));
        assert!(labels.contains(&"Time: 20s"));
        assert!(labels.contains(&"= 50"));
        assert!(labels.contains(&"= 200"));
        assert!(!labels.contains(&"PAUSED"));
    }

    #[test]
    fn test_catcher_game_over() {
        let mut state = state(Mode::Catcher);
        state.score = 400;
        state.clock = 0.0;
        state.phase = GamePhase::GameOver;
        let hud = HudOptions {
            new_best: true,
            ..Default::default()
        };
        let labels_owned = session_scene(&state, &Assets::none(), hud);
        let labels = texts(&labels_owned);
        assert!(labels.contains(&"Time out!"));
        assert!(labels.contains(&"Your score: 400"));
        assert!(labels.contains(&"New best!"));
        assert!(labels.contains(&"Time: 00s"));
        assert!(labels.contains(&"Esc - back to menu"));
    }

    #[test]
    fn test_survivor_hud_and_pause() {
        let mut state = state(Mode::Survivor);
        state.clock = 5.234;
        state.phase = GamePhase::Paused;
        let hud = HudOptions {
            show_difficulty: true,
            restart_on_back: true,
            new_best: false,
        };
        let cmds = session_scene(&state, &Assets::none(), hud);
        assert_eq!(cmds[0], DrawCmd::Clear(Color::BLACK));
        let labels = texts(&cmds);
        assert!(labels.contains(&"Time: 05.23s"));
        assert!(labels.contains(&"PAUSED"));
        assert!(labels.iter().any(|t| t.starts_with("Speed x")));
    }

    #[test]
    fn test_difficulty_line_shows_raw_multiplier() {
        let mut state = state(Mode::Survivor);
        state.clock = 150.0;
        let hud = HudOptions {
            show_difficulty: true,
            ..Default::default()
        };
        let scalars = state.difficulty_scalars();
        assert!(scalars.speed > state.difficulty.speed_cap);
        let expected = format!("Speed x{:.2}  Spawn x{:.2}", scalars.speed, scalars.spawn);

        let cmds = session_scene(&state, &Assets::none(), hud);
        assert!(texts(&cmds).contains(&expected.as_str()));

        state.phase = GamePhase::GameOver;
        let cmds = session_scene(&state, &Assets::none(), hud);
        assert!(!texts(&cmds).iter().any(|t| t.starts_with("Speed x")));
    }

    #[test]
    fn test_survivor_game_over_single_mode() {
        let mut state = state(Mode::Survivor);
        state.clock = 42.0;
        state.phase = GamePhase::GameOver;
        let hud = HudOptions {
            restart_on_back: true,
            ..Default::default()
        };
        let cmds = session_scene(&state, &Assets::none(), hud);
        let labels = texts(&cmds);
        assert!(labels.contains(&"GAME OVER"));
        assert!(labels.contains(&"You survived: 42.00 s"));
        assert!(labels.contains(&"Esc - play again"));
    }

    #[test]
    fn test_player_fallback_circle() {
        let state = state(Mode::Catcher);
        let cmds = session_scene(&state, &Assets::none(), HudOptions::default());
        assert!(cmds.contains(&DrawCmd::Circle {
            center: state.player.pos,
            radius: state.player.radius,
            color: Color::PLAYER,
        }));
        assert!(!cmds.iter().any(|c| matches!(c, DrawCmd::Sprite { .. })));
    }

    #[test]
    fn test_snake_drawn_tail_first_with_eye() {
        let mut state = state(Mode::Catcher);
        state.spawn_snake();
        for _ in 0..10 {
            let screen = state.screen;
            state.snakes[0].update(&screen);
        }
        let snake = &state.snakes[0];
        let segments = snake.segments();
        let cmds = session_scene(&state, &Assets::none(), HudOptions::default());

        let circles: Vec<&DrawCmd> = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Circle { .. }))
            .collect();
        let n = segments.len();
        // first circle is the tail, then the head, then the eye
        assert_eq!(
            circles[0],
            &DrawCmd::Circle {
                center: segments[n - 1].pos,
                radius: segments[n - 1].radius,
                color: tier_color(snake.tier),
            }
        );
        assert_eq!(
            circles[n - 1],
            &DrawCmd::Circle {
                center: segments[0].pos,
                radius: segments[0].radius,
                color: tier_color(snake.tier),
            }
        );
        match circles[n] {
            DrawCmd::Circle { color, .. } => assert_eq!(*color, Color::EYE),
            _ => unreachable!(),
        }
    }
}
