//! Application controller
//!
//! Owns the menu/session lifecycle as an explicit state machine. The host
//! feeds one [`FrameInput`] and the real frame time per frame; the app runs
//! the fixed-timestep simulation and reports whether to keep going.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::Assets;
use crate::config::GameConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::menu::{Menu, MenuAction};
use crate::records::Records;
use crate::renderer::DrawCmd;
use crate::renderer::scene::{self, HudOptions};
use crate::sim::{GameState, Intents, Mode, TickInput, tick};

/// Input gathered by the host for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Held movement keys
    pub intents: Intents,
    /// P pressed this frame
    pub pause: bool,
    /// Escape pressed this frame
    pub back: bool,
    /// Enter or Space pressed this frame
    pub confirm: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    /// Cursor position, if inside the window
    pub mouse: Option<Vec2>,
    /// Left button went down this frame
    pub click: bool,
    /// Window closed
    pub quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

/// One run plus its frame-timing state
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    accumulator: f32,
    /// Pause press waiting for the next tick
    pending_pause: bool,
    recorded: bool,
    new_best: bool,
}

impl Session {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            pending_pause: false,
            recorded: false,
            new_best: false,
        }
    }

    /// Run as many fixed ticks as the frame time allows
    fn advance(&mut self, input: &FrameInput, dt: f32) {
        self.pending_pause |= input.pause;
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let tick_input = TickInput {
                intents: input.intents,
                pause: self.pending_pause,
            };
            tick(&mut self.state, &tick_input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending_pause = false;
        }
        // Drop time the substep cap could not absorb
        self.accumulator = self.accumulator.min(SIM_DT * MAX_SUBSTEPS as f32);
    }

    /// The finished run set a new record
    pub fn new_best(&self) -> bool {
        self.new_best
    }
}

/// What the app is showing
#[derive(Debug, Clone)]
pub enum Screen {
    Menu(Menu),
    Playing(Session),
}

enum Transition {
    Stay,
    Start(Mode),
    Restart,
    ToMenu,
    Quit,
}

pub struct App {
    config: GameConfig,
    screen: Screen,
    records: Records,
    /// Launched straight into one mode: no menu, Escape restarts
    single_mode: Option<Mode>,
    seeds: Pcg32,
}

impl App {
    pub fn new(config: GameConfig, single_mode: Option<Mode>, seed: u64) -> Self {
        let mut app = Self {
            screen: Screen::Menu(Menu::new(&config.screen)),
            config,
            records: Records::new(),
            single_mode,
            seeds: Pcg32::seed_from_u64(seed),
        };
        if let Some(mode) = single_mode {
            app.start(mode);
        }
        app
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current run, if one is on screen
    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Playing(session) => Some(session),
            Screen::Menu(_) => None,
        }
    }

    /// Advance by one host frame
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> AppControl {
        if input.quit {
            return AppControl::Quit;
        }

        let transition = match &mut self.screen {
            Screen::Menu(menu) => match menu.update(input) {
                MenuAction::None => Transition::Stay,
                MenuAction::Start(mode) => Transition::Start(mode),
                MenuAction::Quit => Transition::Quit,
            },
            Screen::Playing(session) => {
                if session.state.is_over() && input.back {
                    if self.single_mode.is_some() {
                        Transition::Restart
                    } else {
                        Transition::ToMenu
                    }
                } else {
                    session.advance(input, dt);
                    if session.state.is_over() && !session.recorded {
                        session.recorded = true;
                        session.new_best = self
                            .records
                            .record(session.state.mode, session.state.outcome());
                    }
                    Transition::Stay
                }
            }
        };

        match transition {
            Transition::Stay => {}
            Transition::Start(mode) => self.start(mode),
            Transition::Restart => self.restart(),
            Transition::ToMenu => {
                log::info!("Back to menu");
                self.screen = Screen::Menu(Menu::new(&self.config.screen));
            }
            Transition::Quit => return AppControl::Quit,
        }
        AppControl::Continue
    }

    fn start(&mut self, mode: Mode) {
        let seed = self.seeds.next_u64();
        let state = GameState::new(mode, &self.config, seed);
        self.screen = Screen::Playing(Session::new(state));
    }

    fn restart(&mut self) {
        if let Screen::Playing(session) = &mut self.screen {
            let state = session.state.restart();
            *session = Session::new(state);
        }
    }

    /// Draw list for the current frame
    pub fn draw_list(&self, assets: &Assets) -> Vec<DrawCmd> {
        match &self.screen {
            Screen::Menu(menu) => scene::menu_scene(menu, &self.records, self.config.screen.w()),
            Screen::Playing(session) => {
                let hud = HudOptions {
                    show_difficulty: self.config.visuals.show_difficulty,
                    restart_on_back: self.single_mode.is_some(),
                    new_best: session.new_best,
                };
                scene::session_scene(&session.state, assets, hud)
            }
        }
    }
}
