//! Native host: window, input polling and the frame loop

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use shrimp_arcade::assets::Assets;
use shrimp_arcade::renderer::raster::PixelBuffer;
use shrimp_arcade::sim::{Intents, Mode};
use shrimp_arcade::{App, AppControl, FrameInput, GameConfig};

/// Present at most once per 60 Hz frame
const FRAME_INTERVAL: Duration = Duration::from_micros(16_600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LaunchMode {
    /// Mode selector
    Menu,
    Catcher,
    Survivor,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "S.H.R.I.M.P arcade", long_about = None)]
struct Args {
    /// Start in a mode instead of the menu
    #[arg(short, long, value_enum, default_value_t = LaunchMode::Menu)]
    mode: LaunchMode,

    /// Window width (overrides the config file)
    #[arg(long)]
    width: Option<u32>,

    /// Window height (overrides the config file)
    #[arg(long)]
    height: Option<u32>,

    /// JSON game config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding player.qoi and menu_bg.qoi
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    log::info!("S.H.R.I.M.P starting...");

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => {
            log::info!("No config file, using defaults");
            GameConfig::default()
        }
    };
    if let Some(width) = args.width {
        config.screen.width = width;
    }
    if let Some(height) = args.height {
        config.screen.height = height;
    }
    config.validate().context("invalid game config")?;

    let single_mode = match args.mode {
        LaunchMode::Menu => None,
        LaunchMode::Catcher => Some(Mode::Catcher),
        LaunchMode::Survivor => Some(Mode::Survivor),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}", seed);

    let assets = Assets::load(&args.assets, &config);
    let (width, height) = (config.screen.width as usize, config.screen.height as usize);

    let mut window = Window::new(
        "S.H.R.I.M.P",
        width,
        height,
        WindowOptions {
            scale: minifb::Scale::X1,
            resize: false,
            ..WindowOptions::default()
        },
    )
    .context("failed to create window")?;
    window.limit_update_rate(Some(FRAME_INTERVAL));

    let mut app = App::new(config, single_mode, seed);
    let mut buffer = PixelBuffer::new(width, height);
    let mut mouse_was_down = false;
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        let input = poll_input(&window, &mut mouse_was_down);
        if app.frame(&input, dt) == AppControl::Quit {
            break;
        }

        let cmds = app.draw_list(&assets);
        buffer.execute(&cmds, &assets);
        window
            .update_with_buffer(buffer.pixels(), width, height)
            .context("failed to present frame")?;
    }

    log::info!("Bye ({} runs played)", app.records().runs());
    Ok(())
}

/// Map window state to one frame of input
fn poll_input(window: &Window, mouse_was_down: &mut bool) -> FrameInput {
    let mut input = FrameInput {
        quit: !window.is_open(),
        ..Default::default()
    };

    let mut intents = Intents::default();
    for key in window.get_keys() {
        match key {
            Key::Up | Key::W => intents.up = true,
            Key::Down | Key::S => intents.down = true,
            Key::Left | Key::A => intents.left = true,
            Key::Right | Key::D => intents.right = true,
            _ => {}
        }
    }
    input.intents = intents;

    for key in window.get_keys_pressed(KeyRepeat::No) {
        match key {
            Key::P => input.pause = true,
            Key::Escape => input.back = true,
            Key::Enter | Key::NumPadEnter | Key::Space => input.confirm = true,
            Key::Up | Key::W => input.menu_up = true,
            Key::Down | Key::S => input.menu_down = true,
            _ => {}
        }
    }

    input.mouse = window
        .get_mouse_pos(MouseMode::Discard)
        .map(|(x, y)| Vec2::new(x, y));
    let down = window.get_mouse_down(MouseButton::Left);
    input.click = down && !*mouse_was_down;
    *mouse_was_down = down;

    input
}
