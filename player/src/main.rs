mod logging;
mod preview;
mod scene;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::execute;
use log::{info, warn, LevelFilter};

use keyanim_core::driver::DEFAULT_PROGRAM;
use keyanim_core::{
    AnimatedSprite, Colour, CommandDriver, Direction, LightDriver, Pixel, PixelMapper, Point,
    Sprite, View, VirtualDisplay, WriterDriver,
};

use crate::preview::PreviewDriver;

#[derive(Parser)]
#[command(name = "keyanim-play", about = "Animate sprites across a keyboard's RGB lighting")]
struct Cli {
    /// Built-in keyboard layout
    #[arg(long, default_value = "g810")]
    model: String,

    /// TOML layout file (overrides --model)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Milliseconds between frames
    #[arg(long, default_value = "100")]
    interval_ms: u64,

    /// Direction every sprite moves each frame
    #[arg(long, value_enum, default_value_t = Drift::Left)]
    drift: Drift,

    /// Where frames go
    #[arg(long, value_enum, default_value_t = DriverKind::G810Led)]
    driver: DriverKind,

    /// Lighting driver executable, fed with `-pp` on stdin
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    program: String,

    /// Starting top-left of the demo sprite, as X,Y
    #[arg(long, default_value = "1,1", value_parser = parse_point, allow_hyphen_values = true)]
    anchor: Point,

    /// Colour of the demo sprite
    #[arg(long, default_value = "ffbb99")]
    colour: Colour,

    /// TOML scene with more sprites, drawn over the demo sprite
    #[arg(long)]
    sprite: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum Drift {
    Left,
    Right,
    Up,
    Down,
}

impl From<Drift> for Direction {
    fn from(d: Drift) -> Self {
        match d {
            Drift::Left => Direction::Left,
            Drift::Right => Direction::Right,
            Drift::Up => Direction::Up,
            Drift::Down => Direction::Down,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DriverKind {
    /// Pipe frames into the keyboard driver
    G810Led,
    /// Print protocol text to stdout
    Stdout,
    /// Draw the grid in this terminal
    Preview,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let x: i32 = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y: i32 = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(Point::from((x, y)))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_log(cli.log_level)?;

    let mapper = match &cli.layout {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            PixelMapper::from_toml(&source)
                .with_context(|| format!("failed to load layout {}", path.display()))?
        }
        None => PixelMapper::builtin(&cli.model)?,
    };
    info!(
        "layout {} ({}x{})",
        mapper.model(),
        mapper.width(),
        mapper.height()
    );

    // Demo sprite first, scene sprites stack on top of it
    let mut display = VirtualDisplay::new(cli.drift.into());
    let demo = Sprite::new(vec![Pixel::new(Point::new(0, 0), cli.colour)]);
    display.add_sprite(AnimatedSprite::new(demo, cli.anchor));
    if let Some(path) = &cli.sprite {
        for sprite in scene::load_scene(path)? {
            display.add_sprite(sprite);
        }
    }

    let driver: Box<dyn LightDriver> = match cli.driver {
        DriverKind::G810Led => Box::new(CommandDriver::new(cli.program.clone())),
        DriverKind::Stdout => Box::new(WriterDriver::new(std::io::stdout())),
        DriverKind::Preview => {
            let (term_cols, term_rows) = terminal::size()?;
            let (need_cols, need_rows) = preview::required_size(mapper.width(), mapper.height());
            if term_cols < need_cols || term_rows < need_rows {
                warn!(
                    "terminal is {}x{} but the preview needs {}x{}",
                    term_cols, term_rows, need_cols, need_rows
                );
            }
            let mut stdout = std::io::stdout();
            execute!(stdout, Clear(ClearType::All))?;
            stdout.flush()?;
            Box::new(PreviewDriver::new(stdout, 1))
        }
    };

    let mut view = View::new(display, mapper, driver)
        .with_interval(Duration::from_millis(cli.interval_ms));
    view.run().context("animation stopped")?;
    Ok(())
}
