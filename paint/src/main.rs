mod assign;
mod logging;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};

use keyanim_core::driver::DEFAULT_PROGRAM;
use keyanim_core::{CommandDriver, LightDriver, PhysicalDisplay, PixelMapper, WriterDriver};

use crate::assign::{paint, parse_assignment, Assignment};

#[derive(Parser)]
#[command(name = "keyanim-paint", about = "Set static keyboard colours in one frame")]
struct Cli {
    /// Colour a key group, as NAME=RRGGBB (repeatable)
    #[arg(long = "group", value_parser = parse_assignment)]
    groups: Vec<Assignment>,

    /// Colour a single key, as NAME=RRGGBB (repeatable, applied after groups)
    #[arg(long = "key", value_parser = parse_assignment)]
    keys: Vec<Assignment>,

    /// Built-in keyboard layout
    #[arg(long, default_value = "g810")]
    model: String,

    /// Print the protocol text instead of running the driver
    #[arg(long, value_enum, default_value_t = Output::G810Led)]
    driver: Output,

    /// Lighting driver executable
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    program: String,

    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    G810Led,
    Stdout,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_log(cli.log_level)?;

    let mapper = PixelMapper::builtin(&cli.model)?;
    let mut frame = PhysicalDisplay::for_mapper(&mapper);
    paint(&mut frame, &cli.groups, &cli.keys);
    info!("painting {} targets", frame.len());

    match cli.driver {
        Output::G810Led => CommandDriver::new(cli.program.clone()).emit(&frame),
        Output::Stdout => WriterDriver::new(std::io::stdout()).emit(&frame),
    }
    .context("failed to paint keyboard")?;

    Ok(())
}
