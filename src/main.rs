use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, enabled, error, info, Level};
use tracing_subscriber::EnvFilter;

use chip8vm::{timer::Cadence, window::Screen, Config, Emulator, Keyboard, Keypad};

// Separately:
// CPU: `ipf` instructions per frame
// Display: 60 times per second
// Timer: 60 times per second

#[derive(Parser, Debug)]
#[command(version, about = "Runs a CHIP-8 program in a window (ESC to exit)")]
struct Args {
    /// Program image, loaded as-is at 0x200
    rom: PathBuf,
    /// Instructions executed per 60 Hz frame
    #[arg(long, default_value_t = 10)]
    ipf: u32,
    /// Seed for the random-number instruction
    #[arg(long)]
    seed: Option<u64>,
    /// Window scale factor
    #[arg(long, default_value_t = 16)]
    scale: u8,
    /// Timer decrements (and frames) per second
    #[arg(long, default_value_t = 60)]
    timer_hz: u64,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            instructions_per_frame: args.ipf,
            seed: args.seed,
            scale: args.scale,
            timer_hz: args.timer_hz,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let rom = args.rom.clone();
    let config = Config::from(args);

    let program =
        fs::read(&rom).with_context(|| format!("failed to read program {}", rom.display()))?;

    let mut emu = match config.seed {
        Some(seed) => Emulator::with_seed(seed),
        None => Emulator::new(),
    };
    emu.load_program(&program)?;
    info!(rom = %rom.display(), len = program.len(), "program loaded");
    if enabled!(Level::DEBUG) {
        debug!("memory after load:\n{}", emu.mem.dump_regions());
    }

    let mut screen = Screen::new("chip8vm - ESC to exit", config.scale)?;
    let mut keyboard = Keyboard::new();
    let mut cadence = Cadence::new(config.timer_hz, Instant::now());
    let mut redraw = true;

    while screen.is_running() {
        let frames = cadence.ticks_due(Instant::now());
        if frames == 0 {
            std::thread::sleep(cadence.period() / 4);
            continue;
        }

        screen.poll_keys(&mut keyboard);
        let keypad: Option<&dyn Keypad> = Some(&keyboard);
        for _ in 0..frames {
            match emu.run(config.instructions_per_frame, keypad) {
                Ok(touched) => redraw |= touched,
                Err(e) => {
                    error!("halting: {e}");
                    return Err(e.into());
                }
            }
            emu.tick_timers();
        }

        if redraw {
            screen.sync(&emu.fb)?;
            redraw = false;
        } else {
            screen.update();
        }
    }
    info!("window closed");
    Ok(())
}
