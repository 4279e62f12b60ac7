use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Error};
use log::{debug, error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use emu8_core::constants::TIMER_FREQUENCY;
use emu8_core::{Chip8, Quirks};
use emu8_display::Display;

use crate::clock::Clock;
use crate::inspector::Inspector;
use crate::keymap::keypad;

/// Instructions executed per loop while fast forwarding
const FAST_FORWARD_BATCH: u32 = 1_000;

/// Longest stretch of wall-clock time a single loop will try to catch up on
const MAX_ELAPSED: Duration = Duration::from_millis(100);

/// How the emulator should run, as assembled from the command line
pub struct Config {
    pub rom: PathBuf,
    pub ips: u32,
    pub scale: u32,
    pub debug: bool,
    pub quirks: Quirks,
}

pub fn run(config: Config) -> anyhow::Result<()> {
    let mut chip8 = Chip8::with_quirks(config.quirks);

    // Load ROM
    let file = File::open(&config.rom)
        .with_context(|| format!("unable to open {}", config.rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", config.rom.display()))?;
    info!("successfully loaded {}", config.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, config.scale).map_err(Error::msg)?;
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    // Instructions and timers run off separate clocks
    let mut cpu_clock = Clock::new(config.ips);
    let mut timer_clock = Clock::new(TIMER_FREQUENCY);
    info!(
        "running at {} instructions per second with {:?} quirks",
        config.ips, config.quirks
    );
    debug!(
        "cpu period {:?}, timer period {:?}",
        cpu_clock.period(),
        timer_clock.period()
    );

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;
    let mut beeping = false;
    let mut last_cycle = Instant::now();
    let mut inspector = if config.debug {
        Some(Inspector::new())
    } else {
        None
    };

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } => fast_forward = true,
                Event::KeyUp {
                    keycode: Some(Keycode::Space),
                    ..
                } => {
                    fast_forward = false;
                    cpu_clock.reset();
                }
                _ => {}
            }
        }
        chip8.set_keys(keypad(&events.keyboard_state()));

        // Handle timing
        let current_time = Instant::now();
        let elapsed = (current_time - last_cycle).min(MAX_ELAPSED);
        last_cycle = current_time;

        // Update state
        let cycles = if fast_forward {
            FAST_FORWARD_BATCH
        } else {
            cpu_clock.ticks(elapsed)
        };
        for _ in 0..cycles {
            if let Err(e) = chip8.advance_cpu() {
                error!("halted at {}", chip8.snapshot());
                return Err(e.into());
            }
        }
        for _ in 0..timer_clock.ticks(elapsed) {
            if chip8.advance_timers() {
                debug!("sound timer ran out");
            }
        }

        if chip8.sound_active() != beeping {
            beeping = !beeping;
            if beeping {
                info!("beep");
            } else {
                info!("beep stopped");
            }
        }

        if let Some(inspector) = inspector.as_mut() {
            inspector.update(&chip8, elapsed);
        }

        // Only redraw when the frame buffer changed
        if let Some(frame) = chip8.get_frame() {
            display.render(frame).map_err(Error::msg)?;
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    info!("quitting");
    Ok(())
}
