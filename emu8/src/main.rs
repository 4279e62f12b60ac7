//! # Emu-8
//!
//! Runs a Chip-8 ROM in an SDL2 window.
//!
//! ```bash
//! emu8 roms/pong.ch8 --ips 700 --scale 12
//! ```
//!
//! Hold **Space** to run as fast as possible, press **Escape** to quit.
//! Logging is controlled with `RUST_LOG`; `RUST_LOG=emu8_core=trace` prints every instruction.
//! `--debug` also logs the keypad, registers and memory around the program counter.
use std::path::PathBuf;

use clap::Parser;

use emu8_core::constants::DEFAULT_CLOCK_SPEED;
use emu8_core::Quirks;

mod clock;
mod inspector;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "A Chip-8 interpreter", long_about = None)]
struct Args {
    #[arg(help = "Path to the ROM file to run")]
    rom: PathBuf,

    #[arg(
        long,
        default_value_t = DEFAULT_CLOCK_SPEED,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Instructions per second"
    )]
    ips: u32,

    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=40),
        help = "Window pixels per Chip-8 pixel"
    )]
    scale: u32,

    #[arg(long, help = "8xy6/8xyE shift Vy into Vx")]
    shift_uses_vy: bool,

    #[arg(long, help = "Bnnn jumps to nnn + Vx instead of nnn + V0")]
    jump_uses_vx: bool,

    #[arg(long, help = "Fx55/Fx65 advance I past the registers they transfer")]
    load_store_increments_i: bool,

    #[arg(long, help = "Log the keypad, registers and memory twice a second")]
    debug: bool,
}

impl Args {
    fn into_config(self) -> run::Config {
        run::Config {
            rom: self.rom,
            ips: self.ips,
            scale: self.scale,
            debug: self.debug,
            quirks: Quirks {
                shift_uses_vy: self.shift_uses_vy,
                jump_uses_vx: self.jump_uses_vx,
                load_store_increments_i: self.load_store_increments_i,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run::run(args.into_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Args::try_parse_from(["emu8", "pong.ch8"]).unwrap().into_config();
        assert_eq!(config.rom, PathBuf::from("pong.ch8"));
        assert_eq!(config.ips, DEFAULT_CLOCK_SPEED);
        assert_eq!(config.scale, 10);
        assert_eq!(config.quirks, Quirks::default());
        assert!(!config.debug);
    }

    #[test]
    fn test_debug_flag() {
        let config = Args::try_parse_from(["emu8", "--debug", "game.ch8"])
            .unwrap()
            .into_config();
        assert!(config.debug);
    }

    #[test]
    fn test_quirk_flags() {
        let config = Args::try_parse_from([
            "emu8",
            "--shift-uses-vy",
            "--load-store-increments-i",
            "--ips",
            "1000",
            "game.ch8",
        ])
        .unwrap()
        .into_config();
        assert!(config.quirks.shift_uses_vy);
        assert!(!config.quirks.jump_uses_vx);
        assert!(config.quirks.load_store_increments_i);
        assert_eq!(config.ips, 1000);
    }

    #[test]
    fn test_rejects_zero_ips() {
        assert!(Args::try_parse_from(["emu8", "--ips", "0", "game.ch8"]).is_err());
    }

    #[test]
    fn test_requires_rom() {
        assert!(Args::try_parse_from(["emu8"]).is_err());
    }
}
