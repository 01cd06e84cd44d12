//! rumblectl - OpenRumble command-line tool
//!
//! Compose, inspect and send effect command words for the Dreamcast
//! vibration pack. The `decode`/`encode`/`presets` commands are pure
//! codec front ends; `simulate` runs the full interactive editor against
//! a simulated maple bus so the whole control loop can be exercised on a
//! development host.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod error;
mod output;
mod sim;

use clap::{Args, Parser, Subcommand};
use maple_purupuru_protocol::{EffectCommand, Field};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::parse_word;

#[derive(Parser)]
#[command(name = "rumblectl")]
#[command(about = "OpenRumble - compose, inspect and send rumble effect words")]
#[command(version)]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a 32-bit effect word into its fields
    Decode {
        /// The word, hex (0x10701A01) or decimal
        word: String,
    },

    /// Build an effect word from field values
    ///
    /// Values are applied through the constrained setters, so the output
    /// reflects the same normalization the editor performs: a nonzero
    /// --fpow wins over --bpow, --conv wins over --div, and the motor
    /// index is kept nonzero.
    Encode(EncodeArgs),

    /// List the built-in preset catalog
    Presets,

    /// Run the interactive editor against a simulated rumble pack
    ///
    /// A controller and a rumble pack are pre-attached on a fake bus.
    /// Keys (one per line): h/l select field, k/j change value,
    /// p next preset, s send, x stop, q quit.
    Simulate {
        /// Delay between editor frames in milliseconds
        #[arg(long, env = "RUMBLECTL_FRAME_MS", default_value_t = 0)]
        frame_ms: u64,
    },
}

#[derive(Args)]
struct EncodeArgs {
    /// Continuous vibration flag
    #[arg(long)]
    cont: bool,

    /// Motor/source index (1-15)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=15))]
    motor: u8,

    /// Backward-direction intensity (0-7)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=7))]
    bpow: u8,

    /// Divergent-envelope flag
    #[arg(long)]
    div: bool,

    /// Forward-direction intensity (0-7); overrides --bpow when nonzero
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=7))]
    fpow: u8,

    /// Convergent-envelope flag; overrides --div
    #[arg(long)]
    conv: bool,

    /// Vibration frequency (most packs respond to 4-59)
    #[arg(long, default_value_t = 0)]
    freq: u8,

    /// Inclination/decay period
    #[arg(long, default_value_t = 0)]
    inc: u8,
}

impl EncodeArgs {
    /// Run the values through the constrained setters in a fixed order,
    /// so the mutual-exclusion normalization is visible in the output.
    fn build(&self) -> EffectCommand {
        let mut cmd = EffectCommand::stop().set(Field::Motor, u32::from(self.motor));
        if self.cont {
            cmd = cmd.set(Field::Cont, 1);
        }
        cmd = cmd.set(Field::Bpow, u32::from(self.bpow));
        if self.div {
            cmd = cmd.set(Field::Div, 1);
        }
        cmd = cmd.set(Field::Fpow, u32::from(self.fpow));
        if self.conv {
            cmd = cmd.set(Field::Conv, 1);
        }
        cmd.set(Field::Freq, u32::from(self.freq))
            .set(Field::Inc, u32::from(self.inc))
    }
}

fn init_tracing(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "rumblectl={log_level},openrumble_editor={log_level},openrumble_session={log_level}"
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Decode { word } => {
            let raw = parse_word(word)?;
            output::print_word(raw, cli.json);
        }
        Commands::Encode(args) => {
            output::print_word(args.build().encode(), cli.json);
        }
        Commands::Presets => {
            output::print_presets(cli.json);
        }
        Commands::Simulate { frame_ms } => {
            sim::run(*frame_ms, cli.json)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(&cli) {
        if cli.json {
            output::print_error_json(&error);
        } else {
            output::print_error_human(&error);
        }
        std::process::exit(1);
    }
}
