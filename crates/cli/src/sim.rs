//! Interactive editor on a simulated maple bus.
//!
//! Pre-attaches a controller and a rumble pack on the mock bus, renders
//! the editor to the terminal, and feeds line-buffered key input to the
//! controller. Each accepted key produces one pressed frame followed by
//! one released frame, so the editor's XOR edge detection behaves exactly
//! as it does on hardware.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use maple_bus_common::bus::mock::MockMapleBus;
use maple_bus_common::{Buttons, Function};
use maple_purupuru_protocol::EffectCommand;
use openrumble_editor::{Editor, Screen, TextColor, TextPos, Tick};
use openrumble_session::{DeviceSession, SessionConfig};
use serde_json::json;
use tracing::debug;

/// Terminal implementation of the editor's presentation sink. Draws are
/// buffered per frame and printed in position order on `present`.
#[derive(Debug, Default)]
struct TerminalScreen {
    runs: Vec<(f32, f32, TextColor, String)>,
}

impl Screen for TerminalScreen {
    fn clear(&mut self) {
        self.runs.clear();
    }

    fn draw_text(&mut self, pos: TextPos, color: TextColor, text: &str) {
        self.runs.push((pos.y, pos.x, color, text.to_string()));
    }

    fn present(&mut self) {
        // Clear the terminal and repaint the frame top to bottom.
        print!("\x1b[2J\x1b[H");
        self.runs
            .sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        for (_, _, color, text) in &self.runs {
            let styled = match color {
                TextColor::Normal => text.normal(),
                TextColor::Highlight => text.yellow().bold(),
                TextColor::Warning => text.red().bold(),
                TextColor::Dim => text.dimmed(),
            };
            println!("{styled}");
        }
        if let Err(err) = io::stdout().flush() {
            debug!(%err, "stdout flush failed");
        }
    }
}

/// Line-buffered key source: one key per line, each yielding a pressed
/// frame and then a released frame.
struct KeyFrames<R> {
    reader: R,
    pending_release: bool,
}

impl<R: BufRead> KeyFrames<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending_release: false,
        }
    }

    /// Next controller snapshot; `None` on end of input.
    fn next_frame(&mut self) -> Option<Buttons> {
        if self.pending_release {
            self.pending_release = false;
            return Some(Buttons::empty());
        }
        loop {
            let mut line = String::new();
            let read = self.reader.read_line(&mut line).ok()?;
            if read == 0 {
                return None; // EOF
            }
            let Some(key) = line.trim().chars().next() else {
                continue;
            };
            if let Some(buttons) = button_for_key(key) {
                self.pending_release = true;
                return Some(buttons);
            }
            println!(
                "{}",
                format!("unknown key '{key}' (h/l field, k/j value, p preset, s send, x stop, q quit)")
                    .yellow()
            );
        }
    }
}

fn button_for_key(key: char) -> Option<Buttons> {
    match key {
        'h' => Some(Buttons::DPAD_LEFT),
        'l' => Some(Buttons::DPAD_RIGHT),
        'k' => Some(Buttons::DPAD_UP),
        'j' => Some(Buttons::DPAD_DOWN),
        'p' => Some(Buttons::X),
        's' => Some(Buttons::A),
        'x' => Some(Buttons::B),
        'q' => Some(Buttons::START),
        _ => None,
    }
}

fn echo_sent(raw: u32, json: bool) {
    let cmd = EffectCommand::decode(raw);
    if json {
        println!("{}", json!({ "sent": format!("{raw:#010X}"), "fields": cmd }));
    } else {
        println!(
            "{} {}  {}",
            "sent".green().bold(),
            format!("{raw:#010X}").bold(),
            cmd
        );
    }
}

/// Run the interactive editor against the simulated bus.
pub fn run(frame_ms: u64, json: bool) -> Result<()> {
    let bus = MockMapleBus::new();
    let pad = bus.add_device(Function::Controller);
    let rumble = bus.add_device(Function::Rumble);

    let session = DeviceSession::with_config(bus.clone(), SessionConfig::default());
    let mut editor = Editor::new(session, TerminalScreen::default());
    let frame_delay = Duration::from_millis(frame_ms);

    println!(
        "{}",
        "Simulated session: controller and rumble pack attached.".dimmed()
    );
    println!(
        "{}",
        "Keys (one per line): h/l field, k/j value, p preset, s send, x stop, q quit.".dimmed()
    );

    // Initial frame before the first key arrives.
    editor.tick();

    let stdin = io::stdin();
    let mut keys = KeyFrames::new(stdin.lock());
    let mut seen = 0usize;

    loop {
        // End of input counts as a quit press.
        let frame = keys.next_frame().unwrap_or(Buttons::START);
        bus.set_buttons(pad, frame);
        let tick = editor.tick();

        let sent = bus.sent(rumble);
        for &raw in sent.iter().skip(seen) {
            echo_sent(raw, json);
        }
        seen = sent.len();

        if tick == Tick::Quit {
            break;
        }
        if !frame_delay.is_zero() {
            std::thread::sleep(frame_delay);
        }
    }

    // Session teardown stops the actuator; show that too.
    drop(editor);
    let sent = bus.sent(rumble);
    for &raw in sent.iter().skip(seen) {
        echo_sent(raw, json);
    }
    println!("{}", "Rumble stopped, bye.".dimmed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping_covers_every_editor_action() {
        assert_eq!(button_for_key('h'), Some(Buttons::DPAD_LEFT));
        assert_eq!(button_for_key('l'), Some(Buttons::DPAD_RIGHT));
        assert_eq!(button_for_key('k'), Some(Buttons::DPAD_UP));
        assert_eq!(button_for_key('j'), Some(Buttons::DPAD_DOWN));
        assert_eq!(button_for_key('p'), Some(Buttons::X));
        assert_eq!(button_for_key('s'), Some(Buttons::A));
        assert_eq!(button_for_key('x'), Some(Buttons::B));
        assert_eq!(button_for_key('q'), Some(Buttons::START));
        assert_eq!(button_for_key('?'), None);
    }

    #[test]
    fn key_frames_interleave_press_and_release() {
        let input = b"s\nq\n" as &[u8];
        let mut keys = KeyFrames::new(input);
        assert_eq!(keys.next_frame(), Some(Buttons::A));
        assert_eq!(keys.next_frame(), Some(Buttons::empty()));
        assert_eq!(keys.next_frame(), Some(Buttons::START));
        assert_eq!(keys.next_frame(), Some(Buttons::empty()));
        assert_eq!(keys.next_frame(), None);
    }

    #[test]
    fn key_frames_skip_blank_and_unknown_lines() {
        let input = b"\n \nz\nq\n" as &[u8];
        let mut keys = KeyFrames::new(input);
        assert_eq!(keys.next_frame(), Some(Buttons::START));
    }
}
