//! The frame loop.

use std::thread;
use std::time::Duration;

use maple_bus_common::{Function, MapleBus};
use maple_purupuru_protocol::Field;
use openrumble_session::DeviceSession;
use tracing::info;

use crate::{EditorAction, EditorState, Screen, TextColor, TextPos};

/// Help legend shown under the editor.
const HELP: [&str; 6] = [
    "Left/Right: select field",
    "Up/Down: change value",
    "A: send the effect",
    "B: stop the effect",
    "X: next preset",
    "Start: quit",
];

/// Outcome of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Keep looping.
    Continue,
    /// Operator asked to leave.
    Quit,
}

/// The interactive editor: session + screen + state, driven one frame at
/// a time.
///
/// Owns the [`DeviceSession`], so the session's drop contract (stop the
/// actuator if it is still attached) holds however the editor goes away.
#[derive(Debug)]
pub struct Editor<B: MapleBus, S: Screen> {
    session: DeviceSession<B>,
    screen: S,
    state: EditorState,
    frame_delay: Duration,
}

impl<B: MapleBus, S: Screen> Editor<B, S> {
    /// Editor with the default frame pacing.
    pub fn new(session: DeviceSession<B>, screen: S) -> Self {
        Self {
            session,
            screen,
            state: EditorState::new(),
            frame_delay: Duration::from_millis(16),
        }
    }

    /// Override the delay between frames. Tests use [`Duration::ZERO`].
    #[must_use]
    pub const fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Current editor state.
    #[must_use]
    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    /// The screen, for inspection.
    #[must_use]
    pub const fn screen(&self) -> &S {
        &self.screen
    }

    /// One frame: ensure peripherals, poll input, apply intents, redraw.
    ///
    /// When the controller has no reliable snapshot this frame, input
    /// handling is skipped (previous mask kept) but the frame still
    /// renders, exactly like the original tool.
    pub fn tick(&mut self) -> Tick {
        self.ensure_attached();

        let Some(buttons) = self.session.controller_buttons() else {
            self.render();
            return Tick::Continue;
        };

        let commands: Vec<_> = self.state.poll_commands(buttons).collect();
        for command in commands {
            match self.state.apply(command) {
                Some(EditorAction::Transmit(raw)) => {
                    info!(
                        raw = format_args!("{raw:#010x}"),
                        fields = %self.state.command(),
                        "sending effect"
                    );
                    self.session.send_effect(raw);
                }
                Some(EditorAction::TransmitStop) => {
                    info!("sending stop");
                    self.session.send_stop();
                }
                Some(EditorAction::Quit) => {
                    info!("quit requested");
                    return Tick::Quit;
                }
                None => {}
            }
        }

        self.render();
        Tick::Continue
    }

    /// Loop frames until the operator quits. The stop-on-exit guarantee
    /// is the session's drop contract, so it also covers unwinding.
    pub fn run(&mut self) {
        while self.tick() == Tick::Continue {
            thread::sleep(self.frame_delay);
        }
    }

    /// Block until both peripherals are attached, prompting on screen
    /// each poll cycle.
    fn ensure_attached(&mut self) {
        let Self { session, screen, .. } = self;
        for kind in [Function::Controller, Function::Rumble] {
            session.await_attached(kind, |kind| {
                screen.clear();
                screen.draw_text(
                    TextPos::new(40.0, 200.0),
                    TextColor::Normal,
                    &format!("Please attach a {kind}!"),
                );
                screen.present();
            });
        }
    }

    fn render(&mut self) {
        let Self { screen, state, .. } = self;
        screen.clear();
        screen.draw_text(
            TextPos::new(70.0, 70.0),
            TextColor::Normal,
            "OpenRumble effect editor",
        );
        screen.draw_text(
            TextPos::new(70.0, 110.0),
            TextColor::Normal,
            &format!("word: {:#010X}", state.raw()),
        );

        let mut y = 150.0;
        for field in Field::EDITABLE {
            let selected = field == state.selected_field();
            let color = if selected {
                TextColor::Highlight
            } else {
                TextColor::Normal
            };
            let marker = if selected { '>' } else { ' ' };
            screen.draw_text(
                TextPos::new(70.0, y),
                color,
                &format!("{marker} {:<5} = {}", field.name(), state.command().get(field)),
            );
            y += 25.0;
        }

        y += 15.0;
        if let Some(preset) = state.loaded_preset() {
            screen.draw_text(
                TextPos::new(70.0, y),
                TextColor::Normal,
                &format!("preset: {}", preset.label),
            );
            y += 25.0;
        }
        if state.command().inclination_warning() {
            screen.draw_text(
                TextPos::new(70.0, y),
                TextColor::Warning,
                "warning: inclination period is 0 with an envelope flag set",
            );
            y += 25.0;
        }

        y += 15.0;
        for line in HELP {
            screen.draw_text(TextPos::new(70.0, y), TextColor::Dim, line);
            y += 25.0;
        }

        screen.present();
    }
}
