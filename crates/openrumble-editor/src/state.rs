//! Editor state and edge-triggered command handling.

use maple_bus_common::Buttons;
use maple_purupuru_protocol::{EffectCommand, Field, Preset, catalog, cycle};
use tracing::debug;

/// An intent expressed by a newly pressed button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Move the field cursor left, wrapping.
    CursorPrev,
    /// Move the field cursor right, wrapping.
    CursorNext,
    /// Increment the selected field.
    FieldInc,
    /// Decrement the selected field.
    FieldDec,
    /// Copy the next catalog preset into the live word.
    LoadPreset,
    /// Transmit the live word.
    Send,
    /// Transmit the stop word.
    Stop,
    /// Leave the editor.
    Quit,
}

impl EditorCommand {
    /// Map newly pressed buttons to commands, in a fixed handling order.
    /// Simultaneous presses each produce their command, like the original
    /// per-button checks.
    pub fn from_pressed(pressed: Buttons) -> impl Iterator<Item = EditorCommand> {
        const MAPPING: [(Buttons, EditorCommand); 8] = [
            (Buttons::DPAD_LEFT, EditorCommand::CursorPrev),
            (Buttons::DPAD_RIGHT, EditorCommand::CursorNext),
            (Buttons::DPAD_UP, EditorCommand::FieldInc),
            (Buttons::DPAD_DOWN, EditorCommand::FieldDec),
            (Buttons::X, EditorCommand::LoadPreset),
            (Buttons::A, EditorCommand::Send),
            (Buttons::B, EditorCommand::Stop),
            (Buttons::START, EditorCommand::Quit),
        ];
        MAPPING
            .into_iter()
            .filter(move |(button, _)| pressed.contains(*button))
            .map(|(_, cmd)| cmd)
    }
}

/// An effect a command asks the surrounding loop to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Transmit this raw word to the actuator.
    Transmit(u32),
    /// Transmit the stop word.
    TransmitStop,
    /// Exit the loop.
    Quit,
}

/// Mutable editor state: cursor, live command word, preset marker and the
/// previous button snapshot for edge detection.
#[derive(Debug, Clone)]
pub struct EditorState {
    cursor: usize,
    prev_buttons: Buttons,
    command: EffectCommand,
    loaded_preset: Option<usize>,
    catalog_cursor: usize,
}

impl EditorState {
    /// Fresh state: stop word loaded, cursor on the first field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor: 0,
            prev_buttons: Buttons::empty(),
            command: EffectCommand::stop(),
            loaded_preset: None,
            catalog_cursor: 0,
        }
    }

    /// The live command word.
    #[must_use]
    pub const fn command(&self) -> &EffectCommand {
        &self.command
    }

    /// Raw value of the live command word.
    #[must_use]
    pub const fn raw(&self) -> u32 {
        self.command.encode()
    }

    /// The field the cursor is on.
    #[must_use]
    pub fn selected_field(&self) -> Field {
        Field::EDITABLE[self.cursor % Field::EDITABLE.len()]
    }

    /// Catalog entry behind the last preset load, until a manual edit
    /// clears the marker.
    #[must_use]
    pub fn loaded_preset(&self) -> Option<&'static Preset> {
        self.loaded_preset.and_then(|index| catalog().get(index))
    }

    /// Edge-detect a fresh button snapshot and yield the commands it
    /// triggers. Holding a button produces nothing after its first frame.
    pub fn poll_commands(&mut self, current: Buttons) -> impl Iterator<Item = EditorCommand> {
        let pressed = Buttons::newly_pressed(self.prev_buttons, current);
        self.prev_buttons = current;
        EditorCommand::from_pressed(pressed)
    }

    /// Apply one command; returns the action the loop must carry out, if
    /// any.
    pub fn apply(&mut self, command: EditorCommand) -> Option<EditorAction> {
        let field_count = Field::EDITABLE.len();
        match command {
            EditorCommand::CursorPrev => {
                self.cursor = (self.cursor + field_count - 1) % field_count;
                None
            }
            EditorCommand::CursorNext => {
                self.cursor = (self.cursor + 1) % field_count;
                None
            }
            EditorCommand::FieldInc => self.edit(1),
            EditorCommand::FieldDec => self.edit(-1),
            EditorCommand::LoadPreset => {
                let index = self.catalog_cursor;
                let preset = &catalog()[index];
                debug!(preset = preset.label, raw = format_args!("{:#010x}", preset.raw), "preset loaded");
                self.command = preset.command();
                self.loaded_preset = Some(index);
                self.catalog_cursor = cycle(index);
                None
            }
            EditorCommand::Send => Some(EditorAction::Transmit(self.raw())),
            EditorCommand::Stop => Some(EditorAction::TransmitStop),
            EditorCommand::Quit => Some(EditorAction::Quit),
        }
    }

    fn edit(&mut self, delta: i32) -> Option<EditorAction> {
        let field = self.selected_field();
        self.command = self.command.adjust(field, delta);
        // A manual edit means the word is no longer the loaded preset.
        self.loaded_preset = None;
        None
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
