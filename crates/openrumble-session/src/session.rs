//! The device session state machine.

use std::thread;

use maple_bus_common::{Buttons, DeviceHandle, Function, MapleBus};
use maple_purupuru_protocol::STOP_COMMAND;
use tracing::{debug, info};

use crate::SessionConfig;

/// Presence state of one logical peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// No valid handle; sends targeting this slot are no-ops.
    Unattached,
    /// Enumerated and last observed valid.
    Attached(DeviceHandle),
}

impl SlotState {
    /// The handle, if attached.
    #[must_use]
    pub const fn handle(self) -> Option<DeviceHandle> {
        match self {
            SlotState::Attached(handle) => Some(handle),
            SlotState::Unattached => None,
        }
    }
}

/// What became of a transmission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Handed to the bus (which may still silently drop it; that is not
    /// observable and not modeled).
    Sent,
    /// Actuator unattached at the validity check; nothing transmitted.
    Skipped,
}

/// Session over one controller and one rumble actuator.
///
/// Owns the bus. All operations are synchronous; the only blocking one is
/// [`await_attached`](Self::await_attached). Dropping the session sends
/// the stop word if the actuator is still attached and valid, so a
/// running effect never outlives the tool however it exits.
#[derive(Debug)]
pub struct DeviceSession<B: MapleBus> {
    bus: B,
    config: SessionConfig,
    controller: SlotState,
    rumble: SlotState,
}

impl<B: MapleBus> DeviceSession<B> {
    /// Session with the default poll cadence.
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, SessionConfig::default())
    }

    /// Session with explicit tuning (tests use a zero poll interval).
    pub fn with_config(bus: B, config: SessionConfig) -> Self {
        Self {
            bus,
            config,
            controller: SlotState::Unattached,
            rumble: SlotState::Unattached,
        }
    }

    /// Current presence state of a peripheral slot.
    #[must_use]
    pub fn state(&self, kind: Function) -> SlotState {
        match kind {
            Function::Controller => self.controller,
            Function::Rumble => self.rumble,
        }
    }

    fn slot_mut(&mut self, kind: Function) -> &mut SlotState {
        match kind {
            Function::Controller => &mut self.controller,
            Function::Rumble => &mut self.rumble,
        }
    }

    /// Re-check validity of both slots, demoting detached peripherals.
    pub fn refresh(&mut self) {
        for kind in [Function::Controller, Function::Rumble] {
            if let SlotState::Attached(handle) = self.state(kind) {
                if !self.bus.is_valid(handle) {
                    info!(peripheral = %kind, "peripheral detached");
                    *self.slot_mut(kind) = SlotState::Unattached;
                }
            }
        }
    }

    /// Block until the peripheral is attached and valid.
    ///
    /// Re-polls enumeration at the configured interval; `prompt` runs once
    /// per poll cycle while the peripheral is absent, so the caller can
    /// keep a "please attach" message on screen. Returns immediately when
    /// the slot already holds a valid handle. There is no cancellation:
    /// the tool cannot do anything useful until the hardware exists.
    pub fn await_attached(&mut self, kind: Function, mut prompt: impl FnMut(Function)) -> DeviceHandle {
        if let SlotState::Attached(handle) = self.state(kind) {
            if self.bus.is_valid(handle) {
                return handle;
            }
            info!(peripheral = %kind, "peripheral detached");
            *self.slot_mut(kind) = SlotState::Unattached;
        }

        loop {
            prompt(kind);
            if let Some(handle) = self.bus.enumerate(0, kind) {
                if self.bus.is_valid(handle) {
                    info!(peripheral = %kind, slot = handle.slot(), "peripheral attached");
                    *self.slot_mut(kind) = SlotState::Attached(handle);
                    return handle;
                }
            }
            thread::sleep(self.config.poll_interval);
        }
    }

    /// Button snapshot from the attached controller; `None` when the
    /// controller is unattached or the bus has no reliable state this
    /// frame. Callers skip the frame.
    pub fn controller_buttons(&mut self) -> Option<Buttons> {
        let handle = self.controller.handle()?;
        self.bus.controller_state(handle)
    }

    /// Transmit a raw effect word to the actuator, fire-and-forget.
    ///
    /// Validity is checked immediately before the send; a detach racing in
    /// after the check is tolerated and unobserved. When the actuator is
    /// unattached the request is silently skipped, not an error.
    pub fn send_effect(&mut self, raw: u32) -> SendOutcome {
        match self.rumble {
            SlotState::Attached(handle) if self.bus.is_valid(handle) => {
                self.bus.send_raw(handle, raw);
                debug!(raw = format_args!("{raw:#010x}"), "effect transmitted");
                SendOutcome::Sent
            }
            _ => {
                debug!(raw = format_args!("{raw:#010x}"), "send skipped, actuator unattached");
                SendOutcome::Skipped
            }
        }
    }

    /// Transmit the canonical stop word (`motor = 1`, all else zero).
    /// Never the all-zero word: `motor = 0` is invalid on the hardware.
    pub fn send_stop(&mut self) -> SendOutcome {
        self.send_effect(STOP_COMMAND)
    }
}

impl<B: MapleBus> Drop for DeviceSession<B> {
    /// The shutdown contract: a still-attached actuator is left stopped,
    /// whatever path tore the session down.
    fn drop(&mut self) {
        if let SlotState::Attached(handle) = self.rumble {
            if self.bus.is_valid(handle) {
                self.bus.send_raw(handle, STOP_COMMAND);
                debug!("stop effect sent on session teardown");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use maple_bus_common::bus::mock::MockMapleBus;
    use std::time::Duration;

    use super::*;

    fn quick_config() -> SessionConfig {
        SessionConfig::default().with_poll_interval(Duration::ZERO)
    }

    #[test]
    fn await_attached_returns_immediately_when_present() {
        let bus = MockMapleBus::new();
        let pad = bus.add_device(Function::Controller);

        let mut session = DeviceSession::with_config(bus, quick_config());
        let mut prompts = 0;
        let handle = session.await_attached(Function::Controller, |_| prompts += 1);

        assert_eq!(handle, pad);
        assert_eq!(prompts, 1, "one poll cycle, one prompt");
        assert_eq!(session.state(Function::Controller), SlotState::Attached(pad));
    }

    #[test]
    fn await_attached_polls_and_prompts_until_plug_in() {
        let bus = MockMapleBus::new();
        let rumble = bus.add_detached(Function::Rumble);

        let control = bus.clone();
        let mut session = DeviceSession::with_config(bus, quick_config());
        let mut prompts = 0;
        let handle = session.await_attached(Function::Rumble, |kind| {
            assert_eq!(kind, Function::Rumble);
            prompts += 1;
            // Operator plugs the pack in on the third prompt.
            if prompts == 3 {
                control.attach(rumble);
            }
        });

        assert_eq!(handle, rumble);
        assert_eq!(prompts, 3);
    }

    #[test]
    fn await_attached_fast_path_skips_prompt() {
        let bus = MockMapleBus::new();
        bus.add_device(Function::Controller);

        let mut session = DeviceSession::with_config(bus, quick_config());
        session.await_attached(Function::Controller, |_| {});

        // Already attached and still valid: no prompt at all.
        session.await_attached(Function::Controller, |_| {
            panic!("prompt must not run when the slot is already valid")
        });
    }

    #[test]
    fn refresh_demotes_detached_peripherals() {
        let bus = MockMapleBus::new();
        let pad = bus.add_device(Function::Controller);

        let control = bus.clone();
        let mut session = DeviceSession::with_config(bus, quick_config());
        session.await_attached(Function::Controller, |_| {});

        control.detach(pad);
        session.refresh();
        assert_eq!(session.state(Function::Controller), SlotState::Unattached);
        assert_eq!(session.controller_buttons(), None);
    }

    #[test]
    fn send_effect_reaches_attached_actuator() {
        let bus = MockMapleBus::new();
        let rumble = bus.add_device(Function::Rumble);

        let control = bus.clone();
        let mut session = DeviceSession::with_config(bus, quick_config());
        session.await_attached(Function::Rumble, |_| {});

        assert_eq!(session.send_effect(0x1070_1A01), SendOutcome::Sent);
        assert_eq!(session.send_stop(), SendOutcome::Sent);
        // Teardown sends one more stop because the actuator is attached.
        drop(session);
        assert_eq!(
            control.sent(rumble),
            vec![0x1070_1A01, STOP_COMMAND, STOP_COMMAND]
        );
    }

    #[test]
    fn send_is_skipped_while_unattached() {
        let bus = MockMapleBus::new();
        let rumble = bus.add_device(Function::Rumble);

        let control = bus.clone();
        let mut session = DeviceSession::with_config(bus, quick_config());
        session.await_attached(Function::Rumble, |_| {});

        control.detach(rumble);
        assert_eq!(session.send_effect(0x1070_1A01), SendOutcome::Skipped);
        assert_eq!(session.send_stop(), SendOutcome::Skipped);
        assert_eq!(control.sent(rumble), Vec::<u32>::new());
    }

    #[test]
    fn drop_sends_stop_only_if_still_attached() {
        let bus = MockMapleBus::new();
        let rumble = bus.add_device(Function::Rumble);

        let control = bus.clone();
        let session = {
            let mut s = DeviceSession::with_config(bus, quick_config());
            s.await_attached(Function::Rumble, |_| {});
            s
        };
        drop(session);
        assert_eq!(control.sent(rumble), vec![STOP_COMMAND]);
    }

    #[test]
    fn drop_is_silent_when_never_attached() {
        let bus = MockMapleBus::new();
        let rumble = bus.add_device(Function::Rumble);

        let control = bus.clone();
        let session = DeviceSession::with_config(bus, quick_config());
        drop(session);
        assert_eq!(control.sent(rumble), Vec::<u32>::new());
    }

    #[test]
    fn drop_is_silent_after_detach() {
        let bus = MockMapleBus::new();
        let rumble = bus.add_device(Function::Rumble);

        let control = bus.clone();
        let mut session = DeviceSession::with_config(bus, quick_config());
        session.await_attached(Function::Rumble, |_| {});
        control.detach(rumble);
        drop(session);
        assert_eq!(control.sent(rumble), Vec::<u32>::new());
    }

    #[test]
    fn reattach_after_detach_restores_sends() {
        let bus = MockMapleBus::new();
        let rumble = bus.add_device(Function::Rumble);

        let control = bus.clone();
        let mut session = DeviceSession::with_config(bus, quick_config());
        session.await_attached(Function::Rumble, |_| {});

        control.detach(rumble);
        session.refresh();
        assert_eq!(session.send_stop(), SendOutcome::Skipped);

        control.attach(rumble);
        session.await_attached(Function::Rumble, |_| {});
        assert_eq!(session.send_effect(0x1110_2805), SendOutcome::Sent);
        assert_eq!(control.sent(rumble), vec![0x1110_2805]);
    }
}
