//! Bus port trait and device handles.
//!
//! The trait is deliberately synchronous: the diagnostic tool is a
//! single-threaded cooperative loop whose only suspension point is a
//! sleep-based attach poll, so an async runtime would buy nothing here.

use crate::{Buttons, Function};

/// Opaque reference to an enumerated peripheral slot.
///
/// Handles are minted by the platform layer that implements [`MapleBus`];
/// the core only stores them, compares them and passes them back. A handle
/// outlives the device it names: after a physical detach it stays usable
/// as a key but [`MapleBus::is_valid`] reports false for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(u32);

impl DeviceHandle {
    /// Mint a handle for a platform slot. Only bus implementations should
    /// call this.
    #[must_use]
    pub const fn new(slot: u32) -> Self {
        Self(slot)
    }

    /// The raw slot index behind this handle.
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.0
    }
}

/// Synchronous port to the maple bus.
///
/// Implementations: the platform driver on real hardware, and
/// [`mock::MockMapleBus`] everywhere else. Absence of a device is a state,
/// not an error, so enumeration and state reads return `Option` and the
/// send is fire-and-forget: the bus either accepts a word or silently
/// drops it, and the difference is not observable from the host.
pub trait MapleBus {
    /// Enumerate the `index`-th attached device advertising `function`.
    fn enumerate(&mut self, index: usize, function: Function) -> Option<DeviceHandle>;

    /// Whether the handle still refers to an attached, valid unit.
    fn is_valid(&self, handle: DeviceHandle) -> bool;

    /// Current button snapshot for a controller handle.
    ///
    /// `None` when the device is detached or the driver has no reliable
    /// state this frame; callers skip the frame and keep their previous
    /// mask.
    fn controller_state(&mut self, handle: DeviceHandle) -> Option<Buttons>;

    /// Fire-and-forget transmission of a raw command word.
    fn send_raw(&mut self, handle: DeviceHandle, raw: u32);
}

pub mod mock {
    //! Shared-state fake bus for tests and the simulator.
    //!
    //! Clones share one interior state, so a test or the simulator can keep
    //! a control handle (to attach, detach and script button snapshots)
    //! while the session owns another clone as its bus.

    use std::sync::{Arc, Mutex};

    use super::{DeviceHandle, MapleBus};
    use crate::{Buttons, Function};

    #[derive(Debug)]
    struct MockDevice {
        function: Function,
        attached: bool,
        // None models a frame where the driver has no reliable snapshot.
        buttons: Option<Buttons>,
        sent: Vec<u32>,
    }

    /// Cloneable fake maple bus.
    #[derive(Debug, Clone, Default)]
    pub struct MockMapleBus {
        devices: Arc<Mutex<Vec<MockDevice>>>,
    }

    impl MockMapleBus {
        /// Empty bus with no devices plugged in.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        fn with_devices<T>(&self, f: impl FnOnce(&mut Vec<MockDevice>) -> T) -> T {
            let mut devices = self.devices.lock().unwrap_or_else(|e| e.into_inner());
            f(&mut devices)
        }

        /// Plug in an attached device advertising `function`.
        pub fn add_device(&self, function: Function) -> DeviceHandle {
            self.insert(function, true)
        }

        /// Plug in a device that starts detached (not enumerable until
        /// [`attach`](Self::attach) is called).
        pub fn add_detached(&self, function: Function) -> DeviceHandle {
            self.insert(function, false)
        }

        fn insert(&self, function: Function, attached: bool) -> DeviceHandle {
            self.with_devices(|devices| {
                devices.push(MockDevice {
                    function,
                    attached,
                    buttons: Some(Buttons::empty()),
                    sent: Vec::new(),
                });
                DeviceHandle::new((devices.len() - 1) as u32)
            })
        }

        /// Mark the device attached again (re-plug).
        pub fn attach(&self, handle: DeviceHandle) {
            self.with_devices(|devices| {
                if let Some(dev) = devices.get_mut(handle.slot() as usize) {
                    dev.attached = true;
                }
            });
        }

        /// Physically detach the device; its handle stays known but
        /// invalid.
        pub fn detach(&self, handle: DeviceHandle) {
            self.with_devices(|devices| {
                if let Some(dev) = devices.get_mut(handle.slot() as usize) {
                    dev.attached = false;
                }
            });
        }

        /// Script the controller snapshot returned on the next polls.
        pub fn set_buttons(&self, handle: DeviceHandle, buttons: Buttons) {
            self.with_devices(|devices| {
                if let Some(dev) = devices.get_mut(handle.slot() as usize) {
                    dev.buttons = Some(buttons);
                }
            });
        }

        /// Make the next polls report no reliable snapshot.
        pub fn clear_state(&self, handle: DeviceHandle) {
            self.with_devices(|devices| {
                if let Some(dev) = devices.get_mut(handle.slot() as usize) {
                    dev.buttons = None;
                }
            });
        }

        /// Every word transmitted to the device, in order.
        #[must_use]
        pub fn sent(&self, handle: DeviceHandle) -> Vec<u32> {
            self.with_devices(|devices| {
                devices
                    .get(handle.slot() as usize)
                    .map(|dev| dev.sent.clone())
                    .unwrap_or_default()
            })
        }
    }

    impl MapleBus for MockMapleBus {
        fn enumerate(&mut self, index: usize, function: Function) -> Option<DeviceHandle> {
            self.with_devices(|devices| {
                devices
                    .iter()
                    .enumerate()
                    .filter(|(_, dev)| dev.attached && dev.function == function)
                    .nth(index)
                    .map(|(slot, _)| DeviceHandle::new(slot as u32))
            })
        }

        fn is_valid(&self, handle: DeviceHandle) -> bool {
            self.with_devices(|devices| {
                devices
                    .get(handle.slot() as usize)
                    .is_some_and(|dev| dev.attached)
            })
        }

        fn controller_state(&mut self, handle: DeviceHandle) -> Option<Buttons> {
            self.with_devices(|devices| {
                let dev = devices.get(handle.slot() as usize)?;
                if !dev.attached || dev.function != Function::Controller {
                    return None;
                }
                dev.buttons
            })
        }

        fn send_raw(&mut self, handle: DeviceHandle, raw: u32) {
            self.with_devices(|devices| {
                // A detached device silently drops the word, like the bus.
                if let Some(dev) = devices.get_mut(handle.slot() as usize) {
                    if dev.attached {
                        dev.sent.push(raw);
                    }
                }
            });
        }
    }
}
