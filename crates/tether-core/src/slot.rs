//! Device identity resolution.
//!
//! Maps raw input sources onto one of two logical player slots. Bindings are
//! insertion-ordered and permanent for the process lifetime:
//!
//! ```text
//! first device  ──> Primary
//! second device ──> Secondary
//! any later     ──> Primary (alias, nothing recorded)
//! ```
//!
//! Disconnects are not observable reliably on every host, so there is no
//! eviction. A device that reconnects with the same handle lands on its old
//! slot.

use std::{collections::HashMap, fmt};

/// Logical player-controller position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// First controller ever observed, and the alias for any extra ones.
    Primary,
    /// Second distinct controller.
    Secondary,
}

impl Slot {
    /// Numeric device index handed to the native core.
    pub fn index(self) -> u8 {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }
}

/// Opaque identity of a raw input source, stable while it stays connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(pub u32);

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device#{}", self.0)
    }
}

/// A physical input device as reported by the host.
///
/// The descriptor is for diagnostics only. Hosts derive it differently
/// depending on platform capability, so it never takes part in slot
/// assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    /// Connection-stable handle.
    pub handle: DeviceHandle,
    /// Human-readable descriptor for logs.
    pub descriptor: String,
}

impl InputDevice {
    /// Device with the given handle and descriptor.
    pub fn new(handle: u32, descriptor: impl Into<String>) -> Self {
        Self { handle: DeviceHandle(handle), descriptor: descriptor.into() }
    }
}

/// Two-slot device resolver.
///
/// # Invariants
///
/// - At most one handle is bound per slot.
/// - A bound handle always resolves to the same slot.
/// - Bindings are never removed.
#[derive(Debug, Clone, Default)]
pub struct SlotResolver {
    bound: HashMap<DeviceHandle, Slot>,
    primary: Option<DeviceHandle>,
    secondary: Option<DeviceHandle>,
}

impl SlotResolver {
    /// Resolver with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a device to its slot, binding it on first sight.
    ///
    /// Returns `None` when the event carried no device; the caller picks its
    /// own fallback.
    pub fn resolve(&mut self, device: Option<&InputDevice>) -> Option<Slot> {
        let device = device?;

        if let Some(slot) = self.bound.get(&device.handle) {
            return Some(*slot);
        }

        let slot = if self.primary.is_none() {
            self.primary = Some(device.handle);
            Slot::Primary
        } else if self.secondary.is_none() {
            self.secondary = Some(device.handle);
            Slot::Secondary
        } else {
            // Only two controllers are multiplexed; extras share the primary slot.
            tracing::debug!(handle = %device.handle, "extra input device aliased to primary slot");
            return Some(Slot::Primary);
        };

        self.bound.insert(device.handle, slot);
        tracing::info!(?slot, handle = %device.handle, descriptor = %device.descriptor, "input slot bound");
        Some(slot)
    }

    /// Handle bound to the given slot. `None` if the slot is still free.
    pub fn bound_to(&self, slot: Slot) -> Option<DeviceHandle> {
        match slot {
            Slot::Primary => self.primary,
            Slot::Secondary => self.secondary,
        }
    }

    /// Slot recorded for a handle, without binding.
    pub fn lookup(&self, handle: DeviceHandle) -> Option<Slot> {
        self.bound.get(&handle).copied()
    }

    /// Number of recorded bindings (0..=2).
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    /// True when no device has been bound yet.
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev(id: u32) -> InputDevice {
        InputDevice::new(id, format!("pad-{id}"))
    }

    #[test]
    fn binds_in_arrival_order() {
        let mut resolver = SlotResolver::new();

        assert_eq!(resolver.resolve(Some(&dev(7))), Some(Slot::Primary));
        assert_eq!(resolver.resolve(Some(&dev(3))), Some(Slot::Secondary));
        assert_eq!(resolver.bound_to(Slot::Primary), Some(DeviceHandle(7)));
        assert_eq!(resolver.bound_to(Slot::Secondary), Some(DeviceHandle(3)));
    }

    #[test]
    fn third_device_aliases_primary_without_binding() {
        let mut resolver = SlotResolver::new();
        let _ = resolver.resolve(Some(&dev(1)));
        let _ = resolver.resolve(Some(&dev(2)));

        assert_eq!(resolver.resolve(Some(&dev(3))), Some(Slot::Primary));
        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.lookup(DeviceHandle(3)), None);
        assert_eq!(resolver.bound_to(Slot::Primary), Some(DeviceHandle(1)));
    }

    #[test]
    fn missing_device_does_not_resolve() {
        let mut resolver = SlotResolver::new();
        assert_eq!(resolver.resolve(None), None);
        assert!(resolver.is_empty());
    }

    #[test]
    fn descriptor_does_not_affect_identity() {
        let mut resolver = SlotResolver::new();
        let _ = resolver.resolve(Some(&InputDevice::new(5, "a")));

        assert_eq!(resolver.resolve(Some(&InputDevice::new(5, "b"))), Some(Slot::Primary));
        assert_eq!(resolver.resolve(Some(&InputDevice::new(6, "a"))), Some(Slot::Secondary));
    }

    #[test]
    fn slot_index_matches_native_device_ids() {
        assert_eq!(Slot::Primary.index(), 0);
        assert_eq!(Slot::Secondary.index(), 1);
    }
}
