//! Input routing.
//!
//! Turns raw host input into [`NativeInput`] calls for the native core. Keys
//! and joystick axes are tagged with the player [`Slot`] of their device;
//! touch and pointing devices are never multiplexed into slots.
//!
//! Routing never fails. Unclassifiable keys fall back to the primary slot,
//! and motion without a recognized source is reported as unhandled so the
//! host can run its default handling.

use crate::{
    native::NativeCore,
    slot::{InputDevice, Slot, SlotResolver},
};

/// Host key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub i32);

impl KeyCode {
    /// Menu key.
    pub const MENU: Self = Self(82);
    /// Back / navigate-up key.
    pub const BACK: Self = Self(4);
    /// Volume up.
    pub const VOLUME_UP: Self = Self(24);
    /// Volume down.
    pub const VOLUME_DOWN: Self = Self(25);
    /// Volume mute.
    pub const VOLUME_MUTE: Self = Self(164);

    /// Keys forwarded to the native core that must also reach the host's
    /// default handling (navigation, volume UI).
    pub fn is_pass_through(self) -> bool {
        matches!(
            self,
            Self::BACK | Self::VOLUME_UP | Self::VOLUME_DOWN | Self::VOLUME_MUTE | Self::MENU
        )
    }
}

/// Key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key pressed.
    Down,
    /// Key released.
    Up,
}

/// Host axis identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(pub i32);

impl AxisId {
    /// Left stick horizontal.
    pub const X: Self = Self(0);
    /// Left stick vertical.
    pub const Y: Self = Self(1);
    /// Right stick horizontal.
    pub const Z: Self = Self(11);
    /// Right stick vertical.
    pub const RZ: Self = Self(14);
    /// Hat horizontal.
    pub const HAT_X: Self = Self(15);
    /// Hat vertical.
    pub const HAT_Y: Self = Self(16);
    /// Left analog trigger.
    pub const LTRIGGER: Self = Self(17);
    /// Right analog trigger.
    pub const RTRIGGER: Self = Self(18);
}

/// Touch pointer identifier, stable for the duration of one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// Touch phase delivered to the native core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// Pointer went down.
    Down,
    /// Pointer lifted.
    Up,
    /// Pointer moved (or is merely reported alongside another pointer).
    Move,
}

impl TouchPhase {
    /// Wire code used by native touch handlers.
    pub fn code(self) -> i32 {
        match self {
            Self::Down => 1,
            Self::Up => 2,
            Self::Move => 3,
        }
    }
}

/// One call into the native core produced by routing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeInput {
    /// Key transition on a slot.
    Key {
        /// Resolved player slot.
        slot: Slot,
        /// Host key code.
        code: KeyCode,
        /// Press or release.
        action: KeyAction,
    },
    /// Joystick axis sample on a slot.
    Axis {
        /// Resolved player slot.
        slot: Slot,
        /// Axis identifier.
        axis: AxisId,
        /// Value, conventionally within `[-1, 1]`.
        value: f32,
    },
    /// Touch sample in raw surface coordinates.
    Touch {
        /// Surface x.
        x: f32,
        /// Surface y.
        y: f32,
        /// Phase of this pointer.
        phase: TouchPhase,
        /// Pointer identifier.
        pointer: PointerId,
    },
    /// Scroll wheel from a pointing device.
    MouseWheel {
        /// Horizontal scroll.
        x: f32,
        /// Vertical scroll.
        y: f32,
    },
    /// Accelerometer sample.
    Accelerometer {
        /// X acceleration.
        x: f32,
        /// Y acceleration.
        y: f32,
        /// Z acceleration.
        z: f32,
    },
}

impl NativeInput {
    /// Deliver this input to the native core.
    pub fn deliver<N: NativeCore + ?Sized>(&self, native: &mut N) {
        match *self {
            Self::Key { slot, code, action: KeyAction::Down } => native.key_down(slot, code),
            Self::Key { slot, code, action: KeyAction::Up } => native.key_up(slot, code),
            Self::Axis { slot, axis, value } => native.joystick_axis(slot, axis, value),
            Self::Touch { x, y, phase, pointer } => native.touch(x, y, phase, pointer),
            Self::MouseWheel { x, y } => native.mouse_wheel(x, y),
            Self::Accelerometer { x, y, z } => native.accelerometer(x, y, z),
        }
    }
}

/// Source classes of a motion event, as a bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSource(pub u32);

impl InputSource {
    /// Pointing device class (mouse, stylus, touch surface).
    pub const POINTER: Self = Self(0x0000_0002);
    /// Joystick class (gamepad sticks and triggers).
    pub const JOYSTICK: Self = Self(0x0100_0010);

    /// True if every bit of `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two sources.
    #[must_use]
    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Pointer sub-event of a generic motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAction {
    /// Hover movement without contact.
    HoverMove,
    /// Scroll wheel.
    Scroll,
    /// Anything else.
    Other,
}

/// Generic (non-touch) motion event.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    /// Source classes.
    pub source: InputSource,
    /// Originating device, if the host reported one.
    pub device: Option<InputDevice>,
    /// Pointer sub-event kind.
    pub action: MotionAction,
    /// Axis values for joystick sources, in host order.
    pub axes: Vec<(AxisId, f32)>,
    /// Pointer x (scroll amount for scroll events).
    pub x: f32,
    /// Pointer y (scroll amount for scroll events).
    pub y: f32,
}

impl MotionEvent {
    /// Joystick event from a device.
    pub fn joystick(device: InputDevice, axes: Vec<(AxisId, f32)>) -> Self {
        Self {
            source: InputSource::JOYSTICK,
            device: Some(device),
            action: MotionAction::Other,
            axes,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Pointer event (hover or scroll) at the given position.
    pub fn pointer(action: MotionAction, x: f32, y: f32) -> Self {
        Self { source: InputSource::POINTER, device: None, action, axes: Vec::new(), x, y }
    }
}

/// Masked touch action of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// First pointer down.
    Down,
    /// Additional pointer down.
    PointerDown,
    /// Last pointer up.
    Up,
    /// Non-last pointer up.
    PointerUp,
    /// Pointers moved.
    Move,
    /// Gesture aborted by the host.
    Cancel,
}

/// One pointer reported in a touch batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPointer {
    /// Pointer identifier.
    pub id: PointerId,
    /// Surface x.
    pub x: f32,
    /// Surface y.
    pub y: f32,
}

/// Multi-touch event as delivered by the host: one action for the whole
/// batch, applying to the pointer at `action_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchBatch {
    /// Masked action.
    pub action: TouchAction,
    /// Index within `pointers` the action refers to.
    pub action_index: usize,
    /// All pointers currently reported.
    pub pointers: Vec<TouchPointer>,
}

/// Outcome of routing a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRouting {
    /// Call to forward to the native core.
    pub input: NativeInput,
    /// Host default handling must also run.
    pub pass_through: bool,
}

impl KeyRouting {
    /// True when the key is fully consumed by the bridge.
    pub fn handled(&self) -> bool {
        !self.pass_through
    }
}

/// Outcome of routing a generic motion event.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionRouting {
    /// Consumed; forward these calls (possibly none).
    Forwarded(Vec<NativeInput>),
    /// Not recognized; the host should run its default handling.
    Unhandled,
}

impl MotionRouting {
    /// True when the event was consumed.
    pub fn handled(&self) -> bool {
        matches!(self, Self::Forwarded(_))
    }
}

/// Input router. Owns the slot resolver; used only from the UI thread.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    resolver: SlotResolver,
}

impl InputRouter {
    /// Router with an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a key event. Keys without a device go to the primary slot.
    pub fn route_key(
        &mut self,
        device: Option<&InputDevice>,
        code: KeyCode,
        action: KeyAction,
    ) -> KeyRouting {
        let slot = self.resolver.resolve(device).unwrap_or(Slot::Primary);
        KeyRouting {
            input: NativeInput::Key { slot, code, action },
            pass_through: code.is_pass_through(),
        }
    }

    /// Route a generic motion event.
    ///
    /// Joystick sources fan out into one axis call per reported axis on the
    /// device's slot. Pointing devices bypass slot resolution: hover is
    /// consumed, scroll becomes a wheel call.
    pub fn route_motion(&mut self, event: &MotionEvent) -> MotionRouting {
        if event.source.contains(InputSource::JOYSTICK) {
            let Some(slot) = self.resolver.resolve(event.device.as_ref()) else {
                tracing::warn!("joystick event without input device");
                return MotionRouting::Unhandled;
            };
            let inputs = event
                .axes
                .iter()
                .map(|&(axis, value)| NativeInput::Axis { slot, axis, value })
                .collect();
            return MotionRouting::Forwarded(inputs);
        }

        if event.source.contains(InputSource::POINTER) {
            return match event.action {
                MotionAction::HoverMove => MotionRouting::Forwarded(Vec::new()),
                MotionAction::Scroll => {
                    MotionRouting::Forwarded(vec![NativeInput::MouseWheel { x: event.x, y: event.y }])
                },
                MotionAction::Other => MotionRouting::Unhandled,
            };
        }

        MotionRouting::Unhandled
    }

    /// Route a touch batch into one call per pointer with a phase.
    ///
    /// Down/up applies only to the pointer at the action index; every other
    /// pointer in the batch is reported as a move. Cancelled batches produce
    /// nothing.
    pub fn route_touch(&self, batch: &TouchBatch) -> Vec<NativeInput> {
        batch
            .pointers
            .iter()
            .enumerate()
            .filter_map(|(index, pointer)| {
                let phase = touch_phase(batch.action, index == batch.action_index)?;
                Some(NativeInput::Touch { x: pointer.x, y: pointer.y, phase, pointer: pointer.id })
            })
            .collect()
    }

    /// Route an accelerometer sample.
    pub fn route_accelerometer(&self, x: f32, y: f32, z: f32) -> NativeInput {
        NativeInput::Accelerometer { x, y, z }
    }

    /// Device-to-slot bindings observed so far.
    pub fn resolver(&self) -> &SlotResolver {
        &self.resolver
    }
}

fn touch_phase(action: TouchAction, is_action_pointer: bool) -> Option<TouchPhase> {
    match action {
        TouchAction::Down | TouchAction::PointerDown if is_action_pointer => Some(TouchPhase::Down),
        TouchAction::Up | TouchAction::PointerUp if is_action_pointer => Some(TouchPhase::Up),
        TouchAction::Down | TouchAction::PointerDown | TouchAction::Up | TouchAction::PointerUp => {
            Some(TouchPhase::Move)
        },
        TouchAction::Move => Some(TouchPhase::Move),
        TouchAction::Cancel => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(id: u32) -> InputDevice {
        InputDevice::new(id, format!("pad-{id}"))
    }

    fn pointer(id: i32, x: f32, y: f32) -> TouchPointer {
        TouchPointer { id: PointerId(id), x, y }
    }

    #[test]
    fn key_without_device_goes_to_primary() {
        let mut router = InputRouter::new();
        let _ = router.route_key(Some(&pad(1)), KeyCode(96), KeyAction::Down);
        let _ = router.route_key(Some(&pad(2)), KeyCode(96), KeyAction::Down);

        let routing = router.route_key(None, KeyCode(97), KeyAction::Up);
        assert_eq!(routing.input, NativeInput::Key {
            slot: Slot::Primary,
            code: KeyCode(97),
            action: KeyAction::Up
        });
        assert!(routing.handled());
    }

    #[test]
    fn pass_through_keys_are_forwarded_and_flagged() {
        let mut router = InputRouter::new();
        let _ = router.route_key(Some(&pad(1)), KeyCode(96), KeyAction::Down);

        for code in [
            KeyCode::BACK,
            KeyCode::VOLUME_UP,
            KeyCode::VOLUME_DOWN,
            KeyCode::VOLUME_MUTE,
            KeyCode::MENU,
        ] {
            let routing = router.route_key(Some(&pad(2)), code, KeyAction::Down);
            assert!(routing.pass_through, "{code:?}");
            assert!(matches!(routing.input, NativeInput::Key { slot: Slot::Secondary, .. }));
        }
    }

    #[test]
    fn joystick_fans_out_per_axis_on_device_slot() {
        let mut router = InputRouter::new();
        let _ = router.route_key(Some(&pad(1)), KeyCode(96), KeyAction::Down);

        let event = MotionEvent::joystick(pad(9), vec![(AxisId::X, 0.5), (AxisId::RZ, -1.0)]);
        let routing = router.route_motion(&event);

        assert_eq!(
            routing,
            MotionRouting::Forwarded(vec![
                NativeInput::Axis { slot: Slot::Secondary, axis: AxisId::X, value: 0.5 },
                NativeInput::Axis { slot: Slot::Secondary, axis: AxisId::RZ, value: -1.0 },
            ])
        );
    }

    #[test]
    fn joystick_without_device_is_unhandled() {
        let mut router = InputRouter::new();
        let mut event = MotionEvent::joystick(pad(1), vec![(AxisId::X, 1.0)]);
        event.device = None;

        assert_eq!(router.route_motion(&event), MotionRouting::Unhandled);
        assert!(router.resolver().is_empty());
    }

    #[test]
    fn pointer_motion_bypasses_slots() {
        let mut router = InputRouter::new();

        let scroll = router.route_motion(&MotionEvent::pointer(MotionAction::Scroll, 0.0, -1.0));
        assert_eq!(scroll, MotionRouting::Forwarded(vec![NativeInput::MouseWheel { x: 0.0, y: -1.0 }]));

        let hover = router.route_motion(&MotionEvent::pointer(MotionAction::HoverMove, 3.0, 4.0));
        assert_eq!(hover, MotionRouting::Forwarded(Vec::new()));

        let other = router.route_motion(&MotionEvent::pointer(MotionAction::Other, 3.0, 4.0));
        assert!(!other.handled());
        assert!(router.resolver().is_empty());
    }

    #[test]
    fn unknown_source_is_unhandled() {
        let mut router = InputRouter::new();
        let mut event = MotionEvent::pointer(MotionAction::Scroll, 1.0, 1.0);
        event.source = InputSource(0x0000_0101);

        assert_eq!(router.route_motion(&event), MotionRouting::Unhandled);
    }

    #[test]
    fn pointer_down_marks_only_action_index() {
        let router = InputRouter::new();
        let batch = TouchBatch {
            action: TouchAction::PointerDown,
            action_index: 0,
            pointers: vec![pointer(0, 10.0, 20.0), pointer(1, 30.0, 40.0)],
        };

        assert_eq!(router.route_touch(&batch), vec![
            NativeInput::Touch { x: 10.0, y: 20.0, phase: TouchPhase::Down, pointer: PointerId(0) },
            NativeInput::Touch { x: 30.0, y: 40.0, phase: TouchPhase::Move, pointer: PointerId(1) },
        ]);
    }

    #[test]
    fn pointer_up_on_second_index() {
        let router = InputRouter::new();
        let batch = TouchBatch {
            action: TouchAction::PointerUp,
            action_index: 1,
            pointers: vec![pointer(4, 1.0, 1.0), pointer(7, 2.0, 2.0)],
        };

        let phases: Vec<_> = router
            .route_touch(&batch)
            .into_iter()
            .filter_map(|input| match input {
                NativeInput::Touch { phase, pointer, .. } => Some((pointer, phase)),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec![(PointerId(4), TouchPhase::Move), (PointerId(7), TouchPhase::Up)]);
    }

    #[test]
    fn cancelled_batch_is_skipped() {
        let router = InputRouter::new();
        let batch =
            TouchBatch { action: TouchAction::Cancel, action_index: 0, pointers: vec![pointer(0, 0.0, 0.0)] };

        assert!(router.route_touch(&batch).is_empty());
    }

    #[test]
    fn touch_phase_codes() {
        assert_eq!(TouchPhase::Down.code(), 1);
        assert_eq!(TouchPhase::Up.code(), 2);
        assert_eq!(TouchPhase::Move.code(), 3);
    }
}
