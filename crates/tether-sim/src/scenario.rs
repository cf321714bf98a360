//! Line-oriented scenario scripts.
//!
//! One step per line. Blank lines are skipped, and a `#` at the start of a
//! word begins a comment:
//!
//! ```text
//! create | resume | pause | destroy | config-changed
//! key <device|-> <code> down|up
//! axis <device> <axis>=<value> [...]
//! scroll <x> <y>
//! hover <x> <y>
//! touch <down|pointer-down|up|pointer-up|move|cancel> <index> <id>:<x>,<y> [...]
//! accel <x> <y> <z>
//! command <name> [parameter...]
//! confirm <text...>
//! cancel
//! ```
//!
//! Axis names are `x`, `y`, `z`, `rz`, `hat-x`, `hat-y`, `ltrigger` and
//! `rtrigger`; any other axis is given by its numeric host id.

use std::str::{FromStr, SplitWhitespace};

use tether_app::BridgeEvent;
use tether_core::{
    AxisId, InputDevice, KeyAction, KeyCode, LifecycleEvent, MotionAction, MotionEvent,
    PendingCommand, PointerId, TouchAction, TouchBatch, TouchPointer,
};

use crate::ScenarioError;

/// One scripted step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Post an event to the bridge queue.
    Event(BridgeEvent),
    /// Confirm the oldest open prompt with this text.
    Confirm(String),
    /// Cancel the oldest open prompt.
    Cancel,
}

/// Parse a whole script.
pub fn parse_script(script: &str) -> Result<Vec<Step>, ScenarioError> {
    let mut steps = Vec::new();
    for (index, raw) in script.lines().enumerate() {
        if let Some(step) = parse_line(index + 1, raw)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Parse one line. `None` for blank lines and comments.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<Step>, ScenarioError> {
    let mut words = strip_comment(raw).split_whitespace();
    let Some(directive) = words.next() else {
        return Ok(None);
    };
    let mut args = Args { line, words };

    let step = match directive {
        "create" => lifecycle(LifecycleEvent::Create),
        "resume" => lifecycle(LifecycleEvent::Resume),
        "pause" => lifecycle(LifecycleEvent::Pause),
        "destroy" => lifecycle(LifecycleEvent::Destroy),
        "config-changed" => lifecycle(LifecycleEvent::ConfigurationChanged),
        "key" => {
            let device = args.device()?;
            let code = KeyCode(args.number("key code")?);
            let action = match args.word("key action")? {
                "down" => KeyAction::Down,
                "up" => KeyAction::Up,
                other => return Err(args.invalid("key action", other)),
            };
            Step::Event(BridgeEvent::Key { device, code, action })
        },
        "axis" => {
            let device = args.device()?.ok_or(ScenarioError::MissingArgument {
                line,
                what: "joystick device",
            })?;
            let axes = args.words.by_ref().map(|w| axis(line, w)).collect::<Result<Vec<_>, _>>()?;
            Step::Event(BridgeEvent::Motion(MotionEvent::joystick(device, axes)))
        },
        "scroll" | "hover" => {
            let action =
                if directive == "scroll" { MotionAction::Scroll } else { MotionAction::HoverMove };
            let x = args.number("x")?;
            let y = args.number("y")?;
            Step::Event(BridgeEvent::Motion(MotionEvent::pointer(action, x, y)))
        },
        "touch" => {
            let action = match args.word("touch action")? {
                "down" => TouchAction::Down,
                "pointer-down" => TouchAction::PointerDown,
                "up" => TouchAction::Up,
                "pointer-up" => TouchAction::PointerUp,
                "move" => TouchAction::Move,
                "cancel" => TouchAction::Cancel,
                other => return Err(args.invalid("touch action", other)),
            };
            let action_index = args.number("action index")?;
            let pointers =
                args.words.by_ref().map(|w| pointer(line, w)).collect::<Result<Vec<_>, _>>()?;
            Step::Event(BridgeEvent::Touch(TouchBatch { action, action_index, pointers }))
        },
        "accel" => {
            let x = args.number("x")?;
            let y = args.number("y")?;
            let z = args.number("z")?;
            Step::Event(BridgeEvent::Accelerometer { x, y, z })
        },
        "command" => {
            let name = args.word("command name")?;
            let parameter = args.rest();
            Step::Event(BridgeEvent::Command(PendingCommand::new(name, parameter)))
        },
        "confirm" => Step::Confirm(args.rest()),
        "cancel" => Step::Cancel,
        other => {
            return Err(ScenarioError::UnknownDirective { line, word: other.to_owned() });
        },
    };
    Ok(Some(step))
}

/// A comment starts at a `#` that begins a word.
fn strip_comment(raw: &str) -> &str {
    if raw.trim_start().starts_with('#') {
        return "";
    }
    raw.find(" #").map_or(raw, |at| &raw[..at])
}

fn lifecycle(event: LifecycleEvent) -> Step {
    Step::Event(BridgeEvent::Lifecycle(event))
}

struct Args<'a> {
    line: usize,
    words: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn word(&mut self, what: &'static str) -> Result<&'a str, ScenarioError> {
        self.words.next().ok_or(ScenarioError::MissingArgument { line: self.line, what })
    }

    fn number<T: FromStr>(&mut self, what: &'static str) -> Result<T, ScenarioError> {
        let word = self.word(what)?;
        word.parse().map_err(|_| self.invalid(what, word))
    }

    /// `-` means no device.
    fn device(&mut self) -> Result<Option<InputDevice>, ScenarioError> {
        match self.word("device")? {
            "-" => Ok(None),
            word => {
                let handle = word.parse().map_err(|_| self.invalid("device", word))?;
                Ok(Some(InputDevice::new(handle, format!("sim-pad-{handle}"))))
            },
        }
    }

    /// Remaining words joined by single spaces.
    fn rest(&mut self) -> String {
        self.words.by_ref().collect::<Vec<_>>().join(" ")
    }

    fn invalid(&self, what: &'static str, value: &str) -> ScenarioError {
        ScenarioError::InvalidArgument { line: self.line, what, value: value.to_owned() }
    }
}

fn axis(line: usize, word: &str) -> Result<(AxisId, f32), ScenarioError> {
    let invalid = || ScenarioError::InvalidArgument { line, what: "axis", value: word.to_owned() };
    let (name, value) = word.split_once('=').ok_or_else(invalid)?;

    let id = match name {
        "x" => AxisId::X,
        "y" => AxisId::Y,
        "z" => AxisId::Z,
        "rz" => AxisId::RZ,
        "hat-x" => AxisId::HAT_X,
        "hat-y" => AxisId::HAT_Y,
        "ltrigger" => AxisId::LTRIGGER,
        "rtrigger" => AxisId::RTRIGGER,
        other => AxisId(other.parse().map_err(|_| invalid())?),
    };
    Ok((id, value.parse().map_err(|_| invalid())?))
}

fn pointer(line: usize, word: &str) -> Result<TouchPointer, ScenarioError> {
    let invalid =
        || ScenarioError::InvalidArgument { line, what: "pointer", value: word.to_owned() };
    let (id, position) = word.split_once(':').ok_or_else(invalid)?;
    let (x, y) = position.split_once(',').ok_or_else(invalid)?;

    Ok(TouchPointer {
        id: PointerId(id.parse().map_err(|_| invalid())?),
        x: x.parse().map_err(|_| invalid())?,
        y: y.parse().map_err(|_| invalid())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> BridgeEvent {
        match parse_line(1, line).unwrap() {
            Some(Step::Event(event)) => event,
            other => panic!("expected event, got {other:?}"),
        }
    }

    #[test]
    fn skips_blanks_and_comments() {
        let steps = parse_script("\n# boot\ncreate   # first\n\n  resume\n").unwrap();
        assert_eq!(steps, vec![
            Step::Event(BridgeEvent::Lifecycle(LifecycleEvent::Create)),
            Step::Event(BridgeEvent::Lifecycle(LifecycleEvent::Resume)),
        ]);
    }

    #[test]
    fn hash_inside_a_word_is_kept() {
        assert_eq!(
            event("command launchBrowser https://example.org/#top # docs"),
            BridgeEvent::Command(PendingCommand::new("launchBrowser", "https://example.org/#top"))
        );
    }

    #[test]
    fn keys_with_and_without_device() {
        assert_eq!(event("key 3 96 down"), BridgeEvent::Key {
            device: Some(InputDevice::new(3, "sim-pad-3")),
            code: KeyCode(96),
            action: KeyAction::Down,
        });
        assert_eq!(event("key - 4 up"), BridgeEvent::Key {
            device: None,
            code: KeyCode::BACK,
            action: KeyAction::Up,
        });
    }

    #[test]
    fn axes_by_name_and_id() {
        let BridgeEvent::Motion(motion) = event("axis 2 x=0.5 hat-y=-1 22=0.25") else {
            panic!("expected motion");
        };
        assert_eq!(motion.axes, vec![(AxisId::X, 0.5), (AxisId::HAT_Y, -1.0), (AxisId(22), 0.25)]);
        assert_eq!(motion.device, Some(InputDevice::new(2, "sim-pad-2")));
    }

    #[test]
    fn touch_batches() {
        assert_eq!(
            event("touch pointer-up 1 0:10,20 1:30.5,40"),
            BridgeEvent::Touch(TouchBatch {
                action: TouchAction::PointerUp,
                action_index: 1,
                pointers: vec![
                    TouchPointer { id: PointerId(0), x: 10.0, y: 20.0 },
                    TouchPointer { id: PointerId(1), x: 30.5, y: 40.0 },
                ],
            })
        );
    }

    #[test]
    fn commands_keep_spaces_in_parameter() {
        assert_eq!(
            event("command sharetext nice  run"),
            BridgeEvent::Command(PendingCommand::new("sharetext", "nice run"))
        );
        assert_eq!(event("command finish"), BridgeEvent::Command(PendingCommand::new("finish", "")));
    }

    #[test]
    fn prompt_answers() {
        assert_eq!(parse_line(1, "confirm hello world").unwrap(), Some(Step::Confirm("hello world".into())));
        assert_eq!(parse_line(1, "cancel").unwrap(), Some(Step::Cancel));
    }

    #[test]
    fn reports_line_numbers() {
        let error = parse_script("create\nresume\njump 3").unwrap_err();
        assert_eq!(error, ScenarioError::UnknownDirective { line: 3, word: "jump".into() });

        let error = parse_script("key 1 96 sideways").unwrap_err();
        assert_eq!(error, ScenarioError::InvalidArgument {
            line: 1,
            what: "key action",
            value: "sideways".into()
        });

        let error = parse_script("accel 1 2").unwrap_err();
        assert_eq!(error, ScenarioError::MissingArgument { line: 1, what: "z" });
    }

    #[test]
    fn axis_requires_device() {
        assert!(matches!(
            parse_line(5, "axis - x=1"),
            Err(ScenarioError::MissingArgument { line: 5, .. })
        ));
    }
}
