//! Fuzz target for host command parsing
//!
//! Commands arrive from the native core as free-form `(name, parameter)`
//! strings and must never take the host down.
//!
//! # Strategy
//!
//! - Known names: every recognized command with arbitrary parameters
//! - Raw names: arbitrary bytes as the command name
//! - Vibrate edge cases: sentinels, zero, negatives, overflow, whitespace
//! - Prompt parameters: empty titles, many colons
//!
//! # Invariants
//!
//! - Parsing never panics
//! - A parsed command reports the name it was parsed from
//! - Only positive durations reach the vibrator
//! - A prompt title is never empty
//! - Prompt title and default text rejoin to the parameter

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tether_core::{Command, PromptRequest, Vibration};

const NAMES: &[&str] = &[
    "launchBrowser",
    "launchEmail",
    "launchMarket",
    "sharejpeg",
    "sharetext",
    "showTwitter",
    "toast",
    "showKeyboard",
    "hideKeyboard",
    "inputbox",
    "vibrate",
    "finish",
    "rotate",
    "immersive",
];

#[derive(Debug, Arbitrary)]
enum Input {
    Known { name: u8, parameter: String },
    Raw { name: String, parameter: String },
    Millis(i64),
    Prompt(String),
}

fuzz_target!(|input: Input| {
    match input {
        Input::Known { name, parameter } => {
            let name = NAMES[name as usize % NAMES.len()];
            check_command(name, &parameter);
        },
        Input::Raw { name, parameter } => check_command(&name, &parameter),
        Input::Millis(ms) => {
            let vibration = Vibration::parse(&format!(" {ms} "));
            if let Vibration::For(duration) = vibration {
                assert!(ms > 0, "non-positive {ms} produced a duration");
                assert_eq!(duration.as_millis(), u128::from(ms.unsigned_abs()));
            }
        },
        Input::Prompt(parameter) => check_prompt(&parameter),
    }
});

fn check_command(name: &str, parameter: &str) {
    let Some(command) = Command::parse(name, parameter) else {
        return;
    };
    assert_eq!(command.name(), name);

    match command {
        Command::Vibrate(Vibration::For(duration)) => assert!(!duration.is_zero()),
        Command::InputBox(request) => check_prompt_request(&request, parameter),
        _ => {},
    }
}

fn check_prompt(parameter: &str) {
    check_prompt_request(&PromptRequest::from_parameter(parameter), parameter);
}

fn check_prompt_request(request: &PromptRequest, parameter: &str) {
    assert!(!request.title.is_empty());
    if let Some((title, default_text)) = parameter.split_once(':') {
        assert_eq!(request.default_text, default_text);
        if !title.is_empty() {
            assert_eq!(request.title, title);
        }
    } else {
        assert!(request.default_text.is_empty());
    }
}
