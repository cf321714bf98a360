//! Fuzz target for simulator scenario scripts
//!
//! # Strategy
//!
//! - Raw text: arbitrary UTF-8 as a whole script
//! - Directive lines: a known directive followed by arbitrary words
//!
//! # Invariants
//!
//! - Parsing never panics
//! - Errors name a line that exists in the script
//! - A script parses to at most one step per line

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tether_sim::{ScenarioError, parse_script};

const DIRECTIVES: &[&str] = &[
    "create", "resume", "pause", "destroy", "config-changed", "key", "axis", "scroll", "hover",
    "touch", "accel", "command", "confirm", "cancel",
];

#[derive(Debug, Arbitrary)]
enum Script {
    Raw(String),
    Lines(Vec<(u8, Vec<String>)>),
}

fuzz_target!(|script: Script| {
    let text = match script {
        Script::Raw(text) => text,
        Script::Lines(lines) => lines
            .into_iter()
            .map(|(directive, words)| {
                let directive = DIRECTIVES[directive as usize % DIRECTIVES.len()];
                format!("{directive} {}", words.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    let line_count = text.lines().count();

    match parse_script(&text) {
        Ok(steps) => assert!(steps.len() <= line_count),
        Err(
            ScenarioError::UnknownDirective { line, .. }
            | ScenarioError::MissingArgument { line, .. }
            | ScenarioError::InvalidArgument { line, .. },
        ) => assert!((1..=line_count).contains(&line)),
    }
});
