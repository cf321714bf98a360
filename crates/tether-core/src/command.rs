//! Command vocabulary.
//!
//! The native core asks for host actions with free-form `(name, parameter)`
//! string pairs. [`Command::parse`] turns a pair into a typed [`Command`];
//! names outside the vocabulary yield `None`, which the dispatcher reports as
//! not-handled without treating it as an error.

use std::time::Duration;

use crate::prompt::PromptRequest;

/// Command issued on the native-core thread, waiting for the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    /// Command name.
    pub name: String,
    /// Free-form parameter, possibly empty.
    pub parameter: String,
}

impl PendingCommand {
    /// New pending command.
    pub fn new(name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self { name: name.into(), parameter: parameter.into() }
    }
}

/// Host-native short haptic pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HapticPattern {
    /// Keyboard key press.
    KeyTap,
    /// Virtual (on-screen) key press.
    VirtualKey,
    /// Long press.
    LongPress,
}

/// Parsed `vibrate` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vibration {
    /// Platform haptic pattern; never touches the vibrator.
    Haptic(HapticPattern),
    /// Raw vibration for a duration.
    For(Duration),
    /// Zero or an unknown sentinel. Nothing happens.
    Ignored(i64),
}

impl Vibration {
    /// Parse a `vibrate` parameter. Empty or unparseable means key-tap.
    pub fn parse(parameter: &str) -> Self {
        let millis = parameter.trim().parse::<i64>().unwrap_or(-1);
        match millis {
            -1 => Self::Haptic(HapticPattern::KeyTap),
            -2 => Self::Haptic(HapticPattern::VirtualKey),
            -3 => Self::Haptic(HapticPattern::LongPress),
            ms if ms > 0 => Self::For(Duration::from_millis(ms.unsigned_abs())),
            other => Self::Ignored(other),
        }
    }
}

/// Typed host command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a URL in the external browser.
    LaunchBrowser {
        /// URL to open.
        url: String,
    },
    /// Compose an email.
    LaunchEmail {
        /// Recipient address. Empty means the configured [`MailTemplate`]
        /// recipient.
        address: String,
    },
    /// Share a JPEG file.
    ShareImage {
        /// Local file path.
        path: String,
    },
    /// Share plain text.
    ShareText {
        /// Text to share.
        text: String,
    },
    /// Open a social profile, app first, web as fallback.
    ShowProfile {
        /// Profile handle.
        handle: String,
    },
    /// Short toast notification.
    Toast {
        /// Message text.
        message: String,
    },
    /// Show the on-screen keyboard.
    ShowKeyboard,
    /// Hide the on-screen keyboard.
    HideKeyboard,
    /// Modal text prompt; the only command that replies.
    InputBox(PromptRequest),
    /// Vibration or haptic feedback.
    Vibrate(Vibration),
    /// Finish the application.
    Finish,
    /// Re-query and apply the orientation.
    Rotate,
    /// Re-query and apply immersive mode.
    Immersive,
}

impl Command {
    /// Parse a `(name, parameter)` pair. `None` for unknown names.
    pub fn parse(name: &str, parameter: &str) -> Option<Self> {
        let command = match name {
            "launchBrowser" => Self::LaunchBrowser { url: parameter.to_owned() },
            "launchEmail" => Self::LaunchEmail { address: parameter.to_owned() },
            "sharejpeg" => Self::ShareImage { path: parameter.to_owned() },
            "sharetext" => Self::ShareText { text: parameter.to_owned() },
            "showTwitter" => Self::ShowProfile { handle: parameter.to_owned() },
            "toast" => Self::Toast { message: parameter.to_owned() },
            "showKeyboard" => Self::ShowKeyboard,
            "hideKeyboard" => Self::HideKeyboard,
            "inputbox" => Self::InputBox(PromptRequest::from_parameter(parameter)),
            "vibrate" => Self::Vibrate(Vibration::parse(parameter)),
            "finish" => Self::Finish,
            "rotate" => Self::Rotate,
            "immersive" => Self::Immersive,
            // Market links go through launchBrowser.
            "launchMarket" => return None,
            _ => return None,
        };
        Some(command)
    }

    /// Wire name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LaunchBrowser { .. } => "launchBrowser",
            Self::LaunchEmail { .. } => "launchEmail",
            Self::ShareImage { .. } => "sharejpeg",
            Self::ShareText { .. } => "sharetext",
            Self::ShowProfile { .. } => "showTwitter",
            Self::Toast { .. } => "toast",
            Self::ShowKeyboard => "showKeyboard",
            Self::HideKeyboard => "hideKeyboard",
            Self::InputBox(_) => "inputbox",
            Self::Vibrate(_) => "vibrate",
            Self::Finish => "finish",
            Self::Rotate => "rotate",
            Self::Immersive => "immersive",
        }
    }
}

/// App URI for a profile handle.
pub fn profile_app_uri(handle: &str) -> String {
    format!("twitter://user?screen_name={handle}")
}

/// Web URL for a profile handle.
pub fn profile_web_url(handle: &str) -> String {
    format!("https://twitter.com/#!/{handle}")
}

/// Fixed message used by `launchEmail`.
///
/// The native core usually issues `launchEmail` without a parameter; the
/// host then mails the configured recipient with the configured subject and
/// body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MailTemplate {
    /// Recipient when the command carries none.
    pub address: String,
    /// Subject line; omitted when empty.
    pub subject: String,
    /// Body text; omitted when empty.
    pub body: String,
}

impl MailTemplate {
    /// `mailto:` URI addressed to `to`, or to the template recipient when
    /// `to` is blank. Spaces are encoded as `%20`.
    pub fn mailto(&self, to: &str) -> String {
        let to = match to.trim() {
            "" => self.address.as_str(),
            to => to,
        };
        let query: Vec<String> = [("subject", &self.subject), ("body", &self.body)]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={value}"))
            .collect();

        let uri = if query.is_empty() {
            format!("mailto:{to}")
        } else {
            format!("mailto:{to}?{}", query.join("&"))
        };
        uri.replace(' ', "%20")
    }
}

/// `file://` URI for a local path.
pub fn file_uri(path: &str) -> String {
    format!("file://{path}")
}
