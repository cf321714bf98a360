//! Host side of the command vocabulary.
//!
//! Commands arrive as parsed [`Command`] values on the UI thread. Most map
//! onto a single host call; `showTwitter` has a web fallback, `vibrate`
//! probes the hardware once, and `inputbox` opens a prompt that settles later
//! through the event queue.

use tether_core::{
    Command, MailTemplate, PromptId, PromptOutcome, PromptReply, PromptState, PromptTracker,
    Vibration,
    command::{file_uri, profile_app_uri, profile_web_url},
};

use crate::{
    Host, ShareContent,
    queue::{EventSender, PromptResponder},
};

/// MIME type used by `sharejpeg`.
pub const MIME_JPEG: &str = "image/jpeg";

/// MIME type used by `sharetext`.
pub const MIME_TEXT: &str = "text/plain";

/// Display work a command asks the bridge to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRefresh {
    /// Re-query and apply orientation.
    Orientation,
    /// Re-query and apply system UI flags.
    SystemUi,
}

/// Executes commands against the host.
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    prompts: PromptTracker,
    vibrator: Option<bool>,
    mail: MailTemplate,
}

impl CommandDispatcher {
    /// Dispatcher with no prompts and no vibrator probe yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Message composed by `launchEmail`.
    pub fn set_mail_template(&mut self, mail: MailTemplate) {
        self.mail = mail;
    }

    /// Run one command. `replies` carries prompt answers back to the queue.
    pub fn dispatch<H: Host + ?Sized>(
        &mut self,
        command: Command,
        host: &mut H,
        replies: Option<EventSender>,
    ) -> Option<DisplayRefresh> {
        match command {
            Command::LaunchBrowser { url } => {
                if let Err(error) = host.open_uri(&url) {
                    tracing::warn!(%url, %error, "cannot open url");
                }
            },
            Command::LaunchEmail { address } => {
                if address.trim().is_empty() && self.mail.address.is_empty() {
                    tracing::debug!("composing email without recipient");
                }
                if let Err(error) = host.compose_email(&self.mail.mailto(&address)) {
                    tracing::warn!(%error, "cannot compose email");
                }
            },
            Command::ShareImage { path } => {
                if let Err(error) = host.share(MIME_JPEG, ShareContent::Stream(file_uri(&path))) {
                    tracing::warn!(%path, %error, "cannot share image");
                }
            },
            Command::ShareText { text } => {
                if let Err(error) = host.share(MIME_TEXT, ShareContent::Text(text)) {
                    tracing::warn!(%error, "cannot share text");
                }
            },
            Command::ShowProfile { handle } => show_profile(host, &handle),
            Command::Toast { message } => host.toast(&message),
            Command::ShowKeyboard => host.set_keyboard_visible(true),
            Command::HideKeyboard => host.set_keyboard_visible(false),
            Command::InputBox(request) => {
                let id = self.prompts.open();
                tracing::debug!(?id, title = %request.title, "opening prompt");
                host.show_prompt(request, PromptResponder::new(id, replies));
            },
            Command::Vibrate(vibration) => self.vibrate(host, vibration),
            Command::Finish => host.finish(),
            Command::Rotate => return Some(DisplayRefresh::Orientation),
            Command::Immersive => return Some(DisplayRefresh::SystemUi),
        }
        None
    }

    /// Settle a prompt. Returns the message for the native core, if any.
    pub fn settle(&mut self, id: PromptId, outcome: PromptOutcome) -> Option<PromptReply> {
        self.prompts.settle(id, outcome)
    }

    /// State of a prompt.
    pub fn prompt_state(&self, id: PromptId) -> Option<PromptState> {
        self.prompts.state(id)
    }

    /// Prompts still waiting for the user.
    pub fn pending_prompts(&self) -> usize {
        self.prompts.pending()
    }

    fn vibrate<H: Host + ?Sized>(&mut self, host: &mut H, vibration: Vibration) {
        match vibration {
            Vibration::Haptic(pattern) => host.haptic(pattern),
            Vibration::For(duration) => {
                let present = *self.vibrator.get_or_insert_with(|| host.has_vibrator());
                if present {
                    host.vibrate(duration);
                } else {
                    tracing::debug!(?duration, "no vibrator");
                }
            },
            Vibration::Ignored(millis) => tracing::debug!(millis, "vibrate ignored"),
        }
    }
}

fn show_profile<H: Host + ?Sized>(host: &mut H, handle: &str) {
    let Err(error) = host.open_uri(&profile_app_uri(handle)) else {
        return;
    };
    tracing::debug!(%error, "profile app unavailable, using web");

    let url = profile_web_url(handle);
    if let Err(error) = host.open_uri(&url) {
        tracing::warn!(%url, %error, "cannot open profile");
    }
}
