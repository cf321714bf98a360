//! Replays a parsed scenario against the recording doubles.

use std::path::PathBuf;

use tether_app::{BridgeEvent, PromptResponder, Runtime};
use tether_core::{
    HostConfig, LifecycleEvent, LifecycleState,
    native::{QUERY_IMMERSIVE_MODE, QUERY_SCREEN_ROTATION},
};
use tether_harness::{SimHost, SimNative, sim_config};

use crate::{SimError, Step};

type SimRuntime = Runtime<SimNative, SimHost>;

/// How the simulated device presents itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimOptions {
    /// Display density.
    pub dpi: u32,
    /// `"{language}_{country}"`.
    pub locale: String,
    /// `"{manufacturer}:{model}"`.
    pub device: String,
    /// Private data directory; created if missing.
    pub data_dir: PathBuf,
    /// Vibration hardware present.
    pub vibrator: bool,
    /// Native answer to `screenRotation`.
    pub rotation: String,
    /// Native answer to `immersiveMode`.
    pub immersive: String,
}

impl SimOptions {
    /// Host config for these options.
    pub fn host_config(&self) -> Result<HostConfig, SimError> {
        let (language, country) = self
            .locale
            .split_once('_')
            .ok_or_else(|| SimError::Option { option: "locale", value: self.locale.clone() })?;
        let (manufacturer, model) = self
            .device
            .split_once(':')
            .ok_or_else(|| SimError::Option { option: "device", value: self.device.clone() })?;

        Ok(HostConfig {
            dpi: self.dpi,
            manufacturer: manufacturer.to_owned(),
            model: model.to_owned(),
            language: language.to_owned(),
            country: country.to_owned(),
            ..sim_config(&self.data_dir)
        })
    }
}

/// What a finished run left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Calls made on the native core.
    pub native_calls: usize,
    /// Calls made on the host.
    pub host_calls: usize,
    /// Messages sent back into the native core.
    pub messages: Vec<(String, String)>,
    /// Lifecycle state at exit.
    pub state: LifecycleState,
}

/// Play `steps` to completion.
///
/// A script that does not end in `destroy` is destroyed on its behalf, as a
/// host does at process exit.
pub async fn play(steps: Vec<Step>, options: &SimOptions) -> Result<Summary, SimError> {
    std::fs::create_dir_all(&options.data_dir)?;
    let native = SimNative::new()
        .with_answer(QUERY_SCREEN_ROTATION, &options.rotation)
        .with_answer(QUERY_IMMERSIVE_MODE, &options.immersive);
    let host = SimHost::new(options.host_config()?).with_vibrator(options.vibrator);
    let (mut runtime, sender) = Runtime::new(native, host);

    for step in steps {
        match step {
            Step::Event(event) => {
                sender.send(event);
            },
            Step::Confirm(text) => answer(&mut runtime, |responder| responder.confirm(text))?,
            Step::Cancel => answer(&mut runtime, PromptResponder::cancel)?,
        }
    }

    runtime.pump()?;
    if runtime.bridge().lifecycle_state() != LifecycleState::Destroyed {
        tracing::info!("script ended without destroy, destroying");
        sender.send(BridgeEvent::Lifecycle(LifecycleEvent::Destroy));
    }
    drop(sender);
    runtime.run().await?;

    let bridge = runtime.bridge();
    Ok(Summary {
        native_calls: bridge.native().calls().len(),
        host_calls: bridge.host().calls().len(),
        messages: bridge.native().messages(),
        state: bridge.lifecycle_state(),
    })
}

/// Drain the queue, then answer the oldest open prompt.
fn answer(runtime: &mut SimRuntime, reply: impl FnOnce(PromptResponder)) -> Result<(), SimError> {
    runtime.pump()?;
    match runtime.bridge_mut().host_mut().take_prompt() {
        Some((request, responder)) => {
            tracing::info!(title = %request.title, "answering prompt");
            reply(responder);
        },
        None => tracing::warn!("no open prompt to answer"),
    }
    Ok(())
}
