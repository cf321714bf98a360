//! Host configuration gathered for the one-time native setup.

use std::path::PathBuf;

use crate::{error::SetupError, native::InitConfig};

/// Audio buffering hints detected from the host audio service.
///
/// Zero means "could not detect"; the native core picks its own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioHints {
    /// Optimal frames per buffer.
    pub frames_per_buffer: u32,
    /// Optimal output sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioHints {
    /// Parse hints from raw host property strings. Anything unparseable is
    /// bogus and becomes zero.
    pub fn from_properties(frames_per_buffer: Option<&str>, sample_rate: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0);
        Self { frames_per_buffer: parse(frames_per_buffer), sample_rate: parse(sample_rate) }
    }
}

/// Everything the host reports about itself before native setup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostConfig {
    /// Display density in dots per inch.
    pub dpi: u32,
    /// Device manufacturer. Mandatory.
    pub manufacturer: String,
    /// Device model. Mandatory.
    pub model: String,
    /// Locale language, e.g. `"en"`.
    pub language: String,
    /// Locale country, e.g. `"US"`.
    pub country: String,
    /// Application bundle path. Mandatory.
    pub bundle_path: Option<PathBuf>,
    /// Private data directory.
    pub data_dir: PathBuf,
    /// Shared external storage directory.
    pub external_storage_dir: PathBuf,
    /// Native library directory; `<data_dir>/lib` when the host cannot tell.
    pub native_lib_dir: Option<PathBuf>,
    /// Launch shortcut parameter.
    pub shortcut_param: Option<String>,
    /// Detected audio hints.
    pub audio: AudioHints,
    /// Low-latency native audio is available.
    pub use_low_level_audio: bool,
}

impl HostConfig {
    /// `"{manufacturer}:{model}"`, failing when either part is missing.
    pub fn device_id(&self) -> Result<String, SetupError> {
        if self.manufacturer.trim().is_empty() {
            return Err(SetupError::MissingIdentity { field: "manufacturer" });
        }
        if self.model.trim().is_empty() {
            return Err(SetupError::MissingIdentity { field: "model" });
        }
        Ok(format!("{}:{}", self.manufacturer, self.model))
    }

    /// `"{language}_{country}"`.
    pub fn locale(&self) -> String {
        format!("{}_{}", self.language, self.country)
    }

    /// Native library directory with the data-dir fallback applied.
    pub fn native_lib_dir(&self) -> PathBuf {
        self.native_lib_dir.clone().unwrap_or_else(|| self.data_dir.join("lib"))
    }

    /// Combine with the installation id into the native init bundle.
    pub fn into_init_config(self, install_id: &str) -> Result<InitConfig, SetupError> {
        let device_id = self.device_id()?;
        let native_lib_dir = self.native_lib_dir();
        let locale = self.locale();
        let bundle_path = self.bundle_path.ok_or(SetupError::MissingBundle)?;

        Ok(InitConfig {
            dpi: self.dpi,
            device_id,
            locale,
            bundle_path,
            data_dir: self.data_dir,
            external_storage_dir: self.external_storage_dir,
            native_lib_dir,
            shortcut_param: self.shortcut_param.unwrap_or_default(),
            install_id: install_id.to_owned(),
            use_low_level_audio: self.use_low_level_audio,
        })
    }
}
