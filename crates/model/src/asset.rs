use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of media an asset holds.
///
/// Persisted by name (`"audio"`, `"midi"`, ...). Unrecognized names decode
/// to [`AssetType::Unknown`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[repr(u32)]
pub enum AssetType {
    AudioFile = 0,
    MidiFile = 1,
    /// Native sequence asset
    Sequence = 2,
    /// Not supported for playback yet
    Video = 3,
    #[default]
    Unknown = 4,
}

impl AssetType {
    /// The concrete asset types, in numeric order. `Unknown` is not included.
    pub const ALL: [AssetType; 4] = [
        AssetType::AudioFile,
        AssetType::MidiFile,
        AssetType::Sequence,
        AssetType::Video,
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "audio" => AssetType::AudioFile,
            "midi" => AssetType::MidiFile,
            "sequence" => AssetType::Sequence,
            "video" => AssetType::Video,
            _ => AssetType::Unknown,
        }
    }

    /// Inverse of [`AssetType::from_name`].
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::AudioFile => "audio",
            AssetType::MidiFile => "midi",
            AssetType::Sequence => "sequence",
            AssetType::Video => "video",
            AssetType::Unknown => "unknown",
        }
    }

    pub fn uri(&self) -> &'static str {
        match self {
            AssetType::AudioFile => "urn:datatype:audio",
            AssetType::MidiFile => "urn:datatype:midi",
            AssetType::Sequence => "urn:datatype:sequence",
            AssetType::Video => "urn:datatype:video",
            AssetType::Unknown => "unknown",
        }
    }

    pub fn id(&self) -> u32 {
        *self as u32
    }
}

impl From<u32> for AssetType {
    fn from(id: u32) -> Self {
        match id {
            0 => AssetType::AudioFile,
            1 => AssetType::MidiFile,
            2 => AssetType::Sequence,
            3 => AssetType::Video,
            _ => AssetType::Unknown,
        }
    }
}

impl From<AssetType> for u32 {
    fn from(asset: AssetType) -> Self {
        asset.id()
    }
}

impl FromStr for AssetType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for AssetType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<AssetType> for String {
    fn from(asset: AssetType) -> Self {
        asset.as_str().to_string()
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
