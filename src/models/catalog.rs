//! Closed sets of vendor identifiers
//!
//! Model ids, voice ids and output formats accepted at the API boundary.
//! Unknown strings fail deserialization instead of reaching the vendor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gemini text models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextModel {
    #[default]
    #[serde(rename = "gemini-1.5-flash")]
    Gemini15Flash,
    #[serde(rename = "gemini-1.5-pro")]
    Gemini15Pro,
    #[serde(rename = "gemini-2.0-flash")]
    Gemini20Flash,
    #[serde(rename = "gemini-pro")]
    GeminiPro,
}

impl TextModel {
    pub const ALL: [TextModel; 4] = [
        TextModel::Gemini15Flash,
        TextModel::Gemini15Pro,
        TextModel::Gemini20Flash,
        TextModel::GeminiPro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextModel::Gemini15Flash => "gemini-1.5-flash",
            TextModel::Gemini15Pro => "gemini-1.5-pro",
            TextModel::Gemini20Flash => "gemini-2.0-flash",
            TextModel::GeminiPro => "gemini-pro",
        }
    }
}

/// Premade ElevenLabs voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Voice {
    #[default]
    #[serde(rename = "21m00Tcm4TlvDq8ikWAM")]
    Rachel,
    #[serde(rename = "AZnzlk1XvdvUeBnXmlld")]
    Domi,
    #[serde(rename = "EXAVITQu4vr4xnAKbj8A")]
    Bella,
    #[serde(rename = "ErXwobaYiN019PkySvjV")]
    Antoni,
    #[serde(rename = "MF3mGyEYCl7XU2WvO1fr")]
    Elli,
    #[serde(rename = "TxGEqnHWrfWFTfGW9XJl")]
    Josh,
    #[serde(rename = "VR6AewLTigWG4xSOukaG")]
    Arnold,
    #[serde(rename = "pNInz6obpgDQGcFmaJgB")]
    Adam,
    #[serde(rename = "yoZ06aMxZJJ28mfd3POQ")]
    Sam,
}

impl Voice {
    pub const ALL: [Voice; 9] = [
        Voice::Rachel,
        Voice::Domi,
        Voice::Bella,
        Voice::Antoni,
        Voice::Elli,
        Voice::Josh,
        Voice::Arnold,
        Voice::Adam,
        Voice::Sam,
    ];

    /// Vendor voice id
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Rachel => "21m00Tcm4TlvDq8ikWAM",
            Voice::Domi => "AZnzlk1XvdvUeBnXmlld",
            Voice::Bella => "EXAVITQu4vr4xnAKbj8A",
            Voice::Antoni => "ErXwobaYiN019PkySvjV",
            Voice::Elli => "MF3mGyEYCl7XU2WvO1fr",
            Voice::Josh => "TxGEqnHWrfWFTfGW9XJl",
            Voice::Arnold => "VR6AewLTigWG4xSOukaG",
            Voice::Adam => "pNInz6obpgDQGcFmaJgB",
            Voice::Sam => "yoZ06aMxZJJ28mfd3POQ",
        }
    }
}

/// ElevenLabs speech models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AudioModel {
    #[default]
    #[serde(rename = "eleven_multilingual_v2")]
    MultilingualV2,
    #[serde(rename = "eleven_monolingual_v1")]
    MonolingualV1,
    #[serde(rename = "eleven_turbo_v2_5")]
    TurboV2_5,
    #[serde(rename = "eleven_flash_v2_5")]
    FlashV2_5,
}

impl AudioModel {
    pub const ALL: [AudioModel; 4] = [
        AudioModel::MultilingualV2,
        AudioModel::MonolingualV1,
        AudioModel::TurboV2_5,
        AudioModel::FlashV2_5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioModel::MultilingualV2 => "eleven_multilingual_v2",
            AudioModel::MonolingualV1 => "eleven_monolingual_v1",
            AudioModel::TurboV2_5 => "eleven_turbo_v2_5",
            AudioModel::FlashV2_5 => "eleven_flash_v2_5",
        }
    }
}

/// ElevenLabs output formats (`codec_samplerate[_bitrate]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "mp3_22050_32")]
    Mp3_22050_32,
    #[serde(rename = "mp3_44100_64")]
    Mp3_44100_64,
    #[serde(rename = "mp3_44100_96")]
    Mp3_44100_96,
    #[default]
    #[serde(rename = "mp3_44100_128")]
    Mp3_44100_128,
    #[serde(rename = "mp3_44100_192")]
    Mp3_44100_192,
    #[serde(rename = "pcm_16000")]
    Pcm16000,
    #[serde(rename = "pcm_22050")]
    Pcm22050,
    #[serde(rename = "pcm_24000")]
    Pcm24000,
    #[serde(rename = "pcm_44100")]
    Pcm44100,
    #[serde(rename = "ulaw_8000")]
    Ulaw8000,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 10] = [
        OutputFormat::Mp3_22050_32,
        OutputFormat::Mp3_44100_64,
        OutputFormat::Mp3_44100_96,
        OutputFormat::Mp3_44100_128,
        OutputFormat::Mp3_44100_192,
        OutputFormat::Pcm16000,
        OutputFormat::Pcm22050,
        OutputFormat::Pcm24000,
        OutputFormat::Pcm44100,
        OutputFormat::Ulaw8000,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp3_22050_32 => "mp3_22050_32",
            OutputFormat::Mp3_44100_64 => "mp3_44100_64",
            OutputFormat::Mp3_44100_96 => "mp3_44100_96",
            OutputFormat::Mp3_44100_128 => "mp3_44100_128",
            OutputFormat::Mp3_44100_192 => "mp3_44100_192",
            OutputFormat::Pcm16000 => "pcm_16000",
            OutputFormat::Pcm22050 => "pcm_22050",
            OutputFormat::Pcm24000 => "pcm_24000",
            OutputFormat::Pcm44100 => "pcm_44100",
            OutputFormat::Ulaw8000 => "ulaw_8000",
        }
    }

    /// MIME type of the encoded payload
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Pcm16000
            | OutputFormat::Pcm22050
            | OutputFormat::Pcm24000
            | OutputFormat::Pcm44100 => "audio/pcm",
            OutputFormat::Ulaw8000 => "audio/basic",
            _ => "audio/mpeg",
        }
    }
}

/// Error returned when a string is not part of a closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

fn parse_variant<T: Copy>(
    all: &[T],
    as_str: fn(&T) -> &'static str,
    kind: &'static str,
    value: &str,
) -> Result<T, UnknownVariant> {
    all.iter()
        .copied()
        .find(|variant| as_str(variant) == value)
        .ok_or_else(|| UnknownVariant {
            kind,
            value: value.to_string(),
        })
}

impl FromStr for TextModel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "text model", s)
    }
}

impl FromStr for Voice {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "voice id", s)
    }
}

impl FromStr for AudioModel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "audio model", s)
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant(&Self::ALL, Self::as_str, "output format", s)
    }
}

impl fmt::Display for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AudioModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_as_str() {
        for model in TextModel::ALL {
            assert_eq!(serde_json::to_value(model).unwrap(), model.as_str());
        }
        for voice in Voice::ALL {
            assert_eq!(serde_json::to_value(voice).unwrap(), voice.as_str());
        }
        for model in AudioModel::ALL {
            assert_eq!(serde_json::to_value(model).unwrap(), model.as_str());
        }
        for format in OutputFormat::ALL {
            assert_eq!(serde_json::to_value(format).unwrap(), format.as_str());
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("gemini-1.5-pro".parse::<TextModel>().unwrap(), TextModel::Gemini15Pro);
        assert_eq!("pNInz6obpgDQGcFmaJgB".parse::<Voice>().unwrap(), Voice::Adam);
        assert_eq!("pcm_24000".parse::<OutputFormat>().unwrap(), OutputFormat::Pcm24000);

        let err = "eleven_v9".parse::<AudioModel>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown audio model: eleven_v9");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TextModel::default().as_str(), "gemini-1.5-flash");
        assert_eq!(Voice::default().as_str(), "21m00Tcm4TlvDq8ikWAM");
        assert_eq!(AudioModel::default().as_str(), "eleven_multilingual_v2");
        assert_eq!(OutputFormat::default().as_str(), "mp3_44100_128");
        assert_eq!(OutputFormat::default().mime_type(), "audio/mpeg");
    }
}
