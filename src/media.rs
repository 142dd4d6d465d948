use serde::{Deserialize, Serialize};

/// Quality label attached to every stream this resolver produces.
///
/// The embed host serves a single 1080p HLS rendition; variant selection
/// happens inside the playlist, not at the resolver level.
pub const STREAM_QUALITY: &str = "1080p";

/// Playback protocol of a resolved stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamProtocol {
    Hls,
}

impl StreamProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hls => "hls",
        }
    }
}

/// A playable stream descriptor handed back to the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSource {
    pub url: String,
    pub quality: String,
    pub protocol: StreamProtocol,
    /// Page the stream was resolved from; players must send it as Referer.
    pub referer: String,
}

/// A subtitle track with an absolute URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub language: String,
    pub url: String,
}

/// Final output of a resolution call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMedia {
    pub stream: Option<StreamSource>,
    #[serde(default)]
    pub subtitles: Vec<SubtitleTrack>,
}

impl ResolvedMedia {
    /// True when resolution produced neither a stream nor subtitles.
    pub fn is_empty(&self) -> bool {
        self.stream.is_none() && self.subtitles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_default() {
        let media = ResolvedMedia::default();
        assert!(media.is_empty());
        assert!(media.stream.is_none());
        assert!(media.subtitles.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let media = ResolvedMedia {
            stream: Some(StreamSource {
                url: "https://cdn.test/v.m3u8".to_string(),
                quality: STREAM_QUALITY.to_string(),
                protocol: StreamProtocol::Hls,
                referer: "https://host.test/e/1".to_string(),
            }),
            subtitles: vec![SubtitleTrack {
                language: "it".to_string(),
                url: "https://host.test/subs/it.vtt".to_string(),
            }],
        };

        let json = serde_json::to_value(&media).unwrap();
        assert_eq!(json["stream"]["protocol"], "hls");
        assert_eq!(json["stream"]["quality"], "1080p");
        assert_eq!(json["subtitles"][0]["language"], "it");
    }

    #[test]
    fn test_protocol_as_str() {
        assert_eq!(StreamProtocol::Hls.as_str(), "hls");
    }
}
