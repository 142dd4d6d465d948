use url::Url;

use crate::{
    Result,
    decrypt::ManifestDecryptor,
    error::Error,
    fetch::PayloadClient,
    manifest,
    media::{ResolvedMedia, STREAM_QUALITY, StreamProtocol, StreamSource, SubtitleTrack},
};

/// Path of the embed host's payload endpoint, relative to the embed origin.
const PAYLOAD_PATH: &str = "/api/v1/video";

/// Resolves playable media from an embed page URL.
///
/// Stateless between calls: every resolution fetches, decrypts and extracts
/// from scratch, and nothing is shared except the constant key material.
pub struct MediaResolver {
    client: PayloadClient,
    decryptor: ManifestDecryptor,
}

impl MediaResolver {
    pub fn new() -> Self {
        Self {
            client: PayloadClient::new(),
            decryptor: ManifestDecryptor::new(),
        }
    }

    /// Resolver with injected transport and key material.
    pub fn with_parts(client: PayloadClient, decryptor: ManifestDecryptor) -> Self {
        Self { client, decryptor }
    }

    /// Resolve, absorbing every failure into an empty result.
    ///
    /// This is the host-facing entry point. The resolver is one optional
    /// source among several the host may query, so no failure here is worth
    /// surfacing: transport errors, undecodable payloads and exhausted IV
    /// candidates all collapse to "nothing playable from this source".
    pub async fn resolve(&self, embed_url: &str) -> ResolvedMedia {
        match self.try_resolve(embed_url).await {
            Ok(media) => media,
            Err(err) => {
                tracing::warn!("Resolution failed for {}: {}", embed_url, err);
                ResolvedMedia::default()
            }
        }
    }

    /// Resolve with the full error taxonomy exposed.
    pub async fn try_resolve(&self, embed_url: &str) -> Result<ResolvedMedia> {
        tracing::info!("Resolving embed: {}", embed_url);

        let embed = Url::parse(embed_url)?;
        let id = video_id(&embed)
            .ok_or_else(|| Error::MissingVideoId(embed_url.to_string()))?
            .to_string();
        let endpoint = payload_endpoint(&embed, &id)?;

        let payload = self
            .client
            .fetch_payload(endpoint.as_str(), embed_url)
            .await?;
        let recovered = self.decryptor.decrypt(&payload)?;
        tracing::debug!(
            "Recovered manifest ({} bytes) with IV candidate {}",
            recovered.text.len(),
            recovered.iv_index
        );

        let fields = manifest::parse(&recovered.text);
        if fields.source.is_none() {
            tracing::debug!("Manifest has no source field; emitting subtitles only");
        }

        let stream = fields.source.and_then(|raw| {
            let url = absolutize(&endpoint, &raw)?;
            Some(StreamSource {
                url,
                quality: STREAM_QUALITY.to_string(),
                protocol: StreamProtocol::Hls,
                referer: embed_url.to_string(),
            })
        });

        let subtitles = fields
            .subtitles
            .into_iter()
            .filter_map(|(language, path)| {
                let url = absolutize(&endpoint, &path)?;
                Some(SubtitleTrack { language, url })
            })
            .collect();

        Ok(ResolvedMedia { stream, subtitles })
    }
}

impl Default for MediaResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Video identifier from an embed URL: the fragment when present, otherwise
/// the last non-empty path segment.
pub fn video_id(embed: &Url) -> Option<&str> {
    if let Some(fragment) = embed.fragment() {
        if !fragment.is_empty() {
            return Some(fragment);
        }
    }
    embed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
}

/// Payload endpoint on the same origin as the embed page.
fn payload_endpoint(embed: &Url, id: &str) -> Result<Url> {
    let mut endpoint = embed.join(PAYLOAD_PATH)?;
    endpoint.set_query(Some(&format!("id={}", id)));
    Ok(endpoint)
}

/// Resolve a possibly-relative manifest path against the payload origin.
/// Relative paths never resolve against any other base.
fn absolutize(endpoint: &Url, raw: &str) -> Option<String> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }
    let mut base = endpoint.clone();
    base.set_path("/");
    base.set_query(None);
    base.join(raw).ok().map(|u| u.to_string())
}
