use aes::cipher::{BlockDecryptMut, KeyIvInit, block_padding::Pkcs7};

use super::ManifestKey;
use crate::{Error, Result};

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

const BLOCK_SIZE: usize = 16;

/// Key baked into the embed host's player protocol. Intrinsic to the site,
/// not a deployment secret.
const SITE_KEY: &[u8; 16] = b"6b69Qm3xW0cT8rVe";

/// IV candidates observed across player revisions, in priority order.
const IV_CANDIDATES: [[u8; 16]; 2] = [*b"rN3rGq87MvPW2o0b", *b"Xq5u90Dk2tLf4yJs"];

/// Result of a successful decryption attempt.
#[derive(Debug, Clone)]
pub struct RecoveredManifest {
    /// Decrypted manifest text.
    pub text: String,
    /// Index of the IV candidate that produced it.
    pub iv_index: usize,
}

/// Decrypts hex-encoded AES-128-CBC manifest payloads by trying candidate
/// IVs in order. The first padding-valid attempt wins; no plaintext
/// validation happens at this stage.
pub struct ManifestDecryptor {
    key: ManifestKey,
    ivs: Vec<[u8; 16]>,
}

impl ManifestDecryptor {
    /// Decryptor for the site's baked-in key and IV candidates.
    pub fn new() -> Self {
        Self {
            key: ManifestKey::from_bytes(*SITE_KEY),
            ivs: IV_CANDIDATES.to_vec(),
        }
    }

    /// Decryptor with explicit key material.
    pub fn with_material(key: ManifestKey, ivs: Vec<[u8; 16]>) -> Self {
        Self { key, ivs }
    }

    /// Decode a hex payload and decrypt it with the first IV candidate that
    /// yields a padding-valid plaintext.
    ///
    /// Surrounding whitespace is tolerated (the payload arrives as a
    /// plain-text response body, usually newline-terminated). The ciphertext
    /// must be a non-zero multiple of the AES block size.
    pub fn decrypt(&self, payload: &str) -> Result<RecoveredManifest> {
        let ciphertext = hex::decode(payload.trim())?;

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(Error::DecryptionFailed { attempts: 0 });
        }

        for (index, iv) in self.ivs.iter().enumerate() {
            match self.try_iv(&ciphertext, iv) {
                Some(plaintext) => {
                    tracing::debug!("Manifest recovered with IV candidate {}", index);
                    return Ok(RecoveredManifest {
                        text: String::from_utf8_lossy(&plaintext).into_owned(),
                        iv_index: index,
                    });
                }
                None => {
                    tracing::trace!("IV candidate {} rejected by padding check", index);
                }
            }
        }

        Err(Error::DecryptionFailed {
            attempts: self.ivs.len(),
        })
    }

    /// Attempt one CBC decryption; None means the padding check rejected it.
    fn try_iv(&self, ciphertext: &[u8], iv: &[u8; 16]) -> Option<Vec<u8>> {
        let mut buf = ciphertext.to_vec();
        let cipher = Aes128CbcDec::new_from_slices(self.key.as_bytes(), iv).ok()?;
        let plaintext = cipher.decrypt_padded_mut::<Pkcs7>(&mut buf).ok()?;
        Some(plaintext.to_vec())
    }
}

impl Default for ManifestDecryptor {
    fn default() -> Self {
        Self::new()
    }
}
