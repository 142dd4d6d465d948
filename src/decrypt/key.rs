use crate::{Error, Result};

/// A 16-byte AES-128 key for manifest decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestKey([u8; 16]);

impl ManifestKey {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Parse a key from a 32-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes =
            hex::decode(s.trim()).map_err(|e| Error::InvalidKeyFormat(e.to_string()))?;
        let bytes: [u8; 16] = bytes.try_into().map_err(|_| Error::InvalidKeyLength)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl std::fmt::Display for ManifestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Parse an IV from a hex string (with or without 0x prefix).
pub fn parse_iv(s: &str) -> Result<[u8; 16]> {
    let trimmed = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(trimmed).map_err(|_| Error::InvalidIv(s.to_string()))?;
    bytes.try_into().map_err(|_| Error::InvalidIv(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_roundtrip() {
        let original = "0123456789abcdef0123456789abcdef";
        let key = ManifestKey::from_hex(original).unwrap();
        assert_eq!(key.to_string(), original);
    }

    #[test]
    fn test_from_hex_invalid_length() {
        let result = ManifestKey::from_hex("0123456789abcdef");
        assert!(matches!(result, Err(Error::InvalidKeyLength)));
    }

    #[test]
    fn test_from_hex_invalid_chars() {
        let result = ManifestKey::from_hex("zz23456789abcdef0123456789abcdef");
        assert!(matches!(result, Err(Error::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_parse_iv_with_prefix() {
        let iv = parse_iv("0x00000000000000000000000000000001").unwrap();
        assert_eq!(iv[15], 1);
    }

    #[test]
    fn test_parse_iv_wrong_length() {
        assert!(matches!(parse_iv("0001"), Err(Error::InvalidIv(_))));
    }
}
