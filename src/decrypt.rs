pub mod decryptor;
pub mod key;

pub use decryptor::{ManifestDecryptor, RecoveredManifest};
pub use key::ManifestKey;
