pub mod decrypt;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod media;
pub mod resolve;

pub use error::Error;
pub use media::ResolvedMedia;
pub use resolve::MediaResolver;
pub type Result<T> = std::result::Result<T, Error>;
