pub mod error;
pub mod config;
pub mod decode;
pub mod atlas;
pub mod sheet;

pub use atlas::{Atlas, Tilepacker};
pub use config::PackConfig;
pub use decode::decode_boxes;
pub use error::{Result, TilepackError};
