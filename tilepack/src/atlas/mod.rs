pub mod packer;
pub mod document;
pub mod assemble;

pub use assemble::{Atlas, Tilepacker};
