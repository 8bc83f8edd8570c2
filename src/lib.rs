pub mod bitstream;
pub mod codec;
pub mod compare;
pub mod golomb;
pub mod luma;
pub mod types;
