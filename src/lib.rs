pub mod halftone;
pub mod image;
pub mod preset;
