pub mod display;
pub mod glyph;
pub mod handlers;
pub mod pages;
