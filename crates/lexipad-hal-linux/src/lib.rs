//! Linux board support for lexipad: GPIO-driven panel, font and lexicon
//! files, and line-based keypad tokens.

pub mod input;
pub mod platform;
pub mod storage;
