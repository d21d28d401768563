#![cfg_attr(not(test), no_std)]

//! Board-independent core of the lexipad dictionary: glyph rendering, the
//! lexicon lookup engine and the menu/dictionary navigation state machine.

extern crate alloc;

pub mod app;
pub mod input;
pub mod lexicon;
pub mod render;
pub mod settings;
pub mod text_policy;
pub mod ui;
