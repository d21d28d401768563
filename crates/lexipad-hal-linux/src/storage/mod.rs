pub mod font_file;
pub mod sqlite_lexicon;
