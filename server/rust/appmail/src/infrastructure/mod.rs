pub mod config;
pub mod database;
pub mod html2text_converter;
pub mod logger;
