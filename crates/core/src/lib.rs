//! Core library for cleaning CC/SDH pollution out of subtitles.

pub mod clean;
pub mod patterns;
pub mod review;
pub mod srt;
pub mod tracks;
