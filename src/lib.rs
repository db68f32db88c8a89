//! Keeps the `.files` and `.includes` lists of a Qt Creator generic project
//! in sync with the source tree, honoring gitignore rules.
//!
//! `update` walks the project root, drops everything the ignore rules exclude
//! (ignored directories are never entered), overwrites `N.files` with the
//! kept files and rewrites only the tagged block of `N.includes`, so
//! hand-written include paths outside the block survive.
pub mod builders;
pub mod core;
pub mod utils;

#[cfg(test)]
mod tests;
