// This file is the module declaration file for the `core` module.
// It declares the submodules that drive a project update from discovery to
// the final write.

// `config` module:
// Discovers the single `*.files` manifest in a directory, derives the
// `ProjectLayout` (project name and the paths of every project file), and
// loads the optional `.qtc-project.toml` settings through `ConfigProvider`.
pub mod config;

// `engine` module:
// `UpdateEngine` ties the pieces together: gather rules, validate and
// compile them, walk the tree, write the manifest, merge the includes file.
pub mod engine;

// `error` module:
// The `ProjectError` enum every library operation returns, plus the exit
// code each error kind maps to.
pub mod error;

// `walker` module:
// The depth-first `TreeWalker` that prunes ignored directories and collects
// kept files and directories.
pub mod walker;
