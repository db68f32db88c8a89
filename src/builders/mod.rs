// This file is the module declaration file for the `builders` module.
// It declares and makes public all the sub-modules within the `src/builders`
// directory. These modules build the rule set and the generated files.

// `importer` module:
// Gathers ignore rules from the root `.gitignore`, the project's
// `<name>.gitignore`, the settings file, the project's own files and the
// built-in denylist, in that order, into an `IgnoreRuleSet`.
pub mod importer;

// `manifest` module:
// Renders and writes the `.files` manifest, one path per line.
pub mod manifest;

// `patterns` module:
// This is a fundamental module. It compiles gitignore lines into an
// `IgnoreSpec` and defines the `PatternMatcher` trait the walker relies on.
pub mod patterns;

// `reporter` module:
// Turns an `UpdateReport` into the console summary printed by `update`.
pub mod reporter;

// `scaffold` module:
// The fixed templates written by `create`.
pub mod scaffold;

// `section` module:
// Splices the tagged `# QTC_PROJECT_BEGIN` / `# QTC_PROJECT_END` block of
// the `.includes` file, leaving everything around it untouched.
pub mod section;

// `storage` module:
// The `OutputStorage` seam: `DiskStorage` for real runs, `DryRunStorage`
// for `update --dry-run`.
pub mod storage;

// `validator` module:
// Warns about rules that can never take effect, such as negations of
// built-in entries.
pub mod validator;
