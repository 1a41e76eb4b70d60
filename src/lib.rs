//! Workspace tooling package.
//!
//! Exists so `rusty-hook` installs the pre-commit hooks configured in the
//! root `Cargo.toml`; the engine lives in `crates/am4route-lib` and the
//! command-line interface in `crates/am4route-cli`.
