//! # Vaultline Harness Configuration
//!
//! Centralized configuration for conformance runs against a hardware-wallet
//! communication core.
//!
//! ## Features
//!
//! - **Layered loading**: defaults, TOML file, `CONFORMANCE_*` environment
//! - **Core settings**: backend selection, bridge URL, connect timeout
//! - **Run selection**: suites and the externally chosen subtest
//!
//! ## Usage
//!
//! ```rust,no_run
//! use harness_config::HarnessConfig;
//!
//! let config = HarnessConfig::load(None)?;
//! println!("timeout per case: {:?}", config.case_timeout());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod harness_config;

pub use harness_config::{CoreBackend, CoreSettings, HarnessConfig, ENV_PREFIX};
