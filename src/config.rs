//! Configuration file parsing and validation

pub mod nccm_toml;

pub use nccm_toml::{
    CONFIG_FILE_NAME, ColorOption, Config, MatrixConfig, OutputConfig, OutputFormat, RulesConfig,
};
