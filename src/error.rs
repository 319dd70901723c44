// SPDX-License-Identifier: GPL-3.0-or-later
// src/error.rs
//
// Engine error kinds.

use thiserror::Error;

/// Errors produced by the compositing engine.
///
/// Most operations degrade instead of failing (see the crate docs); these
/// kinds surface only where the caller has something actionable to report,
/// such as a malformed ratio string.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid grid configuration: {0}")]
    Configuration(String),

    #[error("nothing to draw: {0}")]
    EmptyResult(String),

    #[error("degenerate crop region: x={x}, y={y}, width={width}, height={height}")]
    Bounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
