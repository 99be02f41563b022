// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod index;
mod logging;
mod search;

pub use index::{IndexConfig, IndexConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer, DEFAULT_LOG_LEVEL};
pub use search::{SearchConfig, SearchConfigLayer, DEFAULT_LIMIT};
