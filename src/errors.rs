// ABOUTME: Application error types re-exported from ketoflow-core
// ABOUTME: Gives the stores, repositories, and CLI one error vocabulary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

pub use ketoflow_core::errors::*;
