// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod money;
pub mod period;
pub mod records;
pub mod search;
pub mod sort;
pub mod storage;
pub mod summary;
pub mod utils;
pub mod validators;
