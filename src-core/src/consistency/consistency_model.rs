use serde::{Deserialize, Serialize};

/// How much derived-state maintenance a hook invocation performs.
///
/// Passed explicitly on every call so a bulk load can never leak a disabled
/// state into unrelated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsistencyMode {
    /// Full pipeline: conversion, netting, balances, history.
    Normal,
    /// No derived-state maintenance; bulk fixture loads rebuild afterwards.
    BulkLoad,
}
