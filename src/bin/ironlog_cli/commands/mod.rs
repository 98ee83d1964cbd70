// ABOUTME: Command modules for ironlog-cli
// ABOUTME: Catalog, schedule and workout subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod catalog;
pub mod schedule;
pub mod workout;
