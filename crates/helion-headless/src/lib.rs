// Copyright 2025 the Helion contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Helion Headless
//!
//! A headless (no-GPU) backend implementing the `helion-core` rendering
//! contract bit-for-bit. It performs no graphics-API work; instead it tracks
//! every lifecycle transition, arena-allocates resources, and exposes
//! counters so conformance tests can assert the contract's observable
//! properties. It doubles as a reference for how a real backend must
//! sequence and validate calls.

#![warn(missing_docs)]

pub mod backend;

pub use backend::{HeadlessRendererBackend, HeadlessStats};
