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

//! Identifiers for the logical renderpasses a backend sequences each frame.

use std::fmt;

/// Identifies a logical rendering stage (renderpass).
///
/// The built-in passes use bit-flag-style values so additional passes can be
/// introduced without disturbing existing bit patterns. Backends match on the
/// id to select the stage's targets; unknown ids are a backend-defined
/// extension point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RenderpassId(u8);

impl RenderpassId {
    /// The world-geometry pass.
    pub const WORLD: Self = Self(0x01);
    /// The UI overlay pass.
    pub const UI: Self = Self(0x02);

    /// Creates a renderpass id from raw bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns the raw bits of the id.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns `true` if this is one of the built-in passes.
    pub const fn is_builtin(&self) -> bool {
        matches!(self.0, 0x01 | 0x02)
    }
}

impl fmt::Display for RenderpassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RenderpassId::WORLD => write!(f, "world"),
            RenderpassId::UI => write!(f, "ui"),
            RenderpassId(bits) => write!(f, "pass(0x{bits:02x})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bit_values() {
        assert_eq!(RenderpassId::WORLD.bits(), 0x01);
        assert_eq!(RenderpassId::UI.bits(), 0x02);
        assert!(RenderpassId::WORLD.is_builtin());
        assert!(!RenderpassId::from_bits(0x04).is_builtin());
    }

    #[test]
    fn display_names() {
        assert_eq!(format!("{}", RenderpassId::WORLD), "world");
        assert_eq!(format!("{}", RenderpassId::UI), "ui");
        assert_eq!(format!("{}", RenderpassId::from_bits(0x08)), "pass(0x08)");
    }

    #[test]
    fn round_trips_through_bits() {
        let id = RenderpassId::from_bits(0x10);
        assert_eq!(RenderpassId::from_bits(id.bits()), id);
    }
}
