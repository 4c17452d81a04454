// SPDX-License-Identifier: MIT OR Apache-2.0

pub use self::font::*;
mod font;

pub use self::shape_plan_cache::*;
mod shape_plan_cache;

pub use self::system::*;
mod system;
