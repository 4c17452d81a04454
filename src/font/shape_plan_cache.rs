// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::{Arc, PoisonError, RwLock};

use crate::HashMap;

/// Everything a shape plan depends on
///
/// No OpenType features are requested when shaping, so they are not part of the key.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ShapePlanKey {
    pub font: fontdb::ID,
    pub direction: harfrust::Direction,
    pub script: harfrust::Script,
    pub language: Option<harfrust::Language>,
}

/// A helper structure for caching shape plans, shared between threads
#[derive(Default)]
pub struct ShapePlanCache {
    cache: RwLock<HashMap<ShapePlanKey, Arc<harfrust::ShapePlan>>>,
}

impl ShapePlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the plan for `key`, building it with `default` on first use
    pub(crate) fn get_or_insert_with(
        &self,
        key: ShapePlanKey,
        default: impl FnOnce() -> harfrust::ShapePlan,
    ) -> Arc<harfrust::ShapePlan> {
        if let Some(plan) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return plan.clone();
        }

        log::trace!("building shape plan for {:?}", key);
        let plan = Arc::new(default());
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(plan)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every plan, required when font ids may change meaning
    pub fn clear(&mut self) {
        self.cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl core::fmt::Debug for ShapePlanCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ShapePlanCache").field(&self.len()).finish()
    }
}
