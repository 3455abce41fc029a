/// Name-keyed scene object registry.
///
/// A concrete SceneLookup over boxed objects, with slotmap storage and a
/// name index. The demo and the camera-slaving tests populate one of
/// these; games with their own entity system implement SceneLookup
/// directly instead.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::scene::lookup::{SceneLookup, SceneObject};

new_key_type! {
    /// Stable key into the registry
    pub struct ObjectKey;
}

pub struct SceneRegistry {
    objects: SlotMap<ObjectKey, Box<dyn SceneObject>>,
    names: FxHashMap<String, ObjectKey>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            names: FxHashMap::default(),
        }
    }

    /// Insert an object under its own name. A second object with the same
    /// name replaces the first in the name index.
    pub fn insert(&mut self, object: Box<dyn SceneObject>) -> ObjectKey {
        let name = object.name().to_string();
        let key = self.objects.insert(object);
        self.names.insert(name, key);
        key
    }

    pub fn remove(&mut self, key: ObjectKey) -> Option<Box<dyn SceneObject>> {
        let object = self.objects.remove(key)?;
        if self.names.get(object.name()) == Some(&key) {
            self.names.remove(object.name());
        }
        Some(object)
    }

    pub fn get(&self, key: ObjectKey) -> Option<&dyn SceneObject> {
        self.objects.get(key).map(|o| o.as_ref())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneLookup for SceneRegistry {
    fn find_object_by_name(&self, name: &str) -> Option<&dyn SceneObject> {
        let key = self.names.get(name)?;
        self.objects.get(*key).map(|o| o.as_ref())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
