//! Session-wide deduplication of configured materials

use std::collections::HashMap;

use crate::core::Result;
use crate::material::classifier::MaterialGroupKey;
use crate::material::config::MaterialConfig;
use crate::scene::target::{MaterialHandle, SceneTarget};

/// Shared materials keyed by their exact (case-sensitive) name.
///
/// The first request for a name configures the material using the group of
/// the geometry asking for it; later requests reuse that handle whatever
/// group they come from.
#[derive(Debug, Default)]
pub struct SharedMaterialCache {
    materials: HashMap<String, MaterialHandle>,
}

impl SharedMaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `name`, creating the material on the target on first use
    pub fn get_or_create<T: SceneTarget + ?Sized>(
        &mut self,
        name: &str,
        key: MaterialGroupKey,
        scene: &mut T,
    ) -> Result<MaterialHandle> {
        if let Some(&handle) = self.materials.get(name) {
            return Ok(handle);
        }

        let config = MaterialConfig::derive(name, key);
        let handle = scene.create_material(&config)?;
        log::debug!("Created shared material {} ({:?})", name, config.blend);
        self.materials.insert(name.to_string(), handle);

        Ok(handle)
    }

    /// Handle of an existing material
    pub fn get(&self, name: &str) -> Option<MaterialHandle> {
        self.materials.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::classifier::AlphaMode;
    use crate::scene::testing::RecordingScene;

    #[test]
    fn test_same_name_shares_handle() {
        let mut scene = RecordingScene::default();
        let mut cache = SharedMaterialCache::new();
        let opaque = MaterialGroupKey::new(true, AlphaMode::Opaque);
        let clip = MaterialGroupKey::new(true, AlphaMode::AlphaClip);

        let a = cache.get_or_create("Stone", opaque, &mut scene).unwrap();
        let b = cache.get_or_create("Stone", clip, &mut scene).unwrap();

        assert_eq!(a, b);
        assert_eq!(scene.materials.len(), 1);
        assert_eq!(scene.materials[0].blend, crate::material::BlendMode::Opaque);
    }

    #[test]
    fn test_distinct_names_never_alias() {
        let mut scene = RecordingScene::default();
        let mut cache = SharedMaterialCache::new();
        let key = MaterialGroupKey::new(true, AlphaMode::Opaque);

        let stone = cache.get_or_create("Stone", key, &mut scene).unwrap();
        let lower = cache.get_or_create("stone", key, &mut scene).unwrap();
        let dirt = cache.get_or_create("Dirt", key, &mut scene).unwrap();

        assert_ne!(stone, lower);
        assert_ne!(stone, dirt);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("Dirt"), Some(dirt));
    }
}
