//! Texture lookup supplied by the host
//!
//! The simulation never touches pixels. It only needs a stable handle to hand
//! back to the renderer and the texture size, which drives hitboxes.

use std::collections::HashMap;

use glam::DVec2;

use crate::error::ConfigError;
use crate::sim::EntityKind;

/// Opaque texture handle, meaningful only to the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A resolved texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureInfo {
    pub id: TextureId,
    pub width: f64,
    pub height: f64,
}

impl TextureInfo {
    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// Key -> texture map registered once at setup
#[derive(Debug, Clone, Default)]
pub struct TextureAtlas {
    textures: HashMap<String, TextureInfo>,
    next_id: u32,
}

impl TextureAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture, returning its handle. Re-registering a key replaces its size.
    pub fn insert(&mut self, key: impl Into<String>, width: f64, height: f64) -> TextureId {
        let key = key.into();
        if let Some(existing) = self.textures.get_mut(&key) {
            existing.width = width;
            existing.height = height;
            return existing.id;
        }
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(key, TextureInfo { id, width, height });
        id
    }

    pub fn get(&self, key: &str) -> Option<TextureInfo> {
        self.textures.get(key).copied()
    }

    /// Resolve a key that must exist for `kind` to work
    pub fn require(&self, kind: EntityKind, key: &str) -> Result<TextureInfo, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingTexture {
            kind,
            key: key.to_string(),
        })
    }

    /// Resolve the player ship texture
    pub fn require_player(&self, key: &str) -> Result<TextureInfo, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingPlayerTexture {
            key: key.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_stable_ids() {
        let mut atlas = TextureAtlas::new();
        let a = atlas.insert("a.png", 10.0, 20.0);
        let b = atlas.insert("b.png", 5.0, 5.0);
        assert_ne!(a, b);
        assert_eq!(atlas.insert("a.png", 12.0, 20.0), a);
        assert_eq!(atlas.get("a.png").map(|t| t.width), Some(12.0));
        assert_eq!(atlas.len(), 2);
    }

    #[test]
    fn test_require_missing_is_config_error() {
        let atlas = TextureAtlas::new();
        assert!(atlas.is_empty());
        let err = atlas.require(EntityKind::Hostile, "nope.png").unwrap_err();
        assert!(matches!(err, ConfigError::MissingTexture { key, .. } if key == "nope.png"));
    }
}
