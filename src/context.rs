//! The explicit handle to shared rendering resources.

use std::sync::Arc;

use crate::bundle::Bundle;
use crate::cache::MaskCache;
use crate::config::RenderConfig;
use crate::error::MaskError;
use crate::icon::Size;
use crate::mask::{Mask, MaskFactory, MaskSource};
use crate::registry::{RenderQueue, ResourceRegistry};

/// Shared rendering resources: mask factory, cache, registry and the
/// background render queue.
///
/// Cloning is cheap and every clone refers to the same cache, registry and
/// queue. Create one per process (or per display scale) and pass it to every
/// [`IconView`](crate::IconView).
#[derive(Debug, Clone)]
pub struct IconContext {
    factory: MaskFactory,
    cache: Arc<MaskCache>,
    registry: Arc<ResourceRegistry>,
    queue: Arc<RenderQueue>,
}

impl IconContext {
    pub fn new(config: &RenderConfig) -> Self {
        let registry = Arc::new(ResourceRegistry::new());
        let cache = Arc::new(MaskCache::new(config.cache_budget, Arc::clone(&registry)));
        let factory = MaskFactory::new(
            config.effective_scale(),
            Bundle::new(config.resource_root.clone()),
        );
        Self {
            factory,
            cache,
            registry,
            queue: Arc::new(RenderQueue::default()),
        }
    }

    /// Device pixels per point.
    pub fn scale(&self) -> f32 {
        self.factory.scale()
    }

    pub fn factory(&self) -> &MaskFactory {
        &self.factory
    }

    pub fn cache(&self) -> &Arc<MaskCache> {
        &self.cache
    }

    pub fn registry(&self) -> &Arc<ResourceRegistry> {
        &self.registry
    }

    pub fn queue(&self) -> &Arc<RenderQueue> {
        &self.queue
    }

    /// Returns the mask for `source`, consulting the cache for named sources.
    pub fn mask_for(&self, source: &MaskSource, size: Size) -> Result<Arc<Mask>, MaskError> {
        let Some(key) = self.factory.key_for(source, size) else {
            return self.factory.create_mask(source, size).map(Arc::new);
        };

        if let Some(mask) = self.cache.get(&key) {
            return Ok(mask);
        }

        // A concurrent pre-render of the same key may race us here; the
        // later `put` simply replaces an identical mask.
        let mask = Arc::new(self.factory.create_mask(source, size)?);
        self.cache.put(key, Arc::clone(&mask));
        Ok(mask)
    }
}

impl Default for IconContext {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::tests::{CIRCLE_SVG, TempBundle};
    use crate::mask::MaskKey;
    use image::{Rgba, RgbaImage};

    #[test]
    fn named_masks_are_cached() {
        let tmp = TempBundle::new();
        tmp.write("Icon1.svg", CIRCLE_SVG.as_bytes());
        let context = IconContext::new(&RenderConfig {
            resource_root: tmp.dir.clone(),
            ..RenderConfig::default()
        });

        let source = MaskSource::resource("Icon1");
        let first = context.mask_for(&source, Size::ZERO).unwrap();
        let second = context.mask_for(&source, Size::ZERO).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(context.cache().contains(&MaskKey::new("Icon1", Size::ZERO, 1.0)));

        // A different size is a different key.
        let sized = context.mask_for(&source, Size::new(8.0, 8.0)).unwrap();
        assert!(!Arc::ptr_eq(&first, &sized));
        assert_eq!(context.cache().len(), 2);
    }

    #[test]
    fn image_and_vector_of_one_name_cache_apart() {
        let tmp = TempBundle::new();
        tmp.write_png("Icon1.png", &RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
        tmp.write("Icon1.svg", CIRCLE_SVG.as_bytes());
        let context = IconContext::new(&RenderConfig {
            resource_root: tmp.dir.clone(),
            ..RenderConfig::default()
        });

        let image = context
            .mask_for(&MaskSource::ImageNamed("Icon1".into()), Size::ZERO)
            .unwrap();
        let vector = context
            .mask_for(&MaskSource::VectorNamed("Icon1".into()), Size::ZERO)
            .unwrap();
        assert_eq!(image.dimensions().width, 4);
        assert_ne!(*image, *vector);

        let resource = context.mask_for(&MaskSource::resource("Icon1"), Size::ZERO).unwrap();
        assert_eq!(*resource, *image);
        assert_eq!(context.cache().len(), 3);
    }

    #[test]
    fn failures_are_not_cached() {
        let tmp = TempBundle::new();
        let context = IconContext::new(&RenderConfig {
            resource_root: tmp.dir.clone(),
            ..RenderConfig::default()
        });
        assert!(context.mask_for(&MaskSource::resource("Nope"), Size::ZERO).is_err());
        assert!(context.cache().is_empty());
    }

    #[test]
    fn clones_share_the_cache() {
        let context = IconContext::default();
        let clone = context.clone();
        assert!(Arc::ptr_eq(context.cache(), clone.cache()));
        assert!(Arc::ptr_eq(context.registry(), clone.registry()));
        assert!(Arc::ptr_eq(context.cache().registry(), context.registry()));
    }
}
