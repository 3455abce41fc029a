/// Scene lookup traits.
///
/// The camera only needs a narrow window into the game's scene: find an
/// object by name, walk down to its draw modules, and ask one for an
/// animated bone transform. The game implements these traits on its own
/// object model; the engine ships SceneRegistry for demos and tests.

use glam::Mat4;

/// Name-based object lookup
pub trait SceneLookup: Send + Sync {
    fn find_object_by_name(&self, name: &str) -> Option<&dyn SceneObject>;
}

/// A named game object that may carry a visual representation
pub trait SceneObject: Send + Sync {
    fn name(&self) -> &str;

    /// The object's visual, if it has one
    fn drawable(&self) -> Option<&dyn Drawable>;
}

/// A visual made of ordered draw modules
pub trait Drawable: Send + Sync {
    fn draw_modules(&self) -> Vec<&dyn DrawModule>;
}

/// One rendering module of a drawable
pub trait DrawModule: Send + Sync {
    /// Bone transform access, when this module drives an animated model
    fn bone_query(&self) -> Option<&dyn BoneTransformQuery>;
}

/// Animated bone transform lookup
pub trait BoneTransformQuery: Send + Sync {
    /// World transform of a named bone at the current animation time
    fn bone_transform(&self, bone: &str) -> Option<Mat4>;
}
