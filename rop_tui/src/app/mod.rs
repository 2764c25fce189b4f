pub mod logging;
pub mod run;

use rop_core::{ArtifactPaths, RopPipeline};

/// Everything the screens need besides their own state.
pub struct Context {
    pub pipeline: RopPipeline,
    pub paths: ArtifactPaths,
}

#[cfg(test)]
pub(crate) fn test_context() -> Context {
    use rop_core::Artifacts;

    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../rop_core/tests/fixtures");
    let paths = ArtifactPaths::in_dir(&dir);
    let pipeline = Artifacts::load(&paths)
        .expect("fixture artifacts")
        .into_pipeline();
    Context { pipeline, paths }
}
