mod generate;
mod install;

pub use generate::{
    base_fragments, generate, migration_path, ArtifactKind, ArtifactReport, GenerateRequest,
    GenerationReport, GenerationScope,
};
pub use install::{
    install, publish_stubs, ApiSuperControllerTemplate, ConfigTomlTemplate, LayoutTemplate,
    WebSuperControllerTemplate,
};
