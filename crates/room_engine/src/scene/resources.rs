//! GPU resource loading for the room

use crate::assets::paths::{
    BASIC_LIGHTING_SHADER, BASIC_UNIFORM_SHADER, COLOR_SHADER, CUBEMAP_SHADER, IMAGE_DIR, NORMAL_MAP_SHADER,
};
use crate::assets::{AssetPaths, ShaderPair};
use crate::render::commands::{MeshId, ProgramId};
use crate::render::gl::{CubemapFaces, Geometry, GpuResources, Model, Primitive, ShaderProgram, Texture};
use crate::render::vertex::{DIVIDER_LINE_VERTICES, QUAD_VERTICES};

use super::SceneError;

/// Wall diffuse texture
pub const STONE: &str = "Stone";
/// Wall normal map
pub const STONE_NORMAL_MAP: &str = "StoneNormalMap";
/// Floor diffuse texture
pub const WHITE: &str = "White";
/// Floor normal map
pub const WHITE_NORMAL_MAP: &str = "WhiteNormalMap";
/// Crate texture, used for both units
pub const CRATE: &str = "Crate";
/// Environment cubemap, used for both units
pub const ENVIRONMENT_MAP: &str = "EnvironmentMap";

/// 2D textures by table key and file name
pub const TEXTURE_FILES: [(&str, &str); 5] = [
    (STONE, "Fieldstone.bmp"),
    (STONE_NORMAL_MAP, "FieldstoneBumpDOT3.bmp"),
    (WHITE, "White.bmp"),
    (WHITE_NORMAL_MAP, "WhiteBumpDOT3.bmp"),
    (CRATE, "diffuse.bmp"),
];

/// Programs the frame plan uses, by id
pub const PROGRAMS: [(ProgramId, ShaderPair); 4] = [
    (ProgramId::NormalMap, NORMAL_MAP_SHADER),
    (ProgramId::BasicLighting, BASIC_LIGHTING_SHADER),
    (ProgramId::Cubemap, CUBEMAP_SHADER),
    (ProgramId::Color, COLOR_SHADER),
];

/// Models by id, file name and whether `v` is flipped
pub const MODELS: [(MeshId, &str, bool); 2] = [
    (MeshId::Torus, "torus.obj", false),
    (MeshId::Cube, "cube.obj", true),
];

fn build_program(id: ProgramId, pair: ShaderPair, paths: &AssetPaths) -> Result<ShaderProgram, SceneError> {
    let program = ShaderProgram::from_files(
        format!("{id:?}"),
        &paths.resolve(pair.vertex),
        &paths.resolve(pair.fragment),
    )?;
    Ok(program)
}

/// Compile every program, load every texture and model, upload geometry
///
/// The basic-uniform program is compiled, made current and inspected as a
/// startup check; it is not kept.
pub fn load(paths: &AssetPaths) -> Result<GpuResources, SceneError> {
    let mut resources = GpuResources::new();

    let basic_uniform = build_program(ProgramId::BasicUniform, BASIC_UNIFORM_SHADER, paths)?;
    basic_uniform.use_program()?;
    basic_uniform.print_active_uniforms();
    drop(basic_uniform);

    for (id, pair) in PROGRAMS {
        resources.insert_program(id, build_program(id, pair, paths)?);
    }

    for (name, file) in TEXTURE_FILES {
        resources.insert_texture(name, Texture::generate(&paths.image(file))?);
    }
    let faces = CubemapFaces::from_prefix(&paths.resolve(IMAGE_DIR), "cm", "bmp");
    resources.insert_texture(ENVIRONMENT_MAP, Texture::generate_cubemap(&faces)?);

    for (id, file, flip_uv) in MODELS {
        resources.insert_model(id, Model::load_model(&paths.model(file), flip_uv)?);
    }

    resources.insert_geometry(MeshId::Quad, Geometry::from_vertices(&QUAD_VERTICES, Primitive::TriangleStrip));
    resources.insert_geometry(MeshId::DividerLines, Geometry::from_vertices(&DIVIDER_LINE_VERTICES, Primitive::Lines));

    log::info!(
        "Scene resources loaded: {} programs, {} textures, {} models",
        PROGRAMS.len(),
        resources.texture_count(),
        MODELS.len()
    );
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_every_plan_reference() {
        let names: Vec<_> = TEXTURE_FILES.iter().map(|(name, _)| *name).collect();
        for name in [STONE, STONE_NORMAL_MAP, WHITE, WHITE_NORMAL_MAP, CRATE] {
            assert!(names.contains(&name));
        }
        let programs: Vec<_> = PROGRAMS.iter().map(|(id, _)| *id).collect();
        assert!(!programs.contains(&ProgramId::BasicUniform));
        assert_eq!(programs.len(), 4);
    }
}
