//! Frame planning
//!
//! Turns scene state into the ordered op list for one frame: walls, crate,
//! torus, floor, then flush. With multiple views enabled the same sequence
//! is planned once per quadrant and the divider lines are drawn on top.

use super::layout::{RoomLayout, FLOOR};
use super::resources::{CRATE, ENVIRONMENT_MAP, STONE, STONE_NORMAL_MAP, WHITE, WHITE_NORMAL_MAP};
use super::state::SceneState;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::camera::Camera;
use crate::render::commands::{FramePlan, MeshId, ProgramId, RenderOp, Viewport};

/// Diffuse texture unit
pub const DIFFUSE_UNIT: u32 = 0;
/// Normal map texture unit
pub const NORMAL_UNIT: u32 = 1;

/// Camera matrices for one rendered view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    /// World to view
    pub view: Mat4,
    /// View to clip
    pub projection: Mat4,
    /// Eye position for specular terms
    pub eye: Vec3,
}

impl ViewParams {
    /// Matrices for `camera` rendered into `viewport`
    pub fn from_camera(camera: &Camera, viewport: Viewport) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: SceneState::perspective(viewport),
            eye: camera.position,
        }
    }

    fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Plan a complete frame
pub fn build_frame(state: &SceneState, layout: &RoomLayout) -> FramePlan {
    let (width, height) = state.framebuffer_size();
    let full = Viewport::full(width, height);
    let mut plan = FramePlan::with_capacity(512);

    plan.push(RenderOp::Clear);

    if state.settings.multiple_views {
        let (half_width, half_height) = ((width / 2) as i32, (height / 2) as i32);
        let quadrant = |x: i32, y: i32| Viewport { x, y, width: half_width, height: half_height };

        let views = [
            (quadrant(0, half_height), &state.main_camera),
            (quadrant(half_width, half_height), &state.top_camera),
            (quadrant(0, 0), &state.side_camera),
        ];
        for (viewport, camera) in views {
            plan.push(RenderOp::Viewport(viewport));
            plan_scene(&mut plan, state, layout, &ViewParams::from_camera(camera, viewport));
        }

        plan.push(RenderOp::Viewport(full));
        plan_dividers(&mut plan, state);
    } else {
        plan.push(RenderOp::Viewport(full));
        let params = ViewParams {
            view: state.view_matrix(),
            projection: state.projection(),
            eye: state.viewpoint(),
        };
        plan_scene(&mut plan, state, layout, &params);
    }

    plan.push(RenderOp::Flush);
    plan
}

/// Plan walls, crate, torus and floor for one view
pub fn plan_scene(plan: &mut FramePlan, state: &SceneState, layout: &RoomLayout, params: &ViewParams) {
    let view_projection = params.view_projection();

    plan.push(RenderOp::UseProgram(ProgramId::NormalMap));
    point_light_uniforms(plan, state, params.eye);
    for wall in layout.walls() {
        textured_draw(plan, MeshId::Quad, wall, &view_projection, STONE, STONE_NORMAL_MAP);
    }

    plan.push(RenderOp::UseProgram(ProgramId::BasicLighting));
    point_light_uniforms(plan, state, params.eye);
    let cube = state.cube_model_matrix(layout);
    textured_draw(plan, MeshId::Cube, &cube, &view_projection, CRATE, CRATE);

    plan.push(RenderOp::UseProgram(ProgramId::Cubemap));
    plan.uniform("uLight.dir", state.light.direction);
    light_colour_uniforms(plan, state);
    material_uniforms(plan, state);
    plan.uniform("uViewpoint", params.eye);
    plan.uniform("uEnvironmentMap", DIFFUSE_UNIT as i32);
    plan.uniform("cubemapBlendFactor", state.settings.cubemap_blend_factor);
    let torus = state.torus_model_matrix(layout);
    textured_draw(plan, MeshId::Torus, &torus, &view_projection, ENVIRONMENT_MAP, ENVIRONMENT_MAP);

    // Uniforms set for the walls are still live on this program.
    plan.push(RenderOp::UseProgram(ProgramId::NormalMap));
    let floor = layout.transform(FLOOR);
    textured_draw(plan, MeshId::Quad, &floor, &view_projection, WHITE, WHITE_NORMAL_MAP);
}

fn plan_dividers(plan: &mut FramePlan, state: &SceneState) {
    plan.push(RenderOp::UseProgram(ProgramId::Color));
    plan.uniform("uModelViewProjectionMatrix", state.ortho() * Mat4::translation(0.0, 0.0, -1.0));
    plan.push(RenderOp::Draw(MeshId::DividerLines));
}

fn point_light_uniforms(plan: &mut FramePlan, state: &SceneState, eye: Vec3) {
    plan.uniform("uLight.pos", state.light.position);
    light_colour_uniforms(plan, state);
    material_uniforms(plan, state);
    plan.uniform("uViewpoint", eye);
}

fn light_colour_uniforms(plan: &mut FramePlan, state: &SceneState) {
    plan.uniform("uLight.La", state.light.ambient);
    plan.uniform("uLight.Ld", state.light.diffuse);
    plan.uniform("uLight.Ls", state.light.specular);
    plan.uniform("uLight.att", state.light.attenuation);
}

fn material_uniforms(plan: &mut FramePlan, state: &SceneState) {
    plan.uniform("uMaterial.Ka", state.material.ambient);
    plan.uniform("uMaterial.Kd", state.material.diffuse);
    plan.uniform("uMaterial.Ks", state.material.specular);
    plan.uniform("uMaterial.shininess", state.material.shininess);
}

fn textured_draw(
    plan: &mut FramePlan,
    mesh: MeshId,
    model: &Mat4,
    view_projection: &Mat4,
    diffuse: &'static str,
    normal_map: &'static str,
) {
    plan.uniform("uModelViewProjectionMatrix", view_projection * model);
    plan.uniform("uModelMatrix", *model);
    plan.uniform("uNormalMatrix", model.normal_matrix());
    plan.uniform("uTextureSampler", DIFFUSE_UNIT as i32);
    plan.uniform("uNormalSampler", NORMAL_UNIT as i32);
    plan.push(RenderOp::BindTexture { unit: DIFFUSE_UNIT, texture: diffuse });
    plan.push(RenderOp::BindTexture { unit: NORMAL_UNIT, texture: normal_map });
    plan.push(RenderOp::Draw(mesh));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoomConfig;
    use crate::render::commands::UniformValue;
    use approx::assert_relative_eq;

    fn frame(multiple_views: bool) -> FramePlan {
        let mut config = RoomConfig::default();
        config.scene.multiple_views = multiple_views;
        let state = SceneState::new(&config, 800, 600);
        build_frame(&state, &RoomLayout::new())
    }

    #[test]
    fn test_draw_order() {
        let draws: Vec<_> = frame(false).draws().collect();
        assert_eq!(draws.len(), 27);
        assert!(draws[..24].iter().all(|mesh| *mesh == MeshId::Quad));
        assert_eq!(&draws[24..], &[MeshId::Cube, MeshId::Torus, MeshId::Quad]);
    }

    #[test]
    fn test_frame_starts_with_clear_and_ends_with_flush() {
        let plan = frame(false);
        assert_eq!(plan.ops()[0], RenderOp::Clear);
        assert_eq!(plan.ops()[1], RenderOp::Viewport(Viewport::full(800, 600)));
        assert_eq!(plan.ops().last(), Some(&RenderOp::Flush));
        assert_eq!(plan.ops().iter().filter(|op| **op == RenderOp::Flush).count(), 1);
    }

    #[test]
    fn test_both_units_bound_before_every_draw() {
        let plan = frame(false);
        let mut bound = [false, false];
        for op in plan.ops() {
            match op {
                RenderOp::BindTexture { unit, .. } => bound[*unit as usize] = true,
                RenderOp::Draw(mesh) => {
                    assert_eq!(bound, [true, true], "{mesh:?} drawn without both units bound");
                    bound = [false, false];
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_uniforms_always_follow_a_program() {
        let plan = frame(true);
        let first_uniform = plan.ops().iter().position(|op| matches!(op, RenderOp::SetUniform { .. }));
        let first_program = plan.ops().iter().position(|op| matches!(op, RenderOp::UseProgram(_)));
        assert!(first_program < first_uniform);
    }

    #[test]
    fn test_textures_per_draw() {
        let plan = frame(false);
        let diffuse: Vec<_> = plan
            .ops()
            .iter()
            .filter_map(|op| match op {
                RenderOp::BindTexture { unit: DIFFUSE_UNIT, texture } => Some(*texture),
                _ => None,
            })
            .collect();
        assert!(diffuse[..24].iter().all(|name| *name == STONE));
        assert_eq!(&diffuse[24..], &[CRATE, ENVIRONMENT_MAP, WHITE]);
    }

    #[test]
    fn test_wall_mvp_uses_camera_matrices() {
        let state = SceneState::new(&RoomConfig::default(), 800, 600);
        let layout = RoomLayout::new();
        let plan = build_frame(&state, &layout);

        let first_mvp = plan.ops().iter().find_map(|op| match op {
            RenderOp::SetUniform { name: "uModelViewProjectionMatrix", value: UniformValue::Mat4(m) } => Some(*m),
            _ => None,
        });
        let expected = state.projection() * state.view_matrix() * layout.transform("BackWall1");
        assert_relative_eq!(first_mvp.unwrap(), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_multiple_views_on_one_pixel_wide_window() {
        let mut config = RoomConfig::default();
        config.scene.multiple_views = true;
        let state = SceneState::new(&config, 1, 600);

        let plan = build_frame(&state, &RoomLayout::new());
        assert_eq!(plan.draws().count(), 3 * 27 + 1);
        assert_eq!(plan.ops().last(), Some(&RenderOp::Flush));
    }

    #[test]
    fn test_multiple_views_draw_three_scenes_and_dividers() {
        let plan = frame(true);
        let draws: Vec<_> = plan.draws().collect();
        assert_eq!(draws.len(), 3 * 27 + 1);
        assert_eq!(draws.last(), Some(&MeshId::DividerLines));

        let viewports: Vec<_> = plan
            .ops()
            .iter()
            .filter_map(|op| match op {
                RenderOp::Viewport(viewport) => Some(*viewport),
                _ => None,
            })
            .collect();
        assert_eq!(
            viewports,
            vec![
                Viewport { x: 0, y: 300, width: 400, height: 300 },
                Viewport { x: 400, y: 300, width: 400, height: 300 },
                Viewport { x: 0, y: 0, width: 400, height: 300 },
                Viewport::full(800, 600),
            ]
        );
        assert_eq!(plan.ops().last(), Some(&RenderOp::Flush));
    }
}
