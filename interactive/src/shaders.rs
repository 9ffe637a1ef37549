use std::collections::HashMap;

use gl_wrapper::geometry::{Primitive, VertexAttribute};
use gl_wrapper::program::{PBError, Program, ProgramBuilder};
use gl_wrapper::renderer::GlRenderer;

use glspin::light::DirectionalLight;
use glspin::mesh::{Attribute, Topology};
use glspin::scene::{Shading, ShadingKind};
use glspin::transform::Transforms;

pub fn sources(kind: ShadingKind) -> (&'static str, &'static str) {
    match kind {
        ShadingKind::Flat => (
            include_str!("gl_shaders/flat.vert"),
            include_str!("gl_shaders/flat.frag"),
        ),
        ShadingKind::VertexColor => (
            include_str!("gl_shaders/vertex_color.vert"),
            include_str!("gl_shaders/vertex_color.frag"),
        ),
        ShadingKind::Lit => (
            include_str!("gl_shaders/lit.vert"),
            include_str!("gl_shaders/lit.frag"),
        ),
    }
}

/// One linked program per shading kind the scene uses.
pub fn build_programs(kinds: &[ShadingKind]) -> Result<HashMap<ShadingKind, Program>, PBError> {
    let mut programs = HashMap::new();

    for kind in kinds {
        let (vert, frag) = sources(*kind);
        let program = ProgramBuilder::new(vert, frag).build()?;
        log::debug!("Linked {kind:?} program {}", program.get_id());
        programs.insert(*kind, program);
    }

    Ok(programs)
}

pub fn vertex_attribute(attribute: Attribute) -> VertexAttribute {
    match attribute.components() {
        2 => VertexAttribute::Vec2,
        3 => VertexAttribute::Vec3,
        4 => VertexAttribute::Vec4,
        _ => VertexAttribute::Float,
    }
}

pub fn primitive(topology: Topology) -> Primitive {
    match topology {
        Topology::Triangles => Primitive::Triangles,
        Topology::Lines => Primitive::Lines,
    }
}

pub fn upload_uniforms(
    renderer: &mut GlRenderer,
    program: &Program,
    shading: &Shading,
    transforms: &Transforms,
    light: Option<&DirectionalLight>,
) {
    match shading {
        Shading::Flat { color } => {
            let model: [[f32; 4]; 4] = transforms.model.into();
            let view: [[f32; 4]; 4] = transforms.view.into();
            let projection: [[f32; 4]; 4] = transforms.projection.into();

            renderer.set_uniform(program, "u_ModelMatrix", &model);
            renderer.set_uniform(program, "u_ViewMatrix", &view);
            renderer.set_uniform(program, "u_ProjectionMatrix", &projection);
            renderer.set_uniform(program, "u_Color", color);
        }
        Shading::VertexColor => {
            let mvp: [[f32; 4]; 4] = transforms.mvp().into();

            renderer.set_uniform(program, "u_MvpMatrix", &mvp);
        }
        Shading::Lit => {
            let mvp: [[f32; 4]; 4] = transforms.mvp().into();
            let normal: [[f32; 3]; 3] = transforms.normal_matrix().into();
            let light = light.copied().unwrap_or_default();

            renderer.set_uniform(program, "u_MvpMatrix", &mvp);
            renderer.set_uniform(program, "u_NormalMatrix", &normal);
            renderer.set_uniform(program, "u_LightColor", &light.color);
            renderer.set_uniform(program, "u_LightDir", &light.direction());
            renderer.set_uniform(program, "u_LightColorAmbient", &light.ambient);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_sources_declare_mesh_attributes() {
        for (kind, attributes) in [
            (ShadingKind::Flat, vec![Attribute::Position2]),
            (
                ShadingKind::VertexColor,
                vec![Attribute::Position3, Attribute::Color3],
            ),
            (
                ShadingKind::Lit,
                vec![Attribute::Position3, Attribute::Color3, Attribute::Normal3],
            ),
        ] {
            let (vert, _) = sources(kind);
            for attribute in attributes {
                assert!(vert.contains(attribute.name()), "{kind:?} lacks {attribute:?}");
            }
        }
    }

    #[test]
    fn shader_sources_declare_uniforms() {
        let (vert, frag) = sources(ShadingKind::Lit);

        for name in ["u_MvpMatrix", "u_NormalMatrix"] {
            assert!(vert.contains(name));
        }
        for name in ["u_LightColor", "u_LightDir", "u_LightColorAmbient"] {
            assert!(frag.contains(name));
        }

        let (vert, frag) = sources(ShadingKind::Flat);
        assert!(vert.contains("u_ModelMatrix"));
        assert!(frag.contains("u_Color"));
    }

    #[test]
    fn attribute_mapping() {
        assert_eq!(vertex_attribute(Attribute::Position2).size(), 2);
        assert_eq!(vertex_attribute(Attribute::Normal3).size(), 3);
        assert_eq!(primitive(Topology::Lines), Primitive::Lines);
    }
}
