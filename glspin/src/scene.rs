use std::fmt::{Display, Formatter};

use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::animation::Spinner;
use crate::config::{ConfigError, DemoConfig};
use crate::light::DirectionalLight;
use crate::mesh::{self, Mesh};
use crate::transform::{rotation, Camera, Projection, Transforms, View};

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Demo {
    /// Two nested triangles, no transforms
    Triangles,
    /// Triangle spinning around the Y axis under an orthographic camera
    Spin,
    /// Cube lit by a directional light
    Cube,
    /// Pixel sized triangle next to an axes helper
    Shape,
}

impl Demo {
    pub fn title(&self) -> &'static str {
        match self {
            Demo::Triangles => "Triangles",
            Demo::Spin => "Spinning triangle",
            Demo::Cube => "Lit cube",
            Demo::Shape => "Shape and axes",
        }
    }
}

impl Display for Demo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShadingKind {
    Flat,
    VertexColor,
    Lit,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shading {
    Flat { color: [f32; 3] },
    VertexColor,
    Lit,
}

impl Shading {
    pub fn kind(&self) -> ShadingKind {
        match self {
            Shading::Flat { .. } => ShadingKind::Flat,
            Shading::VertexColor => ShadingKind::VertexColor,
            Shading::Lit => ShadingKind::Lit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: Mesh,
    pub shading: Shading,
    /// Follows the scene spinner when set, otherwise stays put
    pub spins: bool,
}

#[derive(Debug, Clone)]
pub struct DemoScene {
    pub demo: Demo,
    pub clear_color: [f32; 3],
    pub depth_test: bool,
    pub camera: Camera,
    pub spinner: Spinner,
    pub light: Option<DirectionalLight>,
    pub objects: Vec<SceneObject>,
}

impl DemoScene {
    pub fn new(demo: Demo) -> Self {
        match demo {
            Demo::Triangles => Self {
                demo,
                clear_color: [0.0; 3],
                depth_test: false,
                camera: Camera::identity(),
                spinner: Spinner::fixed(),
                light: None,
                objects: vec![SceneObject {
                    mesh: mesh::double_triangle(),
                    shading: Shading::Flat { color: RED },
                    spins: false,
                }],
            },
            Demo::Spin => Self {
                demo,
                clear_color: [0.0; 3],
                depth_test: false,
                camera: Camera {
                    view: View::look_at([1.0, 1.0, 1.0], [0.0, 0.0, 0.0]),
                    projection: Projection::Orthographic {
                        left: -1.0,
                        right: 1.0,
                        bottom: -1.0,
                        top: 1.0,
                        near: 0.1,
                        far: 1000.0,
                    },
                },
                spinner: Spinner::new(180.0, Vector3::unit_y()),
                light: None,
                objects: vec![SceneObject {
                    mesh: mesh::triangle(),
                    shading: Shading::Flat { color: RED },
                    spins: true,
                }],
            },
            Demo::Cube => Self {
                demo,
                clear_color: [0.0; 3],
                depth_test: true,
                camera: Camera {
                    view: View::look_at([3.0, 3.0, 7.0], [0.0, 0.0, 0.0]),
                    projection: Projection::Perspective {
                        fovy_deg: 30.0,
                        near: 1.0,
                        far: 100.0,
                    },
                },
                spinner: Spinner::new(45.0, Vector3::unit_y()),
                light: Some(DirectionalLight::default()),
                objects: vec![SceneObject {
                    mesh: mesh::cube(RED),
                    shading: Shading::Lit,
                    spins: true,
                }],
            },
            Demo::Shape => Self {
                demo,
                clear_color: [0.0; 3],
                depth_test: true,
                camera: Camera {
                    view: View::look_at([100.0, 100.0, 100.0], [0.0, 0.0, 0.0]),
                    projection: Projection::Orthographic {
                        left: -200.0,
                        right: 200.0,
                        bottom: -200.0,
                        top: 200.0,
                        near: -1000.0,
                        far: 1000.0,
                    },
                },
                spinner: Spinner::new(180.0, Vector3::unit_y()),
                light: None,
                objects: vec![
                    SceneObject {
                        mesh: mesh::shape_triangle(),
                        shading: Shading::Flat { color: WHITE },
                        spins: true,
                    },
                    SceneObject {
                        mesh: mesh::axes(100.0),
                        shading: Shading::VertexColor,
                        spins: false,
                    },
                ],
            },
        }
    }

    pub fn apply_config(&mut self, config: &DemoConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(velocity) = config.angular_velocity {
            log::debug!("{}: angular velocity {velocity} deg/s", self.demo);
            self.spinner.velocity = velocity;
        }

        if let Some(color) = config.clear_color {
            self.clear_color = color;
        }

        if let Some(light) = &config.light {
            self.light = Some(light.to_light()?);
        }

        Ok(())
    }

    /// Shading kinds in the order they first appear.
    pub fn shading_kinds(&self) -> Vec<ShadingKind> {
        let mut kinds = Vec::new();
        for object in &self.objects {
            let kind = object.shading.kind();
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }

        kinds
    }

    pub fn object_transforms(&self, object: &SceneObject, aspect: f32) -> Transforms {
        let model = if object.spins {
            rotation(self.spinner.angle(), self.spinner.axis)
        } else {
            Matrix4::identity()
        };

        Transforms {
            model,
            view: self.camera.view.matrix(),
            projection: self.camera.projection.matrix(aspect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LightConfig;
    use cgmath::{InnerSpace, Vector4};
    use std::time::Duration;

    #[test]
    fn triangles_are_static() {
        let mut scene = DemoScene::new(Demo::Triangles);
        scene.spinner.advance(Duration::from_secs(2));

        let t = scene.object_transforms(&scene.objects[0], 1.0);
        let v = Vector4::new(0.0, 0.8, 0.0, 1.0);
        assert!((t.mvp() * v - v).magnitude() < 1e-6);
    }

    #[test]
    fn spin_rotates_object() {
        let mut scene = DemoScene::new(Demo::Spin);
        scene.spinner.advance(Duration::from_millis(500));

        let t = scene.object_transforms(&scene.objects[0], 1.0);
        let moved = t.model * Vector4::new(0.5, 0.0, 0.0, 1.0);
        assert!((moved - Vector4::new(0.0, 0.0, -0.5, 1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn shape_axes_do_not_spin() {
        let mut scene = DemoScene::new(Demo::Shape);
        scene.spinner.advance(Duration::from_millis(300));

        let axes = &scene.objects[1];
        assert!(!axes.spins);
        assert_eq!(scene.object_transforms(axes, 1.0).model, Matrix4::identity());
        assert_eq!(
            scene.shading_kinds(),
            vec![ShadingKind::Flat, ShadingKind::VertexColor]
        );
    }

    #[test]
    fn cube_is_lit_and_depth_tested() {
        let scene = DemoScene::new(Demo::Cube);

        assert!(scene.depth_test);
        assert!(scene.light.is_some());
        assert_eq!(scene.shading_kinds(), vec![ShadingKind::Lit]);

        // whole cube must sit between the near and far planes
        let t = scene.object_transforms(&scene.objects[0], 1.0);
        let mesh = &scene.objects[0].mesh;
        for vertex in mesh.vertices.chunks(mesh.stride()) {
            let clip = t.mvp() * Vector4::new(vertex[0], vertex[1], vertex[2], 1.0);
            let ndc_z = clip.z / clip.w;
            assert!((-1.0..=1.0).contains(&ndc_z));
        }
    }

    #[test]
    fn config_overrides_scene() {
        let mut scene = DemoScene::new(Demo::Cube);
        let config = DemoConfig {
            angular_velocity: Some(10.0),
            clear_color: Some([0.5, 0.5, 0.5]),
            light: Some(LightConfig {
                direction: [0.0, 0.0, 2.0],
                ..Default::default()
            }),
            ..Default::default()
        };

        scene.apply_config(&config).unwrap();

        assert_eq!(scene.spinner.velocity, 10.0);
        assert_eq!(scene.clear_color, [0.5, 0.5, 0.5]);
        assert_eq!(scene.light.unwrap().direction(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn invalid_config_leaves_scene() {
        let mut scene = DemoScene::new(Demo::Spin);
        let config = DemoConfig {
            angular_velocity: Some(10.0),
            clear_color: Some([-1.0, 0.0, 0.0]),
            ..Default::default()
        };

        assert!(scene.apply_config(&config).is_err());
        assert_eq!(scene.spinner.velocity, 180.0);
    }
}
