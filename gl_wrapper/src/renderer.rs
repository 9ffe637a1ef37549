use crate::geometry::Geometry;
use crate::program::{Program, UniformValue};

pub struct GlRenderer {
    current_program: u32,
    depth_test: bool,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self {
            current_program: 0,
            depth_test: false,
        }
    }

    pub fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }
    }

    /// Uniforms are per-program state, so the program gets bound first.
    pub fn set_uniform<V: UniformValue>(&mut self, program: &Program, name: &str, value: &V) {
        self.use_program(program);

        if let Some(location) = program.uniform_location(name) {
            value.upload(location);
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        self.use_program(program);

        let mode = geometry.primitive().gl_mode();

        unsafe {
            gl::BindVertexArray(geometry.vao());

            if geometry.is_indexed() {
                gl::DrawElements(
                    mode,
                    geometry.elements() as i32,
                    gl::UNSIGNED_SHORT,
                    std::ptr::null(),
                );
            } else {
                gl::DrawArrays(mode, 0, geometry.elements() as i32);
            }

            gl::BindVertexArray(0);
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn set_depth_test(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::DEPTH_TEST);
            } else {
                gl::Disable(gl::DEPTH_TEST);
            }
        }
        self.depth_test = enabled;
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        let mut mask = gl::COLOR_BUFFER_BIT;
        if self.depth_test {
            mask |= gl::DEPTH_BUFFER_BIT;
        }

        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(mask);
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
