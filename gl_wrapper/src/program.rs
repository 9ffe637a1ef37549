use gl::types::{GLenum, GLint, GLuint};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_char, CString};
use thiserror::Error;

const LOG_LEN: usize = 1024;

pub struct ProgramBuilder<'a> {
    vert: &'a str,
    frag: &'a str,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vert_src: &'a str, frag_src: &'a str) -> Self {
        Self {
            vert: vert_src,
            frag: frag_src,
        }
    }

    pub fn build(self) -> Result<Program, PBError> {
        let vert = compile_shader(self.vert, gl::VERTEX_SHADER)?;
        let frag = match compile_shader(self.frag, gl::FRAGMENT_SHADER) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) }
                return Err(e);
            }
        };

        let mut success: GLint = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            gl::DetachShader(program, vert);
            gl::DetachShader(program, frag);
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
            if success != gl::TRUE as GLint {
                let mut buf = [0_u8; LOG_LEN];
                gl::GetProgramInfoLog(
                    program,
                    LOG_LEN as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
                gl::DeleteProgram(program);

                return Err(PBError::Linking(info_log(&buf)));
            }

            Ok(Program {
                id: program,
                uniforms: RefCell::new(HashMap::new()),
            })
        }
    }
}

fn compile_shader(src: &str, kind: GLenum) -> Result<GLuint, PBError> {
    let src = CString::new(src).map_err(|_| PBError::InvalidSource)?;
    let mut success: GLint = 0;

    unsafe {
        let shader = gl::CreateShader(kind);

        gl::ShaderSource(shader, 1, &src.as_ptr(), std::ptr::null());
        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);

        if success != gl::TRUE as GLint {
            let mut buf = [0_u8; LOG_LEN];
            gl::GetShaderInfoLog(
                shader,
                LOG_LEN as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
            gl::DeleteShader(shader);

            return Err(PBError::Compilation(info_log(&buf)));
        }

        Ok(shader)
    }
}

/// Info logs are nul terminated, unless they fill the whole buffer.
fn info_log(buf: &[u8]) -> String {
    let data = buf.split(|a| *a == 0).next().unwrap_or(buf);

    String::from_utf8_lossy(data).trim_end().to_string()
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("shader source contains a nul byte")]
    InvalidSource,
    #[error("{0}")]
    Compilation(String),
    #[error("{0}")]
    Linking(String),
}

pub struct Program {
    id: GLuint,
    uniforms: RefCell<HashMap<String, Option<GLint>>>,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        let location = match CString::new(name) {
            Ok(c_name) => unsafe { gl::GetAttribLocation(self.id, c_name.as_ptr()) },
            Err(_) => -1,
        };

        if location < 0 {
            log::warn!("Failed to get storage location of {name}");
            return None;
        }

        Some(location as u32)
    }

    /// Looks the uniform up once and remembers the answer, including misses.
    pub fn uniform_location(&self, name: &str) -> Option<GLint> {
        if let Some(location) = self.uniforms.borrow().get(name) {
            return *location;
        }

        let location = match CString::new(name) {
            Ok(c_name) => unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) },
            Err(_) => -1,
        };

        let location = if location < 0 {
            log::warn!("Uniform {name} not found in program {}", self.id);
            None
        } else {
            Some(location)
        };

        self.uniforms
            .borrow_mut()
            .insert(name.to_string(), location);

        location
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

/// Value that can be uploaded into a uniform of the currently used program.
pub trait UniformValue {
    fn upload(&self, location: GLint);
}

impl UniformValue for f32 {
    fn upload(&self, location: GLint) {
        unsafe { gl::Uniform1f(location, *self) }
    }
}

impl UniformValue for [f32; 3] {
    fn upload(&self, location: GLint) {
        unsafe { gl::Uniform3f(location, self[0], self[1], self[2]) }
    }
}

impl UniformValue for [[f32; 3]; 3] {
    fn upload(&self, location: GLint) {
        unsafe { gl::UniformMatrix3fv(location, 1, gl::FALSE, self.as_ptr() as *const f32) }
    }
}

impl UniformValue for [[f32; 4]; 4] {
    fn upload(&self, location: GLint) {
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, self.as_ptr() as *const f32) }
    }
}
