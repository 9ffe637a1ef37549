pub mod geometry;
pub mod program;
pub mod renderer;

/// Reads a string from `glGetString`, e.g. `gl::VERSION` or `gl::RENDERER`.
pub fn get_string(name: gl::types::GLenum) -> Option<String> {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return None;
        }

        Some(
            std::ffi::CStr::from_ptr(ptr as *const std::ffi::c_char)
                .to_string_lossy()
                .into_owned(),
        )
    }
}
