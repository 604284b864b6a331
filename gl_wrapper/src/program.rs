use std::ffi::CString;
use std::ptr;

use thiserror::Error;

/// GL truncates info logs to this many bytes.
const INFO_LOG_CAP: usize = 512;

/// Compiles and links a vertex/fragment shader pair into a [`Program`].
///
/// Unlike the usual tutorial flow, a compile or link failure is fatal:
/// `build` returns the truncated driver log instead of handing back a
/// half-linked program object.
pub struct ProgramBuilder<'a> {
    vertex_src: &'a str,
    fragment_src: &'a str,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vertex_src: &'a str, fragment_src: &'a str) -> Self {
        Self {
            vertex_src,
            fragment_src,
        }
    }

    pub fn build(self) -> Result<Program, ProgramError> {
        let vertex = compile_shader(ShaderStage::Vertex, self.vertex_src)?;

        let fragment = match compile_shader(ShaderStage::Fragment, self.fragment_src) {
            Ok(shader) => shader,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex) };
                return Err(e);
            }
        };

        let id = unsafe { gl::CreateProgram() };

        let mut status = 0;

        unsafe {
            gl::AttachShader(id, vertex);
            gl::AttachShader(id, fragment);
            gl::LinkProgram(id);

            // shader objects are not needed once linked
            gl::DeleteShader(vertex);
            gl::DeleteShader(fragment);

            gl::GetProgramiv(id, gl::LINK_STATUS, &mut status);
        }

        if status == 0 {
            let log = program_info_log(id);
            unsafe { gl::DeleteProgram(id) };
            return Err(ProgramError::Link(log));
        }

        Ok(Program { id })
    }
}

/// Owning handle for a linked shader program.
pub struct Program {
    id: u32,
}

impl Program {
    pub fn get_id(&self) -> u32 {
        self.id
    }

    /// Uploads a column-major 4x4 matrix uniform, resolving the location
    /// by name. A name the linker optimized out or never saw is an error
    /// rather than a silent no-op.
    pub fn set_uniform_mat4(&self, name: &str, value: &[f32; 16]) -> Result<(), ProgramError> {
        let c_name =
            CString::new(name).map_err(|_| ProgramError::InvalidName(name.to_string()))?;

        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };

        if location < 0 {
            return Err(ProgramError::UniformNotFound(name.to_string()));
        }

        unsafe {
            gl::UseProgram(self.id);
            gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr());
        }

        Ok(())
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(&self) -> u32 {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

fn compile_shader(stage: ShaderStage, src: &str) -> Result<u32, ProgramError> {
    let src = CString::new(src).map_err(|_| ProgramError::InvalidSource)?;

    let shader = unsafe { gl::CreateShader(stage.gl_enum()) };

    let mut status = 0;

    unsafe {
        gl::ShaderSource(shader, 1, &src.as_ptr(), ptr::null());
        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
    }

    if status == 0 {
        let log = shader_info_log(shader);
        unsafe { gl::DeleteShader(shader) };

        return Err(match stage {
            ShaderStage::Vertex => ProgramError::VertexCompilation(log),
            ShaderStage::Fragment => ProgramError::FragmentCompilation(log),
        });
    }

    Ok(shader)
}

fn shader_info_log(shader: u32) -> String {
    let mut buf = [0u8; INFO_LOG_CAP];
    let mut len = 0;

    unsafe {
        gl::GetShaderInfoLog(
            shader,
            INFO_LOG_CAP as i32,
            &mut len,
            buf.as_mut_ptr().cast(),
        );
    }

    let len = (len.max(0) as usize).min(INFO_LOG_CAP);

    String::from_utf8_lossy(&buf[..len]).into_owned()
}

fn program_info_log(program: u32) -> String {
    let mut buf = [0u8; INFO_LOG_CAP];
    let mut len = 0;

    unsafe {
        gl::GetProgramInfoLog(
            program,
            INFO_LOG_CAP as i32,
            &mut len,
            buf.as_mut_ptr().cast(),
        );
    }

    let len = (len.max(0) as usize).min(INFO_LOG_CAP);

    String::from_utf8_lossy(&buf[..len]).into_owned()
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("vertex shader compilation failed: {0}")]
    VertexCompilation(String),
    #[error("fragment shader compilation failed: {0}")]
    FragmentCompilation(String),
    #[error("program linking failed: {0}")]
    Link(String),
    #[error("shader source contains a NUL byte")]
    InvalidSource,
    #[error("{0:?} is not a valid uniform name")]
    InvalidName(String),
    #[error("uniform {0:?} not found in program")]
    UniformNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_source_with_nul_byte() {
        // checked before any GL call, so no context is needed
        let res = compile_shader(ShaderStage::Vertex, "void main() {}\0junk");

        assert!(matches!(res, Err(ProgramError::InvalidSource)));
    }
}
