//! GLSL program compilation and uniform upload
//!
//! Programs are built from source files whose extension names the stage,
//! linked once, and released on drop. Uniform locations are looked up by
//! name on first use and cached per program.

use std::collections::HashMap;
use std::ffi::{CString, NulError};
use std::path::{Path, PathBuf};

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use thiserror::Error;

use crate::render::commands::UniformValue;

/// Shader stage, derived from the source file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// `.vert`
    Vertex,
    /// `.frag`
    Fragment,
    /// `.geom`
    Geometry,
    /// `.tesc`
    TessControl,
    /// `.tese`
    TessEvaluation,
    /// `.comp`
    Compute,
}

impl ShaderStage {
    /// Stage for a file path, `None` for unknown extensions
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "vert" | "vs" => Some(Self::Vertex),
            "frag" | "fs" => Some(Self::Fragment),
            "geom" | "gs" => Some(Self::Geometry),
            "tesc" | "tcs" => Some(Self::TessControl),
            "tese" | "tes" => Some(Self::TessEvaluation),
            "comp" | "cs" => Some(Self::Compute),
            _ => None,
        }
    }

    /// GL enum for `glCreateShader`
    pub fn gl_enum(self) -> GLenum {
        match self {
            Self::Vertex => gl::VERTEX_SHADER,
            Self::Fragment => gl::FRAGMENT_SHADER,
            Self::Geometry => gl::GEOMETRY_SHADER,
            Self::TessControl => gl::TESS_CONTROL_SHADER,
            Self::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            Self::Compute => gl::COMPUTE_SHADER,
        }
    }

    /// Lowercase stage name for logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::Geometry => "geometry",
            Self::TessControl => "tessellation control",
            Self::TessEvaluation => "tessellation evaluation",
            Self::Compute => "compute",
        }
    }
}

/// Shader build errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// Source file could not be read
    #[error("Failed to read shader {}: {source}", .path.display())]
    Io {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File extension does not name a stage
    #[error("Unrecognized shader extension: {}", .0.display())]
    UnknownExtension(PathBuf),

    /// `glCreateShader`/`glCreateProgram` returned 0
    #[error("Unable to create {0} object")]
    CreateFailed(&'static str),

    /// Compilation failed; `log` is the driver info log
    #[error("Compiling {name} failed:\n{log}")]
    Compile {
        /// Source name (file path or label)
        name: String,
        /// Info log
        log: String,
    },

    /// Linking failed; `log` is the driver info log
    #[error("Linking program {label} failed:\n{log}")]
    Link {
        /// Program label
        label: String,
        /// Info log
        log: String,
    },

    /// Program used before a successful link
    #[error("Program {0} has not been linked")]
    NotLinked(String),

    /// Source or uniform name contains an interior NUL byte
    #[error("Invalid shader string: {0}")]
    InvalidSource(#[from] NulError),
}

/// Result alias for shader operations
pub type ShaderResult<T> = Result<T, ShaderError>;

/// Linked (or linking) GL program
///
/// # Safety
/// All methods call into the current GL context; the context that created
/// the program must still be current when it is used or dropped.
pub struct ShaderProgram {
    handle: GLuint,
    label: String,
    linked: bool,
    attached: Vec<GLuint>,
    uniform_locations: HashMap<String, GLint>,
}

impl ShaderProgram {
    /// Create an empty program object
    pub fn new(label: impl Into<String>) -> ShaderResult<Self> {
        let handle = unsafe { gl::CreateProgram() };
        if handle == 0 {
            return Err(ShaderError::CreateFailed("program"));
        }
        Ok(Self {
            handle,
            label: label.into(),
            linked: false,
            attached: Vec::new(),
            uniform_locations: HashMap::new(),
        })
    }

    /// Compile and link a vertex + fragment pair in one go
    pub fn from_files(label: impl Into<String>, vertex: &Path, fragment: &Path) -> ShaderResult<Self> {
        let mut program = Self::new(label)?;
        program.compile_shader(vertex)?;
        program.compile_shader(fragment)?;
        program.link()?;
        Ok(program)
    }

    /// Compile a source file and attach it, stage taken from the extension
    pub fn compile_shader(&mut self, path: &Path) -> ShaderResult<()> {
        let stage = ShaderStage::from_path(path).ok_or_else(|| ShaderError::UnknownExtension(path.to_path_buf()))?;
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.compile_shader_source(&source, stage, &path.display().to_string())
    }

    /// Compile GLSL source text and attach it
    pub fn compile_shader_source(&mut self, source: &str, stage: ShaderStage, name: &str) -> ShaderResult<()> {
        let source = CString::new(source)?;

        let shader = unsafe { gl::CreateShader(stage.gl_enum()) };
        if shader == 0 {
            return Err(ShaderError::CreateFailed(stage.name()));
        }

        let mut status = GLint::from(gl::FALSE);
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null());
            gl::CompileShader(shader);
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        }

        if status != GLint::from(gl::TRUE) {
            let log = shader_info_log(shader);
            unsafe { gl::DeleteShader(shader) };
            return Err(ShaderError::Compile {
                name: name.to_string(),
                log,
            });
        }

        unsafe { gl::AttachShader(self.handle, shader) };
        self.attached.push(shader);
        log::debug!("Compiled {} shader {}", stage.name(), name);
        Ok(())
    }

    /// Link attached stages; shader objects are released afterwards
    pub fn link(&mut self) -> ShaderResult<()> {
        if self.linked {
            return Ok(());
        }

        let mut status = GLint::from(gl::FALSE);
        unsafe {
            gl::LinkProgram(self.handle);
            gl::GetProgramiv(self.handle, gl::LINK_STATUS, &mut status);
        }
        self.release_shaders();

        if status != GLint::from(gl::TRUE) {
            return Err(ShaderError::Link {
                label: self.label.clone(),
                log: program_info_log(self.handle),
            });
        }

        self.linked = true;
        self.uniform_locations.clear();
        log::info!("Linked program {}", self.label);
        Ok(())
    }

    /// Make the program current
    pub fn use_program(&self) -> ShaderResult<()> {
        if !self.linked {
            return Err(ShaderError::NotLinked(self.label.clone()));
        }
        unsafe { gl::UseProgram(self.handle) };
        Ok(())
    }

    /// Whether [`link`](Self::link) succeeded
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// GL program name
    pub fn handle(&self) -> GLuint {
        self.handle
    }

    /// Label used in logs and errors
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Upload a uniform to this program; it must be current
    ///
    /// Unknown names resolve to location -1, which GL silently ignores. The
    /// miss is logged once.
    pub fn set_uniform(&mut self, name: &str, value: &UniformValue) -> ShaderResult<()> {
        let location = self.uniform_location(name)?;
        unsafe {
            match value {
                UniformValue::Int(v) => gl::Uniform1i(location, *v),
                UniformValue::Float(v) => gl::Uniform1f(location, *v),
                UniformValue::Vec3(v) => gl::Uniform3f(location, v.x, v.y, v.z),
                UniformValue::Mat3(m) => gl::UniformMatrix3fv(location, 1, gl::FALSE, m.as_ptr()),
                UniformValue::Mat4(m) => gl::UniformMatrix4fv(location, 1, gl::FALSE, m.as_ptr()),
            }
        }
        Ok(())
    }

    fn uniform_location(&mut self, name: &str) -> ShaderResult<GLint> {
        if let Some(&location) = self.uniform_locations.get(name) {
            return Ok(location);
        }

        let c_name = CString::new(name)?;
        let location = unsafe { gl::GetUniformLocation(self.handle, c_name.as_ptr()) };
        if location < 0 {
            log::debug!("Program {} has no active uniform {}", self.label, name);
        }
        self.uniform_locations.insert(name.to_string(), location);
        Ok(location)
    }

    /// Active uniforms as `(location, name, type)` triples
    pub fn active_uniforms(&self) -> Vec<(GLint, String, &'static str)> {
        let mut count: GLint = 0;
        let mut max_length: GLint = 0;
        unsafe {
            gl::GetProgramiv(self.handle, gl::ACTIVE_UNIFORMS, &mut count);
            gl::GetProgramiv(self.handle, gl::ACTIVE_UNIFORM_MAX_LENGTH, &mut max_length);
        }

        let mut uniforms = Vec::with_capacity(count.max(0) as usize);
        let mut buffer = vec![0u8; max_length.max(1) as usize];
        for index in 0..count.max(0) as GLuint {
            let mut length: GLsizei = 0;
            let mut size: GLint = 0;
            let mut kind: GLenum = 0;
            let name = unsafe {
                gl::GetActiveUniform(
                    self.handle,
                    index,
                    buffer.len() as GLsizei,
                    &mut length,
                    &mut size,
                    &mut kind,
                    buffer.as_mut_ptr().cast::<GLchar>(),
                );
                String::from_utf8_lossy(&buffer[..length.max(0) as usize]).into_owned()
            };
            let c_name = CString::new(name.as_str()).unwrap_or_default();
            let location = unsafe { gl::GetUniformLocation(self.handle, c_name.as_ptr()) };
            uniforms.push((location, name, type_name(kind)));
        }
        uniforms
    }

    /// Log every active uniform at info level
    pub fn print_active_uniforms(&self) {
        log::info!("Active uniforms of {}:", self.label);
        for (location, name, kind) in self.active_uniforms() {
            log::info!("  {location:>3} {name} ({kind})");
        }
    }

    fn release_shaders(&mut self) {
        for shader in self.attached.drain(..) {
            unsafe {
                gl::DetachShader(self.handle, shader);
                gl::DeleteShader(shader);
            }
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.release_shaders();
        unsafe { gl::DeleteProgram(self.handle) };
    }
}

fn shader_info_log(shader: GLuint) -> String {
    let mut length: GLint = 0;
    unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut length) };
    let mut buffer = vec![0u8; length.max(1) as usize];
    let mut written: GLsizei = 0;
    unsafe {
        gl::GetShaderInfoLog(shader, buffer.len() as GLsizei, &mut written, buffer.as_mut_ptr().cast::<GLchar>());
    }
    String::from_utf8_lossy(&buffer[..written.max(0) as usize]).into_owned()
}

fn program_info_log(program: GLuint) -> String {
    let mut length: GLint = 0;
    unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut length) };
    let mut buffer = vec![0u8; length.max(1) as usize];
    let mut written: GLsizei = 0;
    unsafe {
        gl::GetProgramInfoLog(program, buffer.len() as GLsizei, &mut written, buffer.as_mut_ptr().cast::<GLchar>());
    }
    String::from_utf8_lossy(&buffer[..written.max(0) as usize]).into_owned()
}

/// GLSL spelling of a uniform type enum
pub fn type_name(kind: GLenum) -> &'static str {
    match kind {
        gl::FLOAT => "float",
        gl::FLOAT_VEC2 => "vec2",
        gl::FLOAT_VEC3 => "vec3",
        gl::FLOAT_VEC4 => "vec4",
        gl::DOUBLE => "double",
        gl::INT => "int",
        gl::UNSIGNED_INT => "unsigned int",
        gl::BOOL => "bool",
        gl::FLOAT_MAT2 => "mat2",
        gl::FLOAT_MAT3 => "mat3",
        gl::FLOAT_MAT4 => "mat4",
        gl::SAMPLER_2D => "sampler2D",
        gl::SAMPLER_CUBE => "samplerCube",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_from_extension() {
        assert_eq!(ShaderStage::from_path(Path::new("shader/normalMap.vert")), Some(ShaderStage::Vertex));
        assert_eq!(ShaderStage::from_path(Path::new("color.frag")), Some(ShaderStage::Fragment));
        assert_eq!(ShaderStage::from_path(Path::new("a.tese")), Some(ShaderStage::TessEvaluation));
        assert_eq!(ShaderStage::from_path(Path::new("a.txt")), None);
        assert_eq!(ShaderStage::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_stage_gl_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Compute.gl_enum(), gl::COMPUTE_SHADER);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(gl::FLOAT_MAT4), "mat4");
        assert_eq!(type_name(gl::SAMPLER_CUBE), "samplerCube");
        assert_eq!(type_name(0), "?");
    }
}
