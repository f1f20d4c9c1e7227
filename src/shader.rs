//! Compiling and linking the triangle's shader program.
//!
//! Compile and link failures never abort. They are logged and the program object is kept as-is,
//! so the frame loop still runs and the draw call may simply produce nothing.

use gl::types::*;

pub const VERTEX_SHADER_SOURCE: &str = include_str!("./triangle_vertex_shader.glsl");
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("./triangle_fragment_shader.glsl");

/// Size of the buffer info logs are read into. Longer logs are cut off.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u32)]
pub enum ShaderKind {
    Vertex = gl::VERTEX_SHADER,
    Fragment = gl::FRAGMENT_SHADER,
}

impl ShaderKind {
    fn label(&self) -> &'static str {
        use self::ShaderKind::*;
        match self {
            Vertex => "VERTEX",
            Fragment => "FRAGMENT",
        }
    }
}

/// Outcome of one compile or link step.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StageStatus {
    Succeeded,
    /// Carries the (possibly empty) info log.
    Failed(String),
}

impl StageStatus {
    pub fn succeeded(&self) -> bool {
        *self == StageStatus::Succeeded
    }
}

/// What happened while building a [`Program`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProgramReport {
    pub vertex: StageStatus,
    pub fragment: StageStatus,
    pub link: StageStatus,
}

impl ProgramReport {
    /// `false` means degraded mode: the program is still bound every frame but may draw nothing.
    pub fn is_usable(&self) -> bool {
        self.vertex.succeeded() && self.fragment.succeeded() && self.link.succeeded()
    }

    /// One message per failed step, in build order.
    pub fn diagnostics(&self) -> Vec<String> {
        let stages = [
            (format!("ERROR::SHADER::{}::COMPILATION_FAILED", ShaderKind::Vertex.label()), &self.vertex),
            (format!("ERROR::SHADER::{}::COMPILATION_FAILED", ShaderKind::Fragment.label()), &self.fragment),
            ("ERROR::PROGRAM::LINKING_FAILED".to_string(), &self.link),
        ];
        stages
            .iter()
            .filter_map(|(heading, status)| match status {
                StageStatus::Succeeded => None,
                StageStatus::Failed(info) => Some(format!("{}\n{}", heading, info)),
            })
            .collect()
    }

    fn log(&self) {
        for message in self.diagnostics() {
            log::error!("{}", message);
        }
        if self.is_usable() {
            log::debug!("shader program linked");
        } else {
            log::warn!("continuing with an unusable shader program, nothing may be drawn");
        }
    }
}

/// A compiled shader object, deleted on drop.
pub struct Shader {
    id: GLuint,
    kind: ShaderKind,
}

impl Shader {
    /// Compiles `source`. The shader object is returned even when compilation fails.
    pub fn compile(kind: ShaderKind, source: &str) -> (Shader, StageStatus) {
        unsafe {
            let id = gl::CreateShader(kind as GLenum);
            let shader = Shader { id, kind };
            if id == 0 {
                return (shader, StageStatus::Failed("glCreateShader returned 0".to_string()));
            }

            let source_ptr = source.as_ptr() as *const GLchar;
            let source_len = source.len() as GLint;
            gl::ShaderSource(id, 1, &source_ptr, &source_len);
            gl::CompileShader(id);

            let mut success = gl::FALSE as GLint;
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
            let status = if success == gl::TRUE as GLint {
                StageStatus::Succeeded
            } else {
                StageStatus::Failed(info_log(|capacity, written, buf| {
                    gl::GetShaderInfoLog(id, capacity, written, buf)
                }))
            };
            (shader, status)
        }
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        if self.id != 0 {
            unsafe {
                gl::DeleteShader(self.id);
            }
        }
    }
}

/// The linked program object, deleted on drop.
pub struct Program {
    id: GLuint,
    report: ProgramReport,
}

impl Program {
    /// Compiles both stages and links them. Failures are logged and recorded in the report.
    pub fn build(vertex_source: &str, fragment_source: &str) -> Program {
        let (vertex, vertex_status) = Shader::compile(ShaderKind::Vertex, vertex_source);
        let (fragment, fragment_status) = Shader::compile(ShaderKind::Fragment, fragment_source);

        let (id, link_status) = unsafe { link(&[&vertex, &fragment]) };

        // The program keeps the compiled code.
        drop(vertex);
        drop(fragment);

        let report = ProgramReport {
            vertex: vertex_status,
            fragment: fragment_status,
            link: link_status,
        };
        report.log();

        Program { id, report }
    }

    pub fn report(&self) -> &ProgramReport {
        &self.report
    }

    pub fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        if self.id != 0 {
            unsafe {
                gl::DeleteProgram(self.id);
            }
        }
    }
}

unsafe fn link(shaders: &[&Shader]) -> (GLuint, StageStatus) {
    let program = gl::CreateProgram();
    if program == 0 {
        return (0, StageStatus::Failed("glCreateProgram returned 0".to_string()));
    }
    for shader in shaders {
        if shader.id != 0 {
            gl::AttachShader(program, shader.id);
        }
    }
    gl::LinkProgram(program);

    let mut success = gl::FALSE as GLint;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
    let status = if success == gl::TRUE as GLint {
        StageStatus::Succeeded
    } else {
        StageStatus::Failed(info_log(|capacity, written, buf| {
            gl::GetProgramInfoLog(program, capacity, written, buf)
        }))
    };

    for shader in shaders {
        if shader.id != 0 {
            gl::DetachShader(program, shader.id);
        }
    }
    (program, status)
}

/// Reads an info log through `fetch` into a fixed [`INFO_LOG_CAPACITY`] byte buffer.
unsafe fn info_log<F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar)>(fetch: F) -> String {
    let mut buf = [0u8; INFO_LOG_CAPACITY];
    let mut written: GLsizei = 0;
    fetch(INFO_LOG_CAPACITY as GLsizei, &mut written, buf.as_mut_ptr() as *mut GLchar);
    decode_info_log(&buf, written)
}

/// Turns the raw info log buffer into text.
///
/// Only the first `written` bytes are trusted (clamped to the buffer), the text ends at the first
/// NUL, invalid UTF-8 is replaced and trailing whitespace is dropped.
pub fn decode_info_log(buf: &[u8], written: GLsizei) -> String {
    let len = (written.max(0) as usize).min(buf.len());
    let text = &buf[..len];
    let end = text.iter().position(|&b| b == 0).unwrap_or(len);
    String::from_utf8_lossy(&text[..end]).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_kinds_map_to_gl_enums() {
        assert_eq!(ShaderKind::Vertex as GLenum, gl::VERTEX_SHADER);
        assert_eq!(ShaderKind::Fragment as GLenum, gl::FRAGMENT_SHADER);
    }

    #[test]
    fn sources_target_glsl_330_core() {
        assert!(VERTEX_SHADER_SOURCE.starts_with("#version 330 core"));
        assert!(FRAGMENT_SHADER_SOURCE.starts_with("#version 330 core"));
        assert!(VERTEX_SHADER_SOURCE.contains("layout (location = 0) in vec3"));
        assert!(FRAGMENT_SHADER_SOURCE.contains("vec4(0.8, 0.3, 0.2, 1.0)"));
    }

    #[test]
    fn info_log_stops_at_written_length() {
        let mut buf = [0u8; INFO_LOG_CAPACITY];
        buf[..12].copy_from_slice(b"0:3(1): oops");
        assert_eq!(decode_info_log(&buf, 6), "0:3(1)");
        assert_eq!(decode_info_log(&buf, 12), "0:3(1): oops");
    }

    #[test]
    fn info_log_stops_at_nul_and_trims() {
        let mut buf = [b'x'; INFO_LOG_CAPACITY];
        buf[..9].copy_from_slice(b"bad\n\0junk");
        assert_eq!(decode_info_log(&buf, 9), "bad");
    }

    #[test]
    fn info_log_is_bounded_by_the_buffer() {
        let buf = [b'e'; INFO_LOG_CAPACITY];
        assert_eq!(decode_info_log(&buf, 4096).len(), INFO_LOG_CAPACITY);
        assert_eq!(decode_info_log(&buf, -1), "");
    }

    #[test]
    fn info_log_tolerates_invalid_utf8() {
        let buf = [b'a', 0xff, b'b'];
        assert_eq!(decode_info_log(&buf, 3), "a\u{fffd}b");
    }

    #[test]
    fn clean_build_has_no_diagnostics() {
        let report = ProgramReport {
            vertex: StageStatus::Succeeded,
            fragment: StageStatus::Succeeded,
            link: StageStatus::Succeeded,
        };
        assert!(report.is_usable());
        assert!(report.diagnostics().is_empty());
    }

    #[test]
    fn broken_fragment_shader_degrades_the_program() {
        let report = ProgramReport {
            vertex: StageStatus::Succeeded,
            fragment: StageStatus::Failed("0:4(5): error: syntax error".to_string()),
            link: StageStatus::Failed("error: linking with uncompiled shader".to_string()),
        };
        assert!(!report.is_usable());
        assert_eq!(
            report.diagnostics(),
            vec![
                "ERROR::SHADER::FRAGMENT::COMPILATION_FAILED\n0:4(5): error: syntax error".to_string(),
                "ERROR::PROGRAM::LINKING_FAILED\nerror: linking with uncompiled shader".to_string(),
            ]
        );
    }

    #[test]
    fn failed_link_alone_is_unusable() {
        let report = ProgramReport {
            vertex: StageStatus::Succeeded,
            fragment: StageStatus::Succeeded,
            link: StageStatus::Failed(String::new()),
        };
        assert!(!report.is_usable());
        assert_eq!(report.diagnostics(), vec!["ERROR::PROGRAM::LINKING_FAILED\n".to_string()]);
    }
}
