use crate::config::Config;
use crate::error::Error;
use crate::geometry::TriangleMesh;
use crate::shader::{Program, FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};

/// Everything drawn each frame. Requires a current context for its whole lifetime, including
/// drop.
pub struct Renderer {
    pub program: Program,
    pub mesh: TriangleMesh,
    pub clear_color: [f32; 4],
}

impl Renderer {
    /// Builds the shader program and uploads the triangle.
    ///
    /// A broken shader does not fail this; check `program.report()` to see whether anything will
    /// actually be drawn.
    pub fn new(config: &Config) -> Result<Renderer, Error> {
        let program = Program::build(VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE);
        let mesh = TriangleMesh::upload()?;
        Ok(Renderer {
            program,
            mesh,
            clear_color: config.clear_color,
        })
    }

    pub fn render(&self) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        self.program.bind();
        self.mesh.draw();
    }
}
