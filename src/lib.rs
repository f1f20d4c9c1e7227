//! Opens a window and draws one static triangle with OpenGL 3.3 core.
//!
//! Context and window come from glutin, GL functions from the `gl` crate. [`run`] does the whole
//! thing: bootstrap, build the shader program, upload the triangle, loop until the window is
//! closed or Escape is pressed, then tear everything down.

pub extern crate glutin;
extern crate gl;
#[macro_use]
extern crate derive_builder;

pub mod config;
pub mod context;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod renderer;
pub mod shader;

pub use config::{Config, ConfigBuilder};
pub use error::{exit_code, Error};
pub use frame::{FrameLoop, LoopState, Signal, Viewport};
pub use renderer::Renderer;

use glutin::event::Event;
use glutin::event_loop::ControlFlow;
use glutin::platform::run_return::EventLoopExtRunReturn;

/// Runs the program with `config` until the window closes.
///
/// Startup failures are returned before any GPU resource exists. Shader problems are logged and
/// the loop runs anyway.
pub fn run(config: Config) -> Result<(), Error> {
    let mut event_loop = context::create_event_loop()?;
    let context = context::init_glutin_context(&config, &event_loop)?;

    let viewport = Viewport::from(context.window().inner_size());
    viewport.apply();

    let renderer = Renderer::new(&config)?;
    if !renderer.program.report().is_usable() {
        log::warn!("entering the frame loop in degraded mode");
    }

    let mut frame_loop = FrameLoop::new(viewport);
    let mut outcome = Ok(());

    event_loop.run_return(|event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => {
                if let Some(signal) = Signal::from_window_event(&event) {
                    if let Some(viewport) = frame_loop.handle(signal) {
                        context.resize(viewport.physical_size());
                        viewport.apply();
                    }
                }
            }
            Event::MainEventsCleared => {
                if !frame_loop.is_running() {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                renderer.render();
                match context.swap_buffers() {
                    Ok(()) => frame_loop.frame_presented(),
                    Err(err) => {
                        outcome = Err(Error::Present(err));
                        frame_loop.request_close();
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            _ => {}
        }
    });

    // GL objects go first, while their context is still current.
    drop(renderer);
    drop(context);
    log::info!("window closed after {} frames", frame_loop.frames());

    outcome
}
