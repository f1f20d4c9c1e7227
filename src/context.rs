//! Window and OpenGL context bootstrap, plus resolving the GL entry points against it.

use crate::config::Config;
use crate::error::Error;

use glutin::event_loop::EventLoop;
use glutin::window::WindowBuilder;
use glutin::{ContextBuilder, PossiblyCurrent, WindowedContext};

use std::any::Any;
use std::panic::{self, UnwindSafe};

/// Pairs an entry point's name with the `is_loaded` check the `gl` crate generates for it.
pub type EntryPoint = (&'static str, fn() -> bool);

macro_rules! entry_points {
    (
        $(
            $name:ident
        ),+,
    ) => {
        &[
            $(
                (concat!("gl", stringify!($name)), gl::$name::is_loaded as fn() -> bool)
            ),+
        ]
    }
}

/// Every OpenGL function the renderer calls.
pub const REQUIRED_ENTRY_POINTS: &[EntryPoint] = entry_points!(
    Viewport,
    ClearColor,
    Clear,
    CreateShader,
    ShaderSource,
    CompileShader,
    GetShaderiv,
    GetShaderInfoLog,
    DeleteShader,
    CreateProgram,
    AttachShader,
    DetachShader,
    LinkProgram,
    GetProgramiv,
    GetProgramInfoLog,
    UseProgram,
    DeleteProgram,
    GenBuffers,
    BindBuffer,
    BufferData,
    DeleteBuffers,
    GenVertexArrays,
    BindVertexArray,
    DeleteVertexArrays,
    VertexAttribPointer,
    EnableVertexAttribArray,
    DrawArrays,
);

/// Initialises the windowing library.
///
/// glutin reports a missing display server by panicking inside `EventLoop::new`, so the panic is
/// caught here and turned into [`Error::EventLoop`].
pub fn create_event_loop() -> Result<EventLoop<()>, Error> {
    catch_startup_panic(EventLoop::<()>::new)
}

/// Runs `init`, turning a panic into [`Error::EventLoop`]. The panic hook is silenced for the
/// duration so the failure is reported once, through the returned error.
fn catch_startup_panic<T, F: FnOnce() -> T + UnwindSafe>(init: F) -> Result<T, Error> {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(init);
    panic::set_hook(hook);
    result.map_err(|payload| Error::EventLoop(panic_message(payload)))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown reason".to_string()
    }
}

/// Creates the window and its context, makes the context current on this thread and loads the
/// OpenGL functions for it.
///
/// If loading fails the window is dropped before the error is returned.
pub fn init_glutin_context(
    config: &Config,
    event_loop: &EventLoop<()>,
) -> Result<WindowedContext<PossiblyCurrent>, Error> {
    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(config.logical_size())
        .with_resizable(config.resizable);

    let context = ContextBuilder::new()
        .with_gl(config.gl_request())
        .with_gl_profile(config.gl_profile())
        .build_windowed(window, event_loop)?;

    let context = unsafe { context.make_current() }
        .map_err(|(_, err)| Error::MakeCurrent(err))?;

    log::info!(
        "created {}x{} window {:?} with an OpenGL {}.{} core context",
        config.window_size.0,
        config.window_size.1,
        config.window_title,
        config.gl_version.0,
        config.gl_version.1,
    );

    load_gl_functions(&context)?;
    Ok(context)
}

/// Resolves the OpenGL API against the current context and checks that everything the renderer
/// needs is present.
pub fn load_gl_functions(context: &WindowedContext<PossiblyCurrent>) -> Result<(), Error> {
    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);
    verify_entry_points(REQUIRED_ENTRY_POINTS)?;
    log::debug!("resolved {} OpenGL entry points", REQUIRED_ENTRY_POINTS.len());
    Ok(())
}

pub fn verify_entry_points(entry_points: &[EntryPoint]) -> Result<(), Error> {
    let missing: Vec<&'static str> = entry_points
        .iter()
        .filter(|(_, is_loaded)| !is_loaded())
        .map(|&(name, _)| name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::FunctionLoader { missing })
    }
}
