//! Frame loop state: whether to keep drawing, and where to draw.

use glutin::dpi::PhysicalSize;
use glutin::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};

use gl::types::*;

/// The key that closes the window.
pub const EXIT_KEY: VirtualKeyCode = VirtualKeyCode::Escape;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LoopState {
    Running,
    /// The close flag is set. There is no way back to `Running`.
    Closing,
}

/// The window events the loop reacts to. Everything else is dropped during translation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Signal {
    CloseRequested,
    ExitKeyPressed,
    /// The framebuffer changed size, in physical pixels.
    Resized { width: u32, height: u32 },
}

impl Signal {
    pub fn from_window_event(event: &WindowEvent) -> Option<Signal> {
        match event {
            WindowEvent::CloseRequested => Some(Signal::CloseRequested),
            WindowEvent::KeyboardInput {
                input: KeyboardInput {
                    virtual_keycode: Some(key),
                    state: ElementState::Pressed,
                    ..
                },
                ..
            } if *key == EXIT_KEY => Some(Signal::ExitKeyPressed),
            WindowEvent::Resized(size) => Some(Signal::resized(*size)),
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                Some(Signal::resized(**new_inner_size))
            }
            _ => None,
        }
    }

    fn resized(size: PhysicalSize<u32>) -> Signal {
        Signal::Resized {
            width: size.width,
            height: size.height,
        }
    }
}

/// The region of the framebuffer that gets drawn to, always anchored at the origin.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Viewport {
        // OpenGL takes signed sizes
        Viewport {
            width: width as i32,
            height: height as i32,
        }
    }

    pub fn physical_size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.width.max(0) as u32, self.height.max(0) as u32)
    }

    pub fn apply(&self) {
        unsafe {
            gl::Viewport(0, 0, self.width as GLsizei, self.height as GLsizei);
        }
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Viewport::new(size.width, size.height)
    }
}

/// Two-state machine driven by [`Signal`]s.
#[derive(Clone, Debug)]
pub struct FrameLoop {
    state: LoopState,
    viewport: Viewport,
    frames: u64,
}

impl FrameLoop {
    pub fn new(viewport: Viewport) -> FrameLoop {
        FrameLoop {
            state: LoopState::Running,
            viewport,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sets the close flag.
    pub fn request_close(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("close requested after {} frames", self.frames);
        }
        self.state = LoopState::Closing;
    }

    /// Applies a signal. Returns the new viewport when the framebuffer was resized, so the caller
    /// can pass it on to OpenGL and the surface.
    pub fn handle(&mut self, signal: Signal) -> Option<Viewport> {
        match signal {
            Signal::CloseRequested | Signal::ExitKeyPressed => {
                self.request_close();
                None
            }
            Signal::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
                log::debug!("viewport resized to {}x{}", width, height);
                Some(self.viewport)
            }
        }
    }

    /// Counts a presented frame.
    pub fn frame_presented(&mut self) {
        self.frames += 1;
    }
}
