//! Window, context and event loop shared by the tutorial programs.
//!
//! A demo only describes how to set itself up, how to advance with time and
//! how to draw. Everything runs on the thread that calls [`run`], which owns
//! the window and the GL context; state written in `setup` is read by the
//! callbacks afterwards and dropped, while the context is still current, when
//! the loop ends.

use crate::config::{DemoArgs, DemoConfig};
use crate::gl_api::error::GlResult;
use anyhow::Context as _;
use clap::Parser;
use gl::types::GLenum;
use glutin::dpi::PhysicalSize;
use glutin::event::{Event, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};
use std::ffi::CStr;
use std::fmt;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub trait Demo: Sized {
    /// Directory under `res/` holding this demo's assets.
    const NAME: &'static str;
    const TITLE: &'static str;

    /// Builds every GL object the demo needs. Any error here ends the program
    /// before the window starts drawing.
    fn setup(config: &DemoConfig) -> anyhow::Result<Self>;

    /// Called once per loop iteration before a redraw is requested.
    fn update(&mut self, elapsed: Duration, viewport: Viewport) -> GlResult<()>;

    fn render(&mut self) -> GlResult<()>;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Minimized windows report a zero sized viewport; those get an aspect of
    /// 1 so projections built from it stay valid.
    pub fn aspect(&self) -> f32 {
        if self.is_empty() {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn apply(&self) {
        unsafe {
            gl::Viewport(0, 0, self.width as i32, self.height as i32);
        }
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Viewport { width: size.width, height: size.height }
    }
}

pub fn init_logging() {
    // Ignore the error; it only means a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

/// Drives a running demo through the event loop. Frames are skipped while the
/// window has no area, and the first failure stops all further frames.
struct Runner<D> {
    demo: Option<D>,
    viewport: Viewport,
    failed: bool,
}

impl<D: Demo> Runner<D> {
    fn new(demo: D, viewport: Viewport) -> Self {
        Runner { demo: Some(demo), viewport, failed: false }
    }

    fn running(&self) -> bool {
        !self.failed && !self.viewport.is_empty()
    }

    /// Returns false once the loop should stop.
    fn update(&mut self, elapsed: Duration) -> bool {
        if !self.running() {
            return !self.failed;
        }
        let viewport = self.viewport;
        match self.demo.as_mut().map(|demo| demo.update(elapsed, viewport)) {
            Some(Err(err)) => self.fail(format_args!("update failed: {}", err)),
            _ => true,
        }
    }

    /// Returns true if a frame was drawn and should be presented.
    fn render(&mut self) -> bool {
        if !self.running() {
            return false;
        }
        match self.demo.as_mut().map(|demo| demo.render()) {
            Some(Ok(())) => true,
            Some(Err(err)) => self.fail(format_args!("render failed: {}", err)),
            None => false,
        }
    }

    /// Logs `reason` and marks the run as failed. Always returns false.
    fn fail(&mut self, reason: fmt::Arguments) -> bool {
        error!("{}", reason);
        self.failed = true;
        false
    }

    /// Drops the demo state and returns the process exit code.
    fn finish(&mut self) -> i32 {
        drop(self.demo.take());
        if self.failed {
            1
        } else {
            0
        }
    }
}

/// Parses the command line, opens the window and runs `D` until the window is
/// closed. Exits the process with status 1 if setup or any frame fails.
pub fn run<D: Demo + 'static>() -> ! {
    init_logging();
    let config = DemoConfig::from_args(DemoArgs::parse(), D::TITLE, Path::new("res").join(D::NAME));

    let (event_loop, context, demo) = match start::<D>(&config) {
        Ok(started) => started,
        Err(err) => {
            error!("{:#}", err);
            terminate(config.pause_on_exit);
            std::process::exit(1);
        }
    };

    let started = Instant::now();
    let viewport = Viewport::from(context.window().inner_size());
    viewport.apply();
    let mut runner = Runner::new(demo, viewport);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(size) => {
                    context.resize(size);
                    runner.viewport = Viewport::from(size);
                    runner.viewport.apply();
                }
                _ => (),
            },
            Event::MainEventsCleared => {
                if runner.update(started.elapsed()) {
                    context.window().request_redraw();
                } else {
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::RedrawRequested(_) => {
                if runner.render() {
                    if let Err(err) = context.swap_buffers() {
                        runner.fail(format_args!("could not swap buffers: {}", err));
                    }
                }
                if runner.failed {
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::LoopDestroyed => {
                // GL objects have to go while the context is still alive.
                let code = runner.finish();
                terminate(config.pause_on_exit);
                if code != 0 {
                    std::process::exit(code);
                }
            }
            _ => (),
        }
    })
}

type Started<D> = (EventLoop<()>, WindowedContext<PossiblyCurrent>, D);

fn start<D: Demo>(config: &DemoConfig) -> anyhow::Result<Started<D>> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height));
    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, (3, 3)))
        .with_gl_profile(GlProfile::Core)
        .with_depth_buffer(24)
        .with_vsync(config.vsync)
        .build_windowed(window, &event_loop)
        .context("could not create an OpenGL 3.3 core window")?;

    let context = unsafe { context.make_current() }
        .map_err(|(_, err)| err)
        .context("could not make the GL context current")?;
    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);
    info!(version = %gl_string(gl::VERSION), renderer = %gl_string(gl::RENDERER), "created GL context");

    let demo = D::setup(config).with_context(|| format!("could not set up \"{}\"", D::TITLE))?;
    Ok((event_loop, context, demo))
}

fn gl_string(name: GLenum) -> String {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return String::from("unknown");
        }
        CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
    }
}

fn terminate(pause: bool) {
    println!("Terminating...");
    if pause {
        let mut line = String::new();
        let _ = io::stdin().read_line(&mut line);
    }
}
