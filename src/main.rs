use std::io::{self, BufRead};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use arc_gauge::{
    ArcConfiguration, ArcWidget, Bounds, Canvas, FrameStatus, Rgba, TimingCurve,
    TransitionTiming, WindowConfig,
};
use clap::{Parser, ValueEnum};
use pixels::{Pixels, SurfaceTexture};
use rand::Rng;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Latest value piped on stdin, scaled by 1000; `u32::MAX` when none is pending.
static PIPE_VALUE: AtomicU32 = AtomicU32::new(u32::MAX);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Curve {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Default,
}

impl From<Curve> for TimingCurve {
    fn from(curve: Curve) -> Self {
        match curve {
            Curve::Linear => TimingCurve::Linear,
            Curve::EaseIn => TimingCurve::EaseIn,
            Curve::EaseOut => TimingCurve::EaseOut,
            Curve::EaseInOut => TimingCurve::EaseInEaseOut,
            Curve::Default => TimingCurve::Default,
        }
    }
}

/// Animated semicircular progress gauge. Pipe numbers (0-100) on stdin to
/// drive it; otherwise it wanders between random targets.
#[derive(Debug, Parser)]
#[command(name = "arc-gauge", version)]
struct Args {
    #[arg(long, default_value = "Arc Gauge")]
    title: String,

    #[arg(long, default_value_t = WindowConfig::default().width)]
    width: usize,

    #[arg(long, default_value_t = WindowConfig::default().height)]
    height: usize,

    /// Paint the fill arc with the gradient overlay.
    #[arg(long)]
    gradient: bool,

    /// Fill color as `#rrggbb`.
    #[arg(long)]
    fill: Option<String>,

    /// Transition duration in seconds.
    #[arg(long, default_value_t = WindowConfig::default().transition_duration)]
    duration: f64,

    #[arg(long, value_enum, default_value_t = Curve::EaseInOut)]
    curve: Curve,

    /// Seconds between random targets.
    #[arg(long, default_value_t = WindowConfig::default().retarget_interval)]
    interval: f64,
}

fn take_piped_value() -> Option<f64> {
    match PIPE_VALUE.swap(u32::MAX, Ordering::Relaxed) {
        u32::MAX => None,
        scaled => Some(scaled as f64 / 1000.0),
    }
}

fn spawn_stdin_reader() {
    thread::spawn(|| {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            match line.trim().parse::<f64>() {
                Ok(value) if value >= 0.0 => {
                    PIPE_VALUE.store((value * 1000.0).round() as u32, Ordering::Relaxed);
                }
                _ => warn!(line = line.trim(), "ignoring stdin line"),
            }
        }
    });
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arc_gauge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let window_config = WindowConfig {
        width: args.width,
        height: args.height,
        retarget_interval: args.interval,
        transition_duration: args.duration,
        ..WindowConfig::default()
    };

    let mut config = ArcConfiguration::builder()
        .use_gradient(args.gradient)
        .arc_width(10.0)
        .track_width(6.0)
        .build();
    if let Some(fill) = &args.fill {
        config.fill_color = Rgba::parse_hex(fill)?;
    }

    let mut widget = ArcWidget::new(config);
    widget.set_default_transition(Some(
        TransitionTiming::builder()
            .duration(window_config.transition_duration)
            .curve(args.curve.into())
            .build(),
    ))?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&args.title)
        .with_inner_size(LogicalSize::new(
            window_config.width as f64,
            window_config.height as f64,
        ))
        .build(&event_loop)?;
    let window = Arc::new(window);
    let window_clone = window.clone();

    let size = window.inner_size();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
    widget.attach_layer(Bounds::from_size(fb_width as f64, fb_height as f64));

    spawn_stdin_reader();
    info!(
        width = fb_width,
        height = fb_height,
        gradient = args.gradient,
        "arc gauge running"
    );

    let frame_duration = std::time::Duration::from_secs_f64(1.0 / window_config.max_framerate);
    let start = Instant::now();
    let mut last_frame = Instant::now();
    let mut next_retarget = 0.0;
    let mut piped = false;
    let mut rng = rand::rng();

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    let _ = pixels.resize_buffer(new_size.width, new_size.height);
                    let _ = pixels.resize_surface(new_size.width, new_size.height);
                    widget.set_layer_bounds(Bounds::from_size(fb_width as f64, fb_height as f64));
                }
                WindowEvent::RedrawRequested => {
                    let now = start.elapsed().as_secs_f64();

                    let target = if let Some(value) = take_piped_value() {
                        piped = true;
                        Some(value)
                    } else if !piped && now >= next_retarget {
                        next_retarget = now + window_config.retarget_interval;
                        Some(rng.random_range(0.0..=100.0))
                    } else {
                        None
                    };
                    if let Some(target) = target {
                        match widget.set_percentage(target, now) {
                            Ok(input) => debug!(?input, "new target"),
                            Err(err) => warn!(%err, "rejected target"),
                        }
                    }

                    let mut canvas = match Canvas::new(pixels.frame_mut(), fb_width, fb_height) {
                        Ok(canvas) => canvas,
                        Err(err) => {
                            warn!(%err, "skipping frame");
                            return;
                        }
                    };
                    canvas.clear(Rgba::rgb(1.0, 1.0, 1.0));
                    if widget.render_frame(&mut canvas, now) == FrameStatus::Idle {
                        let bounds = canvas.bounds();
                        widget.draw(&mut canvas, bounds);
                    }
                    if let Err(err) = pixels.render() {
                        warn!(%err, "render failed");
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if last_frame.elapsed() >= frame_duration {
                    window_clone.request_redraw();
                    last_frame = Instant::now();
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}
