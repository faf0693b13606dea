use arc_gauge::{
    ArcConfiguration, ArcWidget, Bounds, Canvas, FrameStatus, Rgba, TimingCurve, TransitionTiming,
};

const WIDTH: usize = 200;
const HEIGHT: usize = 100;
const PURPLE: [u8; 4] = [128, 0, 128, 255];
const TRACK: [u8; 4] = [0xe8, 0xe8, 0xe8, 0xff];

// Pixels sitting on the arc (radius 87.5 around (100, 95)) at 225° and 315°.
const UPPER_LEFT: (usize, usize) = (38, 33);
const UPPER_RIGHT: (usize, usize) = (161, 33);

fn render(widget: &mut ArcWidget, now: f64) -> (FrameStatus, Vec<u8>) {
    let mut frame = vec![0xff; WIDTH * HEIGHT * 4];
    let mut canvas = Canvas::new(&mut frame, WIDTH, HEIGHT).unwrap();
    canvas.clear(Rgba::rgb(1.0, 1.0, 1.0));
    let status = widget.render_frame(&mut canvas, now);
    assert_eq!(canvas.save_depth(), 0);
    (status, frame)
}

fn pixel(frame: &[u8], (x, y): (usize, usize)) -> [u8; 4] {
    let idx = (y * WIDTH + x) * 4;
    [frame[idx], frame[idx + 1], frame[idx + 2], frame[idx + 3]]
}

fn animated(config: ArcConfiguration) -> ArcWidget {
    let mut widget = ArcWidget::new(config);
    widget.set_percentage(0.0, 0.0).unwrap();
    widget.attach_layer(Bounds::from_size(WIDTH as f64, HEIGHT as f64));
    widget.set_default_transition(Some(
        TransitionTiming::builder()
            .duration(1.0)
            .curve(TimingCurve::Linear)
            .build(),
    ))
    .unwrap();
    widget
}

#[test]
fn fill_grows_across_frames() {
    let mut widget = animated(ArcConfiguration::default());
    widget.set_percentage(100.0, 0.0).unwrap();

    let (status, halfway) = render(&mut widget, 0.5);
    assert_eq!(status, FrameStatus::Animating);
    assert_eq!(pixel(&halfway, UPPER_LEFT), PURPLE);
    assert_eq!(pixel(&halfway, UPPER_RIGHT), TRACK);

    let (status, done) = render(&mut widget, 1.0);
    assert_eq!(status, FrameStatus::Finished);
    assert_eq!(pixel(&done, UPPER_LEFT), PURPLE);
    assert_eq!(pixel(&done, UPPER_RIGHT), PURPLE);

    let (status, _) = render(&mut widget, 2.0);
    assert_eq!(status, FrameStatus::Idle);
}

#[test]
fn gradient_tints_the_fill_only() {
    let config = ArcConfiguration::builder().use_gradient(true).build();
    let mut widget = animated(config);
    widget.set_percentage(50.0, 0.0).unwrap();

    let (_, frame) = render(&mut widget, 1.0);
    let tinted = pixel(&frame, UPPER_LEFT);
    assert_ne!(tinted, PURPLE);
    assert!(tinted[0] > 150 && tinted[1] > 0);
    assert_eq!(pixel(&frame, UPPER_RIGHT), TRACK);
    // Centre of the dial stays blank.
    assert_eq!(pixel(&frame, (100, 60)), [0xff; 4]);
}

#[test]
fn zero_percent_shows_only_the_track() {
    let mut widget = animated(ArcConfiguration::default());
    widget.set_percentage(30.0, 0.0).unwrap();
    widget.cancel_animation();
    widget.set_percentage(0.0, 0.0).unwrap();

    let (_, frame) = render(&mut widget, 5.0);
    assert_eq!(pixel(&frame, UPPER_LEFT), TRACK);
    assert_eq!(pixel(&frame, UPPER_RIGHT), TRACK);
}
