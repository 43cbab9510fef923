//! Time driven values computed by the demos' update step.

use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};
use std::f32::consts::PI;

/// Seconds for one full fade or slide cycle.
pub const CYCLE_SECONDS: f32 = 5.0;
/// Degrees of rotation per second.
pub const SPIN_RATE: f32 = 45.0;

fn wave(seconds: f32) -> f32 {
    (seconds * (2.0 * PI) / CYCLE_SECONDS).sin()
}

/// Alpha value that swings between 0.5 and 1.0.
pub fn fade(seconds: f32) -> f32 {
    0.75 + wave(seconds) * 0.25
}

/// Slides left and right along X while spinning about Z.
pub fn slide_and_spin(seconds: f32) -> Matrix4<f32> {
    let slide = Matrix4::from_translation(Vector3::new(wave(seconds), 0.0, 0.0));
    let spin = Matrix4::from_angle_z(Deg(seconds * SPIN_RATE));
    slide * spin
}

/// Model-view-projection for an object at (0, 0, -4) spinning about Y, seen
/// from slightly above.
pub fn spin_mvp(seconds: f32, aspect: f32) -> Matrix4<f32> {
    let anim = Matrix4::from_angle_y(Deg(seconds * SPIN_RATE));
    let model = Matrix4::from_translation(Vector3::new(0.0, 0.0, -4.0));
    let view = Matrix4::look_at_rh(
        Point3::new(0.0, 2.0, 0.0),
        Point3::new(0.0, 0.0, -4.0),
        Vector3::unit_y(),
    );
    let projection = perspective(Deg(45.0), aspect, 0.1, 10.0);

    projection * view * model * anim
}
