//! Scripted input standing in for keyboard and mouse
//!
//! The script is a list of segments, each holding a set of axis values for a
//! number of frames. It loops.

use scene_engine::control::ControlAxes;

/// Forward/backward
pub const AXIS_WS: &str = "ws";
/// Left/right steering
pub const AXIS_AD: &str = "ad";
/// Arrow keys, horizontal
pub const AXIS_LEFT_RIGHT: &str = "left_right";
/// Arrow keys, vertical
pub const AXIS_UP_DOWN: &str = "up_down";
/// Shininess up (positive) or down (negative)
pub const AXIS_SHINE: &str = "shine";

struct Segment {
    frames: u32,
    axes: &'static [(&'static str, f32)],
}

const SCRIPT: &[Segment] = &[
    Segment { frames: 30, axes: &[(AXIS_WS, 1.0)] },
    Segment { frames: 20, axes: &[(AXIS_WS, 1.0), (AXIS_AD, 0.5), (AXIS_SHINE, 1.0)] },
    Segment { frames: 15, axes: &[(AXIS_UP_DOWN, 1.0), (AXIS_LEFT_RIGHT, -1.0)] },
    Segment { frames: 15, axes: &[(AXIS_WS, -1.0), (AXIS_AD, -1.0), (AXIS_UP_DOWN, -1.0)] },
    Segment { frames: 10, axes: &[(AXIS_SHINE, -1.0)] },
];

/// Axis values for `frame`
pub fn axes_at(frame: u32) -> ControlAxes {
    let length: u32 = SCRIPT.iter().map(|s| s.frames).sum();
    let mut t = frame % length;
    let mut axes = ControlAxes::new();

    for segment in SCRIPT {
        if t < segment.frames {
            for &(name, value) in segment.axes {
                axes.set(name, value);
            }
            break;
        }
        t -= segment.frames;
    }
    axes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_segments_and_loop() {
        assert_eq!(axes_at(0).get(AXIS_WS), 1.0);
        assert_eq!(axes_at(0).get(AXIS_AD), 0.0);
        assert_eq!(axes_at(30).get(AXIS_AD), 0.5);
        assert_eq!(axes_at(89).get(AXIS_SHINE), -1.0);
        assert_eq!(axes_at(90), axes_at(0));
    }
}
