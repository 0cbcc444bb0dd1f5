use bevy::color::Srgba;
use bevy::math::Vec3;

/// Overlay geometry for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawPrimitive {
    /// Wireframe box standing on `center` (foot level) and rising `height`.
    Box {
        center: Vec3,
        half_width: f32,
        height: f32,
        color: Srgba,
    },
    Line { from: Vec3, to: Vec3, color: Srgba },
}

impl DrawPrimitive {
    pub fn color(&self) -> Srgba {
        match self {
            DrawPrimitive::Box { color, .. } | DrawPrimitive::Line { color, .. } => *color,
        }
    }

    /// Edge list a line-based backend draws: 12 edges for a box, one for a line.
    pub fn edges(&self) -> Vec<(Vec3, Vec3)> {
        match *self {
            DrawPrimitive::Line { from, to, .. } => vec![(from, to)],
            DrawPrimitive::Box {
                center,
                half_width,
                height,
                ..
            } => {
                let corners = |y: f32| {
                    [
                        Vec3::new(center.x - half_width, y, center.z - half_width),
                        Vec3::new(center.x + half_width, y, center.z - half_width),
                        Vec3::new(center.x + half_width, y, center.z + half_width),
                        Vec3::new(center.x - half_width, y, center.z + half_width),
                    ]
                };
                let bottom = corners(center.y);
                let top = corners(center.y + height);

                let mut edges = Vec::with_capacity(12);
                for i in 0..4 {
                    let next = (i + 1) % 4;
                    edges.push((bottom[i], bottom[next]));
                    edges.push((top[i], top[next]));
                    edges.push((bottom[i], top[i]));
                }
                edges
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_twelve_edges_spanning_its_extent() {
        let primitive = DrawPrimitive::Box {
            center: Vec3::new(1.0, 2.0, 3.0),
            half_width: 0.5,
            height: 2.0,
            color: Srgba::new(0.0, 1.0, 0.0, 1.0),
        };

        let edges = primitive.edges();
        assert_eq!(edges.len(), 12);

        let (min, max) = edges.iter().flat_map(|(a, b)| [*a, *b]).fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(lo, hi), p| (lo.min(p), hi.max(p)),
        );
        assert_eq!(min, Vec3::new(0.5, 2.0, 2.5));
        assert_eq!(max, Vec3::new(1.5, 4.0, 3.5));
    }

    #[test]
    fn line_is_a_single_edge() {
        let primitive = DrawPrimitive::Line {
            from: Vec3::ZERO,
            to: Vec3::ONE,
            color: Srgba::new(1.0, 1.0, 1.0, 1.0),
        };
        assert_eq!(primitive.edges(), vec![(Vec3::ZERO, Vec3::ONE)]);
    }
}
