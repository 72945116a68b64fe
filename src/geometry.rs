use sfml::system::{Vector2f, Vector2u};

/// Logical window extent: the square [-N/2, N/2]² maps onto the viewport.
pub const WINDOW_EXTENT: f32 = 5.0;

/// Unit square as two triangles sharing a diagonal.
pub const VERTICES: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

/// Indices tracing the square's boundary. Positions 3 and 4 repeat the
/// diagonal's corners and are skipped when building the outline.
pub const OUTLINE_INDICES: [i64; 4] = [0, 1, 2, 5];

/// Returns the vertex at position `i mod 6`, wrap-around for any integer.
pub fn vertex(i: i64) -> Vector2f {
    let j = i.rem_euclid(VERTICES.len() as i64) as usize;
    (VERTICES[j][0], VERTICES[j][1]).into()
}

/// Maps a point in the logical window [-n/2, n/2]² onto viewport pixels
/// [0, w] x [h, 0]. The device Y axis points downwards, so Y flips.
pub fn map_to_viewport(x: f32, y: f32, n: f32, size: Vector2u) -> Vector2f {
    (
        (x + n / 2.0) * size.x as f32 / n,
        (-y + n / 2.0) * size.y as f32 / n,
    )
        .into()
}

/// Scales the outline vertices and maps them into viewport pixels, in
/// path order (closing the polygon is the caller's concern).
pub fn outline_points(scale: f32, size: Vector2u) -> [Vector2f; 4] {
    OUTLINE_INDICES.map(|i| {
        let v = vertex(i);
        map_to_viewport(v.x * scale, v.y * scale, WINDOW_EXTENT, size)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: (u32, u32) = (320, 320);

    fn assert_close(point: Vector2f, expected: (f32, f32)) {
        assert!(
            (point.x - expected.0).abs() < 1e-4 && (point.y - expected.1).abs() < 1e-4,
            "{:?} != {:?}",
            point,
            expected
        );
    }

    #[test]
    fn vertex_wraps_with_period_six() {
        for i in -18..18 {
            assert_eq!(vertex(i), vertex(i + 6));
        }
    }

    #[test]
    fn vertex_negative_indices_wrap_backwards() {
        assert_eq!(vertex(-1), vertex(5));
        assert_eq!(vertex(-6), vertex(0));
    }

    #[test]
    fn window_center_maps_to_viewport_center() {
        let center = map_to_viewport(0.0, 0.0, WINDOW_EXTENT, VIEWPORT.into());
        assert_close(center, (160.0, 160.0));
    }

    #[test]
    fn corners_map_to_inverted_y_square() {
        let size: Vector2u = VIEWPORT.into();
        // Logical +Y goes up, device +Y goes down: the top-left logical
        // corner (-0.5, 0.5) lands at the smaller device coordinates.
        assert_close(map_to_viewport(-0.5, 0.5, WINDOW_EXTENT, size), (128.0, 128.0));
        assert_close(map_to_viewport(0.5, 0.5, WINDOW_EXTENT, size), (192.0, 128.0));
        assert_close(map_to_viewport(0.5, -0.5, WINDOW_EXTENT, size), (192.0, 192.0));
        assert_close(map_to_viewport(-0.5, -0.5, WINDOW_EXTENT, size), (128.0, 192.0));
    }

    #[test]
    fn outline_skips_duplicated_diagonal_vertices() {
        let size: Vector2u = VIEWPORT.into();
        let outline = outline_points(1.0, size);
        for (point, &i) in outline.iter().zip(OUTLINE_INDICES.iter()) {
            let v = vertex(i);
            assert_eq!(*point, map_to_viewport(v.x, v.y, WINDOW_EXTENT, size));
        }
        // Four distinct corners, centered on the viewport.
        assert_close(outline[0], (128.0, 192.0));
        assert_close(outline[1], (192.0, 192.0));
        assert_close(outline[2], (192.0, 128.0));
        assert_close(outline[3], (128.0, 128.0));
    }

    #[test]
    fn outline_scales_about_the_center() {
        let size: Vector2u = VIEWPORT.into();
        let outline = outline_points(2.0, size);
        assert_close(outline[0], (96.0, 224.0));
        assert_close(outline[2], (224.0, 96.0));
    }
}
