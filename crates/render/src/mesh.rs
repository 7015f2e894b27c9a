use rand::Rng;

/// Vertices in [`cube`]: 12 triangles.
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Triangle-list cube centred on the origin with half-extent `size`.
/// Negative sizes are mirrored to positive.
pub fn cube(size: f32) -> Vec<[f32; 3]> {
    let s = size.abs();
    #[rustfmt::skip]
    let unit: [[f32; 3]; CUBE_VERTEX_COUNT] = [
        [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0],
        [ 1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
        [ 1.0, -1.0,  1.0], [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0],
        [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0], [-1.0, -1.0, -1.0],
        [-1.0, -1.0, -1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],
        [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0], [-1.0, -1.0, -1.0],
        [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0],
        [ 1.0,  1.0,  1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0],
        [ 1.0, -1.0, -1.0], [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
        [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],
        [ 1.0,  1.0,  1.0], [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0],
        [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0],
    ];
    unit.iter().map(|v| [v[0] * s, v[1] * s, v[2] * s]).collect()
}

/// One random colour per vertex, each channel in `[0, max_channel)`.
pub fn vertex_colors(count: usize, max_channel: f32, rng: &mut impl Rng) -> Vec<[f32; 3]> {
    (0..count)
        .map(|_| {
            [
                rng.random_range(0.0..max_channel),
                rng.random_range(0.0..max_channel),
                rng.random_range(0.0..max_channel),
            ]
        })
        .collect()
}
