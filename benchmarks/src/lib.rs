//! Shared inputs for waypoint benchmark suites.

/// Maze with a lowest score of 7036 and 45 best seats.
pub const SAMPLE_MAZE: &str = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############
";

/// A walled square room of `size` open cells per side, `S` in the
/// bottom-left corner and `E` in the top-right.
///
/// # Panics
///
/// Panics if `size < 2`.
#[must_use]
pub fn open_maze(size: usize) -> String {
    assert!(size >= 2, "maze needs room for S and E");
    let width = size + 2;
    let mut text = String::with_capacity((width + 1) * width);
    text.push_str(&"#".repeat(width));
    text.push('\n');
    for row in 0..size {
        text.push('#');
        for col in 0..size {
            let cell = match (row, col) {
                (0, c) if c == size - 1 => 'E',
                (r, 0) if r == size - 1 => 'S',
                _ => '.',
            };
            text.push(cell);
        }
        text.push_str("#\n");
    }
    text.push_str(&"#".repeat(width));
    text.push('\n');
    text
}
