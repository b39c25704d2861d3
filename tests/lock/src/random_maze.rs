//! Seeded reindeer mazes of puzzle size.
//!
//! A depth-first carve over the odd cells gives a perfect maze; knocking
//! out extra walls afterwards adds loops, so several routes can tie for the
//! lowest score. `S` sits in the bottom-left corner and `E` in the
//! top-right, as in the puzzle inputs.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Render a `size` x `size` maze from `seed` with `loops` extra openings.
///
/// `size` is rounded up to the next odd number and to at least 5.
#[must_use]
pub fn generate_maze(seed: u64, size: usize, loops: usize) -> String {
    let size = (size.max(5)) | 1;
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let mut open = vec![vec![false; size]; size];

    open[size - 2][1] = true;
    let mut stack: Vec<(usize, usize)> = vec![(size - 2, 1)];
    while let Some(&(row, col)) = stack.last() {
        let mut steps: Vec<(usize, usize)> = [(0isize, 2isize), (2, 0), (0, -2), (-2, 0)]
            .into_iter()
            .filter_map(|(dr, dc)| {
                let r = row.checked_add_signed(dr)?;
                let c = col.checked_add_signed(dc)?;
                (r > 0 && c > 0 && r < size - 1 && c < size - 1 && !open[r][c]).then_some((r, c))
            })
            .collect();
        if steps.is_empty() {
            stack.pop();
            continue;
        }
        steps.shuffle(&mut rng);
        let (r, c) = steps[0];
        open[(row + r) / 2][(col + c) / 2] = true;
        open[r][c] = true;
        stack.push((r, c));
    }

    let mut opened = 0;
    let mut attempts = 0;
    while opened < loops && attempts < loops * 50 {
        attempts += 1;
        let r = rng.gen_range(1..size - 1);
        let c = rng.gen_range(1..size - 1);
        if open[r][c] {
            continue;
        }
        let across = open[r][c - 1] && open[r][c + 1] && !open[r - 1][c] && !open[r + 1][c];
        let down = open[r - 1][c] && open[r + 1][c] && !open[r][c - 1] && !open[r][c + 1];
        if across || down {
            open[r][c] = true;
            opened += 1;
        }
    }

    let mut text = String::with_capacity(size * (size + 1));
    for (r, row) in open.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            let ch = match (r, c) {
                (r, 1) if r == size - 2 => 'S',
                (1, c) if c == size - 2 => 'E',
                _ if cell => '.',
                _ => '#',
            };
            text.push(ch);
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_harness::worlds::reindeer_maze::ReindeerMaze;

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(generate_maze(7, 31, 20), generate_maze(7, 31, 20));
        assert_ne!(generate_maze(7, 31, 20), generate_maze(8, 31, 20));
    }

    #[test]
    fn generated_maze_parses_and_is_solvable() {
        let text = generate_maze(3, 30, 10);
        assert_eq!(text.lines().count(), 31);
        let maze = ReindeerMaze::parse(&text).unwrap();
        assert_eq!(maze.start_cell(), (29, 1));
        assert_eq!(maze.end_cell(), (1, 29));
        assert!(maze.lowest_score().unwrap().is_some());
    }
}
