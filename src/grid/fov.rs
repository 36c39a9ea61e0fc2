//! Field of view via hex shadowcasting.
//!
//! The disc around the viewer is split into six sextants, one per
//! direction. Each sextant is scanned outward row by row between two
//! fractional slopes; an opaque cell narrows the slopes and spawns a
//! sub-scan past the gap, so walls cast shadows behind themselves while
//! remaining visible.
//!
//! Within a sextant a cell at scan coordinates `(x, y)` sits at
//! `center + tangent * x + normal * y` with `0 <= x <= y`, which puts its
//! hex distance from the viewer at exactly `y`.

use super::{Direction, Pos, DIRECTIONS};

/// Reveal everything visible from `center`.
///
/// `transparent` reports whether light passes through a position (out of
/// bounds must report false), `reveal` is called for every visible position
/// including `center` itself and the opaque cells that terminate a scan.
/// `radius` bounds the scan distance; `None` relies on opaque terrain to
/// terminate it.
pub fn fov<F, G>(center: Pos, radius: Option<u32>, transparent: F, mut reveal: G)
where
    F: Fn(Pos) -> bool,
    G: FnMut(Pos),
{
    reveal(center);
    for normal in DIRECTIONS {
        let tangent = tangent_of(normal);
        let transform = |x: u32, y: u32| -> Pos { center + tangent * x + normal * y };
        let sector_transparent = |x: u32, y: u32| -> bool { transparent(transform(x, y)) };
        let mut sector_reveal = |x: u32, y: u32| reveal(transform(x, y));
        scan(1, 0.0, 1.0, radius, &sector_transparent, &mut sector_reveal);
    }
}

/// The tangent axis of a sextant, perpendicular-ish to its normal.
fn tangent_of(normal: Direction) -> Direction {
    normal.rotate(2)
}

fn scan<F, G>(y: u32, mut start: f32, end: f32, radius: Option<u32>, transparent: &F, reveal: &mut G)
where
    F: Fn(u32, u32) -> bool,
    G: FnMut(u32, u32),
{
    if let Some(radius) = radius {
        if y > radius {
            return;
        }
    }
    let mut fov_exists = false;
    let x_min = round_high(y as f32 * start);
    let x_max = round_low(y as f32 * end);
    for x in x_min..=x_max {
        if transparent(x, y) {
            if x as f32 >= y as f32 * start && x as f32 <= y as f32 * end {
                reveal(x, y);
                fov_exists = true;
            }
        } else {
            let wall_end = (x as f32 - 0.5) / y as f32;
            if fov_exists && start < wall_end {
                scan(y + 1, start, wall_end, radius, transparent, reveal);
            }
            reveal(x, y);
            fov_exists = false;
            start = (x as f32 + 0.5) / y as f32;
            if start >= end {
                return;
            }
        }
    }
    if fov_exists && start < end {
        scan(y + 1, start, end, radius, transparent, reveal);
    }
}

fn round_high(n: f32) -> u32 {
    n.round() as u32
}

/// Rounds exact halves down, so a wall corner does not leak light.
fn round_low(n: f32) -> u32 {
    if n % 1.0 == 0.5 {
        n.round() as u32 - 1
    } else {
        n.round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn run_fov(center: Pos, radius: Option<u32>, walls: &FxHashSet<Pos>) -> FxHashSet<Pos> {
        let mut revealed = FxHashSet::default();
        fov(
            center,
            radius,
            |pos| !walls.contains(&pos),
            |pos| {
                revealed.insert(pos);
            },
        );
        revealed
    }

    #[test]
    fn test_round_high() {
        assert_eq!(round_high(15.0), 15);
        assert_eq!(round_high(15.49), 15);
        assert_eq!(round_high(15.5), 16);
        assert_eq!(round_high(15.51), 16);
    }

    #[test]
    fn test_round_low() {
        assert_eq!(round_low(15.0), 15);
        assert_eq!(round_low(15.49), 15);
        assert_eq!(round_low(15.5), 15);
        assert_eq!(round_low(15.51), 16);
    }

    #[test]
    fn test_center_always_revealed() {
        let center = Pos::new(0, 0);
        let mut walls = FxHashSet::default();
        for neighbor in center.neighbors() {
            walls.insert(neighbor);
        }

        let revealed = run_fov(center, Some(5), &walls);
        assert!(revealed.contains(&center));
    }

    #[test]
    fn test_open_field_is_a_disc() {
        let center = Pos::new(0, 0);
        let walls = FxHashSet::default();

        let revealed = run_fov(center, Some(2), &walls);

        // 1 + 3r(r+1) cells within radius r
        assert_eq!(revealed.len(), 19);
        assert!(revealed.iter().all(|pos| center.distance(*pos) <= 2));
    }

    #[test]
    fn test_adjacent_walls_revealed() {
        let center = Pos::new(0, 0);
        let mut walls = FxHashSet::default();
        for neighbor in center.neighbors() {
            walls.insert(neighbor);
        }

        let revealed = run_fov(center, Some(5), &walls);
        for neighbor in center.neighbors() {
            assert!(revealed.contains(&neighbor));
        }
    }

    #[test]
    fn test_wall_casts_shadow() {
        let center = Pos::new(0, 0);
        let wall = center + Direction::East;
        let behind = center + Direction::East * 2;

        let mut walls = FxHashSet::default();
        walls.insert(wall);

        let revealed = run_fov(center, Some(5), &walls);
        assert!(revealed.contains(&wall));
        assert!(!revealed.contains(&behind));
    }

    #[test]
    fn test_sealed_room_reveals_only_walls() {
        let center = Pos::new(0, 0);
        let mut walls = FxHashSet::default();
        for neighbor in center.neighbors() {
            walls.insert(neighbor);
        }

        let revealed = run_fov(center, None, &walls);
        // Center plus the six surrounding walls, nothing beyond.
        assert_eq!(revealed.len(), 7);
    }
}
