use bevy::prelude::*;
use pathfinding::prelude::astar;

use crate::config::{NAV_AGENT_RADIUS, NAV_CELL_SIZE, WORLD_HALF_EXTENT};

/// Cost of an orthogonal step; diagonals cost `DIAGONAL_COST`.
const STRAIGHT_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;

pub type NavCell = (usize, usize);

/// Walkability grid over the play area. Building footprints are obstacles.
#[derive(Resource, Debug, Clone)]
pub struct NavGrid {
    /// World-space XZ of the corner of cell (0, 0).
    pub origin: Vec2,
    pub cell_size: f32,
    pub width: usize,
    pub height: usize,
    blocked: Vec<bool>,
}

impl Default for NavGrid {
    fn default() -> Self {
        let cells = ((WORLD_HALF_EXTENT * 2.0) / NAV_CELL_SIZE).ceil() as usize;
        Self::new(
            Vec2::splat(-WORLD_HALF_EXTENT),
            NAV_CELL_SIZE,
            cells,
            cells,
        )
    }
}

impl NavGrid {
    pub fn new(origin: Vec2, cell_size: f32, width: usize, height: usize) -> Self {
        Self {
            origin,
            cell_size,
            width,
            height,
            blocked: vec![false; width * height],
        }
    }

    pub fn world_to_cell(&self, pos: Vec3) -> Option<NavCell> {
        let local = (pos.xz() - self.origin) / self.cell_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (x, y) = (local.x as usize, local.y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    pub fn cell_center(&self, (x, y): NavCell) -> Vec2 {
        self.origin + Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * self.cell_size
    }

    pub fn is_blocked(&self, (x, y): NavCell) -> bool {
        self.blocked[y * self.width + x]
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    /// Clears the grid and marks every cell whose center lies inside one of the
    /// given footprints (center, half extents), grown by the agent radius.
    pub fn rebuild(&mut self, footprints: impl IntoIterator<Item = (Vec3, Vec3)>) {
        self.blocked.fill(false);
        for (center, half_extents) in footprints {
            let half = half_extents.xz() + Vec2::splat(NAV_AGENT_RADIUS);
            let min = center.xz() - half;
            let max = center.xz() + half;
            for y in 0..self.height {
                for x in 0..self.width {
                    let c = self.cell_center((x, y));
                    if c.x >= min.x && c.x <= max.x && c.y >= min.y && c.y <= max.y {
                        self.blocked[y * self.width + x] = true;
                    }
                }
            }
        }
    }

    fn neighbors(&self, (x, y): NavCell) -> Vec<(NavCell, u32)> {
        let mut out = Vec::with_capacity(8);
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
                    continue;
                }
                let next = (nx as usize, ny as usize);
                if self.is_blocked(next) {
                    continue;
                }
                if dx != 0 && dy != 0 {
                    // No corner cutting past an obstacle.
                    let side_a = ((x as i32 + dx) as usize, y);
                    let side_b = (x, (y as i32 + dy) as usize);
                    if self.is_blocked(side_a) || self.is_blocked(side_b) {
                        continue;
                    }
                    out.push((next, DIAGONAL_COST));
                } else {
                    out.push((next, STRAIGHT_COST));
                }
            }
        }
        out
    }

    /// Plans a path from `from` to `to`. Returns waypoints ending exactly at
    /// `to` (at `from`'s height), or `None` when the goal is out of bounds,
    /// blocked, or unreachable. The start cell is never treated as blocked.
    pub fn find_path(&self, from: Vec3, to: Vec3) -> Option<Vec<Vec3>> {
        let start = self.world_to_cell(from)?;
        let goal = self.world_to_cell(to)?;
        if self.is_blocked(goal) {
            return None;
        }

        let end = Vec3::new(to.x, from.y, to.z);
        if start == goal {
            return Some(vec![end]);
        }

        let (cells, _cost) = astar(
            &start,
            |cell| self.neighbors(*cell),
            |cell| octile(*cell, goal),
            |cell| *cell == goal,
        )?;

        let mut waypoints: Vec<Vec3> = cells
            .iter()
            .skip(1)
            .take(cells.len().saturating_sub(2))
            .map(|cell| {
                let c = self.cell_center(*cell);
                Vec3::new(c.x, from.y, c.y)
            })
            .collect();
        waypoints.push(end);
        Some(waypoints)
    }
}

fn octile(a: NavCell, b: NavCell) -> u32 {
    let dx = (a.0 as i32 - b.0 as i32).unsigned_abs();
    let dy = (a.1 as i32 - b.1 as i32).unsigned_abs();
    STRAIGHT_COST * dx.max(dy) + (DIAGONAL_COST - STRAIGHT_COST) * dx.min(dy)
}
