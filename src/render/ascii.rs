//! ASCII map of cities and tours.

use crate::models::{City, Tour};

const SEPARATOR: &str = "----------";

/// Cell coordinates are clamped to `±2^60` so label offsets and line
/// arithmetic stay far from `i64` overflow.
const CELL_LIMIT: f64 = (1u64 << 60) as f64;

/// A character grid for plotting cities and the edges of a tour.
///
/// Cities are labelled `C_<index>` starting at their rounded coordinate;
/// tour edges are traced with `*` and never overwrite a label. Anything
/// that falls outside the grid is clipped.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{City, Tour};
/// use u_tsp::render::AsciiMap;
///
/// let cities = vec![City::new(0.0, 0.0), City::new(6.0, 0.0)];
/// let map = AsciiMap::new(10, 2);
/// let out = map.render(&cities, Some(&Tour::identity(2)));
/// let lines: Vec<&str> = out.lines().collect();
/// assert_eq!(lines[0], "----------");
/// assert_eq!(lines[1], "C_0***C_1 ");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiMap {
    width: usize,
    height: usize,
}

impl Default for AsciiMap {
    fn default() -> Self {
        Self::new(70, 40)
    }
}

impl AsciiMap {
    /// Creates a map of `width` columns and `height` rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Map width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Renders the cities, and the tour if one is given.
    ///
    /// The output is a separator line followed by `height` rows of exactly
    /// `width` characters, each terminated by `\n`.
    ///
    /// # Panics
    ///
    /// Panics if `tour` visits a city index outside `cities`. A tour built
    /// for the same city set never does.
    pub fn render(&self, cities: &[City], tour: Option<&Tour>) -> String {
        let mut grid = Grid::new(self.width, self.height);

        for (i, city) in cities.iter().enumerate() {
            let (x, y) = cell_of(city);
            for (k, ch) in format!("C_{i}").chars().enumerate() {
                grid.put(x + k as i64, y, ch);
            }
        }

        if let Some(tour) = tour {
            for (a, b) in tour.edges() {
                grid.draw_line(cell_of(&cities[a]), cell_of(&cities[b]));
            }
        }

        let mut out = String::with_capacity(SEPARATOR.len() + 1 + (self.width + 1) * self.height);
        out.push_str(SEPARATOR);
        out.push('\n');
        for row in grid.cells.chunks(self.width.max(1)).take(self.height) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

fn cell_of(city: &City) -> (i64, i64) {
    let clamp = |v: f64| v.round().clamp(-CELL_LIMIT, CELL_LIMIT) as i64;
    (clamp(city.x()), clamp(city.y()))
}

struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    fn put(&mut self, x: i64, y: i64, ch: char) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = ch;
        }
    }

    /// Steps from `a` towards `b`, filling blank cells with `*`.
    ///
    /// The start cell is skipped; integer division truncates towards zero.
    /// Only the steps that can land on the grid are visited, so far-away
    /// endpoints cost no more than the visible part of the line.
    fn draw_line(&mut self, (ax, ay): (i64, i64), (bx, by): (i64, i64)) {
        let (ax, ay, bx, by) = (ax as i128, ay as i128, bx as i128, by as i128);
        let (dx, dy) = (bx - ax, by - ay);
        let steps = dx.abs().max(dy.abs());
        let (x_lo, x_hi) = axis_window(ax, dx, steps, self.width as i128);
        let (y_lo, y_hi) = axis_window(ay, dy, steps, self.height as i128);

        for k in x_lo.max(y_lo)..=x_hi.min(y_hi) {
            let x = ax + k * dx / steps;
            let y = ay + k * dy / steps;
            if let Some(idx) = self.index(x as i64, y as i64) {
                if self.cells[idx] == ' ' {
                    self.cells[idx] = '*';
                }
            }
        }
    }
}

/// Range of steps `k` in `1..=steps` for which `a + k * d / steps` may fall
/// inside `0..len`. May include a few extra steps at either end; an empty
/// window has `lo > hi`.
fn axis_window(a: i128, d: i128, steps: i128, len: i128) -> (i128, i128) {
    if d == 0 {
        return if (0..len).contains(&a) { (1, steps) } else { (1, 0) };
    }
    // The truncated offset is within one cell of k * d / steps.
    let lo = (-1 - a) * steps;
    let hi = (len + 1 - a) * steps;
    let (k_lo, k_hi) = if d > 0 {
        (floor_div(lo, d), floor_div(hi, d) + 1)
    } else {
        (floor_div(hi, d), floor_div(lo, d) + 1)
    };
    (k_lo.max(1), k_hi.min(steps))
}

fn floor_div(a: i128, b: i128) -> i128 {
    if b < 0 {
        (-a).div_euclid(-b)
    } else {
        a.div_euclid(b)
    }
}
