//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed monthly values: `o`, connected with `.`
//! - MoM/YoY changes: `#` bars around a `-` zero axis

use crate::domain::{ChangeRecord, Series};

/// Which change column to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Mom,
    Yoy,
}

impl ChangeKind {
    pub fn label(self) -> &'static str {
        match self {
            ChangeKind::Mom => "MoM",
            ChangeKind::Yoy => "YoY",
        }
    }

    fn pick(self, record: &ChangeRecord) -> Option<f64> {
        match self {
            ChangeKind::Mom => record.mom,
            ChangeKind::Yoy => record.yoy,
        }
    }
}

/// Render the monthly production line for one series.
pub fn render_series_plot(series: &Series, width: usize, height: usize) -> String {
    let obs = series.observations();
    if obs.len() < 2 {
        return "(not enough observations to plot)\n".to_string();
    }

    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = spread_range(obs.iter().map(|o| o.value));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Connect consecutive observations first so markers can overlay.
    let mut prev: Option<(usize, usize)> = None;
    for (i, o) in obs.iter().enumerate() {
        let x = map_x(i, obs.len(), width);
        let y = map_y(o.value, y_min, y_max, height);
        if let Some((px, py)) = prev {
            draw_segment(&mut grid, px, py, x, y);
        }
        prev = Some((x, y));
    }
    for (i, o) in obs.iter().enumerate() {
        let x = map_x(i, obs.len(), width);
        let y = map_y(o.value, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Production: {} | {}..{} | y=[{:.0}, {:.0}] kb/d\n",
        series.entity_id(),
        obs[0].period,
        obs[obs.len() - 1].period,
        y_min,
        y_max
    ));
    push_grid(&mut out, grid);
    out
}

/// Render a bar plot of MoM or YoY changes around a zero axis.
///
/// Months with an absent change leave an empty column, so gaps stay visible.
pub fn render_change_plot(
    changes: &[ChangeRecord],
    kind: ChangeKind,
    width: usize,
    height: usize,
) -> String {
    let present: Vec<f64> = changes.iter().filter_map(|r| kind.pick(r)).collect();
    if present.is_empty() {
        return format!("(no {} changes to plot)\n", kind.label());
    }

    let width = width.max(10);
    let height = height.max(5);

    // Symmetric range around zero so the axis sits where zero actually is.
    let magnitude = present.iter().fold(0.0_f64, |m, v| m.max(v.abs())).max(0.1);
    let (y_min, y_max) = pad_range(-magnitude, magnitude, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    let zero_row = map_y(0.0, y_min, y_max, height);

    for col in &mut grid[zero_row] {
        *col = '-';
    }

    for (i, record) in changes.iter().enumerate() {
        let Some(value) = kind.pick(record) else {
            continue;
        };
        let x = map_x(i, changes.len(), width);
        let y = map_y(value, y_min, y_max, height);
        let (top, bottom) = if y <= zero_row { (y, zero_row) } else { (zero_row, y) };
        for row in grid.iter_mut().take(bottom + 1).skip(top) {
            row[x] = '#';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Change: {} | n={} | y=[{:+.1}, {:+.1}]%\n",
        kind.label(),
        changes.len(),
        y_min,
        y_max
    ));
    push_grid(&mut out, grid);
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
}

fn spread_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for v in values {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if !(min_v.is_finite() && max_v.is_finite()) {
        return (0.0, 1.0);
    }
    if (max_v - min_v).abs() < 1e-9 {
        // Flat series: open up a unit band so the line sits mid-plot.
        return (min_v - 1.0, max_v + 1.0);
    }
    (min_v, max_v)
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(v: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((v - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_segment(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize) {
    if x1 <= x0 + 1 {
        return;
    }
    let span = (x1 - x0) as f64;
    for x in (x0 + 1)..x1 {
        let u = (x - x0) as f64 / span;
        let y = y0 as f64 + u * (y1 as f64 - y0 as f64);
        let y = y.round() as usize;
        if grid[y][x] == ' ' {
            grid[y][x] = '.';
        }
    }
}
