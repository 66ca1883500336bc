//! Run-length draw planning
//!
//! Converts a quantized image into an ordered plan of pointer strokes.
//! Horizontal spans of same-colored pixels collapse into a single
//! press-drag-release stroke; isolated pixels become single clicks. Only
//! horizontal adjacency is exploited - merging across rows or diagonals
//! would save few actions and costs planner complexity.

use crate::palette::{self, Rgb};
use crate::quantize::QuantizedImage;
use std::collections::{HashMap, HashSet};

/// One pointer stroke on the logical pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// A single click at (x, y)
    Point { x: u32, y: u32 },
    /// A horizontal drag on row `y` covering columns `x_start..=x_end`
    Run { y: u32, x_start: u32, x_end: u32 },
}

/// All pixel coordinates of one non-background color, in row-major scan
/// order of discovery.
#[derive(Debug, Clone)]
pub struct ColorGroup {
    pub color: Rgb,
    pixels: Vec<(u32, u32)>,
    occupied: HashSet<(u32, u32)>,
}

impl ColorGroup {
    fn new(color: Rgb) -> Self {
        Self {
            color,
            pixels: Vec::new(),
            occupied: HashSet::new(),
        }
    }

    fn push(&mut self, x: u32, y: u32) {
        self.pixels.push((x, y));
        self.occupied.insert((x, y));
    }

    pub fn pixels(&self) -> &[(u32, u32)] {
        &self.pixels
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.occupied.contains(&(x, y))
    }

    /// Whether the pixel immediately to the right belongs to this group.
    /// Membership is tested against the group, not the whole image.
    fn has_neighbor(&self, x: u32, y: u32) -> bool {
        self.occupied.contains(&(x + 1, y))
    }
}

/// Strokes for one color, in discovery order.
#[derive(Debug, Clone)]
pub struct PlannedColor {
    pub color: Rgb,
    pub strokes: Vec<Stroke>,
}

/// The ordered stroke plan for a whole image. Color order is the
/// first-encountered order of the row-major scan; visible draw order is
/// part of the contract, so groups execute strictly in sequence.
#[derive(Debug, Clone, Default)]
pub struct DrawPlan {
    pub groups: Vec<PlannedColor>,
}

impl DrawPlan {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of discrete strokes across all colors.
    pub fn stroke_count(&self) -> usize {
        self.groups.iter().map(|g| g.strokes.len()).sum()
    }
}

/// Build the draw plan for a quantized image.
pub fn plan(image: &QuantizedImage) -> DrawPlan {
    let groups = group_colors(image);

    let groups = groups
        .iter()
        .map(|group| PlannedColor {
            color: group.color,
            strokes: strokes_for(group),
        })
        .collect();

    DrawPlan { groups }
}

/// Scan row-major and bucket non-background pixels by exact color triple,
/// keeping first-seen color order.
fn group_colors(image: &QuantizedImage) -> Vec<ColorGroup> {
    let mut groups: Vec<ColorGroup> = Vec::new();
    let mut slots: HashMap<Rgb, usize> = HashMap::new();

    for y in 0..image.height() {
        for x in 0..image.width() {
            let color = image.rgb_at(x, y);
            if color == palette::BACKGROUND {
                // the canvas substrate is already this color
                continue;
            }

            let slot = *slots.entry(color).or_insert_with(|| {
                groups.push(ColorGroup::new(color));
                groups.len() - 1
            });
            groups[slot].push(x, y);
        }
    }

    groups
}

/// Derive strokes for one color group.
///
/// Walks the stored scan order with a skip counter: a pixel whose right
/// neighbor is in the group opens a run that extends while the cursor keeps
/// having a neighbor; pixels consumed by the run are skipped rather than
/// re-emitted. Every pixel of the group is covered exactly once.
fn strokes_for(group: &ColorGroup) -> Vec<Stroke> {
    let mut strokes = Vec::new();
    let mut skip = 0usize;

    for &(x, y) in group.pixels() {
        if skip > 0 {
            skip -= 1;
            continue;
        }

        if group.has_neighbor(x, y) {
            let mut x_end = x;
            while group.has_neighbor(x_end, y) {
                x_end += 1;
            }
            skip = (x_end - x) as usize;
            strokes.push(Stroke::Run { y, x_start: x, x_end });
        } else {
            strokes.push(Stroke::Point { x, y });
        }
    }

    strokes
}
