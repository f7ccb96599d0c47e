//! Grid packing: append placement, template placement and the filtered repack.
//! Everything here is a pure function of its inputs.

use std::collections::{HashMap, HashSet};

use super::config::WorkspaceConfig;
use super::entities::WidgetInstance;
use super::value_objects::{Breakpoint, LayoutEntry, Layouts, WidgetId, WidgetSize};

/// Place one new widget after the last placed entry.
///
/// The last placed entry is the one with the greatest `(y, x)`. The new
/// widget goes to its right on the same row when it fits, otherwise it
/// starts a new row directly below it.
pub fn append_placement(existing: &[LayoutEntry], id: WidgetId, size: WidgetSize, columns: u32) -> LayoutEntry {
    let w = size.w.min(columns).max(1);
    let (x, y) = match existing.iter().max_by_key(|entry| (entry.y, entry.x)) {
        Some(last) if last.right() + w <= columns => (last.right(), last.y),
        Some(last) => (0, last.bottom()),
        None => (0, 0),
    };
    LayoutEntry::new(id, x, y, w, size.h).with_min(size.min_w.min(w), size.min_h)
}

/// Greedy row packer used for filtered views and for deriving narrow
/// breakpoints. Items keep their order and their reference `(w, h)`; a row
/// wraps as soon as the next item would overflow `columns`.
pub fn repack(
    ids: &[WidgetId],
    reference: &[LayoutEntry],
    fallback: &[LayoutEntry],
    default_size: WidgetSize,
    columns: u32,
) -> Vec<LayoutEntry> {
    let reference: HashMap<&WidgetId, &LayoutEntry> = reference.iter().map(|e| (&e.i, e)).collect();
    let fallback: HashMap<&WidgetId, &LayoutEntry> = fallback.iter().map(|e| (&e.i, e)).collect();

    let mut x = 0;
    let mut y = 0;
    let mut row_height = 0;
    let mut packed = Vec::with_capacity(ids.len());

    for id in ids {
        let source = reference.get(id).or_else(|| fallback.get(id)).copied();
        let (w, h, min_w, min_h) = match source {
            Some(entry) => (entry.w, entry.h, entry.min_w, entry.min_h),
            None => (default_size.w, default_size.h, Some(default_size.min_w), Some(default_size.min_h)),
        };
        let w = w.min(columns).max(1);

        if x + w > columns {
            x = 0;
            y += row_height;
            row_height = 0;
        }

        packed.push(LayoutEntry {
            i: id.clone(),
            x,
            y,
            w,
            h,
            min_w: min_w.map(|m| m.min(w)),
            min_h,
        });
        x += w;
        row_height = row_height.max(h);
    }

    packed
}

/// Fill every breakpoint other than `lg` by repacking the `lg` sizes into
/// that breakpoint's column count.
pub fn derive_breakpoints(ids: &[WidgetId], lg: Vec<LayoutEntry>, config: &WorkspaceConfig) -> Layouts {
    let mut layouts = Layouts::new();
    for breakpoint in Breakpoint::all() {
        if breakpoint == Breakpoint::Lg {
            continue;
        }
        let packed = repack(ids, &lg, &[], config.widget_size, config.columns(breakpoint));
        layouts.insert(breakpoint, packed);
    }
    layouts.insert(Breakpoint::Lg, lg);
    layouts
}

/// Fixed-size tiles, `per_row` to a row, left to right then top to bottom
pub fn grid_placement(ids: &[WidgetId], tile: WidgetSize, per_row: u32) -> Vec<LayoutEntry> {
    let per_row = per_row.max(1);
    ids.iter()
        .enumerate()
        .map(|(index, id)| {
            let index = index as u32;
            LayoutEntry::new(id.clone(), (index % per_row) * tile.w, (index / per_row) * tile.h, tile.w, tile.h)
                .with_min(tile.min_w, tile.min_h)
        })
        .collect()
}

/// Adapter between the packing engine and a concrete drag-and-drop grid.
pub trait GridLayoutProvider {
    fn resolve_breakpoint(&self, width_px: u32) -> Breakpoint;

    fn columns(&self, breakpoint: Breakpoint) -> u32;

    /// Synthetic layout for `ids` at `breakpoint` (the filtered view)
    fn compute_layout(&self, ids: &[WidgetId], layouts: &Layouts, breakpoint: Breakpoint) -> Vec<LayoutEntry>;

    /// Reconcile a layout payload reported by the grid after a drag/resize
    /// with the board's items and current layouts.
    fn on_drag_end(&self, items: &[WidgetInstance], current: &Layouts, incoming: Layouts) -> Layouts;
}

/// Breakpoint table driven implementation
#[derive(Debug, Clone)]
pub struct ResponsiveGrid {
    config: WorkspaceConfig,
}

impl ResponsiveGrid {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    fn sanitize_entry(&self, mut entry: LayoutEntry, columns: u32) -> LayoutEntry {
        let min_w = entry.min_w.unwrap_or(1).min(columns).max(1);
        let min_h = entry.min_h.unwrap_or(1).max(1);
        entry.w = entry.w.clamp(min_w, columns);
        entry.h = entry.h.max(min_h);
        entry.x = entry.x.min(columns - entry.w);
        entry.fit_to(columns);
        entry
    }
}

impl Default for ResponsiveGrid {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}

impl GridLayoutProvider for ResponsiveGrid {
    fn resolve_breakpoint(&self, width_px: u32) -> Breakpoint {
        // Widest breakpoint whose minimum width is satisfied
        self.config
            .breakpoints
            .iter()
            .filter(|(_, spec)| width_px >= spec.min_width)
            .max_by_key(|(_, spec)| spec.min_width)
            .map(|(breakpoint, _)| *breakpoint)
            .unwrap_or(Breakpoint::Xxs)
    }

    fn columns(&self, breakpoint: Breakpoint) -> u32 {
        self.config.columns(breakpoint)
    }

    fn compute_layout(&self, ids: &[WidgetId], layouts: &Layouts, breakpoint: Breakpoint) -> Vec<LayoutEntry> {
        let reference = layouts.get(&breakpoint).map(Vec::as_slice).unwrap_or(&[]);
        let fallback = layouts.get(&Breakpoint::Lg).map(Vec::as_slice).unwrap_or(&[]);
        repack(ids, reference, fallback, self.config.widget_size, self.columns(breakpoint))
    }

    fn on_drag_end(&self, items: &[WidgetInstance], current: &Layouts, incoming: Layouts) -> Layouts {
        let known: HashSet<&WidgetId> = items.iter().map(|item| &item.id).collect();
        let mut merged = current.clone();

        for (breakpoint, entries) in incoming {
            let columns = self.columns(breakpoint);
            let previous = current.get(&breakpoint).cloned().unwrap_or_default();
            let mut seen = HashSet::new();
            let mut reconciled: Vec<LayoutEntry> = Vec::with_capacity(items.len());

            for entry in entries {
                if !known.contains(&entry.i) || !seen.insert(entry.i.clone()) {
                    continue;
                }
                reconciled.push(self.sanitize_entry(entry, columns));
            }

            // Items the payload did not mention keep their previous entry
            for item in items {
                if seen.contains(&item.id) {
                    continue;
                }
                let entry = match previous.iter().find(|entry| entry.i == item.id) {
                    Some(entry) => entry.clone(),
                    None => append_placement(&reconciled, item.id.clone(), self.config.widget_size, columns),
                };
                seen.insert(item.id.clone());
                reconciled.push(entry);
            }

            merged.insert(breakpoint, reconciled);
        }

        merged
    }
}
