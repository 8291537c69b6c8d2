//! Overlay and multi-select state shared by every form.
//!
//! Rendering is up to the front end; these types only decide what is open and
//! what is selected.

use std::collections::HashMap;

use edudesk_core::multi_value::MultiValue;
use edudesk_models::SelectOption;

/// Screen-space rectangle an overlay occupies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Something that closes when the pointer goes down outside its region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dismissable {
    region: Region,
    open: bool,
}

impl Dismissable {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// The overlay moved or resized.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Returns true if this press closed the overlay.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if self.open && !self.region.contains(x, y) {
            self.open = false;
            return true;
        }
        false
    }
}

/// One pointer listener for every overlay on screen, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    overlays: HashMap<String, Dismissable>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: impl Into<String>, region: Region) {
        self.overlays
            .entry(key.into())
            .and_modify(|o| o.set_region(region))
            .or_insert_with(|| Dismissable::new(region));
    }

    pub fn remove(&mut self, key: &str) {
        self.overlays.remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&Dismissable> {
        self.overlays.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Dismissable> {
        self.overlays.get_mut(key)
    }

    pub fn is_open(&self, key: &str) -> bool {
        self.overlays.get(key).is_some_and(Dismissable::is_open)
    }

    /// Dispatch a press to every overlay. Returns the keys that closed.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Vec<String> {
        let mut closed: Vec<String> = self
            .overlays
            .iter_mut()
            .filter_map(|(key, overlay)| overlay.pointer_down(x, y).then(|| key.clone()))
            .collect();
        closed.sort();
        closed
    }
}

/// Dropdown with checkable options backed by a multi-valued field.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelect {
    options: Vec<SelectOption>,
    selected: MultiValue,
    filter: String,
    pub overlay: Dismissable,
}

impl MultiSelect {
    pub fn new(options: Vec<SelectOption>, selected: MultiValue) -> Self {
        Self {
            options,
            selected,
            filter: String::new(),
            overlay: Dismissable::default(),
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> &MultiValue {
        &self.selected
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.contains(label)
    }

    pub fn toggle(&mut self, label: &str) {
        self.selected.toggle(label);
    }

    /// Narrow the visible options; matching ignores case.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.trim().to_lowercase();
    }

    pub fn visible_options(&self) -> Vec<&SelectOption> {
        self.options
            .iter()
            .filter(|o| self.filter.is_empty() || o.label.to_lowercase().contains(&self.filter))
            .collect()
    }

    /// Labels whose selection differs from `target`: deselections first, then
    /// additions in target order. Toggling each turns the current selection into
    /// `target`.
    pub fn changes_to(&self, target: &[String]) -> Vec<String> {
        let mut changes: Vec<String> = self
            .selected
            .iter()
            .filter(|s| !target.contains(*s))
            .cloned()
            .collect();
        changes.extend(target.iter().filter(|t| !self.selected.contains(t)).cloned());
        changes
    }

    pub fn into_selected(self) -> MultiValue {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_contains_edges() {
        let r = Region::new(10.0, 10.0, 100.0, 50.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(110.0, 60.0));
        assert!(!r.contains(9.9, 30.0));
        assert!(!r.contains(50.0, 61.0));
    }

    #[test]
    fn test_dismissable_closes_on_outside_press() {
        let mut overlay = Dismissable::new(Region::new(0.0, 0.0, 100.0, 100.0));
        overlay.open();
        assert!(!overlay.pointer_down(50.0, 50.0));
        assert!(overlay.is_open());
        assert!(overlay.pointer_down(150.0, 50.0));
        assert!(!overlay.is_open());
        assert!(!overlay.pointer_down(150.0, 50.0));
    }

    #[test]
    fn test_registry_closes_only_overlays_missed() {
        let mut overlays = OverlayRegistry::new();
        overlays.register("tags", Region::new(0.0, 0.0, 100.0, 100.0));
        overlays.register("source", Region::new(200.0, 0.0, 100.0, 100.0));
        overlays.register("courses", Region::new(400.0, 0.0, 100.0, 100.0));
        overlays.get_mut("tags").unwrap().open();
        overlays.get_mut("source").unwrap().open();

        let closed = overlays.pointer_down(250.0, 50.0);
        assert_eq!(closed, vec!["tags"]);
        assert!(overlays.is_open("source"));
        assert!(!overlays.is_open("courses"));
    }

    #[test]
    fn test_multi_select_toggle_and_filter() {
        let options = vec![
            SelectOption::plain("Walk-in"),
            SelectOption::plain("Website"),
            SelectOption::plain("Referral"),
        ];
        let mut select = MultiSelect::new(options, MultiValue::from_wire("Website"));
        select.toggle("Referral");
        select.toggle("Website");
        assert_eq!(select.selected().as_slice(), ["Referral"]);

        select.set_filter("WEB");
        let visible: Vec<_> = select.visible_options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(visible, vec!["Website"]);
    }

    #[test]
    fn test_changes_to_reaches_target() {
        let select = MultiSelect::new(vec![], MultiValue::from_wire("A, B"));
        let target = vec!["B".to_string(), "C".to_string()];
        let changes = select.changes_to(&target);
        assert_eq!(changes, vec!["A", "C"]);

        let mut selected = select.selected().clone();
        for label in &changes {
            selected.toggle(label);
        }
        assert_eq!(selected.as_slice(), ["B", "C"]);
    }
}
