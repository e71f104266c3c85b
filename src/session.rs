//! The palette editing session: every user command maps to one method here.
//!
//! Each successful mutation commits exactly one snapshot to the bounded
//! history, so undo/redo always step one user command at a time. Rejected
//! input (bad hex, unknown id) leaves the history untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::accessibility::{accessibility_score, generate_accessible_palette};
use crate::color::ColorValue;
use crate::config::Config;
use crate::convert::random_color;
use crate::error::{PaletteError, Result};
use crate::history::History;
use crate::store::{KeyValueStore, RecentColors};

/// Swatch size in the editor. Display-only; not versioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CardSize {
    pub fn next(self) -> Self {
        match self {
            CardSize::Small => CardSize::Medium,
            CardSize::Medium => CardSize::Large,
            CardSize::Large => CardSize::Small,
        }
    }
}

/// Partial edit of one palette entry. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorUpdate {
    pub hex: Option<String>,
    pub name: Option<String>,
}

impl ColorUpdate {
    pub fn hex(hex: impl Into<String>) -> Self {
        Self {
            hex: Some(hex.into()),
            name: None,
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            hex: None,
            name: Some(name.into()),
        }
    }
}

pub struct PaletteSession {
    history: History<Vec<ColorValue>>,
    name: String,
    card_size: CardSize,
    store: Box<dyn KeyValueStore>,
    recent: RecentColors,
    accessible_count: usize,
    next_id: u64,
}

impl std::fmt::Debug for PaletteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteSession")
            .field("name", &self.name)
            .field("colors", &self.palette().len())
            .field("cursor", &self.history.cursor())
            .field("snapshots", &self.history.len())
            .finish()
    }
}

impl PaletteSession {
    /// Start a session from the configured seed palette.
    pub fn new(config: &Config, store: Box<dyn KeyValueStore>) -> Result<Self> {
        config.validate()?;
        let palette = config.initial_colors()?;
        Ok(Self::from_parts(config, config.palette_name.clone(), palette, store))
    }

    /// Start a session from an explicit palette, using `config` for limits.
    /// Entries repeating an earlier id are given fresh ids.
    pub fn with_palette(
        config: &Config,
        name: impl Into<String>,
        palette: Vec<ColorValue>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        Self::from_parts(config, name.into(), palette, store)
    }

    fn from_parts(
        config: &Config,
        name: String,
        palette: Vec<ColorValue>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let next_id = palette
            .iter()
            .filter_map(|c| c.id().parse::<u64>().ok())
            .max()
            .and_then(|max| max.checked_add(1))
            .unwrap_or(1);
        let mut session = Self {
            history: History::with_capacity(Vec::new(), config.history_capacity),
            name,
            card_size: CardSize::default(),
            store,
            recent: RecentColors::new(config.recent_limit),
            accessible_count: config.accessible_count,
            next_id,
        };
        let palette = session.with_unique_ids(palette);
        session.history.reset_to(palette);
        session
    }

    fn with_unique_ids(&mut self, palette: Vec<ColorValue>) -> Vec<ColorValue> {
        // fresh ids must avoid every loaded id, not just the ones seen so far
        let mut taken = palette.clone();
        let mut unique: Vec<ColorValue> = Vec::with_capacity(palette.len());
        for mut value in palette {
            if unique.iter().any(|c| c.id() == value.id()) {
                let id = self.fresh_id(&taken);
                warn!(old = value.id(), new = %id, "reassigned duplicate color id");
                value.set_id(id);
                taken.push(value.clone());
            }
            unique.push(value);
        }
        unique
    }

    pub fn palette(&self) -> &[ColorValue] {
        self.history.current()
    }

    pub fn get(&self, id: &str) -> Option<&ColorValue> {
        self.palette().iter().find(|c| c.id() == id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn card_size(&self) -> CardSize {
        self.card_size
    }

    pub fn set_card_size(&mut self, size: CardSize) {
        self.card_size = size;
    }

    pub fn recent_colors(&self) -> Vec<String> {
        self.recent.load(self.store.as_ref())
    }

    pub fn accessibility_score(&self) -> u32 {
        accessibility_score(self.palette())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// First counter value at or after `next_id` not already used in `taken`.
    fn next_free_id(&self, taken: &[ColorValue]) -> u64 {
        let mut n = self.next_id;
        while taken.iter().any(|c| c.id() == n.to_string()) {
            n = n.wrapping_add(1);
        }
        n
    }

    fn fresh_id(&mut self, taken: &[ColorValue]) -> String {
        let n = self.next_free_id(taken);
        self.next_id = n.wrapping_add(1);
        n.to_string()
    }

    fn commit(&mut self, palette: Vec<ColorValue>, command: &str) {
        self.history.commit(palette);
        debug!(
            command,
            colors = self.palette().len(),
            snapshots = self.history.len(),
            "committed palette"
        );
    }

    fn remember(&mut self, hex: &str) {
        if let Err(e) = self.recent.push(self.store.as_mut(), hex) {
            warn!(error = %e, hex, "could not save recent color");
        }
    }

    /// Append a color. Returns the new entry's id.
    pub fn add_color(&mut self, hex: &str) -> Result<String> {
        let name = format!("Color {}", self.palette().len() + 1);
        let candidate = self.next_free_id(self.palette());
        let value = ColorValue::new(candidate.to_string(), hex, Some(name)).map_err(|e| {
            warn!(hex, "rejected color");
            e
        })?;
        self.next_id = candidate.wrapping_add(1);
        let id = candidate.to_string();
        let canonical = value.hex().to_string();

        let mut palette = self.palette().to_vec();
        palette.push(value);
        self.commit(palette, "add");
        self.remember(&canonical);
        Ok(id)
    }

    pub fn add_random_color(&mut self) -> String {
        let hex = random_color();
        // random_color always yields valid hex
        self.add_color(&hex).unwrap_or_default()
    }

    pub fn update_color(&mut self, id: &str, update: ColorUpdate) -> Result<()> {
        if update == ColorUpdate::default() {
            return match self.get(id) {
                Some(_) => Ok(()),
                None => Err(PaletteError::UnknownColor { id: id.to_string() }),
            };
        }
        let mut palette = self.palette().to_vec();
        let entry = palette
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or_else(|| PaletteError::UnknownColor { id: id.to_string() })?;
        if let Some(hex) = &update.hex {
            entry.set_hex(hex)?;
        }
        if let Some(name) = update.name {
            entry.set_name(Some(name));
        }
        self.commit(palette, "update");
        Ok(())
    }

    pub fn remove_color(&mut self, id: &str) -> Result<()> {
        let before = self.palette().len();
        let palette: Vec<ColorValue> = self
            .palette()
            .iter()
            .filter(|c| c.id() != id)
            .cloned()
            .collect();
        if palette.len() == before {
            return Err(PaletteError::UnknownColor { id: id.to_string() });
        }
        self.commit(palette, "remove");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.commit(Vec::new(), "clear");
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        debug!(moved, cursor = self.history.cursor(), "undo");
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        debug!(moved, cursor = self.history.cursor(), "redo");
        moved
    }

    /// Append the configured number of accessible variants of the first
    /// color. An empty palette is left alone. Returns how many were added.
    pub fn generate_accessible(&mut self) -> Result<usize> {
        let Some(base) = self.palette().first().map(|c| c.hex().to_string()) else {
            debug!("generate accessible on empty palette");
            return Ok(0);
        };
        self.generate_accessible_from(&base, self.accessible_count)
    }

    pub fn generate_accessible_from(&mut self, base_hex: &str, count: usize) -> Result<usize> {
        let generated = generate_accessible_palette(base_hex, count)?;
        let added = generated.len();

        let mut palette = self.palette().to_vec();
        for mut value in generated {
            let id = self.fresh_id(&palette);
            value.set_id(id);
            palette.push(value);
        }
        self.commit(palette, "generate-accessible");
        Ok(added)
    }

    /// Drop all undo/redo history, keeping the current palette.
    pub fn reset_history(&mut self) {
        self.history.reset();
        info!(colors = self.palette().len(), "history reset");
    }
}
