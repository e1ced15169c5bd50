use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::render::Color;

/// Lookup-table size used when sampling continuous palettes.
pub const DEFAULT_LUT_SIZE: usize = 256;

const MAGMA_STOPS: [&str; 9] = [
    "#000004", "#1c1044", "#4f127b", "#812581", "#b5367a", "#e55064", "#fb8761", "#fec287",
    "#fcfdbf",
];

const VIRIDIS_STOPS: [&str; 10] = [
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

const GRAY_STOPS: [&str; 2] = ["#000000", "#ffffff"];

/// Ten class colors; class 0 is the neutral "unassigned" gray.
const CAT10_MOD: [&str; 10] = [
    "#bcbcbc", "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
    "#17becf", "#bcbd22",
];

/// Finite palette plus the flag telling whether its entries are class colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapping {
    name: String,
    entries: Vec<Color>,
    categorical: bool,
}

impl ColorMapping {
    pub fn new(
        name: impl Into<String>,
        entries: Vec<Color>,
        categorical: bool,
    ) -> PlotResult<Self> {
        let name = name.into();
        if entries.is_empty() {
            return Err(PlotError::InvalidColormap(format!(
                "colormap `{name}` has no entries"
            )));
        }
        for color in &entries {
            color
                .validate()
                .map_err(|err| PlotError::InvalidColormap(format!("colormap `{name}`: {err}")))?;
        }
        Ok(Self {
            name,
            entries,
            categorical,
        })
    }

    /// Discrete class palette; index `i` renders as `entries[i]`.
    pub fn categorical(name: impl Into<String>, entries: Vec<Color>) -> PlotResult<Self> {
        Self::new(name, entries, true)
    }

    /// Continuous palette sampled into `size` evenly spaced entries between
    /// equally spaced color stops.
    pub fn continuous(name: impl Into<String>, stops: &[Color], size: usize) -> PlotResult<Self> {
        let name = name.into();
        if stops.len() < 2 {
            return Err(PlotError::InvalidColormap(format!(
                "continuous colormap `{name}` needs at least two stops"
            )));
        }
        if size < 2 {
            return Err(PlotError::InvalidColormap(format!(
                "continuous colormap `{name}` needs a lookup size >= 2"
            )));
        }

        let segments = (stops.len() - 1) as f64;
        let entries = (0..size)
            .map(|i| {
                let position = i as f64 / (size - 1) as f64 * segments;
                let lower = (position.floor() as usize).min(stops.len() - 2);
                stops[lower].lerp(stops[lower + 1], position - lower as f64)
            })
            .collect();
        Self::new(name, entries, false)
    }

    /// Builtin palettes: `magma`, `viridis`, `gray` (continuous) and
    /// `cat10_mod`, `cat10_mod_first_transparent` (categorical).
    pub fn builtin(name: &str) -> PlotResult<Self> {
        match name {
            "magma" => {
                Self::continuous(name, &parse_hex_list(name, &MAGMA_STOPS)?, DEFAULT_LUT_SIZE)
            }
            "viridis" => Self::continuous(
                name,
                &parse_hex_list(name, &VIRIDIS_STOPS)?,
                DEFAULT_LUT_SIZE,
            ),
            "gray" => Self::continuous(name, &parse_hex_list(name, &GRAY_STOPS)?, DEFAULT_LUT_SIZE),
            "cat10_mod" => Self::categorical(name, parse_hex_list(name, &CAT10_MOD)?),
            "cat10_mod_first_transparent" => {
                let mut entries = parse_hex_list(name, &CAT10_MOD)?;
                entries[0] = Color::TRANSPARENT;
                Self::categorical(name, entries)
            }
            other => Err(PlotError::InvalidColormap(format!(
                "unknown builtin colormap `{other}`"
            ))),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn entries(&self) -> &[Color] {
        &self.entries
    }

    /// Number of discrete colors (`N`).
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_categorical(&self) -> bool {
        self.categorical
    }

    /// Maps a normalized value to a palette entry.
    ///
    /// `[0, 1)` is split into `N` equal slots and `1.0` maps to the last entry.
    /// Values below 0 or above 1 saturate to the first/last entry. NaN maps to
    /// `Color::TRANSPARENT`.
    #[must_use]
    pub fn lookup(&self, normalized: f64) -> Color {
        if normalized.is_nan() {
            return Color::TRANSPARENT;
        }
        let last = self.entries.len() - 1;
        if normalized < 0.0 {
            return self.entries[0];
        }
        // absorb rounding from the divide-then-multiply round trip of class indices
        let slot = (normalized * self.entries.len() as f64 + 1e-9).floor();
        if slot >= last as f64 {
            return self.entries[last];
        }
        self.entries[slot as usize]
    }
}

impl TryFrom<&ColormapSpec> for ColorMapping {
    type Error = PlotError;

    fn try_from(spec: &ColormapSpec) -> PlotResult<Self> {
        match spec {
            ColormapSpec::Named { name } => Self::builtin(name),
            ColormapSpec::Listed {
                name,
                colors,
                categorical,
            } => Self::new(
                name.clone(),
                parse_hex_list(name, colors.as_slice())?,
                *categorical,
            ),
            ColormapSpec::Continuous { name, stops, size } => {
                Self::continuous(name.clone(), &parse_hex_list(name, stops.as_slice())?, *size)
            }
        }
    }
}

impl TryFrom<ColormapSpec> for ColorMapping {
    type Error = PlotError;

    fn try_from(spec: ColormapSpec) -> PlotResult<Self> {
        Self::try_from(&spec)
    }
}

/// Serializable description of a palette, resolved with `ColorMapping::try_from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColormapSpec {
    Named {
        name: String,
    },
    Listed {
        name: String,
        colors: Vec<String>,
        #[serde(default = "default_listed_categorical")]
        categorical: bool,
    },
    Continuous {
        name: String,
        stops: Vec<String>,
        #[serde(default = "default_lut_size")]
        size: usize,
    },
}

impl ColormapSpec {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }
}

fn default_listed_categorical() -> bool {
    true
}

fn default_lut_size() -> usize {
    DEFAULT_LUT_SIZE
}

fn parse_hex_list<S: AsRef<str>>(name: &str, colors: &[S]) -> PlotResult<Vec<Color>> {
    colors
        .iter()
        .map(|hex| {
            Color::from_hex(hex.as_ref())
                .map_err(|err| PlotError::InvalidColormap(format!("colormap `{name}`: {err}")))
        })
        .collect()
}
