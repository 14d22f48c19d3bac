use std::fmt;

use rand::Rng;

/// Output model of a power source.
///
/// A tagged variant replaces the runtime type dispatch of a class hierarchy:
/// both models expose the same `{output_kw, connected}` view, and
/// [`Source::resample`] is a no-op for `Fixed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceModel {
    /// Constant output; never changes after construction.
    Fixed,
    /// Output redrawn uniformly from `[min_kw, max_kw)` every cycle.
    Variable {
        /// Lower output bound (kW, inclusive).
        min_kw: f32,
        /// Upper output bound (kW, exclusive).
        max_kw: f32,
    },
}

/// A generation source participating in the cycle's supply aggregation.
///
/// # Examples
///
/// ```
/// use grid_sim::grid::Source;
///
/// let hydro = Source::fixed("HydroStation", 60.0, false);
/// assert_eq!(hydro.output_kw(), 60.0);
/// assert!(hydro.is_connected());
/// ```
#[derive(Debug, Clone)]
pub struct Source {
    name: String,
    output_kw: f32,
    renewable: bool,
    connected: bool,
    model: SourceModel,
}

impl Source {
    /// Creates a source with constant output.
    ///
    /// # Panics
    ///
    /// Panics if `output_kw` is negative.
    pub fn fixed(name: impl Into<String>, output_kw: f32, renewable: bool) -> Self {
        assert!(output_kw >= 0.0, "output_kw must be >= 0");
        Self {
            name: name.into(),
            output_kw,
            renewable,
            connected: true,
            model: SourceModel::Fixed,
        }
    }

    /// Creates a variable source redrawing output from `[min_kw, max_kw)`.
    ///
    /// The initial output is `min_kw` until the first resample.
    ///
    /// # Panics
    ///
    /// Panics if `min_kw` is negative or `min_kw >= max_kw`.
    pub fn variable(name: impl Into<String>, min_kw: f32, max_kw: f32, renewable: bool) -> Self {
        assert!(min_kw >= 0.0, "min_kw must be >= 0");
        assert!(min_kw < max_kw, "min_kw must be < max_kw");
        Self {
            name: name.into(),
            output_kw: min_kw,
            renewable,
            connected: true,
            model: SourceModel::Variable { min_kw, max_kw },
        }
    }

    /// Advances the source one cycle and returns its output.
    ///
    /// `Fixed` sources return the stored constant unchanged. `Variable`
    /// sources draw a fresh uniform value from the injected generator,
    /// overwrite the stored output, and return it. This is the only
    /// stateful step a source performs.
    ///
    /// Callers check connectivity first: a disconnected source contributes
    /// nothing to a cycle and is not resampled, so its output stays frozen.
    pub fn resample(&mut self, rng: &mut impl Rng) -> f32 {
        if let SourceModel::Variable { min_kw, max_kw } = self.model {
            self.output_kw = rng.random_range(min_kw..max_kw);
        }
        self.output_kw
    }

    /// Returns the source name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the most recent output in kW.
    pub fn output_kw(&self) -> f32 {
        self.output_kw
    }

    /// Returns `true` when the source is a renewable.
    pub fn is_renewable(&self) -> bool {
        self.renewable
    }

    /// Returns `true` while the source is connected to the grid.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Disconnects the source from the grid.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Reconnects the source to the grid.
    pub fn reconnect(&mut self) {
        self.connected = true;
    }

    /// Returns the output model.
    pub fn model(&self) -> SourceModel {
        self.model
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Source] {}: {:.1} kW{}",
            self.name,
            self.output_kw,
            if self.renewable { " (renewable)" } else { "" }
        )
    }
}
