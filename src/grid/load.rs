use std::fmt;

/// A power-consuming load.
///
/// Pure data holder: demand, priority, and a connectivity flag. The flag is
/// flipped by the engine (automatic shedding and restoring) or by direct
/// operator commands; a load is never destroyed during a run.
///
/// Lower priority value means more important: restored first, shed last.
#[derive(Debug, Clone)]
pub struct Load {
    name: String,
    demand_kw: f32,
    priority: i32,
    connected: bool,
}

impl Load {
    /// Creates a connected load.
    ///
    /// # Panics
    ///
    /// Panics if `demand_kw` is negative.
    pub fn new(name: impl Into<String>, demand_kw: f32, priority: i32) -> Self {
        assert!(demand_kw >= 0.0, "demand_kw must be >= 0");
        Self {
            name: name.into(),
            demand_kw,
            priority,
            connected: true,
        }
    }

    /// Returns the load name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw demand in kW, regardless of connectivity.
    pub fn demand_kw(&self) -> f32 {
        self.demand_kw
    }

    /// Returns the priority value (lower = more important).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns `true` while the load is connected.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Disconnects the load. Unconditional flip, no guard.
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Reconnects the load. Unconditional flip, no guard.
    pub fn reconnect(&mut self) {
        self.connected = true;
    }
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Load] {}: {:.1} kW, priority {}, connected: {}",
            self.name,
            self.demand_kw,
            self.priority,
            if self.connected { "yes" } else { "no" }
        )
    }
}
