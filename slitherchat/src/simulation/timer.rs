// Timer struct for cadence logic in the simulation
// Counts up from 0 to max_value

#[derive(Debug, Clone)]
pub struct Timer {
    pub max_value: f64,
    pub value: f64,
}

impl Timer {
    /// Create a new timer with a max value and an initial value
    pub fn new(max_value: f64, initial_value: f64) -> Self {
        Self {
            max_value,
            value: initial_value,
        }
    }

    /// Returns true if the timer has gone past the max value
    pub fn is_ready(&self) -> bool {
        self.value >= self.max_value
    }

    /// Update the timer by dt (delta time)
    pub fn update(&mut self, dt: f64) {
        self.value += dt;
    }

    /// Wraps the timer value back within bounds.
    pub fn wrap(&mut self) {
        self.value %= self.max_value;
    }
}
