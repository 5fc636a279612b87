// Represents the current high-level state of the application UI
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum State {
    Initialising, // App is starting, loading config
    Running,      // Main operational state, showing the panel
    About,        // Showing the about screen
}
