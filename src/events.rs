/// Things that can happen to a running simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The timer fired, move the world one generation forward
    Advance,

    /// The user asked to stop the current run
    Cancel,
}
