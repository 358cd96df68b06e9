/// Scene-level flags that gameplay handlers write and the host polls.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneStatus {
    /// Simulated seconds since the scene was created.
    pub time: f64,
    /// The player was caught; the host should restart or end.
    pub done: bool,
    pub finished_level: bool,
}
