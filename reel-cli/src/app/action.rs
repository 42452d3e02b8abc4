/// User actions that can be performed in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move selection one row up
    MoveUp,
    /// Move selection one row down
    MoveDown,
    /// Move selection one cell left
    MoveLeft,
    /// Move selection one cell right
    MoveRight,
    /// Go to first item
    GoToFirst,
    /// Go to last item
    GoToLast,
    /// Open the selected directory or activate the selected file
    Open,
    /// Go to the parent directory
    GoUp,
    /// Re-read the current directory from disk
    Rescan,
    /// Show help overlay
    ShowHelp,
    /// Hide help overlay
    HideHelp,
    /// Quit the application
    Quit,
    /// No action (for tick events)
    Tick,
}
