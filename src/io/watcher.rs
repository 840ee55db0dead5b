use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug)]
pub enum FileEvent {
    /// One or more records or config files changed on disk.
    Changed(Vec<PathBuf>),
}

/// Watches the boards/ directory for edits made outside the TUI.
pub struct BoardWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl BoardWatcher {
    /// Start watching `board_dir`. Call [`BoardWatcher::poll`] each tick.
    pub fn start(board_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let board_dir_owned = board_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                let relevant: Vec<PathBuf> = event
                    .paths
                    .into_iter()
                    .filter(|p| p.starts_with(&board_dir_owned) && is_watched(p))
                    .collect();

                if !relevant.is_empty() {
                    let _ = tx.send(FileEvent::Changed(relevant));
                }
            },
            Config::default(),
        )?;

        watcher.watch(board_dir, RecursiveMode::Recursive)?;
        Ok(BoardWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending file events.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<FileEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

/// Records and config files; never the lock, UI state, log or temp files
fn is_watched(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str())
        && name.starts_with('.')
    {
        return false;
    }
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json") | Some("toml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_own_bookkeeping_files() {
        assert!(is_watched(Path::new("/p/boards/data/po.json")));
        assert!(is_watched(Path::new("/p/boards/project.toml")));
        assert!(!is_watched(Path::new("/p/boards/.state.json")));
        assert!(!is_watched(Path::new("/p/boards/.lock")));
        assert!(!is_watched(Path::new("/p/boards/.statusboard.log")));
        assert!(!is_watched(Path::new("/p/boards/.tmpAbC123")));
        assert!(!is_watched(Path::new("/p/boards/notes.md")));
    }
}
