//! The Kanban board: optimistic drops, a pending-move ledger with a grace
//! timer, and the undo toast that counts it down.

pub mod coordinator;
pub mod event;
pub mod ledger;
pub mod notifier;
pub mod timer;

pub use coordinator::{BoardError, DropOutcome, KanbanBoard, UndoRequest};
pub use event::{BoardEvent, DropEvent, MoveEvent};
pub use ledger::{PendingMove, PendingMoveLedger};
pub use notifier::{ToastConfig, ToastView, UndoNotifier};
pub use timer::{CancelToken, GraceTimer, TimerEvent};
