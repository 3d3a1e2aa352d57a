pub mod chore;
pub mod pomodoro;
pub mod report;
pub mod task;

pub use chore::{Chore, ChoreUpdate};
pub use pomodoro::{Pomodoro, PomodoroStatus};
pub use report::{Report, ReportStatus, ReportUpdate};
pub use task::{Task, TaskUpdate, TitleInput};
