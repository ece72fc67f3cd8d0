use spindle_core::ipc::Command;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Next,
    Previous,
    Goto(i64),
    ConfigReload,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Show => AppEvent::Show,
            Command::Hide => AppEvent::Hide,
            Command::Next => AppEvent::Next,
            Command::Previous => AppEvent::Previous,
            Command::Goto(index) => AppEvent::Goto(index),
            Command::Reload => AppEvent::ConfigReload,
        }
    }
}
