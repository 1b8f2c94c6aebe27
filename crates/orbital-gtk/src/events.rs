use orbital::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(ControlCommand),
    ConfigReload,
}
