use parking_lot::RwLock;
use std::{sync::Arc, time::Instant};

use kinetic_control::{Command, DriveState};

#[derive(Clone)]
pub struct State {
    /// Last output state the driver successfully commanded.
    pub drive: DriveState,
    /// Last command that was applied, if any yet.
    pub last_command: Option<Command>,
    pub last_cmd_ts: Instant,
    pub commands_applied: u64,
    pub bytes_ignored: u64,
}

impl Default for State {
    fn default() -> Self {
        State {
            drive: DriveState::STOPPED,
            last_command: None,
            last_cmd_ts: Instant::now(),
            commands_applied: 0,
            bytes_ignored: 0,
        }
    }
}

pub type Blackboard = Arc<RwLock<State>>;

pub fn snapshot(bb: &Blackboard) -> State {
    (*bb.read()).clone()
}

pub fn record_applied(bb: &Blackboard, command: Command, drive: DriveState) {
    let mut g = bb.write();
    g.drive = drive;
    g.last_command = Some(command);
    g.last_cmd_ts = Instant::now();
    g.commands_applied += 1;
}

pub fn record_ignored(bb: &Blackboard) {
    bb.write().bytes_ignored += 1;
}
