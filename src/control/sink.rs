//! Outbound command sinks

use robot_protocol::Command;

/// Destination for commands produced by the panel.
///
/// Sending is fire-and-forget: there is no acknowledgement and a sink never
/// reports failure back to the caller.
pub trait CommandSink {
    fn send(&mut self, command: Command);
}

/// Collects commands in memory
impl CommandSink for Vec<Command> {
    fn send(&mut self, command: Command) {
        self.push(command);
    }
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn send(&mut self, command: Command) {
        (**self).send(command);
    }
}
