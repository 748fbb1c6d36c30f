use uav_gcs_shared::{CommandAck, GcsCommand};

/// Labels offered in the command selector, in display order.
pub fn command_labels() -> Vec<&'static str> {
    GcsCommand::ALL.iter().map(GcsCommand::label).collect()
}

/// Acknowledges `command` for `uav_id`. Nothing is sent to the vehicle.
pub fn acknowledge(command: GcsCommand, uav_id: &str) -> CommandAck {
    tracing::info!(uav = uav_id, command = command.key(), "command acknowledged");
    CommandAck {
        uav: uav_id.to_string(),
        command,
        message: format!("Command '{}' executed for {uav_id}!", command.label()),
    }
}
